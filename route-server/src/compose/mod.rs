//! Composition of caller-facing journeys from solved paths.
//!
//! A solved path is one unbroken list of maneuvers. Composition cuts it into
//! typed sections: a mono-modal path becomes a single street-network section,
//! while a path carrying bike-share markers becomes up to five sections
//! (walk, rent, ride, return, walk). Section clocks tile forward from the
//! departure time, and per-mode aggregates are derived from the street
//! sections.

mod items;
mod metadata;
mod section;

use chrono::{DateTime, Utc};

use crate::domain::{Journey, JourneyError, JourneyResponse};
use crate::engine::{BssManeuver, SolvedPath};

/// Fixed costs of the bike-share stops, in seconds.
///
/// The engine embeds these in the rent and return marker maneuvers; the
/// composer re-bills them to the dedicated stop sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BssParams {
    pub rent_duration_secs: u32,
    pub return_duration_secs: u32,
}

impl Default for BssParams {
    fn default() -> Self {
        Self {
            rent_duration_secs: 120,
            return_duration_secs: 60,
        }
    }
}

/// Error turning a solved path into a journey.
///
/// Every variant means the engine handed back a path that violates its own
/// contract; callers surface these as internal errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComposeError {
    #[error("path has a rent marker but no return marker")]
    RentWithoutReturn,
    #[error("path has a return marker but no rent marker")]
    ReturnWithoutRent,
    #[error("path returns the bike before renting it")]
    MarkersOutOfOrder,
    #[error("maneuver shape index outside the path shape")]
    ShapeOutOfRange,
    #[error("maneuver shape indices run backwards")]
    ShapeOutOfOrder,
    #[error(transparent)]
    Structure(#[from] JourneyError),
}

/// Turns a solved path into a journey response.
///
/// An empty path means the solver found no route; that is a terminal
/// no-solution response rather than an error.
///
/// # Errors
///
/// Returns `Err` when the path's markers or shape indices are inconsistent;
/// see [`ComposeError`].
pub fn compose_journey(
    path: &SolvedPath,
    departure: DateTime<Utc>,
    bss: &BssParams,
    enable_instructions: bool,
) -> Result<JourneyResponse, ComposeError> {
    if path.maneuvers.is_empty() || path.shape.is_empty() {
        return Ok(JourneyResponse::no_solution());
    }
    if path
        .maneuvers
        .iter()
        .any(|m| m.begin_shape_index >= path.shape.len())
    {
        return Err(ComposeError::ShapeOutOfRange);
    }
    // each section slices the shape from its first maneuver's begin index to
    // the next span's, so the indices must never decrease
    if path
        .maneuvers
        .windows(2)
        .any(|pair| pair[1].begin_shape_index < pair[0].begin_shape_index)
    {
        return Err(ComposeError::ShapeOutOfOrder);
    }

    let rent_at = path
        .maneuvers
        .iter()
        .position(|m| m.bss_maneuver == BssManeuver::RentAtStation);
    let return_at = path
        .maneuvers
        .iter()
        .position(|m| m.bss_maneuver == BssManeuver::ReturnAtStation);

    let sections = match (rent_at, return_at) {
        (None, None) => {
            let all = 0..path.maneuvers.len();
            vec![section::street_section(
                path,
                all,
                departure,
                bss,
                enable_instructions,
                0,
            )]
        }
        (Some(rent), Some(ret)) if rent < ret => {
            bss_sections(path, rent, ret, departure, bss, enable_instructions)
        }
        (Some(_), Some(_)) => return Err(ComposeError::MarkersOutOfOrder),
        (Some(_), None) => return Err(ComposeError::RentWithoutReturn),
        (None, Some(_)) => return Err(ComposeError::ReturnWithoutRent),
    };

    let (durations, distances) = metadata::aggregate(&sections);
    let journey = Journey::new(sections, path.duration_secs, departure, durations, distances)?;
    Ok(JourneyResponse::itinerary_found(journey))
}

/// Cuts a path with rent/return markers into its sections, threading the
/// clock from one section's end to the next one's begin.
fn bss_sections(
    path: &SolvedPath,
    rent_at: usize,
    return_at: usize,
    departure: DateTime<Utc>,
    bss: &BssParams,
    enable_instructions: bool,
) -> Vec<crate::domain::Section> {
    let total = path.maneuvers.len();
    let mut sections = Vec::with_capacity(5);
    let mut cursor = departure;

    if rent_at > 0 {
        let walk = section::street_section(
            path,
            0..rent_at,
            cursor,
            bss,
            enable_instructions,
            sections.len(),
        );
        cursor = walk.end;
        sections.push(walk);
    }

    let rent = section::rent_section(path, rent_at, cursor, bss, sections.len());
    cursor = rent.end;
    sections.push(rent);

    let ride = section::street_section(
        path,
        rent_at..return_at,
        cursor,
        bss,
        enable_instructions,
        sections.len(),
    );
    cursor = ride.end;
    sections.push(ride);

    let give_back = section::return_section(path, return_at, cursor, bss, sections.len());
    cursor = give_back.end;
    sections.push(give_back);

    if return_at + 1 < total {
        let walk = section::street_section(
            path,
            return_at..total,
            cursor,
            bss,
            enable_instructions,
            sections.len(),
        );
        sections.push(walk);
    }

    sections
}
