//! Journey response model.
//!
//! A `Journey` is the caller-facing rendering of one solved path: an ordered
//! list of typed sections with timestamps, geometry and turn-by-turn path
//! items, plus per-mode duration/distance aggregates.

use chrono::{DateTime, Utc};

use super::{Coordinate, TravelMode};

/// What a section represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    /// Travel along the street network in a single mode.
    StreetNetwork,
    /// Renting a bike at a share station (no displacement).
    BssRent,
    /// Returning a bike to a share station (no displacement).
    BssReturn,
}

/// Cycle-lane classification of a path item, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleLane {
    NoLane,
    Shared,
    Dedicated,
    Separated,
}

/// One turn-by-turn step inside a section.
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    /// Display name of the street, or empty when the engine has none.
    pub name: String,
    /// Length of the step in meters.
    pub length_m: f32,
    /// Duration of the step in seconds.
    pub duration_secs: u32,
    /// Signed turn direction in degrees, normalized into (−180, 180].
    pub direction: Option<i32>,
    pub cycle_lane: Option<CycleLane>,
    /// Turn-by-turn text, present when instructions were requested and the
    /// engine produced one.
    pub instruction: Option<String>,
}

/// A section endpoint: the caller-facing location reference plus the exact
/// coordinate it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEndpoint {
    /// `"<lon>;<lat>"` at fixed 5-decimal precision.
    pub uri: String,
    pub coord: Coordinate,
}

impl SectionEndpoint {
    pub fn from_coordinate(coord: Coordinate) -> Self {
        Self {
            uri: coord.location_ref(),
            coord,
        }
    }
}

/// One typed segment of a journey.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// `section_<n>`, numbered in journey order.
    pub id: String,
    pub section_type: SectionType,
    pub mode: TravelMode,
    pub duration_secs: u32,
    /// Length in meters; 0 for rent/return sections.
    pub length_m: u32,
    pub begin: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub origin: SectionEndpoint,
    pub destination: SectionEndpoint,
    /// The slice of the path's shape this section covers.
    pub geometry: Vec<Coordinate>,
    pub path_items: Vec<PathItem>,
}

/// Per-mode duration totals in seconds.
///
/// `ridesharing` is carried for response-shape compatibility; no street mode
/// currently maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Durations {
    pub walking: u32,
    pub bike: u32,
    pub car: u32,
    pub ridesharing: u32,
    pub taxi: u32,
    /// Last section end − first section begin; may exceed the sum of the
    /// per-mode buckets.
    pub total: u32,
}

impl Durations {
    /// The bucket a street mode aggregates into.
    pub fn for_mode(&self, mode: TravelMode) -> u32 {
        match mode {
            TravelMode::Walking => self.walking,
            TravelMode::Bike => self.bike,
            TravelMode::Car => self.car,
            TravelMode::Taxi => self.taxi,
        }
    }
}

/// Per-mode distance totals in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Distances {
    pub walking: u32,
    pub bike: u32,
    pub car: u32,
    pub ridesharing: u32,
    pub taxi: u32,
}

impl Distances {
    pub fn for_mode(&self, mode: TravelMode) -> u32 {
        match mode {
            TravelMode::Walking => self.walking,
            TravelMode::Bike => self.bike,
            TravelMode::Car => self.car,
            TravelMode::Taxi => self.taxi,
        }
    }
}

/// Error returned when journey sections do not form a valid whole.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JourneyError {
    #[error("journey has no sections")]
    NoSections,
    #[error("section {index} does not begin when the previous section ends")]
    NonContiguous { index: usize },
}

/// A complete journey from origin to destination.
///
/// # Invariants
///
/// - At least one section
/// - Consecutive sections are contiguous in time:
///   `sections[i + 1].begin == sections[i].end`
#[derive(Debug, Clone, PartialEq)]
pub struct Journey {
    sections: Vec<Section>,
    /// Total elapsed time of the solved path in seconds.
    pub duration_secs: u32,
    pub nb_transfers: u32,
    pub requested_at: DateTime<Utc>,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub durations: Durations,
    pub distances: Distances,
}

impl Journey {
    /// Constructs a journey from assembled sections.
    ///
    /// The departure doubles as the requested time; the arrival is the
    /// departure plus the path's total elapsed time; street trips have no
    /// transfers.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the section list is empty or the sections are not
    /// contiguous in time.
    pub fn new(
        sections: Vec<Section>,
        duration_secs: u32,
        departure: DateTime<Utc>,
        durations: Durations,
        distances: Distances,
    ) -> Result<Self, JourneyError> {
        if sections.is_empty() {
            return Err(JourneyError::NoSections);
        }
        for (index, pair) in sections.windows(2).enumerate() {
            if pair[1].begin != pair[0].end {
                return Err(JourneyError::NonContiguous { index: index + 1 });
            }
        }

        let arrival = departure + chrono::Duration::seconds(i64::from(duration_secs));
        Ok(Self {
            sections,
            duration_secs,
            nb_transfers: 0,
            requested_at: departure,
            departure,
            arrival,
            durations,
            distances,
        })
    }

    /// The journey's sections, in travel order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn nb_sections(&self) -> usize {
        self.sections.len()
    }
}

/// Outcome of a direct-path request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    ItineraryFound,
    NoSolution,
}

/// The caller-facing direct-path response.
#[derive(Debug, Clone, PartialEq)]
pub struct JourneyResponse {
    pub status: ResponseStatus,
    pub journeys: Vec<Journey>,
}

impl JourneyResponse {
    /// A terminal "no route exists" response; not an error.
    pub fn no_solution() -> Self {
        Self {
            status: ResponseStatus::NoSolution,
            journeys: Vec::new(),
        }
    }

    pub fn itinerary_found(journey: Journey) -> Self {
        Self {
            status: ResponseStatus::ItineraryFound,
            journeys: vec![journey],
        }
    }
}
