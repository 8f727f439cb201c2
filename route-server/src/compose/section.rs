//! Section builders.
//!
//! A street section covers a half-open span of maneuvers and the slice of
//! path shape those maneuvers traverse. Rent and return sections are fixed
//! stops at a single point of the shape.

use std::ops::Range;

use chrono::{DateTime, Duration, Utc};

use crate::domain::{PathItem, Section, SectionEndpoint, SectionType};
use crate::engine::{BssManeuver, SolvedPath};

use super::{BssParams, items};

pub(crate) const RENT_INSTRUCTION: &str = "Rent a bike from bike share station.";
pub(crate) const RETURN_INSTRUCTION: &str = "Return the bike to the bike share station.";

/// Builds the section covering `span`, starting at `begin`.
///
/// The span's begin maneuver decides the section mode. When that maneuver is
/// a rent or return stop, the stop's configured cost is embedded in the
/// maneuver's time and is subtracted here, since it is billed to the
/// dedicated rent or return section instead.
pub(crate) fn street_section(
    path: &SolvedPath,
    span: Range<usize>,
    begin: DateTime<Utc>,
    bss: &BssParams,
    enable_instructions: bool,
    index: usize,
) -> Section {
    let maneuvers = &path.maneuvers[span.clone()];
    let first = &maneuvers[0];

    let mut duration_secs: u32 = maneuvers.iter().map(|m| m.duration_secs).sum();
    duration_secs = match first.bss_maneuver {
        BssManeuver::None => duration_secs,
        BssManeuver::RentAtStation => duration_secs.saturating_sub(bss.rent_duration_secs),
        BssManeuver::ReturnAtStation => duration_secs.saturating_sub(bss.return_duration_secs),
    };
    let length_m: f32 = maneuvers.iter().map(|m| m.length_m).sum();

    let shape_begin = first.begin_shape_index;
    let shape_end = if span.end == path.maneuvers.len() {
        path.shape.len()
    } else {
        // include the boundary point, shared with the next section
        path.maneuvers[span.end].begin_shape_index + 1
    };
    let geometry = path.shape[shape_begin..shape_end].to_vec();

    Section {
        id: format!("section_{index}"),
        section_type: SectionType::StreetNetwork,
        mode: first.mode,
        duration_secs,
        length_m: length_m as u32,
        begin,
        end: begin + Duration::seconds(i64::from(duration_secs)),
        origin: SectionEndpoint::from_coordinate(path.shape[shape_begin]),
        destination: SectionEndpoint::from_coordinate(path.shape[shape_end - 1]),
        geometry,
        path_items: items::path_items(maneuvers, enable_instructions),
    }
}

/// The fixed rent stop at the maneuver flagged [`BssManeuver::RentAtStation`].
pub(crate) fn rent_section(
    path: &SolvedPath,
    maneuver_index: usize,
    begin: DateTime<Utc>,
    bss: &BssParams,
    index: usize,
) -> Section {
    stop_section(
        path,
        maneuver_index,
        begin,
        SectionType::BssRent,
        bss.rent_duration_secs,
        RENT_INSTRUCTION,
        index,
    )
}

/// The fixed return stop at the maneuver flagged [`BssManeuver::ReturnAtStation`].
pub(crate) fn return_section(
    path: &SolvedPath,
    maneuver_index: usize,
    begin: DateTime<Utc>,
    bss: &BssParams,
    index: usize,
) -> Section {
    stop_section(
        path,
        maneuver_index,
        begin,
        SectionType::BssReturn,
        bss.return_duration_secs,
        RETURN_INSTRUCTION,
        index,
    )
}

fn stop_section(
    path: &SolvedPath,
    maneuver_index: usize,
    begin: DateTime<Utc>,
    section_type: SectionType,
    duration_secs: u32,
    instruction: &str,
    index: usize,
) -> Section {
    let maneuver = &path.maneuvers[maneuver_index];
    let point = path.shape[maneuver.begin_shape_index];
    Section {
        id: format!("section_{index}"),
        section_type,
        mode: maneuver.mode,
        duration_secs,
        length_m: 0,
        begin,
        end: begin + Duration::seconds(i64::from(duration_secs)),
        origin: SectionEndpoint::from_coordinate(point),
        destination: SectionEndpoint::from_coordinate(point),
        geometry: vec![point],
        path_items: vec![PathItem {
            name: String::new(),
            length_m: 0.0,
            duration_secs,
            direction: None,
            cycle_lane: None,
            instruction: Some(instruction.to_owned()),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Coordinate, TravelMode};
    use crate::engine::Maneuver;

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn shape(points: usize) -> Vec<Coordinate> {
        (0..points)
            .map(|i| Coordinate::new(0.001 * i as f64, 0.003))
            .collect()
    }

    fn walking_path() -> SolvedPath {
        let mut first = Maneuver::new(TravelMode::Walking, 0, 111, 222.0);
        first.street_names = vec!["Rue des Docks".to_owned()];
        let second = Maneuver::new(TravelMode::Walking, 1, 333, 667.0);
        let third = Maneuver::new(TravelMode::Walking, 2, 223, 445.6);
        SolvedPath {
            maneuvers: vec![first, second, third],
            shape: shape(4),
            duration_secs: 667,
        }
    }

    #[test]
    fn sums_duration_and_length_over_the_span() {
        let path = walking_path();
        let section = street_section(&path, 0..3, t(0), &BssParams::default(), false, 0);
        assert_eq!(section.duration_secs, 667);
        // lengths are summed as floats and then truncated
        assert_eq!(section.length_m, 1334);
        assert_eq!(section.mode, TravelMode::Walking);
        assert_eq!(section.id, "section_0");
        assert_eq!(section.begin, t(0));
        assert_eq!(section.end, t(667));
        assert_eq!(section.path_items.len(), 3);
    }

    #[test]
    fn final_span_takes_the_shape_to_its_end() {
        let path = walking_path();
        let section = street_section(&path, 0..3, t(0), &BssParams::default(), false, 0);
        assert_eq!(section.geometry, path.shape);
        assert_eq!(section.origin.coord, path.shape[0]);
        assert_eq!(section.destination.coord, path.shape[3]);
    }

    #[test]
    fn inner_span_includes_the_boundary_point() {
        let path = walking_path();
        let section = street_section(&path, 0..2, t(0), &BssParams::default(), false, 0);
        // span ends before maneuver 2 (shape index 2), so the slice runs
        // through index 2 inclusive
        assert_eq!(section.geometry, path.shape[0..3].to_vec());
        assert_eq!(section.destination.coord, path.shape[2]);
        assert_eq!(section.duration_secs, 444);
    }

    #[test]
    fn rent_cost_is_subtracted_from_the_leg_it_begins() {
        let mut path = walking_path();
        path.maneuvers[0].bss_maneuver = BssManeuver::RentAtStation;
        path.maneuvers[0].mode = TravelMode::Bike;
        let bss = BssParams {
            rent_duration_secs: 100,
            return_duration_secs: 60,
        };
        let section = street_section(&path, 0..3, t(0), &bss, false, 1);
        assert_eq!(section.duration_secs, 567);
        assert_eq!(section.mode, TravelMode::Bike);
        assert_eq!(section.end, t(567));
    }

    #[test]
    fn rent_stop_is_a_single_point() {
        let mut path = walking_path();
        path.maneuvers[1].bss_maneuver = BssManeuver::RentAtStation;
        path.maneuvers[1].mode = TravelMode::Bike;
        let bss = BssParams {
            rent_duration_secs: 120,
            return_duration_secs: 60,
        };
        let section = rent_section(&path, 1, t(10), &bss, 1);
        assert_eq!(section.section_type, SectionType::BssRent);
        assert_eq!(section.duration_secs, 120);
        assert_eq!(section.length_m, 0);
        assert_eq!(section.geometry, vec![path.shape[1]]);
        assert_eq!(section.origin, section.destination);
        assert_eq!(section.begin, t(10));
        assert_eq!(section.end, t(130));
        assert_eq!(section.path_items.len(), 1);
        let item = &section.path_items[0];
        assert_eq!(item.duration_secs, 120);
        assert_eq!(item.instruction.as_deref(), Some(RENT_INSTRUCTION));
        assert_eq!(item.length_m, 0.0);
    }

    #[test]
    fn return_stop_has_its_own_instruction() {
        let mut path = walking_path();
        path.maneuvers[2].bss_maneuver = BssManeuver::ReturnAtStation;
        let bss = BssParams {
            rent_duration_secs: 120,
            return_duration_secs: 45,
        };
        let section = return_section(&path, 2, t(0), &bss, 3);
        assert_eq!(section.section_type, SectionType::BssReturn);
        assert_eq!(section.duration_secs, 45);
        assert_eq!(section.id, "section_3");
        assert_eq!(
            section.path_items[0].instruction.as_deref(),
            Some(RETURN_INSTRUCTION)
        );
    }
}
