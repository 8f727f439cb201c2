//! Per-mode journey aggregates.

use crate::domain::{Distances, Durations, Section, SectionType, TravelMode};

/// Sums street-network sections into per-mode duration and distance
/// buckets. Rent and return stops are deliberately left out of the
/// buckets; they still count towards the total, which spans from the
/// first section's begin to the last section's end.
pub(crate) fn aggregate(sections: &[Section]) -> (Durations, Distances) {
    let mut durations = Durations::default();
    let mut distances = Distances::default();
    for section in sections {
        if section.section_type != SectionType::StreetNetwork {
            continue;
        }
        match section.mode {
            TravelMode::Walking => {
                durations.walking += section.duration_secs;
                distances.walking += section.length_m;
            }
            TravelMode::Bike => {
                durations.bike += section.duration_secs;
                distances.bike += section.length_m;
            }
            TravelMode::Car => {
                durations.car += section.duration_secs;
                distances.car += section.length_m;
            }
            TravelMode::Taxi => {
                durations.taxi += section.duration_secs;
                distances.taxi += section.length_m;
            }
        }
    }
    if let (Some(first), Some(last)) = (sections.first(), sections.last()) {
        durations.total = (last.end - first.begin).num_seconds() as u32;
    }
    (durations, distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};
    use crate::domain::{Coordinate, SectionEndpoint};

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn section(
        section_type: SectionType,
        mode: TravelMode,
        begin: DateTime<Utc>,
        duration_secs: u32,
        length_m: u32,
    ) -> Section {
        let endpoint = SectionEndpoint::from_coordinate(Coordinate::new(0.001, 0.003));
        Section {
            id: "section_0".to_owned(),
            section_type,
            mode,
            duration_secs,
            length_m,
            begin,
            end: begin + Duration::seconds(i64::from(duration_secs)),
            origin: endpoint.clone(),
            destination: endpoint,
            geometry: Vec::new(),
            path_items: Vec::new(),
        }
    }

    #[test]
    fn buckets_street_sections_by_mode() {
        let sections = vec![
            section(SectionType::StreetNetwork, TravelMode::Walking, t(0), 100, 80),
            section(SectionType::BssRent, TravelMode::Bike, t(100), 120, 0),
            section(SectionType::StreetNetwork, TravelMode::Bike, t(220), 310, 900),
            section(SectionType::BssReturn, TravelMode::Walking, t(530), 60, 0),
            section(SectionType::StreetNetwork, TravelMode::Walking, t(590), 60, 40),
        ];
        let (durations, distances) = aggregate(&sections);
        assert_eq!(durations.walking, 160);
        assert_eq!(durations.bike, 310);
        assert_eq!(durations.car, 0);
        assert_eq!(durations.taxi, 0);
        assert_eq!(durations.total, 650);
        assert_eq!(distances.walking, 120);
        assert_eq!(distances.bike, 900);
    }

    #[test]
    fn total_spans_first_begin_to_last_end() {
        // the stops keep the clock running even though they are not
        // bucketed by mode
        let sections = vec![
            section(SectionType::BssRent, TravelMode::Bike, t(0), 120, 0),
            section(SectionType::StreetNetwork, TravelMode::Bike, t(120), 300, 900),
        ];
        let (durations, _) = aggregate(&sections);
        assert_eq!(durations.bike, 300);
        assert_eq!(durations.total, 420);
    }

    #[test]
    fn empty_input_is_all_zeroes() {
        let (durations, distances) = aggregate(&[]);
        assert_eq!(durations, Durations::default());
        assert_eq!(distances, Distances::default());
    }
}
