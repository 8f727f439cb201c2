//! Data transfer objects for web requests and responses.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    self, CellStatus, CycleLane, Journey, PathItem, ResponseStatus, Section, SectionEndpoint,
    SectionType,
};

/// Request for a point-to-point journey.
#[derive(Debug, Deserialize)]
pub struct DirectPathRequest {
    /// Origin place: `coord:<lon>:<lat>` or `<lon>;<lat>`.
    pub origin: String,

    /// Destination place, same forms as the origin.
    pub destination: String,

    /// Wire mode name: `walking`, `bike`, `car`, `taxi` or `bss`.
    pub mode: String,

    /// Departure time, RFC 3339; defaults to now.
    pub datetime: Option<String>,

    /// Walking speed in m/s.
    pub walking_speed: Option<f32>,

    /// Cycling speed in m/s; also the riding speed of `bss` requests.
    pub bike_speed: Option<f32>,

    /// Driving speed in m/s.
    pub car_speed: Option<f32>,

    /// Speed of a car that never parks, in m/s. Taxi requests travel at
    /// this speed.
    pub car_no_park_speed: Option<f32>,

    /// Seconds a bike-share rent stop takes in the journey.
    pub bss_rent_duration: Option<u32>,

    /// Solver cost of renting, in seconds.
    pub bss_rent_penalty: Option<f32>,

    /// Seconds a bike-share return stop takes in the journey.
    pub bss_return_duration: Option<u32>,

    /// Solver cost of returning, in seconds.
    pub bss_return_penalty: Option<f32>,

    /// Whether to generate turn-by-turn instruction text.
    #[serde(default)]
    pub enable_instructions: bool,

    /// Narrative language, e.g. `fr-FR`.
    pub language: Option<String>,
}

/// Request for a one-to-many or many-to-one travel-time matrix.
#[derive(Debug, Deserialize)]
pub struct MatrixRequest {
    /// Origin places; exactly one of origins/destinations should hold more
    /// than one entry.
    pub origins: Vec<String>,

    /// Destination places.
    pub destinations: Vec<String>,

    /// Wire mode name.
    pub mode: String,

    /// Travel speed in m/s for the requested mode; defaults per mode.
    pub speed: Option<f32>,

    /// Upper bound on each cell's travel time, in seconds.
    pub max_duration: u32,
}

/// Response for a direct-path request.
#[derive(Debug, Serialize)]
pub struct DirectPathResponse {
    /// `itinerary_found` or `no_solution`.
    pub status: String,

    /// The found journey, if any.
    pub journeys: Vec<JourneyResult>,
}

/// One journey.
#[derive(Debug, Serialize)]
pub struct JourneyResult {
    /// Total travel time in seconds.
    pub duration: u32,

    /// Number of transfers (always 0 for street journeys).
    pub nb_transfers: u32,

    /// Time the journey was requested for.
    pub requested_date_time: String,

    /// Departure time.
    pub departure_date_time: String,

    /// Arrival time.
    pub arrival_date_time: String,

    /// Per-mode travel time totals.
    pub durations: DurationsResult,

    /// Per-mode distance totals.
    pub distances: DistancesResult,

    /// The journey's sections, in travel order.
    pub sections: Vec<SectionResult>,
}

/// Per-mode duration totals in seconds.
#[derive(Debug, Serialize)]
pub struct DurationsResult {
    pub walking: u32,
    pub bike: u32,
    pub car: u32,
    pub ridesharing: u32,
    pub taxi: u32,
    pub total: u32,
}

/// Per-mode distance totals in meters.
#[derive(Debug, Serialize)]
pub struct DistancesResult {
    pub walking: u32,
    pub bike: u32,
    pub car: u32,
    pub ridesharing: u32,
    pub taxi: u32,
}

/// One section of a journey.
#[derive(Debug, Serialize)]
pub struct SectionResult {
    /// Section identifier, `section_<n>`.
    pub id: String,

    /// `street_network`, `bss_rent` or `bss_return`.
    #[serde(rename = "type")]
    pub section_type: String,

    /// Travel mode of the section.
    pub mode: String,

    /// Duration in seconds.
    pub duration: u32,

    /// Length in meters.
    pub length: u32,

    pub begin_date_time: String,

    pub end_date_time: String,

    pub origin: PlaceResult,

    pub destination: PlaceResult,

    /// The shape points this section covers.
    pub geometry: Vec<PointResult>,

    /// Turn-by-turn items.
    pub path_items: Vec<PathItemResult>,
}

/// A referenced place on the street network.
#[derive(Debug, Serialize)]
pub struct PlaceResult {
    /// `<lon>;<lat>` at fixed 5-decimal precision.
    pub uri: String,

    pub lon: f64,

    pub lat: f64,
}

/// One point of a section's geometry.
#[derive(Debug, Serialize)]
pub struct PointResult {
    pub lon: f64,
    pub lat: f64,
}

/// One turn-by-turn item.
#[derive(Debug, Serialize)]
pub struct PathItemResult {
    /// Street name, empty when the engine has none.
    pub name: String,

    /// Length in meters.
    pub length: f32,

    /// Duration in seconds.
    pub duration: u32,

    /// Signed turn direction in degrees, in (−180, 180].
    pub direction: Option<i32>,

    /// Cycle-lane classification, when the engine reports one.
    pub cycle_lane: Option<String>,

    /// Instruction text, when instructions were requested.
    pub instruction: Option<String>,
}

/// Response for a matrix request.
#[derive(Debug, Serialize)]
pub struct MatrixResponse {
    /// One cell per element of the plural side, in input order.
    pub row: Vec<MatrixCellResult>,
}

/// One cell of a matrix response.
#[derive(Debug, Serialize)]
pub struct MatrixCellResult {
    /// Travel time in seconds; the unreachable sentinel for unreached
    /// cells.
    pub duration: u32,

    /// `reached` or `unreached`.
    pub status: String,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable machine-readable error identifier.
    pub id: String,

    /// Human-readable detail.
    pub message: String,
}

// Conversion implementations

impl DirectPathResponse {
    /// Create from a domain journey response.
    pub fn from_domain(response: &domain::JourneyResponse) -> Self {
        let status = match response.status {
            ResponseStatus::ItineraryFound => "itinerary_found",
            ResponseStatus::NoSolution => "no_solution",
        };
        Self {
            status: status.to_string(),
            journeys: response
                .journeys
                .iter()
                .map(JourneyResult::from_journey)
                .collect(),
        }
    }
}

impl JourneyResult {
    /// Create from a domain Journey.
    pub fn from_journey(journey: &Journey) -> Self {
        Self {
            duration: journey.duration_secs,
            nb_transfers: journey.nb_transfers,
            requested_date_time: format_datetime(journey.requested_at),
            departure_date_time: format_datetime(journey.departure),
            arrival_date_time: format_datetime(journey.arrival),
            durations: DurationsResult {
                walking: journey.durations.walking,
                bike: journey.durations.bike,
                car: journey.durations.car,
                ridesharing: journey.durations.ridesharing,
                taxi: journey.durations.taxi,
                total: journey.durations.total,
            },
            distances: DistancesResult {
                walking: journey.distances.walking,
                bike: journey.distances.bike,
                car: journey.distances.car,
                ridesharing: journey.distances.ridesharing,
                taxi: journey.distances.taxi,
            },
            sections: journey
                .sections()
                .iter()
                .map(SectionResult::from_section)
                .collect(),
        }
    }
}

impl SectionResult {
    /// Create from a domain Section.
    pub fn from_section(section: &Section) -> Self {
        let section_type = match section.section_type {
            SectionType::StreetNetwork => "street_network",
            SectionType::BssRent => "bss_rent",
            SectionType::BssReturn => "bss_return",
        };
        Self {
            id: section.id.clone(),
            section_type: section_type.to_string(),
            mode: section.mode.name().to_string(),
            duration: section.duration_secs,
            length: section.length_m,
            begin_date_time: format_datetime(section.begin),
            end_date_time: format_datetime(section.end),
            origin: PlaceResult::from_endpoint(&section.origin),
            destination: PlaceResult::from_endpoint(&section.destination),
            geometry: section
                .geometry
                .iter()
                .map(|point| PointResult {
                    lon: point.lon(),
                    lat: point.lat(),
                })
                .collect(),
            path_items: section
                .path_items
                .iter()
                .map(PathItemResult::from_item)
                .collect(),
        }
    }
}

impl PlaceResult {
    /// Create from a domain section endpoint.
    pub fn from_endpoint(endpoint: &SectionEndpoint) -> Self {
        Self {
            uri: endpoint.uri.clone(),
            lon: endpoint.coord.lon(),
            lat: endpoint.coord.lat(),
        }
    }
}

impl PathItemResult {
    /// Create from a domain PathItem.
    pub fn from_item(item: &PathItem) -> Self {
        Self {
            name: item.name.clone(),
            length: item.length_m,
            duration: item.duration_secs,
            direction: item.direction,
            cycle_lane: item.cycle_lane.map(|lane| lane_name(lane).to_string()),
            instruction: item.instruction.clone(),
        }
    }
}

impl MatrixResponse {
    /// Create from a domain matrix response.
    pub fn from_domain(response: &domain::MatrixResponse) -> Self {
        Self {
            row: response
                .row
                .iter()
                .map(|cell| MatrixCellResult {
                    duration: cell.duration_secs,
                    status: match cell.status {
                        CellStatus::Reached => "reached",
                        CellStatus::Unreached => "unreached",
                    }
                    .to_string(),
                })
                .collect(),
        }
    }
}

fn lane_name(lane: CycleLane) -> &'static str {
    match lane {
        CycleLane::NoLane => "no_lane",
        CycleLane::Shared => "shared",
        CycleLane::Dedicated => "dedicated",
        CycleLane::Separated => "separated",
    }
}

/// Format a timestamp as RFC 3339 with second precision.
fn format_datetime(datetime: DateTime<Utc>) -> String {
    datetime.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{BssParams, compose_journey};
    use crate::domain::{CellStatus, Coordinate, MatrixCell, TravelMode};
    use crate::engine::{BssManeuver, Maneuver, SolvedPath};

    fn t(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn sample_journey_response() -> domain::JourneyResponse {
        let shape: Vec<_> = (0..4)
            .map(|i| Coordinate::new(0.001 * f64::from(i), 0.003))
            .collect();
        let mut first = Maneuver::new(TravelMode::Walking, 0, 111, 222.0);
        first.street_names = vec!["Rue des Docks".to_owned()];
        first.instruction = Some("Walk east.".to_owned());
        first.cycle_lane = Some(CycleLane::Shared);
        let mut second = Maneuver::new(TravelMode::Walking, 1, 333, 667.0);
        second.turn_degrees = Some(270);
        let third = Maneuver::new(TravelMode::Walking, 2, 223, 445.0);
        let path = SolvedPath {
            maneuvers: vec![first, second, third],
            shape,
            duration_secs: 667,
        };
        compose_journey(&path, t(0), &BssParams::default(), true).unwrap()
    }

    #[test]
    fn direct_path_response_mirrors_the_journey() {
        let response = DirectPathResponse::from_domain(&sample_journey_response());

        assert_eq!(response.status, "itinerary_found");
        assert_eq!(response.journeys.len(), 1);
        let journey = &response.journeys[0];
        assert_eq!(journey.duration, 667);
        assert_eq!(journey.nb_transfers, 0);
        assert_eq!(journey.durations.walking, 667);
        assert_eq!(journey.distances.walking, 1334);
        assert_eq!(journey.sections.len(), 1);

        let section = &journey.sections[0];
        assert_eq!(section.id, "section_0");
        assert_eq!(section.section_type, "street_network");
        assert_eq!(section.mode, "walking");
        assert_eq!(section.geometry.len(), 4);
        assert_eq!(section.origin.uri, "0.00000;0.00300");
        assert_eq!(section.path_items.len(), 3);
        assert_eq!(section.path_items[0].name, "Rue des Docks");
        assert_eq!(section.path_items[0].cycle_lane.as_deref(), Some("shared"));
        assert_eq!(section.path_items[1].direction, Some(-90));
    }

    #[test]
    fn timestamps_render_as_rfc3339() {
        let response = DirectPathResponse::from_domain(&sample_journey_response());
        let journey = &response.journeys[0];
        assert_eq!(journey.departure_date_time, "2023-11-14T22:13:20Z");
        assert_eq!(journey.arrival_date_time, "2023-11-14T22:24:27Z");
        assert_eq!(journey.requested_date_time, journey.departure_date_time);
    }

    #[test]
    fn no_solution_serializes_with_empty_journeys() {
        let response = DirectPathResponse::from_domain(&domain::JourneyResponse::no_solution());
        assert_eq!(response.status, "no_solution");
        assert!(response.journeys.is_empty());

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "no_solution");
        assert_eq!(json["journeys"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn section_type_serializes_under_the_type_key() {
        let response = DirectPathResponse::from_domain(&sample_journey_response());
        let json = serde_json::to_value(&response).unwrap();
        let section = &json["journeys"][0]["sections"][0];
        assert_eq!(section["type"], "street_network");
        assert_eq!(section["mode"], "walking");
    }

    #[test]
    fn bss_sections_carry_their_wire_types() {
        let shape: Vec<_> = (0..6)
            .map(|i| Coordinate::new(0.001 * f64::from(i), 0.003))
            .collect();
        let walk_in = Maneuver::new(TravelMode::Walking, 0, 100, 80.0);
        let mut rent = Maneuver::new(TravelMode::Bike, 1, 130, 100.0);
        rent.bss_maneuver = BssManeuver::RentAtStation;
        let ride = Maneuver::new(TravelMode::Bike, 2, 300, 800.0);
        let mut give_back = Maneuver::new(TravelMode::Walking, 3, 70, 25.0);
        give_back.bss_maneuver = BssManeuver::ReturnAtStation;
        let walk_out = Maneuver::new(TravelMode::Walking, 4, 50, 15.0);
        let path = SolvedPath {
            maneuvers: vec![walk_in, rent, ride, give_back, walk_out],
            shape,
            duration_secs: 650,
        };
        let domain_response = compose_journey(&path, t(0), &BssParams::default(), false).unwrap();

        let response = DirectPathResponse::from_domain(&domain_response);
        let types: Vec<_> = response.journeys[0]
            .sections
            .iter()
            .map(|s| s.section_type.as_str())
            .collect();
        assert_eq!(
            types,
            vec![
                "street_network",
                "bss_rent",
                "street_network",
                "bss_return",
                "street_network"
            ]
        );
    }

    #[test]
    fn matrix_response_mirrors_the_row() {
        let domain_response = domain::MatrixResponse {
            row: vec![
                MatrixCell {
                    duration_secs: 111,
                    status: CellStatus::Reached,
                },
                MatrixCell {
                    duration_secs: u32::MAX,
                    status: CellStatus::Unreached,
                },
            ],
        };
        let response = MatrixResponse::from_domain(&domain_response);
        assert_eq!(response.row.len(), 2);
        assert_eq!(response.row[0].duration, 111);
        assert_eq!(response.row[0].status, "reached");
        assert_eq!(response.row[1].status, "unreached");
    }

    #[test]
    fn request_decodes_with_defaults() {
        let request: DirectPathRequest = serde_json::from_str(
            r#"{
                "origin": "coord:0.001:0.003",
                "destination": "0.013;0.003",
                "mode": "walking"
            }"#,
        )
        .unwrap();
        assert_eq!(request.origin, "coord:0.001:0.003");
        assert_eq!(request.mode, "walking");
        assert!(!request.enable_instructions);
        assert_eq!(request.walking_speed, None);
        assert_eq!(request.datetime, None);
    }

    #[test]
    fn matrix_request_decodes() {
        let request: MatrixRequest = serde_json::from_str(
            r#"{
                "origins": ["0.001;0.003"],
                "destinations": ["0.013;0.003", "0.009;0.003"],
                "mode": "bss",
                "speed": 4.1,
                "max_duration": 1800
            }"#,
        )
        .unwrap();
        assert_eq!(request.origins.len(), 1);
        assert_eq!(request.destinations.len(), 2);
        assert_eq!(request.mode, "bss");
        assert_eq!(request.speed, Some(4.1));
        assert_eq!(request.max_duration, 1800);
    }
}
