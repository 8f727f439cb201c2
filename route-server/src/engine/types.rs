//! Types crossing the engine boundary.

use crate::domain::{Coordinate, CycleLane, TravelMode};

/// Opaque handle to a coordinate snapped onto the routing graph.
///
/// Produced by [`RoutingEngine::snap`](super::RoutingEngine::snap) and passed
/// back into the engine's solvers unchanged; the adapter never looks inside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredLocation {
    anchor: u64,
    point: Coordinate,
}

impl AnchoredLocation {
    /// Builds a handle from an engine-assigned anchor id and the point it
    /// was snapped from. Only engine implementations construct these.
    pub fn new(anchor: u64, point: Coordinate) -> Self {
        Self { anchor, point }
    }

    pub fn anchor(&self) -> u64 {
        self.anchor
    }

    pub fn point(&self) -> Coordinate {
        self.point
    }
}

/// Bike-share marker on a maneuver.
///
/// A marker maneuver sits at a share station; its elapsed time includes the
/// configured rent/return cost, and it begins the leg that follows the
/// station stop (riding after a rent, walking after a return).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BssManeuver {
    #[default]
    None,
    RentAtStation,
    ReturnAtStation,
}

/// One step of a solved path, as reported by the engine's maneuver
/// generator.
///
/// Maneuvers tile the path's shape: each one's span of shape points ends
/// where the next maneuver's begins.
#[derive(Debug, Clone, PartialEq)]
pub struct Maneuver {
    /// Index into the path's shape where this maneuver starts.
    pub begin_shape_index: usize,
    /// Elapsed time for this step in seconds.
    pub duration_secs: u32,
    /// Length of this step in meters.
    pub length_m: f32,
    /// Compass turn at the start of the step, in raw (unnormalized) degrees.
    pub turn_degrees: Option<u32>,
    /// Street name aliases, most display-worthy first.
    pub street_names: Vec<String>,
    pub mode: TravelMode,
    pub bss_maneuver: BssManeuver,
    pub cycle_lane: Option<CycleLane>,
    /// Text from the engine's narrative generator, when it produced one.
    pub instruction: Option<String>,
}

impl Maneuver {
    /// A maneuver with the given span data and no optional fields set.
    pub fn new(mode: TravelMode, begin_shape_index: usize, duration_secs: u32, length_m: f32) -> Self {
        Self {
            begin_shape_index,
            duration_secs,
            length_m,
            turn_degrees: None,
            street_names: Vec::new(),
            mode,
            bss_maneuver: BssManeuver::None,
            cycle_lane: None,
            instruction: None,
        }
    }
}

/// A solved point-to-point path.
#[derive(Debug, Clone, PartialEq)]
pub struct SolvedPath {
    pub maneuvers: Vec<Maneuver>,
    /// Decoded polyline of the whole path.
    pub shape: Vec<Coordinate>,
    /// Total elapsed time in seconds.
    pub duration_secs: u32,
}

/// Snap search options forwarded to every projection call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SnapOptions {
    /// Search radius in meters; 0 lets the engine use its own default.
    pub radius_m: u32,
    /// Minimum number of reachable edges for a candidate to count.
    pub min_reachability: u32,
}

/// Options for a single best-path solve.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathOptions {
    /// Narrative language for generated instructions, e.g. `fr-FR`.
    pub language: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchored_location_carries_its_point() {
        let point = Coordinate::new(2.3, 48.8);
        let loc = AnchoredLocation::new(7, point);
        assert_eq!(loc.anchor(), 7);
        assert_eq!(loc.point(), point);
    }

    #[test]
    fn maneuver_new_sets_no_markers() {
        let m = Maneuver::new(TravelMode::Walking, 0, 60, 80.0);
        assert_eq!(m.bss_maneuver, BssManeuver::None);
        assert!(m.street_names.is_empty());
        assert!(m.turn_degrees.is_none());
        assert!(m.instruction.is_none());
    }
}
