//! Programmable engine double for development and testing.
//!
//! `MockEngine` serves canned snaps, paths and matrix times. Tests register
//! exactly the network they need; [`MockEngine::sample_network`] builds a
//! small six-point fixture so the server can answer real requests without a
//! graph-backed engine crate.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    AnchoredLocation, EngineError, Maneuver, PathOptions, RoutingEngine, SnapOptions, SolvedPath,
    UNREACHED,
};
use crate::costing::{CostModel, CostModelSet};
use crate::domain::{Coordinate, RequestMode, TravelMode};

/// A routing engine that answers from registered data.
///
/// Coordinates must be registered with [`add_place`](Self::add_place) to be
/// snappable; paths and times are keyed by (origin anchor, destination
/// anchor) pairs. Unregistered pairs yield no path / an [`UNREACHED`] time,
/// which is exactly how the real engine reports a severed network.
#[derive(Debug, Default)]
pub struct MockEngine {
    anchors: HashMap<Coordinate, u64>,
    paths: HashMap<(u64, u64), SolvedPath>,
    times: HashMap<(u64, u64), u32>,
    next_anchor: u64,
    snap_calls: AtomicUsize,
    matrix_calls: AtomicUsize,
    bss_matrix_calls: AtomicUsize,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a snappable coordinate and returns its anchored form.
    ///
    /// Registering the same coordinate twice returns the same anchor.
    pub fn add_place(&mut self, coord: Coordinate) -> AnchoredLocation {
        let next = &mut self.next_anchor;
        let anchor = *self.anchors.entry(coord).or_insert_with(|| {
            let id = *next;
            *next += 1;
            id
        });
        AnchoredLocation::new(anchor, coord)
    }

    /// Cans the travel time between two anchored places.
    pub fn set_time(&mut self, from: &AnchoredLocation, to: &AnchoredLocation, secs: u32) {
        self.times.insert((from.anchor(), to.anchor()), secs);
    }

    /// Cans a solved path between two anchored places.
    pub fn set_path(&mut self, from: &AnchoredLocation, to: &AnchoredLocation, path: SolvedPath) {
        self.paths.insert((from.anchor(), to.anchor()), path);
    }

    /// Number of snap invocations so far (invocations, not coordinates).
    pub fn snap_calls(&self) -> usize {
        self.snap_calls.load(Ordering::Relaxed)
    }

    /// Number of ordinary matrix solves so far.
    pub fn matrix_calls(&self) -> usize {
        self.matrix_calls.load(Ordering::Relaxed)
    }

    /// Number of bike-share matrix solves so far.
    pub fn bss_matrix_calls(&self) -> usize {
        self.bss_matrix_calls.load(Ordering::Relaxed)
    }

    /// A six-point development network.
    ///
    /// ```text
    ///                        f
    ///                       /
    ///   a ---- b ---- c ---+---- d
    ///                \          |
    ///                 e --------+
    /// ```
    ///
    /// Walking times from `a` to each point are canned (0, 111, 444, 667,
    /// 359, 568 seconds, symmetric), and a three-maneuver walking path runs
    /// from `a` to `d`.
    pub fn sample_network() -> Self {
        let mut engine = Self::new();

        let coords = [
            Coordinate::new(0.001, 0.003),
            Coordinate::new(0.003, 0.003),
            Coordinate::new(0.009, 0.003),
            Coordinate::new(0.013, 0.003),
            Coordinate::new(0.007, 0.001),
            Coordinate::new(0.010, 0.005),
        ];
        let anchored: Vec<_> = coords.iter().map(|&c| engine.add_place(c)).collect();

        let times_from_a = [0, 111, 444, 667, 359, 568];
        for (place, secs) in anchored.iter().zip(times_from_a) {
            engine.set_time(&anchored[0], place, secs);
            engine.set_time(place, &anchored[0], secs);
        }

        let walk = |begin_shape_index, duration_secs, length_m, name: &str, instruction: &str| {
            Maneuver {
                street_names: vec![name.to_owned()],
                instruction: Some(instruction.to_owned()),
                ..Maneuver::new(TravelMode::Walking, begin_shape_index, duration_secs, length_m)
            }
        };
        let mut maneuvers = vec![
            walk(0, 111, 222.0, "Rue des Docks", "Walk east on Rue des Docks."),
            walk(1, 333, 667.0, "Avenue du Canal", "Continue onto Avenue du Canal."),
            walk(2, 223, 445.0, "Quai des Ormes", "Turn right onto Quai des Ormes."),
        ];
        maneuvers[1].turn_degrees = Some(350);
        maneuvers[2].turn_degrees = Some(90);

        engine.set_path(
            &anchored[0],
            &anchored[3],
            SolvedPath {
                maneuvers,
                shape: vec![coords[0], coords[1], coords[2], coords[3]],
                duration_secs: 667,
            },
        );

        engine
    }
}

impl RoutingEngine for MockEngine {
    fn snap(
        &self,
        coordinates: &[Coordinate],
        _options: &SnapOptions,
        _model: &CostModel,
    ) -> Result<Vec<(Coordinate, AnchoredLocation)>, EngineError> {
        self.snap_calls.fetch_add(1, Ordering::Relaxed);
        Ok(coordinates
            .iter()
            .filter_map(|coord| {
                self.anchors
                    .get(coord)
                    .map(|&anchor| (*coord, AnchoredLocation::new(anchor, *coord)))
            })
            .collect())
    }

    fn best_path(
        &self,
        origin: &AnchoredLocation,
        destination: &AnchoredLocation,
        _models: &CostModelSet,
        _mode: RequestMode,
        _options: &PathOptions,
    ) -> Result<Option<SolvedPath>, EngineError> {
        Ok(self
            .paths
            .get(&(origin.anchor(), destination.anchor()))
            .cloned())
    }

    fn matrix(
        &self,
        sources: &[AnchoredLocation],
        targets: &[AnchoredLocation],
        _models: &CostModelSet,
        _mode: TravelMode,
        _max_distance_m: f32,
    ) -> Result<Vec<u32>, EngineError> {
        self.matrix_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.lookup_times(sources, targets))
    }

    fn bss_matrix(
        &self,
        sources: &[AnchoredLocation],
        targets: &[AnchoredLocation],
        _models: &CostModelSet,
        _max_distance_m: f32,
    ) -> Result<Vec<u32>, EngineError> {
        self.bss_matrix_calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.lookup_times(sources, targets))
    }
}

impl MockEngine {
    fn lookup_times(&self, sources: &[AnchoredLocation], targets: &[AnchoredLocation]) -> Vec<u32> {
        let mut times = Vec::with_capacity(sources.len() * targets.len());
        for source in sources {
            for target in targets {
                times.push(
                    self.times
                        .get(&(source.anchor(), target.anchor()))
                        .copied()
                        .unwrap_or(UNREACHED),
                );
            }
        }
        times
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CostModelSet {
        CostModelSet::rebuild(&crate::costing::CostingParams::default())
    }

    #[test]
    fn snap_returns_only_registered_coordinates() {
        let mut engine = MockEngine::new();
        let known = Coordinate::new(1.0, 2.0);
        let unknown = Coordinate::new(3.0, 4.0);
        engine.add_place(known);

        let models = model();
        let snapped = engine
            .snap(
                &[known, unknown],
                &SnapOptions::default(),
                models.lookup(TravelMode::Walking),
            )
            .unwrap();
        assert_eq!(snapped.len(), 1);
        assert_eq!(snapped[0].0, known);
        assert_eq!(snapped[0].1.point(), known);
    }

    #[test]
    fn snap_calls_count_invocations_not_coordinates() {
        let mut engine = MockEngine::new();
        let a = Coordinate::new(1.0, 2.0);
        let b = Coordinate::new(3.0, 4.0);
        engine.add_place(a);
        engine.add_place(b);

        let models = model();
        let walking = models.lookup(TravelMode::Walking);
        engine.snap(&[a, b], &SnapOptions::default(), walking).unwrap();
        assert_eq!(engine.snap_calls(), 1);
        engine.snap(&[a], &SnapOptions::default(), walking).unwrap();
        assert_eq!(engine.snap_calls(), 2);
    }

    #[test]
    fn registering_twice_reuses_the_anchor() {
        let mut engine = MockEngine::new();
        let coord = Coordinate::new(1.0, 2.0);
        let first = engine.add_place(coord);
        let second = engine.add_place(coord);
        assert_eq!(first, second);
    }

    #[test]
    fn matrix_is_row_major_with_unreached_default() {
        let mut engine = MockEngine::new();
        let a = engine.add_place(Coordinate::new(0.0, 0.0));
        let b = engine.add_place(Coordinate::new(1.0, 0.0));
        let c = engine.add_place(Coordinate::new(2.0, 0.0));
        engine.set_time(&a, &b, 10);
        engine.set_time(&a, &c, 20);

        let times = engine
            .matrix(
                std::slice::from_ref(&a),
                &[b, c, a.clone()],
                &model(),
                TravelMode::Walking,
                1000.0,
            )
            .unwrap();
        assert_eq!(times, vec![10, 20, UNREACHED]);
    }

    #[test]
    fn sample_network_serves_the_canned_walk() {
        let engine = MockEngine::sample_network();
        let models = model();
        let walking = models.lookup(TravelMode::Walking);

        let a = Coordinate::new(0.001, 0.003);
        let d = Coordinate::new(0.013, 0.003);
        let snapped = engine.snap(&[a, d], &SnapOptions::default(), walking).unwrap();
        assert_eq!(snapped.len(), 2);

        let path = engine
            .best_path(
                &snapped[0].1,
                &snapped[1].1,
                &models,
                RequestMode::Walking,
                &PathOptions::default(),
            )
            .unwrap()
            .expect("a->d is canned");
        assert_eq!(path.duration_secs, 667);
        assert_eq!(path.maneuvers.len(), 3);
        assert_eq!(path.shape.len(), 4);
    }

    #[test]
    fn sample_network_times_match_the_fixture() {
        let engine = MockEngine::sample_network();
        let models = model();
        let walking = models.lookup(TravelMode::Walking);

        let coords: Vec<_> = [
            (0.001, 0.003),
            (0.003, 0.003),
            (0.009, 0.003),
            (0.013, 0.003),
            (0.007, 0.001),
            (0.010, 0.005),
        ]
        .iter()
        .map(|&(lon, lat)| Coordinate::new(lon, lat))
        .collect();
        let snapped = engine.snap(&coords, &SnapOptions::default(), walking).unwrap();
        let anchored: Vec<_> = snapped.into_iter().map(|(_, loc)| loc).collect();

        let times = engine
            .matrix(
                std::slice::from_ref(&anchored[0]),
                &anchored,
                &models,
                TravelMode::Walking,
                1000.0,
            )
            .unwrap();
        assert_eq!(times, vec![0, 111, 444, 667, 359, 568]);
    }
}
