//! Routing engine boundary.
//!
//! The street-routing engine — graph store, snapping search, path and matrix
//! solvers, maneuver generation — lives behind the [`RoutingEngine`] trait.
//! This crate orchestrates calls to it and re-implements none of it.
//! [`mock::MockEngine`] is a programmable stand-in for tests and for running
//! the server without a graph-backed engine crate.

mod error;
pub mod mock;
mod types;

pub use error::EngineError;
pub use types::{AnchoredLocation, BssManeuver, Maneuver, PathOptions, SnapOptions, SolvedPath};

use crate::costing::{CostModel, CostModelSet};
use crate::domain::{Coordinate, RequestMode, TravelMode};

/// Sentinel travel time for an unreachable matrix element.
pub const UNREACHED: u32 = u32::MAX;

/// The external street-routing engine.
///
/// All methods are synchronous and callable from any thread; implementations
/// handle their own internal locking. Errors are engine failures — "nothing
/// found" outcomes are part of each return shape.
pub trait RoutingEngine: Send + Sync {
    /// Snaps a batch of coordinates onto the graph under one cost model.
    ///
    /// Returns a pair per coordinate the engine could anchor; coordinates
    /// outside any mode-accessible edge are simply absent. One call may
    /// carry any number of coordinates — batching is the point, since a
    /// graph search is the expensive part of location handling.
    fn snap(
        &self,
        coordinates: &[Coordinate],
        options: &SnapOptions,
        model: &CostModel,
    ) -> Result<Vec<(Coordinate, AnchoredLocation)>, EngineError>;

    /// Solves one point-to-point path. `None` means no route exists.
    ///
    /// The full cost-model table is required: a bike-share solve dispatches
    /// per-edge across the walking and bike slots.
    fn best_path(
        &self,
        origin: &AnchoredLocation,
        destination: &AnchoredLocation,
        models: &CostModelSet,
        mode: RequestMode,
        options: &PathOptions,
    ) -> Result<Option<SolvedPath>, EngineError>;

    /// Computes travel times from every source to every target, row-major
    /// over `sources × targets`. Unreachable pairs carry [`UNREACHED`].
    /// `max_distance_m` bounds the search.
    fn matrix(
        &self,
        sources: &[AnchoredLocation],
        targets: &[AnchoredLocation],
        models: &CostModelSet,
        mode: TravelMode,
        max_distance_m: f32,
    ) -> Result<Vec<u32>, EngineError>;

    /// The bike-share-aware multimodal variant of [`matrix`](Self::matrix):
    /// each time is the best walk/rent/ride/return combination.
    fn bss_matrix(
        &self,
        sources: &[AnchoredLocation],
        targets: &[AnchoredLocation],
        models: &CostModelSet,
        max_distance_m: f32,
    ) -> Result<Vec<u32>, EngineError>;
}
