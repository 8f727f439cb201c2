//! Routing matrix assembly.
//!
//! A matrix request carries origin and destination place lists of which
//! exactly one is plural; the response is a single row of travel times,
//! index-aligned with the plural side. Individual places that cannot be
//! placed on the street network degrade to Unreached cells at their original
//! positions; only a side with no usable place at all fails the request.

use tracing::info;

use crate::costing::{BssCosting, CostModel, CostModelSet, CostingParams, SpeedParams};
use crate::domain::{
    CellStatus, Coordinate, MatrixCell, MatrixResponse, RequestMode, parse_place,
};
use crate::engine::{AnchoredLocation, EngineError, RoutingEngine, UNREACHED};
use crate::projector::Projector;

/// Generous per-mode speed ceilings in m/s, used to turn the request's time
/// bound into the solver's search-distance bound.
const WALKING_SPEED_CEILING: f32 = 7.0;
const BIKE_SPEED_CEILING: f32 = 19.0;
const DRIVING_SPEED_CEILING: f32 = 112.0;

/// A matrix request after mode parsing: place tokens, one mode, the speed
/// for that mode, and the time bound.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixQuery {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub mode: RequestMode,
    /// Travel speed in m/s for the requested mode.
    pub speed: f32,
    pub max_duration_secs: u32,
}

/// Error assembling a matrix response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    #[error("no origin could be placed on the street network")]
    NoOrigin,
    #[error("no destination could be placed on the street network")]
    NoDestination,
    #[error("solver returned {got} durations for {expected} requested pairs")]
    ResultShape { expected: usize, got: usize },
    #[error("solver results do not line up with the response row")]
    RowMismatch,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Assembles the response row for one matrix request.
///
/// # Errors
///
/// Returns `Err` when one side has no usable place at all, when the engine
/// fails, or when the solver's result count does not line up with the
/// request (a structural bug, surfaced rather than mis-aligning the row).
pub fn assemble(
    projector: &Projector,
    engine: &dyn RoutingEngine,
    query: &MatrixQuery,
) -> Result<MatrixResponse, MatrixError> {
    let models = CostModelSet::rebuild(&CostingParams {
        speeds: SpeedParams::for_mode(query.mode, query.speed),
        bss: BssCosting::default(),
    });
    let model = models.lookup(query.mode.projection_mode());

    let sources = resolve_side(projector, &query.origins, query.mode, model)?;
    let targets = resolve_side(projector, &query.destinations, query.mode, model)?;
    if sources.locations.is_empty() {
        return Err(MatrixError::NoOrigin);
    }
    if targets.locations.is_empty() {
        return Err(MatrixError::NoDestination);
    }

    info!(
        sources = sources.locations.len(),
        targets = targets.locations.len(),
        mode = %query.mode,
        "Processing matrix request"
    );

    let max_distance_m = max_search_distance_m(query.mode, query.max_duration_secs);
    let times = match query.mode.solver_mode() {
        Some(street_mode) => engine.matrix(
            &sources.locations,
            &targets.locations,
            &models,
            street_mode,
            max_distance_m,
        )?,
        None => engine.bss_matrix(
            &sources.locations,
            &targets.locations,
            &models,
            max_distance_m,
        )?,
    };

    let expected = sources.locations.len() * targets.locations.len();
    if times.len() != expected {
        return Err(MatrixError::ResultShape {
            expected,
            got: times.len(),
        });
    }

    // exactly one side is plural; when both end up singular the row runs
    // over the destinations
    let failed = if sources.locations.len() == 1 {
        &targets.failed
    } else {
        &sources.failed
    };
    let row = rebuild_row(&times, failed, query.max_duration_secs)?;
    Ok(MatrixResponse { row })
}

struct ResolvedSide {
    /// Anchored locations for the usable places, in input order.
    locations: Vec<AnchoredLocation>,
    /// One flag per *input* place; `true` where the place was dropped.
    failed: Vec<bool>,
}

/// Parses and projects one side's place tokens.
///
/// Tokens that do not parse and coordinates the engine cannot snap are both
/// recorded as failures; neither aborts the request here.
fn resolve_side(
    projector: &Projector,
    tokens: &[String],
    mode: RequestMode,
    model: &CostModel,
) -> Result<ResolvedSide, EngineError> {
    let coords: Vec<Option<Coordinate>> = tokens
        .iter()
        .map(|token| parse_place(token).ok())
        .collect();
    let wanted: Vec<Coordinate> = coords.iter().filter_map(|&coord| coord).collect();
    let anchored = projector.resolve(&wanted, mode, model, true)?;

    let mut locations = Vec::with_capacity(tokens.len());
    let mut failed = Vec::with_capacity(tokens.len());
    for coord in coords {
        let location = coord.and_then(|c| anchored.get(&c).cloned());
        failed.push(location.is_none());
        if let Some(location) = location {
            locations.push(location);
        }
    }
    Ok(ResolvedSide { locations, failed })
}

/// Rebuilds the full-length row from the reduced solver results.
///
/// Failed positions get an Unreached sentinel without consuming a result;
/// the rest consume results in order and are classified against the
/// unreachable sentinel and the request's time bound. Durations are
/// reported raw either way.
fn rebuild_row(
    times: &[u32],
    failed: &[bool],
    max_duration_secs: u32,
) -> Result<Vec<MatrixCell>, MatrixError> {
    let mut results = times.iter().copied();
    let mut row = Vec::with_capacity(failed.len());
    for &failure in failed {
        if failure {
            row.push(MatrixCell {
                duration_secs: UNREACHED,
                status: CellStatus::Unreached,
            });
            continue;
        }
        let duration_secs = results.next().ok_or(MatrixError::RowMismatch)?;
        let status = if duration_secs == UNREACHED || duration_secs > max_duration_secs {
            CellStatus::Unreached
        } else {
            CellStatus::Reached
        };
        row.push(MatrixCell {
            duration_secs,
            status,
        });
    }
    if results.next().is_some() {
        return Err(MatrixError::RowMismatch);
    }
    Ok(row)
}

fn max_search_distance_m(mode: RequestMode, max_duration_secs: u32) -> f32 {
    let ceiling = match mode {
        RequestMode::Walking => WALKING_SPEED_CEILING,
        RequestMode::Bike | RequestMode::BikeShare => BIKE_SPEED_CEILING,
        RequestMode::Car | RequestMode::Taxi => DRIVING_SPEED_CEILING,
    };
    max_duration_secs as f32 * ceiling
}
