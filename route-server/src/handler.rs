//! Request orchestration.
//!
//! The handler owns the engine handle and the shared projection cache, and
//! drives one request from decoded wire form to domain response: parse the
//! mode, rebuild the request's cost-model table, place the endpoints on the
//! graph, call the right solver, and hand the result to the composer or the
//! matrix assembler. Every failure becomes a [`RoutingError`] with a stable
//! wire identifier.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::compose::{self, BssParams, ComposeError};
use crate::costing::{BssCosting, CostModelSet, CostingParams, SpeedParams, default_speed};
use crate::domain::{
    Coordinate, InvalidMode, JourneyResponse, MatrixResponse, RequestMode, parse_place,
};
use crate::engine::{EngineError, PathOptions, RoutingEngine};
use crate::matrix::{self, MatrixError, MatrixQuery};
use crate::projector::Projector;

/// A direct-path request after wire decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectPathRequest {
    pub origin: String,
    pub destination: String,
    pub mode: String,
    pub speeds: SpeedParams,
    pub bss_costing: BssCosting,
    pub bss_params: BssParams,
    pub departure: DateTime<Utc>,
    pub enable_instructions: bool,
    /// Narrative language passed through to the engine; `None` keeps the
    /// engine's default.
    pub language: Option<String>,
}

/// A matrix request after wire decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixRequest {
    pub origins: Vec<String>,
    pub destinations: Vec<String>,
    pub mode: String,
    /// Travel speed in m/s for the requested mode; `None` takes the mode's
    /// default.
    pub speed: Option<f32>,
    pub max_duration_secs: u32,
}

/// Terminal request failure.
///
/// Each variant maps to a stable wire identifier via [`RoutingError::id`];
/// the web layer picks the HTTP status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoutingError {
    #[error("the origin cannot be placed on the street network")]
    NoOriginProjection,
    #[error("the destination cannot be placed on the street network")]
    NoDestinationProjection,
    #[error("neither the origin nor the destination can be placed on the street network")]
    NoOriginNorDestinationProjection,
    #[error(transparent)]
    UnroutableMode(#[from] InvalidMode),
    #[error("internal error: {0}")]
    Internal(String),
}

impl RoutingError {
    /// The machine-readable identifier carried on wire error responses.
    pub fn id(&self) -> &'static str {
        match self {
            RoutingError::NoOriginProjection => "no_origin",
            RoutingError::NoDestinationProjection => "no_destination",
            RoutingError::NoOriginNorDestinationProjection => "no_origin_nor_destination",
            RoutingError::UnroutableMode(_) => "unroutable_mode",
            RoutingError::Internal(_) => "internal_error",
        }
    }
}

impl From<EngineError> for RoutingError {
    fn from(err: EngineError) -> Self {
        RoutingError::Internal(err.to_string())
    }
}

impl From<ComposeError> for RoutingError {
    fn from(err: ComposeError) -> Self {
        RoutingError::Internal(err.to_string())
    }
}

impl From<MatrixError> for RoutingError {
    fn from(err: MatrixError) -> Self {
        match err {
            MatrixError::NoOrigin => RoutingError::NoOriginProjection,
            MatrixError::NoDestination => RoutingError::NoDestinationProjection,
            other => RoutingError::Internal(other.to_string()),
        }
    }
}

/// The request orchestrator shared by all workers.
pub struct Handler {
    engine: Arc<dyn RoutingEngine>,
    projector: Projector,
}

impl Handler {
    pub fn new(engine: Arc<dyn RoutingEngine>, projector: Projector) -> Self {
        Self { engine, projector }
    }

    /// Serves one direct-path request.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown mode, endpoints that cannot be placed on
    /// the street network, or an engine/composition failure. A route that
    /// simply does not exist is the `NoSolution` success response.
    pub fn handle_direct_path(
        &self,
        request: DirectPathRequest,
    ) -> Result<JourneyResponse, RoutingError> {
        let started = Instant::now();
        let mode = RequestMode::parse(&request.mode)?;

        let models = CostModelSet::rebuild(&CostingParams {
            speeds: request.speeds,
            bss: request.bss_costing,
        });
        let model = models.lookup(mode.projection_mode());

        // both endpoints resolve through one engine search; one-off user
        // coordinates skip the cache so they cannot evict hot entries
        let origin = parse_place(&request.origin).ok();
        let destination = parse_place(&request.destination).ok();
        let coords: Vec<Coordinate> = origin.iter().chain(destination.iter()).copied().collect();
        let anchored = self.projector.resolve(&coords, mode, model, false)?;

        let origin = origin.and_then(|c| anchored.get(&c).cloned());
        let destination = destination.and_then(|c| anchored.get(&c).cloned());
        let (origin, destination) = match (origin, destination) {
            (Some(origin), Some(destination)) => (origin, destination),
            (None, None) => return Err(RoutingError::NoOriginNorDestinationProjection),
            (None, Some(_)) => return Err(RoutingError::NoOriginProjection),
            (Some(_), None) => return Err(RoutingError::NoDestinationProjection),
        };

        let options = PathOptions {
            language: request.language,
        };
        let path = self
            .engine
            .best_path(&origin, &destination, &models, mode, &options)?;
        let response = match path {
            Some(path) => compose::compose_journey(
                &path,
                request.departure,
                &request.bss_params,
                request.enable_instructions,
            )?,
            None => JourneyResponse::no_solution(),
        };

        info!(
            mode = %mode,
            status = ?response.status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Direct path request done"
        );
        Ok(response)
    }

    /// Serves one matrix request.
    ///
    /// # Errors
    ///
    /// Returns `Err` for an unknown mode, a side with no usable place, or an
    /// engine/assembly failure. Individual unreachable or unplaceable
    /// elements degrade inside the response instead.
    pub fn handle_matrix(&self, request: MatrixRequest) -> Result<MatrixResponse, RoutingError> {
        let started = Instant::now();
        let mode = RequestMode::parse(&request.mode)?;
        let query = MatrixQuery {
            origins: request.origins,
            destinations: request.destinations,
            mode,
            speed: request.speed.unwrap_or_else(|| default_speed(mode)),
            max_duration_secs: request.max_duration_secs,
        };
        let response = matrix::assemble(&self.projector, self.engine.as_ref(), &query)?;

        info!(
            mode = %mode,
            unreached = response.nb_unreached(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Matrix request done"
        );
        Ok(response)
    }
}
