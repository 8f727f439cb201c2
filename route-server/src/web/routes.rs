//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use tracing::error;

use crate::compose::BssParams;
use crate::costing::{BssCosting, SpeedParams};
use crate::handler::{self, RoutingError};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/direct_path", post(direct_path))
        .route("/v1/matrix", post(matrix))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Solve a point-to-point journey.
async fn direct_path(
    State(state): State<AppState>,
    Json(req): Json<DirectPathRequest>,
) -> Result<Json<DirectPathResponse>, AppError> {
    let request = decode_direct_path(req)?;
    let handler = state.handler.clone();
    let response = tokio::task::spawn_blocking(move || handler.handle_direct_path(request))
        .await
        .map_err(join_error)??;

    Ok(Json(DirectPathResponse::from_domain(&response)))
}

/// Compute a one-to-many or many-to-one travel-time matrix.
async fn matrix(
    State(state): State<AppState>,
    Json(req): Json<MatrixRequest>,
) -> Result<Json<MatrixResponse>, AppError> {
    let request = handler::MatrixRequest {
        origins: req.origins,
        destinations: req.destinations,
        mode: req.mode,
        speed: req.speed,
        max_duration_secs: req.max_duration,
    };
    let handler = state.handler.clone();
    let response = tokio::task::spawn_blocking(move || handler.handle_matrix(request))
        .await
        .map_err(join_error)??;

    Ok(Json(MatrixResponse::from_domain(&response)))
}

/// Decode the wire request into the handler's form.
///
/// Taxi journeys drive at the wire's `car_no_park_speed`; there is no
/// dedicated taxi speed field.
fn decode_direct_path(req: DirectPathRequest) -> Result<handler::DirectPathRequest, AppError> {
    let defaults = SpeedParams::default();
    let speeds = SpeedParams {
        walking: req.walking_speed.unwrap_or(defaults.walking),
        bike: req.bike_speed.unwrap_or(defaults.bike),
        car: req.car_speed.unwrap_or(defaults.car),
        taxi: req.car_no_park_speed.unwrap_or(defaults.taxi),
    };
    let bss_costing = BssCosting {
        rent_penalty: req.bss_rent_penalty.unwrap_or_default(),
        return_penalty: req.bss_return_penalty.unwrap_or_default(),
    };
    let stop_defaults = BssParams::default();
    let bss_params = BssParams {
        rent_duration_secs: req
            .bss_rent_duration
            .unwrap_or(stop_defaults.rent_duration_secs),
        return_duration_secs: req
            .bss_return_duration
            .unwrap_or(stop_defaults.return_duration_secs),
    };
    let departure = parse_datetime(req.datetime.as_deref())?;

    Ok(handler::DirectPathRequest {
        origin: req.origin,
        destination: req.destination,
        mode: req.mode,
        speeds,
        bss_costing,
        bss_params,
        departure,
        enable_instructions: req.enable_instructions,
        language: req.language,
    })
}

/// Parse an RFC 3339 departure time; absent means now.
fn parse_datetime(datetime: Option<&str>) -> Result<DateTime<Utc>, AppError> {
    match datetime {
        None => Ok(Utc::now()),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|parsed| parsed.with_timezone(&Utc))
            .map_err(|e| AppError::BadRequest {
                id: "invalid_datetime",
                message: format!("invalid datetime {raw:?}: {e}"),
            }),
    }
}

fn join_error(err: tokio::task::JoinError) -> AppError {
    AppError::Internal {
        id: "internal_error",
        message: err.to_string(),
    }
}

/// Application error type.
///
/// Carries the stable identifier the wire error body exposes alongside the
/// human-readable message.
#[derive(Debug)]
pub enum AppError {
    BadRequest { id: &'static str, message: String },
    NotFound { id: &'static str, message: String },
    Internal { id: &'static str, message: String },
}

impl From<RoutingError> for AppError {
    fn from(err: RoutingError) -> Self {
        let id = err.id();
        let message = err.to_string();
        match err {
            RoutingError::UnroutableMode(_) => AppError::BadRequest { id, message },
            RoutingError::NoOriginProjection
            | RoutingError::NoDestinationProjection
            | RoutingError::NoOriginNorDestinationProjection => AppError::NotFound { id, message },
            RoutingError::Internal(_) => AppError::Internal { id, message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, id, message) = match self {
            AppError::BadRequest { id, message } => (StatusCode::BAD_REQUEST, id, message),
            AppError::NotFound { id, message } => (StatusCode::NOT_FOUND, id, message),
            AppError::Internal { id, message } => (StatusCode::INTERNAL_SERVER_ERROR, id, message),
        };

        error!(%status, id, %message, "Request failed");

        let body = Json(ErrorResponse {
            id: id.to_string(),
            message,
        });
        (status, body).into_response()
    }
}
