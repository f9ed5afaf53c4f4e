//! API route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::service::{RacingService, ServiceError, SportsService};
use crate::types::{
    ErrorResponse, HealthResponse, ListEventsRequest, ListEventsResponse, ListRacesRequest,
    ListRacesResponse, Race,
};

/// Application state shared across handlers.
pub struct AppState {
    pub racing: RacingService,
    pub sports: SportsService,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(id) => ApiError::not_found(format!("race {} not found", id)),
            ServiceError::Storage(e) => {
                // Store detail goes to the log, not to the caller.
                tracing::error!(error = %e, "storage failure");
                ApiError::internal("internal storage error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// List races, optionally filtered by visibility and sort direction.
pub async fn list_races(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListRacesRequest>,
) -> Result<Json<ListRacesResponse>, ApiError> {
    let races = state.racing.list_races(req.filter.as_ref())?;
    Ok(Json(ListRacesResponse { races }))
}

/// Fetch a single race by id.
pub async fn get_race(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Race>, ApiError> {
    let race = state.racing.get_race(id)?;
    Ok(Json(race))
}

/// List sporting events, optionally restricted to an id set.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ListEventsRequest>,
) -> Result<Json<ListEventsResponse>, ApiError> {
    let events = state.sports.list_events(req.filter.as_ref())?;
    Ok(Json(ListEventsResponse { events }))
}
