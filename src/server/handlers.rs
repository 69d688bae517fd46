//! HTTP request handlers for the sensor measurement API.
//!
//! This module contains the Axum handlers for submitting, reading, and
//! deleting measurements, plus the health check.
//!
//! # Endpoints
//!
//! - `POST /sensor` - Submit a measurement (write token required)
//! - `GET /read/{value}/{scale}` - Read measurements from a lookback window
//! - `DELETE /measures` - Delete all measurements (delete token required)
//! - `GET /health` - Health check endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{StoreError, WindowError};
use crate::store::{Measurement, MeasurementStore};
use crate::window::TimeWindow;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the measurement store.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: MeasurementStore> {
    /// The store all handlers persist to and read from
    pub store: Arc<S>,
}

impl<S: MeasurementStore> AppState<S> {
    /// Create a new application state wrapping the given store.
    pub fn new(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

impl<S: MeasurementStore> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Request body for measurement submission.
///
/// Unknown extra fields are tolerated; only `measure` matters.
#[derive(Debug, Deserialize)]
pub struct CreateMeasurementRequest {
    /// The measured value, persisted exactly as submitted
    pub measure: String,
}

/// Path parameters for read requests.
///
/// Extracted from: `/read/{value}/{scale}`. Both segments are captured as raw
/// strings and validated here, so the error body stays under our control
/// instead of falling through to axum's path rejection.
#[derive(Debug, Deserialize)]
pub struct ReadPathParams {
    /// How many scale units to look back (must be a positive integer)
    pub value: String,

    /// Time unit: "hours", "mins" or "secs"
    pub scale: String,
}

impl ReadPathParams {
    /// Parse the lookback window from the raw segments.
    ///
    /// The value is checked before the scale, so a request that gets both
    /// wrong reports the invalid value.
    pub fn window(&self) -> Result<TimeWindow, WindowError> {
        TimeWindow::from_parts(&self.value, &self.scale)
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON confirmation returned by the create and delete endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable confirmation message
    pub message: String,
}

impl MessageResponse {
    /// Create a new confirmation response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A single measurement as returned to clients.
///
/// Dates serialize as RFC 3339 strings. The storage-assigned identifier
/// never appears here.
#[derive(Debug, Serialize)]
pub struct MeasurementResponse {
    /// The value exactly as it was submitted
    pub value: String,

    /// Server-assigned receipt time
    pub date: DateTime<Utc>,
}

impl From<Measurement> for MeasurementResponse {
    fn from(measurement: Measurement) -> Self {
        Self {
            value: measurement.value,
            date: measurement.date,
        }
    }
}

/// Response from the read endpoint.
#[derive(Debug, Serialize)]
pub struct MeasuresResponse {
    /// Measurements inside the requested window, at most
    /// [`MAX_READ_RESULTS`](crate::store::MAX_READ_RESULTS) of them
    pub measures: Vec<MeasurementResponse>,
}

impl From<Vec<Measurement>> for MeasuresResponse {
    fn from(measurements: Vec<Measurement>) -> Self {
        Self {
            measures: measurements.into_iter().map(Into::into).collect(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors a handler can produce, carrying the status and message contract of
/// the API.
///
/// The response body is always `{"message": "..."}`. Storage detail never
/// reaches the client on the create and delete paths; it goes to the log.
#[derive(Debug)]
pub enum HandlerError {
    /// Request body was not JSON carrying a `measure` field
    InvalidJson,

    /// Window value is missing, non-numeric, non-positive or out of range
    InvalidWindow,

    /// Window scale is not one of the supported units
    UnknownScale,

    /// The store rejected the measurement insert
    SaveFailed(StoreError),

    /// The store rejected the bulk delete
    DeleteFailed(StoreError),

    /// Any failure the contract has no dedicated answer for
    Unexpected(String),
}

impl From<WindowError> for HandlerError {
    fn from(err: WindowError) -> Self {
        match err {
            WindowError::InvalidValue(_) | WindowError::OutOfRange { .. } => {
                HandlerError::InvalidWindow
            }
            WindowError::UnknownScale(_) => HandlerError::UnknownScale,
        }
    }
}

/// Convert HandlerError to HTTP response.
///
/// This implementation logs errors appropriately based on their severity:
/// - 4xx errors are logged at WARN level (client errors)
/// - 5xx errors are logged at ERROR level (server errors)
impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        // Underlying storage detail is logged but kept out of the body.
        let detail = match &self {
            HandlerError::SaveFailed(err) | HandlerError::DeleteFailed(err) => {
                Some(err.to_string())
            }
            _ => None,
        };

        let (status, error_type, message) = match &self {
            // 400 Bad Request - Invalid input
            HandlerError::InvalidJson => (
                StatusCode::BAD_REQUEST,
                "invalid_json",
                "Please send a valid JSON".to_string(),
            ),

            HandlerError::InvalidWindow => (
                StatusCode::BAD_REQUEST,
                "invalid_window",
                "Please send a valid value and scale".to_string(),
            ),

            HandlerError::UnknownScale => (
                StatusCode::BAD_REQUEST,
                "unknown_scale",
                "Not implemented".to_string(),
            ),

            // 500 Internal Server Error - Storage failures
            HandlerError::SaveFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "save_failed",
                "Failed to save".to_string(),
            ),

            HandlerError::DeleteFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "delete_failed",
                "Failed to delete".to_string(),
            ),

            HandlerError::Unexpected(description) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "unexpected",
                format!("Error not expected: {}", description),
            ),
        };

        // Log errors based on severity
        if status.is_server_error() {
            error!(
                error_type = error_type,
                status = status.as_u16(),
                detail = detail.as_deref(),
                "Server error: {}",
                message
            );
        } else {
            warn!(
                error_type = error_type,
                status = status.as_u16(),
                "Client error: {}",
                message
            );
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle measurement submission.
///
/// # Endpoint
///
/// `POST /sensor`
///
/// Requires the write bearer token; the auth middleware rejects requests
/// before this handler runs.
///
/// # Request Body
///
/// ```json
/// {"measure": "23.5"}
/// ```
///
/// # Response
///
/// - `202 Accepted`: `{"message": "Saved: 23.5"}`
/// - `400 Bad Request`: body is not JSON carrying a `measure` field
/// - `500 Internal Server Error`: the store rejected the insert
///
/// The receipt timestamp is assigned by the store at save time; clients
/// cannot supply it.
pub async fn create_handler<S: MeasurementStore>(
    State(state): State<AppState<S>>,
    body: Result<Json<CreateMeasurementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), HandlerError> {
    // Every rejection flavor (wrong content type, syntax error, missing or
    // mistyped field) collapses into the same 400 body.
    let Json(request) = body.map_err(|_| HandlerError::InvalidJson)?;

    state
        .store
        .save(&request.measure)
        .await
        .map_err(HandlerError::SaveFailed)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse::new(format!("Saved: {}", request.measure))),
    ))
}

/// Handle windowed measurement reads.
///
/// # Endpoint
///
/// `GET /read/{value}/{scale}`
///
/// # Path Parameters
///
/// - `value`: positive integer number of units to look back
/// - `scale`: one of `hours`, `mins`, `secs`
///
/// # Response
///
/// - `200 OK`: `{"measures": [{"value": "23.5", "date": "<RFC 3339>"}]}`,
///   possibly empty, at most 100 entries
/// - `400 Bad Request`: non-positive or non-numeric value, or unknown scale
/// - `500 Internal Server Error`: the query failed
pub async fn read_handler<S: MeasurementStore>(
    State(state): State<AppState<S>>,
    Path(params): Path<ReadPathParams>,
) -> Result<Json<MeasuresResponse>, HandlerError> {
    let window = params.window()?;
    let cutoff = window.cutoff()?;

    let measurements = state
        .store
        .read_since(cutoff)
        .await
        .map_err(|e| HandlerError::Unexpected(e.to_string()))?;

    Ok(Json(MeasuresResponse::from(measurements)))
}

/// Handle bulk deletion of all measurements.
///
/// # Endpoint
///
/// `DELETE /measures`
///
/// Requires the delete bearer token; the auth middleware rejects requests
/// before this handler runs.
///
/// # Response
///
/// - `200 OK`: `{"message": "Deleted"}`
/// - `500 Internal Server Error`: the store rejected the delete
pub async fn delete_handler<S: MeasurementStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let deleted = state
        .store
        .delete_all()
        .await
        .map_err(HandlerError::DeleteFailed)?;

    // The count stays out of the response body; the contract is a bare
    // confirmation.
    info!(deleted = deleted, "Deleted all measurements");

    Ok(Json(MessageResponse::new("Deleted")))
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "ok",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
