//! Router configuration for the sensor gateway.
//!
//! This module defines the HTTP routes and applies middleware for
//! authentication, CORS and panic containment.
//!
//! # Route Structure
//!
//! ```text
//! POST   /sensor                - Submit a measurement (write token)
//! GET    /read/{value}/{scale}  - Read measurements in a window (public)
//! DELETE /measures              - Delete all measurements (delete token)
//! GET    /health                - Health check (public)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use sensor_gateway::server::routes::{create_router, RouterConfig};
//! use sensor_gateway::store::MongoStore;
//!
//! // Connect the store
//! let store = MongoStore::connect("mongodb://localhost:27017", "sensors", "measures", None)
//!     .await?;
//!
//! // Configure and create router
//! let config = RouterConfig::new("write-token", "delete-token")
//!     .with_cors_origins(vec!["https://dashboard.example.com".to_string()]);
//!
//! let router = create_router(store, config);
//!
//! // Run the server
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use super::auth::{bearer_auth, BearerAuth};
use super::handlers::{
    create_handler, delete_handler, health_handler, read_handler, AppState, ErrorResponse,
};
use crate::store::MeasurementStore;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Bearer token required on the measurement submission route
    pub write_token: String,

    /// Bearer token required on the bulk deletion route
    pub delete_token: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration with the given tokens.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new(write_token: impl Into<String>, delete_token: impl Into<String>) -> Self {
        Self {
            write_token: write_token.into(),
            delete_token: delete_token.into(),
            cors_origins: None, // Allow any origin by default
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - Public routes (windowed read, health check)
/// - Protected routes (submission and bulk deletion, each behind its own
///   bearer token)
/// - CORS configuration
/// - A panic boundary that maps handler panics onto the JSON error shape
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `store` - The measurement store shared by all handlers
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router<S>(store: S, config: RouterConfig) -> Router
where
    S: MeasurementStore + 'static,
{
    // Create application state
    let app_state = AppState::new(store);

    // One authenticator per protected route, so the write and delete
    // credentials stay independent.
    let write_auth = BearerAuth::new(&config.write_token);
    let delete_auth = BearerAuth::new(&config.delete_token);

    // Build CORS layer
    let cors = build_cors_layer(&config);

    // Submission route (requires the write token)
    let write_routes = Router::new()
        .route("/sensor", post(create_handler::<S>))
        .layer(middleware::from_fn_with_state(write_auth, bearer_auth))
        .with_state(app_state.clone());

    // Bulk deletion route (requires the delete token)
    let delete_routes = Router::new()
        .route("/measures", delete(delete_handler::<S>))
        .layer(middleware::from_fn_with_state(delete_auth, bearer_auth))
        .with_state(app_state.clone());

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/read/{value}/{scale}", get(read_handler::<S>))
        .route("/health", get(health_handler))
        .with_state(app_state);

    // Combine routes; the panic boundary wraps everything, auth included
    let router = Router::new()
        .merge(write_routes)
        .merge(delete_routes)
        .merge(public_routes)
        .layer(cors)
        .layer(CatchPanicLayer::custom(handle_panic));

    // Add tracing if enabled
    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::GET, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

/// Map a handler panic onto the API's JSON error shape.
///
/// The panic payload goes to the log; the client sees the same
/// unexpected-error body as any other uncontracted failure.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!(status = 500, "Handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(format!("Error not expected: {}", details))),
    )
        .into_response()
}

// =============================================================================
// Tests
// =============================================================================
