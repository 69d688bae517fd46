//! # Sensor Gateway
//!
//! A minimal HTTP gateway for sensor measurements backed by MongoDB.
//!
//! This library provides the request layer for accepting sensor readings over
//! HTTP, persisting them to a MongoDB collection, and serving time-windowed
//! reads and bulk deletion. It is deliberately thin: handlers validate,
//! delegate to the store, and translate the outcome into a small fixed set of
//! JSON responses.
//!
//! ## Features
//!
//! - **Windowed reads**: "the last N hours/mins/secs" is translated
//!   server-side into an absolute cutoff and pushed down to the database
//! - **Per-route bearer tokens**: submission and deletion use separate
//!   credentials, compared in constant time
//! - **Trait-seam storage**: handlers depend on [`MeasurementStore`], so the
//!   HTTP surface tests against an in-memory store
//! - **Shared connection pool**: one MongoDB client serves the whole process
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`store`] - Measurement document type, store seam and MongoDB backend
//! - [`window`] - Lookback window parsing and cutoff translation
//! - [`server`] - Axum-based HTTP server, bearer auth and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Store and window error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use sensor_gateway::server::{create_router, RouterConfig};
//! use sensor_gateway::store::MongoStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Configuration is typically loaded from CLI arguments
//!     let store = MongoStore::connect(
//!         "mongodb://localhost:27017",
//!         "sensors",
//!         "measures",
//!         None,
//!     )
//!     .await?;
//!
//!     let config = RouterConfig::new("write-token", "delete-token");
//!     let router = create_router(store, config);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod server;
pub mod store;
pub mod window;

// Re-export commonly used types
pub use config::Config;
pub use error::{StoreError, WindowError};
pub use server::{
    bearer_auth, create_handler, create_router, delete_handler, health_handler, read_handler,
    AppState, AuthError, BearerAuth, CreateMeasurementRequest, ErrorResponse, HandlerError,
    HealthResponse, MeasurementResponse, MeasuresResponse, MessageResponse, ReadPathParams,
    RouterConfig,
};
pub use store::{Measurement, MeasurementStore, MongoStore, MAX_READ_RESULTS};
pub use window::{TimeScale, TimeWindow};
