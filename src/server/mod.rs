//! HTTP server layer for the sensor gateway.
//!
//! This module provides the HTTP API in front of the measurement store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │   POST /sensor    GET /read/{value}/{scale}    DELETE /measures │
//! │                                                                 │
//! │  ┌─────────────┐  ┌──────────────┐  ┌─────────────────────────┐ │
//! │  │  handlers   │  │     auth     │  │        routes           │ │
//! │  │ (requests)  │  │(bearer token)│  │  (router config)        │ │
//! │  └─────────────┘  └──────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod handlers;
pub mod routes;

pub use auth::{bearer_auth, AuthError, BearerAuth};
pub use handlers::{
    create_handler, delete_handler, health_handler, read_handler, AppState,
    CreateMeasurementRequest, ErrorResponse, HandlerError, HealthResponse, MeasurementResponse,
    MeasuresResponse, MessageResponse, ReadPathParams,
};
pub use routes::{create_router, RouterConfig};
