//! Bearer token authentication for the sensor gateway.
//!
//! Mutating routes are gated by static bearer tokens: one token authorizes
//! measurement submission, a separate token authorizes bulk deletion. Tokens
//! are loaded from configuration at startup and never change for the lifetime
//! of the process.
//!
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # Security Properties
//!
//! - **Least privilege**: the write token cannot delete and the delete token
//!   cannot write; each route checks only its own token
//! - **Constant-time comparison**: token verification uses constant-time
//!   comparison to prevent timing attacks
//!
//! # Example
//!
//! ```rust
//! use sensor_gateway::server::auth::BearerAuth;
//!
//! let auth = BearerAuth::new("my-secret-token");
//!
//! assert!(auth.verify("my-secret-token").is_ok());
//! assert!(auth.verify("other-token").is_err());
//! ```

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use super::handlers::ErrorResponse;

// =============================================================================
// Types
// =============================================================================

/// Authentication error types.
#[derive(Debug, Clone)]
pub enum AuthError {
    /// No Authorization header on the request
    MissingHeader,

    /// Authorization header is not of the form `Bearer <token>`
    MalformedHeader,

    /// Presented token does not match the expected token
    InvalidToken,
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingHeader => write!(f, "Missing authorization header"),
            AuthError::MalformedHeader => write!(f, "Malformed authorization header"),
            AuthError::InvalidToken => write!(f, "Invalid token"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (error_type, message) = match &self {
            AuthError::MissingHeader => ("missing_header", self.to_string()),
            AuthError::MalformedHeader => ("malformed_header", self.to_string()),
            AuthError::InvalidToken => ("invalid_token", self.to_string()),
        };
        let status = StatusCode::UNAUTHORIZED;

        // Wrong tokens get warn; missing or malformed headers are routine
        // (health probes, curl typos) and only get debug.
        match &self {
            AuthError::InvalidToken => {
                warn!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Authentication failed: {}",
                    message
                );
            }
            _ => {
                debug!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Authentication failed: {}",
                    message
                );
            }
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// =============================================================================
// Bearer Token Authentication
// =============================================================================

/// Bearer token authenticator.
///
/// Holds one expected token; the router attaches one instance per protected
/// route group, so write and delete credentials stay independent.
#[derive(Clone)]
pub struct BearerAuth {
    /// Expected token bytes
    token: Vec<u8>,
}

impl BearerAuth {
    /// Create a new authenticator expecting the given token.
    pub fn new(token: impl AsRef<[u8]>) -> Self {
        Self {
            token: token.as_ref().to_vec(),
        }
    }

    /// Verify a presented token against the expected one.
    ///
    /// Comparison is constant-time, including for tokens of the wrong length.
    pub fn verify(&self, presented: &str) -> Result<(), AuthError> {
        if presented.as_bytes().ct_eq(&self.token).into() {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}

// =============================================================================
// Axum Middleware
// =============================================================================

/// Axum middleware for verifying bearer tokens.
///
/// Extracts the `Authorization: Bearer <token>` header, verifies the token
/// against the route's expected token, and rejects unauthorized requests with
/// a 401 status code before any handler logic runs.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, middleware, routing::post};
/// use sensor_gateway::server::auth::{BearerAuth, bearer_auth};
///
/// let auth = BearerAuth::new("write-token");
/// let app = Router::new()
///     .route("/sensor", post(create_handler))
///     .layer(middleware::from_fn_with_state(auth, bearer_auth));
/// ```
pub async fn bearer_auth(
    State(auth): State<BearerAuth>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingHeader)?;

    let token = header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AuthError::MalformedHeader)?;

    auth.verify(token)?;

    // Continue to the handler
    Ok(next.run(request).await)
}

// =============================================================================
// Tests
// =============================================================================
