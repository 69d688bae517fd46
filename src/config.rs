//! Configuration management for the sensor gateway.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `SENSOR_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use sensor_gateway::config::Config;
//!
//! // Parse from command line and environment
//! let config = Config::parse();
//!
//! println!("Listening on {}:{}", config.host, config.port);
//! println!("Collection: {}/{}", config.mongo_database, config.mongo_collection);
//! ```
//!
//! # Environment Variables
//!
//! All options except the logging toggles (`--verbose`, `--no-tracing`) can
//! also be set via environment variables with the `SENSOR_` prefix:
//!
//! - `SENSOR_HOST` - Server bind address (default: 0.0.0.0)
//! - `SENSOR_PORT` - Server port (default: 3000)
//! - `SENSOR_MONGO_URI` - MongoDB connection URI (required)
//! - `SENSOR_MONGO_DATABASE` - Database holding the measurements (required)
//! - `SENSOR_MONGO_COLLECTION` - Collection holding the measurements (required)
//! - `SENSOR_MIN_POOL_SIZE` - Connections the driver keeps warm
//! - `SENSOR_WRITE_TOKEN` - Bearer token for submitting measurements (required)
//! - `SENSOR_DELETE_TOKEN` - Bearer token for bulk deletion (required)
//! - `SENSOR_CORS_ORIGINS` - Allowed CORS origins, comma-separated

use clap::Parser;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Sensor Gateway - an HTTP front door for sensor measurements.
///
/// Accepts measurements over HTTP, persists them to a MongoDB collection, and
/// serves time-windowed reads and bulk deletion.
#[derive(Parser, Debug, Clone)]
#[command(name = "sensor-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "SENSOR_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "SENSOR_PORT")]
    pub port: u16,

    // =========================================================================
    // MongoDB Configuration
    // =========================================================================
    /// MongoDB connection URI (mongodb:// or mongodb+srv://).
    #[arg(long, env = "SENSOR_MONGO_URI")]
    pub mongo_uri: String,

    /// Database holding the measurement collection.
    #[arg(long, env = "SENSOR_MONGO_DATABASE")]
    pub mongo_database: String,

    /// Collection the measurements are written to and read from.
    #[arg(long, env = "SENSOR_MONGO_COLLECTION")]
    pub mongo_collection: String,

    /// Number of connections the driver keeps open per server.
    ///
    /// If not specified, the driver default applies.
    #[arg(long, env = "SENSOR_MIN_POOL_SIZE")]
    pub min_pool_size: Option<u32>,

    // =========================================================================
    // Authentication Configuration
    // =========================================================================
    /// Bearer token required to submit measurements.
    #[arg(long, env = "SENSOR_WRITE_TOKEN")]
    pub write_token: String,

    /// Bearer token required to bulk-delete measurements.
    #[arg(long, env = "SENSOR_DELETE_TOKEN")]
    pub delete_token: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "SENSOR_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        // Connection settings must be present and plausible
        if self.mongo_uri.is_empty() {
            return Err("MongoDB URI is required. Set --mongo-uri or SENSOR_MONGO_URI".to_string());
        }
        if !self.mongo_uri.starts_with("mongodb://") && !self.mongo_uri.starts_with("mongodb+srv://")
        {
            return Err(format!(
                "MongoDB URI must start with mongodb:// or mongodb+srv://, got '{}'",
                self.mongo_uri
            ));
        }
        if self.mongo_database.is_empty() {
            return Err(
                "Database name is required. Set --mongo-database or SENSOR_MONGO_DATABASE"
                    .to_string(),
            );
        }
        if self.mongo_collection.is_empty() {
            return Err(
                "Collection name is required. Set --mongo-collection or SENSOR_MONGO_COLLECTION"
                    .to_string(),
            );
        }

        // Both tokens must be set; an empty token would accept "Bearer "
        if self.write_token.is_empty() {
            return Err(
                "Write token is required. Set --write-token or SENSOR_WRITE_TOKEN".to_string(),
            );
        }
        if self.delete_token.is_empty() {
            return Err(
                "Delete token is required. Set --delete-token or SENSOR_DELETE_TOKEN".to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
