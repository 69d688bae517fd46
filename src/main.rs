//! Sensor Gateway - an HTTP front door for sensor measurements.
//!
//! This binary starts the HTTP server and wires the MongoDB-backed store
//! into the router.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sensor_gateway::{
    config::Config,
    server::{create_router, RouterConfig},
    store::MongoStore,
};

#[tokio::main]
async fn main() -> ExitCode {
    let config = Config::parse();

    // Initialize logging
    init_logging(config.verbose);

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    // Print startup banner and info
    print_banner();

    info!("Configuration:");
    info!("  Database: {}", config.mongo_database);
    info!("  Collection: {}", config.mongo_collection);
    if let Some(min_pool_size) = config.min_pool_size {
        info!("  Min pool size: {}", min_pool_size);
    }
    match &config.cors_origins {
        Some(origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    // One client for the whole process; every request borrows from its pool.
    let store = match MongoStore::connect(
        &config.mongo_uri,
        &config.mongo_database,
        &config.mongo_collection,
        config.min_pool_size,
    )
    .await
    {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to configure MongoDB client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Test MongoDB connectivity. A failed ping is not fatal: requests report
    // storage errors individually and the database may come up later.
    info!("");
    info!("Connecting to MongoDB...");
    match store.ping().await {
        Ok(()) => {
            info!("  Connected successfully");
        }
        Err(e) => {
            warn!("  Could not reach MongoDB: {}", e);
            warn!("  Starting anyway; requests will fail until the database is reachable");
        }
    }

    // Build router configuration
    let router_config = build_router_config(&config);

    // Create router
    let router = create_router(store, router_config);

    // Bind and serve
    let addr = config.bind_address();

    info!("");
    info!("────────────────────────────────────────────────────────────────");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl http://{}/read/2/hours", addr);
    info!("");
    info!("  Submit a measurement:");
    info!("    curl -X POST http://{}/sensor \\", addr);
    info!("      -H 'Authorization: Bearer <write-token>' \\");
    info!("      -H 'Content-Type: application/json' \\");
    info!("      -d '{{\"measure\": \"23.5\"}}'");
    info!("────────────────────────────────────────────────────────────────");
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Print the startup banner.
fn print_banner() {
    info!("");
    info!("Sensor Gateway v{}", env!("CARGO_PKG_VERSION"));
    info!("");
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "sensor_gateway=debug,tower_http=debug"
    } else {
        "sensor_gateway=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build RouterConfig from the application Config.
fn build_router_config(config: &Config) -> RouterConfig {
    let mut router_config = RouterConfig::new(&config.write_token, &config.delete_token);

    // Apply CORS origins
    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    // Apply tracing setting
    router_config = router_config.with_tracing(!config.no_tracing);

    router_config
}
