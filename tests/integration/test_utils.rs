//! Test utilities for integration tests.
//!
//! This module provides an in-memory measurement store with call tracking and
//! failure injection, plus router and fixture helpers shared by the suites.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use axum::Router;
use sensor_gateway::error::StoreError;
use sensor_gateway::server::{create_router, RouterConfig};
use sensor_gateway::store::{Measurement, MeasurementStore, MAX_READ_RESULTS};

/// Bearer token accepted on the submission route in tests.
pub const TEST_WRITE_TOKEN: &str = "test-write-token";

/// Bearer token accepted on the deletion route in tests.
pub const TEST_DELETE_TOKEN: &str = "test-delete-token";

// =============================================================================
// In-Memory Measurement Store with Call Tracking
// =============================================================================

/// An in-memory measurement store that tracks calls and can inject failures.
///
/// This is useful for verifying handler behavior without a database. Clones
/// share the underlying data and counters, mirroring how the router shares
/// one store across requests.
pub struct MemoryStore {
    measurements: Arc<RwLock<Vec<Measurement>>>,
    save_calls: Arc<AtomicUsize>,
    read_calls: Arc<AtomicUsize>,
    delete_calls: Arc<AtomicUsize>,
    fail_saves: bool,
    fail_reads: bool,
    fail_deletes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_measurements(Vec::new())
    }

    /// Create a store pre-populated with measurements.
    pub fn with_measurements(measurements: Vec<Measurement>) -> Self {
        Self {
            measurements: Arc::new(RwLock::new(measurements)),
            save_calls: Arc::new(AtomicUsize::new(0)),
            read_calls: Arc::new(AtomicUsize::new(0)),
            delete_calls: Arc::new(AtomicUsize::new(0)),
            fail_saves: false,
            fail_reads: false,
            fail_deletes: false,
        }
    }

    /// Make every save fail with a write error.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Make every read fail with a query error.
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Make every delete fail with a delete error.
    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    /// Snapshot of everything currently stored.
    pub async fn stored(&self) -> Vec<Measurement> {
        self.measurements.read().await.clone()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            measurements: Arc::clone(&self.measurements),
            save_calls: Arc::clone(&self.save_calls),
            read_calls: Arc::clone(&self.read_calls),
            delete_calls: Arc::clone(&self.delete_calls),
            fail_saves: self.fail_saves,
            fail_reads: self.fail_reads,
            fail_deletes: self.fail_deletes,
        }
    }
}

#[async_trait]
impl MeasurementStore for MemoryStore {
    async fn save(&self, value: &str) -> Result<(), StoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_saves {
            return Err(StoreError::Write("injected write failure".to_string()));
        }

        self.measurements.write().await.push(Measurement::now(value));
        Ok(())
    }

    async fn read_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Measurement>, StoreError> {
        self.read_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_reads {
            return Err(StoreError::Query("injected query failure".to_string()));
        }

        // Same contract as the MongoDB backend: insertion order, capped,
        // no sort.
        let measurements = self
            .measurements
            .read()
            .await
            .iter()
            .filter(|m| m.date >= cutoff)
            .take(MAX_READ_RESULTS as usize)
            .cloned()
            .collect();

        Ok(measurements)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_deletes {
            return Err(StoreError::Delete("injected delete failure".to_string()));
        }

        let mut measurements = self.measurements.write().await;
        let deleted = measurements.len() as u64;
        measurements.clear();
        Ok(deleted)
    }
}

// =============================================================================
// Fixture Helpers
// =============================================================================

/// Build a router over the given store with the standard test tokens.
pub fn test_router(store: MemoryStore) -> Router {
    create_router(
        store,
        RouterConfig::new(TEST_WRITE_TOKEN, TEST_DELETE_TOKEN),
    )
}

/// A measurement stamped `seconds_ago` seconds before now.
pub fn measurement_seconds_ago(value: &str, seconds_ago: i64) -> Measurement {
    Measurement {
        value: value.to_string(),
        date: Utc::now() - Duration::seconds(seconds_ago),
    }
}
