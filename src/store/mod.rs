//! Measurement storage layer.
//!
//! This module provides the seam between the HTTP handlers and the document
//! store, so handlers can be exercised against an in-memory implementation:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            Request Handlers             │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │         MeasurementStore Trait          │
//! │   (save / read_since / delete_all)      │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │               MongoStore                │
//! │  (one pooled client for the process)    │
//! └─────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

mod mongo;

pub use mongo::MongoStore;

/// Maximum number of documents a single read returns.
///
/// Reads are capped, not paginated, and no sort order is applied: whichever
/// documents the server yields first are returned.
pub const MAX_READ_RESULTS: i64 = 100;

/// A single sensor measurement as persisted in the document store.
///
/// `value` is stored exactly as submitted; `date` is assigned by the server at
/// receipt time and is never client-controlled. The document is persisted as
/// `{value, date}` with `date` as a native BSON datetime; the store-assigned
/// `_id` never leaves the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub value: String,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub date: DateTime<Utc>,
}

impl Measurement {
    /// Create a measurement stamped with the current server time.
    pub fn now(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            date: Utc::now(),
        }
    }
}

/// Trait for persisting and querying sensor measurements.
///
/// Implementations must be thread-safe; the router shares one instance across
/// all in-flight requests.
#[async_trait]
pub trait MeasurementStore: Send + Sync {
    /// Persist one measurement, stamping it with the current server time.
    async fn save(&self, value: &str) -> Result<(), StoreError>;

    /// Fetch measurements with `date >= cutoff`, at most `MAX_READ_RESULTS`
    /// of them, in whatever order the store yields them.
    async fn read_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Measurement>, StoreError>;

    /// Delete every measurement. Returns the number of deleted documents.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
