use async_trait::async_trait;
use bson::doc;
use chrono::{DateTime, Utc};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use super::{Measurement, MeasurementStore, MAX_READ_RESULTS};
use crate::error::StoreError;

/// MongoDB-backed implementation of MeasurementStore.
///
/// Holds one driver client for the lifetime of the process; the driver pools
/// connections internally and every operation acquires and releases a pooled
/// connection on its own, including error paths. Cloning is cheap and shares
/// the pool.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    database: String,
    collection: String,
}

impl MongoStore {
    /// Connect to MongoDB and target `database`/`collection`.
    ///
    /// `min_pool_size` optionally keeps that many connections warm; leave it
    /// `None` to accept the driver default. The URI is parsed eagerly, so a
    /// malformed URI fails here rather than on the first request.
    pub async fn connect(
        uri: &str,
        database: impl Into<String>,
        collection: impl Into<String>,
        min_pool_size: Option<u32>,
    ) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        if min_pool_size.is_some() {
            options.min_pool_size = min_pool_size;
        }

        let client =
            Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;

        Ok(Self {
            client,
            database: database.into(),
            collection: collection.into(),
        })
    }

    /// Get the database name.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Get the collection name.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Round-trip a ping command to verify the deployment is reachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }

    fn measurements(&self) -> Collection<Measurement> {
        self.client
            .database(&self.database)
            .collection(&self.collection)
    }
}

#[async_trait]
impl MeasurementStore for MongoStore {
    async fn save(&self, value: &str) -> Result<(), StoreError> {
        self.measurements()
            .insert_one(Measurement::now(value))
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        Ok(())
    }

    async fn read_since(&self, cutoff: DateTime<Utc>) -> Result<Vec<Measurement>, StoreError> {
        let filter = doc! { "date": { "$gte": bson::DateTime::from_chrono(cutoff) } };

        // Capped and unsorted: the first MAX_READ_RESULTS matching documents
        // in natural order win. The projection keeps `_id` out of results.
        let mut cursor = self
            .measurements()
            .find(filter)
            .projection(doc! { "_id": 0 })
            .limit(MAX_READ_RESULTS)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        let mut measurements = Vec::new();
        while cursor
            .advance()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
        {
            let measurement = cursor
                .deserialize_current()
                .map_err(|e| StoreError::Query(e.to_string()))?;
            measurements.push(measurement);
        }

        Ok(measurements)
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = self
            .measurements()
            .delete_many(doc! {})
            .await
            .map_err(|e| StoreError::Delete(e.to_string()))?;
        Ok(result.deleted_count)
    }
}
