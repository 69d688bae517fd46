use thiserror::Error;

/// Errors that can occur when talking to the document store
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Could not reach the database or acquire a connection
    #[error("Connection error: {0}")]
    Connection(String),

    /// Insert of a measurement document failed
    #[error("Write error: {0}")]
    Write(String),

    /// Query for measurements failed
    #[error("Query error: {0}")]
    Query(String),

    /// Bulk delete failed
    #[error("Delete error: {0}")]
    Delete(String),
}

/// Errors related to translating a value/scale pair into a time window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Value is missing, non-numeric, or not a positive integer
    #[error("Invalid window value: {0}")]
    InvalidValue(String),

    /// Scale is not one of the supported units (should map to HTTP 400 "Not implemented")
    #[error("Unknown time scale: {0}")]
    UnknownScale(String),

    /// Window does not fit in the representable time range
    #[error("Window out of range: {value} {scale}")]
    OutOfRange { value: i64, scale: &'static str },
}
