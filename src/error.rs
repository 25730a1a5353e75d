//! Error taxonomy for the listings pipeline.
//!
//! `FetchError` covers everything that can go wrong inside one
//! per-collection task (query building, network call, decoding).
//! `CollectionError` attaches the collection name once the outcome
//! reaches the aggregator. `OutputError` belongs to the file sink.

use std::time::Duration;

use thiserror::Error;

/// Failure of a single collection pipeline.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Options rejected before any request was issued.
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// Connection-level failure (DNS, refused connection, TLS, broken body).
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The whole-request budget elapsed.
    #[error("request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// Any status other than 200 OK.
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// Payload was not a JSON array of listing objects.
    #[error("failed to decode listings: {0}")]
    Decode(#[from] serde_json::Error),

    /// The task terminated without delivering an outcome.
    #[error("task terminated without reporting an outcome")]
    TaskAborted,
}

impl FetchError {
    /// Stable taxonomy name, used in user-facing messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::InvalidOptions(_) => "InvalidOptions",
            FetchError::Transport(_) => "TransportError",
            FetchError::Timeout(_) => "TimeoutError",
            FetchError::Upstream { .. } => "UpstreamError",
            FetchError::Decode(_) => "DecodeError",
            FetchError::TaskAborted => "TaskAborted",
        }
    }
}

/// A `FetchError` tagged with the collection it belongs to.
#[derive(Debug, Error)]
#[error("collection \"{collection}\" failed with {}", .source.kind())]
pub struct CollectionError {
    pub collection: String,
    #[source]
    pub source: FetchError,
}

impl CollectionError {
    pub fn new(collection: impl Into<String>, source: FetchError) -> Self {
        Self {
            collection: collection.into(),
            source,
        }
    }
}

/// Failure while writing the aggregated result to disk.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}
