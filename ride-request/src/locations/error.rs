//! Location loading error types.

use crate::domain::InvalidCoordinate;

/// Errors that can occur while loading a location partition.
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Partition file could not be read
    #[error("failed to read partition {partition}: {source}")]
    Io {
        partition: String,
        #[source]
        source: std::io::Error,
    },

    /// Partition body is not a JSON array of records
    #[error("JSON parse error in partition {partition}: {message}")]
    Json { partition: String, message: String },

    /// A record carries coordinates that do not parse
    #[error("invalid record {name:?} in partition {partition}: {source}")]
    InvalidRecord {
        partition: String,
        name: String,
        #[source]
        source: InvalidCoordinate,
    },
}
