//! Error types for talking to the launch catalog.

use thiserror::Error;

/// A failed fetch. The list treats every variant the same way (log it and
/// go idle), the distinction only matters for diagnostics.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode launches from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid catalog url: {0}")]
    Url(#[from] url::ParseError),
    #[error("launch source unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;
