//! Fetch Error Types
//!
//! Every way a request can fail collapses into one error kind, "fetch
//! failed". The variants only carry detail for the diagnostic log; callers
//! handle them identically.

use thiserror::Error;

/// A request against the statistics API did not produce a value
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection, TLS, or body transfer failed
    #[error("fetch failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The origin answered with a non-2xx status
    #[error("fetch failed: {path} returned HTTP {status}")]
    Status { path: String, status: u16 },

    /// The body was not the expected JSON
    #[error("fetch failed: could not decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for API operations
pub type FetchResult<T> = Result<T, FetchError>;
