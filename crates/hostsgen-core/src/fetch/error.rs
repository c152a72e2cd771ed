//! Fetch error type.

use thiserror::Error;

/// Why a source could not be used.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Curl reported an error (bad URL, DNS, connect, timeout, ...).
    #[error("{0}")]
    Transport(#[from] curl::Error),
    /// Response code other than 200.
    #[error("HTTP {0}")]
    Status(u32),
    /// Body exceeded the configured size limit; the transfer was aborted.
    #[error("body larger than {limit} bytes")]
    TooLarge { limit: u64 },
}
