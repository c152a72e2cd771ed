//! Retrieval of source lists over HTTP(S).
//!
//! [`Fetcher`] is the seam the merge engine depends on; [`CurlFetcher`] is the
//! libcurl-backed implementation used by the CLI. Fetching is blocking; call from
//! `spawn_blocking` if used from async code.

mod curl_fetcher;
mod error;

pub use curl_fetcher::CurlFetcher;
pub use error::FetchError;

/// Retrieves the body of one source.
///
/// Any error means "source unavailable": the merge engine reports it and moves on.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}
