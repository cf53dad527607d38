//! Unified error types for pagesplice.

/// Unified error type shared by the pagesplice crates.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fetch URL could not be parsed.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Transport-level failure while fetching the remote document.
    #[error("FETCH_FAILED: {0}")]
    FetchFailed(String),

    /// The remote server answered with a non-success status.
    #[error("HTTP_STATUS: status {0}")]
    HttpStatus(u16),

    /// Response body exceeds the configured size limit.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// A result accessor was used before a successful fetch.
    #[error("RESULTS_NOT_READY: call fetch_content() before reading {0}")]
    ResultsNotReady(&'static str),
}
