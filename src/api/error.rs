use reqwest::StatusCode;
use thiserror::Error;

use super::Method;

/// Failure of a remote call. The console never shows these details; it
/// collapses every variant to a fixed message for the page.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// The body did not match the expected model.
    #[error("invalid response body from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
