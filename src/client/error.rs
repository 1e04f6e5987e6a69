use thiserror::Error;

/// Failures talking to the counter API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// Connection, DNS, or timeout failure.
    #[error("Request to counter API failed: {0}")]
    Network(#[source] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("Counter API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("Unexpected response from counter API: {0}")]
    Decode(#[source] reqwest::Error),
}
