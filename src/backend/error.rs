//! Console API error types.

/// Errors that can occur while talking to the Console API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure from the HTTP client
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("Console API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape
    #[error("Failed to decode Console API response: {0}")]
    Decode(String),

    /// Generic API error
    #[error("{0}")]
    #[allow(dead_code)]
    Other(String),
}
