//! Upstream lookup failures.

use thiserror::Error;

/// Why an identity lookup produced no payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Rejected before any network call (identity input must be all ASCII digits).
    #[error("Invalid input.")]
    InvalidInput,

    #[error("Request timed out")]
    Timeout,

    /// Any status other than 200.
    #[error("API Error: {0}")]
    Status(u16),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for LookupError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LookupError::Timeout
        } else if e.is_decode() {
            LookupError::Decode(e.to_string())
        } else {
            LookupError::Transport(e.to_string())
        }
    }
}
