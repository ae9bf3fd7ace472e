//! Recoverable failures inside a lookup flow.

use dbot_core::DbotError;
use lookup_client::LookupError;
use thiserror::Error;

/// Everything that can go wrong between "processing" and the final reply. Each variant maps to
/// a fixed reply template; none of them ends the caller's queue.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("upstream lookup failed: {0}")]
    Upstream(#[from] LookupError),

    #[error("report file error: {0}")]
    Report(#[from] std::io::Error),

    #[error("transport error: {0}")]
    Transport(#[from] DbotError),
}
