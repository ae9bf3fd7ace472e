//! Session State Machine: per-caller pending lookup mode and the engine that drives lookups.

mod engine;
mod error;

pub use engine::SessionEngine;
pub use error::FlowError;

/// Which lookup, if any, the caller's next text message answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PendingMode {
    #[default]
    Idle,
    AwaitingIdentityQuery,
    AwaitingUniversalQuery,
}

impl PendingMode {
    pub fn label(&self) -> &'static str {
        match self {
            PendingMode::Idle => "idle",
            PendingMode::AwaitingIdentityQuery => "identity",
            PendingMode::AwaitingUniversalQuery => "universal",
        }
    }
}

/// Ephemeral state of one caller. Owned by that caller's queue task; never shared.
#[derive(Debug, Default)]
pub struct Session {
    pending: PendingMode,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> PendingMode {
        self.pending
    }

    /// Sets the pending mode, replacing any previous one.
    pub fn arm(&mut self, mode: PendingMode) {
        self.pending = mode;
    }

    /// Returns the pending mode and resets to [`PendingMode::Idle`].
    pub fn take(&mut self) -> PendingMode {
        std::mem::take(&mut self.pending)
    }

    /// Discards any pending mode.
    pub fn reset(&mut self) {
        self.pending = PendingMode::Idle;
    }
}
