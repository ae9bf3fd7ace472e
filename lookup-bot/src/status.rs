//! Shared "is the transport loop running" flag, read by the health endpoint and `/admin`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct BotStatus(Arc<AtomicBool>);

impl BotStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_active(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_active(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// `"active"` once the transport loop runs, `"starting"` before.
    pub fn label(&self) -> &'static str {
        if self.is_active() {
            "active"
        } else {
            "starting"
        }
    }
}
