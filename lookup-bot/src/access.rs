//! Access Guard: static allow-list membership.

use std::collections::HashSet;

/// Read-only set of permitted caller ids. Built once from config and shared via `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AccessGuard {
    allowed: HashSet<i64>,
}

impl AccessGuard {
    pub fn new(ids: impl IntoIterator<Item = i64>) -> Self {
        Self {
            allowed: ids.into_iter().collect(),
        }
    }

    /// True iff `user_id` is in the allow-list.
    pub fn is_authorized(&self, user_id: i64) -> bool {
        self.allowed.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    /// Allowed ids in ascending order (for listing).
    pub fn ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.allowed.iter().copied().collect();
        ids.sort_unstable();
        ids
    }
}
