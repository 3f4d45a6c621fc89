//! Memoization of derived views.
//!
//! Each view is cached under the store revision plus whatever selection
//! it depends on. The cache is never authoritative: a key mismatch simply
//! recomputes from the current records.

use tracing::debug;

use crate::conflicts::ConflictSet;
use crate::models::{DateSummary, SessionRecord};
use crate::views::{AssignmentFilter, OfficeStats};

/// Single-entry cache keyed by `K`.
#[derive(Debug, Clone)]
pub struct Memo<K, V> {
    entry: Option<(K, V)>,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self { entry: None }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    /// Returns the cached value for `key`, computing it on a miss.
    pub fn get_or_compute(&mut self, key: K, compute: impl FnOnce() -> V) -> &V {
        if self.entry.as_ref().is_some_and(|(cached, _)| *cached != key) {
            self.entry = None;
        }
        let (_, value) = self.entry.get_or_insert_with(|| (key, compute()));
        value
    }
}

/// Cached views held by the board.
///
/// Keys start with the store revision, so any store mutation invalidates
/// every view at once.
#[derive(Debug, Default)]
pub(crate) struct ViewCache {
    pub(crate) date_summaries: Memo<u64, Vec<DateSummary>>,
    pub(crate) global_conflicts: Memo<u64, ConflictSet>,
    pub(crate) conflict_list: Memo<u64, Vec<SessionRecord>>,
    pub(crate) date_conflicts: Memo<(u64, String), ConflictSet>,
    pub(crate) assignee_conflicts: Memo<(u64, String), ConflictSet>,
    pub(crate) day_sessions: Memo<(u64, String, bool), Vec<SessionRecord>>,
    pub(crate) assigned_sessions: Memo<(u64, AssignmentFilter), Vec<SessionRecord>>,
    pub(crate) circuits: Memo<u64, Vec<String>>,
    pub(crate) assignees: Memo<u64, Vec<String>>,
    pub(crate) stats: Memo<u64, OfficeStats>,
}

/// Logs a cache miss for `view` at `revision`.
pub(crate) fn trace_recompute(view: &'static str, revision: u64) {
    debug!(view, revision, "recomputing view");
}
