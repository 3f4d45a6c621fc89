//! Per-date summary model.

use serde::{Deserialize, Serialize};

/// Aggregate counts for one calendar date.
///
/// `conflict_count` is computed within the date's own records only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSummary {
    /// Canonical `DD-MM-YYYY` date.
    pub date: String,
    /// Number of sessions on this date.
    pub total_count: usize,
    /// Number of sessions sharing their time slot with another session.
    pub conflict_count: usize,
    /// Number of distinct non-blank assignees on this date.
    pub distinct_assignee_count: usize,
}

impl DateSummary {
    /// Whether any session on this date is double-booked.
    #[inline]
    pub fn has_conflicts(&self) -> bool {
        self.conflict_count > 0
    }
}
