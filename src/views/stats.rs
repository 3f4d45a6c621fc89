//! Office-wide workload indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total sessions | Records in the store |
//! | Distinct dates | Dates with at least one session |
//! | Conflicting sessions | Size of the global conflict set |
//! | Assigned / unassigned | Records with / without a non-blank assignee |
//! | Sessions by assignee | Count per trimmed assignee name |

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::conflicts::conflict_ids;
use crate::models::SessionRecord;

/// Aggregate workload figures for the whole record set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OfficeStats {
    pub total_sessions: usize,
    pub distinct_dates: usize,
    pub conflicting_sessions: usize,
    pub assigned_sessions: usize,
    pub unassigned_sessions: usize,
    /// `(assignee, session count)` sorted by name.
    pub sessions_by_assignee: Vec<(String, usize)>,
}

impl OfficeStats {
    /// Computes the figures from the current record set.
    pub fn calculate(records: &[SessionRecord]) -> Self {
        let dates: HashSet<&str> = records.iter().map(|r| r.date.as_str()).collect();

        let mut by_assignee: BTreeMap<&str, usize> = BTreeMap::new();
        for name in records.iter().filter_map(SessionRecord::assignee_name) {
            *by_assignee.entry(name).or_insert(0) += 1;
        }
        let assigned: usize = by_assignee.values().sum();

        Self {
            total_sessions: records.len(),
            distinct_dates: dates.len(),
            conflicting_sessions: conflict_ids(records).len(),
            assigned_sessions: assigned,
            unassigned_sessions: records.len() - assigned,
            sessions_by_assignee: by_assignee
                .into_iter()
                .map(|(name, count)| (name.to_owned(), count))
                .collect(),
        }
    }

    /// Fraction of sessions that are double-booked (0.0..1.0).
    pub fn conflict_rate(&self) -> f64 {
        if self.total_sessions == 0 {
            0.0
        } else {
            self.conflicting_sessions as f64 / self.total_sessions as f64
        }
    }

    /// Fraction of sessions with an assignee (0.0..1.0).
    pub fn coverage_rate(&self) -> f64 {
        if self.total_sessions == 0 {
            1.0
        } else {
            self.assigned_sessions as f64 / self.total_sessions as f64
        }
    }
}
