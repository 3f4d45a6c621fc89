//! Assigned-sessions view.

use serde::{Deserialize, Serialize};

use crate::conflicts::{conflict_ids, conflict_ids_in_scope, ConflictScope};
use crate::dates::compare_records;
use crate::models::SessionRecord;

/// Narrowing applied to the assigned-sessions view.
///
/// Values are compared after trimming; a blank value applies no
/// narrowing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssignmentFilter {
    /// Exact circuit match.
    pub circuit: Option<String>,
    /// Exact assignee match.
    pub assignee: Option<String>,
    /// Keep only conflicting sessions.
    ///
    /// With an assignee selected, conflicts are computed within that
    /// assignee's sessions; otherwise across all records.
    pub conflicts_only: bool,
}

impl AssignmentFilter {
    /// No narrowing: every assigned session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrows to one circuit.
    pub fn with_circuit(mut self, circuit: impl Into<String>) -> Self {
        self.circuit = Some(circuit.into());
        self
    }

    /// Narrows to one assignee.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Keeps only conflicting sessions.
    pub fn conflicts_only(mut self) -> Self {
        self.conflicts_only = true;
        self
    }

    fn circuit_key(&self) -> Option<&str> {
        self.circuit.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }

    fn assignee_key(&self) -> Option<&str> {
        self.assignee.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}

/// Sessions with a non-blank assignee, narrowed by `filter`, in
/// canonical date order.
pub fn assigned_sessions<'a>(
    records: &'a [SessionRecord],
    filter: &AssignmentFilter,
) -> Vec<&'a SessionRecord> {
    let circuit = filter.circuit_key();
    let assignee = filter.assignee_key();

    let conflicting = filter.conflicts_only.then(|| match assignee {
        Some(name) => conflict_ids_in_scope(records, &ConflictScope::Assignee(name.to_owned())),
        None => conflict_ids(records),
    });

    let mut list: Vec<&SessionRecord> = records
        .iter()
        .filter(|r| r.is_assigned())
        .filter(|r| circuit.is_none_or(|c| r.circuit_name() == Some(c)))
        .filter(|r| assignee.is_none_or(|a| r.assignee_name() == Some(a)))
        .filter(|r| conflicting.as_ref().is_none_or(|ids| ids.contains(&r.id)))
        .collect();

    list.sort_by(|a, b| compare_records(a, b));
    list
}
