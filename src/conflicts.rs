//! Double-booking detection.
//!
//! A conflict is two or more records sharing both date and time slot.
//! Membership is a pure function of the records in scope; nothing is
//! cached here.
//!
//! # Scopes
//! The global, per-date and per-assignee conflict sets are each computed
//! from their own record subset. A narrower set is never obtained by
//! filtering a broader one: a session can collide with a colleague's
//! session office-wide while being alone within its own assignee's
//! workload.

use std::collections::BTreeSet;

use crate::grouping::{group_by_date, group_by_time_slot};
use crate::models::{SessionId, SessionRecord};

/// Set of conflicting session ids.
pub type ConflictSet = BTreeSet<SessionId>;

/// Record subset over which conflicts are detected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConflictScope {
    /// All records.
    Global,
    /// Records whose date equals the given string exactly.
    Date(String),
    /// Records whose trimmed assignee equals the given name (trimmed).
    Assignee(String),
}

impl ConflictScope {
    /// Whether a record belongs to this scope.
    pub fn contains(&self, record: &SessionRecord) -> bool {
        match self {
            Self::Global => true,
            Self::Date(date) => record.date == *date,
            Self::Assignee(name) => record.assignee_name() == Some(name.trim()),
        }
    }
}

/// One double-booked `(date, time_slot)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictGroup {
    /// Shared date.
    pub date: String,
    /// Shared time slot.
    pub time_slot: String,
    /// Member ids in input order (always two or more).
    pub ids: Vec<SessionId>,
}

/// Lists every `(date, time_slot)` pair held by two or more records.
///
/// Groups appear in first-appearance order of date, then time slot.
pub fn conflict_groups<'a, I>(records: I) -> Vec<ConflictGroup>
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    let by_date = group_by_date(records);
    let mut groups = Vec::new();

    for (date, on_date) in by_date.iter() {
        let by_slot = group_by_time_slot(on_date.iter().copied());
        for (time_slot, members) in by_slot.iter() {
            if members.len() < 2 {
                continue;
            }
            groups.push(ConflictGroup {
                date: date.to_owned(),
                time_slot: time_slot.to_owned(),
                ids: members.iter().map(|r| r.id).collect(),
            });
        }
    }

    groups
}

/// Ids of every record sharing its `(date, time_slot)` with another.
pub fn conflict_ids<'a, I>(records: I) -> ConflictSet
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    conflict_groups(records)
        .into_iter()
        .flat_map(|group| group.ids)
        .collect()
}

/// Conflict ids computed over the records in `scope` only.
pub fn conflict_ids_in_scope(records: &[SessionRecord], scope: &ConflictScope) -> ConflictSet {
    conflict_ids(records.iter().filter(|r| scope.contains(r)))
}
