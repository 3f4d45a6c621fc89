//! Distinct filter values.

use std::collections::BTreeSet;

use crate::models::SessionRecord;

/// Unique non-blank trimmed circuits, sorted.
pub fn distinct_circuits(records: &[SessionRecord]) -> Vec<String> {
    distinct(records, SessionRecord::circuit_name)
}

/// Unique non-blank trimmed assignees, sorted.
pub fn distinct_assignees(records: &[SessionRecord]) -> Vec<String> {
    distinct(records, SessionRecord::assignee_name)
}

fn distinct<F>(records: &[SessionRecord], value: F) -> Vec<String>
where
    F: Fn(&SessionRecord) -> Option<&str>,
{
    records
        .iter()
        .filter_map(value)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}
