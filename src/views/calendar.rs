//! Calendar projections: per-date summaries, day details and the global
//! conflict list.

use std::collections::HashSet;

use crate::conflicts::{conflict_ids, ConflictScope};
use crate::dates::{canonical_sort_key, compare_records};
use crate::grouping::group_by_date;
use crate::models::{DateSummary, SessionRecord};

/// One summary per distinct date, in first-appearance order.
///
/// Conflicts are counted within each date's own records.
pub fn date_summaries(records: &[SessionRecord]) -> Vec<DateSummary> {
    group_by_date(records)
        .iter()
        .map(|(date, on_date)| {
            let assignees: HashSet<&str> =
                on_date.iter().filter_map(|r| r.assignee_name()).collect();
            DateSummary {
                date: date.to_owned(),
                total_count: on_date.len(),
                conflict_count: conflict_ids(on_date.iter().copied()).len(),
                distinct_assignee_count: assignees.len(),
            }
        })
        .collect()
}

/// Sorts summaries chronologically (stable).
pub fn sort_date_summaries(summaries: &mut [DateSummary]) {
    summaries.sort_by_cached_key(|s| canonical_sort_key(&s.date));
}

/// Every globally conflicting record, in canonical date order.
///
/// Each record appears once; ties on `(date, time_slot)` keep store order.
pub fn conflict_list(records: &[SessionRecord]) -> Vec<&SessionRecord> {
    let ids = conflict_ids(records);
    let mut list: Vec<&SessionRecord> = records.iter().filter(|r| ids.contains(&r.id)).collect();
    list.sort_by(|a, b| compare_records(a, b));
    list
}

/// Records of one date ordered by time slot.
///
/// With `conflicts_only`, keeps just the records conflicting within that
/// date.
pub fn day_sessions<'a>(
    records: &'a [SessionRecord],
    date: &str,
    conflicts_only: bool,
) -> Vec<&'a SessionRecord> {
    let scope = ConflictScope::Date(date.to_owned());
    let mut on_date: Vec<&SessionRecord> = records.iter().filter(|r| scope.contains(r)).collect();

    if conflicts_only {
        let ids = conflict_ids(on_date.iter().copied());
        on_date.retain(|r| ids.contains(&r.id));
    }

    on_date.sort_by(|a, b| a.time_slot.cmp(&b.time_slot));
    on_date
}
