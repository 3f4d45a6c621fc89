//! Insertion-stable grouping of session records.
//!
//! Every higher-level view partitions records by date, and within a date
//! by time slot. Keys compare as exact strings: no trimming, case-folding
//! or locale normalization happens here.
//!
//! # Ordering
//! [`OrderedGroups`] preserves first-appearance order of keys and input
//! order of members within each group, independent of hashing.

use std::collections::HashMap;

use crate::models::SessionRecord;

/// An insertion-ordered mapping from key to the records sharing it.
#[derive(Debug, Clone, Default)]
pub struct OrderedGroups<'a> {
    index: HashMap<&'a str, usize>,
    groups: Vec<(&'a str, Vec<&'a SessionRecord>)>,
}

impl<'a> OrderedGroups<'a> {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record to the group for `key`, creating it if needed.
    pub fn push(&mut self, key: &'a str, record: &'a SessionRecord) {
        match self.index.get(key) {
            Some(&slot) => self.groups[slot].1.push(record),
            None => {
                self.index.insert(key, self.groups.len());
                self.groups.push((key, vec![record]));
            }
        }
    }

    /// Records sharing `key`, in input order.
    pub fn get(&self, key: &str) -> Option<&[&'a SessionRecord]> {
        self.index
            .get(key)
            .map(|&slot| self.groups[slot].1.as_slice())
    }

    /// Keys in first-appearance order.
    pub fn keys(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.iter().map(|(key, _)| *key)
    }

    /// `(key, members)` pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a SessionRecord])> + '_ {
        self.groups
            .iter()
            .map(|(key, members)| (*key, members.as_slice()))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether there are no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Groups records by an arbitrary string key.
pub fn group_by<'a, I, F>(records: I, key: F) -> OrderedGroups<'a>
where
    I: IntoIterator<Item = &'a SessionRecord>,
    F: Fn(&'a SessionRecord) -> &'a str,
{
    let mut groups = OrderedGroups::new();
    for record in records {
        groups.push(key(record), record);
    }
    groups
}

/// Partitions records by date.
pub fn group_by_date<'a, I>(records: I) -> OrderedGroups<'a>
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    group_by(records, |r| r.date.as_str())
}

/// Partitions records by time slot.
///
/// Intended for the records of a single date; across dates, equal time
/// slots land in the same group.
pub fn group_by_time_slot<'a, I>(records: I) -> OrderedGroups<'a>
where
    I: IntoIterator<Item = &'a SessionRecord>,
{
    group_by(records, |r| r.time_slot.as_str())
}
