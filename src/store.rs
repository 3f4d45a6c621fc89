//! In-memory session store.
//!
//! Holds the current record set keyed by id. Supports two mutations:
//! full replacement (after a bulk read) and an assignee patch on one
//! record. Every successful mutation bumps [`SessionStore::revision`],
//! which derived views use as their cache key.

use std::collections::HashMap;

use crate::models::{SessionId, SessionRecord};
use crate::validation::{check_unique_ids, ValidationResult};

/// The authoritative record set.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    records: Vec<SessionRecord>,
    index: HashMap<SessionId, usize>,
    revision: u64,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole record set.
    ///
    /// Refused, leaving the store untouched, if any id repeats.
    pub fn replace_all(&mut self, records: Vec<SessionRecord>) -> ValidationResult {
        check_unique_ids(&records)?;

        self.index = records
            .iter()
            .enumerate()
            .map(|(slot, r)| (r.id, slot))
            .collect();
        self.records = records;
        self.revision += 1;
        Ok(())
    }

    /// Replaces one record's assignee; no other field is touched.
    ///
    /// A blank assignee clears the assignment. Returns `false` if the id
    /// is unknown.
    pub fn set_assignee(&mut self, id: SessionId, assignee: &str) -> bool {
        let Some(&slot) = self.index.get(&id) else {
            return false;
        };

        self.records[slot].assignee = if assignee.trim().is_empty() {
            None
        } else {
            Some(assignee.to_owned())
        };
        self.revision += 1;
        true
    }

    /// Looks up a record by id.
    pub fn get(&self, id: SessionId) -> Option<&SessionRecord> {
        self.index.get(&id).map(|&slot| &self.records[slot])
    }

    /// Whether a record with this id exists.
    pub fn contains(&self, id: SessionId) -> bool {
        self.index.contains_key(&id)
    }

    /// All records in ingestion order.
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Mutation counter; starts at 0 and grows on every change.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> SessionStore {
        let mut store = SessionStore::new();
        store
            .replace_all(vec![
                SessionRecord::new(1, "05-03-2024", "09:00").with_case_number("100"),
                SessionRecord::new(2, "05-03-2024", "09:00")
                    .with_case_number("200")
                    .with_circuit("First"),
                SessionRecord::new(3, "05-03-2024", "10:00"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_replace_all() {
        let store = sample_store();
        assert_eq!(store.len(), 3);
        assert_eq!(store.revision(), 1);
        assert_eq!(store.get(2).unwrap().case_number, "200");
        assert!(store.contains(3));
        assert!(!store.contains(4));
    }

    #[test]
    fn test_replace_all_rejects_duplicates() {
        let mut store = sample_store();
        let result = store.replace_all(vec![
            SessionRecord::new(5, "06-03-2024", "09:00"),
            SessionRecord::new(5, "06-03-2024", "10:00"),
        ]);

        assert!(result.is_err());
        assert_eq!(store.len(), 3);
        assert_eq!(store.revision(), 1);
        assert!(store.get(5).is_none());
    }

    #[test]
    fn test_set_assignee_patches_single_field() {
        let mut store = sample_store();
        let before = store.get(2).unwrap().clone();

        assert!(store.set_assignee(2, "Khalid"));

        let after = store.get(2).unwrap();
        assert_eq!(after.assignee.as_deref(), Some("Khalid"));
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.time_slot, before.time_slot);
        assert_eq!(after.case_number, before.case_number);
        assert_eq!(after.circuit, before.circuit);
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn test_set_assignee_blank_clears() {
        let mut store = sample_store();
        store.set_assignee(1, "Sara");
        store.set_assignee(1, "  ");
        assert_eq!(store.get(1).unwrap().assignee, None);
    }

    #[test]
    fn test_set_assignee_unknown_id() {
        let mut store = sample_store();
        let snapshot = store.records().to_vec();

        assert!(!store.set_assignee(999, "X"));
        assert_eq!(store.records(), snapshot.as_slice());
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn test_empty_store() {
        let store = SessionStore::new();
        assert!(store.is_empty());
        assert_eq!(store.revision(), 0);
        assert!(store.get(1).is_none());
    }
}
