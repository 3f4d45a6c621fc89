//! Boundary to the remote session data source.
//!
//! The board consumes two operations: a bulk read of every session and a
//! point write of one session's assignee. Transport is the implementor's
//! concern; these are the only calls that may suspend.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::SourceError;
use crate::models::{decode_sessions, RawSessionRecord, SessionId};

#[async_trait]
pub trait SessionSource: Send + Sync {
    /// Returns every session. `None` entries are blank rows in the source.
    async fn fetch_all_sessions(&self) -> Result<Vec<Option<RawSessionRecord>>, SourceError>;

    /// Persists a new assignee for exactly one session.
    ///
    /// Must either apply fully or fail without effect.
    async fn update_assignee(&self, id: SessionId, assignee: &str) -> Result<(), SourceError>;
}

#[derive(Debug, Default)]
struct MockState {
    rows: Vec<Option<RawSessionRecord>>,
    fetch_failure: Option<String>,
    rejected_writes: HashSet<SessionId>,
    writes: Vec<(SessionId, String)>,
}

/// In-memory source with scriptable failures.
///
/// Successful writes are applied to the held rows, so a later fetch
/// reflects them.
#[derive(Debug, Default)]
pub struct MockSessionSource {
    state: Mutex<MockState>,
}

impl MockSessionSource {
    pub fn new(rows: Vec<Option<RawSessionRecord>>) -> Self {
        Self {
            state: Mutex::new(MockState {
                rows,
                ..MockState::default()
            }),
        }
    }

    pub fn from_records(records: Vec<RawSessionRecord>) -> Self {
        Self::new(records.into_iter().map(Some).collect())
    }

    /// Builds a source from a JSON array payload.
    pub fn from_json(json: &str) -> Result<Self, SourceError> {
        Ok(Self::new(decode_sessions(json)?))
    }

    /// Makes every subsequent fetch fail with `reason`.
    pub fn fail_fetches(&self, reason: impl Into<String>) {
        self.lock().fetch_failure = Some(reason.into());
    }

    /// Clears a scripted fetch failure.
    pub fn restore_fetches(&self) {
        self.lock().fetch_failure = None;
    }

    /// Makes writes to `id` fail.
    pub fn reject_writes_to(&self, id: SessionId) {
        self.lock().rejected_writes.insert(id);
    }

    /// Replaces the rows returned by later fetches.
    pub fn set_rows(&self, rows: Vec<Option<RawSessionRecord>>) {
        self.lock().rows = rows;
    }

    /// Successful writes received so far, in order.
    pub fn writes(&self) -> Vec<(SessionId, String)> {
        self.lock().writes.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl SessionSource for MockSessionSource {
    async fn fetch_all_sessions(&self) -> Result<Vec<Option<RawSessionRecord>>, SourceError> {
        let state = self.lock();
        match &state.fetch_failure {
            Some(reason) => Err(SourceError::Unavailable(reason.clone())),
            None => Ok(state.rows.clone()),
        }
    }

    async fn update_assignee(&self, id: SessionId, assignee: &str) -> Result<(), SourceError> {
        let mut state = self.lock();
        if state.rejected_writes.contains(&id) {
            return Err(SourceError::Rejected(format!("write to session {id} refused")));
        }

        let Some(row) = state.rows.iter_mut().flatten().find(|row| row.id == id) else {
            return Err(SourceError::Rejected(format!("session {id} not found")));
        };
        row.assignee = Some(assignee.to_owned());
        state.writes.push((id, assignee.to_owned()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: SessionId) -> RawSessionRecord {
        RawSessionRecord {
            id,
            date: "2024-03-05T00:00:00.000Z".into(),
            time_slot: "09:00".into(),
            period: None,
            case_number: String::new(),
            court: String::new(),
            circuit: None,
            appointment_type: String::new(),
            assignee: None,
        }
    }

    #[tokio::test]
    async fn mock_fetch_returns_rows() {
        let source = MockSessionSource::new(vec![Some(raw(1)), None, Some(raw(2))]);
        let rows = source.fetch_all_sessions().await.expect("fetch");
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_none());
    }

    #[tokio::test]
    async fn mock_fetch_failure_is_scriptable() {
        let source = MockSessionSource::from_records(vec![raw(1)]);
        source.fail_fetches("offline");
        assert!(matches!(
            source.fetch_all_sessions().await,
            Err(SourceError::Unavailable(_))
        ));

        source.restore_fetches();
        assert!(source.fetch_all_sessions().await.is_ok());
    }

    #[tokio::test]
    async fn mock_write_persists_for_next_fetch() {
        let source = MockSessionSource::from_records(vec![raw(1), raw(2)]);
        source.update_assignee(2, "Khalid").await.expect("write");

        let rows = source.fetch_all_sessions().await.expect("fetch");
        let row = rows.into_iter().flatten().find(|r| r.id == 2).unwrap();
        assert_eq!(row.assignee.as_deref(), Some("Khalid"));
        assert_eq!(source.writes(), vec![(2, "Khalid".to_string())]);
    }

    #[tokio::test]
    async fn mock_rejected_write_has_no_effect() {
        let source = MockSessionSource::from_records(vec![raw(1)]);
        source.reject_writes_to(1);

        assert!(source.update_assignee(1, "X").await.is_err());
        assert!(source.update_assignee(42, "X").await.is_err());
        assert!(source.writes().is_empty());
    }

    #[test]
    fn mock_from_json_rejects_bad_payload() {
        assert!(matches!(
            MockSessionSource::from_json("not json"),
            Err(SourceError::Decode(_))
        ));
    }
}
