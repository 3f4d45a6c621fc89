//! The scheduling board: store, data source and memoized views.
//!
//! # Flow
//!
//! ```text
//! source ──fetch──▶ ingest ──▶ store ──▶ grouping ──▶ conflicts / views
//!    ▲                           │
//!    └────────── assign ─────────┘
//! ```
//!
//! The board is the single logical owner of the record set. Loads and
//! assignments take `&mut self`, so no view can observe a half-applied
//! change. Views are cached per store revision and selection.
//!
//! # Example
//! ```
//! use docket_schedule::{MockSessionSource, ScheduleBoard};
//!
//! # async fn demo() -> docket_schedule::Result<()> {
//! let source = MockSessionSource::from_json(
//!     r#"[{"id": 1, "date": "2024-03-05T00:00:00Z", "time_slot": "09:00"}]"#,
//! )
//! .expect("valid payload");
//! let mut board = ScheduleBoard::new(source);
//! board.load().await?;
//! assert!(board.global_conflict_ids().is_empty());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use tracing::{error, info, warn};

use crate::config::{load_config, BoardConfig};
use crate::conflicts::{conflict_ids, conflict_ids_in_scope, ConflictScope, ConflictSet};
use crate::error::{BoardError, Result};
use crate::ingest::prepare_records;
use crate::models::{DateSummary, SessionId, SessionRecord};
use crate::source::SessionSource;
use crate::store::SessionStore;
use crate::views::cache::{trace_recompute, ViewCache};
use crate::views::{self, AssignmentFilter, OfficeStats};

/// Whether the board holds a usable record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load attempted yet.
    #[default]
    NotLoaded,
    /// The last load succeeded.
    Ready,
    /// The last load failed; the previous record set (possibly empty) is
    /// still served, and the caller should offer a retry.
    ReloadRequired,
}

/// Owns the record set and serves every derived view.
pub struct ScheduleBoard<S> {
    config: BoardConfig,
    source: S,
    store: SessionStore,
    state: LoadState,
    cache: ViewCache,
}

impl<S: SessionSource> ScheduleBoard<S> {
    /// Creates an empty board with default configuration.
    pub fn new(source: S) -> Self {
        Self::with_config(source, BoardConfig::default())
    }

    /// Creates an empty board.
    pub fn with_config(source: S, config: BoardConfig) -> Self {
        Self {
            config,
            source,
            store: SessionStore::new(),
            state: LoadState::NotLoaded,
            cache: ViewCache::default(),
        }
    }

    /// Creates an empty board configured from a TOML file.
    ///
    /// A missing file yields the default configuration.
    pub fn from_config_file(source: S, path: impl AsRef<Path>) -> Result<Self> {
        let config = load_config(path)?;
        Ok(Self::with_config(source, config))
    }

    /// Replaces the record set with a fresh bulk read.
    ///
    /// On any failure the current records are kept and the state becomes
    /// [`LoadState::ReloadRequired`]. Returns the number of records loaded.
    pub async fn load(&mut self) -> Result<usize> {
        let rows = match self.source.fetch_all_sessions().await {
            Ok(rows) => rows,
            Err(err) => {
                error!(error = %err, "session fetch failed");
                self.state = LoadState::ReloadRequired;
                return Err(BoardError::LoadFailed(err.to_string()));
            }
        };

        let replaced = prepare_records(rows, &self.config.ingest)
            .and_then(|records| self.store.replace_all(records));
        if let Err(errors) = replaced {
            warn!(
                problems = errors.len(),
                policy = self.config.ingest.duplicate_ids.as_str(),
                "fetched sessions rejected"
            );
            self.state = LoadState::ReloadRequired;
            return Err(BoardError::InvalidRecords(errors));
        }

        self.state = LoadState::Ready;
        let conflicts = self.global_conflict_ids().len();
        info!(sessions = self.store.len(), conflicts, "sessions loaded");
        Ok(self.store.len())
    }

    /// Sets the assignee of one session.
    ///
    /// The write goes to the source first; the store is patched only when
    /// it succeeds. A blank `assignee` clears the assignment. Only the
    /// assignee field ever changes.
    pub async fn assign(&mut self, id: SessionId, assignee: &str) -> Result<()> {
        if !self.store.contains(id) {
            warn!(session_id = id, "assignment to unknown session");
            return Err(BoardError::UnknownSession(id));
        }

        if let Err(err) = self.source.update_assignee(id, assignee).await {
            warn!(session_id = id, error = %err, "assignee write failed");
            return Err(BoardError::WriteFailed {
                id,
                reason: err.to_string(),
            });
        }

        if !self.store.set_assignee(id, assignee) {
            return Err(BoardError::UnknownSession(id));
        }
        info!(session_id = id, assignee, "session assigned");
        Ok(())
    }

    /// Outcome of the most recent load.
    pub fn load_state(&self) -> LoadState {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The backing data source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Current normalized records, in ingestion order.
    pub fn records(&self) -> &[SessionRecord] {
        self.store.records()
    }

    /// One record by id.
    pub fn session(&self, id: SessionId) -> Option<&SessionRecord> {
        self.store.get(id)
    }

    /// Per-date summaries in first-appearance order.
    pub fn date_summaries(&mut self) -> &[DateSummary] {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache.date_summaries.get_or_compute(revision, || {
            trace_recompute("date_summaries", revision);
            views::date_summaries(records)
        })
    }

    /// Per-date summaries in canonical date order.
    pub fn sorted_date_summaries(&mut self) -> Vec<DateSummary> {
        let mut summaries = self.date_summaries().to_vec();
        views::sort_date_summaries(&mut summaries);
        summaries
    }

    /// Ids of every double-booked session across the whole office.
    pub fn global_conflict_ids(&mut self) -> &ConflictSet {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache.global_conflicts.get_or_compute(revision, || {
            trace_recompute("global_conflicts", revision);
            conflict_ids(records)
        })
    }

    /// Every globally conflicting session in canonical date order.
    pub fn conflict_list(&mut self) -> &[SessionRecord] {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache.conflict_list.get_or_compute(revision, || {
            trace_recompute("conflict_list", revision);
            views::conflict_list(records).into_iter().cloned().collect()
        })
    }

    /// Conflicts among the sessions of one date only.
    pub fn date_conflict_ids(&mut self, date: &str) -> &ConflictSet {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache
            .date_conflicts
            .get_or_compute((revision, date.to_owned()), || {
                trace_recompute("date_conflicts", revision);
                conflict_ids_in_scope(records, &ConflictScope::Date(date.to_owned()))
            })
    }

    /// Conflicts among one assignee's sessions only.
    pub fn assignee_conflict_ids(&mut self, assignee: &str) -> &ConflictSet {
        let revision = self.store.revision();
        let records = self.store.records();
        let name = assignee.trim().to_owned();
        self.cache
            .assignee_conflicts
            .get_or_compute((revision, name.clone()), || {
                trace_recompute("assignee_conflicts", revision);
                conflict_ids_in_scope(records, &ConflictScope::Assignee(name))
            })
    }

    /// Sessions of one date by time slot, optionally conflicts only.
    pub fn day_sessions(&mut self, date: &str, conflicts_only: bool) -> &[SessionRecord] {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache
            .day_sessions
            .get_or_compute((revision, date.to_owned(), conflicts_only), || {
                trace_recompute("day_sessions", revision);
                views::day_sessions(records, date, conflicts_only)
                    .into_iter()
                    .cloned()
                    .collect()
            })
    }

    /// Assigned sessions narrowed by `filter`.
    pub fn assigned_sessions(&mut self, filter: &AssignmentFilter) -> &[SessionRecord] {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache
            .assigned_sessions
            .get_or_compute((revision, filter.clone()), || {
                trace_recompute("assigned_sessions", revision);
                views::assigned_sessions(records, filter)
                    .into_iter()
                    .cloned()
                    .collect()
            })
    }

    /// Sorted, de-duplicated circuit names.
    pub fn distinct_circuits(&mut self) -> &[String] {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache.circuits.get_or_compute(revision, || {
            trace_recompute("circuits", revision);
            views::distinct_circuits(records)
        })
    }

    /// Sorted, de-duplicated assignee names.
    pub fn distinct_assignees(&mut self) -> &[String] {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache.assignees.get_or_compute(revision, || {
            trace_recompute("assignees", revision);
            views::distinct_assignees(records)
        })
    }

    /// Office-wide dashboard figures.
    pub fn stats(&mut self) -> &OfficeStats {
        let revision = self.store.revision();
        let records = self.store.records();
        self.cache.stats.get_or_compute(revision, || {
            trace_recompute("stats", revision);
            OfficeStats::calculate(records)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicateIdPolicy, IngestConfig};
    use crate::models::RawSessionRecord;
    use crate::source::MockSessionSource;

    fn raw(id: SessionId, date: &str, slot: &str, assignee: Option<&str>) -> RawSessionRecord {
        RawSessionRecord {
            id,
            date: date.into(),
            time_slot: slot.into(),
            period: None,
            case_number: format!("C-{id}"),
            court: "General Court".into(),
            circuit: None,
            appointment_type: "Hearing".into(),
            assignee: assignee.map(str::to_owned),
        }
    }

    fn three_sessions() -> MockSessionSource {
        MockSessionSource::from_records(vec![
            raw(1, "2024-03-05T00:00:00.000Z", "09:00", Some("A")),
            raw(2, "2024-03-05T00:00:00.000Z", "09:00", Some("B")),
            raw(3, "05-03-2024", "10:00", Some("A")),
        ])
    }

    async fn loaded_board() -> ScheduleBoard<MockSessionSource> {
        let mut board = ScheduleBoard::new(three_sessions());
        board.load().await.expect("load");
        board
    }

    #[tokio::test]
    async fn load_normalizes_and_detects_conflicts() {
        let mut board = loaded_board().await;

        assert_eq!(board.load_state(), LoadState::Ready);
        assert!(board.records().iter().all(|r| r.date == "05-03-2024"));
        assert_eq!(*board.global_conflict_ids(), ConflictSet::from([1, 2]));

        let summaries = board.date_summaries().to_vec();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_count, 3);
        assert_eq!(summaries[0].conflict_count, 2);
        assert_eq!(summaries[0].distinct_assignee_count, 2);
    }

    #[tokio::test]
    async fn assignee_scope_is_independent_of_global() {
        let mut board = loaded_board().await;
        assert!(board.assignee_conflict_ids("A").is_empty());
        assert!(board.global_conflict_ids().contains(&1));
    }

    #[tokio::test]
    async fn assign_updates_only_assignee() {
        let mut board = loaded_board().await;
        let before = board.session(2).cloned().unwrap();

        board.assign(2, "Khalid").await.expect("assign");

        let after = board.session(2).unwrap();
        assert_eq!(after.assignee.as_deref(), Some("Khalid"));
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.time_slot, before.time_slot);
        assert_eq!(after.case_number, before.case_number);
        assert_eq!(after.court, before.court);
        assert_eq!(board.source().writes(), vec![(2, "Khalid".to_string())]);
    }

    #[tokio::test]
    async fn assign_unknown_id_fails_without_write() {
        let mut board = loaded_board().await;
        let snapshot = board.records().to_vec();

        let err = board.assign(999, "X").await.unwrap_err();
        assert!(matches!(err, BoardError::UnknownSession(999)));
        assert_eq!(board.records(), snapshot.as_slice());
        assert!(board.source().writes().is_empty());
    }

    #[tokio::test]
    async fn assign_write_failure_leaves_store_unchanged() {
        let mut board = loaded_board().await;
        board.source().reject_writes_to(1);

        let err = board.assign(1, "Sara").await.unwrap_err();
        assert!(matches!(err, BoardError::WriteFailed { id: 1, .. }));
        assert_eq!(board.session(1).unwrap().assignee.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn assign_invalidates_cached_views() {
        let mut board = loaded_board().await;
        assert!(board.assignee_conflict_ids("A").is_empty());
        assert_eq!(board.distinct_assignees(), ["A", "B"]);

        board.assign(2, "A").await.expect("assign");

        assert_eq!(*board.assignee_conflict_ids("A"), ConflictSet::from([1, 2]));
        assert_eq!(board.distinct_assignees(), ["A"]);
        assert_eq!(board.stats().sessions_by_assignee, vec![("A".to_string(), 3)]);
    }

    #[tokio::test]
    async fn failed_reload_keeps_last_good_set() {
        let mut board = loaded_board().await;
        board.source().fail_fetches("timeout");

        let err = board.load().await.unwrap_err();
        assert!(matches!(err, BoardError::LoadFailed(_)));
        assert_eq!(board.load_state(), LoadState::ReloadRequired);
        assert_eq!(board.records().len(), 3);

        board.source().restore_fetches();
        board.load().await.expect("retry");
        assert_eq!(board.load_state(), LoadState::Ready);
    }

    #[tokio::test]
    async fn failed_first_load_serves_empty_set() {
        let source = MockSessionSource::default();
        source.fail_fetches("offline");
        let mut board = ScheduleBoard::new(source);

        assert_eq!(board.load_state(), LoadState::NotLoaded);
        assert!(board.load().await.is_err());
        assert_eq!(board.load_state(), LoadState::ReloadRequired);
        assert!(board.records().is_empty());
        assert!(board.date_summaries().is_empty());
        assert!(board.global_conflict_ids().is_empty());
    }

    #[tokio::test]
    async fn duplicate_ids_rejected_keep_last_good_set() {
        let mut board = loaded_board().await;
        board.source().set_rows(vec![
            Some(raw(8, "06-03-2024", "09:00", None)),
            Some(raw(8, "06-03-2024", "10:00", None)),
        ]);

        let err = board.load().await.unwrap_err();
        assert!(matches!(err, BoardError::InvalidRecords(_)));
        assert_eq!(board.records().len(), 3);
        assert!(board.session(8).is_none());
    }

    #[tokio::test]
    async fn duplicate_ids_keep_first_policy() {
        let config = BoardConfig {
            ingest: IngestConfig {
                duplicate_ids: DuplicateIdPolicy::KeepFirst,
                ..IngestConfig::default()
            },
        };
        let source = MockSessionSource::from_records(vec![
            raw(8, "06-03-2024", "09:00", None),
            raw(8, "06-03-2024", "10:00", None),
        ]);
        let mut board = ScheduleBoard::with_config(source, config);

        assert_eq!(board.load().await.expect("load"), 1);
        assert_eq!(board.session(8).unwrap().time_slot, "09:00");
    }

    #[test]
    fn from_config_file_reads_policy() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("board.toml");
        std::fs::write(&path, "[ingest]\nduplicate_ids = \"keep_first\"\n").expect("write");

        let board = ScheduleBoard::from_config_file(MockSessionSource::default(), &path)
            .expect("config");
        assert_eq!(board.config().ingest.duplicate_ids, DuplicateIdPolicy::KeepFirst);
    }

    #[test]
    fn from_config_file_reports_parse_errors() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("board.toml");
        std::fs::write(&path, "[ingest\n").expect("write");

        let result = ScheduleBoard::from_config_file(MockSessionSource::default(), &path);
        assert!(matches!(result, Err(BoardError::Config(_))));
    }

    #[tokio::test]
    async fn views_are_stable_across_calls() {
        let mut board = loaded_board().await;
        let first = board.sorted_date_summaries();
        let second = board.sorted_date_summaries();
        assert_eq!(first, second);

        let conflicts: Vec<SessionId> = board.conflict_list().iter().map(|r| r.id).collect();
        assert_eq!(conflicts, vec![1, 2]);
        assert_eq!(board.day_sessions("05-03-2024", true).len(), 2);
        assert_eq!(*board.date_conflict_ids("05-03-2024"), ConflictSet::from([1, 2]));
    }
}
