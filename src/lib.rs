//! Court-session scheduling board.
//!
//! Normalizes raw session records, groups them by date and time slot,
//! detects double-bookings and serves the derived views a practice's
//! calendar, conflict and assignment screens are built from.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SessionRecord`, `RawSessionRecord`, `DateSummary`
//! - **`dates`**: ISO → `DD-MM-YYYY` normalization and canonical date ordering
//! - **`grouping`**: Insertion-stable grouping by date and time slot
//! - **`conflicts`**: Conflict detection over global, per-date and per-assignee scopes
//! - **`views`**: Summaries, conflict list, assigned sessions, distinct values, stats
//! - **`ingest`**: Fetched rows → normalized, policy-checked record set
//! - **`store`**: In-memory record set with assignee patching
//! - **`source`**: Async boundary to the remote data source
//! - **`board`**: `ScheduleBoard`, tying store, source and memoized views together
//! - **`validation`**: Input checks (duplicate IDs, malformed dates, empty time slots)
//! - **`config`** / **`error`**: TOML configuration and error types
//!
//! # Architecture
//!
//! Everything below `board` is pure and synchronous. Only the two
//! [`SessionSource`] calls may suspend.

pub mod board;
pub mod config;
pub mod conflicts;
pub mod dates;
pub mod error;
pub mod grouping;
pub mod ingest;
pub mod models;
pub mod source;
pub mod store;
pub mod validation;
pub mod views;

pub use board::{LoadState, ScheduleBoard};
pub use config::{load_config, BoardConfig, DuplicateIdPolicy, IngestConfig};
pub use error::{BoardError, ConfigError, Result, SourceError};
pub use models::{decode_sessions, DateSummary, RawSessionRecord, SessionId, SessionRecord};
pub use source::{MockSessionSource, SessionSource};
