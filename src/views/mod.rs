//! Read-only projections consumed by presentation.
//!
//! Every projection is a pure function of a record slice (plus a
//! selection), so each can be recomputed at any time from the store
//! alone.
//!
//! # Views
//!
//! - **Calendar**: per-date summaries, day details, global conflict list
//! - **Assignments**: assigned sessions narrowed by circuit / assignee / conflicts
//! - **Distinct values**: circuits and assignees for filter controls
//! - **Stats**: office-wide workload figures
//!
//! Sorting follows canonical date order (see [`crate::dates`]).

mod assignments;
pub(crate) mod cache;
mod calendar;
mod distinct;
mod stats;

pub use assignments::{assigned_sessions, AssignmentFilter};
pub use cache::Memo;
pub use calendar::{conflict_list, date_summaries, day_sessions, sort_date_summaries};
pub use distinct::{distinct_assignees, distinct_circuits};
pub use stats::OfficeStats;
