//! Session scheduling domain models.
//!
//! Provides the data types held by the store and produced by the views.
//!
//! # Domain Mappings
//!
//! | docket-schedule | Source column | Role |
//! |-----------------|---------------|------|
//! | `date` | التاريخ | grouping key |
//! | `time_slot` | وقت الموعد | grouping key |
//! | `period` | ص- م | display |
//! | `case_number` | رقم الدعوى | display |
//! | `court` | المحكمة | display |
//! | `circuit` | الدائرة | filter |
//! | `appointment_type` | نوع الموعد | display |
//! | `assignee` | التكليف | filter, mutable |

mod session;
mod summary;

pub use session::{decode_sessions, RawSessionRecord, SessionId, SessionRecord};
pub use summary::DateSummary;
