//! Turns a bulk read into a record set ready for the store.
//!
//! Steps, in order:
//! 1. Skip blank (`None`) rows.
//! 2. Normalize dates.
//! 3. Optionally drop records with a blank time slot.
//! 4. Apply the duplicate id policy.
//! 5. Log advisory validation findings.

use std::collections::HashSet;

use tracing::warn;

use crate::config::{DuplicateIdPolicy, IngestConfig};
use crate::models::{RawSessionRecord, SessionRecord};
use crate::validation::{check_unique_ids, validate_records, ValidationError};

/// Prepares fetched rows for [`SessionStore::replace_all`](crate::store::SessionStore::replace_all).
///
/// Fails only when duplicate ids are found under [`DuplicateIdPolicy::Reject`].
pub fn prepare_records(
    rows: Vec<Option<RawSessionRecord>>,
    config: &IngestConfig,
) -> Result<Vec<SessionRecord>, Vec<ValidationError>> {
    let mut records: Vec<SessionRecord> = rows
        .into_iter()
        .flatten()
        .map(RawSessionRecord::into_record)
        .collect();

    if config.drop_blank_time_slots {
        records.retain(|r| {
            let keep = !r.time_slot.trim().is_empty();
            if !keep {
                warn!(session_id = r.id, "dropping session without time slot");
            }
            keep
        });
    }

    match config.duplicate_ids {
        DuplicateIdPolicy::Reject => check_unique_ids(&records)?,
        DuplicateIdPolicy::KeepFirst => {
            let mut seen = HashSet::new();
            records.retain(|r| {
                let first = seen.insert(r.id);
                if !first {
                    warn!(session_id = r.id, "dropping repeated session id");
                }
                first
            });
        }
    }

    if let Err(findings) = validate_records(&records) {
        for finding in &findings {
            warn!(
                session_id = finding.session_id,
                kind = ?finding.kind,
                "{}",
                finding.message
            );
        }
    }

    Ok(records)
}
