//! Input validation for session records.
//!
//! Checks structural integrity of a fetched record set before it replaces
//! the store. Detects:
//! - Duplicate IDs
//! - Dates that are not real calendar days in `DD-MM-YYYY` form
//! - Empty time slots
//!
//! Only duplicate ids break a store invariant; the other findings are
//! advisory and the records are kept.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::dates::is_canonical_date;
use crate::models::{SessionId, SessionRecord};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Offending session id.
    pub session_id: SessionId,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two records share the same id.
    DuplicateId,
    /// Date is not a real calendar day in `DD-MM-YYYY` form.
    MalformedDate,
    /// Time slot is empty or whitespace.
    EmptyTimeSlot,
}

impl ValidationErrorKind {
    /// Whether this finding must block the record set from being stored.
    pub fn is_blocking(self) -> bool {
        matches!(self, Self::DuplicateId)
    }
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, session_id: SessionId, message: impl Into<String>) -> Self {
        Self {
            kind,
            session_id,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Reports every repeated id after its first occurrence.
pub fn check_unique_ids(records: &[SessionRecord]) -> ValidationResult {
    let mut seen = HashSet::new();
    let errors: Vec<ValidationError> = records
        .iter()
        .filter(|r| !seen.insert(r.id))
        .map(|r| {
            ValidationError::new(
                ValidationErrorKind::DuplicateId,
                r.id,
                format!("Duplicate session ID: {}", r.id),
            )
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a normalized record set.
///
/// Checks:
/// 1. No duplicate ids
/// 2. Every date is a real calendar day in `DD-MM-YYYY` form
/// 3. Every time slot is non-blank
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_records(records: &[SessionRecord]) -> ValidationResult {
    let mut errors = check_unique_ids(records).err().unwrap_or_default();

    for record in records {
        if !is_canonical_date(&record.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MalformedDate,
                record.id,
                format!("Session {} has malformed date '{}'", record.id, record.date),
            ));
        }

        if record.time_slot.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyTimeSlot,
                record.id,
                format!("Session {} has no time slot", record.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
