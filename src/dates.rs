//! Date normalization and canonical date ordering.
//!
//! Stored dates are day-first (`DD-MM-YYYY`). The data source may instead
//! deliver ISO 8601 timestamps (`YYYY-MM-DDThh:mm:ss...`), which are
//! rewritten on ingestion.
//!
//! # Ordering
//! Day-first strings do not sort chronologically as raw text, so every
//! sort goes through [`canonical_sort_key`], which reparses the stored
//! form into a zero-padded `YYYY-MM-DD` key.

use std::cmp::Ordering;

use chrono::NaiveDate;
use tracing::warn;

use crate::models::SessionRecord;

/// Separator between the date and time parts of an ISO 8601 timestamp.
pub const ISO_DATE_TIME_SEPARATOR: char = 'T';

/// Separator between date components in both ISO and canonical forms.
pub const DATE_COMPONENT_SEPARATOR: char = '-';

/// `chrono` format of the canonical stored date.
pub const CANONICAL_DATE_FORMAT: &str = "%d-%m-%Y";

/// Rewrites an ISO timestamp into canonical `DD-MM-YYYY` form.
///
/// Strings without the ISO separator are assumed canonical and returned
/// unchanged, which makes the function idempotent. If the ISO date part
/// lacks a year, month or day, the raw string is returned unchanged and
/// a warning is emitted; the record is kept.
pub fn normalize_date(raw: &str) -> String {
    let Some((date_part, _)) = raw.split_once(ISO_DATE_TIME_SEPARATOR) else {
        return raw.to_owned();
    };

    let mut parts = date_part.split(DATE_COMPONENT_SEPARATOR);
    let year = parts.next().filter(|p| !p.is_empty());
    let month = parts.next().filter(|p| !p.is_empty());
    let day = parts.next().filter(|p| !p.is_empty());

    match (year, month, day) {
        (Some(year), Some(month), Some(day)) => format!("{day}-{month}-{year}"),
        _ => {
            warn!(raw, "could not format session date, keeping raw value");
            raw.to_owned()
        }
    }
}

/// Whether a date is a real calendar day in zero-padded `DD-MM-YYYY` form.
pub fn is_canonical_date(date: &str) -> bool {
    let parts: Vec<&str> = date.split(DATE_COMPONENT_SEPARATOR).collect();
    let padded = match parts.as_slice() {
        [day, month, year] => {
            is_digits(day, 2) && is_digits(month, 2) && is_digits(year, 4)
        }
        _ => false,
    };
    padded && NaiveDate::parse_from_str(date, CANONICAL_DATE_FORMAT).is_ok()
}

fn is_digits(part: &str, len: usize) -> bool {
    part.len() == len && part.bytes().all(|b| b.is_ascii_digit())
}

/// Reparses a day-first date into a year-first sort key.
///
/// Numeric components are zero-padded (year to 4, month and day to 2),
/// so `5-3-2024` and `05-03-2024` yield the same key. Non-numeric or
/// missing components are left-padded with `0` as text; a malformed date
/// still gets a key but may not sort chronologically.
pub fn canonical_sort_key(date: &str) -> String {
    let mut parts = date.split(DATE_COMPONENT_SEPARATOR);
    let day = parts.next().unwrap_or("");
    let month = parts.next().unwrap_or("");
    let year = parts.next().unwrap_or("");

    format!(
        "{}-{}-{}",
        pad_component(year, 4),
        pad_component(month, 2),
        pad_component(day, 2)
    )
}

fn pad_component(part: &str, width: usize) -> String {
    match part.trim().parse::<u32>() {
        Ok(n) => format!("{n:0width$}"),
        Err(_) => format!("{part:0>width$}"),
    }
}

/// Compares two `(date, time_slot)` pairs in canonical date order.
///
/// Dates compare by [`canonical_sort_key`]; ties break on the time slot
/// as plain text.
pub fn compare_date_slot(
    a_date: &str,
    a_slot: &str,
    b_date: &str,
    b_slot: &str,
) -> Ordering {
    canonical_sort_key(a_date)
        .cmp(&canonical_sort_key(b_date))
        .then_with(|| a_slot.cmp(b_slot))
}

/// Compares two records in canonical date order.
pub fn compare_records(a: &SessionRecord, b: &SessionRecord) -> Ordering {
    compare_date_slot(&a.date, &a.time_slot, &b.date, &b.time_slot)
}

/// Sorts dates chronologically (stable).
pub fn sort_dates(dates: &mut [String]) {
    dates.sort_by_cached_key(|d| canonical_sort_key(d));
}
