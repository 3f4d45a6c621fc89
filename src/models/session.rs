//! Session record models.
//!
//! A session is one scheduled court appointment: a single discrete
//! date + time slot occurrence, with display-only docket metadata and
//! an optional assignee (the lawyer or clerk responsible for attending).
//!
//! # Raw vs. normalized
//!
//! [`RawSessionRecord`] mirrors the payload returned by the data source,
//! including its native column names. [`SessionRecord`] is the normalized
//! form held by the store: its date is always rewritten to `DD-MM-YYYY`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::dates::normalize_date;

/// Externally issued session identifier.
///
/// Opaque handle assigned by the data source. Never synthesized or
/// renumbered locally.
pub type SessionId = i64;

/// A session record as delivered by the data source.
///
/// Accepts both snake_case keys and the source's native column names.
/// Missing or `null` text fields default to empty, and numeric cells
/// (a docket number typed as a number, say) are read as their text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSessionRecord {
    /// Source-assigned identifier.
    pub id: SessionId,
    /// Session date, ISO timestamp or `DD-MM-YYYY`.
    #[serde(default, alias = "التاريخ", deserialize_with = "lenient_text")]
    pub date: String,
    /// Appointment time label.
    #[serde(default, alias = "وقت الموعد", deserialize_with = "lenient_text")]
    pub time_slot: String,
    /// AM/PM marker shown next to the time slot.
    #[serde(default, alias = "ص- م", deserialize_with = "lenient_optional_text")]
    pub period: Option<String>,
    /// Docket number.
    #[serde(default, alias = "رقم الدعوى", deserialize_with = "lenient_text")]
    pub case_number: String,
    /// Court name.
    #[serde(default, alias = "المحكمة", deserialize_with = "lenient_text")]
    pub court: String,
    /// Circuit within the court.
    #[serde(default, alias = "الدائرة", deserialize_with = "lenient_optional_text")]
    pub circuit: Option<String>,
    /// Appointment type label.
    #[serde(default, alias = "نوع الموعد", deserialize_with = "lenient_text")]
    pub appointment_type: String,
    /// Responsible lawyer or clerk.
    #[serde(default, alias = "التكليف", deserialize_with = "lenient_optional_text")]
    pub assignee: Option<String>,
}

impl RawSessionRecord {
    /// Converts into a store record, normalizing the date.
    ///
    /// Malformed dates are kept verbatim (see [`normalize_date`]).
    pub fn into_record(self) -> SessionRecord {
        SessionRecord {
            id: self.id,
            date: normalize_date(&self.date),
            time_slot: self.time_slot,
            period: self.period,
            case_number: self.case_number,
            court: self.court,
            circuit: self.circuit,
            appointment_type: self.appointment_type,
            assignee: self.assignee,
        }
    }
}

/// A normalized session record.
///
/// Two records are scheduled at the "same time" only if both `date` and
/// `time_slot` are byte-identical. `period` is display-only and never
/// takes part in grouping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique identifier.
    pub id: SessionId,
    /// Canonical `DD-MM-YYYY` date.
    pub date: String,
    /// Appointment time label, compared as an exact string.
    pub time_slot: String,
    /// AM/PM marker (display-only).
    pub period: Option<String>,
    /// Docket number (display-only).
    pub case_number: String,
    /// Court name (display-only).
    pub court: String,
    /// Circuit; blank means unset.
    pub circuit: Option<String>,
    /// Appointment type (display-only).
    pub appointment_type: String,
    /// Assignee; blank means unassigned.
    pub assignee: Option<String>,
}

impl SessionRecord {
    /// Creates a record with the given id, canonical date and time slot.
    pub fn new(id: SessionId, date: impl Into<String>, time_slot: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            time_slot: time_slot.into(),
            period: None,
            case_number: String::new(),
            court: String::new(),
            circuit: None,
            appointment_type: String::new(),
            assignee: None,
        }
    }

    /// Sets the AM/PM marker.
    pub fn with_period(mut self, period: impl Into<String>) -> Self {
        self.period = Some(period.into());
        self
    }

    /// Sets the docket number.
    pub fn with_case_number(mut self, case_number: impl Into<String>) -> Self {
        self.case_number = case_number.into();
        self
    }

    /// Sets the court.
    pub fn with_court(mut self, court: impl Into<String>) -> Self {
        self.court = court.into();
        self
    }

    /// Sets the circuit.
    pub fn with_circuit(mut self, circuit: impl Into<String>) -> Self {
        self.circuit = Some(circuit.into());
        self
    }

    /// Sets the appointment type.
    pub fn with_appointment_type(mut self, appointment_type: impl Into<String>) -> Self {
        self.appointment_type = appointment_type.into();
        self
    }

    /// Sets the assignee.
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// Trimmed assignee, or `None` when unassigned.
    pub fn assignee_name(&self) -> Option<&str> {
        non_blank(self.assignee.as_deref())
    }

    /// Trimmed circuit, or `None` when unset.
    pub fn circuit_name(&self) -> Option<&str> {
        non_blank(self.circuit.as_deref())
    }

    /// Whether a non-blank assignee is set.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.assignee_name().is_some()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// A spreadsheet-backed cell: text, or a number the sheet typed for us.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Int(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(cell: TextOrNumber) -> Self {
        match cell {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Int(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?
        .map(String::from)
        .unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<TextOrNumber>::deserialize(deserializer)?.map(String::from))
}

/// Decodes a bulk JSON payload into raw records.
///
/// The payload is a JSON array; `null` entries are preserved as `None`
/// so the caller decides how to treat them.
pub fn decode_sessions(json: &str) -> Result<Vec<Option<RawSessionRecord>>, serde_json::Error> {
    serde_json::from_str(json)
}
