//! Validation of raw records coming from a data source.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{Assignment, Priority};
use crate::error::ValidationError;

/// An assignment record as stored by a data source, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAssignment {
    pub id: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub title: String,
    pub due_date: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl From<&Assignment> for RawAssignment {
    fn from(a: &Assignment) -> Self {
        Self {
            id: a.id.clone(),
            subject: a.subject.clone(),
            title: a.title.clone(),
            due_date: a.due_date.format(CANONICAL_FORMAT).to_string(),
            priority: a.priority.map(|p| p.as_str().to_string()),
            completed: a.completed,
            color: a.color.clone(),
            completed_at: a
                .completed_at
                .map(|t| t.format(CANONICAL_FORMAT).to_string()),
        }
    }
}

impl TryFrom<RawAssignment> for Assignment {
    type Error = ValidationError;

    fn try_from(raw: RawAssignment) -> Result<Self, Self::Error> {
        let due_date = parse_due_date(&raw.due_date).ok_or_else(|| {
            ValidationError::InvalidDueDate {
                id: raw.id.clone(),
                value: raw.due_date.clone(),
            }
        })?;
        // A bad completion stamp only costs streak accuracy; keep the record.
        let completed_at = raw.completed_at.as_deref().and_then(parse_due_date);
        Ok(Assignment {
            id: raw.id,
            subject: raw.subject,
            title: raw.title,
            due_date,
            priority: raw.priority.as_deref().and_then(Priority::from_label),
            completed: raw.completed,
            color: raw.color.filter(|c| !c.trim().is_empty()),
            completed_at: if raw.completed { completed_at } else { None },
        })
    }
}

const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse a due date in any of the accepted formats.
///
/// Accepts a bare date (midnight), local date-times with or without
/// seconds, and RFC 3339 timestamps (kept as the wall clock of their own
/// offset).
pub fn parse_due_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_local())
}

/// A record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    pub id: String,
    pub reason: String,
}

/// Outcome of validating a batch of raw records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub accepted: Vec<Assignment>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validate a batch of raw records.
///
/// Each record is judged on its own: a malformed record is rejected and
/// logged, the rest of the batch goes through in its original order.
pub fn ingest(raw: impl IntoIterator<Item = RawAssignment>) -> IngestReport {
    let mut report = IngestReport::default();
    for record in raw {
        let id = record.id.clone();
        match Assignment::try_from(record) {
            Ok(assignment) => report.accepted.push(assignment),
            Err(err) => {
                tracing::warn!(assignment_id = %id, error = %err, "rejecting assignment record");
                report.rejected.push(RejectedRecord {
                    id,
                    reason: err.to_string(),
                });
            }
        }
    }
    report
}
