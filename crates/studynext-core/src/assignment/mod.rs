//! Assignment records.
//!
//! An [`Assignment`] is the validated form of a homework record handed
//! out by a data source. Records arrive as [`RawAssignment`] values with a
//! free-form due date and priority; [`ingest`] turns a batch of them into
//! assignments and reports the ones it had to reject.

mod ingest;

pub use ingest::{ingest, parse_due_date, IngestReport, RawAssignment, RejectedRecord};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Priority of an assignment.
///
/// Variants are declared in display precedence, so the derived `Ord`
/// sorts `High` first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Parse a priority label case-insensitively.
    ///
    /// Returns `None` for blank or unknown labels; such records are treated
    /// as having no priority.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

/// Sort rank of an optional priority: high, medium, low, then unspecified.
pub fn priority_rank(priority: Option<Priority>) -> u8 {
    match priority {
        Some(Priority::High) => 0,
        Some(Priority::Medium) => 1,
        Some(Priority::Low) => 2,
        None => 3,
    }
}

/// A validated homework assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: String,
    pub subject: String,
    pub title: String,
    /// Local wall-clock due date.
    pub due_date: NaiveDateTime,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub color: Option<String>,
    /// When the assignment was marked complete, if the source tracks it.
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl Assignment {
    /// Create a new incomplete assignment with a fresh id.
    ///
    /// # Errors
    /// Returns an error if `subject` or `title` is blank.
    pub fn new(
        subject: impl Into<String>,
        title: impl Into<String>,
        due_date: NaiveDateTime,
    ) -> Result<Self, ValidationError> {
        let subject = subject.into();
        let title = title.into();
        if subject.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "subject".into(),
            });
        }
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "title".into(),
            });
        }
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            subject,
            title,
            due_date,
            priority: None,
            completed: false,
            color: None,
            completed_at: None,
        })
    }

    pub fn with_priority(mut self, priority: Option<Priority>) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color;
        self
    }

    pub fn due_day(&self) -> NaiveDate {
        self.due_date.date()
    }

    pub fn priority_rank(&self) -> u8 {
        priority_rank(self.priority)
    }

    /// Apply a partial update.
    pub fn apply(&mut self, patch: &AssignmentPatch) {
        if let Some(ref subject) = patch.subject {
            self.subject = subject.clone();
        }
        if let Some(ref title) = patch.title {
            self.title = title.clone();
        }
        if let Some(due) = patch.due_date {
            self.due_date = due;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(ref color) = patch.color {
            self.color = color.clone();
        }
        if let Some(completed) = patch.completed {
            // Re-completing keeps the original completion time.
            if !(completed && self.completed) {
                self.completed_at = if completed { patch.completed_at } else { None };
            }
            self.completed = completed;
        }
    }
}

/// Partial update for an assignment.
///
/// Only `Some` fields are applied. Nested options (`priority`, `color`)
/// distinguish "leave alone" from "clear".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPatch {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub priority: Option<Option<Priority>>,
    #[serde(default)]
    pub color: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    /// Recorded alongside `completed = Some(true)`.
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl AssignmentPatch {
    /// Patch that marks an assignment complete at `at`.
    pub fn complete(at: NaiveDateTime) -> Self {
        Self {
            completed: Some(true),
            completed_at: Some(at),
            ..Default::default()
        }
    }

    /// Patch that marks an assignment incomplete again.
    pub fn reopen() -> Self {
        Self {
            completed: Some(false),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap()
    }

    #[test]
    fn priority_labels_are_case_insensitive() {
        assert_eq!(Priority::from_label("HIGH"), Some(Priority::High));
        assert_eq!(Priority::from_label(" medium "), Some(Priority::Medium));
        assert_eq!(Priority::from_label("Low"), Some(Priority::Low));
        assert_eq!(Priority::from_label("urgent"), None);
        assert_eq!(Priority::from_label(""), None);
    }

    #[test]
    fn unspecified_priority_ranks_last() {
        assert!(priority_rank(Some(Priority::High)) < priority_rank(Some(Priority::Medium)));
        assert!(priority_rank(Some(Priority::Medium)) < priority_rank(Some(Priority::Low)));
        assert!(priority_rank(Some(Priority::Low)) < priority_rank(None));
    }

    #[test]
    fn new_rejects_blank_title() {
        let err = Assignment::new("Math", "  ", at("2026-02-05T00:00")).unwrap_err();
        assert_eq!(
            err,
            ValidationError::EmptyField {
                field: "title".into()
            }
        );
    }

    #[test]
    fn complete_patch_sets_timestamp_and_reopen_clears_it() {
        let mut a = Assignment::new("Math", "Worksheet", at("2026-02-05T00:00")).unwrap();
        a.apply(&AssignmentPatch::complete(at("2026-02-05T18:30")));
        assert!(a.completed);
        assert_eq!(a.completed_at, Some(at("2026-02-05T18:30")));

        a.apply(&AssignmentPatch::reopen());
        assert!(!a.completed);
        assert_eq!(a.completed_at, None);
    }

    #[test]
    fn completing_twice_keeps_first_timestamp() {
        let mut a = Assignment::new("Math", "Worksheet", at("2026-01-20T00:00")).unwrap();
        a.apply(&AssignmentPatch::complete(at("2026-01-20T18:00")));
        a.apply(&AssignmentPatch::complete(at("2026-02-05T10:00")));
        assert!(a.completed);
        assert_eq!(a.completed_at, Some(at("2026-01-20T18:00")));
    }

    #[test]
    fn patch_can_clear_priority() {
        let mut a = Assignment::new("Math", "Worksheet", at("2026-02-05T00:00"))
            .unwrap()
            .with_priority(Some(Priority::High));
        a.apply(&AssignmentPatch {
            priority: Some(None),
            ..Default::default()
        });
        assert_eq!(a.priority, None);
    }
}
