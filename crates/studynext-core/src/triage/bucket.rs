//! Due-date buckets and the evening display filter.

use chrono::{Days, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Where an active assignment falls relative to the current day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Due before the start of today.
    Overdue,
    /// Due some time today, including earlier today.
    Today,
    /// Due after today.
    Upcoming,
}

impl Bucket {
    pub fn classify(due: NaiveDateTime, now: NaiveDateTime) -> Self {
        let today = now.date();
        let due_day = due.date();
        if due_day < today {
            Bucket::Overdue
        } else if due_day == today {
            Bucket::Today
        } else {
            Bucket::Upcoming
        }
    }

    /// Human-readable status label for list rows.
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Overdue => "Overdue",
            Bucket::Today => "Due today",
            Bucket::Upcoming => "Upcoming",
        }
    }
}

/// Evening display policy.
///
/// From `start_hour` onwards only tomorrow's items stay visible among the
/// upcoming ones. Overdue and today items are never hidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TonightMode {
    pub enabled: bool,
    pub start_hour: u32,
}

impl Default for TonightMode {
    fn default() -> Self {
        Self {
            enabled: true,
            start_hour: 19,
        }
    }
}

impl TonightMode {
    pub fn is_active(&self, now: NaiveDateTime) -> bool {
        self.enabled && now.hour() >= self.start_hour
    }

    /// Whether an item in `bucket`, due at `due`, stays on screen at `now`.
    pub fn shows(&self, bucket: Bucket, due: NaiveDateTime, now: NaiveDateTime) -> bool {
        if bucket != Bucket::Upcoming || !self.is_active(now) {
            return true;
        }
        now.date().checked_add_days(Days::new(1)) == Some(due.date())
    }
}
