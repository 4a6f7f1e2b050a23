//! Assignment triage for the dashboard.
//!
//! Triage is a pure function of an assignment snapshot and a reference
//! time:
//!
//! ```text
//! assignments -> active set -> display order -> bucket -> tonight filter
//! ```
//!
//! - The active set drops completed records.
//! - Display order is due date ascending, ties broken by priority
//!   (high, medium, low, unspecified). The sort is stable, so records
//!   that tie on both keep their source order.
//! - Buckets and the evening filter are derived views; they never
//!   reorder the active set.
//!
//! Nothing here does I/O or keeps state, so it is safe to re-run on every
//! render with a fresh snapshot.

mod bucket;
mod weekly;

pub use bucket::{Bucket, TonightMode};
pub use weekly::{weekly_summary, WeekStart, WeeklySummary};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;
use crate::error::ConfigError;

/// Triage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageConfig {
    #[serde(default = "default_true")]
    pub tonight_mode: bool,
    /// Hour of day (0-23) from which Tonight Mode applies.
    #[serde(default = "default_tonight_start_hour")]
    pub tonight_start_hour: u32,
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

fn default_true() -> bool {
    true
}
fn default_tonight_start_hour() -> u32 {
    19
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            tonight_mode: true,
            tonight_start_hour: default_tonight_start_hour(),
            week_starts_on: WeekStart::default(),
        }
    }
}

impl TriageConfig {
    pub fn tonight(&self) -> TonightMode {
        TonightMode {
            enabled: self.tonight_mode,
            start_hour: self.tonight_start_hour,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tonight_start_hour > 23 {
            return Err(ConfigError::InvalidValue {
                key: "triage.tonight_start_hour".into(),
                message: format!("expected 0-23, got {}", self.tonight_start_hour),
            });
        }
        Ok(())
    }
}

/// An active assignment with its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriageEntry {
    #[serde(flatten)]
    pub assignment: Assignment,
    pub bucket: Bucket,
}

/// Per-bucket counts over the active set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BucketCounts {
    pub overdue: usize,
    pub today: usize,
    pub upcoming: usize,
}

impl BucketCounts {
    fn add(&mut self, bucket: Bucket) {
        match bucket {
            Bucket::Overdue => self.overdue += 1,
            Bucket::Today => self.today += 1,
            Bucket::Upcoming => self.upcoming += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.overdue + self.today + self.upcoming
    }
}

/// Result of triaging a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Triage {
    pub evaluated_at: NaiveDateTime,
    /// Whether the evening filter was applied to `visible`.
    pub tonight_mode: bool,
    /// Every active assignment in display order.
    pub ordered: Vec<TriageEntry>,
    /// `ordered` after the evening filter.
    pub visible: Vec<TriageEntry>,
    /// Counts over `ordered`.
    pub counts: BucketCounts,
}

impl Triage {
    pub fn in_bucket(&self, bucket: Bucket) -> impl Iterator<Item = &TriageEntry> {
        self.visible.iter().filter(move |e| e.bucket == bucket)
    }

    /// Number of active assignments hidden by the evening filter.
    pub fn hidden(&self) -> usize {
        self.ordered.len() - self.visible.len()
    }
}

/// Incomplete assignments, in source order.
pub fn active_set(assignments: &[Assignment]) -> Vec<&Assignment> {
    assignments.iter().filter(|a| !a.completed).collect()
}

/// Stable sort by due date, then priority.
pub fn sort_for_display(items: &mut [&Assignment]) {
    items.sort_by_key(|a| (a.due_date, a.priority_rank()));
}

/// Triage a snapshot of assignments at `now`.
pub fn triage(assignments: &[Assignment], now: NaiveDateTime, config: &TriageConfig) -> Triage {
    let mut active = active_set(assignments);
    sort_for_display(&mut active);

    let tonight = config.tonight();
    let mut counts = BucketCounts::default();
    let mut ordered = Vec::with_capacity(active.len());
    let mut visible = Vec::with_capacity(active.len());

    for assignment in active {
        let bucket = Bucket::classify(assignment.due_date, now);
        counts.add(bucket);
        let entry = TriageEntry {
            assignment: assignment.clone(),
            bucket,
        };
        if tonight.shows(bucket, assignment.due_date, now) {
            visible.push(entry.clone());
        }
        ordered.push(entry);
    }

    let tonight_mode = tonight.is_active(now);
    tracing::debug!(
        active = ordered.len(),
        visible = visible.len(),
        tonight_mode,
        "triaged assignments"
    );

    Triage {
        evaluated_at: now,
        tonight_mode,
        ordered,
        visible,
        counts,
    }
}
