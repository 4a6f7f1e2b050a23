use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every gesture transition and completion produces an Event.
/// The UI layer renders from them; the celebration display subscribes to
/// `AssignmentCompleted`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    GestureStarted {
        start_x: f64,
        at: DateTime<Utc>,
    },
    /// Released at or below the threshold; the card snapped back.
    GestureCancelled {
        offset: f64,
        at: DateTime<Utc>,
    },
    /// Released past the threshold; completion fires after `delay_ms`.
    CommitScheduled {
        offset: f64,
        delay_ms: u64,
        at: DateTime<Utc>,
    },
    /// The commit delay elapsed; the completion callback runs now.
    CommitFired {
        at: DateTime<Utc>,
    },
    /// A pending commit was dropped before it fired (item unmounted).
    CommitCancelled {
        at: DateTime<Utc>,
    },
    AssignmentCompleted {
        assignment_id: String,
        at: DateTime<Utc>,
    },
}
