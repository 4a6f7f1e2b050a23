//! Swipe-to-complete recognizer.
//!
//! The recognizer is a wall-clock-based state machine for one list item.
//! It does not use internal threads - the caller passes the current time
//! (epoch milliseconds) into `pointer_up` and `tick`, and must call
//! `tick()` while a commit is pending.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Dragging -> Idle                 (released at/below threshold)
//! Idle -> Dragging -> Committing -> Idle   (released past threshold)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut swipe = SwipeRecognizer::new(SwipeConfig::default());
//! swipe.pointer_down(10.0);
//! swipe.pointer_move(150.0);
//! swipe.pointer_up(now_ms);
//! // Later:
//! if let Some(Event::CommitFired { .. }) = swipe.tick(now_ms) { /* complete */ }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePhase {
    Idle,
    Dragging,
    /// Released past the threshold, waiting for the commit delay.
    Committing,
}

/// Swipe thresholds and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwipeConfig {
    /// Offset that must be exceeded on release to commit.
    #[serde(default = "default_commit_threshold")]
    pub commit_threshold: f64,
    /// Offset the card flies out to while committing.
    #[serde(default = "default_fly_out_offset")]
    pub fly_out_offset: f64,
    /// Delay between release and the completion callback.
    #[serde(default = "default_commit_delay_ms")]
    pub commit_delay_ms: u64,
}

fn default_commit_threshold() -> f64 {
    100.0
}
fn default_fly_out_offset() -> f64 {
    500.0
}
fn default_commit_delay_ms() -> u64 {
    300
}

/// Upper bound for `commit_delay_ms`.
pub const MAX_COMMIT_DELAY_MS: u64 = 10_000;

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            commit_threshold: default_commit_threshold(),
            fly_out_offset: default_fly_out_offset(),
            commit_delay_ms: default_commit_delay_ms(),
        }
    }
}

impl SwipeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.commit_threshold.is_finite() || self.commit_threshold < 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "swipe.commit_threshold".into(),
                message: "must be a non-negative number".into(),
            });
        }
        if !self.fly_out_offset.is_finite() || self.fly_out_offset <= self.commit_threshold {
            return Err(ConfigError::InvalidValue {
                key: "swipe.fly_out_offset".into(),
                message: "must be greater than swipe.commit_threshold".into(),
            });
        }
        if self.commit_delay_ms > MAX_COMMIT_DELAY_MS {
            return Err(ConfigError::InvalidValue {
                key: "swipe.commit_delay_ms".into(),
                message: format!("expected at most {MAX_COMMIT_DELAY_MS}, got {}", self.commit_delay_ms),
            });
        }
        Ok(())
    }
}

/// Gesture state for one list item.
///
/// Serializable for inspection only; a recognizer is always built with
/// [`SwipeRecognizer::new`] so its phase and deadline stay consistent.
#[derive(Debug, Clone, Serialize)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    phase: GesturePhase,
    start_x: f64,
    /// Horizontal displacement, never negative.
    offset: f64,
    /// Epoch ms at which a pending commit fires (only set while Committing).
    commit_at_ms: Option<u64>,
}

impl SwipeRecognizer {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
            start_x: 0.0,
            offset: 0.0,
            commit_at_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == GesturePhase::Dragging
    }

    pub fn is_committing(&self) -> bool {
        self.phase == GesturePhase::Committing
    }

    pub fn commit_at_ms(&self) -> Option<u64> {
        self.commit_at_ms
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    /// 0.0 .. 1.0 progress towards the commit threshold, for the reveal
    /// behind the card.
    pub fn threshold_progress(&self) -> f64 {
        if self.config.commit_threshold <= 0.0 {
            return if self.offset > 0.0 { 1.0 } else { 0.0 };
        }
        (self.offset / self.config.commit_threshold).min(1.0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn pointer_down(&mut self, x: f64) -> Option<Event> {
        match self.phase {
            GesturePhase::Idle => {
                if !x.is_finite() {
                    return None;
                }
                self.phase = GesturePhase::Dragging;
                self.start_x = x;
                self.offset = 0.0;
                Some(Event::GestureStarted {
                    start_x: x,
                    at: Utc::now(),
                })
            }
            // One session per item; the item is about to go away while committing.
            GesturePhase::Dragging | GesturePhase::Committing => None,
        }
    }

    /// Update the offset from the pointer position. Returns the new offset.
    ///
    /// Leftward motion clamps to zero; rightward motion is not bounded
    /// while dragging.
    pub fn pointer_move(&mut self, x: f64) -> f64 {
        if self.phase == GesturePhase::Dragging && x.is_finite() {
            self.offset = (x - self.start_x).max(0.0);
        }
        self.offset
    }

    pub fn pointer_up(&mut self, now_ms: u64) -> Option<Event> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        let released_at = self.offset;
        if released_at > self.config.commit_threshold {
            self.phase = GesturePhase::Committing;
            self.offset = self.config.fly_out_offset;
            self.commit_at_ms = Some(now_ms.saturating_add(self.config.commit_delay_ms));
            tracing::debug!(offset = released_at, "swipe committed, completion pending");
            Some(Event::CommitScheduled {
                offset: released_at,
                delay_ms: self.config.commit_delay_ms,
                at: Utc::now(),
            })
        } else {
            self.reset();
            Some(Event::GestureCancelled {
                offset: released_at,
                at: Utc::now(),
            })
        }
    }

    /// The platform aborted the touch (e.g. scroll took over). Snaps back.
    pub fn pointer_cancel(&mut self) -> Option<Event> {
        if self.phase != GesturePhase::Dragging {
            return None;
        }
        let offset = self.offset;
        self.reset();
        Some(Event::GestureCancelled {
            offset,
            at: Utc::now(),
        })
    }

    /// Call periodically while committing. Returns `Some(Event::CommitFired)`
    /// exactly once, when the commit delay has elapsed; the recognizer is
    /// back in `Idle` with a zero offset by then.
    pub fn tick(&mut self, now_ms: u64) -> Option<Event> {
        match (self.phase, self.commit_at_ms) {
            (GesturePhase::Committing, Some(deadline)) if now_ms >= deadline => {
                self.reset();
                Some(Event::CommitFired { at: Utc::now() })
            }
            _ => None,
        }
    }

    /// Drop a pending commit without firing it (the item was unmounted).
    pub fn cancel(&mut self) -> Option<Event> {
        match self.phase {
            GesturePhase::Committing => {
                self.reset();
                tracing::debug!("pending swipe commit cancelled");
                Some(Event::CommitCancelled { at: Utc::now() })
            }
            GesturePhase::Dragging => {
                self.reset();
                None
            }
            GesturePhase::Idle => None,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.start_x = 0.0;
        self.offset = 0.0;
        self.commit_at_ms = None;
    }
}

impl Default for SwipeRecognizer {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}
