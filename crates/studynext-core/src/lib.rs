//! # StudyNext Core Library
//!
//! This library provides the logic behind the StudyNext homework tracker.
//! Every screen of the app is a thin layer over it, and the standalone CLI
//! binary drives the same library.
//!
//! ## Architecture
//!
//! - **Triage**: pure classification and ordering of assignments into
//!   overdue/today/upcoming, with the evening Tonight Mode filter and a
//!   weekly summary
//! - **Gesture**: a wall-clock-based swipe-to-complete state machine per
//!   list item, plus a cancellable deferred commit for async hosts
//! - **Source**: the assignment data collaborator (`get_all`/`update`)
//! - **Rewards**: XP, levels and streaks derived from completions
//! - **Storage**: TOML configuration and the data directory
//!
//! ## Key Components
//!
//! - [`triage()`]: Dashboard triage of an assignment snapshot
//! - [`SwipeRecognizer`]: Swipe gesture state machine
//! - [`AssignmentSource`]: Trait for assignment data sources
//! - [`Config`]: Application configuration management

pub mod assignment;
pub mod calendar;
pub mod error;
pub mod events;
pub mod gesture;
pub mod rewards;
pub mod source;
pub mod storage;
pub mod triage;

pub use assignment::{Assignment, AssignmentPatch, Priority, RawAssignment};
pub use calendar::{DayCell, MonthGrid};
pub use error::{ConfigError, CoreError, SourceError, ValidationError};
pub use events::Event;
pub use gesture::{CompletionHandler, DeferredCommit, GesturePhase, SwipeConfig, SwipeRecognizer, SwipeToComplete};
pub use rewards::{Celebration, Progress, RewardsConfig};
pub use source::{AssignmentSource, JsonFileSource, MemorySource};
pub use storage::{Config, Profile};
pub use triage::{triage, Bucket, Triage, TriageConfig, TriageEntry, WeekStart, WeeklySummary};
