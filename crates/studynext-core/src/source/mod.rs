//! Assignment data sources.
//!
//! The core never owns assignment data. A source hands out snapshots via
//! `get_all` and accepts partial updates via `update`; callers reload from
//! the source after a failed update instead of patching local state.

mod file;
mod memory;

pub use file::JsonFileSource;
pub use memory::MemorySource;

use crate::assignment::{Assignment, AssignmentPatch};
use crate::error::Result;

/// Collaborator owning assignment records.
pub trait AssignmentSource {
    /// All valid assignments for a user. Malformed records are skipped.
    fn get_all(&self, user_id: &str) -> Result<Vec<Assignment>>;

    /// Apply a partial update to one assignment.
    fn update(&mut self, user_id: &str, id: &str, patch: &AssignmentPatch) -> Result<()>;
}
