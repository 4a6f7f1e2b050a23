use std::collections::HashMap;

use super::AssignmentSource;
use crate::assignment::{ingest, Assignment, AssignmentPatch, RawAssignment};
use crate::error::{Result, SourceError};

/// In-process source keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: HashMap<String, Vec<RawAssignment>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw record for a user. Records are not validated until read.
    pub fn insert_raw(&mut self, user_id: &str, record: RawAssignment) {
        self.records
            .entry(user_id.to_string())
            .or_default()
            .push(record);
    }

    pub fn insert(&mut self, user_id: &str, assignment: &Assignment) {
        self.insert_raw(user_id, RawAssignment::from(assignment));
    }
}

impl AssignmentSource for MemorySource {
    fn get_all(&self, user_id: &str) -> Result<Vec<Assignment>> {
        let raw = self.records.get(user_id).cloned().unwrap_or_default();
        Ok(ingest(raw).accepted)
    }

    fn update(&mut self, user_id: &str, id: &str, patch: &AssignmentPatch) -> Result<()> {
        let not_found = || SourceError::NotFound { id: id.to_string() };
        let records = self.records.get_mut(user_id).ok_or_else(not_found)?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(not_found)?;
        let mut assignment = Assignment::try_from(slot.clone())?;
        assignment.apply(patch);
        *slot = RawAssignment::from(&assignment);
        Ok(())
    }
}
