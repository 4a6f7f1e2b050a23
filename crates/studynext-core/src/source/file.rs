//! JSON-file backed source used by the CLI.
//!
//! Each user gets one file, `<root>/<user_id>.json`, holding an array of
//! raw records. A missing file reads as an empty list.

use std::path::{Path, PathBuf};

use super::AssignmentSource;
use crate::assignment::{ingest, Assignment, AssignmentPatch, RawAssignment};
use crate::error::{Result, SourceError, ValidationError};

#[derive(Debug, Clone)]
pub struct JsonFileSource {
    root: PathBuf,
}

impl JsonFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Source rooted at `<data_dir>/assignments`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::storage::data_dir()?.join("assignments")))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, user_id: &str) -> Result<PathBuf> {
        let valid = !user_id.is_empty()
            && user_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && user_id != "."
            && user_id != "..";
        if !valid {
            return Err(ValidationError::InvalidValue {
                field: "user_id".into(),
                message: format!("'{user_id}' is not a valid user id"),
            }
            .into());
        }
        Ok(self.root.join(format!("{user_id}.json")))
    }

    /// Raw records for a user, including ones that fail validation.
    pub fn read_raw(&self, user_id: &str) -> Result<Vec<RawAssignment>> {
        let path = self.path_for(user_id)?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(SourceError::ReadFailed {
                    location: path.display().to_string(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            SourceError::ReadFailed {
                location: path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    fn write_raw(&self, user_id: &str, records: &[RawAssignment]) -> Result<()> {
        let path = self.path_for(user_id)?;
        let write_failed = |message: String| SourceError::WriteFailed {
            location: path.display().to_string(),
            message,
        };
        std::fs::create_dir_all(&self.root).map_err(|e| write_failed(e.to_string()))?;
        let content = serde_json::to_string_pretty(records)?;
        std::fs::write(&path, content).map_err(|e| write_failed(e.to_string()))?;
        Ok(())
    }

    pub fn insert(&self, user_id: &str, assignment: &Assignment) -> Result<()> {
        let mut records = self.read_raw(user_id)?;
        records.push(RawAssignment::from(assignment));
        self.write_raw(user_id, &records)
    }

    pub fn remove(&self, user_id: &str, id: &str) -> Result<()> {
        let mut records = self.read_raw(user_id)?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(SourceError::NotFound { id: id.to_string() }.into());
        }
        self.write_raw(user_id, &records)
    }
}

impl AssignmentSource for JsonFileSource {
    fn get_all(&self, user_id: &str) -> Result<Vec<Assignment>> {
        Ok(ingest(self.read_raw(user_id)?).accepted)
    }

    fn update(&mut self, user_id: &str, id: &str, patch: &AssignmentPatch) -> Result<()> {
        let mut records = self.read_raw(user_id)?;
        let slot = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| SourceError::NotFound { id: id.to_string() })?;
        let mut assignment = Assignment::try_from(slot.clone())?;
        assignment.apply(patch);
        *slot = RawAssignment::from(&assignment);
        self.write_raw(user_id, &records)
    }
}
