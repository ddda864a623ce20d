//! Durable storage for the history log.
//!
//! Persistence is whole-set: `save` overwrites everything the store holds
//! and `load` returns the last saved set. The history store treats failures
//! here as warnings, not errors; in-memory state stays authoritative for the
//! lifetime of the process.

use std::path::PathBuf;

use crate::history::HistoryEntry;

/// Errors from the durable history store.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Whole-set persistence for history entries.
pub trait HistoryPersistence: Send + Sync {
    /// Load the previously saved set. An absent backing file is not an
    /// error; implementations return an empty set.
    fn load(&self) -> Result<Vec<HistoryEntry>, PersistError>;

    /// Overwrite the saved set with `entries`.
    fn save(&self, entries: &[HistoryEntry]) -> Result<(), PersistError>;
}

/// JSON-file implementation with whole-file overwrite semantics.
pub struct JsonHistoryFile {
    path: PathBuf,
}

impl JsonHistoryFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryPersistence for JsonHistoryFile {
    fn load(&self) -> Result<Vec<HistoryEntry>, PersistError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, entries: &[HistoryEntry]) -> Result<(), PersistError> {
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
