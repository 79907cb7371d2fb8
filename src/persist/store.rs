//! Snapshot stores: an in-process bundle and a JSON file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use crate::persist::snapshot::Snapshot;

/// Error type for snapshot persistence
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Snapshot format error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Persistence channel for the screen snapshot
pub trait SnapshotStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
    /// `None` means no snapshot was saved: cold start
    fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;
    fn clear(&mut self) -> Result<(), SnapshotError>;
}

/// Snapshot kept in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    saved: Option<Snapshot>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        self.saved = Some(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        Ok(self.saved.clone())
    }

    fn clear(&mut self) -> Result<(), SnapshotError> {
        self.saved = None;
        Ok(())
    }
}

/// Snapshot stored as a JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: io::Error) -> SnapshotError {
        SnapshotError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&mut self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(snapshot)?;
        // Write then rename so a crash never leaves half a snapshot
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|e| self.io_error(e))?;
        fs::rename(&staging, &self.path).map_err(|e| self.io_error(e))?;
        log::debug!("Snapshot saved to {}", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_error(e)),
        };
        Ok(Some(serde_json::from_str(&json)?))
    }

    fn clear(&mut self) -> Result<(), SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}
