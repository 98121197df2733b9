//! Single-slot snapshot storage
//!
//! The planner keeps exactly one snapshot: the serialized document stored
//! under a fixed key. Operations are synchronous and fallible; callers
//! decide how a failure degrades.
//!
//! The file-backed store keeps the slot at `<dir>/<key>.json`.

use crate::error::Result;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Storage boundary for the planner snapshot
pub trait SnapshotStore: Send + Sync {
    /// Read the slot; `None` when nothing is stored
    fn read(&self) -> Result<Option<String>>;

    /// Replace the slot with a complete snapshot
    fn write(&self, contents: &str) -> Result<()>;

    /// Delete the slot; deleting an empty slot succeeds
    fn remove(&self) -> Result<()>;
}

/// Snapshot slot stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Create a store for `key` inside `dir`
    pub fn new(dir: &Path, key: &str) -> Self {
        Self {
            path: dir.join(format!("{}.json", key)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, contents: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Write to temp file first (atomic write)
        let temp_path = self.path.with_extension("tmp");
        let written = write_synced(&temp_path, contents)
            .and_then(|()| fs::rename(&temp_path, &self.path));
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&temp_path) {
                if cleanup.kind() != ErrorKind::NotFound {
                    tracing::warn!("Failed to remove temp snapshot {:?}: {}", temp_path, cleanup);
                }
            }
            return Err(e.into());
        }

        tracing::debug!("Wrote snapshot: {:?} ({} bytes)", self.path, contents.len());

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!("Deleted snapshot: {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()), // Already deleted
            Err(e) => Err(e.into()),
        }
    }
}

fn write_synced(path: &Path, contents: &str) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()
}
