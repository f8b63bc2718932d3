//! JSON file storage for snapshots

use crate::api::DetailRecord;
use crate::snapshot::Snapshot;
use crate::{SnapshotError, SnapshotResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Reads and writes a snapshot file
///
/// The file holds a JSON array of detail objects, pretty-printed with
/// 4-space indentation, and is overwritten in full on every save.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the snapshot, treating a missing file as an empty snapshot
    pub fn load(&self) -> SnapshotResult<Snapshot> {
        if !self.path.exists() {
            tracing::debug!(
                "No snapshot at {}, starting from empty",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|source| SnapshotError::Read {
            path: self.path.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| SnapshotError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes `records` to the snapshot file, replacing any previous content
    pub fn save(&self, records: &[DetailRecord]) -> SnapshotResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| SnapshotError::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let file = fs::File::create(&self.path).map_err(|source| SnapshotError::Write {
            path: self.path.clone(),
            source,
        })?;

        let mut serializer = serde_json::Serializer::with_formatter(
            BufWriter::new(file),
            PrettyFormatter::with_indent(b"    "),
        );
        records.serialize(&mut serializer).map_err(|e| {
            if e.is_io() {
                SnapshotError::Write {
                    path: self.path.clone(),
                    source: io::Error::other(e),
                }
            } else {
                SnapshotError::Serialize(e)
            }
        })?;

        serializer
            .into_inner()
            .flush()
            .map_err(|source| SnapshotError::Write {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(
            "Wrote {} records to {}",
            records.len(),
            self.path.display()
        );

        Ok(())
    }
}
