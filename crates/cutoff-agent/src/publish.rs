//! Snapshot publication to a static file tree.
//!
//! Two sinks per tick, same content:
//! - `{root}/current/cutoffs.json`: latest snapshot, overwritten every tick
//! - `{root}/{YYYY-MM-DD}/cutoffs.json`: UTC-dated archive, one per day

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use ladder::Snapshot;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

const SNAPSHOT_FILE: &str = "cutoffs.json";
const CURRENT_DIR: &str = "current";

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to serialize snapshot: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes snapshots under a root directory.
#[derive(Debug, Clone)]
pub struct SnapshotPublisher {
    root: PathBuf,
}

impl SnapshotPublisher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the always-current snapshot.
    pub fn current_path(&self) -> PathBuf {
        self.root.join(CURRENT_DIR).join(SNAPSHOT_FILE)
    }

    /// Path of the archive snapshot for the UTC day of `at`.
    pub fn archive_path(&self, at: DateTime<Utc>) -> PathBuf {
        self.root
            .join(at.format("%Y-%m-%d").to_string())
            .join(SNAPSHOT_FILE)
    }

    /// Publish `snapshot` to the current and dated locations.
    ///
    /// Returns the written paths, current first.
    pub fn publish(&self, snapshot: &Snapshot) -> Result<Vec<PathBuf>, PublishError> {
        self.publish_at(snapshot, Utc::now())
    }

    /// Publish as if the clock read `at`.
    pub fn publish_at(
        &self,
        snapshot: &Snapshot,
        at: DateTime<Utc>,
    ) -> Result<Vec<PathBuf>, PublishError> {
        let json = render(snapshot)?;
        let paths = [self.current_path(), self.archive_path(at)];

        for path in &paths {
            write_file(path, &json)?;
        }

        info!(
            regions = snapshot.len(),
            current = %paths[0].display(),
            archive = %paths[1].display(),
            "published cutoff snapshot"
        );
        Ok(paths.to_vec())
    }
}

/// Pretty JSON with four-space indentation.
pub fn render(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    snapshot.serialize(&mut ser)?;
    Ok(out)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), PublishError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| PublishError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    // `current/` is polled while it is replaced: write beside it, then rename.
    let temp_path = path.with_extension("json.tmp");
    std::fs::write(&temp_path, contents).map_err(|source| PublishError::Write {
        path: temp_path.clone(),
        source,
    })?;
    std::fs::rename(&temp_path, path).map_err(|source| {
        let _ = std::fs::remove_file(&temp_path);
        PublishError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}
