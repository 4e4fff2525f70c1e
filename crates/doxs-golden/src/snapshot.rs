//! Snapshot management for golden tests
//!
//! A snapshot is the exact docstring text a case renders to, stored as
//! `<snapshot_dir>/<category>/<name>.txt`.

use crate::{GoldenError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use walkdir::WalkDir;

const SNAPSHOT_EXTENSION: &str = "txt";

/// Manages reading and writing snapshots
pub struct SnapshotManager {
    snapshot_dir: PathBuf,
}

impl SnapshotManager {
    /// Create a new snapshot manager
    pub fn new(snapshot_dir: impl AsRef<Path>) -> Self {
        Self {
            snapshot_dir: snapshot_dir.as_ref().to_path_buf(),
        }
    }

    /// Load a snapshot from disk
    pub fn load(&self, name: &str) -> Result<String> {
        let path = self.snapshot_path(name);

        if !path.exists() {
            return Err(GoldenError::CorpusError(format!(
                "Snapshot '{}' not found at {:?}",
                name, path
            )));
        }

        Ok(fs::read_to_string(&path)?)
    }

    /// Write a snapshot, creating parent directories
    pub fn save(&self, name: &str, content: &str) -> Result<()> {
        let path = self.snapshot_path(name);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&path, content)?;
        Ok(())
    }

    /// Replace an existing snapshot, keeping a backup of the old one
    pub fn update(&self, name: &str, content: &str) -> Result<()> {
        self.backup(name)?;
        self.save(name, content)
    }

    /// Create a new snapshot; fails if one already exists
    pub fn create(&self, name: &str, content: &str) -> Result<()> {
        if self.exists(name) {
            return Err(GoldenError::CorpusError(format!(
                "Snapshot '{}' already exists",
                name
            )));
        }
        self.save(name, content)
    }

    /// Check if a snapshot exists
    pub fn exists(&self, name: &str) -> bool {
        self.snapshot_path(name).exists()
    }

    /// List all snapshots as `category/name`
    pub fn list(&self) -> Result<Vec<String>> {
        let mut snapshots = Vec::new();

        if !self.snapshot_dir.exists() {
            return Ok(snapshots);
        }

        for entry in WalkDir::new(&self.snapshot_dir).into_iter().filter_map(|e| e.ok()) {
            let path = entry.path();
            if !path.is_file()
                || path.extension().and_then(|s| s.to_str()) != Some(SNAPSHOT_EXTENSION)
            {
                continue;
            }
            if let Ok(relative) = path.with_extension("").strip_prefix(&self.snapshot_dir) {
                let name: Vec<String> = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect();
                snapshots.push(name.join("/"));
            }
        }

        snapshots.sort();
        Ok(snapshots)
    }

    /// Delete a snapshot
    pub fn delete(&self, name: &str) -> Result<()> {
        let path = self.snapshot_path(name);

        if path.exists() {
            fs::remove_file(path)?;
        }

        Ok(())
    }

    /// Get the path for a snapshot
    fn snapshot_path(&self, name: &str) -> PathBuf {
        let suffix = format!(".{}", SNAPSHOT_EXTENSION);
        let filename = if name.ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{}{}", name, suffix)
        };

        self.snapshot_dir.join(filename)
    }

    /// Create a backup of a snapshot before updating
    pub fn backup(&self, name: &str) -> Result<()> {
        let source = self.snapshot_path(name);

        if !source.exists() {
            return Ok(());
        }

        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let mut backup_path = source.clone().into_os_string();
        backup_path.push(format!(".backup.{}", stamp));

        fs::copy(source, backup_path)?;
        Ok(())
    }
}

/// Normalize line endings and guarantee a single trailing newline
pub fn normalize_text(text: &str) -> String {
    let mut normalized = text.replace("\r\n", "\n");
    while normalized.ends_with("\n\n") {
        normalized.pop();
    }
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    normalized
}
