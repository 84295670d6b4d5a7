//! Writing configuration files with a backup of what they replace
//!
//! Every mutation of a target file holds that file's lock from the backup
//! copy through the final write.

mod backup;
mod locks;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Local;
use serde::Serialize;
use tracing::info;

pub use backup::backup_path;
pub use locks::FileLock;

use crate::error::{DashboardError, Result};

/// What a mutation did, or would do in dry-run mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReport {
    /// File that was written
    pub target: PathBuf,
    /// Copy of the previous content, when the target existed
    pub backup: Option<PathBuf>,
    /// Bytes written to the target
    pub bytes_written: u64,
    /// Whether the disk was left untouched
    pub dry_run: bool,
}

/// Writes and copies configuration files
pub struct ConfigMutator {
    dry_run: bool,
}

impl Default for ConfigMutator {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ConfigMutator {
    /// Create a new mutator
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write `content` to `target`, first backing up any existing file
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptyPath`] for an empty target, and an
    /// error if the target is a directory or any file operation fails.
    pub fn write_with_backup(&self, target: &Path, content: &[u8]) -> Result<MutationReport> {
        if target.as_os_str().is_empty() {
            return Err(DashboardError::EmptyPath.into());
        }
        if target.is_dir() {
            bail!("Cannot write to a directory: {}", target.display());
        }

        let lock = FileLock::for_path(target);
        let _guard = lock.acquire();

        let backup = target
            .exists()
            .then(|| backup_path(target, Local::now()));

        let report = MutationReport {
            target: target.to_path_buf(),
            backup,
            bytes_written: content.len() as u64,
            dry_run: self.dry_run,
        };

        if self.dry_run {
            info!(target = %target.display(), "[DRY RUN] Would write");
            return Ok(report);
        }

        if let Some(backup) = &report.backup {
            fs::copy(target, backup).with_context(|| {
                format!("Failed to back up {} to {}", target.display(), backup.display())
            })?;
            info!(target = %target.display(), backup = %backup.display(), "Backed up");
        }

        if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::write(target, content)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        info!(target = %target.display(), bytes = report.bytes_written, "Wrote file");

        Ok(report)
    }

    /// Copy `source` over `dest`, first backing up any existing `dest`
    ///
    /// # Errors
    ///
    /// Returns an error if `source` cannot be read or the write fails.
    pub fn copy_with_backup(&self, source: &Path, dest: &Path) -> Result<MutationReport> {
        if source.as_os_str().is_empty() {
            return Err(DashboardError::EmptyPath.into());
        }
        if !source.is_file() {
            bail!("Source is not a file: {}", source.display());
        }

        let content =
            fs::read(source).with_context(|| format!("Failed to read {}", source.display()))?;

        self.write_with_backup(dest, &content)
    }
}
