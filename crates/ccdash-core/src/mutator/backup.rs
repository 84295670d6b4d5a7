//! Timestamped sibling backup names

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

/// Backup name for `target` at `now`: `<file name>.backup.<YYYYMMDD-HHMMSS-mmm>`
///
/// When that name is taken a numeric suffix is appended.
#[must_use]
pub fn backup_path(target: &Path, now: DateTime<Local>) -> PathBuf {
    let file_name = target
        .file_name()
        .map_or_else(|| "backup".into(), |n| n.to_string_lossy().into_owned());
    let stamp = now.format("%Y%m%d-%H%M%S-%3f");
    let base = format!("{file_name}.backup.{stamp}");

    let candidate = target.with_file_name(&base);
    if !candidate.exists() {
        return candidate;
    }

    (1..)
        .map(|n| target.with_file_name(format!("{base}-{n}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
