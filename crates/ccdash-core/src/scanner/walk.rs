//! Bounded-depth directory walk with pruning and symlink loop detection

use std::path::Path;

use anyhow::anyhow;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

use crate::config::PatternMatcher;
use crate::error::Result;

/// Visit every entry at most `max_depth` levels below `root`
///
/// Symlinks are followed; a link that points back at one of its ancestors is
/// reported by walkdir as a loop and skipped, as are unreadable
/// subdirectories. Entries are visited in file-name order.
///
/// # Errors
///
/// Returns an error only when `root` itself cannot be read.
pub fn walk(
    root: &Path,
    max_depth: usize,
    matcher: &PatternMatcher,
    mut visit: impl FnMut(&DirEntry),
) -> Result<()> {
    let walker = WalkDir::new(root)
        .max_depth(max_depth)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0
                || matcher.should_include(
                    entry.path().strip_prefix(root).unwrap_or(entry.path()),
                    entry.file_type().is_dir(),
                )
        });

    for entry in walker {
        match entry {
            Ok(entry) => visit(&entry),
            Err(e) if e.depth() == 0 => {
                return Err(anyhow!("Failed to read {}: {e}", root.display()));
            }
            Err(e) => {
                if let Some(ancestor) = e.loop_ancestor() {
                    debug!(ancestor = %ancestor.display(), "Skipping symlink loop");
                } else {
                    debug!(error = %e, "Skipping unreadable entry");
                }
            }
        }
    }

    Ok(())
}
