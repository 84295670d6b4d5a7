use ccdash_core::comparison::DiffGenerator;
use ccdash_core::{ConfigComparator, ProjectConfig};

use crate::commands::Options;
use crate::commands::common::print_json;
use crate::report;

pub struct Compare;

impl Compare {
    /// Compare two directories, as projects or, with `raw`, by layout
    pub async fn execute(
        left: &str,
        right: &str,
        unified: bool,
        raw: bool,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        if options.verbose {
            eprintln!("Comparing {left} with {right}");
        }

        let (dashboard, _) = options.dashboard()?;

        // Both sides are loaded once so the summary and the unified diff agree
        let (left_config, right_config) = if raw {
            tokio::try_join!(dashboard.load_directory(left), dashboard.load_directory(right))?
        } else {
            tokio::try_join!(dashboard.load_project(left), dashboard.load_project(right))?
        };
        let result = ConfigComparator::compare(&left_config, &right_config);

        if options.json {
            return print_json(&result);
        }

        print!("{}", report::comparison_summary(&result, left, right));

        if unified {
            if let Some(diff) = unified_memory(&left_config, &right_config) {
                println!("\n{diff}");
            }
        }

        Ok(())
    }
}

/// Unified diff of the resolved memory files, `None` unless both sides have one
fn unified_memory(left: &ProjectConfig, right: &ProjectConfig) -> Option<String> {
    let (l, r) = (left.memory.as_ref()?, right.memory.as_ref()?);
    Some(DiffGenerator::unified(
        l.content.as_deref().unwrap_or_default(),
        r.content.as_deref().unwrap_or_default(),
        &l.absolute_path.display().to_string(),
        &r.absolute_path.display().to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    use ccdash_core::project::ProjectAggregator;

    #[test]
    fn test_unified_memory_uses_loaded_content() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = (tmp.path().join("a"), tmp.path().join("b"));
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("CLAUDE.md"), "keep\nold\n").unwrap();
        fs::write(b.join("CLAUDE.md"), "keep\nnew\n").unwrap();

        let left = ProjectAggregator::load_project(&a).unwrap();
        let right = ProjectAggregator::load_project(&b).unwrap();

        // Later edits on disk must not leak into the rendered diff
        fs::write(b.join("CLAUDE.md"), "keep\nchanged later\n").unwrap();

        let diff = unified_memory(&left, &right).unwrap();
        assert!(diff.contains("old"));
        assert!(diff.contains("new"));
        assert!(!diff.contains("changed later"));
    }

    #[test]
    fn test_unified_memory_needs_both_sides() {
        let tmp = TempDir::new().unwrap();
        let (a, b) = (tmp.path().join("a"), tmp.path().join("b"));
        fs::create_dir_all(&a).unwrap();
        fs::create_dir_all(&b).unwrap();
        fs::write(a.join("CLAUDE.md"), "# only left\n").unwrap();

        let left = ProjectAggregator::load_project(&a).unwrap();
        let right = ProjectAggregator::load_project(&b).unwrap();

        assert!(unified_memory(&left, &right).is_none());
    }
}
