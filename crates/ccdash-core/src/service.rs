//! Async entry points for dashboard operations
//!
//! Directory walks and file reads run on tokio's blocking pool. Nothing is
//! cached between calls: every operation re-reads the filesystem.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::comparison::{ComparisonResult, ConfigComparator};
use crate::config::{Environment, PatternMatcher, expand_path};
use crate::error::{DashboardError, Result};
use crate::model::{GlobalConfig, ProjectConfig};
use crate::mutator::{ConfigMutator, MutationReport};
use crate::project::ProjectAggregator;
use crate::scanner::WorkspaceScanner;

/// Result of scanning workspace roots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceScan {
    /// Discovered projects ordered by path
    pub projects: Vec<ProjectConfig>,
    /// Home-level configuration
    pub global: GlobalConfig,
    /// Roots that could not be scanned
    pub warnings: Vec<String>,
}

/// Dashboard operations over one home directory
#[derive(Debug, Clone)]
pub struct Dashboard {
    home: PathBuf,
    matcher: PatternMatcher,
}

impl Dashboard {
    /// Create a dashboard for `home`, whose `.claude` is the global config
    #[must_use]
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            matcher: PatternMatcher::new(),
        }
    }

    /// Prune discovery walks with `matcher`
    #[must_use]
    pub fn with_matcher(mut self, matcher: PatternMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Create a dashboard from resolved settings
    #[must_use]
    pub fn from_environment(env: &Environment) -> Self {
        Self::new(env.home.clone()).with_matcher(env.matcher.clone())
    }

    /// Home directory
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Expand `~` in a caller-supplied path
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptyPath`] for a blank path.
    pub fn expand(&self, raw: &str) -> Result<PathBuf> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(DashboardError::EmptyPath.into());
        }
        Ok(expand_path(raw, &self.home))
    }

    /// Discover and load every project under `roots`, plus the global config
    ///
    /// Roots that cannot be scanned are reported in `warnings`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptyWorkspaceList`] when `roots` is empty
    /// and [`DashboardError::EmptyPath`] when a root is blank.
    pub async fn scan_workspaces(&self, roots: &[String]) -> Result<WorkspaceScan> {
        if roots.is_empty() {
            return Err(DashboardError::EmptyWorkspaceList.into());
        }
        let roots = roots
            .iter()
            .map(|root| self.expand(root))
            .collect::<Result<Vec<_>>>()?;

        let scanner = WorkspaceScanner::new(&self.home).with_matcher(self.matcher.clone());
        let discovery = blocking(move || scanner.discover(&roots)).await?;
        debug!(count = discovery.projects.len(), "Discovery finished");

        let mut tasks = JoinSet::new();
        for draft in discovery.projects {
            tasks.spawn_blocking(move || ProjectAggregator::load_draft(&draft));
        }

        let home = self.home.clone();
        let global = blocking(move || ProjectAggregator::load_global(&home)).await?;

        let mut projects = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            projects.push(joined.context("Project load task failed")?);
        }
        projects.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            projects = projects.len(),
            warnings = discovery.warnings.len(),
            "Workspace scan complete"
        );

        Ok(WorkspaceScan {
            projects,
            global,
            warnings: discovery.warnings,
        })
    }

    /// Load one project directory
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptyPath`] or
    /// [`DashboardError::NotADirectory`] for unusable paths.
    pub async fn load_project(&self, path: &str) -> Result<ProjectConfig> {
        let path = self.expand(path)?;
        blocking(move || ProjectAggregator::load_project(&path)).await?
    }

    /// Load `{home}/.claude`
    ///
    /// # Errors
    ///
    /// Returns an error only if the blocking task fails.
    pub async fn load_global(&self) -> Result<GlobalConfig> {
        let home = self.home.clone();
        blocking(move || ProjectAggregator::load_global(&home)).await
    }

    /// Load and compare two project directories
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_project`] for either path.
    pub async fn compare_projects(&self, left: &str, right: &str) -> Result<ComparisonResult> {
        let (left, right) = tokio::try_join!(self.load_project(left), self.load_project(right))?;
        Ok(ConfigComparator::compare(&left, &right))
    }

    /// Compare two arbitrary directories without discovery
    ///
    /// A directory named `.claude` is read with the home-config layout.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptyPath`] or
    /// [`DashboardError::NotADirectory`] for unusable paths.
    pub async fn compare_raw(&self, left: &str, right: &str) -> Result<ComparisonResult> {
        let (left, right) =
            tokio::try_join!(self.load_directory(left), self.load_directory(right))?;
        Ok(ConfigComparator::compare(&left, &right))
    }

    /// Load an arbitrary directory, `.claude` directories with the
    /// home-config layout
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_project`].
    pub async fn load_directory(&self, path: &str) -> Result<ProjectConfig> {
        let path = self.expand(path)?;
        blocking(move || ProjectAggregator::load_directory(&path)).await?
    }

    /// Write `content` to `path`, backing up any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the path is blank or the write fails.
    pub async fn write_file(
        &self,
        path: &str,
        content: Vec<u8>,
        dry_run: bool,
    ) -> Result<MutationReport> {
        let path = self.expand(path)?;
        blocking(move || ConfigMutator::new(dry_run).write_with_backup(&path, &content)).await?
    }

    /// Copy `source` over `dest`, backing up any existing `dest`
    ///
    /// # Errors
    ///
    /// Returns an error if a path is blank, `source` is not a file or the
    /// write fails.
    pub async fn copy_file(
        &self,
        source: &str,
        dest: &str,
        dry_run: bool,
    ) -> Result<MutationReport> {
        let source = self.expand(source)?;
        let dest = self.expand(dest)?;
        blocking(move || ConfigMutator::new(dry_run).copy_with_backup(&source, &dest)).await?
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("Blocking task failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DiscoveryPass;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn home() -> (TempDir, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let path = dunce::canonicalize(tmp.path()).unwrap();
        (tmp, path)
    }

    #[tokio::test]
    async fn test_scan_expands_tilde_and_loads_global() {
        let (_tmp, home) = home();
        write(&home, "workspace/app/CLAUDE.md", "# app");
        write(&home, "workspace/tool/.mcp.json", r#"{"mcpServers":{"fs":{"command":"npx"}}}"#);
        write(&home, ".claude/CLAUDE.md", "# global");

        let scan = Dashboard::new(&home)
            .scan_workspaces(&["~/workspace".to_string()])
            .await
            .unwrap();

        let names: Vec<_> = scan.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["app", "tool"]);
        assert_eq!(scan.projects[1].mcp_servers[0].server_name, "fs");
        assert_eq!(scan.projects[0].discovered_by, [DiscoveryPass::MemoryFile]);
        assert_eq!(scan.global.name, "Global");
        assert!(scan.global.memory.is_some());
        assert!(scan.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_scan_skips_missing_root() {
        let (_tmp, home) = home();
        write(&home, "workspace/app/CLAUDE.md", "# app");

        let scan = Dashboard::new(&home)
            .scan_workspaces(&["/nonexistent/path".to_string(), "~/workspace".to_string()])
            .await
            .unwrap();

        assert_eq!(scan.projects.len(), 1);
        assert_eq!(scan.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_scan_is_idempotent() {
        let (_tmp, home) = home();
        write(&home, "workspace/a/.claude/settings.json", r#"{"x":1}"#);
        write(&home, "workspace/b/agents/helper.md", "# helper");
        let dashboard = Dashboard::new(&home);
        let roots = ["~/workspace".to_string()];

        let first = dashboard.scan_workspaces(&roots).await.unwrap();
        let second = dashboard.scan_workspaces(&roots).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_scan_rejects_empty_input() {
        let dashboard = Dashboard::new("/home/dev");

        let err = dashboard.scan_workspaces(&[]).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::EmptyWorkspaceList)
        );

        let err = dashboard.scan_workspaces(&[" ".to_string()]).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::EmptyPath)
        );
    }

    #[tokio::test]
    async fn test_load_project_rejects_missing_dir() {
        let (_tmp, home) = home();
        let err = Dashboard::new(&home)
            .load_project("~/nope")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DashboardError>(),
            Some(DashboardError::NotADirectory(_))
        ));
    }

    #[tokio::test]
    async fn test_compare_projects() {
        let (_tmp, home) = home();
        write(&home, "a/.claude/settings.json", r#"{"a":1,"b":2}"#);
        write(&home, "b/.claude/settings.json", r#"{"b":3,"c":4}"#);

        let result = Dashboard::new(&home)
            .compare_projects("~/a", "~/b")
            .await
            .unwrap();

        assert!(result.settings.changed.contains("settings.json"));
    }

    #[tokio::test]
    async fn test_compare_raw_with_home_config() {
        let (_tmp, home) = home();
        write(&home, ".claude/agents/shared.md", "# v1");
        write(&home, "proj/.claude/agents/shared.md", "# v2");

        let result = Dashboard::new(&home)
            .compare_raw("~/.claude", "~/proj")
            .await
            .unwrap();

        assert!(result.agents.changed.contains("shared.md"));
    }

    #[tokio::test]
    async fn test_write_and_copy() {
        let (_tmp, home) = home();
        let dashboard = Dashboard::new(&home);
        write(&home, "src/CLAUDE.md", "# src");

        let report = dashboard
            .write_file("~/dest/CLAUDE.md", b"# first".to_vec(), false)
            .await
            .unwrap();
        assert!(report.backup.is_none());

        let report = dashboard
            .copy_file("~/src/CLAUDE.md", "~/dest/CLAUDE.md", false)
            .await
            .unwrap();
        assert!(report.backup.is_some());
        assert_eq!(fs::read_to_string(home.join("dest/CLAUDE.md")).unwrap(), "# src");
    }
}
