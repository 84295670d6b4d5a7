//! Discovery of project directories under workspace roots
//!
//! Each workspace root is walked once, three levels deep, and every entry is
//! tested against the four discovery passes:
//! - `.claude` directories (depth 3): the parent is a project
//! - `.mcp.json` files (depth 3): the containing directory is a project
//! - `CLAUDE.md` files outside `.claude/` (depth 2): the containing directory
//! - `agents/*.md` and `agents/*.json` files (depth 3): the owner of the
//!   `agents` directory, unless it is the home configuration directory
//!
//! Hits are merged by canonical project path, so a directory matched by
//! several passes yields a single draft.

mod passes;
mod walk;


use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use tracing::{debug, warn};

pub use passes::{Hit, match_entry};
pub use walk::walk;

use crate::config::PatternMatcher;
use crate::error::Result;
use crate::model::DiscoveryPass;
use crate::resolver::{self, CLAUDE_DIR};

/// Deepest level any pass looks at
const MAX_DEPTH: usize = 3;

/// A project found by discovery, before its artifacts are loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    /// Canonical project root
    pub path: PathBuf,
    /// Display name
    pub name: String,
    /// Passes that matched, in pass order
    pub discovered_by: Vec<DiscoveryPass>,
    /// Agent files found by the agents pass
    pub agent_files: Vec<PathBuf>,
}

impl ProjectDraft {
    /// Create an empty draft for a project root
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        let name = resolver::project_name(&path);
        Self {
            path,
            name,
            discovered_by: Vec::new(),
            agent_files: Vec::new(),
        }
    }

    /// Merge a hit from `pass` into this draft
    pub fn record(&mut self, pass: DiscoveryPass, hit: Hit) {
        if let Err(pos) = self.discovered_by.binary_search(&pass) {
            self.discovered_by.insert(pos, pass);
        }
        if let Some(file) = hit.agent_file {
            if !self.agent_files.contains(&file) {
                self.agent_files.push(file);
            }
        }
    }
}

/// Result of a discovery run with non-fatal warnings
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Drafts ordered by path, unique by path
    pub projects: Vec<ProjectDraft>,
    /// One entry per workspace root that could not be scanned
    pub warnings: Vec<String>,
}

/// Walks workspace roots for project directories
#[derive(Debug, Clone)]
pub struct WorkspaceScanner {
    home_config: PathBuf,
    matcher: PatternMatcher,
}

impl WorkspaceScanner {
    /// Create a scanner that treats `{home}/.claude` as global configuration
    #[must_use]
    pub fn new(home: &Path) -> Self {
        let home_config = home.join(CLAUDE_DIR);
        Self {
            home_config: canonical(&home_config),
            matcher: PatternMatcher::new(),
        }
    }

    /// Prune walks with the given matcher
    #[must_use]
    pub fn with_matcher(mut self, matcher: PatternMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Discover projects under every root
    ///
    /// A root that is missing or unreadable is logged and recorded as a
    /// warning; the remaining roots are still scanned.
    #[must_use]
    pub fn discover(&self, roots: &[PathBuf]) -> Discovery {
        let mut drafts = BTreeMap::new();
        let mut warnings = Vec::new();

        for root in roots {
            if let Err(e) = self.scan_root(root, &mut drafts) {
                warn!(root = %root.display(), error = %e, "Workspace scan failed");
                warnings.push(format!("Failed to scan workspace {}: {e:#}", root.display()));
            }
        }

        Discovery {
            projects: drafts.into_values().collect(),
            warnings,
        }
    }

    fn scan_root(&self, root: &Path, drafts: &mut BTreeMap<PathBuf, ProjectDraft>) -> Result<()> {
        if !root.is_dir() {
            bail!("not a directory");
        }
        let root = dunce::canonicalize(root)
            .with_context(|| format!("Failed to resolve {}", root.display()))?;
        debug!(root = %root.display(), "Scanning workspace");

        walk(&root, MAX_DEPTH, &self.matcher, |entry| {
            for pass in DiscoveryPass::ALL {
                let Some(hit) = match_entry(pass, entry, &self.home_config) else {
                    continue;
                };
                let path = canonical(&hit.project);
                if path == self.home_config {
                    continue;
                }
                drafts
                    .entry(path.clone())
                    .or_insert_with(|| ProjectDraft::new(path))
                    .record(pass, hit);
            }
        })
    }
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
