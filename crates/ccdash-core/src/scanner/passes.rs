//! Match rules of the four discovery passes

use std::path::{Path, PathBuf};

use walkdir::DirEntry;

use crate::model::DiscoveryPass;
use crate::resolver::{self, AGENTS_DIR, CLAUDE_DIR, MCP_FILE, MEMORY_FILE};

/// A walk entry that marks a project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// Project root the entry belongs to
    pub project: PathBuf,
    /// Agent file to merge into the project (agents pass only)
    pub agent_file: Option<PathBuf>,
}

impl Hit {
    fn project(path: &Path) -> Self {
        Self {
            project: path.to_path_buf(),
            agent_file: None,
        }
    }
}

fn named(path: Option<&Path>, name: &str) -> bool {
    path.and_then(Path::file_name).is_some_and(|n| n == name)
}

/// Test one walk entry against one pass
///
/// `home_config` is the home configuration directory; agents found directly
/// under it are global agents, not a project.
#[must_use]
pub fn match_entry(pass: DiscoveryPass, entry: &DirEntry, home_config: &Path) -> Option<Hit> {
    if entry.depth() == 0 || entry.depth() > pass.max_depth() {
        return None;
    }

    let path = entry.path();
    let is_dir = entry.file_type().is_dir();
    let is_file = entry.file_type().is_file();
    let parent = path.parent()?;

    match pass {
        DiscoveryPass::ClaudeDir => {
            (is_dir && entry.file_name() == CLAUDE_DIR).then(|| Hit::project(parent))
        }
        DiscoveryPass::McpJson => {
            (is_file && entry.file_name() == MCP_FILE).then(|| Hit::project(parent))
        }
        DiscoveryPass::MemoryFile => (is_file
            && entry.file_name() == MEMORY_FILE
            && !named(Some(parent), CLAUDE_DIR))
        .then(|| Hit::project(parent)),
        DiscoveryPass::AgentsDir => {
            if !is_file || !resolver::is_agent_file(path) || !named(Some(parent), AGENTS_DIR) {
                return None;
            }
            let owner = parent.parent()?;
            if owner == home_config {
                return None;
            }
            // agents inside a `.claude` directory belong to that directory's project
            let project = if named(Some(owner), CLAUDE_DIR) {
                owner.parent()?
            } else {
                owner
            };
            Some(Hit {
                project: project.to_path_buf(),
                agent_file: Some(path.to_path_buf()),
            })
        }
    }
}
