//! Candidate locations for each artifact kind
//!
//! Two layouts exist:
//! - **Project**: a project root holding `CLAUDE.md`, `.mcp.json` and a
//!   `.claude/` directory (settings, agents, hooks, legacy memory file).
//! - **Config dir**: a directory that *is* a `.claude` directory, such as
//!   `~/.claude`. Everything lives directly inside it.
//!
//! Candidate lists are ordered highest precedence first. Memory is the only
//! kind where precedence picks a single winner; every other kind lists all
//! candidates that exist.

use std::path::{Path, PathBuf};

use crate::model::Scope;

/// Name of the per-project and per-home configuration directory
pub const CLAUDE_DIR: &str = ".claude";
/// Memory file name
pub const MEMORY_FILE: &str = "CLAUDE.md";
/// Local memory override file name
pub const LOCAL_MEMORY_FILE: &str = "CLAUDE.local.md";
/// Project MCP descriptor file name
pub const MCP_FILE: &str = ".mcp.json";
/// Desktop configuration file that may carry `mcpServers`
pub const DESKTOP_CONFIG_FILE: &str = "claude_desktop_config.json";
/// Settings file whose `hooks` key is surfaced as a hook artifact
pub const HOOKS_SETTINGS_FILE: &str = "settings.json";
/// Agents directory name
pub const AGENTS_DIR: &str = "agents";
/// Hooks directory name
pub const HOOKS_DIR: &str = "hooks";

/// Project settings files, in single-file priority order
const PROJECT_SETTINGS_FILES: [&str; 3] = ["settings.local.json", "settings.json", "config.json"];

/// Home settings files
const GLOBAL_SETTINGS_FILES: [&str; 4] = [
    "settings.json",
    "settings.local.json",
    DESKTOP_CONFIG_FILE,
    "config.json",
];

/// A path to probe and the tier it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path to probe
    pub path: PathBuf,
    /// Tier recorded on the artifact when the path exists
    pub scope: Scope,
}

impl Candidate {
    fn new(path: PathBuf, scope: Scope) -> Self {
        Self { path, scope }
    }
}

/// An MCP-bearing file and its human-readable label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct McpSource {
    /// Path to probe
    pub path: PathBuf,
    /// Label attached to every server parsed from this file
    pub label: &'static str,
    /// Tier of the file
    pub scope: Scope,
}

/// Directory layout being resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Project root with a nested `.claude/`
    Project,
    /// A `.claude` directory itself
    ConfigDir,
}

/// Resolves candidate paths under one root
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    layout: Layout,
}

impl PathResolver {
    /// Resolver for a project root
    #[must_use]
    pub fn project(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            layout: Layout::Project,
        }
    }

    /// Resolver for a configuration directory such as `~/.claude`
    #[must_use]
    pub fn config_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            root: dir.into(),
            layout: Layout::ConfigDir,
        }
    }

    /// Resolver for the home configuration directory `{home}/.claude`
    #[must_use]
    pub fn global(home: &Path) -> Self {
        Self::config_dir(home.join(CLAUDE_DIR))
    }

    /// Resolver for an arbitrary directory
    ///
    /// A directory named `.claude` uses the config-dir layout, anything else
    /// the project layout.
    #[must_use]
    pub fn for_directory(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if dir.file_name().is_some_and(|n| n == CLAUDE_DIR) {
            Self::config_dir(dir)
        } else {
            Self::project(dir)
        }
    }

    /// Root this resolver was built for
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Layout in use
    #[must_use]
    pub const fn layout(&self) -> Layout {
        self.layout
    }

    /// Directory holding settings, agents and hooks
    #[must_use]
    pub fn claude_dir(&self) -> PathBuf {
        match self.layout {
            Layout::Project => self.root.join(CLAUDE_DIR),
            Layout::ConfigDir => self.root.clone(),
        }
    }

    const fn base_scope(&self) -> Scope {
        match self.layout {
            Layout::Project => Scope::Project,
            Layout::ConfigDir => Scope::Global,
        }
    }

    /// Memory file candidates, highest precedence first
    #[must_use]
    pub fn memory_candidates(&self) -> Vec<Candidate> {
        match self.layout {
            Layout::Project => vec![
                Candidate::new(self.root.join(MEMORY_FILE), Scope::Project),
                Candidate::new(self.claude_dir().join(MEMORY_FILE), Scope::Legacy),
            ],
            Layout::ConfigDir => vec![Candidate::new(self.root.join(MEMORY_FILE), Scope::Global)],
        }
    }

    /// `CLAUDE.local.md`, checked alongside the memory candidates
    #[must_use]
    pub fn local_memory(&self) -> Option<Candidate> {
        match self.layout {
            Layout::Project => Some(Candidate::new(
                self.root.join(LOCAL_MEMORY_FILE),
                Scope::Local,
            )),
            Layout::ConfigDir => None,
        }
    }

    /// Settings candidates, every one that exists is listed
    #[must_use]
    pub fn settings_candidates(&self) -> Vec<Candidate> {
        let dir = self.claude_dir();
        match self.layout {
            Layout::Project => PROJECT_SETTINGS_FILES
                .iter()
                .map(|name| {
                    let scope = if name.contains(".local.") {
                        Scope::Local
                    } else {
                        Scope::Project
                    };
                    Candidate::new(dir.join(name), scope)
                })
                .collect(),
            Layout::ConfigDir => GLOBAL_SETTINGS_FILES
                .iter()
                .map(|name| Candidate::new(dir.join(name), Scope::Global))
                .collect(),
        }
    }

    /// Settings file whose `hooks` key becomes a synthetic hook artifact
    #[must_use]
    pub fn hooks_settings_file(&self) -> Candidate {
        Candidate::new(
            self.claude_dir().join(HOOKS_SETTINGS_FILE),
            self.base_scope(),
        )
    }

    /// Directories whose direct `.md`/`.json` files are agents
    ///
    /// A project without a `.claude` directory falls back to `{root}/agents`.
    #[must_use]
    pub fn agent_dirs(&self) -> Vec<Candidate> {
        let claude_dir = self.claude_dir();
        let scope = self.base_scope();
        if self.layout == Layout::Project && !claude_dir.is_dir() {
            return vec![Candidate::new(self.root.join(AGENTS_DIR), scope)];
        }
        vec![Candidate::new(claude_dir.join(AGENTS_DIR), scope)]
    }

    /// Directories whose direct files are hooks
    #[must_use]
    pub fn hook_dirs(&self) -> Vec<Candidate> {
        vec![Candidate::new(
            self.claude_dir().join(HOOKS_DIR),
            self.base_scope(),
        )]
    }

    /// MCP-bearing files, canonical location first
    #[must_use]
    pub fn mcp_sources(&self) -> Vec<McpSource> {
        match self.layout {
            Layout::Project => vec![
                McpSource {
                    path: self.root.join(MCP_FILE),
                    label: "Project MCP Config",
                    scope: Scope::Project,
                },
                McpSource {
                    path: self.claude_dir().join(DESKTOP_CONFIG_FILE),
                    label: "Project Desktop Config",
                    scope: Scope::Project,
                },
            ],
            Layout::ConfigDir => vec![McpSource {
                path: self.root.join(DESKTOP_CONFIG_FILE),
                label: "Global Desktop Config",
                scope: Scope::Global,
            }],
        }
    }
}

/// Whether a file name is an agent definition (`.md` or `.json`)
#[must_use]
pub fn is_agent_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md" || ext == "json")
}

/// Derive a project's display name from its path
///
/// Uses the directory name, except that a dotted directory name (a hidden
/// directory such as `.claude`) is replaced by its parent's name when that
/// one is not dotted too. Doubly-dotted paths keep the dotted name.
#[must_use]
pub fn project_name(path: &Path) -> String {
    let base = base_name(path);
    if !base.starts_with('.') {
        return base;
    }

    match path.parent().map(base_name) {
        Some(parent) if !parent.is_empty() && !parent.starts_with('.') => parent,
        _ => base,
    }
}

fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_memory_precedence_order() {
        let resolver = PathResolver::project("/w/app");
        let candidates = resolver.memory_candidates();

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].path, PathBuf::from("/w/app/CLAUDE.md"));
        assert_eq!(candidates[0].scope, Scope::Project);
        assert_eq!(candidates[1].path, PathBuf::from("/w/app/.claude/CLAUDE.md"));
        assert_eq!(candidates[1].scope, Scope::Legacy);
    }

    #[test]
    fn test_local_memory_only_for_projects() {
        let project = PathResolver::project("/w/app");
        assert_eq!(
            project.local_memory().unwrap().path,
            PathBuf::from("/w/app/CLAUDE.local.md")
        );
        assert!(PathResolver::global(Path::new("/home/u")).local_memory().is_none());
    }

    #[test]
    fn test_project_settings_order_and_scopes() {
        let candidates = PathResolver::project("/w/app").settings_candidates();
        let names: Vec<_> = candidates
            .iter()
            .map(|c| c.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, ["settings.local.json", "settings.json", "config.json"]);
        assert_eq!(candidates[0].scope, Scope::Local);
        assert_eq!(candidates[1].scope, Scope::Project);
    }

    #[test]
    fn test_global_settings_candidates() {
        let candidates = PathResolver::global(Path::new("/home/u")).settings_candidates();

        assert_eq!(candidates.len(), 4);
        assert!(candidates.iter().all(|c| c.scope == Scope::Global));
        assert_eq!(
            candidates[2].path,
            PathBuf::from("/home/u/.claude/claude_desktop_config.json")
        );
    }

    #[test]
    fn test_agent_dirs_fall_back_without_claude_dir() {
        let tmp = TempDir::new().unwrap();
        let resolver = PathResolver::project(tmp.path());
        assert_eq!(resolver.agent_dirs()[0].path, tmp.path().join("agents"));

        fs::create_dir(tmp.path().join(".claude")).unwrap();
        assert_eq!(
            resolver.agent_dirs()[0].path,
            tmp.path().join(".claude").join("agents")
        );
    }

    #[test]
    fn test_for_directory_picks_layout() {
        assert_eq!(
            PathResolver::for_directory("/home/u/.claude").layout(),
            Layout::ConfigDir
        );
        assert_eq!(PathResolver::for_directory("/w/app").layout(), Layout::Project);
    }

    #[test]
    fn test_mcp_sources_labels() {
        let project = PathResolver::project("/w/app").mcp_sources();
        assert_eq!(project[0].path, PathBuf::from("/w/app/.mcp.json"));
        assert_eq!(project[0].label, "Project MCP Config");

        let global = PathResolver::global(Path::new("/home/u")).mcp_sources();
        assert_eq!(global[0].label, "Global Desktop Config");
    }

    #[test]
    fn test_is_agent_file() {
        assert!(is_agent_file(Path::new("reviewer.md")));
        assert!(is_agent_file(Path::new("reviewer.json")));
        assert!(!is_agent_file(Path::new("notes.txt")));
    }

    #[test]
    fn test_project_name() {
        assert_eq!(project_name(Path::new("/w/app")), "app");
        assert_eq!(project_name(Path::new("/w/app/.claude")), "app");
        assert_eq!(project_name(Path::new("/w/.hidden/.claude")), ".claude");
        assert_eq!(project_name(Path::new("/w/.dotfiles")), "w");
    }
}
