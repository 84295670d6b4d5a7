//! Aggregation of a project's artifacts into a `ProjectConfig`
//!
//! Loading is read-only. A directory without any recognized artifact is a
//! valid, empty `ProjectConfig`; unreadable or malformed files carry error
//! markers and never abort the load.

mod loader;
mod mcp;

use std::path::{Path, PathBuf};

use tracing::debug;

pub use loader::{content_hash, embedded_hooks, read_artifact, read_dir_artifacts};
pub use mcp::parse_servers;

use crate::error::{DashboardError, Result};
use crate::model::{ArtifactKind, GlobalConfig, MemoryCandidate, ProjectConfig, Scope};
use crate::resolver::{self, PathResolver};
use crate::scanner::ProjectDraft;

/// Loads `ProjectConfig` aggregates
pub struct ProjectAggregator;

impl Default for ProjectAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectAggregator {
    /// Create a new aggregator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Load the project rooted at `path`
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::EmptyPath`] for an empty path and
    /// [`DashboardError::NotADirectory`] when `path` is not a directory.
    pub fn load_project(path: &Path) -> Result<ProjectConfig> {
        let root = Self::checked_dir(path)?;
        let name = resolver::project_name(&root);
        Ok(Self::load_with(&PathResolver::project(&root), name))
    }

    /// Load an arbitrary directory for ad-hoc comparison
    ///
    /// A directory named `.claude` is read with the config-dir layout,
    /// anything else as a project root.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_project`].
    pub fn load_directory(path: &Path) -> Result<ProjectConfig> {
        let root = Self::checked_dir(path)?;
        let name = resolver::project_name(&root);
        Ok(Self::load_with(&PathResolver::for_directory(&root), name))
    }

    /// Load the home configuration directory `{home}/.claude`
    ///
    /// A missing directory yields an empty aggregate.
    #[must_use]
    pub fn load_global(home: &Path) -> GlobalConfig {
        let resolver = PathResolver::global(home);
        Self::load_with(&resolver, "Global")
    }

    /// Load a project found by discovery and merge in the agent files the
    /// discovery passes recorded for it
    #[must_use]
    pub fn load_draft(draft: &ProjectDraft) -> ProjectConfig {
        let mut project = Self::load_with(&PathResolver::project(&draft.path), draft.name.clone());
        project.discovered_by.clone_from(&draft.discovered_by);

        for agent_path in &draft.agent_files {
            let Some(agent) = read_artifact(agent_path, ArtifactKind::Agent, Scope::Project) else {
                continue;
            };
            if !project.agents.iter().any(|a| a.same_file(&agent)) {
                project.agents.push(agent);
            }
        }

        project
    }

    fn checked_dir(path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(DashboardError::EmptyPath.into());
        }
        if !path.is_dir() {
            return Err(DashboardError::NotADirectory(path.to_path_buf()).into());
        }
        Ok(dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf()))
    }

    /// Load every artifact kind through `resolver`
    #[must_use]
    pub fn load_with(resolver: &PathResolver, name: impl Into<String>) -> ProjectConfig {
        let mut project = ProjectConfig::empty(name, resolver.root());
        debug!(root = %resolver.root().display(), "Loading configuration");

        // Memory: first existing candidate wins, the rest are still recorded
        for candidate in resolver.memory_candidates() {
            let Some(artifact) =
                read_artifact(&candidate.path, ArtifactKind::Memory, candidate.scope)
            else {
                continue;
            };
            let active = project.memory.is_none();
            project.memory_candidates.push(MemoryCandidate {
                path: candidate.path,
                scope: candidate.scope,
                active,
            });
            if active {
                project.memory = Some(artifact);
            }
        }

        project.local_memory = resolver
            .local_memory()
            .and_then(|c| read_artifact(&c.path, ArtifactKind::Memory, c.scope));

        project.settings = resolver
            .settings_candidates()
            .into_iter()
            .filter_map(|c| read_artifact(&c.path, ArtifactKind::Settings, c.scope))
            .collect();

        project.agents = resolver
            .agent_dirs()
            .into_iter()
            .flat_map(|dir| {
                read_dir_artifacts(
                    &dir.path,
                    ArtifactKind::Agent,
                    dir.scope,
                    resolver::is_agent_file,
                )
            })
            .collect();

        project.hooks = resolver
            .hook_dirs()
            .into_iter()
            .flat_map(|dir| read_dir_artifacts(&dir.path, ArtifactKind::Hook, dir.scope, |_| true))
            .collect();

        let hooks_settings = resolver.hooks_settings_file();
        let embedded = project
            .settings
            .iter()
            .find(|s| s.absolute_path == hooks_settings.path)
            .and_then(embedded_hooks);
        project.hooks.extend(embedded);

        for source in resolver.mcp_sources() {
            let Some(file) = read_artifact(&source.path, ArtifactKind::McpDescriptor, source.scope)
            else {
                continue;
            };
            if let Some(document) = file.parsed_json() {
                project
                    .mcp_servers
                    .extend(parse_servers(&document, source.label, &source.path));
            }
            project.mcp_files.push(file);
        }

        project
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ArtifactError, DiscoveryPass};
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn canonical(tmp: &TempDir) -> PathBuf {
        dunce::canonicalize(tmp.path()).unwrap()
    }

    #[test]
    fn test_empty_directory_is_valid() {
        let tmp = TempDir::new().unwrap();

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert!(project.memory.is_none());
        assert!(project.settings.is_empty());
        assert!(project.agents.is_empty());
        assert!(project.hooks.is_empty());
        assert!(project.mcp_servers.is_empty());
        assert!(project.is_empty());
    }

    #[test]
    fn test_claude_file_instead_of_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".claude", "not a directory");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert!(project.memory.is_none());
        assert!(project.memory_candidates.is_empty());
        assert!(project.settings.is_empty());
        assert!(project.hooks.is_empty());
        assert!(project.mcp_files.is_empty());
        assert!(project.is_empty());
    }

    #[test]
    fn test_claude_file_does_not_hide_root_memory() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".claude", "not a directory");
        write(tmp.path(), "CLAUDE.md", "# root");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        let memory = project.memory.unwrap();
        assert_eq!(memory.absolute_path, canonical(&tmp).join("CLAUDE.md"));
        assert!(memory.error.is_none());
        assert_eq!(project.memory_candidates.len(), 1);
        assert!(project.settings.is_empty());
    }

    #[test]
    fn test_missing_directory_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope");

        let err = ProjectAggregator::load_project(&missing).unwrap_err();
        assert_eq!(
            err.downcast_ref::<DashboardError>(),
            Some(&DashboardError::NotADirectory(missing))
        );

        let err = ProjectAggregator::load_project(Path::new("")).unwrap_err();
        assert_eq!(err.downcast_ref::<DashboardError>(), Some(&DashboardError::EmptyPath));
    }

    #[test]
    fn test_root_memory_beats_legacy() {
        let tmp = TempDir::new().unwrap();
        let root = canonical(&tmp);
        write(&root, "CLAUDE.md", "root memory");
        write(&root, ".claude/CLAUDE.md", "legacy memory");

        let project = ProjectAggregator::load_project(&root).unwrap();
        let memory = project.memory.unwrap();

        assert_eq!(memory.absolute_path, root.join("CLAUDE.md"));
        assert_eq!(memory.scope, Scope::Project);
        assert_eq!(project.memory_candidates.len(), 2);
        assert!(project.memory_candidates[0].active);
        assert!(!project.memory_candidates[1].active);
        assert_eq!(project.memory_candidates[1].scope, Scope::Legacy);
    }

    #[test]
    fn test_legacy_memory_used_alone() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".claude/CLAUDE.md", "legacy");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert_eq!(project.memory.unwrap().scope, Scope::Legacy);
    }

    #[test]
    fn test_local_memory_kept_separate() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "CLAUDE.local.md", "local notes");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert!(project.memory.is_none());
        let local = project.local_memory.unwrap();
        assert_eq!(local.scope, Scope::Local);
        assert_eq!(local.content.as_deref(), Some("local notes"));
    }

    #[test]
    fn test_all_settings_listed() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".claude/settings.json", "{}");
        write(tmp.path(), ".claude/settings.local.json", "{}");
        write(tmp.path(), ".claude/config.json", "not json");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();
        let names: Vec<_> = project.settings.iter().map(|s| s.name.as_str()).collect();

        assert_eq!(names, ["settings.local.json", "settings.json", "config.json"]);
        assert_eq!(project.settings[2].error, Some(ArtifactError::InvalidJson));
        assert!(project.settings[0].error.is_none());
    }

    #[test]
    fn test_agents_and_hooks() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".claude/agents/reviewer.md", "# reviewer");
        write(tmp.path(), ".claude/agents/planner.json", "{}");
        write(tmp.path(), ".claude/agents/readme.txt", "skip");
        write(tmp.path(), ".claude/hooks/pre.sh", "#!/bin/sh");
        write(
            tmp.path(),
            ".claude/settings.json",
            r#"{"hooks": {"Stop": []}}"#,
        );

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        let agents: Vec<_> = project.agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(agents, ["planner", "reviewer"]);
        let hooks: Vec<_> = project.hooks.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(hooks, ["pre.sh", "hooks (in settings.json)"]);
    }

    #[test]
    fn test_standalone_agents_without_claude_dir() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "agents/helper.md", "# helper");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert_eq!(project.agents.len(), 1);
        assert_eq!(project.agents[0].name, "helper");
    }

    #[test]
    fn test_mcp_round_trip() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            ".mcp.json",
            r#"{"mcpServers": {"fs": {"command":"npx","args":["-y","pkg"]}}}"#,
        );

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert_eq!(project.mcp_servers.len(), 1);
        let server = &project.mcp_servers[0];
        assert_eq!(server.server_name, "fs");
        assert_eq!(server.command.as_deref(), Some("npx"));
        assert_eq!(server.args, ["-y", "pkg"]);
        assert_eq!(server.source_description, "Project MCP Config");
    }

    #[test]
    fn test_malformed_mcp_file_is_marked() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), ".mcp.json", "{ nope");
        write(tmp.path(), "CLAUDE.md", "still loaded");

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert!(project.mcp_servers.is_empty());
        assert_eq!(project.mcp_files[0].error, Some(ArtifactError::InvalidJson));
        assert!(project.memory.is_some());
    }

    #[test]
    fn test_project_desktop_config_servers() {
        let tmp = TempDir::new().unwrap();
        write(
            tmp.path(),
            ".claude/claude_desktop_config.json",
            r#"{"mcpServers": {"db": {"command":"pg-mcp"}}}"#,
        );

        let project = ProjectAggregator::load_project(tmp.path()).unwrap();

        assert_eq!(project.mcp_servers[0].source_description, "Project Desktop Config");
    }

    #[test]
    fn test_global_config() {
        let home = TempDir::new().unwrap();
        write(home.path(), ".claude/CLAUDE.md", "global memory");
        write(home.path(), ".claude/settings.json", r#"{"hooks": {}}"#);
        write(home.path(), ".claude/agents/a.md", "a");
        write(
            home.path(),
            ".claude/claude_desktop_config.json",
            r#"{"mcpServers": {"x": {"command":"x"}}}"#,
        );

        let global = ProjectAggregator::load_global(home.path());

        assert_eq!(global.name, "Global");
        assert_eq!(global.memory.as_ref().unwrap().scope, Scope::Global);
        assert_eq!(global.settings.len(), 2);
        assert!(global.settings.iter().all(|s| s.scope == Scope::Global));
        assert_eq!(global.agents.len(), 1);
        assert_eq!(global.hooks.len(), 1);
        assert_eq!(global.mcp_servers[0].source_description, "Global Desktop Config");
    }

    #[test]
    fn test_global_config_missing_home_dir() {
        let home = TempDir::new().unwrap();
        let global = ProjectAggregator::load_global(home.path());
        assert!(global.is_empty());
    }

    #[test]
    fn test_load_directory_with_config_dir_layout() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "app/.claude/settings.json", "{}");
        write(tmp.path(), "app/.claude/agents/a.md", "a");

        let project = ProjectAggregator::load_directory(&tmp.path().join("app/.claude")).unwrap();

        assert_eq!(project.name, "app");
        assert_eq!(project.settings.len(), 1);
        assert_eq!(project.agents.len(), 1);
    }

    #[test]
    fn test_load_draft_merges_agent_files_once() {
        let tmp = TempDir::new().unwrap();
        let root = canonical(&tmp);
        write(&root, ".claude/agents/inner.md", "inner");
        write(&root, "agents/outer.md", "outer");

        let draft = ProjectDraft {
            path: root.clone(),
            name: "demo".to_string(),
            discovered_by: vec![DiscoveryPass::ClaudeDir],
            agent_files: vec![
                root.join("agents/outer.md"),
                root.join(".claude/agents/inner.md"),
            ],
        };

        let project = ProjectAggregator::load_draft(&draft);

        let names: Vec<_> = project.agents.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["inner", "outer"]);
        assert_eq!(project.name, "demo");
    }
}
