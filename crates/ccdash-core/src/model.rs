//! Configuration artifacts and the per-project aggregate

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// Kind of configuration artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    /// `CLAUDE.md` memory file
    Memory,
    /// JSON settings file
    Settings,
    /// Agent definition (`.md` or `.json`)
    Agent,
    /// Hook script or the `hooks` object of a settings file
    Hook,
    /// JSON file declaring MCP servers
    McpDescriptor,
}

/// Precedence tier that produced an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// Project root (`{root}/CLAUDE.md`, `{root}/.claude/...`)
    Project,
    /// Legacy location inside `.claude/` (`{root}/.claude/CLAUDE.md`)
    Legacy,
    /// Local override (`CLAUDE.local.md`, `settings.local.json`)
    Local,
    /// Home configuration directory (`~/.claude`)
    Global,
}

/// Per-file failure that is reported instead of aborting a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactError {
    /// The file was expected to hold JSON and does not parse
    InvalidJson,
    /// The file exists but could not be read
    Unreadable(String),
}

impl fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidJson => f.write_str("Invalid JSON"),
            Self::Unreadable(reason) => write!(f, "Unreadable: {reason}"),
        }
    }
}

impl Serialize for ArtifactError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A single file-backed configuration unit
///
/// Two artifacts denote the same file iff their `absolute_path` values are
/// equal once symlinks are resolved, see [`ConfigArtifact::same_file`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigArtifact {
    /// Artifact kind
    pub kind: ArtifactKind,
    /// Display name (extension stripped for memory and agent files)
    pub name: String,
    /// Filesystem path of the backing file
    pub absolute_path: PathBuf,
    /// Text content, absent when the file could not be read
    pub content: Option<String>,
    /// Byte length reported by the filesystem
    pub size_bytes: u64,
    /// Modification timestamp reported by the filesystem
    pub last_modified: Option<DateTime<Utc>>,
    /// Precedence tier
    pub scope: Scope,
    /// SHA-256 hex digest of the content bytes
    pub content_hash: Option<String>,
    /// Load or parse failure for this file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ArtifactError>,
}

impl ConfigArtifact {
    /// Whether both artifacts are backed by the same file
    ///
    /// Paths that cannot be resolved are compared as given.
    #[must_use]
    pub fn same_file(&self, other: &Self) -> bool {
        if self.absolute_path == other.absolute_path {
            return true;
        }
        match (
            dunce::canonicalize(&self.absolute_path),
            dunce::canonicalize(&other.absolute_path),
        ) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }

    /// File name of the backing path
    #[must_use]
    pub fn file_name(&self) -> String {
        self.absolute_path
            .file_name()
            .map_or_else(|| self.name.clone(), |n| n.to_string_lossy().into_owned())
    }

    /// Parse the content as JSON
    ///
    /// Returns `None` when there is no content or it is not valid JSON.
    #[must_use]
    pub fn parsed_json(&self) -> Option<serde_json::Value> {
        self.content
            .as_deref()
            .and_then(|text| serde_json::from_str(text).ok())
    }
}

/// A memory file that exists at one of the precedence locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryCandidate {
    /// Candidate path
    pub path: PathBuf,
    /// Tier of the candidate location
    pub scope: Scope,
    /// Whether this candidate won precedence and is the resolved memory
    pub active: bool,
}

/// One MCP server declared in an MCP-bearing JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct McpServer {
    /// Key under `mcpServers`
    pub server_name: String,
    /// Executable for stdio servers
    pub command: Option<String>,
    /// Command arguments
    pub args: Vec<String>,
    /// Environment variables
    pub env: BTreeMap<String, String>,
    /// Transport type (`stdio`, `http`, `sse`)
    #[serde(rename = "type")]
    pub transport: Option<String>,
    /// Endpoint for HTTP/SSE servers
    pub url: Option<String>,
    /// Whether the server is switched off
    pub disabled: bool,
    /// Human-readable label of the file this came from
    pub source_description: String,
    /// File this came from
    pub source_path: PathBuf,
    /// Raw descriptor object, used for comparisons
    pub descriptor: serde_json::Value,
}

/// Discovery pass that matched a project directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiscoveryPass {
    /// A `.claude` directory
    ClaudeDir,
    /// A `.mcp.json` file
    McpJson,
    /// A standalone `CLAUDE.md`
    MemoryFile,
    /// A standalone `agents/` directory with `.md`/`.json` files
    AgentsDir,
}

impl DiscoveryPass {
    /// All passes in execution order
    pub const ALL: [Self; 4] = [
        Self::ClaudeDir,
        Self::McpJson,
        Self::MemoryFile,
        Self::AgentsDir,
    ];

    /// Maximum walk depth below a workspace root for this pass
    #[must_use]
    pub const fn max_depth(self) -> usize {
        match self {
            Self::ClaudeDir | Self::McpJson | Self::AgentsDir => 3,
            Self::MemoryFile => 2,
        }
    }
}

/// Aggregate of every configuration artifact of one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    /// Display name derived from the directory name
    pub name: String,
    /// Project root (unique within one discovery run)
    pub path: PathBuf,
    /// Precedence-resolved memory file
    pub memory: Option<ConfigArtifact>,
    /// Every memory location that exists, winner flagged
    pub memory_candidates: Vec<MemoryCandidate>,
    /// `CLAUDE.local.md`, never merged into `memory`
    #[serde(rename = "claudeLocalMd")]
    pub local_memory: Option<ConfigArtifact>,
    /// Every recognized settings file that exists
    pub settings: Vec<ConfigArtifact>,
    /// Agent definitions
    pub agents: Vec<ConfigArtifact>,
    /// Hook files plus the embedded `hooks` object of `settings.json`
    pub hooks: Vec<ConfigArtifact>,
    /// Servers parsed out of every MCP-bearing file
    pub mcp_servers: Vec<McpServer>,
    /// MCP-bearing files that exist, with parse markers
    pub mcp_files: Vec<ConfigArtifact>,
    /// Passes that found this project, empty when loaded directly
    pub discovered_by: Vec<DiscoveryPass>,
}

impl ProjectConfig {
    /// An aggregate with no artifacts
    #[must_use]
    pub fn empty(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            memory: None,
            memory_candidates: Vec::new(),
            local_memory: None,
            settings: Vec::new(),
            agents: Vec::new(),
            hooks: Vec::new(),
            mcp_servers: Vec::new(),
            mcp_files: Vec::new(),
            discovered_by: Vec::new(),
        }
    }

    /// Whether no artifact of any kind was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memory.is_none()
            && self.local_memory.is_none()
            && self.settings.is_empty()
            && self.agents.is_empty()
            && self.hooks.is_empty()
            && self.mcp_servers.is_empty()
            && self.mcp_files.is_empty()
    }
}

/// Home-level configuration rooted at `~/.claude`
///
/// Same shape as a project; every artifact carries [`Scope::Global`].
pub type GlobalConfig = ProjectConfig;
