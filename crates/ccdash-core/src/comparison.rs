//! Side-by-side comparison of two project aggregates
//!
//! This module is read-only. It reports:
//! - A line diff of the memory files
//! - Name-set and content differences of settings, agents and hooks
//! - Top-level key differences of shared JSON files
//! - Server-level differences of the MCP declarations

mod diff;
mod keys;
mod sets;


use serde::Serialize;

pub use diff::{DiffGenerator, DiffRun, LineOp, MemoryDiff};
pub use keys::{JsonDiff, KeyDiff};
pub use sets::{FileSetDiff, McpDiff};

use crate::model::ProjectConfig;

/// Every difference between a left and a right project
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Memory file diff
    pub memory: MemoryDiff,
    /// Settings files
    pub settings: FileSetDiff,
    /// Agent definitions
    pub agents: FileSetDiff,
    /// Hook files and embedded hooks
    pub hooks: FileSetDiff,
    /// MCP servers
    pub mcp: McpDiff,
}

impl ComparisonResult {
    /// Whether the two projects are configured identically
    #[must_use]
    pub fn is_identical(&self) -> bool {
        let memory_same = self.memory.is_identical()
            || (!self.memory.left_exists && !self.memory.right_exists);

        memory_same
            && self.settings.is_identical()
            && self.agents.is_identical()
            && self.hooks.is_identical()
            && self.mcp.is_identical()
    }
}

/// Comparator for project aggregates
pub struct ConfigComparator;

impl Default for ConfigComparator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigComparator {
    /// Create a new comparator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Compare two projects
    ///
    /// Output sets are ordered lexically, so comparing unchanged inputs twice
    /// gives identical results.
    #[must_use]
    pub fn compare(left: &ProjectConfig, right: &ProjectConfig) -> ComparisonResult {
        ComparisonResult {
            memory: DiffGenerator::memory(left.memory.as_ref(), right.memory.as_ref()),
            settings: FileSetDiff::compare(&left.settings, &right.settings),
            agents: FileSetDiff::compare(&left.agents, &right.agents),
            hooks: FileSetDiff::compare(&left.hooks, &right.hooks),
            mcp: McpDiff::compare(&left.mcp_servers, &right.mcp_servers),
        }
    }
}
