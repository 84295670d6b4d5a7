//! # ccdash
//!
//! Core library for the Claude configuration dashboard.
//!
//! This library discovers projects carrying Claude configuration
//! (`CLAUDE.md` memory files, JSON settings, agents, hooks and MCP server
//! definitions) under a set of workspace roots, aggregates each project's
//! artifacts into a [`model::ProjectConfig`], and computes structural diffs
//! between two such aggregates.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types and the crate-wide result alias
pub mod error;

/// Configuration artifact data model
pub mod model;

/// Candidate path resolution for each artifact kind
pub mod resolver;

/// Bounded-depth discovery of project directories under workspace roots
pub mod scanner;

/// Loading of every artifact of one project into a `ProjectConfig`
pub mod project;

/// Diffs between two project configurations
pub mod comparison;

/// File writes and copies guarded by timestamped backups
pub mod mutator;

/// Dashboard settings discovery, merging and validation
pub mod config;

/// Async entry points for the discovery and comparison operations
pub mod service;

pub use comparison::{ComparisonResult, ConfigComparator};
pub use error::{DashboardError, Result};
pub use model::{ConfigArtifact, GlobalConfig, McpServer, ProjectConfig};
pub use service::{Dashboard, WorkspaceScan};
