//! Error types for caller-contract violations
//!
//! Filesystem and parse failures are downgraded to data (absent fields,
//! [`crate::model::ArtifactError`] markers) close to where they happen.
//! Only the variants of [`DashboardError`] abort an operation.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `anyhow::Error`
pub type Result<T> = anyhow::Result<T>;

/// Rejected operation inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// `scan_workspaces` was called without any root
    #[error("No workspace roots were given")]
    EmptyWorkspaceList,

    /// A required path argument was empty or blank
    #[error("No path was given")]
    EmptyPath,

    /// A path that must name an existing directory does not
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Dashboard settings failed validation
    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),
}
