//! Dashboard settings as read from TOML

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Settings shared by every dashboard operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardConfig {
    /// Workspace roots to scan, `~` allowed
    #[serde(default)]
    pub workspaces: Vec<String>,

    /// Home directory holding `.claude`, defaults to the user's home
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home: Option<String>,

    /// Directories to prune from discovery walks
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Patterns that re-include ignored directories
    #[serde(default)]
    pub include: Vec<String>,
}

impl DashboardConfig {
    /// Render the settings as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
