//! Dashboard settings: discovery, merging, validation and resolution
//!
//! Files are found by [`ConfigDiscovery`], layered by [`ConfigMerger`] and
//! checked by [`ConfigValidator`]. [`Environment`] turns the result into the
//! home directory, workspace roots and pruning rules a scan uses.

mod discovery;
mod environment;
mod merge;
mod patterns;
mod types;
mod validation;

use std::path::Path;

pub use discovery::{ConfigDiscovery, ConfigFiles, LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
pub use environment::{DEFAULT_WORKSPACE, Environment, Overrides, expand_path};
pub use merge::ConfigMerger;
pub use patterns::PatternMatcher;
pub use types::DashboardConfig;
pub use validation::ConfigValidator;

use crate::error::Result;

/// Merged settings together with the files they came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Merged settings
    pub config: DashboardConfig,
    /// Files that contributed, by tier
    pub files: ConfigFiles,
}

/// Entry point for loading dashboard settings
pub struct ConfigManager;

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Stateless manager
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Discover, merge and validate settings starting from the current directory
    ///
    /// # Errors
    ///
    /// Fails when a settings file is unreadable, malformed or has blank entries.
    pub fn load(cli_config_path: Option<&Path>) -> Result<LoadedConfig> {
        Self::load_files(ConfigDiscovery::discover(cli_config_path))
    }

    /// Merge and validate an explicit set of files
    ///
    /// # Errors
    ///
    /// Fails when a settings file is unreadable, malformed or has blank entries.
    pub fn load_files(files: ConfigFiles) -> Result<LoadedConfig> {
        let config = ConfigMerger::merge(&files)?;
        ConfigValidator::validate(&config)?;
        Ok(LoadedConfig { config, files })
    }
}
