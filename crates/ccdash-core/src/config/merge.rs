//! Layering of dashboard settings files
//!
//! # Merging Semantics
//!
//! - **Lists** (`workspaces`, `ignore`, `include`): additive, first
//!   occurrence kept when the same entry appears in several files
//! - **`home`**: the highest-precedence file that sets it wins

use std::fs;
use std::path::Path;

use anyhow::Context;

use super::discovery::ConfigFiles;
use super::types::DashboardConfig;
use crate::error::Result;

/// Configuration merger
pub struct ConfigMerger;

impl Default for ConfigMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigMerger {
    /// Stateless merger
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Merge every discovered file, lowest precedence first
    ///
    /// A file later in this list overrides `home` from earlier ones:
    /// 1. `--config` file
    /// 2. .ccdash.local.toml
    /// 3. .ccdash.toml
    /// 4. Global config
    ///
    /// # Errors
    ///
    /// Fails on the first file that is unreadable or not valid TOML.
    pub fn merge(files: &ConfigFiles) -> Result<DashboardConfig> {
        let mut merged = DashboardConfig::default();

        for path in files.in_merge_order() {
            Self::merge_into(&mut merged, path)?;
        }

        Ok(merged)
    }

    fn merge_into(base: &mut DashboardConfig, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Self::apply(base, config);
        Ok(())
    }

    /// Layer `config` over `base`
    pub fn apply(base: &mut DashboardConfig, config: DashboardConfig) {
        extend_unique(&mut base.workspaces, config.workspaces);
        extend_unique(&mut base.ignore, config.ignore);
        extend_unique(&mut base.include, config.include);

        if config.home.is_some() {
            base.home = config.home;
        }
    }
}

fn extend_unique(base: &mut Vec<String>, items: Vec<String>) {
    for item in items {
        if !base.contains(&item) {
            base.push(item);
        }
    }
}
