//! Settings resolved into concrete paths

use std::path::{Path, PathBuf};

use anyhow::Context;

use super::patterns::PatternMatcher;
use super::types::DashboardConfig;
use crate::error::Result;

/// Workspace scanned when nothing else is configured
pub const DEFAULT_WORKSPACE: &str = "~/workspace";

/// Expand a leading `~` against `home`
#[must_use]
pub fn expand_path(raw: &str, home: &Path) -> PathBuf {
    let home = home.to_string_lossy().into_owned();
    let expanded = shellexpand::tilde_with_context(raw, || Some(home.as_str()));
    PathBuf::from(expanded.as_ref())
}

/// Overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replacement home directory
    pub home: Option<String>,
    /// Replacement workspace roots
    pub workspaces: Vec<String>,
}

/// Everything an operation needs from the settings
#[derive(Debug, Clone)]
pub struct Environment {
    /// Home directory whose `.claude` is the global configuration
    pub home: PathBuf,
    /// Workspace roots as configured, `~` not yet expanded
    pub workspaces: Vec<String>,
    /// Discovery walk filter
    pub matcher: PatternMatcher,
}

impl Environment {
    /// Resolve merged settings and overrides
    ///
    /// Home comes from the override, then the settings, then the user's
    /// home directory. Workspaces come from the overrides when any are
    /// given, then the settings, then [`DEFAULT_WORKSPACE`].
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined or a
    /// pattern is invalid.
    pub fn resolve(config: &DashboardConfig, overrides: &Overrides) -> Result<Self> {
        let home = match overrides.home.as_ref().or(config.home.as_ref()) {
            Some(raw) => {
                let user_home = dirs::home_dir().unwrap_or_default();
                expand_path(raw, &user_home)
            }
            None => dirs::home_dir().context("Could not determine home directory")?,
        };

        let workspaces = if !overrides.workspaces.is_empty() {
            overrides.workspaces.clone()
        } else if !config.workspaces.is_empty() {
            config.workspaces.clone()
        } else {
            vec![DEFAULT_WORKSPACE.to_string()]
        };

        let matcher = PatternMatcher::with_patterns(&config.ignore, &config.include)?;

        Ok(Self {
            home,
            workspaces,
            matcher,
        })
    }
}
