//! Common types and utilities for command execution

use std::path::Path;

use anyhow::Context;
use ccdash_core::Dashboard;
use ccdash_core::config::{ConfigFiles, ConfigManager, Environment, LoadedConfig, Overrides};
use serde::Serialize;

use crate::cli::Cli;

/// Execution options shared by every command
#[allow(clippy::struct_excessive_bools)]
pub struct Options<'a> {
    /// Enable verbose output
    pub verbose: bool,
    /// Print JSON instead of reports
    pub json: bool,
    /// Skip confirmation prompts
    pub yes: bool,
    /// Preview file changes without writing
    pub dry_run: bool,
    /// Path to custom config file
    pub config_path: Option<&'a Path>,
    /// Skip loading all config files
    pub no_config: bool,
    /// Command-line overrides of the settings
    pub overrides: Overrides,
}

impl<'a> Options<'a> {
    /// Collect options from parsed arguments
    #[must_use]
    pub fn from_cli(cli: &'a Cli) -> Self {
        Self {
            verbose: cli.verbose,
            json: cli.json,
            yes: cli.yes,
            dry_run: cli.dry_run,
            config_path: cli.config.as_deref(),
            no_config: cli.no_config,
            overrides: Overrides {
                home: cli.home.clone(),
                workspaces: cli.workspaces.clone(),
            },
        }
    }

    /// Load config files unless `--no-config` was given
    pub fn load_config(&self) -> anyhow::Result<LoadedConfig> {
        if self.no_config {
            return ConfigManager::load_files(ConfigFiles::default());
        }
        ConfigManager::load(self.config_path)
    }

    /// Resolve settings into home, workspaces and walk filter
    pub fn environment(&self) -> anyhow::Result<Environment> {
        let loaded = self.load_config()?;
        Environment::resolve(&loaded.config, &self.overrides)
    }

    /// Build the dashboard for the resolved settings
    pub fn dashboard(&self) -> anyhow::Result<(Dashboard, Environment)> {
        let env = self.environment()?;
        if self.verbose {
            eprintln!("Home: {}", env.home.display());
            eprintln!("Workspaces: {}", env.workspaces.join(", "));
        }
        Ok((Dashboard::from_environment(&env), env))
    }
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}
