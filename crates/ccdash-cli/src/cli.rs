use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Claude Configuration Dashboard
///
/// Discover projects carrying Claude configuration (CLAUDE.md, settings,
/// agents, hooks, MCP servers) and compare them
#[derive(Parser, Debug)]
#[command(name = "ccdash")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    pub yes: bool,

    /// Preview file changes without writing (dry-run)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Override home directory (default: your home; its .claude is the global config)
    #[arg(long, global = true, value_name = "PATH")]
    pub home: Option<String>,

    /// Workspace root to scan, repeatable (default: from config or ~/workspace)
    #[arg(short, long = "workspace", global = true, value_name = "PATH")]
    pub workspaces: Vec<String>,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", conflicts_with = "no_config")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true, conflicts_with = "config")]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover projects under the workspace roots
    Scan,

    /// Show the configuration of one project directory
    Project {
        /// Project root
        path: String,
    },

    /// Show the global configuration (~/.claude)
    Global,

    /// Compare two project directories
    Compare {
        /// Left project root
        left: String,

        /// Right project root
        right: String,

        /// Print the memory diff as a unified diff
        #[arg(long)]
        unified: bool,
    },

    /// Compare two arbitrary directories (a .claude directory is read as a config dir)
    CompareRaw {
        /// Left directory
        left: String,

        /// Right directory
        right: String,

        /// Print the memory diff as a unified diff
        #[arg(long)]
        unified: bool,
    },

    /// Write a configuration file, backing up what it replaces
    Write {
        /// Target file
        path: String,

        /// Read content from this file instead of stdin
        #[arg(long, value_name = "FILE")]
        from: Option<PathBuf>,
    },

    /// Copy a configuration file, backing up what it replaces
    Copy {
        /// Source file
        source: String,

        /// Destination file
        dest: String,
    },

    /// Show active configuration and where it came from
    Config,
}
