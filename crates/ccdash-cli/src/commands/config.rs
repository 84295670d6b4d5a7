use std::path::Path;

use ccdash_core::config::Environment;

use crate::commands::Options;
use crate::commands::common::print_json;

pub struct Config;

fn source_line(label: &str, path: Option<&Path>) -> String {
    let shown = path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string());
    format!("  {label:<8} {shown}")
}

impl Config {
    pub fn execute(options: &Options<'_>) -> anyhow::Result<()> {
        let loaded = options.load_config()?;
        let env = Environment::resolve(&loaded.config, &options.overrides)?;

        if options.json {
            return print_json(&loaded.config);
        }

        println!("=== Config files ===");
        if options.no_config {
            println!("  (skipped by --no-config)");
        } else {
            let files = &loaded.files;
            println!("{}", source_line("global", files.global.as_deref()));
            println!("{}", source_line("project", files.project.as_deref()));
            println!("{}", source_line("local", files.local.as_deref()));
            println!("{}", source_line("cli", files.cli.as_deref()));
        }

        println!("\n=== Merged settings ===");
        print!("{}", loaded.config.to_toml()?);

        println!("\n=== Effective ===");
        println!("Home: {}", env.home.display());
        println!("Workspaces:");
        for workspace in &env.workspaces {
            println!("  - {workspace}");
        }

        Ok(())
    }
}
