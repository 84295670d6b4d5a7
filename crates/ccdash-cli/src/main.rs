mod cli;
mod commands;
mod interactive;
mod report;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use commands::Options;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,ccdash=debug,ccdash_core=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up Ctrl+C handler for graceful interruption
    ctrlc::set_handler(|| {
        eprintln!("\n\nInterrupted by user (Ctrl+C)");
        std::process::exit(130); // Standard exit code for SIGINT
    })
    .context("Failed to set Ctrl+C handler")?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = Options::from_cli(&cli);
    tracing::debug!(
        dry_run = options.dry_run,
        no_config = options.no_config,
        "starting ccdash"
    );

    match &cli.command {
        Commands::Scan => {
            commands::Scan::execute(&options)
                .await
                .context("Failed to execute scan command")?;
        }
        Commands::Project { path } => {
            commands::Project::execute(path, &options)
                .await
                .context("Failed to execute project command")?;
        }
        Commands::Global => {
            commands::Global::execute(&options)
                .await
                .context("Failed to execute global command")?;
        }
        Commands::Compare {
            left,
            right,
            unified,
        } => {
            commands::Compare::execute(left, right, *unified, false, &options)
                .await
                .context("Failed to execute compare command")?;
        }
        Commands::CompareRaw {
            left,
            right,
            unified,
        } => {
            commands::Compare::execute(left, right, *unified, true, &options)
                .await
                .context("Failed to execute compare-raw command")?;
        }
        Commands::Write { path, from } => {
            commands::WriteFile::execute(path, from.as_deref(), &options)
                .await
                .context("Failed to execute write command")?;
        }
        Commands::Copy { source, dest } => {
            commands::CopyFile::execute(source, dest, &options)
                .await
                .context("Failed to execute copy command")?;
        }
        Commands::Config => {
            commands::Config::execute(&options).context("Failed to execute config command")?;
        }
    }

    Ok(())
}
