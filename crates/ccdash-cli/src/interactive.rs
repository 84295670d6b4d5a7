//! Confirmation before overwriting configuration files

use std::path::Path;

use anyhow::{Context, Result, bail};
use dialoguer::Confirm;
use dialoguer::console::Term;

/// Ask before replacing `target`
///
/// Returns true when `target` does not exist, `assume_yes` is set or the
/// user agrees.
///
/// # Errors
///
/// Returns an error when a prompt is needed but stderr is not a terminal,
/// or terminal interaction fails.
pub fn confirm_overwrite(target: &Path, assume_yes: bool) -> Result<bool> {
    if assume_yes || !target.exists() {
        return Ok(true);
    }

    if !Term::stderr().is_term() {
        bail!(
            "{} exists; pass --yes to overwrite it without a prompt",
            target.display()
        );
    }

    Confirm::new()
        .with_prompt(format!(
            "Overwrite {}? A backup copy is kept next to it",
            target.display()
        ))
        .default(false)
        .interact()
        .context("Failed to read user input")
}
