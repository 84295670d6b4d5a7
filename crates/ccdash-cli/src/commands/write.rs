use std::io::Read;
use std::path::Path;

use anyhow::Context;

use crate::commands::Options;
use crate::commands::common::print_json;
use crate::interactive::confirm_overwrite;
use crate::report;

pub struct WriteFile;

impl WriteFile {
    pub async fn execute(
        path: &str,
        from: Option<&Path>,
        options: &Options<'_>,
    ) -> anyhow::Result<()> {
        let (dashboard, _) = options.dashboard()?;
        let target = dashboard.expand(path)?;

        let content = match from {
            Some(file) => std::fs::read(file)
                .with_context(|| format!("Failed to read {}", file.display()))?,
            None => {
                let mut buffer = Vec::new();
                std::io::stdin()
                    .read_to_end(&mut buffer)
                    .context("Failed to read stdin")?;
                buffer
            }
        };

        if !options.dry_run && !confirm_overwrite(&target, options.yes)? {
            println!("Skipped {}", target.display());
            return Ok(());
        }

        let outcome = dashboard.write_file(path, content, options.dry_run).await?;

        if options.json {
            return print_json(&outcome);
        }

        print!("{}", report::mutation_summary(&outcome));
        Ok(())
    }
}
