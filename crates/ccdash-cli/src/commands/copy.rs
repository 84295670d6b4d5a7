use crate::commands::Options;
use crate::commands::common::print_json;
use crate::interactive::confirm_overwrite;
use crate::report;

pub struct CopyFile;

impl CopyFile {
    pub async fn execute(source: &str, dest: &str, options: &Options<'_>) -> anyhow::Result<()> {
        let (dashboard, _) = options.dashboard()?;
        let target = dashboard.expand(dest)?;

        if options.verbose {
            eprintln!("Copying {source} to {}", target.display());
        }

        if !options.dry_run && !confirm_overwrite(&target, options.yes)? {
            println!("Skipped {}", target.display());
            return Ok(());
        }

        let outcome = dashboard.copy_file(source, dest, options.dry_run).await?;

        if options.json {
            return print_json(&outcome);
        }

        print!("{}", report::mutation_summary(&outcome));
        Ok(())
    }
}
