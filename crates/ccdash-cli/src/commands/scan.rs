use crate::commands::Options;
use crate::commands::common::print_json;
use crate::report;

pub struct Scan;

impl Scan {
    pub async fn execute(options: &Options<'_>) -> anyhow::Result<()> {
        if options.verbose {
            eprintln!("Executing scan command");
        }

        let (dashboard, env) = options.dashboard()?;
        let scan = dashboard.scan_workspaces(&env.workspaces).await?;

        if options.json {
            return print_json(&scan);
        }

        print!("{}", report::scan_summary(&scan));
        Ok(())
    }
}
