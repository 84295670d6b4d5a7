use crate::commands::Options;
use crate::commands::common::print_json;
use crate::report;

pub struct Project;

impl Project {
    pub async fn execute(path: &str, options: &Options<'_>) -> anyhow::Result<()> {
        if options.verbose {
            eprintln!("Executing project command for {path}");
        }

        let (dashboard, _) = options.dashboard()?;
        let project = dashboard.load_project(path).await?;

        if options.json {
            return print_json(&project);
        }

        print!("{}", report::project_details(&project));
        Ok(())
    }
}
