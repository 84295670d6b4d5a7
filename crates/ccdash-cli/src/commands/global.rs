use crate::commands::Options;
use crate::commands::common::print_json;
use crate::report;

pub struct Global;

impl Global {
    pub async fn execute(options: &Options<'_>) -> anyhow::Result<()> {
        let (dashboard, _) = options.dashboard()?;
        let global = dashboard.load_global().await?;

        if options.json {
            return print_json(&global);
        }

        print!("{}", report::project_details(&global));
        Ok(())
    }
}
