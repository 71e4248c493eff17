//! Check command - connectivity probe only.

use anyhow::{bail, Result};

use super::Session;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the check command. Fails when neither probe stage answered.
pub async fn run(cli: &Cli) -> Result<()> {
    let session = Session::open(cli, None)?;
    session.config.log_summary();

    let result = session.probe().await;
    let base_url = session.config.api_base_url();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_probe(&result, base_url));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_probe(&result, base_url)?);
        }
    }

    if !result.success() {
        bail!("API at {} is unreachable", base_url);
    }
    Ok(())
}
