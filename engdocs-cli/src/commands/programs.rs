//! Programs command - list the program catalogue.

use anyhow::Result;
use tracing::info;

use super::Session;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Runs the programs command.
pub async fn run(cli: &Cli) -> Result<()> {
    info!("Listing programs");

    let session = Session::open(cli, None)?;
    let programs = session.programs().await?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);

            println!("{}", formatter.format_programs_header());
            println!("{}", "─".repeat(70));

            for program in &programs {
                println!("{}", formatter.format_program_line(program));
            }

            println!();
            println!(
                "Total: {} programs ({})",
                programs.len(),
                session.config.environment
            );
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&programs)?);
        }
    }

    Ok(())
}
