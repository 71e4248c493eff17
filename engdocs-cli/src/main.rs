// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! engdocs CLI - engineering document extraction from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Ground test proposals to getGTPs.csv / getGTPs.xlsm
//! engdocs gtp
//!
//! # BDI documents and technical reports to BDI_TechReports.csv / .xlsm
//! engdocs dtr
//!
//! # Safety analysis reports (always Production)
//! engdocs sar
//!
//! # Program catalogue as JSON
//! engdocs programs --format json --pretty
//!
//! # Connectivity only
//! engdocs check
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use engdocs_core::{ExitCategory, FatalError};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, filter::LevelFilter, prelude::*, EnvFilter};

use commands::{check, dtr, gtp, programs, sar};

// ============================================================================
// CLI Definition
// ============================================================================

/// engdocs CLI - engineering document extraction.
#[derive(Parser)]
#[command(name = "engdocs")]
#[command(about = "Engineering document extraction CLI")]
#[command(long_about = r#"
engdocs pulls engineering documents from the systemTest API, one program and
one page at a time, and exports them to CSV and a macro-enabled workbook.

Systems:
  • GTP - ground test proposals (gtp)
  • DTR - BDI documents and technical reports (dtr)
  • SAR - safety analysis reports, Production only (sar)

Only works on-site or through a VPN connection to the corporate network.
Settings are read from a .env file (API_KEY, DATE_INI, DATE_END,
GET_DATA_FROM_QAS, API_TIMEOUT, MAX_RETRIES, DEBUG).
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Environment file. Defaults to the first .env found from the working directory up.
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Directory for CSV, workbook and debug output.
    #[arg(long, short, default_value = ".", global = true)]
    pub output_dir: PathBuf,

    /// Macro-enabled workbook template.
    #[arg(long, default_value = engdocs_store::DEFAULT_TEMPLATE, global = true)]
    pub template: PathBuf,

    /// Program-group mapping file.
    #[arg(long, default_value = engdocs_store::MAPPING_FILE, global = true)]
    pub mapping: PathBuf,

    /// Overwrite an existing workbook without asking.
    #[arg(long, short, global = true)]
    pub yes: bool,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (warnings and errors only on the console).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract ground test proposals.
    Gtp,

    /// Extract BDI documents and technical reports.
    Dtr,

    /// Extract safety analysis reports.
    Sar,

    /// List the program catalogue.
    #[command(visible_alias = "p")]
    Programs,

    /// Check API connectivity.
    Check,
}

impl Commands {
    /// Name used for the log file.
    fn log_name(&self) -> &'static str {
        match self {
            Self::Gtp => "getGTPs",
            Self::Dtr => "getDTRs",
            Self::Sar => "getSAR",
            Self::Programs => "programs",
            Self::Check => "check",
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(cli: &Cli) -> Result<()> {
    let console_default = if cli.quiet {
        "warn"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(console_default));
    let file_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    std::fs::create_dir_all(&cli.output_dir)?;
    let log_path = cli
        .output_dir
        .join(format!("{}.log", cli.command.log_name()));
    let log_file = File::create(&log_path)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .with_filter(file_level),
        )
        .init();

    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = setup_logging(&cli) {
        eprintln!("Error: cannot set up logging: {e}");
        std::process::exit(ExitCategory::General.code());
    }

    let result = match &cli.command {
        Commands::Gtp => gtp::run(&cli).await,
        Commands::Dtr => dtr::run(&cli).await,
        Commands::Sar => sar::run(&cli).await,
        Commands::Programs => programs::run(&cli).await,
        Commands::Check => check::run(&cli).await,
    };

    if let Err(e) = result {
        let category = e
            .downcast_ref::<FatalError>()
            .map_or(ExitCategory::General, FatalError::category);
        if category == ExitCategory::Cancelled {
            tracing::info!("{}", e);
        } else {
            tracing::error!("Error: {:#}", e);
        }
        std::process::exit(category.code());
    }
}
