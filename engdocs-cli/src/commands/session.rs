//! Per-command setup shared by every subcommand.

use anyhow::Result;
use engdocs_core::{CollectionSummary, Environment, FatalError, Program, ResultTable};
use engdocs_feeds::FeedDescriptor;
use engdocs_fetch::{
    collect, list_programs, DebugDump, FetchSettings, HttpClient, Probe, ProbeResult,
    DEFAULT_DEBUG_DIR,
};
use engdocs_store::Config;
use tracing::info;

use crate::Cli;

/// Configuration plus the HTTP client and debug writer built from it.
pub struct Session {
    /// Validated configuration.
    pub config: Config,
    client: HttpClient,
    settings: FetchSettings,
    dump: DebugDump,
}

impl Session {
    /// Loads configuration, optionally forcing an environment.
    pub fn open(cli: &Cli, environment: Option<Environment>) -> Result<Self> {
        let mut config = Config::load(cli.env_file.as_deref()).map_err(FatalError::from)?;
        if let Some(environment) = environment {
            if config.environment != environment {
                info!("Switching to {} environment", environment);
            }
            config = config.with_environment(environment);
        }

        let settings = FetchSettings::new(config.timeout, config.max_retries);
        let dump = DebugDump::new(cli.output_dir.join(DEFAULT_DEBUG_DIR), config.debug);
        let client = HttpClient::new()?;

        Ok(Self {
            config,
            client,
            settings,
            dump,
        })
    }

    /// Whether debug dumps are written.
    pub fn debug(&self) -> bool {
        self.dump.is_enabled()
    }

    /// Runs the connectivity probe. Never fails.
    pub async fn probe(&self) -> ProbeResult {
        Probe::new(self.config.api_base_url(), &self.config.api_key)
            .with_environment(self.config.environment.label())
            .with_debug(self.config.debug)
            .check(&self.client, &self.settings)
            .await
    }

    /// Fetches the program catalogue.
    pub async fn programs(&self) -> Result<Vec<Program>> {
        let programs = list_programs(
            &self.client,
            self.config.api_base_url(),
            &self.config.api_key,
            &self.settings,
            &self.dump,
        )
        .await?;
        Ok(programs)
    }

    /// Collects one feed across `programs`.
    pub async fn collect(
        &self,
        descriptor: &FeedDescriptor,
        programs: &[Program],
    ) -> (ResultTable, CollectionSummary) {
        let query = descriptor.query(
            self.config.api_base_url(),
            &self.config.api_key,
            &self.config.date_ini_text(),
            &self.config.date_end_text(),
        );
        collect(&self.client, &query, programs, self.settings, &self.dump).await
    }
}
