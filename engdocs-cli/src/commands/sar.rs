//! SAR command - safety analysis reports.
//!
//! The SAR feed is registered as Production-only, so the run ignores
//! `GET_DATA_FROM_QAS`. No program mapping or validation applies.

use anyhow::Result;
use engdocs_core::Schema;
use engdocs_feeds::repair_dates;

use super::run::Job;
use crate::Cli;

const JOB: Job = Job {
    title: "SAR",
    schema: Schema::Sar,
    stem: "getSAR",
    uses_mapping: false,
};

/// Runs the sar command.
pub async fn run(cli: &Cli) -> Result<()> {
    let prepared = JOB.prepare(cli).await?;
    let (mut table, totals) = prepared.collect(JOB.schema).await;

    repair_dates(&mut table);

    prepared.finish(cli, &JOB, table, totals)
}
