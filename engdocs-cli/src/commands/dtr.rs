//! DTR command - BDI documents and technical reports in one table.

use anyhow::Result;
use engdocs_core::Schema;
use engdocs_feeds::merge_finished_dates;
use engdocs_store::validate;
use tracing::info;

use super::run::{apply_mapping, Job};
use crate::Cli;

const JOB: Job = Job {
    title: "BDI AND TECHNICAL REPORTS",
    schema: Schema::Dtr,
    stem: "BDI_TechReports",
    uses_mapping: true,
};

/// Runs the dtr command.
pub async fn run(cli: &Cli) -> Result<()> {
    let prepared = JOB.prepare(cli).await?;
    // BDI rows first, then technical reports
    let (mut table, totals) = prepared.collect(JOB.schema).await;

    info!("Combining BDI and Technical Reports data...");
    apply_mapping(cli, &mut table)?;
    validate(&mut table, JOB.schema);
    merge_finished_dates(&mut table);

    prepared.finish(cli, &JOB, table, totals)
}
