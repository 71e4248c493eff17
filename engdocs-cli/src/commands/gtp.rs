//! GTP command - ground test proposals.

use anyhow::Result;
use engdocs_core::Schema;
use engdocs_store::validate;

use super::run::{apply_mapping, Job};
use crate::Cli;

const JOB: Job = Job {
    title: "GTPs",
    schema: Schema::Gtp,
    stem: "getGTPs",
    uses_mapping: true,
};

/// Runs the gtp command.
pub async fn run(cli: &Cli) -> Result<()> {
    let prepared = JOB.prepare(cli).await?;
    let (mut table, totals) = prepared.collect(JOB.schema).await;

    apply_mapping(cli, &mut table)?;
    validate(&mut table, JOB.schema);

    prepared.finish(cli, &JOB, table, totals)
}
