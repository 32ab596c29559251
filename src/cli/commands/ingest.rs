use anyhow::{Context, Result};

use crate::cli::output::report_table;
use crate::cli::types::IngestArgs;
use crate::infrastructure::setup::AppServices;

/// Handle the ingest command
pub async fn execute(args: IngestArgs, services: &AppServices, json: bool) -> Result<()> {
    let source = services.source(args.local_dir)?;
    let ingestion = services.ingestion(args.limit);

    let report = ingestion
        .ingest_all(source.as_ref())
        .await
        .with_context(|| format!("Failed to list documents from the {} source", source.name()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.total() == 0 {
        println!("No documents found.");
        return Ok(());
    }

    println!("{}", report_table(&report));
    println!(
        "\n{} stored, {} already present, {} failed",
        report.stored.len(),
        report.skipped.len(),
        report.failed.len()
    );
    Ok(())
}
