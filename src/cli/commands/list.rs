use anyhow::{Context, Result};

use crate::cli::output::records_table;
use crate::infrastructure::setup::AppServices;

/// Handle the list command
pub async fn execute(services: &AppServices, json: bool) -> Result<()> {
    let records = services
        .store
        .get_all()
        .await
        .context("Failed to load records")?;

    if json {
        let ids: Vec<&String> = records.keys().collect();
        println!("{}", serde_json::to_string_pretty(&ids)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No embeddings found in the store.");
        return Ok(());
    }

    println!("{}", records_table(&records));
    println!(
        "\nShowing {} record{} in '{}'",
        records.len(),
        if records.len() == 1 { "" } else { "s" },
        services.store.namespace()
    );
    Ok(())
}
