use anyhow::{Context, Result};

use super::top_k_or;
use crate::cli::output::results_table;
use crate::cli::types::NeighborsArgs;
use crate::infrastructure::setup::AppServices;

/// Handle the neighbors command
pub async fn execute(args: NeighborsArgs, services: &AppServices, json: bool) -> Result<()> {
    let query = services.query(services.generator()?);
    let top_k = top_k_or(args.top_k, query.default_top_k());

    let results = query
        .neighbors(&args.id, top_k)
        .await
        .with_context(|| format!("Failed to find neighbours of '{}'", args.id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Posts closest to {}:", args.id);
        println!("{}", results_table(&results));
    }
    Ok(())
}
