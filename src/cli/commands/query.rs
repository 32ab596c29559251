use anyhow::{Context, Result};

use super::top_k_or;
use crate::cli::output::results_table;
use crate::cli::types::QueryArgs;
use crate::infrastructure::setup::AppServices;

/// Handle the query command
pub async fn execute(args: QueryArgs, services: &AppServices, json: bool) -> Result<()> {
    let query = services.query(services.generator()?);
    let top_k = top_k_or(args.top_k, query.default_top_k());

    if args.retrieve_only {
        let results = query
            .retrieve(&args.question, top_k)
            .await
            .context("Failed to retrieve posts")?;
        if json {
            println!("{}", serde_json::to_string_pretty(&results)?);
        } else {
            println!("{}", results_table(&results));
        }
        return Ok(());
    }

    let answer = query
        .answer(&args.question, top_k)
        .await
        .context("Failed to answer question")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("{}", answer.answer.trim_end());
        println!("\nSources:");
        println!("{}", results_table(&answer.results));
    }
    Ok(())
}
