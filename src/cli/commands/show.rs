use anyhow::{Context, Result};

use crate::infrastructure::setup::AppServices;

/// Handle the show command
pub async fn execute(id: String, services: &AppServices, json: bool) -> Result<()> {
    let record = services
        .store
        .get(&id)
        .await
        .with_context(|| format!("Failed to load record '{id}'"))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    println!("\nRecord Details:");
    println!("─────────────────────────────────────────");
    println!("ID:          {}", record.id);
    println!("Namespace:   {}", services.store.namespace());
    println!("Dimension:   {}", record.dimension());
    match &record.content {
        Some(content) => {
            println!("\nContent:");
            println!("{content}");
        }
        None => println!("\n(no stored content)"),
    }
    Ok(())
}
