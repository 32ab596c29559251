//! Blograg CLI entry point.

use anyhow::Result;
use clap::Parser;

use blograg::cli::{commands, handle_error, Cli, Commands};
use blograg::infrastructure::{AppServices, ConfigLoader, LoggerImpl};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(err) = run(cli).await {
        std::process::exit(handle_error(&err, json));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let _logger = LoggerImpl::init(&config.logging)?;
    let services = AppServices::new(config)?;

    match cli.command {
        Commands::Ingest(args) => commands::ingest::execute(args, &services, cli.json).await,
        Commands::Query(args) => commands::query::execute(args, &services, cli.json).await,
        Commands::Show { id } => commands::show::execute(id, &services, cli.json).await,
        Commands::Neighbors(args) => commands::neighbors::execute(args, &services, cli.json).await,
        Commands::List => commands::list::execute(&services, cli.json).await,
    }
}
