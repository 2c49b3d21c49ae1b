//! Filmdesk - conversational film catalog service
//!
#![doc = "Filmdesk - conversational film catalog service"]
#![doc = "Main entry point for the Filmdesk binary."]

use anyhow::Result;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use filmdesk::catalog::Catalog;
use filmdesk::cli::{Cli, Commands};
use filmdesk::commands;
use filmdesk::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse_args();

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    // One shared catalog instance for the whole process; dialogues receive
    // it by reference, never through module globals.
    let catalog = match &config.catalog.seed_path {
        Some(path) => {
            tracing::info!("Seeding catalog from {}", path.display());
            Arc::new(Catalog::from_seed_file(path)?)
        }
        None => Arc::new(Catalog::new()),
    };

    match cli.command {
        Commands::Chat { owner } => {
            tracing::info!("Starting console chat for owner {}", owner);
            commands::chat::run_chat(config, catalog, owner).await?;
            Ok(())
        }
        Commands::List { json } => {
            commands::list::run_list(catalog, json)?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("filmdesk=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
