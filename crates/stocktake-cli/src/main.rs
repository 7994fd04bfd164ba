//! Stocktake CLI
//!
//! Runs the inventory API server and administers user accounts.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use stocktake_cli::cli::{Cli, Command};
use stocktake_cli::{config_handlers, logging, serve, user_handlers};
use stocktake_core::StocktakeConfig;
use stocktake_store::MongoStore;

fn load_config(config_path: Option<&str>) -> Result<StocktakeConfig> {
    let config = StocktakeConfig::load(config_path).context("Failed to load configuration")?;
    logging::init(&config.logging.level);
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Serve { port, memory } => {
            let config = load_config(config_path)?;
            serve::run(config, port, memory).await?;
        }
        Command::User { action } => {
            let config = load_config(config_path)?;
            let store = MongoStore::connect(&config.database)
                .await
                .with_context(|| format!("Failed to connect to {}", config.database.uri))?;
            user_handlers::handle_user_command(&store, action).await?;
        }
        Command::Config { action } => {
            logging::init(&StocktakeConfig::default().logging.level);
            config_handlers::handle_config_command(config_path, action)?;
        }
    }

    Ok(())
}
