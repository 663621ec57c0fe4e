//! glpi-inventory CLI
//!
//! Runs one inventory pass against a GLPI instance and prints the resulting
//! host/group inventory as JSON.

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

use glpi_client::{Credentials, HttpClient};
use glpi_inventory::{Inventory, InventoryRunner};

use crate::config::Config;

#[derive(Parser)]
#[command(name = "glpi-inventory")]
#[command(about = "Host inventory from a GLPI asset database", long_about = None)]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    let credentials = Credentials::from_env()?;

    let client = HttpClient::new(&config.glpi_url, credentials)?;
    let mut runner = InventoryRunner::new(Arc::new(client));
    if let Some(asset_type) = config.asset_type {
        runner = runner.with_asset_type(asset_type);
    }
    if let Some(limit) = config.limit {
        runner = runner.with_limit(limit);
    }

    let mut inventory = Inventory::default();
    runner.run(&mut inventory).await?;

    println!("{}", serde_json::to_string_pretty(&inventory)?);
    Ok(())
}
