//! Gallery - a searchable gallery page generated from a JSON content document.

mod build;
mod cli;
mod config;
mod content;
mod init;
mod logger;
mod render;
mod search;
mod serve;
mod utils;
mod watch;

use anyhow::{Result, bail};
use build::build_site;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::{GalleryStore, load_state};
use init::new_site;
use search::run_search;
use serve::serve_site;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Init { name } => new_site(config, name.is_some()),
        Commands::Build { .. } => build_site(config, &load_state(&config.content_source())),
        Commands::Serve { .. } => {
            let store = Arc::new(GalleryStore::open(config.content_source()));
            build_site(config, &store.load())?;
            serve_site(config, store)
        }
        Commands::Search { query, json } => run_search(config, query, *json),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;

    // Validate config state based on command
    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => bail!("Config file not found."),
        _ => {}
    }

    if !cli.is_init() {
        config.validate()?;
    }

    Ok(config)
}
