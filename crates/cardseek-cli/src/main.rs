//! `cardseek`: search trading-card JSON files from the command line.

mod cli;
mod output;

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use cardseek::{CardStore, StoreConfig};
use clap::Parser;

use crate::cli::Args;
use crate::output::{render_cards, render_fields};

fn main() -> ExitCode {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    match run(&args) {
        Ok(out) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(err) = stdout.write_all(out.as_bytes()) {
                log::debug!("failed to write output: {}", err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Runs one invocation and returns what to print.
fn run(args: &Args) -> Result<String> {
    let store = CardStore::new();
    if args.fields {
        return Ok(render_fields(store.fields()));
    }

    let store = load_store(store, args)?;
    let found = store
        .search(&args.query)
        .with_context(|| format!("invalid query '{}'", args.query))?;
    log::info!("{} of {} cards match", found.len(), store.len());

    if args.count {
        return Ok(format!("{}\n", found.len()));
    }
    render_cards(&found, args.output)
}

fn load_store(mut store: CardStore, args: &Args) -> Result<CardStore> {
    if let Some(path) = &args.config {
        let config = read_config(path)?;
        store
            .seed(&config)
            .with_context(|| format!("failed to seed cards from {}", config.directory.display()))?;
    }

    for path in &args.cards {
        if path.is_dir() {
            store
                .seed(&StoreConfig::new(path))
                .with_context(|| format!("failed to seed cards from {}", path.display()))?;
        } else {
            store
                .load_file(path)
                .with_context(|| format!("failed to load cards from {}", path.display()))?;
        }
    }
    Ok(store)
}

fn read_config(path: &Path) -> Result<StoreConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let mut config: StoreConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("invalid config {}", path.display()))?;
    if config.directory.is_relative() {
        if let Some(parent) = path.parent() {
            config.directory = parent.join(&config.directory);
        }
    }
    Ok(config)
}
