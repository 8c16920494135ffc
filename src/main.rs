mod ids;
mod input;
mod logging;
mod models;
mod period;
mod repo;
mod report;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

const DB_FILE: &str = "expensetui.db";

fn main() -> Result<()> {
    let cli = run::Cli::parse();
    let data_dir = get_data_dir()?;
    logging::init(&data_dir)?;

    let db_path = cli.db.unwrap_or_else(|| data_dir.join(DB_FILE));
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting expensetui");

    let kv = store::SqliteStore::open(&db_path)?;
    let ledger = repo::Ledger::new(store::JsonStore::new(kv))
        .with_context(|| format!("Failed to load data from {}", db_path.display()))?;

    match cli.command {
        None => run::as_tui(&ledger),
        Some(command) => run::as_cli(command, &ledger),
    }
}

fn get_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "expensetui", "ExpenseTUI")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}
