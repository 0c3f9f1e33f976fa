//! Binary entry point: resolve the configuration, open (and on first run seed)
//! the database, then drive the ratatui event loop until the user exits.
use std::fs::{self, File};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use prof_simulator::{is_fresh, run_app, seed_database, App, AppConfig, AppKind, Cli, DataStore};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = AppConfig::from_cli(Cli::parse())?;
    init_tracing(&config)?;

    let fresh = is_fresh(&config.database_path);
    let store = DataStore::open(&config.database_path)?;
    info!(path = %config.database_path.display(), fresh, kind = ?config.kind, "database ready");

    if fresh && config.kind == AppKind::ProfSimulator {
        seed_database(&store, &config.seed_dir).context("failed to seed a new database")?;
    }

    let mut app = App::new(store, &config)?;
    run_app(&mut app)
}

/// The terminal belongs to the UI, so log lines go to a file instead.
fn init_tracing(config: &AppConfig) -> Result<()> {
    if let Some(parent) = config.log_file.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context("failed to create log directory")?;
        }
    }
    let file = File::options()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("failed to open log file {}", config.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
