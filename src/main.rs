use lostfound::api;
use lostfound::core::state::{AppConfig, AppState, CONFIG_FILE};
use lostfound::store::Store;

use anyhow::{Context, Result};
use colored::*;
use std::env;
use std::fs;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    if env::args().any(|a| a == "init") {
        return init_workspace();
    }

    dotenvy::from_filename(".env").ok();

    let config = AppConfig::load(Path::new(CONFIG_FILE)).context("Failed to load config")?;
    println!("{} Campus Lost & Found starting", "📦".cyan());
    println!("   - Data dir: {}", config.data_dir.bold());
    println!(
        "   - Session TTL: {} minutes",
        config.session_ttl_minutes.to_string().yellow()
    );

    let state = AppState::new(config).context("Failed to open data store")?;
    println!("{} Flat-file store ready", "🗂️".green());

    api::start_server(state).await
}

fn init_workspace() -> Result<()> {
    if Path::new(CONFIG_FILE).exists() {
        println!("{}", "✅ Workspace is already initialized.".green());
        return Ok(());
    }
    let config = AppConfig::default();
    let toml = toml::to_string_pretty(&config)?;
    fs::write(CONFIG_FILE, toml)?;

    // Creates the data dir and seeds the default admin account.
    Store::open(
        Path::new(&config.data_dir),
        &config.default_admin_user,
        &config.default_admin_password,
    )?;

    println!(
        "{}",
        format!("🧾 Initialized. Edit {} before going live.", CONFIG_FILE)
            .green()
            .bold()
    );
    Ok(())
}
