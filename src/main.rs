//! `CoinKeeper` binary entry point: initializes logging, loads the
//! configuration, prepares the database, and runs the bot.

use coin_keeper::config::{self, AppConfig};
use coin_keeper::errors::{Error, Result};
use dotenvy::dotenv;
use std::{env, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; non-fatal, env vars can be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application configuration
    let app_config = AppConfig::from_env()
        .inspect_err(|e| error!("Critical error loading configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize the database (the default URL lives under ./data)
    std::fs::create_dir_all("data")?;
    let database = config::database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&database)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create database tables: {e}"))?;

    // 5. Load the work-command job table (config.toml or built-in defaults)
    let jobs = config::jobs::load_jobs_or_default()
        .inspect_err(|e| error!("Failed to load job table: {e}"))?;

    // 6. Run the bot. The token is loaded here, directly before use, and is
    // never stored in AppConfig; the process refuses to start without it.
    let token = env::var("DISCORD_TOKEN")
        .inspect_err(|e| error!("DISCORD_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    coin_keeper::bot::run_bot(token, Arc::new(app_config), database, jobs).await
}
