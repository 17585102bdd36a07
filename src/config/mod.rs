/// Database connection and table creation
pub mod database;

/// Work-command job table from config.toml
pub mod jobs;

/// Environment-sourced application settings
pub mod settings;

pub use settings::AppConfig;
