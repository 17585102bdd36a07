//! Unified error types and result handling for `CoinKeeper`.
//!
//! Accessor-layer failures propagate with `?` and are only caught at the
//! framework boundary: the bot's `on_error` hook logs the detail and sends
//! the invoking user a generic failure message.

use thiserror::Error;

/// Unified error type for all `CoinKeeper` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration loading or validation failed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// A user-supplied amount was rejected (out of range or wrong sign).
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: i64,
    },

    /// A debit was requested that the stored balance cannot cover.
    #[error("Insufficient funds: balance is {current}, required {required}")]
    InsufficientFunds {
        /// Current stored balance
        current: i64,
        /// Amount the operation needed
        required: i64,
    },

    /// A member row was expected to exist but was not found.
    #[error("Member {user_id} not found in guild {guild_id}")]
    MemberNotFound {
        /// Discord user id
        user_id: i64,
        /// Discord guild id
        guild_id: i64,
    },

    /// Database error from `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable was missing.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// JSON (de)serialization failure (stored winner lists).
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the Serenity/Poise Discord framework.
    #[error("Discord framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// Numeric conversion failure (ids, limits, row counts).
    #[error("Integer conversion error: {0}")]
    IntConversion(#[from] std::num::TryFromIntError),
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
