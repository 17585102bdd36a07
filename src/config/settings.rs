//! Application settings loaded from environment variables.
//!
//! Everything except the Discord token lives here: feature toggles and the
//! numeric limits for the economy and leveling systems. The token itself is
//! read in `main` directly before use and never stored.

use crate::errors::{Error, Result};

/// Runtime configuration, environment-sourced with sensible defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection string
    pub database_url: String,
    /// Whether economy commands are enabled
    pub enable_economy: bool,
    /// Whether gambling/game commands are enabled
    pub enable_games: bool,
    /// Whether inbound messages are run through the spam heuristics
    pub enable_automod: bool,
    /// Active warnings at which the auto-action notice fires
    pub max_warnings: u64,
    /// Upper bound for XP awarded per message
    pub max_xp_per_message: i64,
    /// Minimum seconds between XP awards for the same user
    pub xp_cooldown_seconds: i64,
    /// Amount credited by the daily claim
    pub daily_coins: i64,
    /// Minimum base payout of the work command
    pub work_coins_min: i64,
    /// Maximum base payout of the work command
    pub work_coins_max: i64,
}

impl AppConfig {
    /// Loads the configuration from the process environment, applying
    /// defaults for anything unset and validating cross-field constraints.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://data/coin_keeper.sqlite?mode=rwc".to_string()),
            enable_economy: parse_bool(std::env::var("ENABLE_ECONOMY").ok(), true),
            enable_games: parse_bool(std::env::var("ENABLE_GAMES").ok(), true),
            enable_automod: parse_bool(std::env::var("ENABLE_AUTOMOD").ok(), true),
            max_warnings: u64::try_from(parse_i64(
                "MAX_WARNINGS",
                std::env::var("MAX_WARNINGS").ok(),
                5,
            )?)?,
            max_xp_per_message: parse_i64(
                "MAX_XP_PER_MESSAGE",
                std::env::var("MAX_XP_PER_MESSAGE").ok(),
                5,
            )?,
            xp_cooldown_seconds: parse_i64(
                "XP_COOLDOWN_SECONDS",
                std::env::var("XP_COOLDOWN_SECONDS").ok(),
                60,
            )?,
            daily_coins: parse_i64("DAILY_COINS", std::env::var("DAILY_COINS").ok(), 100)?,
            work_coins_min: parse_i64("WORK_COINS_MIN", std::env::var("WORK_COINS_MIN").ok(), 10)?,
            work_coins_max: parse_i64("WORK_COINS_MAX", std::env::var("WORK_COINS_MAX").ok(), 50)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.work_coins_min > self.work_coins_max {
            return Err(Error::Config {
                message: format!(
                    "WORK_COINS_MIN ({}) must not exceed WORK_COINS_MAX ({})",
                    self.work_coins_min, self.work_coins_max
                ),
            });
        }
        if self.max_xp_per_message < 1 {
            return Err(Error::Config {
                message: "MAX_XP_PER_MESSAGE must be at least 1".to_string(),
            });
        }
        if self.daily_coins < 1 {
            return Err(Error::Config {
                message: "DAILY_COINS must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses a `"true"`/`"false"` toggle, case-insensitively; anything absent
/// or unrecognized falls back to the default.
fn parse_bool(raw: Option<String>, default: bool) -> bool {
    raw.map_or(default, |v| match v.to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        _ => default,
    })
}

/// Parses an integer setting, reporting the offending variable by name.
fn parse_i64(key: &str, raw: Option<String>, default: i64) -> Result<i64> {
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse().map_err(|_| Error::Config {
            message: format!("{key} must be an integer, got '{v}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_bool_recognized_values() {
        assert!(parse_bool(Some("true".to_string()), false));
        assert!(parse_bool(Some("TRUE".to_string()), false));
        assert!(parse_bool(Some("1".to_string()), false));
        assert!(!parse_bool(Some("false".to_string()), true));
        assert!(!parse_bool(Some("no".to_string()), true));
    }

    #[test]
    fn test_parse_bool_defaults() {
        assert!(parse_bool(None, true));
        assert!(!parse_bool(None, false));
        assert!(parse_bool(Some("garbage".to_string()), true));
    }

    #[test]
    fn test_parse_i64_default_and_parse() {
        assert_eq!(parse_i64("X", None, 42).unwrap(), 42);
        assert_eq!(parse_i64("X", Some("17".to_string()), 42).unwrap(), 17);
        assert_eq!(parse_i64("X", Some(" 17 ".to_string()), 42).unwrap(), 17);
    }

    #[test]
    fn test_parse_i64_rejects_garbage() {
        let err = parse_i64("MAX_WARNINGS", Some("five".to_string()), 5).unwrap_err();
        assert!(matches!(err, Error::Config { message } if message.contains("MAX_WARNINGS")));
    }

    #[test]
    fn test_validate_rejects_inverted_work_range() {
        let config = AppConfig {
            database_url: String::new(),
            enable_economy: true,
            enable_games: true,
            enable_automod: true,
            max_warnings: 5,
            max_xp_per_message: 5,
            xp_cooldown_seconds: 60,
            daily_coins: 100,
            work_coins_min: 50,
            work_coins_max: 10,
        };
        assert!(config.validate().is_err());
    }
}
