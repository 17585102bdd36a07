//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `CoinKeeper`: all slash
//! commands, the message-XP event handler, the background expiry sweeps,
//! and the framework error hook that implements the error taxonomy
//! (validation and permission failures are specific, internal failures are
//! generic to the user and detailed in the log).

/// Discord command implementations (economy, leveling, moderation, ...)
pub mod commands;
/// Discord event handlers (message XP)
pub mod handlers;
/// Background expiry sweeps and gate eviction
pub mod tasks;

use crate::config::AppConfig;
use crate::config::jobs::JobProfile;
use crate::errors::{Error, Result};
use crate::throttle::{CooldownGate, RateLimiter};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Shared data available to all bot commands and handlers.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Runtime configuration (toggles and numeric limits)
    pub config: Arc<AppConfig>,
    /// Job table the work command draws from
    pub jobs: Vec<JobProfile>,
    /// Work cooldown (1 hour)
    pub work_gate: Arc<CooldownGate>,
    /// Crime cooldown (2 hours)
    pub crime_gate: Arc<CooldownGate>,
    /// Rob cooldown (20 minutes)
    pub rob_gate: Arc<CooldownGate>,
    /// Per-user message-XP gate
    pub xp_gate: Arc<CooldownGate>,
    /// Sliding-window spam brake for game commands
    pub limiter: Arc<RateLimiter>,
}

impl BotData {
    /// Creates the shared bot context with empty throttle state.
    #[must_use]
    pub fn new(database: DatabaseConnection, config: Arc<AppConfig>, jobs: Vec<JobProfile>) -> Self {
        Self {
            database,
            config,
            jobs,
            work_gate: Arc::new(CooldownGate::new()),
            crime_gate: Arc::new(CooldownGate::new()),
            rob_gate: Arc::new(CooldownGate::new()),
            xp_gate: Arc::new(CooldownGate::new()),
            limiter: Arc::new(RateLimiter::new()),
        }
    }
}

/// Type alias for the poise context used by every command.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            panic!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {error:?}", ctx.command().name);
            if let Err(e) = ctx
                .say("❌ An unexpected error occurred. Please try again later.")
                .await
            {
                error!("Failed to send error message: {e}");
            }
        }
        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
            // Audit trail for attempted privileged actions, not a system fault
            warn!(
                user = %ctx.author().id,
                command = %ctx.command().name,
                "privileged command attempted without permission"
            );
            if let Err(e) = ctx
                .say("❌ You do not have permission to use this command.")
                .await
            {
                error!("Failed to send permission message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {e}");
            }
        }
    }
}

/// Builds the poise framework, registers the slash commands, spawns the
/// background sweeps, and runs the gateway client until it exits.
pub async fn run_bot(
    token: String,
    config: Arc<AppConfig>,
    database: DatabaseConnection,
    jobs: Vec<JobProfile>,
) -> Result<()> {
    let options = poise::FrameworkOptions {
        commands: vec![
            commands::ping(),
            commands::help(),
            commands::balance(),
            commands::daily(),
            commands::work(),
            commands::crime(),
            commands::rob(),
            commands::give(),
            commands::gamble(),
            commands::transactions(),
            commands::level(),
            commands::leaderboard(),
            commands::addxp(),
            commands::setlevel(),
            commands::resetxp(),
            commands::warn(),
            commands::warnings(),
            commands::clearwarnings(),
            commands::remind(),
            commands::reminders(),
            commands::reminder_delete(),
            commands::giveaway_start(),
            commands::giveaway_end(),
            commands::giveaway_reroll(),
        ],
        event_handler: |ctx, event, framework, data| {
            Box::pin(handlers::event_handler(ctx, event, framework, data))
        },
        on_error: |error| Box::pin(on_error(error)),
        ..Default::default()
    };

    let data = BotData::new(database.clone(), Arc::clone(&config), jobs);
    let gates = vec![
        Arc::clone(&data.work_gate),
        Arc::clone(&data.crime_gate),
        Arc::clone(&data.rob_gate),
        Arc::clone(&data.xp_gate),
    ];
    let limiter = Arc::clone(&data.limiter);

    let framework = poise::Framework::builder()
        .options(options)
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                tasks::spawn_expiry_sweepers(ctx.http.clone(), database);
                tasks::spawn_gate_sweeper(gates, limiter);

                Ok(data)
            })
        })
        .build();

    // Message content is needed for the XP-on-message handler
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("Setting up Serenity client for the Poise framework...");
    let client = serenity::Client::builder(&token, intents)
        .framework(framework)
        .await;

    match client {
        Ok(mut c) => {
            info!("Starting bot client...");
            if let Err(why) = c.start().await {
                error!("Client error: {why:?}");
                return Err(why.into());
            }
        }
        Err(e) => {
            error!("Error creating client: {e:?}");
            return Err(e.into());
        }
    }
    Ok(())
}
