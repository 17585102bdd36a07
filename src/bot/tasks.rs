//! Background tasks - store-scanning expiry sweeps and throttle eviction.
//!
//! Two independent polling loops scan the store on a fixed 30-second timer
//! and act on rows whose deadline has passed: due reminders are delivered
//! and marked sent, expired giveaways have winners drawn from the
//! announcement's reactions. Store or REST errors are logged and the loop
//! continues; nothing here retries with backoff.

use crate::core::{giveaway, reminder};
use crate::entities::giveaway::Model as GiveawayModel;
use crate::errors::Result;
use crate::throttle::{CooldownGate, RateLimiter};
use chrono::Utc;
use poise::serenity_prelude as serenity;
use rand::seq::SliceRandom;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// How often the store is scanned for due reminders and expired giveaways.
const SWEEP_INTERVAL_SECS: u64 = 30;
/// How often in-process throttle maps are evicted.
const GATE_SWEEP_INTERVAL_SECS: u64 = 600;
/// Window retained by the rate limiter between evictions.
const LIMITER_RETENTION_SECS: i64 = 3600;

/// Spawns the reminder and giveaway expiry loops.
pub fn spawn_expiry_sweepers(http: Arc<serenity::Http>, db: DatabaseConnection) {
    let reminder_http = Arc::clone(&http);
    let reminder_db = db.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            if let Err(err) = sweep_reminders(&reminder_http, &reminder_db).await {
                error!("Reminder sweep failed: {err}");
            }
        }
    });

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            if let Err(err) = sweep_giveaways(&http, &db).await {
                error!("Giveaway sweep failed: {err}");
            }
        }
    });

    info!("Expiry sweepers started ({SWEEP_INTERVAL_SECS}s interval)");
}

/// Spawns the uniform eviction loop for all in-process throttle maps.
pub fn spawn_gate_sweeper(gates: Vec<Arc<CooldownGate>>, limiter: Arc<RateLimiter>) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(GATE_SWEEP_INTERVAL_SECS));
        loop {
            ticker.tick().await;
            for gate in &gates {
                gate.sweep();
            }
            limiter.sweep(chrono::Duration::seconds(LIMITER_RETENTION_SECS));
        }
    });
}

/// Delivers every due reminder and marks it sent. A delivery failure is
/// logged but the row is still marked, so a dead channel cannot wedge the
/// sweep into redelivering forever.
async fn sweep_reminders(http: &Arc<serenity::Http>, db: &DatabaseConnection) -> Result<()> {
    let due = reminder::due_reminders(db, Utc::now()).await?;

    for item in due {
        let channel = serenity::ChannelId::new(u64::try_from(item.channel_id)?);
        let text = format!("⏰ <@{}> Reminder: {}", item.user_id, item.message);

        if let Err(err) = channel.say(http, text).await {
            error!("Failed to deliver reminder {}: {err}", item.id);
        }
        reminder::mark_sent(db, item.id).await?;
    }

    Ok(())
}

/// Resolves every expired giveaway. A resolution failure (deleted channel
/// or announcement message) voids the giveaway with no winners rather than
/// leaving it to fail on every subsequent sweep.
async fn sweep_giveaways(http: &Arc<serenity::Http>, db: &DatabaseConnection) -> Result<()> {
    let expired = giveaway::expired_giveaways(db, Utc::now()).await?;

    for item in expired {
        if let Err(err) = resolve_giveaway(http, db, &item).await {
            error!("Failed to resolve giveaway {}: {err}", item.id);
            giveaway::record_winners(db, item.id, &[]).await?;
        }
    }

    Ok(())
}

/// Draws winners for a giveaway from the 🎉 reactions on its announcement
/// message, records them, and announces the result in the channel. Bots are
/// excluded from the draw. Also used by the force-end and reroll commands.
pub async fn resolve_giveaway(
    http: &Arc<serenity::Http>,
    db: &DatabaseConnection,
    item: &GiveawayModel,
) -> Result<Vec<i64>> {
    let channel = serenity::ChannelId::new(u64::try_from(item.channel_id)?);
    let message_id = serenity::MessageId::new(u64::try_from(item.message_id)?);

    let message = http.get_message(channel, message_id).await?;
    let entrants = message
        .reaction_users(
            http,
            serenity::ReactionType::Unicode("🎉".to_string()),
            Some(100),
            None::<serenity::UserId>,
        )
        .await?;

    let pool: Vec<i64> = entrants
        .iter()
        .filter(|user| !user.bot)
        .filter_map(|user| i64::try_from(user.id.get()).ok())
        .collect();

    let count = usize::try_from(item.winners_count.max(0))?;
    let winners: Vec<i64> = {
        let mut rng = rand::thread_rng();
        pool.choose_multiple(&mut rng, count).copied().collect()
    };

    giveaway::record_winners(db, item.id, &winners).await?;

    let text = if winners.is_empty() {
        format!(
            "🎉 The giveaway for **{}** has ended with no valid entries.",
            item.prize
        )
    } else {
        let mentions: Vec<String> = winners.iter().map(|id| format!("<@{id}>")).collect();
        format!(
            "🎉 The giveaway for **{}** has ended! Congratulations {}!",
            item.prize,
            mentions.join(", ")
        )
    };
    channel.say(http, text).await?;

    Ok(winners)
}
