//! Message-event handler - XP awards driven by chat activity.
//!
//! Every non-bot guild message can earn its author a small random amount of
//! XP, at most once per configured cooldown window. The accessor reports
//! whether a level threshold was crossed; the congratulations message is
//! sent from here, never from the accessor.

use crate::bot::BotData;
use crate::core::profile;
use crate::errors::{Error, Result};
use crate::validate;
use chrono::Duration;
use poise::serenity_prelude as serenity;
use rand::Rng;
use tracing::warn;

/// Framework-level event dispatcher wired into the poise options.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::Message { new_message } = event {
        award_message_xp(ctx, new_message, data).await?;
    }
    Ok(())
}

async fn award_message_xp(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &BotData,
) -> Result<()> {
    if message.author.bot {
        return Ok(());
    }
    let Some(guild) = message.guild_id else {
        return Ok(());
    };

    if data.config.enable_automod && validate::looks_like_spam(&message.content) {
        warn!(
            user = %message.author.id,
            guild = %guild,
            "message matched spam heuristics; no XP awarded"
        );
        return Ok(());
    }

    let user_id = i64::try_from(message.author.id.get())?;
    let guild_id = i64::try_from(guild.get())?;

    // At most one award per user per cooldown window
    if data
        .xp_gate
        .check_and_set(user_id, Duration::seconds(data.config.xp_cooldown_seconds))
        .is_err()
    {
        return Ok(());
    }

    profile::get_or_create_user(&data.database, user_id, Some(&message.author.name)).await?;

    let amount = {
        let mut rng = rand::thread_rng();
        rng.gen_range(1..=data.config.max_xp_per_message)
    };
    let gain = profile::add_xp(&data.database, user_id, guild_id, amount).await?;

    if gain.level_up {
        let text = format!(
            "🎉 Congratulations <@{user_id}>, you reached level {}!",
            gain.new_level
        );
        message.channel_id.say(&ctx.http, text).await?;
    }

    Ok(())
}
