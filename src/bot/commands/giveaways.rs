//! Giveaway Discord commands - start, force-end, and reroll.
//!
//! Starting a giveaway posts the 🎉 announcement message and records it;
//! resolution (drawing winners from the reactions) is shared with the
//! background sweep in `bot::tasks`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, tasks},
        core::giveaway,
        errors::{Error, Result},
        validate,
    };
    use chrono::{Duration, Utc};
    use poise::serenity_prelude as serenity;

    const PRIZE_MAX_LENGTH: usize = 200;
    /// Two weeks, in minutes.
    const DURATION_MAX_MINUTES: i64 = 20_160;
    const WINNERS_MAX: i64 = 20;

    /// Starts a giveaway in this channel.
    #[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
    pub async fn giveaway_start(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Minutes until the draw"] duration_minutes: i64,
        #[description = "Number of winners"] winners: i64,
        #[description = "Prize description"] prize: String,
    ) -> Result<()> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let Ok(duration_minutes) =
            validate::int_in_range(duration_minutes, 1, DURATION_MAX_MINUTES)
        else {
            ctx.say(format!(
                "❌ Duration must be between 1 and {DURATION_MAX_MINUTES} minutes."
            ))
            .await?;
            return Ok(());
        };
        let Ok(winners) = validate::int_in_range(winners, 1, WINNERS_MAX) else {
            ctx.say(format!("❌ Winner count must be between 1 and {WINNERS_MAX}."))
                .await?;
            return Ok(());
        };

        let prize = validate::sanitize_text(&prize, PRIZE_MAX_LENGTH);
        if prize.trim().is_empty() {
            ctx.say("❌ A prize description is required.").await?;
            return Ok(());
        }

        let end_time = Utc::now() + Duration::minutes(duration_minutes);

        // The reply itself is the announcement message users react to
        let handle = ctx
            .say(format!(
                "🎉 **GIVEAWAY** 🎉\nPrize: **{prize}**\nWinners: **{winners}**\nEnds: <t:{}:R>\nReact with 🎉 to enter!",
                end_time.timestamp()
            ))
            .await?;
        let message = handle.message().await?;
        message
            .react(
                ctx.serenity_context(),
                serenity::ReactionType::Unicode("🎉".to_string()),
            )
            .await?;

        let guild_id = i64::try_from(guild.get())?;
        let channel_id = i64::try_from(message.channel_id.get())?;
        let message_id = i64::try_from(message.id.get())?;
        let host_id = i64::try_from(ctx.author().id.get())?;

        let created = giveaway::create_giveaway(
            &ctx.data().database,
            guild_id,
            channel_id,
            message_id,
            prize,
            i32::try_from(winners)?,
            end_time,
            host_id,
        )
        .await?;

        ctx.send(
            poise::CreateReply::default()
                .content(format!("Giveaway #{} started.", created.id))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Ends a giveaway immediately and draws its winners.
    #[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
    pub async fn giveaway_end(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Giveaway id"] giveaway_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(item) = giveaway::get_giveaway(db, giveaway_id).await? else {
            ctx.say(format!("❌ Giveaway #{giveaway_id} was not found."))
                .await?;
            return Ok(());
        };
        if item.ended {
            ctx.say(format!("❌ Giveaway #{giveaway_id} has already ended."))
                .await?;
            return Ok(());
        }

        let winners =
            tasks::resolve_giveaway(&ctx.serenity_context().http, db, &item).await?;
        ctx.send(
            poise::CreateReply::default()
                .content(format!(
                    "🏁 Giveaway #{giveaway_id} ended with {} winner(s).",
                    winners.len()
                ))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }

    /// Redraws the winners of an ended giveaway.
    #[poise::command(slash_command, required_permissions = "MANAGE_GUILD")]
    pub async fn giveaway_reroll(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Giveaway id"] giveaway_id: i64,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let Some(item) = giveaway::get_giveaway(db, giveaway_id).await? else {
            ctx.say(format!("❌ Giveaway #{giveaway_id} was not found."))
                .await?;
            return Ok(());
        };
        if !item.ended {
            ctx.say(format!(
                "❌ Giveaway #{giveaway_id} is still running; end it first."
            ))
            .await?;
            return Ok(());
        }

        let winners =
            tasks::resolve_giveaway(&ctx.serenity_context().http, db, &item).await?;
        ctx.send(
            poise::CreateReply::default()
                .content(format!(
                    "🎲 Giveaway #{giveaway_id} rerolled with {} winner(s).",
                    winners.len()
                ))
                .ephemeral(true),
        )
        .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
