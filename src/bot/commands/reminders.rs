//! Reminder Discord commands - remind, reminders, reminder_delete.
//!
//! Commands only write rows; delivery is the background sweep's job.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::reminder,
        errors::{Error, Result},
        validate,
    };
    use chrono::{Duration, Utc};

    const MESSAGE_MAX_LENGTH: usize = 500;
    /// One week, in minutes.
    const DELAY_MAX_MINUTES: i64 = 10_080;

    /// Schedules a reminder delivered in this channel.
    #[poise::command(slash_command, prefix_command)]
    pub async fn remind(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Minutes from now"] minutes: i64,
        #[description = "What to remind you about"] message: String,
    ) -> Result<()> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let Ok(minutes) = validate::int_in_range(minutes, 1, DELAY_MAX_MINUTES) else {
            ctx.say(format!(
                "❌ Delay must be between 1 and {DELAY_MAX_MINUTES} minutes."
            ))
            .await?;
            return Ok(());
        };

        let message = validate::sanitize_text(&message, MESSAGE_MAX_LENGTH);
        if message.trim().is_empty() {
            ctx.say("❌ The reminder text cannot be empty.").await?;
            return Ok(());
        }

        let user_id = i64::try_from(ctx.author().id.get())?;
        let guild_id = i64::try_from(guild.get())?;
        let channel_id = i64::try_from(ctx.channel_id().get())?;
        let remind_at = Utc::now() + Duration::minutes(minutes);

        let created = reminder::create_reminder(
            &ctx.data().database,
            user_id,
            guild_id,
            channel_id,
            message,
            remind_at,
        )
        .await?;

        ctx.say(format!(
            "⏰ Got it! I'll remind you <t:{}:R> (reminder #{}).",
            remind_at.timestamp(),
            created.id
        ))
        .await?;
        Ok(())
    }

    /// Lists your pending reminders in this server.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reminders(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let user_id = i64::try_from(ctx.author().id.get())?;
        let guild_id = i64::try_from(guild.get())?;

        let pending =
            reminder::pending_for_user(&ctx.data().database, guild_id, user_id).await?;
        if pending.is_empty() {
            ctx.say("📭 You have no pending reminders.").await?;
            return Ok(());
        }

        let mut lines = vec!["⏰ **Your pending reminders**".to_string()];
        for item in pending.iter().take(10) {
            lines.push(format!(
                "#{} — <t:{}:R>: {}",
                item.id,
                item.remind_at.timestamp(),
                item.message
            ));
        }
        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Deletes one of your pending reminders.
    #[poise::command(slash_command, prefix_command)]
    pub async fn reminder_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Reminder id (see /reminders)"] reminder_id: i64,
    ) -> Result<()> {
        let user_id = i64::try_from(ctx.author().id.get())?;

        let removed =
            reminder::delete_for_user(&ctx.data().database, reminder_id, user_id).await?;
        if removed {
            ctx.say(format!("🗑️ Reminder #{reminder_id} deleted.")).await?;
        } else {
            ctx.say(format!(
                "❌ Reminder #{reminder_id} was not found among your reminders."
            ))
            .await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
