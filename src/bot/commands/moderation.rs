//! Moderation Discord commands - warn, warnings, clearwarnings.
//!
//! All three require the Moderate Members permission; denials are rejected
//! before any store access and logged as the privileged-action audit trail
//! by the framework error hook. The auto-ban threshold is a caller-side
//! policy driven by the configured maximum.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::moderation,
        errors::{Error, Result},
        validate,
    };
    use poise::serenity_prelude as serenity;
    use tracing::error;

    const REASON_MAX_LENGTH: usize = 500;

    /// Warns a member. At the configured maximum the member is banned.
    #[poise::command(slash_command, required_permissions = "MODERATE_MEMBERS")]
    pub async fn warn(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to warn"] user: serenity::User,
        #[description = "Reason for the warning"] reason: String,
    ) -> Result<()> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        if user.bot {
            ctx.say("❌ You cannot warn a bot.").await?;
            return Ok(());
        }

        let reason = validate::sanitize_text(&reason, REASON_MAX_LENGTH);
        if reason.trim().is_empty() {
            ctx.say("❌ A reason is required.").await?;
            return Ok(());
        }

        let guild_id = i64::try_from(guild.get())?;
        let user_id = i64::try_from(user.id.get())?;
        let moderator_id = i64::try_from(ctx.author().id.get())?;

        let db = &ctx.data().database;
        let (_, count) =
            moderation::add_warning(db, guild_id, user_id, moderator_id, reason.clone()).await?;

        let max_warnings = ctx.data().config.max_warnings;
        let mut reply = format!(
            "⚠️ **{}** has been warned: {reason} ({count}/{max_warnings})",
            user.name
        );

        if count >= max_warnings {
            match guild
                .ban_with_reason(
                    &ctx.serenity_context().http,
                    user.id,
                    0,
                    "Maximum warnings reached",
                )
                .await
            {
                Ok(()) => reply.push_str("\n🔨 Maximum warnings reached — member banned."),
                Err(err) => {
                    error!("Failed to ban {} in guild {guild_id}: {err}", user.id);
                    reply.push_str(
                        "\n🚨 Maximum warnings reached, but the ban failed; check my permissions.",
                    );
                }
            }
        } else if count + 1 == max_warnings {
            reply.push_str("\n🚧 One more warning will result in a ban.");
        }

        ctx.say(reply).await?;
        Ok(())
    }

    /// Lists a member's active warnings.
    #[poise::command(slash_command, required_permissions = "MODERATE_MEMBERS")]
    pub async fn warnings(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to inspect"] user: serenity::User,
    ) -> Result<()> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let guild_id = i64::try_from(guild.get())?;
        let user_id = i64::try_from(user.id.get())?;

        let list = moderation::active_warnings(&ctx.data().database, guild_id, user_id).await?;
        if list.is_empty() {
            ctx.say(format!("✅ **{}** has no active warnings.", user.name))
                .await?;
            return Ok(());
        }

        let mut lines = vec![format!(
            "⚠️ **{}** — {} active warning(s)",
            user.name,
            list.len()
        )];
        for (index, warning) in list.iter().take(10).enumerate() {
            lines.push(format!(
                "{}. {} (by <@{}>, <t:{}:R>)",
                index + 1,
                warning.reason,
                warning.moderator_id,
                warning.created_at.timestamp()
            ));
        }
        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Clears a member's active warnings.
    #[poise::command(slash_command, required_permissions = "MODERATE_MEMBERS")]
    pub async fn clearwarnings(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to clear"] user: serenity::User,
    ) -> Result<()> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let guild_id = i64::try_from(guild.get())?;
        let user_id = i64::try_from(user.id.get())?;

        let cleared = moderation::clear_warnings(&ctx.data().database, guild_id, user_id).await?;
        if cleared == 0 {
            ctx.say(format!("✅ **{}** had no active warnings.", user.name))
                .await?;
        } else {
            ctx.say(format!(
                "🧹 Cleared **{cleared}** warning(s) for **{}**.",
                user.name
            ))
            .await?;
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
