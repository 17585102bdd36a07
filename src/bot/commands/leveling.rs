//! Leveling Discord commands - level display, leaderboards, and the
//! administrative XP/level adjustments.
//!
//! The admin `setlevel` command is the one deliberate exception to the
//! "level is derived from XP" invariant; it goes through the audited
//! override operation rather than writing the field silently.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{economy, level, profile},
        errors::{Error, Result},
        validate,
    };
    use poise::serenity_prelude as serenity;

    const ADD_XP_MAX: i64 = 100_000;
    const LEVEL_MAX: i64 = 1_000;

    /// Which ranking the leaderboard command shows.
    #[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
    pub enum LeaderboardKind {
        #[name = "xp"]
        Xp,
        #[name = "coins"]
        Coins,
    }

    fn require_guild_ids(
        ctx: &poise::Context<'_, BotData, Error>,
    ) -> Result<Option<(i64, i64)>> {
        let Some(guild) = ctx.guild_id() else {
            return Ok(None);
        };
        Ok(Some((
            i64::try_from(ctx.author().id.get())?,
            i64::try_from(guild.get())?,
        )))
    }

    /// Shows a member's level, XP, and progress to the next level.
    #[poise::command(slash_command, prefix_command)]
    pub async fn level(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to look up (defaults to you)"] user: Option<serenity::User>,
    ) -> Result<()> {
        let Some((_, guild_id)) = require_guild_ids(&ctx)? else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let target = user.as_ref().unwrap_or_else(|| ctx.author());
        let target_id = i64::try_from(target.id.get())?;

        let db = &ctx.data().database;
        profile::get_or_create_user(db, target_id, Some(&target.name)).await?;
        let member = profile::get_or_create_member(db, target_id, guild_id).await?;

        let next_threshold = level::xp_for_level(member.level + 1);
        let to_next = (next_threshold - member.xp).max(0);

        ctx.say(format!(
            "⭐ **{}** is level **{}** with **{}** XP ({to_next} XP to level {}).",
            target.name,
            member.level,
            member.xp,
            member.level + 1
        ))
        .await?;
        Ok(())
    }

    /// Shows the server's top members by XP or coins.
    #[poise::command(slash_command, prefix_command)]
    pub async fn leaderboard(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Ranking to show"] kind: LeaderboardKind,
    ) -> Result<()> {
        let Some((_, guild_id)) = require_guild_ids(&ctx)? else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let db = &ctx.data().database;
        let (title, rows): (&str, Vec<_>) = match kind {
            LeaderboardKind::Xp => ("🏆 **Top XP**", profile::top_by_xp(db, guild_id, 10).await?),
            LeaderboardKind::Coins => (
                "🏆 **Richest members**",
                economy::top_by_coins(db, guild_id, 10).await?,
            ),
        };

        if rows.is_empty() {
            ctx.say("🏆 Nothing to rank yet.").await?;
            return Ok(());
        }

        let mut lines = vec![title.to_string()];
        for (rank, member) in rows.iter().enumerate() {
            let value = match kind {
                LeaderboardKind::Xp => format!("{} XP (level {})", member.xp, member.level),
                LeaderboardKind::Coins => format!("{} coins", member.coins),
            };
            lines.push(format!("{}. <@{}> — {value}", rank + 1, member.user_id));
        }
        ctx.say(lines.join("\n")).await?;
        Ok(())
    }

    /// Grants XP to a member (administrators only).
    #[poise::command(slash_command, required_permissions = "ADMINISTRATOR")]
    pub async fn addxp(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to grant XP to"] user: serenity::User,
        #[description = "XP to add"] amount: i64,
    ) -> Result<()> {
        let Some((_, guild_id)) = require_guild_ids(&ctx)? else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let Ok(amount) = validate::int_in_range(amount, 1, ADD_XP_MAX) else {
            ctx.say(format!("❌ Amount must be between 1 and {ADD_XP_MAX}."))
                .await?;
            return Ok(());
        };

        let target_id = i64::try_from(user.id.get())?;
        let db = &ctx.data().database;
        profile::get_or_create_user(db, target_id, Some(&user.name)).await?;
        let gain = profile::add_xp(db, target_id, guild_id, amount).await?;

        let note = if gain.level_up {
            format!(" They are now level {}!", gain.new_level)
        } else {
            String::new()
        };
        ctx.say(format!(
            "✨ Added **{amount}** XP to **{}** ({} → {}).{note}",
            user.name, gain.old_xp, gain.new_xp
        ))
        .await?;
        Ok(())
    }

    /// Sets a member's level directly (administrators only, audited).
    #[poise::command(slash_command, required_permissions = "ADMINISTRATOR")]
    pub async fn setlevel(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to adjust"] user: serenity::User,
        #[description = "New level"] new_level: i64,
    ) -> Result<()> {
        let Some((author_id, guild_id)) = require_guild_ids(&ctx)? else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let Ok(new_level) = validate::int_in_range(new_level, 1, LEVEL_MAX) else {
            ctx.say(format!("❌ Level must be between 1 and {LEVEL_MAX}."))
                .await?;
            return Ok(());
        };

        let target_id = i64::try_from(user.id.get())?;
        let db = &ctx.data().database;
        profile::get_or_create_user(db, target_id, Some(&user.name)).await?;
        let member =
            profile::override_level(db, target_id, guild_id, i32::try_from(new_level)?, author_id)
                .await?;

        ctx.say(format!(
            "⭐ **{}** is now level **{}** (manual override, recorded in the log).",
            user.name, member.level
        ))
        .await?;
        Ok(())
    }

    /// Resets a member's XP to zero (administrators only).
    #[poise::command(slash_command, required_permissions = "ADMINISTRATOR")]
    pub async fn resetxp(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to reset"] user: serenity::User,
    ) -> Result<()> {
        let Some((_, guild_id)) = require_guild_ids(&ctx)? else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(());
        };

        let target_id = i64::try_from(user.id.get())?;
        let db = &ctx.data().database;
        profile::reset_xp(db, target_id, guild_id).await?;

        ctx.say(format!("🔄 **{}**'s XP has been reset.", user.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
