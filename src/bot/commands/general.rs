//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database
//! operations and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    ///
    /// This is a simple health check command that doesn't require any database operations.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**CoinKeeper Help**\n\
        Here is a summary of all available commands.\n\n\
        **Economy**\n\
        • `/balance [user]` - Shows a wallet.\n\
        • `/daily` - Claims the daily reward (once per 24h).\n\
        • `/work` - Works a random job for coins (hourly).\n\
        • `/crime` - Risky coin grab (every 2h).\n\
        • `/rob <user>` - Tries to rob another member (every 20min).\n\
        • `/give <user> <amount>` - Gives coins away.\n\
        • `/gamble <stake>` - Coin flip with your coins.\n\
        • `/transactions` - Your recent ledger entries.\n\n\
        **Leveling**\n\
        • `/level [user]` - Level and XP progress.\n\
        • `/leaderboard <xp|coins>` - Server rankings.\n\
        • `/addxp`, `/setlevel`, `/resetxp` - Admin adjustments.\n\n\
        **Moderation**\n\
        • `/warn <user> <reason>`, `/warnings <user>`, `/clearwarnings <user>`\n\n\
        **Reminders & Giveaways**\n\
        • `/remind <minutes> <message>`, `/reminders`, `/reminder_delete <id>`\n\
        • `/giveaway_start`, `/giveaway_end`, `/giveaway_reroll`\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
