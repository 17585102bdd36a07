//! Economy Discord commands - balance, daily, work, crime, rob, give,
//! gamble, and the personal transaction history.
//!
//! Every command validates its parameters locally, calls the economy
//! accessor, and formats a reply. Non-negativity of balances is enforced
//! here, caller-side, where a command chooses to enforce it at all; the
//! accessor itself permits debits below zero.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{economy, profile},
        errors::{Error, Result},
        validate,
    };
    use chrono::Duration;
    use poise::serenity_prelude as serenity;
    use rand::Rng;
    use rand::seq::SliceRandom;

    const WORK_COOLDOWN_HOURS: i64 = 1;
    const CRIME_COOLDOWN_HOURS: i64 = 2;
    const ROB_COOLDOWN_MINUTES: i64 = 20;

    const CRIME_SUCCESS_RATE: f64 = 0.6;
    const ROB_SUCCESS_RATE: f64 = 0.45;
    const GAMBLE_WIN_RATE: f64 = 0.48;

    const ROB_MIN_ROBBER_BALANCE: i64 = 100;
    const ROB_MIN_TARGET_BALANCE: i64 = 50;

    const GIVE_MAX_AMOUNT: i64 = 100_000;
    const GAMBLE_MIN_STAKE: i64 = 10;
    const GAMBLE_MAX_STAKE: i64 = 1_000;

    /// Crime table: (name, min gain, max gain, min loss, max loss)
    const CRIMES: [(&str, i64, i64, i64, i64); 4] = [
        ("bank heist", 200, 500, 100, 200),
        ("burglary", 100, 300, 50, 150),
        ("pickpocketing", 50, 150, 25, 75),
        ("computer fraud", 150, 400, 75, 180),
    ];

    fn format_wait(remaining: Duration) -> String {
        let total = remaining.num_seconds().max(0);
        let hours = total / 3600;
        let minutes = (total % 3600) / 60;
        let seconds = total % 60;
        if hours > 0 {
            format!("{hours}h {minutes}m")
        } else if minutes > 0 {
            format!("{minutes}m {seconds}s")
        } else {
            format!("{seconds}s")
        }
    }

    /// Resolves the (author, guild) id pair, replying and returning `None`
    /// outside a guild or when the economy is disabled.
    async fn economy_ids(ctx: &poise::Context<'_, BotData, Error>) -> Result<Option<(i64, i64)>> {
        let Some(guild) = ctx.guild_id() else {
            ctx.say("❌ This command can only be used in a server.")
                .await?;
            return Ok(None);
        };
        if !ctx.data().config.enable_economy {
            ctx.say("❌ The economy is disabled on this server.").await?;
            return Ok(None);
        }
        Ok(Some((
            i64::try_from(ctx.author().id.get())?,
            i64::try_from(guild.get())?,
        )))
    }

    /// Shows your balance, or another member's.
    #[poise::command(slash_command, prefix_command)]
    pub async fn balance(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "User to look up (defaults to you)"] user: Option<serenity::User>,
    ) -> Result<()> {
        let Some((_, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };

        let target = user.as_ref().unwrap_or_else(|| ctx.author());
        let target_id = i64::try_from(target.id.get())?;

        let db = &ctx.data().database;
        profile::get_or_create_user(db, target_id, Some(&target.name)).await?;
        let coins = economy::get_balance(db, target_id, guild_id).await?;

        ctx.say(format!("💰 **{}** has **{coins}** coins.", target.name))
            .await?;
        Ok(())
    }

    /// Claims the daily reward, once per rolling 24-hour period.
    #[poise::command(slash_command, prefix_command)]
    pub async fn daily(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };

        let db = &ctx.data().database;
        let credited =
            economy::claim_daily(db, author_id, guild_id, ctx.data().config.daily_coins).await?;

        if credited == 0 {
            ctx.send(
                poise::CreateReply::default()
                    .content("⏰ You already claimed your daily reward. Come back later!")
                    .ephemeral(true),
            )
            .await?;
        } else {
            ctx.say(format!(
                "🎁 You received **{credited}** coins! Come back tomorrow for more."
            ))
            .await?;
        }
        Ok(())
    }

    /// Works a random job for coins. Once per hour.
    #[poise::command(slash_command, prefix_command)]
    pub async fn work(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        if let Err(remaining) = data
            .work_gate
            .check_and_set(author_id, Duration::hours(WORK_COOLDOWN_HOURS))
        {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!(
                        "⏱️ You can work again in {}.",
                        format_wait(remaining)
                    ))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let (job_name, earned) = {
            let mut rng = rand::thread_rng();
            let job = data.jobs.choose(&mut rng).ok_or_else(|| Error::Config {
                message: "Job table is empty".to_string(),
            })?;
            let (min, max) =
                job.payout_range(data.config.work_coins_min, data.config.work_coins_max);
            (job.name.clone(), rng.gen_range(min..=max))
        };

        let balance = economy::add_coins(
            &data.database,
            author_id,
            guild_id,
            earned,
            "work",
            &format!("Worked as {job_name}"),
        )
        .await?;

        ctx.say(format!(
            "💼 You worked as a {job_name} and earned **{earned}** coins! Balance: {balance}."
        ))
        .await?;
        Ok(())
    }

    /// Commits a crime: big gains on success, fines on failure. Every 2 hours.
    #[poise::command(slash_command, prefix_command)]
    pub async fn crime(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        if let Err(remaining) = data
            .crime_gate
            .check_and_set(author_id, Duration::hours(CRIME_COOLDOWN_HOURS))
        {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!(
                        "🚨 You can attempt another crime in {}.",
                        format_wait(remaining)
                    ))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let current_balance = economy::get_balance(&data.database, author_id, guild_id).await?;

        let outcome = {
            let mut rng = rand::thread_rng();
            let &(name, min_gain, max_gain, min_loss, max_loss) = CRIMES
                .choose(&mut rng)
                .ok_or_else(|| Error::Config {
                    message: "Crime table is empty".to_string(),
                })?;
            if rng.gen_bool(CRIME_SUCCESS_RATE) {
                Ok((name, rng.gen_range(min_gain..=max_gain)))
            } else {
                Err((name, rng.gen_range(min_loss..=max_loss)))
            }
        };

        match outcome {
            Ok((name, earned)) => {
                economy::add_coins(
                    &data.database,
                    author_id,
                    guild_id,
                    earned,
                    "crime_success",
                    &format!("Crime: {name}"),
                )
                .await?;
                ctx.say(format!(
                    "🎭 Your {name} was a success! You got away with **{earned}** coins."
                ))
                .await?;
            }
            Err((name, loss)) => {
                // Fines are capped by what the member actually holds
                let lost = loss.min(current_balance.max(0));
                if lost > 0 {
                    economy::add_coins(
                        &data.database,
                        author_id,
                        guild_id,
                        -lost,
                        "crime_fail",
                        &format!("Failed crime: {name}"),
                    )
                    .await?;
                }
                ctx.say(format!(
                    "🚨 Your {name} failed! You paid **{lost}** coins in fines."
                ))
                .await?;
            }
        }
        Ok(())
    }

    /// Tries to rob another member. Every 20 minutes.
    #[poise::command(slash_command, prefix_command)]
    pub async fn rob(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to rob"] target: serenity::User,
    ) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        if target.id == ctx.author().id {
            ctx.say("❌ You cannot rob yourself!").await?;
            return Ok(());
        }
        if target.bot {
            ctx.say("❌ You cannot rob a bot!").await?;
            return Ok(());
        }

        if let Err(remaining) = data
            .rob_gate
            .check_and_set(author_id, Duration::minutes(ROB_COOLDOWN_MINUTES))
        {
            ctx.send(
                poise::CreateReply::default()
                    .content(format!(
                        "⏱️ You can rob someone again in {}.",
                        format_wait(remaining)
                    ))
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let target_id = i64::try_from(target.id.get())?;
        let robber_balance = economy::get_balance(&data.database, author_id, guild_id).await?;
        let target_balance = economy::get_balance(&data.database, target_id, guild_id).await?;

        if robber_balance < ROB_MIN_ROBBER_BALANCE {
            ctx.say(format!(
                "❌ You need at least {ROB_MIN_ROBBER_BALANCE} coins to rob someone!"
            ))
            .await?;
            return Ok(());
        }
        if target_balance < ROB_MIN_TARGET_BALANCE {
            ctx.say(format!("❌ **{}** is not worth robbing!", target.name))
                .await?;
            return Ok(());
        }

        let outcome = {
            let mut rng = rand::thread_rng();
            if rng.gen_bool(ROB_SUCCESS_RATE) {
                Ok(rng.gen_range(10..=100).min(target_balance / 2))
            } else {
                Err(rng.gen_range(50..=150).min(robber_balance / 3))
            }
        };

        match outcome {
            Ok(stolen) => {
                economy::add_coins(
                    &data.database,
                    target_id,
                    guild_id,
                    -stolen,
                    "rob_victim",
                    &format!("Robbed by {}", ctx.author().name),
                )
                .await?;
                economy::add_coins(
                    &data.database,
                    author_id,
                    guild_id,
                    stolen,
                    "rob_success",
                    &format!("Robbed {}", target.name),
                )
                .await?;
                ctx.say(format!(
                    "💰 You robbed **{stolen}** coins from **{}**!",
                    target.name
                ))
                .await?;
            }
            Err(fine) => {
                economy::add_coins(
                    &data.database,
                    author_id,
                    guild_id,
                    -fine,
                    "rob_fail",
                    &format!("Failed to rob {}", target.name),
                )
                .await?;
                ctx.say(format!(
                    "🚨 You got caught! You paid a **{fine}** coin fine."
                ))
                .await?;
            }
        }
        Ok(())
    }

    /// Gives coins to another member.
    #[poise::command(slash_command, prefix_command)]
    pub async fn give(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Member to give coins to"] recipient: serenity::User,
        #[description = "Amount to give"] amount: i64,
    ) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };

        if recipient.id == ctx.author().id {
            ctx.say("❌ You cannot give coins to yourself!").await?;
            return Ok(());
        }
        if recipient.bot {
            ctx.say("❌ You cannot give coins to a bot!").await?;
            return Ok(());
        }

        let Ok(amount) = validate::int_in_range(amount, 1, GIVE_MAX_AMOUNT) else {
            ctx.say(format!(
                "❌ Amount must be between 1 and {GIVE_MAX_AMOUNT}."
            ))
            .await?;
            return Ok(());
        };

        let db = &ctx.data().database;
        let sender_balance = economy::get_balance(db, author_id, guild_id).await?;
        if sender_balance < amount {
            ctx.say(format!(
                "❌ You only have {sender_balance} coins; you cannot give {amount}."
            ))
            .await?;
            return Ok(());
        }

        let recipient_id = i64::try_from(recipient.id.get())?;
        economy::add_coins(
            db,
            author_id,
            guild_id,
            -amount,
            "give",
            &format!("Gift to {}", recipient.name),
        )
        .await?;
        economy::add_coins(
            db,
            recipient_id,
            guild_id,
            amount,
            "receive",
            &format!("Gift from {}", ctx.author().name),
        )
        .await?;

        ctx.say(format!(
            "💝 **{}** gave **{amount}** coins to **{}**!",
            ctx.author().name,
            recipient.name
        ))
        .await?;
        Ok(())
    }

    /// Gambles coins on a weighted coin flip.
    #[poise::command(slash_command, prefix_command)]
    pub async fn gamble(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Coins to stake"] stake: i64,
    ) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };
        let data = ctx.data();

        if !data.config.enable_games {
            ctx.say("❌ Games are disabled on this server.").await?;
            return Ok(());
        }

        // Spam brake: five bets per five minutes
        if !data.limiter.check(author_id, 5, Duration::minutes(5)) {
            ctx.send(
                poise::CreateReply::default()
                    .content("⏱️ Slow down! Try again in a few minutes.")
                    .ephemeral(true),
            )
            .await?;
            return Ok(());
        }

        let Ok(stake) = validate::int_in_range(stake, GAMBLE_MIN_STAKE, GAMBLE_MAX_STAKE) else {
            ctx.say(format!(
                "❌ Stake must be between {GAMBLE_MIN_STAKE} and {GAMBLE_MAX_STAKE}."
            ))
            .await?;
            return Ok(());
        };

        let balance = economy::get_balance(&data.database, author_id, guild_id).await?;
        if balance < stake {
            ctx.say(format!(
                "❌ You only have {balance} coins; you cannot stake {stake}."
            ))
            .await?;
            return Ok(());
        }

        let won = {
            let mut rng = rand::thread_rng();
            rng.gen_bool(GAMBLE_WIN_RATE)
        };

        if won {
            let winnings = stake * 9 / 5;
            economy::add_coins(
                &data.database,
                author_id,
                guild_id,
                winnings,
                "gamble_win",
                &format!("Stake: {stake}"),
            )
            .await?;
            ctx.say(format!("🎰 You won **{winnings}** coins!")).await?;
        } else {
            economy::add_coins(
                &data.database,
                author_id,
                guild_id,
                -stake,
                "gamble_loss",
                &format!("Stake: {stake}"),
            )
            .await?;
            ctx.say(format!("💸 You lost **{stake}** coins...")).await?;
        }
        Ok(())
    }

    /// Shows your most recent ledger entries.
    #[poise::command(slash_command, prefix_command)]
    pub async fn transactions(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let Some((author_id, guild_id)) = economy_ids(&ctx).await? else {
            return Ok(());
        };

        let recent =
            economy::recent_transactions(&ctx.data().database, guild_id, author_id, 10).await?;

        if recent.is_empty() {
            ctx.say("📒 No transactions recorded yet.").await?;
            return Ok(());
        }

        let mut lines = vec!["📒 **Your recent transactions**".to_string()];
        for entry in recent {
            lines.push(format!(
                "`{:+}` [{}] {}",
                entry.amount, entry.category, entry.description
            ));
        }
        ctx.say(lines.join("\n")).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
