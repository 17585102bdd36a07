//! Shared test utilities for `CoinKeeper`.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    core::giveaway,
    entities::{Member, member},
    errors::Result,
};
use chrono::{DateTime, Duration, Utc};
use sea_orm::{DatabaseConnection, prelude::*, sea_query::Expr};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Rewinds a member's `last_daily` stamp by `hours_ago` hours, simulating
/// the wall clock advancing past the claim threshold.
pub async fn backdate_last_daily(
    db: &DatabaseConnection,
    user_id: i64,
    guild_id: i64,
    hours_ago: i64,
) -> Result<()> {
    let stamp: DateTime<Utc> = Utc::now() - Duration::hours(hours_ago);

    Member::update_many()
        .col_expr(member::Column::LastDaily, Expr::value(stamp))
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::GuildId.eq(guild_id))
        .exec(db)
        .await?;

    Ok(())
}

/// Creates a giveaway with placeholder channel/message ids closing at
/// `end_time`.
pub async fn create_test_giveaway(
    db: &DatabaseConnection,
    guild_id: i64,
    end_time: DateTime<Utc>,
) -> Result<crate::entities::giveaway::Model> {
    giveaway::create_giveaway(
        db,
        guild_id,
        1000,
        2000,
        "Test prize".to_string(),
        1,
        end_time,
        1,
    )
    .await
}
