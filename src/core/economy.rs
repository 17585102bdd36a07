//! Economy accessor - coin balance mutation, audit logging, and the daily
//! claim gate.
//!
//! The balance is stored denormalized on the member row for fast reads, but
//! every write path goes through [`credit_in`], which performs the atomic
//! balance increment and the audit-row insert inside one database
//! transaction. There is no code path that updates one without the other.

use crate::{
    core::profile,
    entities::{Member, member, transaction},
    errors::Result,
};
use chrono::{Duration, Utc};
use sea_orm::{
    Condition, ConnectionTrait, DatabaseConnection, QueryOrder, QuerySelect, Set, TransactionTrait,
    prelude::*, sea_query::Expr,
};

/// Hours a member must wait between daily claims.
const DAILY_INTERVAL_HOURS: i64 = 24;

/// Returns the stored balance for a member, defaulting to 0 when no member
/// row exists. Read-only: this never creates a row.
pub async fn get_balance(db: &DatabaseConnection, user_id: i64, guild_id: i64) -> Result<i64> {
    Ok(Member::find_by_id((user_id, guild_id))
        .one(db)
        .await?
        .map_or(0, |m| m.coins))
}

/// Applies a signed balance change and writes its audit row on the given
/// connection. The caller supplies the transaction and guarantees the member
/// row exists; both statements commit or roll back together.
async fn credit_in<C>(
    conn: &C,
    guild_id: i64,
    user_id: i64,
    amount: i64,
    category: &str,
    description: &str,
) -> Result<()>
where
    C: ConnectionTrait,
{
    Member::update_many()
        .col_expr(
            member::Column::Coins,
            Expr::col(member::Column::Coins).add(amount),
        )
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::GuildId.eq(guild_id))
        .exec(conn)
        .await?;

    let audit = transaction::ActiveModel {
        guild_id: Set(guild_id),
        user_id: Set(user_id),
        amount: Set(amount),
        category: Set(category.to_string()),
        description: Set(description.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    audit.insert(conn).await?;

    Ok(())
}

/// Adds (or, with a negative amount, removes) coins and records exactly one
/// audit transaction. Creates the member row if absent - this is the one
/// read path with a creation side effect. Returns the new balance.
///
/// The balance is allowed to go negative at this layer; where a
/// non-negativity guard exists it is caller-side.
pub async fn add_coins(
    db: &DatabaseConnection,
    user_id: i64,
    guild_id: i64,
    amount: i64,
    category: &str,
    description: &str,
) -> Result<i64> {
    profile::get_or_create_member(db, user_id, guild_id).await?;

    let txn = db.begin().await?;
    credit_in(&txn, guild_id, user_id, amount, category, description).await?;
    txn.commit().await?;

    get_balance(db, user_id, guild_id).await
}

/// Pure eligibility predicate: true when the member has never claimed, or
/// when at least 24 hours have passed since the last claim. No mutation.
pub async fn can_daily(db: &DatabaseConnection, user_id: i64, guild_id: i64) -> Result<bool> {
    let member = Member::find_by_id((user_id, guild_id)).one(db).await?;

    Ok(match member.and_then(|m| m.last_daily) {
        None => true,
        Some(last) => Utc::now() - last >= Duration::hours(DAILY_INTERVAL_HOURS),
    })
}

/// Claims the daily reward. Returns the credited amount, or 0 if the member
/// is not yet eligible.
///
/// Eligibility check and claim stamp are one conditional UPDATE: the row is
/// stamped only where `last_daily` is null or older than the threshold, and
/// the affected-row count is the success signal. The credit happens in the
/// same database transaction, so two overlapping invocations cannot both be
/// paid.
pub async fn claim_daily(
    db: &DatabaseConnection,
    user_id: i64,
    guild_id: i64,
    amount: i64,
) -> Result<i64> {
    profile::get_or_create_member(db, user_id, guild_id).await?;

    let now = Utc::now();
    let threshold = now - Duration::hours(DAILY_INTERVAL_HOURS);

    let txn = db.begin().await?;

    let stamped = Member::update_many()
        .col_expr(member::Column::LastDaily, Expr::value(now))
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::GuildId.eq(guild_id))
        .filter(
            Condition::any()
                .add(member::Column::LastDaily.is_null())
                .add(member::Column::LastDaily.lte(threshold)),
        )
        .exec(&txn)
        .await?;

    if stamped.rows_affected == 0 {
        txn.rollback().await?;
        return Ok(0);
    }

    credit_in(&txn, guild_id, user_id, amount, "daily", "Daily reward").await?;
    txn.commit().await?;

    Ok(amount)
}

/// Returns the guild's richest members, highest balance first.
pub async fn top_by_coins(
    db: &DatabaseConnection,
    guild_id: i64,
    limit: u64,
) -> Result<Vec<member::Model>> {
    Member::find()
        .filter(member::Column::GuildId.eq(guild_id))
        .order_by_desc(member::Column::Coins)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Returns a member's most recent audit transactions, newest first.
pub async fn recent_transactions(
    db: &DatabaseConnection,
    guild_id: i64,
    user_id: i64,
    limit: u64,
) -> Result<Vec<transaction::Model>> {
    crate::entities::Transaction::find()
        .filter(transaction::Column::GuildId.eq(guild_id))
        .filter(transaction::Column::UserId.eq(user_id))
        .order_by_desc(transaction::Column::CreatedAt)
        .order_by_desc(transaction::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}
