//! User/member accessor - identity rows and XP/level accounting.
//!
//! Guarantees a user row and a member row exist for a given (user, guild)
//! pair before any mutation, and performs the XP-driven level recomputation.
//! The accessor only mutates state; reacting to a level-up (announcements,
//! role rewards) is entirely the caller's business.

use crate::{
    core::level::level_for_xp,
    entities::{Member, User, member, user},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, QueryOrder, QuerySelect, Set, prelude::*, sea_query::Expr,
};
use tracing::warn;

/// Outcome of an XP mutation, describing the before/after counters.
///
/// `level_up` is the sole trigger for any congratulations notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XpGain {
    /// XP before the mutation
    pub old_xp: i64,
    /// XP after the mutation
    pub new_xp: i64,
    /// Level before the mutation
    pub old_level: i32,
    /// Level after the mutation
    pub new_level: i32,
    /// Whether the mutation crossed a level threshold
    pub level_up: bool,
}

/// Retrieves the identity row for a user, inserting it if absent.
///
/// When no row exists and no name is supplied, a `User{id}` placeholder is
/// stored. An existing name is never overwritten with a placeholder, but is
/// refreshed when a different display name is observed.
pub async fn get_or_create_user(
    db: &DatabaseConnection,
    user_id: i64,
    username: Option<&str>,
) -> Result<user::Model> {
    if let Some(existing) = User::find_by_id(user_id).one(db).await? {
        if let Some(name) = username {
            if !name.is_empty() && existing.username != name {
                let mut active: user::ActiveModel = existing.into();
                active.username = Set(name.to_string());
                return active.update(db).await.map_err(Into::into);
            }
        }
        return Ok(existing);
    }

    let row = user::ActiveModel {
        id: Set(user_id),
        username: Set(username.map_or_else(|| format!("User{user_id}"), ToString::to_string)),
        created_at: Set(Utc::now()),
    };
    row.insert(db).await.map_err(Into::into)
}

/// Retrieves the per-guild member row, inserting it with zeroed counters if
/// absent. This is the lazy creation path every mutating accessor runs
/// through first.
pub async fn get_or_create_member<C>(db: &C, user_id: i64, guild_id: i64) -> Result<member::Model>
where
    C: ConnectionTrait,
{
    if let Some(existing) = Member::find_by_id((user_id, guild_id)).one(db).await? {
        return Ok(existing);
    }

    let row = member::ActiveModel {
        user_id: Set(user_id),
        guild_id: Set(guild_id),
        xp: Set(0),
        level: Set(1),
        coins: Set(0),
        last_daily: Set(None),
    };
    row.insert(db).await.map_err(Into::into)
}

/// Adds XP to a member and recomputes the level.
///
/// `amount` must be non-negative; callers are responsible for clamping.
/// The new XP and the recomputed level are written together in a single
/// UPDATE statement so no reader can observe one without the other.
pub async fn add_xp(
    db: &DatabaseConnection,
    user_id: i64,
    guild_id: i64,
    amount: i64,
) -> Result<XpGain> {
    let current = get_or_create_member(db, user_id, guild_id).await?;

    let new_xp = current.xp + amount;
    let new_level = level_for_xp(new_xp);

    Member::update_many()
        .col_expr(member::Column::Xp, Expr::value(new_xp))
        .col_expr(member::Column::Level, Expr::value(new_level))
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::GuildId.eq(guild_id))
        .exec(db)
        .await?;

    Ok(XpGain {
        old_xp: current.xp,
        new_xp,
        old_level: current.level,
        new_level,
        level_up: new_level > current.level,
    })
}

/// Resets a member's XP to zero and recomputes the level accordingly.
pub async fn reset_xp(db: &DatabaseConnection, user_id: i64, guild_id: i64) -> Result<XpGain> {
    let current = get_or_create_member(db, user_id, guild_id).await?;

    Member::update_many()
        .col_expr(member::Column::Xp, Expr::value(0_i64))
        .col_expr(member::Column::Level, Expr::value(level_for_xp(0)))
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::GuildId.eq(guild_id))
        .exec(db)
        .await?;

    Ok(XpGain {
        old_xp: current.xp,
        new_xp: 0,
        old_level: current.level,
        new_level: level_for_xp(0),
        level_up: false,
    })
}

/// Writes a member's level directly, bypassing the XP formula.
///
/// This is the deliberate administrative exception to the "level is a pure
/// function of XP" invariant. It is modeled as its own audited operation:
/// the override is logged with moderator attribution, XP is left untouched,
/// and the next organic XP gain snaps the level back to the formula.
pub async fn override_level(
    db: &DatabaseConnection,
    user_id: i64,
    guild_id: i64,
    level: i32,
    moderator_id: i64,
) -> Result<member::Model> {
    get_or_create_member(db, user_id, guild_id).await?;

    warn!(
        user_id,
        guild_id, level, moderator_id, "manual level override applied"
    );

    Member::update_many()
        .col_expr(member::Column::Level, Expr::value(level))
        .filter(member::Column::UserId.eq(user_id))
        .filter(member::Column::GuildId.eq(guild_id))
        .exec(db)
        .await?;

    Member::find_by_id((user_id, guild_id))
        .one(db)
        .await?
        .ok_or(Error::MemberNotFound { user_id, guild_id })
}

/// Returns the guild's top members by XP, highest first.
pub async fn top_by_xp(
    db: &DatabaseConnection,
    guild_id: i64,
    limit: u64,
) -> Result<Vec<member::Model>> {
    Member::find()
        .filter(member::Column::GuildId.eq(guild_id))
        .order_by_desc(member::Column::Xp)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_get_or_create_user_inserts_placeholder_name() -> Result<()> {
        let db = setup_test_db().await?;

        let created = get_or_create_user(&db, 42, None).await?;
        assert_eq!(created.id, 42);
        assert_eq!(created.username, "User42");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_create_user_never_downgrades_name() -> Result<()> {
        let db = setup_test_db().await?;

        get_or_create_user(&db, 42, Some("alice")).await?;

        // A later call with no name must not replace the stored one
        let unchanged = get_or_create_user(&db, 42, None).await?;
        assert_eq!(unchanged.username, "alice");

        // A new observed name refreshes the stored value
        let renamed = get_or_create_user(&db, 42, Some("alice2")).await?;
        assert_eq!(renamed.username, "alice2");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_or_create_member_defaults() -> Result<()> {
        let db = setup_test_db().await?;

        let member = get_or_create_member(&db, 42, 7).await?;
        assert_eq!(member.xp, 0);
        assert_eq!(member.level, 1);
        assert_eq!(member.coins, 0);
        assert!(member.last_daily.is_none());

        // Second call returns the same row rather than inserting
        let again = get_or_create_member(&db, 42, 7).await?;
        assert_eq!(again, member);

        Ok(())
    }

    #[tokio::test]
    async fn test_members_are_scoped_per_guild() -> Result<()> {
        let db = setup_test_db().await?;

        add_xp(&db, 42, 1, 500).await?;
        let other_guild = get_or_create_member(&db, 42, 2).await?;

        assert_eq!(other_guild.xp, 0, "XP must not leak across guilds");

        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_fresh_user_crosses_level_threshold() -> Result<()> {
        let db = setup_test_db().await?;

        let gain = add_xp(&db, 42, 7, 250).await?;

        assert_eq!(gain.old_xp, 0);
        assert_eq!(gain.new_xp, 250);
        assert_eq!(gain.old_level, 1);
        assert_eq!(gain.new_level, 2);
        assert!(gain.level_up);

        let stored = Member::find_by_id((42, 7)).one(&db).await?.unwrap();
        assert_eq!(stored.xp, 250);
        assert_eq!(stored.level, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_is_additive() -> Result<()> {
        let db = setup_test_db().await?;

        add_xp(&db, 1, 7, 120).await?;
        let split = add_xp(&db, 1, 7, 230).await?;

        let combined = add_xp(&db, 2, 7, 350).await?;

        assert_eq!(split.new_xp, combined.new_xp);
        assert_eq!(split.new_level, combined.new_level);

        Ok(())
    }

    #[tokio::test]
    async fn test_add_xp_no_level_up_within_band() -> Result<()> {
        let db = setup_test_db().await?;

        let gain = add_xp(&db, 42, 7, 50).await?;
        assert_eq!(gain.new_level, 1);
        assert!(!gain.level_up);

        Ok(())
    }

    #[tokio::test]
    async fn test_reset_xp_returns_member_to_level_one() -> Result<()> {
        let db = setup_test_db().await?;

        add_xp(&db, 42, 7, 2_500).await?;
        let reset = reset_xp(&db, 42, 7).await?;

        assert_eq!(reset.old_xp, 2_500);
        assert_eq!(reset.new_xp, 0);
        assert_eq!(reset.new_level, 1);
        assert!(!reset.level_up);

        let stored = Member::find_by_id((42, 7)).one(&db).await?.unwrap();
        assert_eq!(stored.xp, 0);
        assert_eq!(stored.level, 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_override_level_leaves_xp_untouched() -> Result<()> {
        let db = setup_test_db().await?;

        add_xp(&db, 42, 7, 250).await?; // level 2
        let overridden = override_level(&db, 42, 7, 30, 999).await?;

        assert_eq!(overridden.level, 30);
        assert_eq!(overridden.xp, 250);

        // The next organic gain snaps the level back to the formula
        let gain = add_xp(&db, 42, 7, 10).await?;
        assert_eq!(gain.new_level, level_for_xp(260));
        assert!(!gain.level_up);

        Ok(())
    }

    #[tokio::test]
    async fn test_top_by_xp_orders_and_limits() -> Result<()> {
        let db = setup_test_db().await?;

        add_xp(&db, 1, 7, 100).await?;
        add_xp(&db, 2, 7, 900).await?;
        add_xp(&db, 3, 7, 400).await?;
        add_xp(&db, 4, 99, 5_000).await?; // different guild

        let top = top_by_xp(&db, 7, 2).await?;
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].user_id, 2);
        assert_eq!(top[1].user_id, 3);

        Ok(())
    }
}
