//! Moderation accessor - warning bookkeeping.
//!
//! Warnings are append-only rows with an `active` flag; clearing deactivates
//! rather than deletes so the history stays auditable. Whether an active
//! count triggers an automatic action is the caller's policy, driven by the
//! configured maximum.

use crate::{
    entities::{Warning, warning},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*, sea_query::Expr};

/// Records a warning and returns the row together with the member's active
/// warning count after the insert.
pub async fn add_warning(
    db: &DatabaseConnection,
    guild_id: i64,
    user_id: i64,
    moderator_id: i64,
    reason: String,
) -> Result<(warning::Model, u64)> {
    let row = warning::ActiveModel {
        guild_id: Set(guild_id),
        user_id: Set(user_id),
        moderator_id: Set(moderator_id),
        reason: Set(reason),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let inserted = row.insert(db).await?;

    let count = active_warning_count(db, guild_id, user_id).await?;
    Ok((inserted, count))
}

/// Counts a member's active warnings.
pub async fn active_warning_count(
    db: &DatabaseConnection,
    guild_id: i64,
    user_id: i64,
) -> Result<u64> {
    Warning::find()
        .filter(warning::Column::GuildId.eq(guild_id))
        .filter(warning::Column::UserId.eq(user_id))
        .filter(warning::Column::Active.eq(true))
        .count(db)
        .await
        .map_err(Into::into)
}

/// Lists a member's active warnings, newest first.
pub async fn active_warnings(
    db: &DatabaseConnection,
    guild_id: i64,
    user_id: i64,
) -> Result<Vec<warning::Model>> {
    Warning::find()
        .filter(warning::Column::GuildId.eq(guild_id))
        .filter(warning::Column::UserId.eq(user_id))
        .filter(warning::Column::Active.eq(true))
        .order_by_desc(warning::Column::CreatedAt)
        .order_by_desc(warning::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deactivates all of a member's active warnings and returns how many were
/// cleared. Rows are never deleted.
pub async fn clear_warnings(db: &DatabaseConnection, guild_id: i64, user_id: i64) -> Result<u64> {
    let result = Warning::update_many()
        .col_expr(warning::Column::Active, Expr::value(false))
        .filter(warning::Column::GuildId.eq(guild_id))
        .filter(warning::Column::UserId.eq(user_id))
        .filter(warning::Column::Active.eq(true))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_add_warning_increments_active_count() -> Result<()> {
        let db = setup_test_db().await?;

        let (first, count) = add_warning(&db, 7, 42, 1, "spam".to_string()).await?;
        assert_eq!(first.reason, "spam");
        assert!(first.active);
        assert_eq!(count, 1);

        let (_, count) = add_warning(&db, 7, 42, 1, "more spam".to_string()).await?;
        assert_eq!(count, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_warning_counts_scoped_per_guild_and_user() -> Result<()> {
        let db = setup_test_db().await?;

        add_warning(&db, 7, 42, 1, "a".to_string()).await?;
        add_warning(&db, 7, 43, 1, "b".to_string()).await?;
        add_warning(&db, 8, 42, 1, "c".to_string()).await?;

        assert_eq!(active_warning_count(&db, 7, 42).await?, 1);
        assert_eq!(active_warning_count(&db, 8, 42).await?, 1);
        assert_eq!(active_warning_count(&db, 7, 99).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_clear_warnings_deactivates_without_deleting() -> Result<()> {
        let db = setup_test_db().await?;

        add_warning(&db, 7, 42, 1, "a".to_string()).await?;
        add_warning(&db, 7, 42, 1, "b".to_string()).await?;

        let cleared = clear_warnings(&db, 7, 42).await?;
        assert_eq!(cleared, 2);
        assert_eq!(active_warning_count(&db, 7, 42).await?, 0);

        // History is preserved
        let all = Warning::find().all(&db).await?;
        assert_eq!(all.len(), 2);
        assert!(all.iter().all(|w| !w.active));

        // Clearing again is a no-op
        assert_eq!(clear_warnings(&db, 7, 42).await?, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_active_warnings_newest_first() -> Result<()> {
        let db = setup_test_db().await?;

        add_warning(&db, 7, 42, 1, "first".to_string()).await?;
        add_warning(&db, 7, 42, 1, "second".to_string()).await?;

        let list = active_warnings(&db, 7, 42).await?;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].reason, "second");
        assert_eq!(list[1].reason, "first");

        Ok(())
    }
}
