//! Reminder accessor - scheduled one-shot reminders.
//!
//! Commands create rows; the background sweep in the bot layer scans for
//! due rows on a fixed timer, delivers them, and flips the `sent` flag.

use crate::{
    entities::{Reminder, reminder},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*, sea_query::Expr};

/// Creates a reminder due at `remind_at`.
pub async fn create_reminder(
    db: &DatabaseConnection,
    user_id: i64,
    guild_id: i64,
    channel_id: i64,
    message: String,
    remind_at: DateTime<Utc>,
) -> Result<reminder::Model> {
    let row = reminder::ActiveModel {
        user_id: Set(user_id),
        guild_id: Set(guild_id),
        channel_id: Set(channel_id),
        message: Set(message),
        remind_at: Set(remind_at),
        sent: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Returns all undelivered reminders whose deadline has passed, oldest first.
pub async fn due_reminders(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<reminder::Model>> {
    Reminder::find()
        .filter(reminder::Column::Sent.eq(false))
        .filter(reminder::Column::RemindAt.lte(now))
        .order_by_asc(reminder::Column::RemindAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks a reminder as delivered.
pub async fn mark_sent(db: &DatabaseConnection, reminder_id: i64) -> Result<()> {
    Reminder::update_many()
        .col_expr(reminder::Column::Sent, Expr::value(true))
        .filter(reminder::Column::Id.eq(reminder_id))
        .exec(db)
        .await?;
    Ok(())
}

/// Lists a member's pending reminders in a guild, soonest first.
pub async fn pending_for_user(
    db: &DatabaseConnection,
    guild_id: i64,
    user_id: i64,
) -> Result<Vec<reminder::Model>> {
    Reminder::find()
        .filter(reminder::Column::GuildId.eq(guild_id))
        .filter(reminder::Column::UserId.eq(user_id))
        .filter(reminder::Column::Sent.eq(false))
        .order_by_asc(reminder::Column::RemindAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a pending reminder if it belongs to the given user. Returns
/// whether a row was removed.
pub async fn delete_for_user(
    db: &DatabaseConnection,
    reminder_id: i64,
    user_id: i64,
) -> Result<bool> {
    let result = Reminder::delete_many()
        .filter(reminder::Column::Id.eq(reminder_id))
        .filter(reminder::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_due_reminders_only_past_and_unsent() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let past =
            create_reminder(&db, 42, 7, 100, "past".to_string(), now - Duration::minutes(5))
                .await?;
        create_reminder(
            &db,
            42,
            7,
            100,
            "future".to_string(),
            now + Duration::minutes(5),
        )
        .await?;
        let delivered = create_reminder(
            &db,
            42,
            7,
            100,
            "delivered".to_string(),
            now - Duration::minutes(10),
        )
        .await?;
        mark_sent(&db, delivered.id).await?;

        let due = due_reminders(&db, now).await?;
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, past.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_mark_sent_removes_from_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let reminder =
            create_reminder(&db, 42, 7, 100, "ping".to_string(), now + Duration::hours(1)).await?;

        assert_eq!(pending_for_user(&db, 7, 42).await?.len(), 1);
        mark_sent(&db, reminder.id).await?;
        assert!(pending_for_user(&db, 7, 42).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_for_user_enforces_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let reminder =
            create_reminder(&db, 42, 7, 100, "mine".to_string(), now + Duration::hours(1)).await?;

        // Someone else cannot delete it
        assert!(!delete_for_user(&db, reminder.id, 43).await?);
        assert_eq!(pending_for_user(&db, 7, 42).await?.len(), 1);

        // The owner can
        assert!(delete_for_user(&db, reminder.id, 42).await?);
        assert!(pending_for_user(&db, 7, 42).await?.is_empty());

        Ok(())
    }
}
