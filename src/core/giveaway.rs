//! Giveaway accessor - timed prize draws.
//!
//! Rows track the announcement message and the close time; the background
//! sweep in the bot layer finds expired rows, draws winners from the
//! announcement's reactions, and records them here. Winner ids are stored
//! as a JSON array in a text column.

use crate::{
    entities::{Giveaway, giveaway},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, Set, prelude::*, sea_query::Expr};

/// Creates a giveaway record for an already-posted announcement message.
#[allow(clippy::too_many_arguments)]
pub async fn create_giveaway(
    db: &DatabaseConnection,
    guild_id: i64,
    channel_id: i64,
    message_id: i64,
    prize: String,
    winners_count: i32,
    end_time: DateTime<Utc>,
    host_id: i64,
) -> Result<giveaway::Model> {
    let row = giveaway::ActiveModel {
        guild_id: Set(guild_id),
        channel_id: Set(channel_id),
        message_id: Set(message_id),
        prize: Set(prize),
        winners_count: Set(winners_count),
        end_time: Set(end_time),
        host_id: Set(host_id),
        ended: Set(false),
        winner_ids: Set("[]".to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    row.insert(db).await.map_err(Into::into)
}

/// Fetches a giveaway by id.
pub async fn get_giveaway(
    db: &DatabaseConnection,
    giveaway_id: i64,
) -> Result<Option<giveaway::Model>> {
    Giveaway::find_by_id(giveaway_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Returns all unresolved giveaways whose close time has passed.
pub async fn expired_giveaways(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<giveaway::Model>> {
    Giveaway::find()
        .filter(giveaway::Column::Ended.eq(false))
        .filter(giveaway::Column::EndTime.lte(now))
        .all(db)
        .await
        .map_err(Into::into)
}

/// Pulls a giveaway's close time forward to now so the next sweep resolves
/// it. Used by the force-end command; no-op on already-ended rows.
pub async fn force_expire(db: &DatabaseConnection, giveaway_id: i64) -> Result<bool> {
    let result = Giveaway::update_many()
        .col_expr(giveaway::Column::EndTime, Expr::value(Utc::now()))
        .filter(giveaway::Column::Id.eq(giveaway_id))
        .filter(giveaway::Column::Ended.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Records the drawn winners and marks the giveaway ended.
pub async fn record_winners(
    db: &DatabaseConnection,
    giveaway_id: i64,
    winner_ids: &[i64],
) -> Result<giveaway::Model> {
    let encoded = serde_json::to_string(winner_ids)?;

    Giveaway::update_many()
        .col_expr(giveaway::Column::Ended, Expr::value(true))
        .col_expr(giveaway::Column::WinnerIds, Expr::value(encoded))
        .filter(giveaway::Column::Id.eq(giveaway_id))
        .exec(db)
        .await?;

    Giveaway::find_by_id(giveaway_id)
        .one(db)
        .await?
        .ok_or(Error::Config {
            message: format!("Giveaway {giveaway_id} disappeared while recording winners"),
        })
}

/// Decodes the stored winner-id list of a giveaway row.
pub fn winners(model: &giveaway::Model) -> Result<Vec<i64>> {
    serde_json::from_str(&model.winner_ids).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Duration;

    #[tokio::test]
    async fn test_expired_giveaways_only_past_and_unresolved() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let expired = create_test_giveaway(&db, 7, now - Duration::minutes(1)).await?;
        create_test_giveaway(&db, 7, now + Duration::hours(1)).await?;

        let resolved = create_test_giveaway(&db, 7, now - Duration::hours(1)).await?;
        record_winners(&db, resolved.id, &[1, 2]).await?;

        let pending = expired_giveaways(&db, now).await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, expired.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_record_winners_round_trips_ids() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let giveaway = create_test_giveaway(&db, 7, now).await?;
        let updated = record_winners(&db, giveaway.id, &[101, 202, 303]).await?;

        assert!(updated.ended);
        assert_eq!(winners(&updated)?, vec![101, 202, 303]);

        Ok(())
    }

    #[tokio::test]
    async fn test_new_giveaway_has_no_winners() -> Result<()> {
        let db = setup_test_db().await?;

        let giveaway = create_test_giveaway(&db, 7, Utc::now() + Duration::hours(1)).await?;
        assert!(!giveaway.ended);
        assert!(winners(&giveaway)?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_force_expire_makes_giveaway_due() -> Result<()> {
        let db = setup_test_db().await?;
        let now = Utc::now();

        let giveaway = create_test_giveaway(&db, 7, now + Duration::hours(2)).await?;
        assert!(expired_giveaways(&db, now).await?.is_empty());

        assert!(force_expire(&db, giveaway.id).await?);
        let pending = expired_giveaways(&db, Utc::now()).await?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, giveaway.id);

        // Force-expiring an ended giveaway is refused
        record_winners(&db, giveaway.id, &[1]).await?;
        assert!(!force_expire(&db, giveaway.id).await?);

        Ok(())
    }
}
