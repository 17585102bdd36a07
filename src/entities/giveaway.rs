//! Giveaway entity - Timed prize draws resolved by a background sweep.
//!
//! The bot posts an announcement message users react to; when `end_time`
//! passes, the sweep draws `winners_count` reactors, stores their ids as a
//! JSON array in `winner_ids`, and marks the row `ended`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Giveaway database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "giveaways")]
pub struct Model {
    /// Unique identifier for the giveaway
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Guild the giveaway runs in
    pub guild_id: i64,
    /// Channel the announcement message was posted to
    pub channel_id: i64,
    /// Id of the announcement message users react to
    pub message_id: i64,
    /// Prize description
    pub prize: String,
    /// How many winners to draw
    pub winners_count: i32,
    /// When the giveaway closes
    pub end_time: DateTimeUtc,
    /// User who started the giveaway
    pub host_id: i64,
    /// True once winners have been drawn
    pub ended: bool,
    /// JSON array of drawn winner user ids (empty until ended)
    pub winner_ids: String,
    /// When the giveaway was created
    pub created_at: DateTimeUtc,
}

/// Giveaways need no navigable relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
