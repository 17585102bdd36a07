//! Member entity - A user's state scoped to one guild.
//!
//! Composite-keyed on (`user_id`, `guild_id`): the same user has independent
//! member rows per guild. Carries the economy/leveling counters: `xp` is a
//! monotonic activity counter, `level` is derived from it on every XP write,
//! `coins` is a signed balance, and `last_daily` gates the daily reward.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Member database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "members")]
pub struct Model {
    /// Discord user id
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: i64,
    /// Discord guild id
    #[sea_orm(primary_key, auto_increment = false)]
    pub guild_id: i64,
    /// Experience points, only ever increased by activity or game rewards
    pub xp: i64,
    /// Derived tier, recomputed from `xp` on every XP write
    pub level: i32,
    /// Coin balance (signed; non-negativity is a caller-side policy)
    pub coins: i64,
    /// When the daily reward was last claimed, if ever
    pub last_daily: Option<DateTimeUtc>,
}

/// Member rows carry their owning `user_id` inline and, like the other
/// reference-carrying entities, declare no navigable relationship: rows are
/// created on demand per (user, guild) without requiring a pre-existing user
/// row and membership changes never cascade.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
