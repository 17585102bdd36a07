//! User entity - Platform-wide identity record.
//!
//! One row per Discord user ever observed by the bot, keyed by the
//! platform-assigned snowflake id. Rows are created on first interaction
//! and never deleted; the stored username tracks the last-seen value.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Discord user id (platform-assigned, immutable)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    /// Last-seen display name
    pub username: String,
    /// When this user was first observed
    pub created_at: DateTimeUtc,
}

/// User rows carry no navigable relationship: like every other entity here,
/// cross-row references are by inline id only, never a DB-enforced foreign
/// key, so rows are created on demand and never cascade on removal.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
