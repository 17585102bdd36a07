//! Warning entity - Moderation warnings issued against members.
//!
//! Warnings are cleared by flipping `active` to false rather than deleting,
//! so the moderation history stays auditable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warning database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warnings")]
pub struct Model {
    /// Unique identifier for the warning
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Guild the warning was issued in
    pub guild_id: i64,
    /// Warned user
    pub user_id: i64,
    /// Moderator who issued the warning
    pub moderator_id: i64,
    /// Reason given by the moderator
    pub reason: String,
    /// False once cleared; cleared warnings stay on record
    pub active: bool,
    /// When the warning was issued
    pub created_at: DateTimeUtc,
}

/// Warnings carry their ids inline and need no navigable relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
