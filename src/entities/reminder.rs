//! Reminder entity - Scheduled one-shot user reminders.
//!
//! A background sweep scans for rows whose `remind_at` has passed and whose
//! `sent` flag is still false, delivers the message, and flips the flag.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reminder database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reminders")]
pub struct Model {
    /// Unique identifier for the reminder
    #[sea_orm(primary_key)]
    pub id: i64,
    /// User to remind
    pub user_id: i64,
    /// Guild the reminder was created in
    pub guild_id: i64,
    /// Channel to deliver the reminder to
    pub channel_id: i64,
    /// Reminder text
    pub message: String,
    /// When the reminder becomes due
    pub remind_at: DateTimeUtc,
    /// True once delivered
    pub sent: bool,
    /// When the reminder was created
    pub created_at: DateTimeUtc,
}

/// Reminders need no navigable relationships
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
