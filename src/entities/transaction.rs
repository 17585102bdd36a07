//! Transaction entity - Append-only audit log of balance changes.
//!
//! One row per coin mutation, written in the same database transaction as
//! the balance update itself. Rows are never updated or deleted; they exist
//! for audit and history display, not for balance computation (the balance
//! is stored denormalized on the member row).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Economy transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "economy_transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Guild the balance change happened in
    pub guild_id: i64,
    /// User whose balance changed
    pub user_id: i64,
    /// Signed amount (positive credit, negative debit)
    pub amount: i64,
    /// Category tag: `"daily"`, `"work"`, `"crime_success"`, `"rob_fail"`, ...
    pub category: String,
    /// Free-text description of the change
    pub description: String,
    /// When the transaction was recorded
    pub created_at: DateTimeUtc,
}

/// Transactions have no navigable relationships; they are a flat audit log
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
