//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod giveaway;
pub mod member;
pub mod reminder;
pub mod transaction;
pub mod user;
pub mod warning;

// Re-export specific types to avoid conflicts
pub use giveaway::{Column as GiveawayColumn, Entity as Giveaway, Model as GiveawayModel};
pub use member::{Column as MemberColumn, Entity as Member, Model as MemberModel};
pub use reminder::{Column as ReminderColumn, Entity as Reminder, Model as ReminderModel};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use warning::{Column as WarningColumn, Entity as Warning, Model as WarningModel};
