//! Core business logic - framework-agnostic ledger operations.
//!
//! Everything here takes a database connection and plain values; nothing in
//! this layer knows about Discord. The bot layer validates input, calls into
//! these accessors, and formats replies.

/// Economy accessor: balances, audit transactions, daily claims
pub mod economy;
/// Giveaway records and expiry scanning
pub mod giveaway;
/// The pure XP-to-level formula
pub mod level;
/// Warning bookkeeping
pub mod moderation;
/// User/member identity and XP/level accounting
pub mod profile;
/// Scheduled reminders and due-row scanning
pub mod reminder;
