//! Discord command implementations organized by category.

/// Economy commands (balance, daily, work, crime, rob, give, gamble)
pub mod economy;

/// Giveaway commands
pub mod giveaways;

/// General utility commands
pub mod general;

/// Leveling commands
pub mod leveling;

/// Moderation commands
pub mod moderation;

/// Reminder commands
pub mod reminders;

// Export commands
pub use economy::*;
pub use general::*;
pub use giveaways::*;
pub use leveling::*;
pub use moderation::*;
pub use reminders::*;
