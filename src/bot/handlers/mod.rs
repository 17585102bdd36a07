//! Discord event handlers
//!
//! Non-command gateway events the bot reacts to. Currently this is the
//! message handler that drives XP gain.

/// Message-event XP awards and level-up announcements
pub mod message_xp;

pub use message_xp::event_handler;
