//! Data models module
//!
//! This module contains the plain records exchanged between the data-access
//! layer and the views

pub mod user;
pub mod blacklist;
pub mod chat;
pub mod moderation;

// Re-export commonly used models
pub use user::{VerifiedUser, UserProfile, UserDetail, Dashboard};
pub use blacklist::BlacklistEntry;
pub use chat::AllowedChat;
pub use moderation::ModerationSettings;
