//! GhostShield Console
//!
//! Administrative web console for the GhostShield moderation bot. One operator,
//! authenticated with a configured credential pair, manages verified users,
//! the blacklist, allowed group chats, and moderation settings held in a
//! shared document store.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ConsoleError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, DocumentStore};
pub use middleware::{Session, SessionGuard};
pub use server::{router, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
