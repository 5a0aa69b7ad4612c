//! Database module
//!
//! This module handles the document store client and the data-access operations

pub mod connection;
pub mod document;
pub mod firestore;
pub mod memory;
pub mod repositories;
pub mod service;

// Re-export commonly used database components
pub use connection::{create_store, health_check};
pub use document::{Direction, Document, DocumentStore, FieldValue, Fields, Query};
pub use firestore::FirestoreStore;
pub use memory::MemoryStore;
pub use repositories::{VerifiedUserRepository, ViolationRepository, BlacklistRepository, AllowedChatRepository, SettingsRepository};
pub use service::DatabaseService;
