//! Database repositories module
//!
//! This module contains one repository per collection. Repositories speak to
//! the document store only through the [`DocumentStore`] trait.

pub mod verified;
pub mod violation;
pub mod blacklist;
pub mod chat;
pub mod settings;

use crate::utils::errors::StoreResult;
use super::document::{DocumentStore, FromDocument, Document};

// Re-export repositories
pub use verified::VerifiedUserRepository;
pub use violation::ViolationRepository;
pub use blacklist::BlacklistRepository;
pub use chat::AllowedChatRepository;
pub use settings::SettingsRepository;

/// Collection names shared with the bot process
pub mod collections {
    pub const VERIFIED_USERS: &str = "verified_users";
    pub const VIOLATIONS: &str = "violations";
    pub const BLACKLIST: &str = "blacklist";
    pub const ALLOWED_CHATS: &str = "allowed_chats";
    pub const SETTINGS: &str = "settings";
}

/// Delete a document, treating an already-absent id as success
pub(crate) async fn delete_idempotent(store: &dyn DocumentStore, collection: &str, id: &str) -> StoreResult<()> {
    match store.delete(collection, id).await {
        Err(e) if e.is_not_found() => {
            tracing::debug!(collection = collection, id = id, "Document already absent");
            Ok(())
        }
        other => other,
    }
}

pub(crate) fn decode_all<T: FromDocument>(documents: &[Document]) -> StoreResult<Vec<T>> {
    documents.iter().map(T::from_document).collect()
}
