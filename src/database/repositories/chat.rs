//! Allowed chat repository implementation

use std::sync::Arc;
use tracing::warn;
use crate::database::document::{DocumentStore, FieldValue, Fields, FromDocument, Query};
use crate::models::chat::AllowedChat;
use crate::utils::errors::StoreResult;
use super::{collections::ALLOWED_CHATS, decode_all, delete_idempotent};

#[derive(Clone)]
pub struct AllowedChatRepository {
    store: Arc<dyn DocumentStore>,
}

impl AllowedChatRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All allowed chats, in no particular order
    pub async fn list(&self) -> StoreResult<Vec<AllowedChat>> {
        let documents = self.store.run_query(ALLOWED_CHATS, Query::new()).await?;
        decode_all(&documents)
    }

    /// Create or overwrite the chat's document, stamped with the store's clock.
    ///
    /// The document is read back for the resolved timestamp. Once the write
    /// has succeeded a failed read-back only costs the timestamp.
    pub async fn upsert(&self, chat_id: i64) -> StoreResult<AllowedChat> {
        let id = AllowedChat::document_id(chat_id);
        let fields = Fields::from([
            ("chat_id".to_string(), FieldValue::Integer(chat_id)),
            ("added_at".to_string(), FieldValue::ServerTimestamp),
        ]);
        self.store.set(ALLOWED_CHATS, &id, fields).await?;

        match self.store.get(ALLOWED_CHATS, &id).await {
            Ok(Some(document)) => AllowedChat::from_document(&document),
            Ok(None) => Ok(AllowedChat { chat_id, added_at: None }),
            Err(e) => {
                warn!(chat_id = chat_id, error = %e, "Allowed chat written but could not be read back");
                Ok(AllowedChat { chat_id, added_at: None })
            }
        }
    }

    /// Delete by raw document id
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        delete_idempotent(self.store.as_ref(), ALLOWED_CHATS, id).await
    }
}
