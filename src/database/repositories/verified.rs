//! Verified user repository implementation

use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::database::document::{Direction, DocumentStore, FieldValue, FromDocument, Query};
use crate::models::user::VerifiedUser;
use crate::utils::errors::{StoreError, StoreResult};
use super::{collections::VERIFIED_USERS, decode_all, delete_idempotent};

#[derive(Clone)]
pub struct VerifiedUserRepository {
    store: Arc<dyn DocumentStore>,
}

impl VerifiedUserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Most recently verified users first, at most `limit`
    pub async fn list_recent(&self, limit: usize) -> StoreResult<Vec<VerifiedUser>> {
        let query = Query::new()
            .order_by("verified_at", Direction::Descending)
            .limit(limit);
        let documents = self.store.run_query(VERIFIED_USERS, query).await?;

        decode_all(&documents)
    }

    /// First verified record for a Telegram user id
    pub async fn find_by_user_id(&self, user_id: i64) -> StoreResult<Option<VerifiedUser>> {
        let query = Query::new()
            .filter("user_id", FieldValue::Integer(user_id))
            .limit(1);
        let documents = self.store.run_query(VERIFIED_USERS, query).await?;

        documents.first().map(VerifiedUser::from_document).transpose()
    }

    /// Delete one record by document id
    pub async fn delete(&self, doc_id: &str) -> StoreResult<()> {
        delete_idempotent(self.store.as_ref(), VERIFIED_USERS, doc_id).await
    }

    /// Delete every record one document at a time.
    ///
    /// Not transactional. A failed deletion does not stop the loop; the last
    /// failure is reported once every document has been attempted.
    pub async fn clear_all(&self) -> StoreResult<usize> {
        let documents = self.store.run_query(VERIFIED_USERS, Query::new()).await?;
        debug!(count = documents.len(), "Clearing verified users");

        let mut deleted = 0;
        let mut last_error: Option<StoreError> = None;
        for document in &documents {
            match delete_idempotent(self.store.as_ref(), VERIFIED_USERS, &document.id).await {
                Ok(()) => deleted += 1,
                Err(e) => {
                    warn!(doc_id = %document.id, error = %e, "Failed to delete verified user");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => {
                info!(deleted = deleted, "Verified users cleared");
                Ok(deleted)
            }
        }
    }
}
