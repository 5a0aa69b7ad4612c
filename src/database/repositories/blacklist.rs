//! Blacklist repository implementation

use std::sync::Arc;
use crate::database::document::{Direction, DocumentStore, FieldValue, Query};
use crate::models::blacklist::BlacklistEntry;
use crate::utils::errors::StoreResult;
use super::{collections::BLACKLIST, decode_all, delete_idempotent};

#[derive(Clone)]
pub struct BlacklistRepository {
    store: Arc<dyn DocumentStore>,
}

impl BlacklistRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// All entries, newest first
    pub async fn list(&self) -> StoreResult<Vec<BlacklistEntry>> {
        let query = Query::new().order_by("added_at", Direction::Descending);
        let documents = self.store.run_query(BLACKLIST, query).await?;

        decode_all(&documents)
    }

    /// Whether at least one entry exists for the user
    pub async fn contains_user(&self, user_id: i64) -> StoreResult<bool> {
        let query = Query::new()
            .filter("user_id", FieldValue::Integer(user_id))
            .limit(1);

        Ok(!self.store.run_query(BLACKLIST, query).await?.is_empty())
    }

    pub async fn delete(&self, doc_id: &str) -> StoreResult<()> {
        delete_idempotent(self.store.as_ref(), BLACKLIST, doc_id).await
    }
}
