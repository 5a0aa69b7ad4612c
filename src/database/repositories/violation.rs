//! Violation repository implementation
//!
//! Violations are written by the bot; the console only counts them. Counting
//! reads the matching documents in full, there is no cached counter.

use std::sync::Arc;
use crate::database::document::{DocumentStore, FieldValue, Query};
use crate::utils::errors::StoreResult;
use super::collections::VIOLATIONS;

#[derive(Clone)]
pub struct ViolationRepository {
    store: Arc<dyn DocumentStore>,
}

impl ViolationRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Count all violations
    pub async fn count(&self) -> StoreResult<usize> {
        Ok(self.store.run_query(VIOLATIONS, Query::new()).await?.len())
    }

    /// Count violations recorded against one user
    pub async fn count_for_user(&self, user_id: i64) -> StoreResult<usize> {
        let query = Query::new().filter("user_id", FieldValue::Integer(user_id));
        Ok(self.store.run_query(VIOLATIONS, query).await?.len())
    }
}
