//! Document store wrapper that fails selected operations
//!
//! Delegates to a [`MemoryStore`] so tests can seed data normally, then
//! rejects the configured calls the way Firestore rejects a request it is not
//! permitted to serve.

use std::collections::HashSet;
use async_trait::async_trait;
use ghostshield::database::{Document, DocumentStore, Fields, MemoryStore, Query};
use ghostshield::utils::errors::{StoreError, StoreResult};

pub const FAULT_MESSAGE: &str = "Missing or insufficient permissions.";

pub struct FaultyStore {
    inner: MemoryStore,
    failing_deletes: HashSet<String>,
    fail_queries: bool,
    fail_gets: bool,
}

fn rejected() -> StoreError {
    StoreError::Rejected {
        status: 403,
        message: FAULT_MESSAGE.to_string(),
    }
}

impl FaultyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            failing_deletes: HashSet::new(),
            fail_queries: false,
            fail_gets: false,
        }
    }

    pub fn fail_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    pub fn fail_queries(mut self) -> Self {
        self.fail_queries = true;
        self
    }

    pub fn fail_gets(mut self) -> Self {
        self.fail_gets = true;
        self
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn run_query(&self, collection: &str, query: Query) -> StoreResult<Vec<Document>> {
        if self.fail_queries {
            return Err(rejected());
        }
        self.inner.run_query(collection, query).await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        if self.fail_gets {
            return Err(rejected());
        }
        self.inner.get(collection, id).await
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.inner.set(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        if self.failing_deletes.contains(id) {
            return Err(rejected());
        }
        self.inner.delete(collection, id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.inner.health_check().await
    }
}
