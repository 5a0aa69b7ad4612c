//! Document store connection management

use std::sync::Arc;
use crate::config::{StoreBackend, StoreConfig};
use crate::utils::errors::ConsoleError;
use super::{DocumentStore, FirestoreStore, MemoryStore};

/// Create the configured document store
pub fn create_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>, ConsoleError> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Firestore => Arc::new(FirestoreStore::new(config)?),
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store; data will not persist");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(store)
}

/// Check the store is reachable before serving requests
pub async fn health_check(store: &dyn DocumentStore) -> Result<(), ConsoleError> {
    store.health_check().await?;

    tracing::info!("Document store connection verified");
    Ok(())
}
