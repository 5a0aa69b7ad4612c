//! Moderation settings repository implementation

use std::sync::Arc;
use crate::database::document::DocumentStore;
use crate::models::moderation::ModerationSettings;
use crate::utils::errors::StoreResult;
use super::collections::SETTINGS;

/// Id of the singleton settings document
pub const SETTINGS_DOCUMENT: &str = "main";

#[derive(Clone)]
pub struct SettingsRepository {
    store: Arc<dyn DocumentStore>,
}

impl SettingsRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Stored settings, or all switches off when nothing was saved yet
    pub async fn get(&self) -> StoreResult<ModerationSettings> {
        Ok(self
            .store
            .get(SETTINGS, SETTINGS_DOCUMENT)
            .await?
            .map(|document| ModerationSettings::from_document(&document))
            .unwrap_or_default())
    }

    /// Replace the whole document
    pub async fn save(&self, settings: &ModerationSettings) -> StoreResult<()> {
        self.store.set(SETTINGS, SETTINGS_DOCUMENT, settings.to_fields()).await
    }
}
