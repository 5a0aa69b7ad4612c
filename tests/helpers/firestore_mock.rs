//! Mock Firestore REST server for testing
//!
//! Wraps a wiremock server and builds a [`FirestoreStore`] pointed at it in
//! emulator mode, so no credential exchange happens.

use ghostshield::config::{StoreBackend, StoreConfig};
use ghostshield::database::FirestoreStore;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_PROJECT: &str = "ghostshield-test";

pub struct FirestoreMockServer {
    pub server: MockServer,
}

impl FirestoreMockServer {
    pub async fn new() -> Self {
        Self {
            server: MockServer::builder().start().await,
        }
    }

    /// Path prefix of every document resource
    pub fn documents_path(&self) -> String {
        format!("/v1/projects/{}/databases/(default)/documents", TEST_PROJECT)
    }

    pub fn store(&self) -> FirestoreStore {
        let config = StoreConfig {
            backend: StoreBackend::Firestore,
            credentials: None,
            project_id: Some(TEST_PROJECT.to_string()),
            emulator_host: Some(self.server.address().to_string()),
            base_url: "https://firestore.googleapis.com".to_string(),
            timeout_seconds: 5,
        };
        FirestoreStore::new(&config).expect("emulator config is valid")
    }

    /// A REST document resource
    pub fn document(&self, collection: &str, id: &str, fields: Value) -> Value {
        json!({
            "name": format!("projects/{}/databases/(default)/documents/{}/{}", TEST_PROJECT, collection, id),
            "fields": fields,
            "createTime": "2024-01-01T00:00:00Z",
            "updateTime": "2024-01-01T00:00:00Z",
        })
    }
}
