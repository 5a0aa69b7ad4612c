//! Firestore REST client
//!
//! Implements [`DocumentStore`] against the Firestore v1 REST API. Production
//! access authenticates with a service account: an RS256 assertion is
//! exchanged for a bearer token which is cached until shortly before expiry.
//! When an emulator host is configured requests go out unauthenticated.

use std::time::{Duration, Instant};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use crate::config::StoreConfig;
use crate::utils::errors::{ConsoleError, StoreError, StoreResult};
use crate::utils::logging::log_store_operation;
use super::document::{Direction, Document, DocumentStore, FieldValue, Fields, Query};

const DATASTORE_SCOPE: &str = "https://www.googleapis.com/auth/datastore";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Tokens are refreshed this long before the issuer's expiry
const TOKEN_REFRESH_MARGIN_SECS: i64 = 60;

/// Service-account credential payload
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Exchanges service-account assertions for bearer tokens
struct TokenSource {
    account: ServiceAccount,
    key: EncodingKey,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenSource {
    fn new(account: ServiceAccount) -> Result<Self, ConsoleError> {
        let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| ConsoleError::Config(format!("Invalid service-account private key: {}", e)))?;

        Ok(Self {
            account,
            key,
            cached: Mutex::new(None),
        })
    }

    async fn bearer(&self, http: &Client) -> StoreResult<String> {
        let mut cached = self.cached.lock().await;
        let now = Utc::now();

        if let Some(token) = cached.as_ref() {
            if token.expires_at - chrono::Duration::seconds(TOKEN_REFRESH_MARGIN_SECS) > now {
                return Ok(token.access_token.clone());
            }
        }

        debug!(client_email = %self.account.client_email, "Requesting store access token");

        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.account.client_email,
            scope: DATASTORE_SCOPE,
            aud: &self.account.token_uri,
            iat,
            exp: iat + 3600,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.account.private_key_id.clone();
        let assertion = jsonwebtoken::encode(&header, &claims, &self.key)
            .map_err(|e| StoreError::Token(e.to_string()))?;

        let response = http
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Token(format!("token endpoint returned {}: {}", status, body)));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| StoreError::Token(e.to_string()))?;

        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + chrono::Duration::seconds(token.expires_in),
        });

        Ok(access_token)
    }
}

/// Firestore-backed document store
pub struct FirestoreStore {
    http: Client,
    /// `{base}/v1/projects/{project}/databases/(default)/documents`
    documents_url: String,
    /// `projects/{project}/databases/(default)/documents`
    documents_path: String,
    auth: Option<TokenSource>,
}

impl FirestoreStore {
    /// Build a client from store configuration
    pub fn new(config: &StoreConfig) -> Result<Self, ConsoleError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("GhostShield-Console/1.0")
            .build()?;

        let (base_url, project_id, auth) = match &config.emulator_host {
            Some(host) => {
                let project_id = config
                    .project_id
                    .clone()
                    .ok_or_else(|| ConsoleError::Config("Store project ID is required".to_string()))?;
                info!(emulator_host = %host, "Using Firestore emulator");
                (format!("http://{}", host), project_id, None)
            }
            None => {
                let raw = config
                    .credentials
                    .as_deref()
                    .ok_or_else(|| ConsoleError::Config("Store credentials are required".to_string()))?;
                let account: ServiceAccount = serde_json::from_str(raw)
                    .map_err(|e| ConsoleError::Config(format!("Invalid service-account credentials: {}", e)))?;
                let project_id = config.project_id.clone().unwrap_or_else(|| account.project_id.clone());
                (config.base_url.clone(), project_id, Some(TokenSource::new(account)?))
            }
        };

        let documents_path = format!("projects/{}/databases/(default)/documents", project_id);
        let documents_url = format!("{}/v1/{}", base_url.trim_end_matches('/'), documents_path);

        Ok(Self {
            http,
            documents_url,
            documents_path,
            auth,
        })
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}/{}", self.documents_url, collection, urlencoding::encode(id))
    }

    async fn authorize(&self, request: RequestBuilder) -> StoreResult<RequestBuilder> {
        match &self.auth {
            Some(auth) => Ok(request.bearer_auth(auth.bearer(&self.http).await?)),
            None => Ok(request),
        }
    }

    async fn send(&self, operation: &str, collection: &str, request: RequestBuilder) -> StoreResult<Response> {
        let started = Instant::now();
        let result = self.authorize(request).await?.send().await;
        let elapsed = started.elapsed().as_millis() as u64;

        match result {
            Ok(response) => {
                let ok = response.status().is_success() || response.status() == StatusCode::NOT_FOUND;
                log_store_operation(operation, collection, elapsed, ok);
                Ok(response)
            }
            Err(e) => {
                log_store_operation(operation, collection, elapsed, false);
                Err(StoreError::Unavailable(e))
            }
        }
    }
}

/// Turn a non-success response into a store error
async fn rejected(response: Response) -> StoreError {
    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return StoreError::NotFound;
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or(body);

    warn!(status = status.as_u16(), message = %message, "Store rejected request");
    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}

async fn read_json(response: Response) -> StoreResult<Value> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| StoreError::Decode(e.to_string()))
}

/// Encode a field value in the REST wire form. `ServerTimestamp` has no wire value.
pub fn encode_value(value: &FieldValue) -> Option<Value> {
    let encoded = match value {
        FieldValue::Null => json!({ "nullValue": null }),
        FieldValue::Boolean(b) => json!({ "booleanValue": b }),
        FieldValue::Integer(i) => json!({ "integerValue": i.to_string() }),
        FieldValue::Double(d) => json!({ "doubleValue": d }),
        FieldValue::String(s) => json!({ "stringValue": s }),
        FieldValue::Timestamp(t) => json!({ "timestampValue": t.to_rfc3339() }),
        FieldValue::ServerTimestamp => return None,
    };
    Some(encoded)
}

/// Decode a REST wire value. Types the console never reads decode to `None`.
pub fn decode_value(value: &Value) -> StoreResult<Option<FieldValue>> {
    let Some(object) = value.as_object() else {
        return Err(StoreError::Decode(format!("expected value object, found {}", value)));
    };

    let decoded = if object.contains_key("nullValue") {
        Some(FieldValue::Null)
    } else if let Some(b) = object.get("booleanValue") {
        b.as_bool().map(FieldValue::Boolean)
    } else if let Some(i) = object.get("integerValue") {
        let parsed = match i {
            Value::String(s) => s.parse::<i64>().ok(),
            other => other.as_i64(),
        };
        Some(FieldValue::Integer(parsed.ok_or_else(|| {
            StoreError::Decode(format!("bad integerValue {}", i))
        })?))
    } else if let Some(d) = object.get("doubleValue") {
        d.as_f64().map(FieldValue::Double)
    } else if let Some(s) = object.get("stringValue") {
        s.as_str().map(|s| FieldValue::String(s.to_string()))
    } else if let Some(t) = object.get("timestampValue") {
        let raw = t.as_str().unwrap_or_default();
        let parsed = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| StoreError::Decode(format!("bad timestampValue '{}': {}", raw, e)))?;
        Some(FieldValue::Timestamp(parsed))
    } else {
        None
    };

    Ok(decoded)
}

/// Decode a REST document resource (`{"name": ..., "fields": {...}}`)
pub fn decode_document(resource: &Value) -> StoreResult<Document> {
    let name = resource["name"]
        .as_str()
        .ok_or_else(|| StoreError::Decode("document without name".to_string()))?;
    let id = name.rsplit('/').next().unwrap_or(name);
    let id = urlencoding::decode(id)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| id.to_string());

    let mut fields = Fields::new();
    if let Some(raw_fields) = resource["fields"].as_object() {
        for (field, raw) in raw_fields {
            if let Some(value) = decode_value(raw)? {
                fields.insert(field.clone(), value);
            }
        }
    }

    Ok(Document::new(id, fields))
}

fn field_filter(field: &str, value: &FieldValue) -> Value {
    json!({
        "fieldFilter": {
            "field": { "fieldPath": field },
            "op": "EQUAL",
            "value": encode_value(value).unwrap_or(json!({ "nullValue": null })),
        }
    })
}

/// Build the `structuredQuery` body for a collection query
pub fn structured_query(collection: &str, query: &Query) -> Value {
    let mut structured = Map::new();
    structured.insert("from".to_string(), json!([{ "collectionId": collection }]));

    match query.filters.as_slice() {
        [] => {}
        [only] => {
            structured.insert("where".to_string(), field_filter(&only.field, &only.value));
        }
        many => {
            let filters: Vec<Value> = many.iter().map(|f| field_filter(&f.field, &f.value)).collect();
            structured.insert(
                "where".to_string(),
                json!({ "compositeFilter": { "op": "AND", "filters": filters } }),
            );
        }
    }

    if let Some((field, direction)) = &query.order_by {
        let direction = match direction {
            Direction::Ascending => "ASCENDING",
            Direction::Descending => "DESCENDING",
        };
        structured.insert(
            "orderBy".to_string(),
            json!([{ "field": { "fieldPath": field }, "direction": direction }]),
        );
    }

    if let Some(limit) = query.limit {
        structured.insert("limit".to_string(), json!(limit));
    }

    json!({ "structuredQuery": Value::Object(structured) })
}

#[async_trait]
impl DocumentStore for FirestoreStore {
    async fn run_query(&self, collection: &str, query: Query) -> StoreResult<Vec<Document>> {
        let body = structured_query(collection, &query);
        let request = self.http.post(format!("{}:runQuery", self.documents_url)).json(&body);
        let response = self.send("query", collection, request).await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }

        let results = read_json(response).await?;
        let entries = results
            .as_array()
            .ok_or_else(|| StoreError::Decode("runQuery response is not an array".to_string()))?;

        entries
            .iter()
            .filter(|entry| entry.get("document").is_some())
            .map(|entry| decode_document(&entry["document"]))
            .collect()
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Document>> {
        let request = self.http.get(self.document_url(collection, id));
        let response = self.send("get", collection, request).await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(decode_document(&read_json(response).await?)?)),
            _ => Err(rejected(response).await),
        }
    }

    async fn set(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        let mut encoded = Map::new();
        let mut transforms = Vec::new();
        for (field, value) in &fields {
            match encode_value(value) {
                Some(v) => {
                    encoded.insert(field.clone(), v);
                }
                None => transforms.push(json!({ "fieldPath": field, "setToServerValue": "REQUEST_TIME" })),
            }
        }

        let mut write = json!({
            "update": {
                "name": format!("{}/{}/{}", self.documents_path, collection, id),
                "fields": Value::Object(encoded),
            }
        });
        if !transforms.is_empty() {
            write["updateTransforms"] = Value::Array(transforms);
        }

        let request = self
            .http
            .post(format!("{}:commit", self.documents_url))
            .json(&json!({ "writes": [write] }));
        let response = self.send("set", collection, request).await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        let request = self.http.delete(self.document_url(collection, id));
        let response = self.send("delete", collection, request).await?;

        if !response.status().is_success() {
            return Err(rejected(response).await);
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.get("settings", "main").await.map(|_| ())
    }
}
