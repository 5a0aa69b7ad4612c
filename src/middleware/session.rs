//! Signed client-side sessions
//!
//! The session lives entirely in a cookie:
//! `base64url(json payload) "." base64url(HMAC-SHA256(secret, encoded payload))`.
//! Anything that fails to verify, or is older than the configured TTL, is
//! treated as an anonymous session.

use axum::http::{header::COOKIE, HeaderMap};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;
use crate::config::SessionConfig;
use crate::utils::errors::ConsoleError;

type HmacSha256 = Hmac<Sha256>;

/// Per-request session context handed to every handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    pub authenticated: bool,
}

/// Signed cookie value issued on login
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionPayload {
    authenticated: bool,
    issued_at: i64,
}

/// Signs and verifies session cookies
#[derive(Clone)]
pub struct SessionCodec {
    mac: HmacSha256,
    cookie_name: String,
    ttl_seconds: i64,
    secure: bool,
}

impl SessionCodec {
    pub fn new(config: &SessionConfig) -> Result<Self, ConsoleError> {
        let mac = HmacSha256::new_from_slice(config.secret.as_bytes())
            .map_err(|e| ConsoleError::Config(format!("Invalid session secret: {}", e)))?;

        Ok(Self {
            mac,
            cookie_name: config.cookie_name.clone(),
            ttl_seconds: i64::try_from(config.ttl_seconds).unwrap_or(i64::MAX),
            secure: config.secure_cookie,
        })
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    fn signature(&self, encoded_payload: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(encoded_payload.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Issue a token for the given session state, stamped now
    pub fn sign(&self, session: Session) -> Result<SessionToken, ConsoleError> {
        let payload = SessionPayload {
            authenticated: session.authenticated,
            issued_at: Utc::now().timestamp(),
        };
        let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&payload)?);
        let signature = URL_SAFE_NO_PAD.encode(self.signature(&encoded));

        Ok(SessionToken(format!("{}.{}", encoded, signature)))
    }

    /// Decode a cookie value; `None` when tampered, malformed, or expired
    pub fn verify(&self, value: &str) -> Option<Session> {
        let (encoded, signature) = value.split_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(encoded.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Rejected session cookie with bad signature");
            return None;
        }

        let payload: SessionPayload = serde_json::from_slice(&URL_SAFE_NO_PAD.decode(encoded).ok()?).ok()?;
        let age = Utc::now().timestamp() - payload.issued_at;
        if age < 0 || age > self.ttl_seconds {
            debug!(age = age, "Rejected expired session cookie");
            return None;
        }

        Some(Session {
            authenticated: payload.authenticated,
        })
    }

    /// Session carried by the request's cookies
    pub fn from_headers(&self, headers: &HeaderMap) -> Session {
        cookie_value(headers, &self.cookie_name)
            .and_then(|value| self.verify(value))
            .unwrap_or_default()
    }

    /// `Set-Cookie` value installing a token
    pub fn set_cookie(&self, token: &SessionToken) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax{}",
            self.cookie_name,
            token.as_str(),
            if self.secure { "; Secure" } else { "" }
        )
    }

    /// `Set-Cookie` value removing the session
    pub fn clear_cookie(&self) -> String {
        format!("{}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax", self.cookie_name)
    }
}

/// First value of a named cookie across all `Cookie` headers
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
