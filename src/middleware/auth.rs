//! Operator authentication
//!
//! One fixed credential pair, injected from configuration, guards the whole
//! console. A successful login sets the session's authenticated flag; logout
//! clears it.

use std::convert::Infallible;
use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use subtle::ConstantTimeEq;
use tracing::debug;
use crate::config::OperatorConfig;
use crate::utils::errors::{AuthError, ConsoleError};
use crate::utils::logging::log_auth_attempt;
use super::session::{Session, SessionCodec, SessionToken};

/// Session guard for operator routes
#[derive(Clone)]
pub struct SessionGuard {
    operator: OperatorConfig,
    codec: SessionCodec,
}

impl SessionGuard {
    pub fn new(operator: OperatorConfig, codec: SessionCodec) -> Self {
        Self { operator, codec }
    }

    pub fn codec(&self) -> &SessionCodec {
        &self.codec
    }

    /// Whether the request's session carries the authenticated flag
    pub fn is_authenticated(&self, session: &Session) -> bool {
        session.authenticated
    }

    /// Check the submitted pair and issue an authenticated session token
    pub fn login(&self, username: &str, password: &str) -> Result<SessionToken, AuthError> {
        // Both comparisons always run.
        let matched = username.as_bytes().ct_eq(self.operator.username.as_bytes())
            & password.as_bytes().ct_eq(self.operator.password.as_bytes());

        if !bool::from(matched) {
            log_auth_attempt(false);
            return Err(AuthError::InvalidCredentials);
        }

        log_auth_attempt(true);
        self.codec
            .sign(Session { authenticated: true })
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to sign session");
                AuthError::InvalidCredentials
            })
    }

    /// Clear the flag and return the `Set-Cookie` value that drops the cookie
    pub fn logout(&self, session: &mut Session) -> String {
        debug!(was_authenticated = session.authenticated, "Operator logged out");
        session.authenticated = false;
        self.codec.clear_cookie()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    SessionGuard: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let guard = SessionGuard::from_ref(state);
        Ok(guard.codec().from_headers(&parts.headers))
    }
}

/// Build the guard from configuration
pub fn build_guard(settings: &crate::config::Settings) -> Result<SessionGuard, ConsoleError> {
    let codec = SessionCodec::new(&settings.session)?;
    Ok(SessionGuard::new(settings.operator.clone(), codec))
}
