//! Route-boundary error mapping

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;
use crate::utils::errors::{ConsoleError, StoreError};
use crate::views::store_error_text;

/// Errors that end a request early
#[derive(Debug)]
pub enum WebError {
    /// No authenticated session; send the operator to the login form
    Unauthenticated,
    /// A store operation failed
    Store(StoreError),
    /// Anything else that escaped a handler
    Internal(String),
}

/// 302 redirect to a local path
pub fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}

impl From<StoreError> for WebError {
    fn from(e: StoreError) -> Self {
        WebError::Store(e)
    }
}

impl From<ConsoleError> for WebError {
    fn from(e: ConsoleError) -> Self {
        match e {
            ConsoleError::Store(e) => WebError::Store(e),
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        match self {
            WebError::Unauthenticated => found("/login"),
            WebError::Store(e) => {
                error!(error = %e, "Store operation failed");
                (StatusCode::INTERNAL_SERVER_ERROR, store_error_text(&e.to_string())).into_response()
            }
            WebError::Internal(message) => {
                error!(error = %message, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, store_error_text(&message)).into_response()
            }
        }
    }
}
