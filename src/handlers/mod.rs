//! Request handlers module
//!
//! One module per console section. Each protected handler checks the session
//! before touching the store.

pub mod assets;
pub mod auth;
pub mod blacklist;
pub mod dashboard;
pub mod error;
pub mod groups;
pub mod settings;
pub mod users;

pub use error::{found, WebError};

use crate::middleware::Session;
use crate::server::AppState;

/// Precondition of every data-access route
pub fn require_operator(state: &AppState, session: &Session) -> Result<(), WebError> {
    if state.guard.is_authenticated(session) {
        Ok(())
    } else {
        Err(WebError::Unauthenticated)
    }
}
