//! Middleware module
//!
//! This module contains session handling and the operator guard

pub mod auth;
pub mod session;

// Re-export commonly used middleware
pub use auth::{SessionGuard, build_guard};
pub use session::{Session, SessionCodec, SessionToken};
