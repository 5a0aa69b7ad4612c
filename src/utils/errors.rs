//! Error handling for GhostShield
//!
//! This module defines the error types used throughout the console
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the GhostShield console
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Bad operator input from a form field or a path segment
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{input}' is not a number")]
    NotANumber { input: String },
}

/// Login failures; the same variant covers a bad username and a bad password
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Document store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Document not found")]
    NotFound,

    #[error("Document store unreachable: {0}")]
    Unavailable(#[from] reqwest::Error),

    #[error("Document store rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Credential exchange failed: {0}")]
    Token(String),

    #[error("Malformed document: {0}")]
    Decode(String),
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Result type alias for document store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl StoreError {
    /// Whether the error means the target document is already absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

impl ConsoleError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            ConsoleError::Config(_) => false,
            ConsoleError::Store(StoreError::Unavailable(_)) => true,
            ConsoleError::Store(StoreError::Token(_)) => true,
            ConsoleError::Store(_) => false,
            ConsoleError::Validation(_) => false,
            ConsoleError::Auth(_) => false,
            ConsoleError::Serialization(_) => false,
            ConsoleError::Io(_) => true,
            ConsoleError::Http(_) => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ConsoleError::Config(_) => ErrorSeverity::Critical,
            ConsoleError::Auth(_) => ErrorSeverity::Warning,
            ConsoleError::Validation(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
