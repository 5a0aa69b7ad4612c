//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured before startup.

use crate::utils::errors::{ConsoleError, Result};
use super::{Settings, StoreBackend};

/// Minimum length of the session signing secret, in bytes
pub const MIN_SECRET_LEN: usize = 16;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_session_config(&settings.session)?;
    validate_operator_config(&settings.operator)?;
    validate_store_config(&settings.store)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.secret.is_empty() {
        return Err(ConsoleError::Config(
            "Session secret is required".to_string()
        ));
    }

    if config.secret.len() < MIN_SECRET_LEN {
        return Err(ConsoleError::Config(
            format!("Session secret must be at least {} bytes", MIN_SECRET_LEN)
        ));
    }

    if config.cookie_name.is_empty() {
        return Err(ConsoleError::Config(
            "Session cookie name is required".to_string()
        ));
    }

    if config.ttl_seconds == 0 {
        return Err(ConsoleError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate operator credentials
fn validate_operator_config(config: &super::OperatorConfig) -> Result<()> {
    if config.username.is_empty() || config.password.is_empty() {
        return Err(ConsoleError::Config(
            "Operator username and password are required".to_string()
        ));
    }

    Ok(())
}

/// Validate document store configuration
fn validate_store_config(config: &super::StoreConfig) -> Result<()> {
    if config.backend == StoreBackend::Memory {
        return Ok(());
    }

    if config.timeout_seconds == 0 {
        return Err(ConsoleError::Config(
            "Store timeout must be greater than 0".to_string()
        ));
    }

    url::Url::parse(&config.base_url).map_err(|e| {
        ConsoleError::Config(format!("Invalid store base URL '{}': {}", config.base_url, e))
    })?;

    match (&config.emulator_host, &config.credentials) {
        (Some(_), _) => {
            if config.project_id.as_deref().map_or(true, str::is_empty) {
                return Err(ConsoleError::Config(
                    "Store project ID is required when using the emulator".to_string()
                ));
            }
        }
        (None, Some(credentials)) if !credentials.trim().is_empty() => {}
        (None, _) => {
            return Err(ConsoleError::Config(
                "Store service-account credentials are required".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ConsoleError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(ConsoleError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if config.directory.is_empty() {
        return Err(ConsoleError::Config(
            "Log directory is required".to_string()
        ));
    }

    Ok(())
}
