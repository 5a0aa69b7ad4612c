//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Environment variable prefix, nested keys use `__` (`GHOSTSHIELD__SESSION__SECRET`)
pub const ENV_PREFIX: &str = "GHOSTSHIELD";

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub operator: OperatorConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Signed session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub secret: String,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_session_ttl")]
    pub ttl_seconds: u64,
    #[serde(default)]
    pub secure_cookie: bool,
}

/// The single operator credential pair
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperatorConfig {
    pub username: String,
    pub password: String,
}

/// Which document store implementation backs the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Firestore,
    Memory,
}

/// Document store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Service-account JSON payload
    pub credentials: Option<String>,
    pub project_id: Option<String>,
    pub emulator_host: Option<String>,
    pub base_url: String,
    pub timeout_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: String,
    pub file_prefix: String,
}

fn default_cookie_name() -> String {
    "session".to_string()
}

fn default_session_ttl() -> u64 {
    31 * 24 * 3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Firestore,
            credentials: None,
            project_id: None,
            emulator_host: None,
            base_url: "https://firestore.googleapis.com".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: "logs".to_string(),
            file_prefix: "ghostshield.log".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from `config.toml` (if present) and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file, still layered under the environment
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::ConsoleError> {
        super::validation::validate_settings(self)
    }

    /// Socket address string for the HTTP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            session: SessionConfig {
                secret: String::new(),
                cookie_name: default_cookie_name(),
                ttl_seconds: default_session_ttl(),
                secure_cookie: false,
            },
            operator: OperatorConfig {
                username: String::new(),
                password: String::new(),
            },
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    #[test]
    #[serial]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[session]
secret = "0123456789abcdef0123"

[operator]
username = "operator"
password = "hunter22"

[store]
backend = "memory"
base_url = "http://localhost"
timeout_seconds = 3
"#
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.session.cookie_name, "session");
        assert_eq!(settings.session.ttl_seconds, 31 * 24 * 3600);
        assert_eq!(settings.operator.username, "operator");
        assert_eq!(settings.store.backend, StoreBackend::Memory);
        assert_eq!(settings.store.timeout_seconds, 3);
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    #[serial]
    fn test_environment_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[session]\nsecret = \"0123456789abcdef0123\"\n\n[operator]\nusername = \"operator\"\npassword = \"from-file\""
        )
        .unwrap();

        std::env::set_var("GHOSTSHIELD__OPERATOR__PASSWORD", "from-env");
        std::env::set_var("GHOSTSHIELD__SERVER__PORT", "9090");
        let settings = Settings::from_file(file.path());
        std::env::remove_var("GHOSTSHIELD__OPERATOR__PASSWORD");
        std::env::remove_var("GHOSTSHIELD__SERVER__PORT");

        let settings = settings.unwrap();
        assert_eq!(settings.operator.password, "from-env");
        assert_eq!(settings.server.port, 9090);
    }

    #[test]
    #[serial]
    fn test_missing_session_section_fails() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[operator]\nusername = \"a\"\npassword = \"b\"").unwrap();

        assert!(Settings::from_file(file.path()).is_err());
    }
}
