//! Application configuration management.
//!
//! Handles loading, saving, and accessing the client configuration: server
//! address, API token, timeouts, and logging preferences. Configuration is
//! persisted as TOML on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{HockeyError, HockeyResult};
use crate::platform::Platform;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server connection settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Server connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HockeyApp server URL (e.g., "https://rink.hockeyapp.net").
    #[serde(default = "default_address")]
    pub address: String,

    /// API token sent in the `X-HockeyAppToken` header.
    #[serde(default)]
    pub api_token: String,

    /// Custom HTTP headers as key-value pairs.
    #[serde(default)]
    pub custom_headers: HashMap<String, String>,

    /// API request timeout in milliseconds.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_ms: u64,

    /// Timeout for binary uploads in milliseconds.
    #[serde(default = "default_upload_timeout")]
    pub upload_timeout_ms: u64,

    /// Whether to accept invalid TLS certificates (self-hosted test servers).
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Directory for log files. If empty, uses default location.
    #[serde(default)]
    pub directory: String,

    /// Enable JSON structured logging output.
    #[serde(default)]
    pub json_output: bool,
}

// Default value functions for serde

fn default_address() -> String {
    constants::DEFAULT_SERVER_ADDRESS.to_string()
}

fn default_api_timeout() -> u64 {
    constants::DEFAULT_API_TIMEOUT_MS
}

fn default_upload_timeout() -> u64 {
    constants::DEFAULT_UPLOAD_TIMEOUT_MS
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            api_token: String::new(),
            custom_headers: HashMap::new(),
            api_timeout_ms: default_api_timeout(),
            upload_timeout_ms: default_upload_timeout(),
            accept_invalid_certs: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: String::new(),
            json_output: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file path, falling back to
    /// defaults when no file exists. Environment overrides are applied.
    pub fn load_default() -> HockeyResult<Self> {
        let path = Self::default_config_path()?;
        let mut config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_token_override(std::env::var(constants::TOKEN_ENV_VAR).ok());
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from_file(path: &Path) -> HockeyResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a specific file path.
    pub fn save_to_file(&self, path: &Path) -> HockeyResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = toml::to_string_pretty(self)
            .map_err(|e| HockeyError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> HockeyResult<PathBuf> {
        Ok(Platform::config_dir()?.join("config.toml"))
    }

    /// Get the effective log directory, using the configured path or the default.
    pub fn effective_log_dir(&self) -> HockeyResult<PathBuf> {
        if self.logging.directory.is_empty() {
            Ok(Platform::data_dir()?.join("logs"))
        } else {
            Ok(PathBuf::from(&self.logging.directory))
        }
    }

    /// Replace the API token with a non-empty override value.
    pub fn apply_token_override(&mut self, token: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.server.api_token = token.trim().to_string();
        }
    }

    /// Check that the server connection is usable.
    pub fn ensure_server_configured(&self) -> HockeyResult<()> {
        if self.server.address.trim().is_empty() {
            return Err(HockeyError::MissingConfig("server.address".into()));
        }
        if self.server.api_token.is_empty() {
            return Err(HockeyError::MissingConfig(format!(
                "server.api_token (or {})",
                constants::TOKEN_ENV_VAR
            )));
        }
        Ok(())
    }

    /// Sanitize and normalize a server address.
    ///
    /// Ensures the address has a scheme (https by default) and strips
    /// surrounding quotes and trailing slashes.
    pub fn sanitize_server_address(address: &str) -> String {
        let trimmed = address.trim().trim_matches('"').trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("https://{trimmed}")
        };

        with_scheme.trim_end_matches('/').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.address, "https://rink.hockeyapp.net");
        assert_eq!(config.server.api_timeout_ms, 30_000);
        assert_eq!(config.server.upload_timeout_ms, 600_000);
        assert_eq!(config.logging.level, "info");
        assert!(config.ensure_server_configured().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("[server]\napi_token = \"abc\"\n").unwrap();
        assert_eq!(config.server.api_token, "abc");
        assert_eq!(config.server.address, "https://rink.hockeyapp.net");
        assert!(config.ensure_server_configured().is_ok());
    }

    #[test]
    fn test_token_override() {
        let mut config = AppConfig::default();
        config.server.api_token = "from-file".into();

        config.apply_token_override(Some("   ".into()));
        assert_eq!(config.server.api_token, "from-file");

        config.apply_token_override(None);
        assert_eq!(config.server.api_token, "from-file");

        config.apply_token_override(Some(" from-env ".into()));
        assert_eq!(config.server.api_token, "from-env");
    }

    #[test]
    fn test_sanitize_server_address() {
        assert_eq!(
            AppConfig::sanitize_server_address("rink.hockeyapp.net"),
            "https://rink.hockeyapp.net"
        );
        assert_eq!(
            AppConfig::sanitize_server_address("http://192.168.1.100:8080/"),
            "http://192.168.1.100:8080"
        );
        assert_eq!(
            AppConfig::sanitize_server_address("  \"https://example.com/\"  "),
            "https://example.com"
        );
        assert_eq!(AppConfig::sanitize_server_address("   "), "");
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.server.api_token = "secret".into();
        config.logging.json_output = true;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.server.api_token, "secret");
        assert!(loaded.logging.json_output);
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\naddress = 1").unwrap();
        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, HockeyError::Config(_)));
    }
}
