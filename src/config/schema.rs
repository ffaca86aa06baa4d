//! Configuration schema types
//!
//! Root structure mapping the TOML configuration file, with per-section
//! validation applied on load.

use crate::config::SecretString;
use crate::domain::run::RunKind;
use serde::{Deserialize, Serialize};

/// Main Prospect configuration
///
/// This is the root structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProspectConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Profile store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Profile fetch API configuration (required only for `prospect fetch`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch: Option<FetchConfig>,

    /// ETL run settings
    #[serde(default)]
    pub etl: EtlConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ProspectConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        if let Some(ref fetch) = self.fetch {
            fetch.validate()?;
        }
        self.etl.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (classify and report, never write to the store)
    #[serde(default)]
    pub dry_run: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

/// Profile store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the JSON store documents
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.data_dir.is_empty() {
            return Err("store.data_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Profile fetch API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Fetch API endpoint URL
    pub endpoint: String,

    /// Bearer token for the fetch API
    /// Stored securely in memory and automatically zeroized on drop
    pub api_token: SecretString,

    /// Delay between consecutive requests in milliseconds
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl FetchConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.endpoint.is_empty() {
            return Err("fetch.endpoint cannot be empty".to_string());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err("fetch.endpoint must start with http:// or https://".to_string());
        }

        if self.api_token.expose_secret().is_empty() {
            return Err("fetch.api_token cannot be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("fetch.timeout_secs must be > 0".to_string());
        }

        Ok(())
    }
}

/// ETL run settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlConfig {
    /// Run mode (full or incremental)
    #[serde(default = "default_etl_mode")]
    pub mode: String,
}

impl EtlConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_modes = ["full", "incremental"];
        if !valid_modes.contains(&self.mode.as_str()) {
            return Err(format!(
                "Invalid etl.mode '{}'. Must be one of: {}",
                self.mode,
                valid_modes.join(", ")
            ));
        }
        Ok(())
    }

    /// The configured mode as a typed run kind
    pub fn run_kind(&self) -> RunKind {
        if self.mode == "full" {
            RunKind::Full
        } else {
            RunKind::Incremental
        }
    }
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            mode: default_etl_mode(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_request_delay_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_etl_mode() -> String {
    "incremental".to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_store_config_validation() {
        let mut config = StoreConfig::default();
        assert!(config.validate().is_ok());

        config.data_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fetch_config_validation() {
        let mut config = FetchConfig {
            endpoint: "https://api.example.com/v1/profile".to_string(),
            api_token: secret_string("token"),
            request_delay_ms: 500,
            timeout_secs: 30,
        };
        assert!(config.validate().is_ok());

        config.endpoint = "ftp://api.example.com".to_string();
        assert!(config.validate().is_err());

        config.endpoint = "https://api.example.com/v1/profile".to_string();
        config.api_token = secret_string("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_etl_config_validation() {
        let mut config = EtlConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.run_kind(), RunKind::Incremental);

        config.mode = "full".to_string();
        assert!(config.validate().is_ok());
        assert_eq!(config.run_kind(), RunKind::Full);

        config.mode = "nightly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());

        config.local_rotation = "daily".to_string();
        config.local_enabled = true;
        config.local_path = String::new();
        assert!(config.validate().is_err());
    }
}
