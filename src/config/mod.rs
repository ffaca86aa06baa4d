//! Configuration management
//!
//! TOML-based configuration loading with `${VAR}` environment substitution,
//! `PROSPECT_*` overrides, and per-section validation.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! data_dir = "data"
//!
//! [fetch]
//! endpoint = "https://api.example.com/v1/profile"
//! api_token = "${PROSPECT_API_TOKEN}"
//! request_delay_ms = 500
//!
//! [etl]
//! mode = "incremental"
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, EtlConfig, FetchConfig, LoggingConfig, ProspectConfig, StoreConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
