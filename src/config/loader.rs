//! Configuration loader with TOML parsing and environment variable overrides
//!
//! Loading is a four-step pipeline: read the file, substitute `${VAR}`
//! placeholders, parse the TOML, then apply `PROSPECT_*` environment
//! overrides and validate.

use super::schema::ProspectConfig;
use super::secret::secret_string;
use crate::domain::errors::EtlError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// # Errors
///
/// Returns an error if the file cannot be read, the TOML is invalid, a
/// referenced environment variable is unset, or validation fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<ProspectConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EtlError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EtlError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: ProspectConfig = toml::from_str(&contents)
        .map_err(|e| EtlError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config
        .validate()
        .map_err(|e| EtlError::Configuration(format!("Configuration validation failed: {e}")))?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched so documented placeholders don't
/// trigger missing-variable errors.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("valid placeholder regex");
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        let trimmed = line.trim_start();

        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EtlError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the PROSPECT_* prefix
///
/// Variables follow the pattern PROSPECT_<SECTION>_<KEY>, for example
/// PROSPECT_STORE_DATA_DIR or PROSPECT_ETL_MODE.
fn apply_env_overrides(config: &mut ProspectConfig) {
    if let Ok(val) = std::env::var("PROSPECT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("PROSPECT_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    if let Ok(val) = std::env::var("PROSPECT_STORE_DATA_DIR") {
        config.store.data_dir = val;
    }

    if let Some(ref mut fetch) = config.fetch {
        if let Ok(val) = std::env::var("PROSPECT_FETCH_ENDPOINT") {
            fetch.endpoint = val;
        }
        if let Ok(val) = std::env::var("PROSPECT_FETCH_API_TOKEN") {
            fetch.api_token = secret_string(val);
        }
        if let Ok(val) = std::env::var("PROSPECT_FETCH_REQUEST_DELAY_MS") {
            if let Ok(delay) = val.parse() {
                fetch.request_delay_ms = delay;
            }
        }
    }

    if let Ok(val) = std::env::var("PROSPECT_ETL_MODE") {
        config.etl.mode = val;
    }

    if let Ok(val) = std::env::var("PROSPECT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("PROSPECT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("PROSPECT_TEST_VAR", "test_value");
        let input = "api_token = \"${PROSPECT_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_token = \"test_value\"\n");
        std::env::remove_var("PROSPECT_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("PROSPECT_MISSING_VAR");
        let input = "api_token = \"${PROSPECT_MISSING_VAR}\"";
        assert!(substitute_env_vars(input).is_err());
    }

    #[test]
    fn test_substitute_env_vars_skips_comments() {
        std::env::remove_var("PROSPECT_COMMENTED_VAR");
        let input = "# api_token = \"${PROSPECT_COMMENTED_VAR}\"\nmode = \"full\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${PROSPECT_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("nonexistent.toml").is_err());
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[store]
data_dir = "var/prospect"

[fetch]
endpoint = "https://api.example.com/v1/profile"
api_token = "test-token"

[etl]
mode = "full"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.store.data_dir, "var/prospect");
        assert_eq!(config.etl.mode, "full");
        assert!(config.fetch.is_some());
    }

    #[test]
    fn test_load_config_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "info");
        assert_eq!(config.store.data_dir, "data");
        assert_eq!(config.etl.mode, "incremental");
        assert!(config.fetch.is_none());
    }

    #[test]
    fn test_load_config_invalid_mode() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[etl]\nmode = \"nightly\"\n")
            .unwrap();
        temp_file.flush().unwrap();

        assert!(load_config(temp_file.path()).is_err());
    }
}
