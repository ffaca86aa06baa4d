//! Init command implementation
//!
//! Generates a starter configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "prospect.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            eprintln!("Configuration file already exists: {}", self.output);
            eprintln!("Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::starter_config()) {
            Ok(()) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Set PROSPECT_API_TOKEN in your environment or a .env file");
                println!("  3. Process a batch: prospect run profiles.csv");
                Ok(0)
            }
            Err(e) => {
                eprintln!("Failed to write configuration file: {e}");
                Ok(5)
            }
        }
    }

    fn starter_config() -> String {
        r#"# Prospect Configuration File
# Incremental Profile ETL Tool

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"
# Dry run mode (classify and report, never write to the store)
dry_run = false

[store]
# Directory holding the JSON store documents
data_dir = "data"

# Profile fetch API (required only for `prospect fetch`)
[fetch]
endpoint = "https://api.example.com/v1/profile"
api_token = "${PROSPECT_API_TOKEN}"
# Delay between consecutive requests in milliseconds
request_delay_ms = 500
timeout_secs = 30

[etl]
# Run mode: "full" or "incremental"
mode = "incremental"

[logging]
# Enable local file logging (JSON, rotated)
local_enabled = false
local_path = "logs"
# Rotation: daily, hourly or never
local_rotation = "daily"
"#
        .to_string()
    }
}
