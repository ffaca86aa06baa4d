//! Status command implementation
//!
//! Displays recent ETL runs from the configured store.

use crate::adapters::store::{JsonFileStore, ProfileStore};
use crate::config::load_config;
use crate::domain::run::RunStatus;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Number of runs to show
    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking run status");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let store = match JsonFileStore::open(&config.store.data_dir) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to open store: {e}");
                return Ok(4);
            }
        };

        let runs = match store.list_runs(self.limit).await {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to load runs: {e}");
                return Ok(5);
            }
        };

        if runs.is_empty() {
            println!("No run history found.");
            println!("Run 'prospect run <file>' to process a batch.");
            return Ok(0);
        }

        println!("Showing {} run(s):", runs.len());
        println!();
        println!(
            "{:<38} {:<12} {:<11} {:>9} {:>6} {:>8} {:>10} {:>7} {:<20}",
            "Run ID", "Kind", "Status", "Processed", "Added", "Updated", "Unchanged", "Invalid", "Started"
        );
        println!("{}", "-".repeat(130));

        for run in &runs {
            let status = match run.status {
                RunStatus::Completed => "completed",
                RunStatus::Running => "running",
                RunStatus::Failed => "failed",
            };

            println!(
                "{:<38} {:<12} {:<11} {:>9} {:>6} {:>8} {:>10} {:>7} {:<20}",
                run.id.to_string(),
                run.kind.as_str(),
                status,
                run.counters.processed,
                run.counters.added,
                run.counters.updated,
                run.counters.unchanged,
                run.counters.validation_failures,
                run.started_at.format("%Y-%m-%d %H:%M:%S")
            );

            if let Some(message) = &run.error_message {
                println!("    error: {message}");
            }
        }

        println!();
        Ok(0)
    }
}
