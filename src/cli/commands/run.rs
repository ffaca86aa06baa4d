//! Run command implementation
//!
//! Loads profile records from a CSV or JSON file and processes them as one
//! ETL run against the configured store.

use crate::adapters::source::load_records;
use crate::adapters::store::{JsonFileStore, MemoryStore, ProfileStore};
use crate::config::load_config;
use crate::core::engine::{Engine, RunSummary};
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input file (CSV or JSON) with profile records
    pub input: String,

    /// Override run mode (full or incremental)
    #[arg(long)]
    pub mode: Option<String>,

    /// Dry run mode - classify and report without touching the store
    #[arg(long)]
    pub dry_run: bool,
}

impl RunArgs {
    /// Execute the run command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Starting run command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(mode) = &self.mode {
            tracing::info!(mode = %mode, "Overriding run mode from CLI");
            config.etl.mode = mode.clone();
        }
        if self.dry_run {
            config.application.dry_run = true;
        }

        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let records = match load_records(&self.input) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load input file");
                eprintln!("Failed to load input file: {e}");
                return Ok(3);
            }
        };

        if records.is_empty() {
            println!("No records found in {}", self.input);
            return Ok(0);
        }

        // Dry run works against a throwaway in-memory store so the
        // classification and counters are real but nothing persists.
        let store: Arc<dyn ProfileStore> = if config.application.dry_run {
            println!("DRY RUN - no data will be written");
            Arc::new(MemoryStore::new())
        } else {
            match JsonFileStore::open(&config.store.data_dir) {
                Ok(s) => Arc::new(s),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to open store");
                    eprintln!("Failed to open store: {e}");
                    return Ok(4);
                }
            }
        };

        let engine = Engine::new(store).with_shutdown(shutdown_signal);
        let summary = match engine.process_batch(records, config.etl.run_kind()).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        Ok(if summary.is_successful() { 0 } else { 1 })
    }
}

pub(crate) fn print_summary(summary: &RunSummary) {
    let counters = &summary.run.counters;
    println!();
    println!("Run Summary ({}):", summary.run.kind.as_str());
    println!("  Run ID: {}", summary.run.id);
    println!("  Status: {:?}", summary.run.status);
    println!("  Processed: {}", counters.processed);
    println!("  Added: {}", counters.added);
    println!("  Updated: {}", counters.updated);
    println!("  Unchanged: {}", counters.unchanged);
    println!("  Images processed: {}", counters.images_processed);
    println!("  Validation failures: {}", counters.validation_failures);
    if summary.skipped > 0 {
        println!("  Skipped (no identifier): {}", summary.skipped);
    }
    if let Some(duration) = summary.run.duration() {
        println!("  Duration: {:.2}s", duration.num_milliseconds() as f64 / 1000.0);
    }
    if let Some(message) = &summary.run.error_message {
        println!("  Error: {message}");
    }
    println!();
}
