//! Fetch command implementation
//!
//! Fetches profiles from the remote API by URL and feeds them through the
//! same batch engine as file-based runs.

use crate::adapters::fetch::FetchClient;
use crate::adapters::store::{JsonFileStore, ProfileStore};
use crate::config::load_config;
use crate::core::engine::Engine;
use clap::Args;
use std::sync::Arc;
use tokio::sync::watch;

use super::run::print_summary;

/// Arguments for the fetch command
#[derive(Args, Debug)]
pub struct FetchArgs {
    /// Profile URLs to fetch
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Override run mode (full or incremental)
    #[arg(long)]
    pub mode: Option<String>,
}

impl FetchArgs {
    /// Execute the fetch command
    pub async fn execute(
        &self,
        config_path: &str,
        shutdown_signal: watch::Receiver<bool>,
    ) -> anyhow::Result<i32> {
        tracing::info!(urls = self.urls.len(), "Starting fetch command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if let Some(mode) = &self.mode {
            config.etl.mode = mode.clone();
        }
        if let Err(e) = config.validate() {
            eprintln!("Configuration validation failed: {e}");
            return Ok(2);
        }

        let Some(fetch_config) = config.fetch.clone() else {
            eprintln!("No [fetch] section in configuration; set fetch.endpoint and fetch.api_token");
            return Ok(2);
        };

        let client = match FetchClient::new(fetch_config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to create fetch client: {e}");
                return Ok(4);
            }
        };

        println!("Fetching {} profile(s)...", self.urls.len());
        let batch = client.fetch_profiles(&self.urls).await;

        if !batch.failures.is_empty() {
            println!();
            println!("Fetch failures:");
            for failure in &batch.failures {
                println!("  - {}: {}", failure.url, failure.error);
            }
        }

        if batch.profiles.is_empty() {
            println!("No profiles fetched.");
            return Ok(if batch.failures.is_empty() { 0 } else { 1 });
        }

        let store: Arc<dyn ProfileStore> = match JsonFileStore::open(&config.store.data_dir) {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::error!(error = %e, "Failed to open store");
                eprintln!("Failed to open store: {e}");
                return Ok(4);
            }
        };

        let engine = Engine::new(store).with_shutdown(shutdown_signal);
        let summary = match engine
            .process_batch(batch.profiles, config.etl.run_kind())
            .await
        {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Run failed");
                eprintln!("Run failed: {e}");
                return Ok(5);
            }
        };

        print_summary(&summary);

        Ok(if summary.is_successful() && batch.failures.is_empty() {
            0
        } else {
            1
        })
    }
}
