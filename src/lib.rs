// Prospect - Incremental Profile ETL Tool
// Copyright (c) 2025 Prospect Contributors
// Licensed under the MIT License

//! # Prospect - Incremental Profile ETL
//!
//! Prospect ingests professional profile records from files or a fetch
//! API, validates them, and maintains an incrementally-updated profile
//! store with per-field change history.
//!
//! Each batch becomes one tracked run. Per record the engine computes a
//! content fingerprint over the projected profile fields, classifies the
//! record as added, updated, or unchanged against its stored prior state,
//! persists the result, and appends one change entry per differing field.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (hashing, validation, classification, run
//!   tracking, the batch engine)
//! - [`adapters`] - External integrations (record sources, fetch API,
//!   profile stores)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prospect::adapters::source::load_records;
//! use prospect::adapters::store::JsonFileStore;
//! use prospect::core::engine::Engine;
//! use prospect::domain::run::RunKind;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = load_records("profiles.csv")?;
//!     let store = Arc::new(JsonFileStore::open("data")?);
//!
//!     let engine = Engine::new(store);
//!     let summary = engine.process_batch(records, RunKind::Incremental).await?;
//!
//!     println!("Processed {} records", summary.run.counters.processed);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
