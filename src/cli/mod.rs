//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Prospect using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Prospect - Incremental Profile ETL Tool
#[derive(Parser, Debug)]
#[command(name = "prospect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "prospect.toml", env = "PROSPECT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PROSPECT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Process a batch of profile records from a CSV or JSON file
    Run(commands::run::RunArgs),

    /// Fetch profiles from the remote API and process them
    Fetch(commands::fetch::FetchArgs),

    /// Validate records in an input file without writing anything
    Validate(commands::validate::ValidateArgs),

    /// Show recent ETL runs
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
