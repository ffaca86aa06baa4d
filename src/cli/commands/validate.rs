//! Validate command implementation
//!
//! Runs the validation rules over an input file and reports issues without
//! touching the store.

use crate::adapters::source::load_records;
use crate::core::validate::{validate_profile, Severity};
use clap::Args;

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Input file (CSV or JSON) with profile records
    pub input: String,
}

impl ValidateArgs {
    /// Execute the validate command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input, "Validating input file");

        let records = match load_records(&self.input) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Failed to load input file: {e}");
                return Ok(3);
            }
        };

        println!("Validating {} record(s) from {}", records.len(), self.input);
        println!();

        let mut total_errors = 0usize;
        let mut total_warnings = 0usize;
        let mut invalid_records = 0usize;

        for record in &records {
            let issues = validate_profile(record);
            if issues.is_empty() {
                continue;
            }

            let has_errors = issues.iter().any(|i| i.severity == Severity::Error);
            if has_errors {
                invalid_records += 1;
            }

            println!(
                "{} ({}):",
                if record.linkedin_id.is_empty() {
                    "<missing id>"
                } else {
                    record.linkedin_id.as_str()
                },
                record.full_name
            );
            for issue in &issues {
                match issue.severity {
                    Severity::Error => {
                        total_errors += 1;
                        println!("  error   {}: {}", issue.field, issue.message);
                    }
                    Severity::Warning => {
                        total_warnings += 1;
                        println!("  warning {}: {}", issue.field, issue.message);
                    }
                }
            }
            println!();
        }

        println!(
            "{} record(s) checked, {} invalid, {} error(s), {} warning(s)",
            records.len(),
            invalid_records,
            total_errors,
            total_warnings
        );

        Ok(if invalid_records > 0 { 1 } else { 0 })
    }
}
