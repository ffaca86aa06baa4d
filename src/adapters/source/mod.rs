//! Record sources
//!
//! Turn external input (CSV or JSON files) into typed raw profiles before
//! any of them reach the engine. Loosely-typed rows never propagate past
//! this boundary.

pub mod csv;
pub mod json;

use crate::domain::profile::RawProfile;
use crate::domain::{EtlError, Result};
use std::path::Path;

pub use self::csv::parse_csv;
pub use self::json::parse_json;

/// Supported input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Json,
}

impl SourceFormat {
    /// Infer the format from a file extension
    ///
    /// # Errors
    ///
    /// Returns an error for unrecognized extensions.
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("csv") => Ok(SourceFormat::Csv),
            Some("json") => Ok(SourceFormat::Json),
            other => Err(EtlError::MalformedInput(format!(
                "Unsupported input format: {}",
                other.unwrap_or("none")
            ))),
        }
    }
}

/// Read a file and parse it into raw profiles based on its extension
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<RawProfile>> {
    let path = path.as_ref();
    let format = SourceFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)
        .map_err(|e| EtlError::Io(format!("read {}: {e}", path.display())))?;

    let records = match format {
        SourceFormat::Csv => parse_csv(&text)?,
        SourceFormat::Json => parse_json(&text)?,
    };

    tracing::info!(
        path = %path.display(),
        format = ?format,
        records = records.len(),
        "Loaded input file"
    );

    Ok(records)
}
