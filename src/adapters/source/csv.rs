//! CSV record source
//!
//! Parses header-mapped CSV exports into raw profiles. Rows missing any of
//! `linkedin_id`, `full_name`, `profile_url` are silently dropped before
//! they reach the engine. The `experience` and `education` cells carry
//! embedded JSON; `skills` is semicolon-joined.

use crate::domain::profile::{EducationEntry, ExperienceEntry, RawProfile};
use crate::domain::{EtlError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::collections::HashMap;

/// Parse CSV text into raw profiles
///
/// # Errors
///
/// Returns [`EtlError::MalformedInput`] if the text is not valid CSV, has
/// no header row, or a row carries embedded JSON that cannot be decoded.
pub fn parse_csv(text: &str) -> Result<Vec<RawProfile>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: HashMap<String, usize> = reader
        .headers()
        .map_err(|e| EtlError::MalformedInput(format!("CSV header: {e}")))?
        .iter()
        .enumerate()
        .map(|(index, name)| (name.trim().to_lowercase(), index))
        .collect();

    if headers.is_empty() {
        return Err(EtlError::MalformedInput("CSV file is empty".to_string()));
    }

    let mut profiles = Vec::new();
    for (row_number, row) in reader.records().enumerate() {
        let row = row.map_err(|e| {
            EtlError::MalformedInput(format!("CSV row {}: {e}", row_number + 2))
        })?;
        match map_row(&headers, &row, row_number + 2)? {
            Some(profile) => profiles.push(profile),
            None => {
                tracing::debug!(row = row_number + 2, "CSV row missing required fields, dropped");
            }
        }
    }

    Ok(profiles)
}

fn map_row(
    headers: &HashMap<String, usize>,
    row: &StringRecord,
    row_number: usize,
) -> Result<Option<RawProfile>> {
    let cell = |name: &str| -> Option<&str> {
        headers
            .get(name)
            .and_then(|&index| row.get(index))
            .filter(|value| !value.is_empty())
    };

    let (Some(linkedin_id), Some(full_name), Some(profile_url)) =
        (cell("linkedin_id"), cell("full_name"), cell("profile_url"))
    else {
        return Ok(None);
    };

    let experience: Vec<ExperienceEntry> = match cell("experience") {
        Some(json) => serde_json::from_str(json).map_err(|e| {
            EtlError::MalformedInput(format!("CSV row {row_number} experience: {e}"))
        })?,
        None => Vec::new(),
    };

    let education: Vec<EducationEntry> = match cell("education") {
        Some(json) => serde_json::from_str(json).map_err(|e| {
            EtlError::MalformedInput(format!("CSV row {row_number} education: {e}"))
        })?,
        None => Vec::new(),
    };

    let skills = cell("skills")
        .map(|value| value.split(';').map(|s| s.trim().to_string()).collect())
        .unwrap_or_default();

    let connections_count = match cell("connections_count") {
        Some(value) => Some(value.parse::<i64>().map_err(|e| {
            EtlError::MalformedInput(format!("CSV row {row_number} connections_count: {e}"))
        })?),
        None => None,
    };

    Ok(Some(RawProfile {
        linkedin_id: linkedin_id.to_string(),
        full_name: full_name.to_string(),
        headline: cell("headline").map(str::to_string),
        location: cell("location").map(str::to_string),
        summary: cell("summary").map(str::to_string),
        experience,
        education,
        skills,
        connections_count,
        profile_url: profile_url.to_string(),
        profile_image_url: cell("profile_image_url").map(str::to_string),
        banner_image_url: cell("banner_image_url").map(str::to_string),
    }))
}
