//! JSON record source
//!
//! Accepts either a single profile object or an array of them. Entries
//! that don't structurally match a raw profile are dropped; text that is
//! not JSON at all is a per-file failure.

use crate::domain::profile::RawProfile;
use crate::domain::{EtlError, Result};
use serde_json::Value;

/// Parse JSON text into raw profiles
///
/// # Errors
///
/// Returns [`EtlError::MalformedInput`] if the text is not valid JSON.
pub fn parse_json(text: &str) -> Result<Vec<RawProfile>> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| EtlError::MalformedInput(format!("Invalid JSON: {e}")))?;

    let entries = match value {
        Value::Array(entries) => entries,
        other => vec![other],
    };

    let total = entries.len();
    let profiles: Vec<RawProfile> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<RawProfile>(entry) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::debug!(error = %e, "JSON entry is not a profile, dropped");
                None
            }
        })
        .collect();

    if profiles.len() < total {
        tracing::warn!(
            dropped = total - profiles.len(),
            kept = profiles.len(),
            "Dropped JSON entries that were not structurally valid profiles"
        );
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array() {
        let text = r#"[
            {"linkedin_id": "a-1", "full_name": "Alice",
             "profile_url": "https://www.linkedin.com/in/a-1",
             "skills": ["AI"]},
            {"linkedin_id": "b-2", "full_name": "Bob",
             "profile_url": "https://www.linkedin.com/in/b-2"}
        ]"#;
        let profiles = parse_json(text).unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].skills, vec!["AI"]);
    }

    #[test]
    fn test_parse_single_object() {
        let text = r#"{"linkedin_id": "a-1", "full_name": "Alice",
                       "profile_url": "https://www.linkedin.com/in/a-1"}"#;
        let profiles = parse_json(text).unwrap();
        assert_eq!(profiles.len(), 1);
    }

    #[test]
    fn test_structurally_invalid_entries_are_dropped() {
        let text = r#"[
            {"linkedin_id": "a-1", "full_name": "Alice",
             "profile_url": "https://www.linkedin.com/in/a-1"},
            {"full_name": "No Id"},
            42
        ]"#;
        let profiles = parse_json(text).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].linkedin_id, "a-1");
    }

    #[test]
    fn test_invalid_json_is_malformed_input() {
        let err = parse_json("{not json").unwrap_err();
        assert!(matches!(err, EtlError::MalformedInput(_)));
    }
}
