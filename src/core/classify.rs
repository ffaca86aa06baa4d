//! Change classification against previously stored state
//!
//! Decides whether a raw record is added, updated, or unchanged relative
//! to what the store last saw, driven solely by fingerprint equality. The
//! field-level diff is only computed when the fingerprints differ.

use crate::core::hash::profile_fingerprint;
use crate::domain::profile::{RawProfile, StoredProfile};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification verdict for one record in one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// First-seen entity, no prior state
    Added,
    /// Prior state exists and the content fingerprint differs
    Updated,
    /// Prior state exists with an identical fingerprint
    Unchanged,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::Added => "added",
            Outcome::Updated => "updated",
            Outcome::Unchanged => "unchanged",
        };
        write!(f, "{s}")
    }
}

/// One field whose value differs between the stored and raw record
///
/// The engine stamps these into [`FieldChange`](crate::domain::FieldChange)
/// entries once the profile row id and run id are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDiff {
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// Result of classifying one record
#[derive(Debug, Clone)]
pub struct Classification {
    pub outcome: Outcome,
    /// Fingerprint of the raw record, regardless of outcome
    pub fingerprint: String,
    /// Field-level diff; empty unless the outcome is `Updated`
    pub diff: Vec<FieldDiff>,
}

/// Classify a raw record against its previously stored state
///
/// Classification is driven solely by fingerprint equality, never by
/// timestamps or field-by-field comparison: two records with identical
/// semantic content are always `Unchanged` even if non-hashed fields such
/// as image URLs differ. Image changes are tracked separately via
/// [`image_fingerprint`](crate::core::hash::image_fingerprint).
pub fn classify(raw: &RawProfile, previous: Option<&StoredProfile>) -> Classification {
    let fingerprint = profile_fingerprint(raw);

    let previous = match previous {
        Some(prev) => prev,
        None => {
            return Classification {
                outcome: Outcome::Added,
                fingerprint,
                diff: Vec::new(),
            }
        }
    };

    if fingerprint == previous.data_hash {
        return Classification {
            outcome: Outcome::Unchanged,
            fingerprint,
            diff: Vec::new(),
        };
    }

    Classification {
        diff: diff_fields(raw, previous),
        outcome: Outcome::Updated,
        fingerprint,
    }
}

/// Compute the top-level field diff between stored state and a raw record
///
/// Covers exactly the fields that participate in the fingerprint. Scalars
/// are stringified as-is (absent when empty); lists and counts are
/// JSON-encoded so old/new values stay machine-readable.
fn diff_fields(raw: &RawProfile, previous: &StoredProfile) -> Vec<FieldDiff> {
    let mut diff = Vec::new();

    push_scalar(&mut diff, "full_name", &previous.full_name, &raw.full_name);
    push_scalar(
        &mut diff,
        "headline",
        &previous.headline,
        raw.headline.as_deref().unwrap_or(""),
    );
    push_scalar(
        &mut diff,
        "location",
        &previous.location,
        raw.location.as_deref().unwrap_or(""),
    );
    push_scalar(
        &mut diff,
        "summary",
        &previous.summary,
        raw.summary.as_deref().unwrap_or(""),
    );
    push_json(&mut diff, "experience", &previous.experience, &raw.experience);
    push_json(&mut diff, "education", &previous.education, &raw.education);
    push_json(&mut diff, "skills", &previous.skills, &raw.skills);

    let old_count = previous.connections_count;
    let new_count = raw.connections_count.unwrap_or(0);
    if old_count != new_count {
        diff.push(FieldDiff {
            field_name: "connections_count".to_string(),
            old_value: Some(old_count.to_string()),
            new_value: Some(new_count.to_string()),
        });
    }

    diff
}

fn push_scalar(diff: &mut Vec<FieldDiff>, field: &str, old: &str, new: &str) {
    if old != new {
        diff.push(FieldDiff {
            field_name: field.to_string(),
            old_value: stringify_scalar(old),
            new_value: stringify_scalar(new),
        });
    }
}

fn push_json<T: serde::Serialize + PartialEq>(
    diff: &mut Vec<FieldDiff>,
    field: &str,
    old: &T,
    new: &T,
) {
    if old != new {
        diff.push(FieldDiff {
            field_name: field.to_string(),
            old_value: stringify_json(old),
            new_value: stringify_json(new),
        });
    }
}

fn stringify_scalar(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn stringify_json<T: serde::Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::validate::{validate_profile, validation_status};
    use crate::domain::profile::ValidationStatus;
    use chrono::Utc;

    fn raw(skills: &[&str]) -> RawProfile {
        RawProfile {
            linkedin_id: "jane-smith-123".to_string(),
            full_name: "Jane Smith".to_string(),
            headline: Some("PM".to_string()),
            location: None,
            summary: None,
            experience: vec![],
            education: vec![],
            skills: skills.iter().map(|s| s.to_string()).collect(),
            connections_count: None,
            profile_url: "https://www.linkedin.com/in/jane-smith-123".to_string(),
            profile_image_url: None,
            banner_image_url: None,
        }
    }

    fn stored(from: &RawProfile) -> StoredProfile {
        let issues = validate_profile(from);
        let status = validation_status(&issues);
        let hash = profile_fingerprint(from);
        let mut profile = StoredProfile::from_raw(
            from,
            from.typed_id().unwrap(),
            hash,
            status,
            issues,
            Utc::now(),
        );
        profile.id = Some(uuid::Uuid::new_v4());
        profile
    }

    #[test]
    fn test_first_seen_is_added_with_empty_diff() {
        let record = raw(&["AI"]);
        let classification = classify(&record, None);
        assert_eq!(classification.outcome, Outcome::Added);
        assert!(classification.diff.is_empty());
        assert_eq!(classification.fingerprint, profile_fingerprint(&record));
    }

    #[test]
    fn test_identical_content_is_unchanged() {
        let record = raw(&["AI"]);
        let previous = stored(&record);
        let classification = classify(&record, Some(&previous));
        assert_eq!(classification.outcome, Outcome::Unchanged);
        assert!(classification.diff.is_empty());
    }

    #[test]
    fn test_unchanged_even_when_image_urls_differ() {
        let record_a = raw(&["AI"]);
        let mut record_b = record_a.clone();
        record_b.profile_image_url = Some("https://img.example.com/new.jpg".to_string());
        let previous = stored(&record_a);
        let classification = classify(&record_b, Some(&previous));
        assert_eq!(classification.outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_skills_change_produces_updated_with_diff() {
        let old_record = raw(&["AI"]);
        let previous = stored(&old_record);
        let new_record = raw(&["AI", "ML"]);

        let classification = classify(&new_record, Some(&previous));
        assert_eq!(classification.outcome, Outcome::Updated);
        assert_ne!(classification.fingerprint, previous.data_hash);

        assert_eq!(classification.diff.len(), 1);
        let change = &classification.diff[0];
        assert_eq!(change.field_name, "skills");
        assert_eq!(change.old_value.as_deref(), Some(r#"["AI"]"#));
        assert_eq!(change.new_value.as_deref(), Some(r#"["AI","ML"]"#));
    }

    #[test]
    fn test_diff_covers_multiple_fields() {
        let old_record = raw(&["AI"]);
        let previous = stored(&old_record);

        let mut new_record = raw(&["AI"]);
        new_record.headline = Some("CTO".to_string());
        new_record.connections_count = Some(42);

        let classification = classify(&new_record, Some(&previous));
        assert_eq!(classification.outcome, Outcome::Updated);

        let fields: Vec<&str> = classification
            .diff
            .iter()
            .map(|d| d.field_name.as_str())
            .collect();
        assert_eq!(fields, vec!["headline", "connections_count"]);

        let headline = &classification.diff[0];
        assert_eq!(headline.old_value.as_deref(), Some("PM"));
        assert_eq!(headline.new_value.as_deref(), Some("CTO"));
    }

    #[test]
    fn test_cleared_scalar_diffs_to_absent_value() {
        let old_record = raw(&["AI"]);
        let previous = stored(&old_record);

        let mut new_record = raw(&["AI"]);
        new_record.headline = None;

        let classification = classify(&new_record, Some(&previous));
        assert_eq!(classification.outcome, Outcome::Updated);
        let change = &classification.diff[0];
        assert_eq!(change.field_name, "headline");
        assert_eq!(change.old_value.as_deref(), Some("PM"));
        assert!(change.new_value.is_none());
    }

    #[test]
    fn test_classifier_imposes_no_validity_precondition() {
        // The engine chooses whether to classify invalid records; the
        // classifier itself accepts them.
        let mut record = raw(&["AI"]);
        record.full_name = String::new();
        assert_eq!(
            validation_status(&validate_profile(&record)),
            ValidationStatus::Invalid
        );
        let classification = classify(&record, None);
        assert_eq!(classification.outcome, Outcome::Added);
    }
}
