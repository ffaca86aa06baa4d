//! Profile models
//!
//! [`RawProfile`] is the untrusted input shape produced by the record
//! sources and the fetch client. [`StoredProfile`] is the durable shape
//! owned by the profile store, carrying the content hash and validation
//! result alongside the normalized fields.

use crate::core::validate::ValidationIssue;
use crate::domain::ids::LinkedInId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One position held at a company
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub company: String,
    pub title: String,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One school attended
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_study: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,
}

/// Raw profile record as supplied by a record source or the fetch API
///
/// No invariants are enforced here; this is input to validation. Optional
/// fields are normalized (empty string, empty list, zero) when the record
/// is hashed or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    pub linkedin_id: String,
    pub full_name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub connections_count: Option<i64>,
    pub profile_url: String,
    #[serde(default)]
    pub profile_image_url: Option<String>,
    #[serde(default)]
    pub banner_image_url: Option<String>,
}

impl RawProfile {
    /// Parse the external identifier into a typed [`LinkedInId`]
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn typed_id(&self) -> Result<LinkedInId, String> {
        LinkedInId::new(self.linkedin_id.clone())
    }
}

/// Validation verdict for a stored profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationStatus {
    /// Not yet validated
    Pending,
    /// Validated with no error-severity issues (warnings allowed)
    Valid,
    /// At least one error-severity issue
    Invalid,
}

/// Durable profile record owned by the profile store
///
/// Invariant: `validation_status == Invalid` iff `validation_issues`
/// contains at least one error-severity issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredProfile {
    /// Store-assigned row identifier, `None` until first persisted
    pub id: Option<Uuid>,
    pub linkedin_id: LinkedInId,
    pub full_name: String,
    pub headline: String,
    pub location: String,
    pub summary: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<String>,
    pub connections_count: i64,
    pub profile_url: String,
    /// Lowercase hex SHA-256 over the hashed projection
    pub data_hash: String,
    pub validation_status: ValidationStatus,
    pub validation_issues: Vec<ValidationIssue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_validated_at: Option<DateTime<Utc>>,
}

impl StoredProfile {
    /// Build the durable form of a raw record
    ///
    /// Optional scalars are normalized to their empty defaults so the
    /// stored shape matches the hashed projection field for field.
    /// Timestamps are the caller's responsibility: `created_at` and
    /// `updated_at` are both set to `now`; callers that are refreshing an
    /// existing record carry the previous timestamps over.
    pub fn from_raw(
        raw: &RawProfile,
        linkedin_id: LinkedInId,
        data_hash: String,
        validation_status: ValidationStatus,
        validation_issues: Vec<ValidationIssue>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            linkedin_id,
            full_name: raw.full_name.clone(),
            headline: raw.headline.clone().unwrap_or_default(),
            location: raw.location.clone().unwrap_or_default(),
            summary: raw.summary.clone().unwrap_or_default(),
            experience: raw.experience.clone(),
            education: raw.education.clone(),
            skills: raw.skills.clone(),
            connections_count: raw.connections_count.unwrap_or(0),
            profile_url: raw.profile_url.clone(),
            data_hash,
            validation_status,
            validation_issues,
            created_at: now,
            updated_at: now,
            last_validated_at: Some(now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw() -> RawProfile {
        RawProfile {
            linkedin_id: "jane-smith-123".to_string(),
            full_name: "Jane Smith".to_string(),
            headline: Some("Product Manager".to_string()),
            location: None,
            summary: None,
            experience: vec![],
            education: vec![],
            skills: vec!["AI".to_string()],
            connections_count: None,
            profile_url: "https://www.linkedin.com/in/jane-smith-123".to_string(),
            profile_image_url: None,
            banner_image_url: None,
        }
    }

    #[test]
    fn test_typed_id() {
        let raw = sample_raw();
        assert_eq!(raw.typed_id().unwrap().as_str(), "jane-smith-123");
    }

    #[test]
    fn test_from_raw_normalizes_absent_fields() {
        let raw = sample_raw();
        let id = raw.typed_id().unwrap();
        let now = Utc::now();
        let stored = StoredProfile::from_raw(
            &raw,
            id,
            "abc".to_string(),
            ValidationStatus::Valid,
            vec![],
            now,
        );

        assert!(stored.id.is_none());
        assert_eq!(stored.location, "");
        assert_eq!(stored.summary, "");
        assert_eq!(stored.connections_count, 0);
        assert_eq!(stored.created_at, now);
        assert_eq!(stored.updated_at, now);
        assert_eq!(stored.last_validated_at, Some(now));
    }

    #[test]
    fn test_raw_profile_deserializes_with_defaults() {
        let json = r#"{
            "linkedin_id": "jane-smith-123",
            "full_name": "Jane Smith",
            "profile_url": "https://www.linkedin.com/in/jane-smith-123"
        }"#;
        let raw: RawProfile = serde_json::from_str(json).unwrap();
        assert!(raw.headline.is_none());
        assert!(raw.experience.is_empty());
        assert!(raw.skills.is_empty());
        assert!(raw.connections_count.is_none());
    }

    #[test]
    fn test_stored_profile_round_trip() {
        let raw = sample_raw();
        let id = raw.typed_id().unwrap();
        let stored = StoredProfile::from_raw(
            &raw,
            id,
            "abc".to_string(),
            ValidationStatus::Pending,
            vec![],
            Utc::now(),
        );
        let json = serde_json::to_string(&stored).unwrap();
        let back: StoredProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.linkedin_id, stored.linkedin_id);
        assert_eq!(back.validation_status, ValidationStatus::Pending);
    }
}
