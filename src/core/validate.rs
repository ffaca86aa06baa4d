//! Field-level profile validation
//!
//! Pure rule evaluation over a raw profile. Issues come back in rule
//! order, so validation output is deterministic for a given record.
//! Error-severity issues make a record invalid; warnings are recorded but
//! don't block.

use crate::domain::profile::{RawProfile, ValidationStatus};
use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum headline length before a warning is raised
pub const MAX_HEADLINE_LEN: usize = 220;

/// Maximum summary length before a warning is raised
pub const MAX_SUMMARY_LEN: usize = 2600;

/// Connection counts above this are flagged as suspect
pub const MAX_CONNECTIONS: i64 = 30_000;

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks valid status
    Error,
    /// Recorded but does not block
    Warning,
}

/// One validation finding, tagged with the offending field
///
/// Field paths are dotted/indexed, e.g. `experience[2].company`. Multiple
/// issues may reference the same field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// Validate a raw profile against structural and business rules
///
/// Pure function of the input; issues are returned in rule evaluation
/// order.
pub fn validate_profile(profile: &RawProfile) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if profile.linkedin_id.trim().is_empty() {
        issues.push(ValidationIssue::error(
            "linkedin_id",
            "LinkedIn ID is required",
        ));
    }

    if profile.full_name.trim().is_empty() {
        issues.push(ValidationIssue::error(
            "full_name",
            "Full name is required",
        ));
    }

    if Url::parse(&profile.profile_url).is_err() {
        issues.push(ValidationIssue::error(
            "profile_url",
            "Valid profile URL is required",
        ));
    }

    if let Some(headline) = &profile.headline {
        if headline.chars().count() > MAX_HEADLINE_LEN {
            issues.push(ValidationIssue::warning(
                "headline",
                format!("Headline exceeds maximum length of {MAX_HEADLINE_LEN} characters"),
            ));
        }
    }

    if let Some(summary) = &profile.summary {
        if summary.chars().count() > MAX_SUMMARY_LEN {
            issues.push(ValidationIssue::warning(
                "summary",
                format!("Summary exceeds maximum length of {MAX_SUMMARY_LEN} characters"),
            ));
        }
    }

    if let Some(count) = profile.connections_count {
        if count < 0 {
            issues.push(ValidationIssue::error(
                "connections_count",
                "Connections count cannot be negative",
            ));
        } else if count > MAX_CONNECTIONS {
            issues.push(ValidationIssue::warning(
                "connections_count",
                "Connections count exceeds typical maximum",
            ));
        }
    }

    for (index, entry) in profile.experience.iter().enumerate() {
        if entry.company.trim().is_empty() {
            issues.push(ValidationIssue::warning(
                format!("experience[{index}].company"),
                "Company name is required for experience entry",
            ));
        }
        if entry.title.trim().is_empty() {
            issues.push(ValidationIssue::warning(
                format!("experience[{index}].title"),
                "Job title is required for experience entry",
            ));
        }
    }

    for (index, entry) in profile.education.iter().enumerate() {
        if entry.school.trim().is_empty() {
            issues.push(ValidationIssue::warning(
                format!("education[{index}].school"),
                "School name is required for education entry",
            ));
        }
    }

    issues
}

/// Derive the coarse verdict from a list of issues
///
/// Invalid iff any issue has error severity; a record with only warnings
/// is valid.
pub fn validation_status(issues: &[ValidationIssue]) -> ValidationStatus {
    if issues.iter().any(|i| i.severity == Severity::Error) {
        ValidationStatus::Invalid
    } else {
        ValidationStatus::Valid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{EducationEntry, ExperienceEntry};
    use test_case::test_case;

    fn valid_profile() -> RawProfile {
        RawProfile {
            linkedin_id: "jane-smith-123".to_string(),
            full_name: "Jane Smith".to_string(),
            headline: Some("Product Manager".to_string()),
            location: Some("Berlin".to_string()),
            summary: Some("Ships things.".to_string()),
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "PM".to_string(),
                start_date: "2020-01".to_string(),
                end_date: None,
                description: None,
                location: None,
            }],
            education: vec![EducationEntry {
                school: "TU Berlin".to_string(),
                degree: None,
                field_of_study: None,
                start_year: Some(2012),
                end_year: Some(2016),
            }],
            skills: vec!["AI".to_string()],
            connections_count: Some(500),
            profile_url: "https://www.linkedin.com/in/jane-smith-123".to_string(),
            profile_image_url: None,
            banner_image_url: None,
        }
    }

    #[test]
    fn test_valid_profile_has_no_issues() {
        let issues = validate_profile(&valid_profile());
        assert!(issues.is_empty(), "unexpected issues: {issues:?}");
        assert_eq!(validation_status(&issues), ValidationStatus::Valid);
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace only")]
    fn test_missing_full_name_is_error(name: &str) {
        let mut profile = valid_profile();
        profile.full_name = name.to_string();
        let issues = validate_profile(&profile);
        let issue = issues.iter().find(|i| i.field == "full_name").unwrap();
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(validation_status(&issues), ValidationStatus::Invalid);
    }

    #[test]
    fn test_missing_linkedin_id_is_error() {
        let mut profile = valid_profile();
        profile.linkedin_id = "  ".to_string();
        let issues = validate_profile(&profile);
        assert!(issues
            .iter()
            .any(|i| i.field == "linkedin_id" && i.severity == Severity::Error));
    }

    #[test_case("not a url" ; "plain text")]
    #[test_case("" ; "empty")]
    #[test_case("www.linkedin.com/in/jane" ; "missing scheme")]
    fn test_invalid_profile_url_is_error(url: &str) {
        let mut profile = valid_profile();
        profile.profile_url = url.to_string();
        let issues = validate_profile(&profile);
        assert!(issues
            .iter()
            .any(|i| i.field == "profile_url" && i.severity == Severity::Error));
    }

    #[test_case(220, false ; "at limit")]
    #[test_case(221, true ; "over limit")]
    fn test_headline_length_rule(len: usize, expect_warning: bool) {
        let mut profile = valid_profile();
        profile.headline = Some("x".repeat(len));
        let issues = validate_profile(&profile);
        assert_eq!(issues.iter().any(|i| i.field == "headline"), expect_warning);
    }

    #[test_case(2600, false ; "at limit")]
    #[test_case(2601, true ; "over limit")]
    fn test_summary_length_rule(len: usize, expect_warning: bool) {
        let mut profile = valid_profile();
        profile.summary = Some("x".repeat(len));
        let issues = validate_profile(&profile);
        assert_eq!(issues.iter().any(|i| i.field == "summary"), expect_warning);
    }

    #[test]
    fn test_negative_connections_is_error() {
        let mut profile = valid_profile();
        profile.connections_count = Some(-1);
        let issues = validate_profile(&profile);
        let issue = issues
            .iter()
            .find(|i| i.field == "connections_count")
            .unwrap();
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(validation_status(&issues), ValidationStatus::Invalid);
    }

    #[test]
    fn test_excessive_connections_is_warning() {
        let mut profile = valid_profile();
        profile.connections_count = Some(30_001);
        let issues = validate_profile(&profile);
        let issue = issues
            .iter()
            .find(|i| i.field == "connections_count")
            .unwrap();
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(validation_status(&issues), ValidationStatus::Valid);
    }

    #[test]
    fn test_absent_connections_count_is_not_checked() {
        let mut profile = valid_profile();
        profile.connections_count = None;
        let issues = validate_profile(&profile);
        assert!(!issues.iter().any(|i| i.field == "connections_count"));
    }

    #[test]
    fn test_experience_entries_checked_per_index() {
        let mut profile = valid_profile();
        profile.experience.push(ExperienceEntry {
            company: String::new(),
            title: String::new(),
            start_date: "2018-01".to_string(),
            end_date: None,
            description: None,
            location: None,
        });
        let issues = validate_profile(&profile);
        assert!(issues
            .iter()
            .any(|i| i.field == "experience[1].company" && i.severity == Severity::Warning));
        assert!(issues
            .iter()
            .any(|i| i.field == "experience[1].title" && i.severity == Severity::Warning));
        // warnings alone don't invalidate
        assert_eq!(validation_status(&issues), ValidationStatus::Valid);
    }

    #[test]
    fn test_education_school_checked_per_index() {
        let mut profile = valid_profile();
        profile.education[0].school = " ".to_string();
        let issues = validate_profile(&profile);
        assert!(issues
            .iter()
            .any(|i| i.field == "education[0].school" && i.severity == Severity::Warning));
    }

    #[test]
    fn test_issue_ordering_follows_rule_order() {
        let mut profile = valid_profile();
        profile.full_name = String::new();
        profile.profile_url = "nope".to_string();
        profile.education[0].school = String::new();
        let issues = validate_profile(&profile);
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["full_name", "profile_url", "education[0].school"]);
    }
}
