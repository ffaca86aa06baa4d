//! Content fingerprinting for change detection
//!
//! A profile's fingerprint is a SHA-256 digest over a normalized projection
//! of its semantic fields. The projection serializes with a fixed field
//! order and compact formatting, so two semantically identical records
//! always hash identically regardless of how their fields were presented
//! on input.

use crate::domain::profile::{EducationEntry, ExperienceEntry, RawProfile};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Normalized projection of the fields that participate in the fingerprint
///
/// Field order here is the serialization order. Absent scalars default to
/// the empty string / zero; list order is preserved as given. Image URLs
/// and the profile URL are deliberately excluded — they never influence
/// change classification.
#[derive(Serialize)]
struct HashProjection<'a> {
    full_name: &'a str,
    headline: &'a str,
    location: &'a str,
    summary: &'a str,
    experience: &'a [ExperienceEntry],
    education: &'a [EducationEntry],
    skills: &'a [String],
    connections_count: i64,
}

/// Compute the content fingerprint of a raw profile
///
/// Returns a lowercase hex SHA-256 digest (64 characters). Identical
/// projections always yield identical digests; any difference in a
/// projected field changes the digest.
pub fn profile_fingerprint(profile: &RawProfile) -> String {
    let projection = HashProjection {
        full_name: &profile.full_name,
        headline: profile.headline.as_deref().unwrap_or(""),
        location: profile.location.as_deref().unwrap_or(""),
        summary: profile.summary.as_deref().unwrap_or(""),
        experience: &profile.experience,
        education: &profile.education,
        skills: &profile.skills,
        connections_count: profile.connections_count.unwrap_or(0),
    };

    // Struct serialization has a stable field order, so no key sorting is
    // needed. Serializing a projection of owned scalars cannot fail.
    let serialized =
        serde_json::to_string(&projection).expect("hash projection is always serializable");

    sha256_hex(serialized.as_bytes())
}

/// Compute the fingerprint of an image URL
///
/// Hashes the URL text directly; used to detect image-asset changes
/// without fetching the asset itself.
pub fn image_fingerprint(url: &str) -> String {
    sha256_hex(url.as_bytes())
}

fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("{result:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawProfile {
        RawProfile {
            linkedin_id: "jane-smith-123".to_string(),
            full_name: "Jane Smith".to_string(),
            headline: Some("PM".to_string()),
            location: Some("Berlin".to_string()),
            summary: None,
            experience: vec![ExperienceEntry {
                company: "Acme".to_string(),
                title: "PM".to_string(),
                start_date: "2020-01".to_string(),
                end_date: None,
                description: None,
                location: None,
            }],
            education: vec![],
            skills: vec!["AI".to_string()],
            connections_count: Some(500),
            profile_url: "https://www.linkedin.com/in/jane-smith-123".to_string(),
            profile_image_url: None,
            banner_image_url: None,
        }
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let profile = sample();
        let h1 = profile_fingerprint(&profile);
        let h2 = profile_fingerprint(&profile);
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert!(h1.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_ignores_non_projected_fields() {
        let mut a = sample();
        let mut b = sample();
        a.profile_image_url = Some("https://img.example.com/a.jpg".to_string());
        b.profile_image_url = Some("https://img.example.com/b.jpg".to_string());
        b.profile_url = "https://www.linkedin.com/in/other".to_string();
        b.linkedin_id = "other".to_string();
        assert_eq!(profile_fingerprint(&a), profile_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_absent_scalars_equal_empty_defaults() {
        let mut a = sample();
        let mut b = sample();
        a.summary = None;
        b.summary = Some(String::new());
        a.connections_count = Some(500);
        b.connections_count = Some(500);
        assert_eq!(profile_fingerprint(&a), profile_fingerprint(&b));

        a.connections_count = None;
        b.connections_count = Some(0);
        assert_eq!(profile_fingerprint(&a), profile_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_sensitive_to_each_projected_field() {
        let base = sample();
        let base_hash = profile_fingerprint(&base);

        let mut changed = base.clone();
        changed.full_name = "Jane Smyth".to_string();
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.headline = Some("CTO".to_string());
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.location = Some("Munich".to_string());
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.summary = Some("A summary".to_string());
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.experience[0].title = "Director".to_string();
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.education.push(EducationEntry {
            school: "TU Berlin".to_string(),
            degree: None,
            field_of_study: None,
            start_year: None,
            end_year: None,
        });
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.skills.push("ML".to_string());
        assert_ne!(profile_fingerprint(&changed), base_hash);

        let mut changed = base.clone();
        changed.connections_count = Some(501);
        assert_ne!(profile_fingerprint(&changed), base_hash);
    }

    #[test]
    fn test_fingerprint_sensitive_to_list_order() {
        let mut a = sample();
        let mut b = sample();
        a.skills = vec!["AI".to_string(), "ML".to_string()];
        b.skills = vec!["ML".to_string(), "AI".to_string()];
        assert_ne!(profile_fingerprint(&a), profile_fingerprint(&b));
    }

    #[test]
    fn test_image_fingerprint() {
        let h1 = image_fingerprint("https://img.example.com/a.jpg");
        let h2 = image_fingerprint("https://img.example.com/a.jpg");
        let h3 = image_fingerprint("https://img.example.com/b.jpg");
        assert_eq!(h1, h2);
        assert_ne!(h1, h3);
        assert_eq!(h1.len(), 64);
    }
}
