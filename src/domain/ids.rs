//! Domain identifier types with validation
//!
//! Newtype wrappers for externally supplied identifiers. Store-assigned
//! identifiers (profile rows, runs) are plain [`uuid::Uuid`]s.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// LinkedIn profile identifier newtype wrapper
///
/// The external identifier a profile is keyed by across imports. Uniqueness
/// is enforced by the store, not by this type.
///
/// # Examples
///
/// ```
/// use prospect::domain::ids::LinkedInId;
/// use std::str::FromStr;
///
/// let id = LinkedInId::from_str("jane-smith-123").unwrap();
/// assert_eq!(id.as_str(), "jane-smith-123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LinkedInId(String);

impl LinkedInId {
    /// Creates a new LinkedInId from a string
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("LinkedIn ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LinkedInId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LinkedInId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LinkedInId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linkedin_id_creation() {
        let id = LinkedInId::new("jane-smith-123").unwrap();
        assert_eq!(id.as_str(), "jane-smith-123");
    }

    #[test]
    fn test_linkedin_id_empty_fails() {
        assert!(LinkedInId::new("").is_err());
        assert!(LinkedInId::new("   ").is_err());
    }

    #[test]
    fn test_linkedin_id_display() {
        let id = LinkedInId::new("test-id").unwrap();
        assert_eq!(format!("{}", id), "test-id");
    }

    #[test]
    fn test_linkedin_id_from_str() {
        let id: LinkedInId = "jane-smith-123".parse().unwrap();
        assert_eq!(id.as_str(), "jane-smith-123");
    }

    #[test]
    fn test_linkedin_id_serialization() {
        let id = LinkedInId::new("jane-smith-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: LinkedInId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
