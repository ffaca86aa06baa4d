//! Profile store abstraction
//!
//! The engine reads and writes all durable state through [`ProfileStore`].
//! Implementations own the records exclusively; the engine never caches a
//! stored profile beyond one record's processing.

pub mod jsonfile;
pub mod memory;

use crate::domain::change::FieldChange;
use crate::domain::ids::LinkedInId;
use crate::domain::profile::StoredProfile;
use crate::domain::run::{EtlRun, RunKind};
use crate::domain::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use jsonfile::JsonFileStore;
pub use memory::MemoryStore;

/// Which image slot of a profile a fingerprint belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageKind {
    ProfilePhoto,
    Banner,
}

impl ImageKind {
    /// Returns the kind as a string slice
    pub fn as_str(&self) -> &str {
        match self {
            ImageKind::ProfilePhoto => "profile_photo",
            ImageKind::Banner => "banner",
        }
    }
}

/// Storage interface for profiles, change audit entries, runs, and image
/// fingerprints
///
/// Upserts are expected to be atomic per identifier; the engine assumes a
/// single writer per identifier within one batch.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Load the stored profile for an external identifier
    ///
    /// Returns `Ok(None)` if the identifier has never been persisted.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails for reasons other than "not found".
    async fn get_profile(&self, id: &LinkedInId) -> Result<Option<StoredProfile>>;

    /// Insert or update a profile, keyed by its external identifier
    ///
    /// Assigns the row id on first insert and returns the stored copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    async fn upsert_profile(&self, profile: StoredProfile) -> Result<StoredProfile>;

    /// Append change audit entries
    ///
    /// Entries are append-only; implementations must never rewrite or
    /// delete previously appended entries.
    async fn append_changes(&self, changes: &[FieldChange]) -> Result<()>;

    /// Create a new run in the `Running` state
    async fn create_run(&self, kind: RunKind) -> Result<EtlRun>;

    /// Persist the current state of a run
    async fn update_run(&self, run: &EtlRun) -> Result<()>;

    /// List runs, newest first
    async fn list_runs(&self, limit: usize) -> Result<Vec<EtlRun>>;

    /// Last recorded fingerprint for a profile's image slot
    async fn image_hash(&self, id: &LinkedInId, kind: ImageKind) -> Result<Option<String>>;

    /// Record the current fingerprint for a profile's image slot
    async fn record_image(
        &self,
        id: &LinkedInId,
        kind: ImageKind,
        url: &str,
        hash: &str,
    ) -> Result<()>;
}
