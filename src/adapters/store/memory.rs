//! In-memory profile store
//!
//! Backs unit and integration tests and the `validate` command. Keeps the
//! same semantics as the durable stores: upserts are keyed by LinkedIn id,
//! row ids are assigned on first insert, change entries are append-only.

use crate::adapters::store::{ImageKind, ProfileStore};
use crate::domain::change::FieldChange;
use crate::domain::ids::LinkedInId;
use crate::domain::profile::StoredProfile;
use crate::domain::run::{EtlRun, RunKind};
use crate::domain::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
struct Inner {
    profiles: HashMap<LinkedInId, StoredProfile>,
    changes: Vec<FieldChange>,
    runs: Vec<EtlRun>,
    images: HashMap<(LinkedInId, ImageKind), String>,
}

/// Profile store held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All change entries appended so far, in append order
    pub async fn changes(&self) -> Vec<FieldChange> {
        self.inner.lock().await.changes.clone()
    }

    /// Number of profiles currently stored
    pub async fn profile_count(&self) -> usize {
        self.inner.lock().await.profiles.len()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_profile(&self, id: &LinkedInId) -> Result<Option<StoredProfile>> {
        Ok(self.inner.lock().await.profiles.get(id).cloned())
    }

    async fn upsert_profile(&self, mut profile: StoredProfile) -> Result<StoredProfile> {
        let mut inner = self.inner.lock().await;
        if profile.id.is_none() {
            profile.id = Some(Uuid::new_v4());
        }
        inner
            .profiles
            .insert(profile.linkedin_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn append_changes(&self, changes: &[FieldChange]) -> Result<()> {
        self.inner.lock().await.changes.extend_from_slice(changes);
        Ok(())
    }

    async fn create_run(&self, kind: RunKind) -> Result<EtlRun> {
        let run = EtlRun::new(kind);
        self.inner.lock().await.runs.push(run.clone());
        Ok(run)
    }

    async fn update_run(&self, run: &EtlRun) -> Result<()> {
        let mut inner = self.inner.lock().await;
        if let Some(existing) = inner.runs.iter_mut().find(|r| r.id == run.id) {
            *existing = run.clone();
        } else {
            inner.runs.push(run.clone());
        }
        Ok(())
    }

    async fn list_runs(&self, limit: usize) -> Result<Vec<EtlRun>> {
        let inner = self.inner.lock().await;
        let mut runs: Vec<EtlRun> = inner.runs.clone();
        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        runs.truncate(limit);
        Ok(runs)
    }

    async fn image_hash(&self, id: &LinkedInId, kind: ImageKind) -> Result<Option<String>> {
        Ok(self
            .inner
            .lock()
            .await
            .images
            .get(&(id.clone(), kind))
            .cloned())
    }

    async fn record_image(
        &self,
        id: &LinkedInId,
        kind: ImageKind,
        _url: &str,
        hash: &str,
    ) -> Result<()> {
        self.inner
            .lock()
            .await
            .images
            .insert((id.clone(), kind), hash.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::profile::{RawProfile, ValidationStatus};
    use chrono::Utc;

    fn stored(id: &str) -> StoredProfile {
        let raw = RawProfile {
            linkedin_id: id.to_string(),
            full_name: "Test".to_string(),
            headline: None,
            location: None,
            summary: None,
            experience: vec![],
            education: vec![],
            skills: vec![],
            connections_count: None,
            profile_url: format!("https://www.linkedin.com/in/{id}"),
            profile_image_url: None,
            banner_image_url: None,
        };
        StoredProfile::from_raw(
            &raw,
            raw.typed_id().unwrap(),
            "hash".to_string(),
            ValidationStatus::Pending,
            vec![],
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_upsert_assigns_id_once() {
        let store = MemoryStore::new();
        let first = store.upsert_profile(stored("a")).await.unwrap();
        let id = first.id.unwrap();

        let second = store.upsert_profile(first).await.unwrap();
        assert_eq!(second.id, Some(id));
        assert_eq!(store.profile_count().await, 1);
    }

    #[tokio::test]
    async fn test_get_profile_absent() {
        let store = MemoryStore::new();
        let id = LinkedInId::new("missing").unwrap();
        assert!(store.get_profile(&id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_runs_newest_first() {
        let store = MemoryStore::new();
        let first = store.create_run(RunKind::Full).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = store.create_run(RunKind::Incremental).await.unwrap();

        let runs = store.list_runs(10).await.unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, second.id);
        assert_eq!(runs[1].id, first.id);

        let limited = store.list_runs(1).await.unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_image_hash_round_trip() {
        let store = MemoryStore::new();
        let id = LinkedInId::new("a").unwrap();
        assert!(store
            .image_hash(&id, ImageKind::Banner)
            .await
            .unwrap()
            .is_none());
        store
            .record_image(&id, ImageKind::Banner, "https://x/y.jpg", "abc")
            .await
            .unwrap();
        assert_eq!(
            store.image_hash(&id, ImageKind::Banner).await.unwrap(),
            Some("abc".to_string())
        );
        assert!(store
            .image_hash(&id, ImageKind::ProfilePhoto)
            .await
            .unwrap()
            .is_none());
    }
}
