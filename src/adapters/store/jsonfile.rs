//! JSON-file-backed profile store
//!
//! The default durable backend for the CLI. State lives as four JSON
//! documents under a data directory (`profiles.json`, `changes.json`,
//! `runs.json`, `images.json`) and is rewritten after every mutation.
//! Suitable for the batch sizes this tool targets; a database adapter can
//! replace it behind the same trait.

use crate::adapters::store::{ImageKind, ProfileStore};
use crate::domain::change::FieldChange;
use crate::domain::ids::LinkedInId;
use crate::domain::profile::StoredProfile;
use crate::domain::run::{EtlRun, RunKind};
use crate::domain::{Result, StoreError};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use uuid::Uuid;

const PROFILES_FILE: &str = "profiles.json";
const CHANGES_FILE: &str = "changes.json";
const RUNS_FILE: &str = "runs.json";
const IMAGES_FILE: &str = "images.json";

#[derive(Default)]
struct State {
    profiles: HashMap<String, StoredProfile>,
    changes: Vec<FieldChange>,
    runs: Vec<EtlRun>,
    /// Keyed by "{linkedin_id}:{image_kind}"
    images: HashMap<String, String>,
}

/// Durable profile store persisting JSON documents under a directory
pub struct JsonFileStore {
    dir: PathBuf,
    state: Mutex<State>,
}

impl JsonFileStore {
    /// Open (or initialize) a store under the given directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or existing
    /// state cannot be decoded.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StoreError::Unavailable(format!("cannot create {}: {e}", dir.display())))?;

        let state = State {
            profiles: load_document(&dir.join(PROFILES_FILE))?,
            changes: load_document(&dir.join(CHANGES_FILE))?,
            runs: load_document(&dir.join(RUNS_FILE))?,
            images: load_document(&dir.join(IMAGES_FILE))?,
        };

        tracing::debug!(
            dir = %dir.display(),
            profiles = state.profiles.len(),
            runs = state.runs.len(),
            "Opened JSON file store"
        );

        Ok(Self {
            dir,
            state: Mutex::new(state),
        })
    }

    fn image_key(id: &LinkedInId, kind: ImageKind) -> String {
        format!("{}:{}", id.as_str(), kind.as_str())
    }

    fn persist<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| StoreError::WriteFailed(format!("encode {file}: {e}")))?;
        std::fs::write(&path, json)
            .map_err(|e| StoreError::WriteFailed(format!("write {}: {e}", path.display())))?;
        Ok(())
    }
}

fn load_document<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Ok(T::default());
    }
    let contents = std::fs::read_to_string(path)
        .map_err(|e| StoreError::ReadFailed(format!("read {}: {e}", path.display())))?;
    let value = serde_json::from_str(&contents)
        .map_err(|e| StoreError::Corrupt(format!("decode {}: {e}", path.display())))?;
    Ok(value)
}

#[async_trait]
impl ProfileStore for JsonFileStore {
    async fn get_profile(&self, id: &LinkedInId) -> Result<Option<StoredProfile>> {
        Ok(self.state.lock().await.profiles.get(id.as_str()).cloned())
    }

    async fn upsert_profile(&self, mut profile: StoredProfile) -> Result<StoredProfile> {
        let mut state = self.state.lock().await;
        if profile.id.is_none() {
            profile.id = Some(Uuid::new_v4());
        }
        state
            .profiles
            .insert(profile.linkedin_id.as_str().to_string(), profile.clone());
        self.persist(PROFILES_FILE, &state.profiles)?;
        Ok(profile)
    }

    async fn append_changes(&self, changes: &[FieldChange]) -> Result<()> {
        let mut state = self.state.lock().await;
        state.changes.extend_from_slice(changes);
        self.persist(CHANGES_FILE, &state.changes)?;
        Ok(())
    }

    async fn create_run(&self, kind: RunKind) -> Result<EtlRun> {
        let mut state = self.state.lock().await;
        let run = EtlRun::new(kind);
        state.runs.push(run.clone());
        self.persist(RUNS_FILE, &state.runs)?;
        Ok(run)
    }

    async fn update_run(&self, run: &EtlRun) -> Result<()> {
        let mut state = self.state.lock().await;
        if let Some(existing) = state.runs.iter_mut().find(|r| r.id == run.id) {
            *existing = run.clone();
        } else {
            state.runs.push(run.clone());
        }
        self.persist(RUNS_FILE, &state.runs)?;
        Ok(())
    }

    async fn list_runs(&self, limit: usize) -> Result<Vec<EtlRun>> {
        let state = self.state.lock().await;
        let mut runs = state.runs.clone();
        runs.sort_by(|a, b| b.started_at.cmp(&a.started_at));
        runs.truncate(limit);
        Ok(runs)
    }

    async fn image_hash(&self, id: &LinkedInId, kind: ImageKind) -> Result<Option<String>> {
        Ok(self
            .state
            .lock()
            .await
            .images
            .get(&Self::image_key(id, kind))
            .cloned())
    }

    async fn record_image(
        &self,
        id: &LinkedInId,
        kind: ImageKind,
        _url: &str,
        hash: &str,
    ) -> Result<()> {
        let mut state = self.state.lock().await;
        state
            .images
            .insert(Self::image_key(id, kind), hash.to_string());
        self.persist(IMAGES_FILE, &state.images)?;
        Ok(())
    }
}
