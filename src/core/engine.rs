//! Batch engine - orchestrates validation, hashing, classification, and
//! persistence for one run
//!
//! Records are processed strictly in input order: change-entry ordering and
//! counter attribution depend on it, and each record's classification is a
//! read-then-write of its own prior state. Per-record validation issues
//! never abort the batch; a store failure finalizes the run as failed and
//! stops processing.

use crate::adapters::store::{ImageKind, ProfileStore};
use crate::core::classify::{classify, Classification, Outcome};
use crate::core::hash::image_fingerprint;
use crate::core::tracker::RunTracker;
use crate::core::validate::{validate_profile, validation_status};
use crate::domain::change::FieldChange;
use crate::domain::ids::LinkedInId;
use crate::domain::profile::{RawProfile, StoredProfile, ValidationStatus};
use crate::domain::run::{EtlRun, RunKind};
use crate::domain::{EtlError, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

/// Outcome of one record within a batch, for caller display
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub linkedin_id: LinkedInId,
    pub outcome: Outcome,
    pub validation_status: ValidationStatus,
    pub changed_fields: usize,
}

/// Result of one batch: the finalized run plus per-record outcomes
///
/// The outcome list is returned to the caller for display and is not
/// persisted separately.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run: EtlRun,
    pub outcomes: Vec<RecordOutcome>,
    /// Records dropped before classification (e.g. missing identifier)
    pub skipped: usize,
}

impl RunSummary {
    /// Whether the run reached `Completed`
    pub fn is_successful(&self) -> bool {
        self.run.status == crate::domain::run::RunStatus::Completed
    }

    /// Log the summary at the end of a batch
    pub fn log_summary(&self) {
        let counters = &self.run.counters;
        tracing::info!(
            run_id = %self.run.id,
            status = ?self.run.status,
            processed = counters.processed,
            added = counters.added,
            updated = counters.updated,
            unchanged = counters.unchanged,
            images_processed = counters.images_processed,
            validation_failures = counters.validation_failures,
            skipped = self.skipped,
            "Run finished"
        );
        if let Some(message) = &self.run.error_message {
            tracing::warn!(run_id = %self.run.id, error = %message, "Run failed");
        }
    }
}

/// Batch ETL engine
///
/// Explicitly constructed with its collaborators; holds no process-wide
/// state. One engine instance owns the run it is processing.
pub struct Engine {
    store: Arc<dyn ProfileStore>,
    shutdown: Option<watch::Receiver<bool>>,
}

impl Engine {
    /// Create an engine over a profile store
    pub fn new(store: Arc<dyn ProfileStore>) -> Self {
        Self {
            store,
            shutdown: None,
        }
    }

    /// Attach a shutdown signal checked between records
    ///
    /// When the signal flips to `true`, the engine completes the run with
    /// the work done so far instead of failing it.
    pub fn with_shutdown(mut self, shutdown: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Process a batch of raw records as one run
    ///
    /// Per record, in batch order: validate, classify against prior stored
    /// state, upsert, append change entries, refresh image fingerprints,
    /// update counters. Invalid records are still classified and persisted
    /// (with status `Invalid` and their issues), so a previously valid
    /// record that turns invalid is still tracked as updated.
    ///
    /// The returned summary always carries the finalized run; a store
    /// failure mid-batch yields a `Failed` run whose counters reflect the
    /// records persisted before the failure.
    ///
    /// # Errors
    ///
    /// Returns an error only when the run itself cannot be created.
    pub async fn process_batch(
        &self,
        records: Vec<RawProfile>,
        kind: RunKind,
    ) -> Result<RunSummary> {
        let run = self.store.create_run(kind).await?;
        let run_id = run.id;
        let mut tracker = RunTracker::new(run)?;
        let mut outcomes = Vec::with_capacity(records.len());
        let mut skipped = 0usize;

        tracing::info!(
            run_id = %run_id,
            kind = kind.as_str(),
            batch_size = records.len(),
            "Starting run"
        );

        for record in &records {
            if self.shutdown_requested() {
                tracing::info!(run_id = %run_id, "Shutdown requested, completing run early");
                break;
            }

            let linkedin_id = match record.typed_id() {
                Ok(id) => id,
                Err(_) => {
                    // Cannot key the record; it never enters classification.
                    tracing::warn!("Record without identifier skipped");
                    skipped += 1;
                    continue;
                }
            };

            match self
                .process_record(record, &linkedin_id, run_id, &mut tracker)
                .await
            {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    tracing::error!(
                        run_id = %run_id,
                        linkedin_id = %linkedin_id,
                        error = %e,
                        "Store failure, aborting batch"
                    );
                    return self.finalize_failed(tracker, outcomes, skipped, e).await;
                }
            }
        }

        tracker.complete()?;
        let run = tracker.into_run();
        self.store.update_run(&run).await?;

        let summary = RunSummary {
            run,
            outcomes,
            skipped,
        };
        summary.log_summary();
        Ok(summary)
    }

    /// Process one record; returns its outcome or the fatal store error
    async fn process_record(
        &self,
        record: &RawProfile,
        linkedin_id: &LinkedInId,
        run_id: uuid::Uuid,
        tracker: &mut RunTracker,
    ) -> Result<RecordOutcome> {
        let issues = validate_profile(record);
        let status = validation_status(&issues);
        if status == ValidationStatus::Invalid {
            tracing::debug!(
                linkedin_id = %linkedin_id,
                issues = issues.len(),
                "Record failed validation"
            );
            tracker.record_validation_failure()?;
        }

        let previous = self.store.get_profile(linkedin_id).await?;
        let Classification {
            outcome,
            fingerprint,
            diff,
        } = classify(record, previous.as_ref());

        let now = Utc::now();
        let mut stored = StoredProfile::from_raw(
            record,
            linkedin_id.clone(),
            fingerprint,
            status,
            issues,
            now,
        );
        if let Some(prev) = &previous {
            stored.id = prev.id;
            stored.created_at = prev.created_at;
            // Unchanged records keep their previous update timestamp.
            if outcome == Outcome::Unchanged {
                stored.updated_at = prev.updated_at;
            }
        }

        let stored = self.store.upsert_profile(stored).await?;
        let profile_id = stored
            .id
            .ok_or_else(|| EtlError::Other("store returned profile without id".to_string()))?;

        if !diff.is_empty() {
            let changes: Vec<FieldChange> = diff
                .iter()
                .map(|d| FieldChange {
                    profile_id,
                    run_id,
                    field_name: d.field_name.clone(),
                    old_value: d.old_value.clone(),
                    new_value: d.new_value.clone(),
                    changed_at: now,
                })
                .collect();
            self.store.append_changes(&changes).await?;
        }

        self.refresh_images(record, linkedin_id, tracker).await?;

        tracker.record(outcome)?;
        tracing::debug!(
            linkedin_id = %linkedin_id,
            outcome = %outcome,
            changed_fields = diff.len(),
            "Record processed"
        );

        Ok(RecordOutcome {
            linkedin_id: linkedin_id.clone(),
            outcome,
            validation_status: status,
            changed_fields: diff.len(),
        })
    }

    /// Compare image URL fingerprints against the store and record changes
    ///
    /// An image counts as processed when its URL fingerprint differs from
    /// the one last recorded for that slot (including the first sighting).
    async fn refresh_images(
        &self,
        record: &RawProfile,
        linkedin_id: &LinkedInId,
        tracker: &mut RunTracker,
    ) -> Result<()> {
        let slots = [
            (ImageKind::ProfilePhoto, record.profile_image_url.as_deref()),
            (ImageKind::Banner, record.banner_image_url.as_deref()),
        ];

        for (kind, url) in slots {
            let Some(url) = url else { continue };
            let hash = image_fingerprint(url);
            let current = self.store.image_hash(linkedin_id, kind).await?;
            if current.as_deref() != Some(hash.as_str()) {
                self.store
                    .record_image(linkedin_id, kind, url, &hash)
                    .await?;
                tracker.record_image_processed()?;
            }
        }
        Ok(())
    }

    /// Finalize the run as failed and persist it on a best-effort basis
    async fn finalize_failed(
        &self,
        mut tracker: RunTracker,
        outcomes: Vec<RecordOutcome>,
        skipped: usize,
        error: EtlError,
    ) -> Result<RunSummary> {
        tracker.fail(error.to_string())?;
        let run = tracker.into_run();

        // The store may be the thing that failed; losing the run update is
        // acceptable, the summary still reports accurate counters.
        if let Err(e) = self.store.update_run(&run).await {
            tracing::warn!(run_id = %run.id, error = %e, "Failed to persist failed run");
        }

        let summary = RunSummary {
            run,
            outcomes,
            skipped,
        };
        summary.log_summary();
        Ok(summary)
    }

    fn shutdown_requested(&self) -> bool {
        self.shutdown
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }
}
