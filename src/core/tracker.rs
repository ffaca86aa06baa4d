//! Run tracking state machine
//!
//! A [`RunTracker`] owns one [`EtlRun`] for the duration of a batch:
//! `Running` is the only state that accepts counter updates, and the two
//! terminal states (`Completed`, `Failed`) are sticky. Counters are
//! monotonically increasing while the run is live.

use crate::core::classify::Outcome;
use crate::domain::run::{EtlRun, RunCounters, RunStatus};
use crate::domain::{EtlError, Result};
use chrono::Utc;

/// State machine wrapper around one run
#[derive(Debug)]
pub struct RunTracker {
    run: EtlRun,
}

impl RunTracker {
    /// Take ownership of a freshly created run
    ///
    /// # Errors
    ///
    /// Returns an error if the run is already finalized.
    pub fn new(run: EtlRun) -> Result<Self> {
        if run.is_finalized() {
            return Err(EtlError::Run(format!(
                "run {} is already finalized",
                run.id
            )));
        }
        Ok(Self { run })
    }

    /// Borrow the tracked run
    pub fn run(&self) -> &EtlRun {
        &self.run
    }

    /// Current counter values
    pub fn counters(&self) -> RunCounters {
        self.run.counters
    }

    /// Record one classified record
    ///
    /// Increments `processed` and exactly one of `added`, `updated`,
    /// `unchanged`.
    ///
    /// # Errors
    ///
    /// Returns an error if the run is finalized.
    pub fn record(&mut self, outcome: Outcome) -> Result<()> {
        self.ensure_running()?;
        self.run.counters.processed += 1;
        match outcome {
            Outcome::Added => self.run.counters.added += 1,
            Outcome::Updated => self.run.counters.updated += 1,
            Outcome::Unchanged => self.run.counters.unchanged += 1,
        }
        Ok(())
    }

    /// Record a validation failure
    ///
    /// Does not by itself change the outcome counters.
    pub fn record_validation_failure(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.run.counters.validation_failures += 1;
        Ok(())
    }

    /// Record one processed image
    pub fn record_image_processed(&mut self) -> Result<()> {
        self.ensure_running()?;
        self.run.counters.images_processed += 1;
        Ok(())
    }

    /// Finalize the run as completed with the accumulated counters
    pub fn complete(&mut self) -> Result<&EtlRun> {
        self.ensure_running()?;
        self.run.status = RunStatus::Completed;
        self.run.completed_at = Some(Utc::now());
        Ok(&self.run)
    }

    /// Finalize the run as completed with externally reconciled counters
    ///
    /// Callers batching at a coarser granularity than one call per record
    /// may supply their own final counters; they must guarantee
    /// `processed == added + updated + unchanged` before calling this.
    pub fn complete_with(&mut self, counters: RunCounters) -> Result<&EtlRun> {
        self.ensure_running()?;
        self.run.counters = counters;
        self.run.status = RunStatus::Completed;
        self.run.completed_at = Some(Utc::now());
        Ok(&self.run)
    }

    /// Finalize the run as failed, preserving accumulated counters
    pub fn fail(&mut self, error_message: impl Into<String>) -> Result<&EtlRun> {
        self.ensure_running()?;
        self.run.status = RunStatus::Failed;
        self.run.completed_at = Some(Utc::now());
        self.run.error_message = Some(error_message.into());
        Ok(&self.run)
    }

    /// Consume the tracker and return the run
    pub fn into_run(self) -> EtlRun {
        self.run
    }

    fn ensure_running(&self) -> Result<()> {
        if self.run.is_finalized() {
            return Err(EtlError::Run(format!(
                "run {} is already finalized as {:?}",
                self.run.id, self.run.status
            )));
        }
        Ok(())
    }
}
