//! ETL run model
//!
//! One [`EtlRun`] represents a single execution of the batch engine, with
//! aggregate counters and a terminal status. Runs are created by the store,
//! mutated only through the owning [`RunTracker`](crate::core::tracker::RunTracker),
//! and immutable once finalized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Kind of ETL run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunKind {
    /// Reprocess every supplied record
    Full,
    /// Process only what the caller considers new or changed
    Incremental,
}

impl RunKind {
    /// Returns the kind as a string slice
    pub fn as_str(&self) -> &str {
        match self {
            RunKind::Full => "full",
            RunKind::Incremental => "incremental",
        }
    }
}

/// Run lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// The run is in progress
    Running,
    /// The run finished and its counters are final
    Completed,
    /// The run was aborted; counters reflect work done before the failure
    Failed,
}

/// Aggregate counters for one run
///
/// `processed == added + updated + unchanged` is expected to hold whenever
/// counters are supplied from outside the tracker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunCounters {
    pub processed: u64,
    pub added: u64,
    pub updated: u64,
    pub unchanged: u64,
    pub images_processed: u64,
    pub validation_failures: u64,
}

/// One execution of the batch engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtlRun {
    pub id: Uuid,
    pub kind: RunKind,
    pub status: RunStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub counters: RunCounters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl EtlRun {
    /// Create a new run in the `Running` state with zero counters
    pub fn new(kind: RunKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            status: RunStatus::Running,
            started_at: Utc::now(),
            completed_at: None,
            counters: RunCounters::default(),
            error_message: None,
            metadata: BTreeMap::new(),
        }
    }

    /// Check if the run has reached a terminal state
    pub fn is_finalized(&self) -> bool {
        self.status != RunStatus::Running
    }

    /// Duration of the run if it has completed
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.completed_at.map(|done| done - self.started_at)
    }
}
