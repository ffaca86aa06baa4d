//! Field-level change audit entries
//!
//! A [`FieldChange`] records one field's old/new value for one profile in
//! one run. Entries are append-only; the engine never mutates or deletes
//! them after they are written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One audited field change, attributed to a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChange {
    /// Store-assigned profile row id the change belongs to
    pub profile_id: Uuid,
    /// Run during which the change was observed
    pub run_id: Uuid,
    /// Top-level field name (e.g. `skills`, `headline`)
    pub field_name: String,
    /// Stringified previous value, absent when there was none
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// Stringified new value, absent when the field was cleared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    pub changed_at: DateTime<Utc>,
}
