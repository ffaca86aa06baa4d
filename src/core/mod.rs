//! Business logic: hashing, validation, classification, run tracking, and
//! the batch engine
//!
//! Everything in this module is deterministic decision logic; persistence
//! and input parsing live behind the adapter seams in
//! [`adapters`](crate::adapters).

pub mod classify;
pub mod engine;
pub mod hash;
pub mod tracker;
pub mod validate;

pub use classify::{classify, Classification, FieldDiff, Outcome};
pub use engine::{Engine, RecordOutcome, RunSummary};
pub use hash::{image_fingerprint, profile_fingerprint};
pub use tracker::RunTracker;
pub use validate::{validate_profile, validation_status, Severity, ValidationIssue};
