//! Domain models and types for Prospect.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`LinkedInId`])
//! - **Profile models** ([`RawProfile`], [`StoredProfile`])
//! - **Run and audit models** ([`EtlRun`], [`FieldChange`])
//! - **Error types** ([`EtlError`], [`StoreError`], [`FetchError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EtlError>`]:
//!
//! ```rust
//! use prospect::domain::{EtlError, Result};
//!
//! fn example() -> Result<()> {
//!     let config = prospect::config::load_config("prospect.toml")?;
//!     Ok(())
//! }
//! ```

pub mod change;
pub mod errors;
pub mod ids;
pub mod profile;
pub mod result;
pub mod run;

// Re-export commonly used types for convenience
pub use change::FieldChange;
pub use errors::{EtlError, FetchError, StoreError};
pub use ids::LinkedInId;
pub use profile::{EducationEntry, ExperienceEntry, RawProfile, StoredProfile, ValidationStatus};
pub use result::Result;
pub use run::{EtlRun, RunCounters, RunKind, RunStatus};
