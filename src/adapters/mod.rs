//! External-world adapters
//!
//! Everything that talks to files, HTTP endpoints, or storage backends
//! lives here, behind traits and parse functions the core never has to
//! look past.

pub mod fetch;
pub mod source;
pub mod store;
