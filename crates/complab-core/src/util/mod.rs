//! Utility modules for identifier and location handling.
//!
//! # Modules
//!
//! - [`ids`]: Tag normalization and query-string encoding of identifiers
//! - [`paths`]: Manifest location rewriting and joining

pub mod ids;
pub mod paths;
