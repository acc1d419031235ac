//! CompositeLab Core — shared types, record sources, errors, and configuration.
//!
//! This crate provides the foundational types used across all CompositeLab
//! crates. It has no internal CompositeLab dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`category`]: The closed set of material categories
//! - [`manifest`]: Catalog manifest model
//! - [`record`]: Material record and property group model
//! - [`source`]: Record sources (filesystem, memory, HTTP)
//! - [`config`]: Site configuration
//! - [`util`]: Identifier and location utilities

#![doc = include_str!("../README.md")]

pub mod category;
pub mod config;
pub mod error;
pub mod manifest;
pub mod record;
pub mod source;
pub mod util;

mod proptests;

// Re-export key types at crate root for convenience
pub use category::Category;
pub use config::SiteConfig;
pub use error::{Capability, Error, Result};
pub use manifest::{CatalogManifest, ManifestEntry};
pub use record::{CodeBlock, MaterialRecord, Property, PropertyGroup};
pub use source::{FsSource, MemorySource, RecordSource};

#[cfg(feature = "http")]
pub use source::HttpSource;
