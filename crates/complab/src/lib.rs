//! CompositeLab — umbrella crate.
//!
//! This crate re-exports all CompositeLab components for convenience.

#![doc = include_str!("../README.md")]

pub use complab_core as core;
pub use complab_loader as loader;
pub use complab_render as render;
pub use complab_site as site;

pub use complab_core::{Error, MaterialRecord, Result, SiteConfig};
pub use complab_site::{Catalog, DetailPage, ListingPage};
