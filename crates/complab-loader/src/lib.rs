//! Catalog index resolution and record caching.
//!
//! - [`index`]: [`IndexResolver`] fetches and parses the catalog manifest
//!   once per session and locates records in it.
//! - [`cache`]: [`RecordCache`] fetches records on demand, deduplicates
//!   overlapping requests for the same identifier, and serves later reads
//!   (edit preview, export) without fetching again.
//!
//! Both are plain values owned by the page controller; there is no global
//! state.

pub mod cache;
pub mod index;

pub use cache::{FetchOutcome, RecordCache};
pub use index::{find_record_location, IndexResolver};
