//! Record sources: where manifest and record documents are fetched from.
//!
//! The viewer only ever performs static-file fetches. [`FsSource`] reads
//! from a site directory, [`MemorySource`] serves documents from memory and
//! counts fetches, and `HttpSource` (feature `http`) fetches from a base URL.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::util::paths::resolve_location;

/// Fetches a document by manifest location.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the raw text of the document at `location`.
    async fn fetch(&self, location: &str) -> Result<String>;

    /// Short description for log messages.
    fn describe(&self) -> String {
        "record source".to_string()
    }
}

// ============================================================================
// FsSource
// ============================================================================

/// Reads documents from a static-site directory.
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Site root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl RecordSource for FsSource {
    async fn fetch(&self, location: &str) -> Result<String> {
        let path = resolve_location(&self.root, location);
        log::debug!("Reading {}", path.display());
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| Error::io_with_path(e, &path))
    }

    fn describe(&self) -> String {
        format!("directory {}", self.root.display())
    }
}

// ============================================================================
// MemorySource
// ============================================================================

/// In-memory documents with per-location fetch counters.
///
/// Locations registered with [`MemorySource::fail`] return an I/O error.
#[derive(Debug, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
    failures: HashMap<String, String>,
    delays: HashMap<String, std::time::Duration>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with_document(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.documents.insert(location.into(), body.into());
        self
    }

    /// Make fetches of `location` fail with `reason`.
    pub fn fail(mut self, location: impl Into<String>, reason: impl Into<String>) -> Self {
        self.failures.insert(location.into(), reason.into());
        self
    }

    /// Delay fetches of `location`, to exercise overlapping requests.
    pub fn with_delay(mut self, location: impl Into<String>, delay: std::time::Duration) -> Self {
        self.delays.insert(location.into(), delay);
        self
    }

    /// Number of fetches issued for `location`.
    pub fn fetch_count(&self, location: &str) -> usize {
        self.fetches
            .lock()
            .map(|counts| counts.get(location).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    /// Number of fetches issued across all locations.
    pub fn total_fetches(&self) -> usize {
        self.fetches
            .lock()
            .map(|counts| counts.values().sum())
            .unwrap_or(0)
    }
}

#[async_trait]
impl RecordSource for MemorySource {
    async fn fetch(&self, location: &str) -> Result<String> {
        if let Ok(mut counts) = self.fetches.lock() {
            *counts.entry(location.to_string()).or_insert(0) += 1;
        }

        if let Some(delay) = self.delays.get(location) {
            tokio::time::sleep(*delay).await;
        }

        if let Some(reason) = self.failures.get(location) {
            return Err(Error::io_with_path(
                std::io::Error::other(reason.clone()),
                Path::new(location),
            ));
        }

        self.documents.get(location).cloned().ok_or_else(|| {
            Error::io_with_path(
                std::io::Error::new(std::io::ErrorKind::NotFound, "no such document"),
                Path::new(location),
            )
        })
    }

    fn describe(&self) -> String {
        format!("memory ({} documents)", self.documents.len())
    }
}

// ============================================================================
// HttpSource
// ============================================================================

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use std::path::Path;

    use async_trait::async_trait;

    use super::RecordSource;
    use crate::error::{Error, Result};
    use crate::util::paths::join_url;

    /// Fetches documents over HTTP relative to a base URL.
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        base_url: String,
        client: reqwest::Client,
    }

    impl HttpSource {
        /// Create a source for the site at `base_url`.
        pub fn new(base_url: impl Into<String>) -> Self {
            Self {
                base_url: base_url.into(),
                client: reqwest::Client::new(),
            }
        }
    }

    #[async_trait]
    impl RecordSource for HttpSource {
        async fn fetch(&self, location: &str) -> Result<String> {
            let url = join_url(&self.base_url, location);
            log::debug!("GET {url}");
            let response = self
                .client
                .get(&url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| Error::io_with_path(std::io::Error::other(e), Path::new(&url)))?;
            response
                .text()
                .await
                .map_err(|e| Error::io_with_path(std::io::Error::other(e), Path::new(&url)))
        }

        fn describe(&self) -> String {
            format!("http {}", self.base_url)
        }
    }
}
