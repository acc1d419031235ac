//! Catalog index resolution.
//!
//! The manifest is fetched and parsed at most once per [`IndexResolver`].
//! A failed load is remembered too: later calls report the same
//! `IndexUnavailable` error without fetching again.

use std::sync::Arc;

use complab_core::{CatalogManifest, Error, RecordSource, Result, SiteConfig};
use tokio::sync::OnceCell;

/// Look up where a record lives. The first category containing `id` wins.
pub fn find_record_location<'a>(manifest: &'a CatalogManifest, id: &str) -> Result<&'a str> {
    manifest
        .locate(id)
        .map(|entry| entry.file.as_str())
        .ok_or_else(|| Error::record_not_found(id))
}

/// Loads the catalog manifest once and answers location queries.
pub struct IndexResolver {
    source: Arc<dyn RecordSource>,
    config: SiteConfig,
    manifest: OnceCell<std::result::Result<Arc<CatalogManifest>, String>>,
}

impl IndexResolver {
    /// Create a resolver reading through `source`.
    pub fn new(source: Arc<dyn RecordSource>, config: SiteConfig) -> Self {
        Self {
            source,
            config,
            manifest: OnceCell::new(),
        }
    }

    /// Manifest location after the configured rewrite.
    pub fn index_location(&self) -> String {
        self.config.rewrite_location(&self.config.index_path)
    }

    /// Resolve the manifest, fetching it on first use.
    pub async fn resolve_index(&self) -> Result<Arc<CatalogManifest>> {
        let outcome = self
            .manifest
            .get_or_init(|| async {
                let location = self.index_location();
                log::debug!("Loading catalog index {location} from {}", self.source.describe());
                let loaded = match self.source.fetch(&location).await {
                    Ok(body) => CatalogManifest::from_json(&body).map_err(|e| e.to_string()),
                    Err(e) => Err(e.to_string()),
                };
                match loaded {
                    Ok(manifest) => {
                        for id in manifest.duplicate_ids() {
                            log::warn!("Catalog index lists '{id}' more than once; first entry wins");
                        }
                        log::info!("Catalog index loaded: {} materials", manifest.len());
                        Ok(Arc::new(manifest))
                    }
                    Err(reason) => {
                        log::error!("Error loading catalog index {location}: {reason}");
                        Err(reason)
                    }
                }
            })
            .await;

        outcome
            .clone()
            .map_err(|reason| Error::index_unavailable(self.index_location(), reason))
    }

    /// Resolve the manifest, treating an unavailable index as an empty
    /// catalog.
    pub async fn resolve_or_empty(&self) -> Arc<CatalogManifest> {
        match self.resolve_index().await {
            Ok(manifest) => manifest,
            Err(_) => Arc::new(CatalogManifest::empty()),
        }
    }

    /// Location to fetch for `id`, with the configured rewrite applied.
    pub fn record_location(&self, manifest: &CatalogManifest, id: &str) -> Result<String> {
        find_record_location(manifest, id).map(|file| self.config.rewrite_location(file))
    }

    /// Whether the manifest has been loaded (successfully or not).
    pub fn is_resolved(&self) -> bool {
        self.manifest.initialized()
    }

    /// Site configuration this resolver was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }
}

impl std::fmt::Debug for IndexResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexResolver")
            .field("source", &self.source.describe())
            .field("index", &self.index_location())
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
