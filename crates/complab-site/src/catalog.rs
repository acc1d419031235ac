//! The per-session catalog: manifest resolver, record cache, and renderer.

use std::sync::Arc;

use complab_core::{FsSource, RecordSource, SiteConfig};
use complab_loader::{IndexResolver, RecordCache};
use complab_render::Renderer;

/// Everything a page needs to load and render material data.
///
/// One `Catalog` lives for one browsing session. Listing and detail pages
/// opened from the same catalog share its manifest and record cache, but
/// neither waits on the other.
pub struct Catalog {
    config: SiteConfig,
    index: IndexResolver,
    cache: RecordCache,
    renderer: Renderer,
}

impl Catalog {
    /// Build a catalog reading through `source`.
    pub fn new(source: Arc<dyn RecordSource>, config: SiteConfig) -> Self {
        log::debug!("Opening catalog via {}", source.describe());
        Self {
            index: IndexResolver::new(source.clone(), config.clone()),
            cache: RecordCache::new(source),
            renderer: Renderer::from_config(&config),
            config,
        }
    }

    /// Build a catalog reading from the configured site root on disk.
    pub fn from_config(config: SiteConfig) -> Self {
        let source = Arc::new(FsSource::new(config.root.clone()));
        Self::new(source, config)
    }

    /// Site configuration.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Manifest resolver.
    pub fn index(&self) -> &IndexResolver {
        &self.index
    }

    /// Session record cache.
    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    /// Renderer configured for this site.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}

impl std::fmt::Debug for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalog")
            .field("index", &self.index)
            .field("cache", &self.cache)
            .finish()
    }
}
