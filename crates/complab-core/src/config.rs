//! Site configuration.
//!
//! ```toml
//! root = "site"
//! index_path = "materials/materials-index.json"
//! detail_page = "pages/material-detail.html"
//! site_name = "CompositeLab"
//! download_dir = "downloads"
//!
//! [location_rewrite]
//! from = "materials/"
//! to = "../materials/"
//! ```
//!
//! Every field has a default, so an empty file is a valid configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::paths::LocationRewrite;

/// Default manifest location relative to the site root.
pub const DEFAULT_INDEX_PATH: &str = "materials/materials-index.json";

/// Default detail page address used by listing cards.
pub const DEFAULT_DETAIL_PAGE: &str = "pages/material-detail.html";

/// Default site name, appended to detail document titles.
pub const DEFAULT_SITE_NAME: &str = "CompositeLab";

/// Configuration for one catalog site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base directory of the static site.
    pub root: PathBuf,
    /// Manifest location relative to `root`.
    pub index_path: String,
    /// Detail page address, relative to the listing page.
    pub detail_page: String,
    /// Suffix of detail document titles.
    pub site_name: String,
    /// Where exported files are written. `None` disables file saving.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
    /// Rewrite applied to manifest locations before fetching.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_rewrite: Option<LocationRewrite>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
            download_dir: None,
            location_rewrite: None,
        }
    }
}

impl SiteConfig {
    /// Configuration for a site rooted at `root`, all else default.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Set the location rewrite.
    pub fn with_location_rewrite(mut self, rewrite: LocationRewrite) -> Self {
        self.location_rewrite = Some(rewrite);
        self
    }

    /// Set the download directory.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = Some(dir.into());
        self
    }

    /// Parse a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| Error::config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file. Relative `root` and `download_dir` values are
    /// resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        let mut config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{}: {e}", path.display())))?;

        if let Some(base) = path.parent() {
            if config.root.is_relative() {
                config.root = base.join(&config.root);
            }
            if let Some(dir) = config.download_dir.as_mut() {
                if dir.is_relative() {
                    *dir = base.join(&*dir);
                }
            }
        }
        log::debug!("Loaded site config from {}", path.display());
        Ok(config)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Apply the configured rewrite to a manifest location.
    pub fn rewrite_location(&self, location: &str) -> String {
        match &self.location_rewrite {
            Some(rewrite) => rewrite.apply(location),
            None => location.to_string(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.index_path.trim().is_empty() {
            return Err(Error::config("index_path must not be empty"));
        }
        if self.detail_page.trim().is_empty() {
            return Err(Error::config("detail_page must not be empty"));
        }
        Ok(())
    }
}
