//! Catalog manifest: category name → ordered `{id, file}` entries.
//!
//! Two on-disk layouts are accepted:
//!
//! ```json
//! { "materials": { "fibers": [{ "id": "T300", "file": "materials/fibers/t300.json" }], "matrices": [] } }
//! ```
//!
//! and the same object without the `materials` wrapper. Categories iterate
//! in lexical order of their names; entries keep their order within a
//! category.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// One manifest entry: a record identifier and where to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Record identifier, unique across the manifest.
    pub id: String,
    /// Record location relative to the site root.
    pub file: String,
}

impl ManifestEntry {
    /// Create an entry.
    pub fn new(id: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file: file.into(),
        }
    }
}

/// Parsed catalog manifest. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogManifest {
    categories: BTreeMap<String, Vec<ManifestEntry>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestFile {
    Wrapped {
        materials: BTreeMap<String, Vec<ManifestEntry>>,
    },
    Bare(BTreeMap<String, Vec<ManifestEntry>>),
}

impl<'de> Deserialize<'de> for CatalogManifest {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let categories = match ManifestFile::deserialize(deserializer)? {
            ManifestFile::Wrapped { materials } => materials,
            ManifestFile::Bare(categories) => categories,
        };
        Ok(Self { categories })
    }
}

impl CatalogManifest {
    /// Build a manifest from category name → entries pairs.
    pub fn from_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<ManifestEntry>)>,
        S: Into<String>,
    {
        Self {
            categories: categories
                .into_iter()
                .map(|(name, entries)| (name.into(), entries))
                .collect(),
        }
    }

    /// Parse a manifest document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// An empty catalog, used when the manifest is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Categories with their entries, in iteration order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &[ManifestEntry])> {
        self.categories
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Entries of the category matching `category`, if the manifest has one.
    pub fn entries_for(&self, category: Category) -> &[ManifestEntry] {
        self.categories
            .iter()
            .find(|(name, _)| category.matches(name))
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or(&[])
    }

    /// All entries across every category, in iteration order.
    pub fn entries(&self) -> impl Iterator<Item = &ManifestEntry> {
        self.categories.values().flatten()
    }

    /// Locate a record; the first category containing `id` wins.
    pub fn locate(&self, id: &str) -> Option<&ManifestEntry> {
        self.entries().find(|entry| entry.id == id)
    }

    /// Number of entries across all categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Whether the manifest lists no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Identifiers that appear more than once, in iteration order.
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for entry in self.entries() {
            if !seen.insert(entry.id.as_str()) && !duplicates.contains(&entry.id.as_str()) {
                duplicates.push(entry.id.as_str());
            }
        }
        duplicates
    }
}
