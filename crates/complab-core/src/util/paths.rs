//! Manifest location handling.
//!
//! Manifest `file` values are relative to the site root
//! (`materials/fibers/t300.json`). Pages served from a deeper directory
//! rewrite the leading prefix (`materials/` → `../materials/`) before
//! fetching.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Prefix rewrite applied to manifest locations.
///
/// Only the first occurrence of `from` is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRewrite {
    /// Text to look for.
    pub from: String,
    /// Replacement text.
    pub to: String,
}

impl LocationRewrite {
    /// Create a rewrite rule.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Apply the rewrite to a location.
    ///
    /// ```
    /// use complab_core::util::paths::LocationRewrite;
    ///
    /// let rw = LocationRewrite::new("materials/", "../materials/");
    /// assert_eq!(rw.apply("materials/fibers/t300.json"), "../materials/fibers/t300.json");
    /// assert_eq!(rw.apply("other/x.json"), "other/x.json");
    /// ```
    pub fn apply(&self, location: &str) -> String {
        if self.from.is_empty() {
            return location.to_string();
        }
        location.replacen(&self.from, &self.to, 1)
    }
}

/// Resolve a manifest location against a root directory.
///
/// Leading `/` is ignored so locations stay under `root`; `.` components are
/// dropped and `..` components are applied lexically.
///
/// ```
/// use std::path::Path;
/// use complab_core::util::paths::resolve_location;
///
/// let root = Path::new("/site/pages");
/// assert_eq!(
///     resolve_location(root, "../materials/t300.json"),
///     Path::new("/site/materials/t300.json")
/// );
/// ```
pub fn resolve_location(root: &Path, location: &str) -> PathBuf {
    let mut resolved = root.to_path_buf();
    for component in Path::new(location.trim_start_matches('/')).components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::ParentDir => {
                resolved.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    resolved
}

/// Join a manifest location onto a base URL.
///
/// ```
/// use complab_core::util::paths::join_url;
///
/// assert_eq!(
///     join_url("https://example.org/site/", "materials/t300.json"),
///     "https://example.org/site/materials/t300.json"
/// );
/// assert_eq!(
///     join_url("https://example.org/site", "/materials/t300.json"),
///     "https://example.org/site/materials/t300.json"
/// );
/// ```
pub fn join_url(base: &str, location: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        location.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewrite_first_occurrence_only() {
        let rw = LocationRewrite::new("materials/", "../materials/");
        assert_eq!(
            rw.apply("materials/materials/x.json"),
            "../materials/materials/x.json"
        );
    }

    #[test]
    fn test_rewrite_empty_from_is_identity() {
        let rw = LocationRewrite::new("", "../");
        assert_eq!(rw.apply("materials/x.json"), "materials/x.json");
    }

    #[test]
    fn test_resolve_location_simple() {
        let root = Path::new("/site");
        assert_eq!(
            resolve_location(root, "materials/fibers/t300.json"),
            Path::new("/site/materials/fibers/t300.json")
        );
    }

    #[test]
    fn test_resolve_location_absolute_stays_under_root() {
        let root = Path::new("/site");
        assert_eq!(
            resolve_location(root, "/materials/x.json"),
            Path::new("/site/materials/x.json")
        );
    }

    #[test]
    fn test_resolve_location_current_dir() {
        let root = Path::new("/site");
        assert_eq!(
            resolve_location(root, "./materials/./x.json"),
            Path::new("/site/materials/x.json")
        );
    }
}
