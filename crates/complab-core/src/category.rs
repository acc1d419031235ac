//! Material categories.
//!
//! Records carry a free-text category tag (`"Fiber"`, `"matrix"`, ...) and
//! the manifest groups entries under plural category names (`fibers`,
//! `matrices`). Both are parsed case-insensitively into [`Category`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::util::ids::normalize_tag;

/// Closed set of material categories shown in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Reinforcing fibers (carbon, glass, aramid).
    Fiber,
    /// Resin matrices.
    Matrix,
}

impl Category {
    /// All categories, in listing order.
    pub const ALL: [Category; 2] = [Category::Fiber, Category::Matrix];

    /// Singular lowercase tag, as used in record `type` fields.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Fiber => "fiber",
            Self::Matrix => "matrix",
        }
    }

    /// Plural name used as the manifest key and listing container id.
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Fiber => "fibers",
            Self::Matrix => "matrices",
        }
    }

    /// Human-readable heading for the listing section.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Fiber => "Fiber Materials",
            Self::Matrix => "Matrix Materials",
        }
    }

    /// Parse a record tag or manifest key, ignoring case and surrounding
    /// whitespace. Accepts both singular and plural forms.
    pub fn parse(s: &str) -> Option<Self> {
        match normalize_tag(s).as_str() {
            "fiber" | "fibers" => Some(Self::Fiber),
            "matrix" | "matrices" => Some(Self::Matrix),
            _ => None,
        }
    }

    /// Case-insensitive comparison against a free-text tag.
    pub fn matches(&self, tag: &str) -> bool {
        Self::parse(tag) == Some(*self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown material category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(Category::parse("Fiber"), Some(Category::Fiber));
        assert_eq!(Category::parse("FIBER"), Some(Category::Fiber));
        assert_eq!(Category::parse("  matrix "), Some(Category::Matrix));
    }

    #[test]
    fn test_parse_plural_manifest_keys() {
        assert_eq!(Category::parse("fibers"), Some(Category::Fiber));
        assert_eq!(Category::parse("Matrices"), Some(Category::Matrix));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Category::parse("prepreg"), None);
        assert_eq!(Category::parse(""), None);
        let err = "core".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown material category: core");
    }

    #[test]
    fn test_matches() {
        assert!(Category::Fiber.matches("fIbEr"));
        assert!(!Category::Fiber.matches("matrix"));
    }

    #[test]
    fn test_display_and_names() {
        assert_eq!(Category::Matrix.to_string(), "matrix");
        assert_eq!(Category::Matrix.plural(), "matrices");
        assert_eq!(Category::Fiber.heading(), "Fiber Materials");
    }
}
