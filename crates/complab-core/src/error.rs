//! Error types for CompositeLab.
//!
//! Four kinds of failure reach the user: the catalog manifest could not be
//! loaded, an identifier is not in the manifest, a record could not be
//! loaded, or a platform capability (clipboard, file save, print) is not
//! available. The remaining variants are ambient failures that are folded
//! into one of those four at the page boundary.

use std::path::{Path, PathBuf};

/// Errors that can occur while loading, caching, or acting on material data.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The catalog manifest could not be fetched or parsed.
    #[error("Catalog index unavailable at {location}: {reason}")]
    IndexUnavailable {
        /// Manifest location that was requested
        location: String,
        /// What went wrong
        reason: String,
    },

    /// The identifier is not listed in the catalog manifest.
    #[error("Material not found: {id}")]
    RecordNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// The record is listed but could not be fetched or parsed.
    #[error("Material {id} unavailable: {reason}")]
    RecordUnavailable {
        /// Identifier of the record
        id: String,
        /// What went wrong
        reason: String,
    },

    /// A platform capability is missing or was denied.
    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        /// Capability name (clipboard, file save, print)
        capability: Capability,
        /// Why the platform refused
        reason: String,
    },

    /// I/O error with the path that caused it.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// What configuration is problematic
        message: String,
    },
}

/// Platform capabilities that user actions depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Writing text to the clipboard.
    Clipboard,
    /// Saving a file to the user's machine.
    FileSave,
    /// Printing the current document.
    Print,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clipboard => write!(f, "clipboard"),
            Self::FileSave => write!(f, "file save"),
            Self::Print => write!(f, "print"),
        }
    }
}

/// Convenience `Result` type alias for CompositeLab operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates an index-unavailable error.
    pub fn index_unavailable<L, R>(location: L, reason: R) -> Self
    where
        L: Into<String>,
        R: std::fmt::Display,
    {
        Error::IndexUnavailable {
            location: location.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a record-not-found error.
    pub fn record_not_found<S: Into<String>>(id: S) -> Self {
        Error::RecordNotFound { id: id.into() }
    }

    /// Creates a record-unavailable error.
    pub fn record_unavailable<S, R>(id: S, reason: R) -> Self
    where
        S: Into<String>,
        R: std::fmt::Display,
    {
        Error::RecordUnavailable {
            id: id.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a capability-unavailable error.
    pub fn capability<R: std::fmt::Display>(capability: Capability, reason: R) -> Self {
        Error::CapabilityUnavailable {
            capability,
            reason: reason.to_string(),
        }
    }

    /// Creates an I/O error carrying the offending path.
    pub fn io_with_path(source: std::io::Error, path: &Path) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates a configuration error.
    pub fn config<S: Into<String>>(message: S) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Returns whether the error belongs to the user-facing taxonomy.
    ///
    /// Ambient errors (I/O, JSON, config) are not shown verbatim; callers
    /// fold them into one of the user-facing kinds first.
    pub fn is_user_visible(&self) -> bool {
        matches!(
            self,
            Error::IndexUnavailable { .. }
                | Error::RecordNotFound { .. }
                | Error::RecordUnavailable { .. }
                | Error::CapabilityUnavailable { .. }
        )
    }

    /// Short message suitable for an inline notice on the page.
    pub fn user_message(&self) -> String {
        match self {
            Error::IndexUnavailable { .. } => "The material catalog could not be loaded.".into(),
            Error::RecordNotFound { id } => format!("Material '{id}' is not in the catalog."),
            Error::RecordUnavailable { id, .. } => format!("Material '{id}' could not be loaded."),
            Error::CapabilityUnavailable { capability, .. } => match capability {
                Capability::Clipboard => "Failed to copy to clipboard.".into(),
                Capability::FileSave => "Failed to save the file.".into(),
                Capability::Print => "Printing is not available.".into(),
            },
            Error::Io { .. } | Error::Json(_) | Error::Config { .. } => {
                "Something went wrong while loading material data.".into()
            }
        }
    }
}
