//! Detail page lifecycle.
//!
//! A detail page moves forward through a fixed set of states and ends in
//! exactly one terminal rendering state:
//!
//! ```text
//! Init ─┬─> MissingIdentifier
//!       └─> ResolvingManifest ─┬─> RecordNotFound
//!                              ├─> FetchFailed
//!                              └─> Populated
//! ```
//!
//! [`PageHandle`] broadcasts each transition over a watch channel so a host
//! can observe progress while the page loads.
//!
//! ```rust
//! use complab_site::state::{DetailState, PageHandle};
//!
//! let handle = PageHandle::new("detail");
//! assert_eq!(handle.state(), DetailState::Init);
//!
//! handle.advance(DetailState::ResolvingManifest).unwrap();
//! handle.advance(DetailState::Populated { id: "T300".into() }).unwrap();
//! assert!(handle.state().is_terminal());
//! assert!(handle.advance(DetailState::Init).is_err());
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

// ============================================================================
// DetailState
// ============================================================================

/// State of a detail page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DetailState {
    /// Nothing has happened yet.
    Init,
    /// Waiting for the catalog manifest.
    ResolvingManifest,
    /// The page was opened without an identifier; nothing is fetched.
    MissingIdentifier,
    /// The identifier is not in the manifest, or the manifest is unavailable.
    RecordNotFound {
        /// Requested identifier
        id: String,
    },
    /// The record is listed but could not be fetched or parsed.
    FetchFailed {
        /// Requested identifier
        id: String,
        /// Why the fetch failed
        reason: String,
    },
    /// The record was rendered.
    Populated {
        /// Rendered identifier
        id: String,
    },
}

impl DetailState {
    /// Returns `true` for the rendering states a page ends in.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Init | Self::ResolvingManifest)
    }

    /// Returns `true` if a record was rendered.
    pub fn is_populated(&self) -> bool {
        matches!(self, Self::Populated { .. })
    }

    /// Whether moving from `self` to `next` is allowed.
    pub fn can_advance_to(&self, next: &DetailState) -> bool {
        match self {
            Self::Init => matches!(next, Self::ResolvingManifest | Self::MissingIdentifier),
            Self::ResolvingManifest => matches!(
                next,
                Self::RecordNotFound { .. } | Self::FetchFailed { .. } | Self::Populated { .. }
            ),
            _ => false,
        }
    }
}

impl fmt::Display for DetailState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => write!(f, "init"),
            Self::ResolvingManifest => write!(f, "resolving manifest"),
            Self::MissingIdentifier => write!(f, "missing identifier"),
            Self::RecordNotFound { id } => write!(f, "not found: {id}"),
            Self::FetchFailed { id, reason } => write!(f, "fetch failed: {id}: {reason}"),
            Self::Populated { id } => write!(f, "populated: {id}"),
        }
    }
}

/// A transition the lifecycle does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Page '{page}' cannot move from {from} to {to}")]
pub struct InvalidTransition {
    /// Page name
    pub page: String,
    /// State the page was in
    pub from: DetailState,
    /// Rejected target state
    pub to: DetailState,
}

// ============================================================================
// PageHandle
// ============================================================================

/// Shared handle for observing and advancing a page's state.
///
/// Clones share the same state.
#[derive(Clone)]
pub struct PageHandle {
    inner: Arc<PageHandleInner>,
}

struct PageHandleInner {
    name: String,
    tx: watch::Sender<DetailState>,
}

impl PageHandle {
    /// Create a handle in [`DetailState::Init`].
    pub fn new(name: impl Into<String>) -> Self {
        let (tx, _rx) = watch::channel(DetailState::Init);
        Self {
            inner: Arc::new(PageHandleInner {
                name: name.into(),
                tx,
            }),
        }
    }

    /// Page name used in log lines.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Current state.
    pub fn state(&self) -> DetailState {
        self.inner.tx.borrow().clone()
    }

    /// Move to `next`, notifying subscribers. Backward and out-of-order
    /// transitions are rejected and leave the state unchanged.
    pub fn advance(&self, next: DetailState) -> Result<(), InvalidTransition> {
        let mut rejected = None;
        self.inner.tx.send_if_modified(|current| {
            if current.can_advance_to(&next) {
                *current = next.clone();
                true
            } else {
                rejected = Some(current.clone());
                false
            }
        });

        match rejected {
            None => {
                log::info!("Page '{}' → {next}", self.inner.name);
                Ok(())
            }
            Some(from) => Err(InvalidTransition {
                page: self.inner.name.clone(),
                from,
                to: next,
            }),
        }
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.inner.tx.subscribe()
    }

    /// Wait until the page reaches a terminal state, or `timeout` elapses.
    pub async fn wait_settled(&self, timeout: Duration) -> Result<DetailState, String> {
        let mut rx = self.subscribe();
        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);

        {
            let state = rx.borrow_and_update().clone();
            if state.is_terminal() {
                return Ok(state);
            }
        }

        loop {
            tokio::select! {
                _ = &mut deadline => {
                    return Err(format!(
                        "Page '{}' not settled after {timeout:?} (state: {})",
                        self.inner.name, self.state()
                    ));
                }
                result = rx.changed() => {
                    if result.is_err() {
                        return Err(format!("Page '{}' channel closed", self.inner.name));
                    }
                    let state = rx.borrow().clone();
                    if state.is_terminal() {
                        return Ok(state);
                    }
                }
            }
        }
    }
}

impl fmt::Debug for PageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageHandle")
            .field("name", &self.inner.name)
            .field("state", &self.state())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
