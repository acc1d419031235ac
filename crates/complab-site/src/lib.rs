//! CompositeLab Site — listing and detail pages over a material catalog.
//!
//! A [`Catalog`] owns one session's manifest resolver, record cache and
//! renderer. Pages are produced from it:
//!
//! - [`Catalog::load_listing`] fetches every record and groups cards by
//!   category
//! - [`Catalog::open_detail`] renders one record addressed by `?id=...`
//! - the action methods ([`Catalog::copy_code`], [`Catalog::export_record`],
//!   [`Catalog::export_all`], [`Catalog::print`], [`Catalog::edit_preview`],
//!   [`Catalog::add_new`]) operate on cached data through a [`Platform`]
//!
//! Every failure is turned into something the user can see: a placeholder,
//! a notice on the listing, or an inline [`ActionFeedback`].
//!
//! ```rust
//! # tokio_test::block_on(async {
//! use std::sync::Arc;
//! use complab_core::{MemorySource, SiteConfig};
//! use complab_site::Catalog;
//!
//! let source = MemorySource::new()
//!     .with_document(
//!         "materials/materials-index.json",
//!         r#"{"materials": {"fibers": [{"id": "T300", "file": "materials/fibers/t300.json"}]}}"#,
//!     )
//!     .with_document(
//!         "materials/fibers/t300.json",
//!         r#"{"id": "T300", "name": "T300 Carbon Fiber", "type": "Fiber"}"#,
//!     );
//! let catalog = Catalog::new(Arc::new(source), SiteConfig::default());
//!
//! let page = catalog.open_detail("?id=T300").await;
//! assert_eq!(page.title, "T300 Carbon Fiber - CompositeLab");
//! # });
//! ```

pub mod actions;
pub mod catalog;
pub mod detail;
pub mod listing;
pub mod state;

pub use actions::{ActionFeedback, FsPlatform, Platform};
pub use catalog::Catalog;
pub use detail::DetailPage;
pub use listing::{CategorySection, ListingPage};
pub use state::{DetailState, PageHandle};
