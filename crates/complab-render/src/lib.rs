//! CompositeLab Render — material records as escaped view fragments.
//!
//! Rendering is pure: no I/O, no shared state. The page controller decides
//! which record to render and where the fragment lands.
//!
//! # Modules
//!
//! - [`view`]: Escaping element/fragment builder
//! - [`markup`]: Paragraph and emphasis handling for long-form text
//! - [`render`]: Listing cards, detail documents, and placeholders
//!
//! ```
//! use complab_core::MaterialRecord;
//! use complab_render::render_card;
//!
//! let record = MaterialRecord::from_json(
//!     r#"{"id":"T300","name":"T300","type":"Fiber",
//!         "mechanical":{"e":{"label":"Tensile Modulus","value":230,"unit":"GPa"}}}"#,
//! ).unwrap();
//! assert!(render_card(&record).to_html().contains("230 GPa"));
//! ```

pub mod markup;
pub mod render;
pub mod view;

pub use render::{Placeholder, Renderer, render_card, render_detail};
pub use view::{Element, Fragment, Node, escape_html};
