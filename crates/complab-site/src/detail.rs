//! Detail page: one record, addressed by the `id` query parameter.

use std::sync::Arc;

use complab_core::MaterialRecord;
use complab_core::util::ids::query_param;
use complab_render::{Fragment, Placeholder};

use crate::catalog::Catalog;
use crate::state::{DetailState, PageHandle};

/// Query parameter carrying the record identifier.
pub const ID_PARAM: &str = "id";

/// A settled detail page.
#[derive(Debug, Clone)]
pub struct DetailPage {
    /// Terminal state the page ended in
    pub state: DetailState,
    /// Document title
    pub title: String,
    /// Document body: the record view or a placeholder
    pub body: Fragment,
    /// The rendered record, when populated
    pub record: Option<Arc<MaterialRecord>>,
}

impl DetailPage {
    /// Whether a record was rendered.
    pub fn is_populated(&self) -> bool {
        self.state.is_populated()
    }
}

impl Catalog {
    /// Open the detail page for the page's query string (`?id=...`).
    pub async fn open_detail(&self, query: &str) -> DetailPage {
        self.open_detail_with(query, &PageHandle::new("detail")).await
    }

    /// Open the detail page, reporting progress through `handle`.
    ///
    /// Without an identifier nothing is fetched. An identifier missing from
    /// the manifest (or an unavailable manifest) gives the "not found"
    /// placeholder; a listed record that fails to load gives the
    /// "unavailable" placeholder.
    pub async fn open_detail_with(&self, query: &str, handle: &PageHandle) -> DetailPage {
        let Some(id) = query_param(query, ID_PARAM) else {
            log::debug!("Detail page opened without an identifier");
            advance(handle, DetailState::MissingIdentifier);
            return self.placeholder(DetailState::MissingIdentifier, Placeholder::NoIdentifier);
        };

        advance(handle, DetailState::ResolvingManifest);

        let location = match self.index().resolve_index().await {
            Ok(manifest) => self.index().record_location(&manifest, &id),
            Err(e) => Err(e),
        };
        let location = match location {
            Ok(location) => location,
            Err(e) => {
                log::warn!("Cannot open {id}: {e}");
                let state = DetailState::RecordNotFound { id: id.clone() };
                advance(handle, state.clone());
                return self.placeholder(state, Placeholder::NotFound { id });
            }
        };

        match self.cache().get_or_fetch(&id, &location).await {
            Ok(record) => {
                let state = DetailState::Populated { id };
                advance(handle, state.clone());
                DetailPage {
                    state,
                    title: self.renderer().detail_title(&record),
                    body: self.renderer().render_detail(&record),
                    record: Some(record),
                }
            }
            Err(e) => {
                let state = DetailState::FetchFailed {
                    id: id.clone(),
                    reason: e.to_string(),
                };
                advance(handle, state.clone());
                self.placeholder(state, Placeholder::Unavailable { id })
            }
        }
    }

    fn placeholder(&self, state: DetailState, placeholder: Placeholder) -> DetailPage {
        DetailPage {
            state,
            title: self.renderer().placeholder_title(&placeholder),
            body: self.renderer().render_placeholder(&placeholder),
            record: None,
        }
    }
}

fn advance(handle: &PageHandle, next: DetailState) {
    if let Err(e) = handle.advance(next) {
        log::warn!("{e}; the handle keeps its earlier outcome");
    }
}
