//! Listing page: every catalog record as a card, grouped by category.

use std::collections::HashSet;

use complab_core::Category;
use complab_render::{Fragment, Renderer};

use crate::catalog::Catalog;

/// Cards for one category, in manifest order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySection {
    /// Category this section lists
    pub category: Category,
    /// Identifiers of the rendered cards, in order
    pub ids: Vec<String>,
    /// Rendered cards, parallel to `ids`
    pub cards: Vec<Fragment>,
    /// "Add new" affordance appended after the last card
    pub add_new: Option<Fragment>,
}

impl CategorySection {
    fn new(category: Category) -> Self {
        Self {
            category,
            ids: Vec::new(),
            cards: Vec::new(),
            add_new: None,
        }
    }

    /// Render the section container.
    pub fn render(&self, renderer: &Renderer) -> Fragment {
        renderer.render_category_section(
            self.category,
            self.cards.iter().cloned().chain(self.add_new.clone()),
        )
    }
}

/// A fully loaded listing page.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingPage {
    /// One section per category
    pub sections: Vec<CategorySection>,
    /// User-visible messages for records (or the catalog) that failed to load
    pub notices: Vec<String>,
}

impl ListingPage {
    /// Section for `category`.
    pub fn section(&self, category: Category) -> Option<&CategorySection> {
        self.sections.iter().find(|s| s.category == category)
    }

    /// Total number of cards.
    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }

    /// Render the whole page body: notices first, then the sections.
    pub fn render(&self, renderer: &Renderer) -> Fragment {
        let mut frag = Fragment::new();
        for notice in &self.notices {
            frag.extend(renderer.render_notice(notice).nodes().iter().cloned());
        }
        for section in &self.sections {
            frag.extend(section.render(renderer).nodes().iter().cloned());
        }
        frag
    }
}

impl Catalog {
    /// Load every record in the manifest and lay out the listing page.
    ///
    /// All fetches run concurrently and the page is produced only after each
    /// has succeeded or failed. Card order follows the manifest, not fetch
    /// completion. A failed record becomes a notice; the other cards are
    /// unaffected. An unavailable manifest yields empty sections and a
    /// single notice.
    pub async fn load_listing(&self) -> ListingPage {
        let mut sections: Vec<CategorySection> =
            Category::ALL.iter().copied().map(CategorySection::new).collect();
        let mut notices = Vec::new();

        let manifest = match self.index().resolve_index().await {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                log::warn!("Listing without catalog: {e}");
                notices.push(e.user_message());
                None
            }
        };

        if let Some(manifest) = manifest {
            let mut seen = HashSet::new();
            let entries: Vec<(String, String)> = manifest
                .entries()
                .filter(|entry| seen.insert(entry.id.clone()))
                .map(|entry| (entry.id.clone(), self.config().rewrite_location(&entry.file)))
                .collect();

            let outcomes = self.cache().get_or_fetch_all(entries).await;

            for outcome in outcomes {
                let record = match outcome.result {
                    Ok(record) => record,
                    Err(e) => {
                        notices.push(e.user_message());
                        continue;
                    }
                };
                let Some(category) = record.category() else {
                    log::warn!(
                        "Material {} has unknown type '{}'; not listed",
                        outcome.id,
                        record.kind
                    );
                    continue;
                };
                if let Some(section) = sections.iter_mut().find(|s| s.category == category) {
                    section.cards.push(self.renderer().render_card(&record));
                    section.ids.push(outcome.id);
                }
            }
        }

        for section in &mut sections {
            if section.category == Category::Matrix {
                section.add_new = Some(self.renderer().render_add_new(section.category));
            }
        }

        log::info!(
            "Listing ready: {} cards, {} notices",
            sections.iter().map(|s| s.cards.len()).sum::<usize>(),
            notices.len()
        );

        ListingPage { sections, notices }
    }
}
