//! Material record → view fragment.
//!
//! Rendering is a pure function of the record and the [`Renderer`]
//! settings: identical input always yields byte-identical HTML. Optional
//! sections are omitted from the output entirely when their field is absent,
//! when a reference list is empty, or when long text is blank.
//!
//! Interactive elements carry `data-action` attributes (`copy`, `edit`,
//! `export`, `print`, `add-new`, `open`) for the host page to bind; no
//! inline script is emitted.

use complab_core::config::{DEFAULT_DETAIL_PAGE, DEFAULT_SITE_NAME};
use complab_core::util::ids::encode_query_value;
use complab_core::{Category, MaterialRecord, PropertyGroup, SiteConfig};

use crate::markup::render_paragraphs;
use crate::view::{Element, Fragment, Node};

/// Manufacturer shown when a record does not name one.
pub const UNKNOWN_MANUFACTURER: &str = "Various";

/// Description shown when a record has none.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Element id of the code block on the detail page.
pub const DETAIL_CODE_ID: &str = "abaqus-code";

/// Element id of a card's code block.
pub fn card_code_id(record_id: &str) -> String {
    format!("abaqus-{record_id}")
}

/// Placeholder shown instead of a detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// The page was opened without an identifier.
    NoIdentifier,
    /// The identifier is not in the catalog (or the catalog is unavailable).
    NotFound {
        /// Requested identifier
        id: String,
    },
    /// The record is listed but could not be loaded.
    Unavailable {
        /// Requested identifier
        id: String,
    },
}

impl Placeholder {
    /// Heading text.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::NoIdentifier => "No Material Specified",
            Self::NotFound { .. } => "Material Not Found",
            Self::Unavailable { .. } => "Material Unavailable",
        }
    }

    /// Explanatory text.
    pub fn message(&self) -> String {
        match self {
            Self::NoIdentifier => "Please select a material from the homepage.".to_string(),
            Self::NotFound { id } => {
                format!("No material with identifier \"{id}\" exists in the catalog.")
            }
            Self::Unavailable { .. } => "The requested material could not be loaded.".to_string(),
        }
    }

    /// CSS modifier distinguishing the placeholder kinds.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoIdentifier => "no-identifier",
            Self::NotFound { .. } => "not-found",
            Self::Unavailable { .. } => "unavailable",
        }
    }
}

/// Rendering settings: where cards link to and how titles are formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    detail_page: String,
    site_name: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            detail_page: DEFAULT_DETAIL_PAGE.to_string(),
            site_name: DEFAULT_SITE_NAME.to_string(),
        }
    }
}

impl Renderer {
    /// Renderer using the site's detail page and name.
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            detail_page: config.detail_page.clone(),
            site_name: config.site_name.clone(),
        }
    }

    /// Address of the detail page for `id`.
    pub fn detail_href(&self, id: &str) -> String {
        format!("{}?id={}", self.detail_page, encode_query_value(id))
    }

    /// Document title for a record's detail page.
    pub fn detail_title(&self, record: &MaterialRecord) -> String {
        format!("{} - {}", record.name, self.site_name)
    }

    /// Document title for a placeholder page.
    pub fn placeholder_title(&self, placeholder: &Placeholder) -> String {
        format!("{} - {}", placeholder.heading(), self.site_name)
    }

    // ------------------------------------------------------------------------
    // Listing
    // ------------------------------------------------------------------------

    /// Listing card for one record.
    pub fn render_card(&self, record: &MaterialRecord) -> Fragment {
        let header = Element::new("div")
            .class("card-header")
            .child(Element::new("h4").text(&record.name))
            .child(Element::new("span").class("material-type").text(&record.kind));

        let body = Element::new("div")
            .class("card-body")
            .child(card_properties("Mechanical Properties", &record.mechanical))
            .child(card_properties("Thermal Properties", &record.thermal))
            .maybe_child(
                record
                    .rheological
                    .as_ref()
                    .map(|group| card_properties("Rheological Properties", group)),
            )
            .maybe_child(record.code_template().map(|template| {
                let code_id = card_code_id(&record.id);
                Element::new("div")
                    .class("abaqus-section")
                    .child(Element::new("h5").text("ABAQUS Material Definition"))
                    .child(
                        action_button("copy-btn", "copy", "📋 Copy ABAQUS Code")
                            .attr("data-target", code_id.clone()),
                    )
                    .child(
                        Element::new("pre")
                            .id(code_id)
                            .child(Element::new("code").text(template)),
                    )
            }));

        let footer = Element::new("div")
            .class("card-footer")
            .child(action_button("edit-btn", "edit", "✏️ Edit").attr("data-material", &record.id))
            .child(
                action_button("export-btn", "export", "💾 Export JSON")
                    .attr("data-material", &record.id),
            );

        Element::new("div")
            .class("material-card")
            .attr("data-material", &record.id)
            .attr("data-action", "open")
            .attr("data-href", self.detail_href(&record.id))
            .child(header)
            .child(body)
            .child(footer)
            .into()
    }

    /// "Add new" affordance appended to a listing container.
    pub fn render_add_new(&self, category: Category) -> Fragment {
        let label = match category {
            Category::Fiber => "Add New Fiber Material",
            Category::Matrix => "Add New Matrix Material",
        };
        Element::new("div")
            .class("add-material-card")
            .attr("data-action", "add-new")
            .attr("data-category", category.tag())
            .child(Element::new("span").class("plus-icon").text("+"))
            .child(Element::new("p").text(label))
            .into()
    }

    /// Listing container for one category, wrapping pre-rendered cards.
    pub fn render_category_section(
        &self,
        category: Category,
        cards: impl IntoIterator<Item = Fragment>,
    ) -> Fragment {
        let mut nodes = Vec::new();
        for card in cards {
            nodes.extend(card.nodes().iter().cloned());
        }
        Element::new("section")
            .id(category.plural())
            .class("material-category")
            .child(Element::new("h3").text(category.heading()))
            .child(Element::new("div").class("materials-grid").children(nodes))
            .into()
    }

    /// Inline notice (per-record failures, unavailable catalog).
    pub fn render_notice(&self, message: &str) -> Fragment {
        Element::new("div")
            .class("notice")
            .attr("role", "status")
            .text(message)
            .into()
    }

    // ------------------------------------------------------------------------
    // Detail
    // ------------------------------------------------------------------------

    /// Full detail document body for one record.
    pub fn render_detail(&self, record: &MaterialRecord) -> Fragment {
        let mut frag = Fragment::new();

        frag.push(
            Element::new("nav")
                .class("breadcrumb")
                .child(Element::new("a").attr("href", "../index.html").text("Home"))
                .child(
                    Element::new("span")
                        .id("breadcrumb-type")
                        .text(format!("{} Materials", record.kind)),
                )
                .child(Element::new("span").id("breadcrumb-name").text(&record.name)),
        );

        frag.push(
            Element::new("header")
                .class("material-header")
                .child(Element::new("h1").id("material-name").text(&record.name))
                .child(
                    Element::new("span")
                        .id("material-type")
                        .class("material-type")
                        .text(&record.kind),
                )
                .child(
                    Element::new("p")
                        .class("manufacturer")
                        .text("Manufacturer: ")
                        .child(Element::new("span").id("manufacturer").text(
                            record
                                .manufacturer
                                .as_deref()
                                .filter(|m| !m.is_empty())
                                .unwrap_or(UNKNOWN_MANUFACTURER),
                        )),
                )
                .child(
                    Element::new("p")
                        .id("description")
                        .class("material-description")
                        .text(
                            record
                                .description
                                .as_deref()
                                .filter(|d| !d.is_empty())
                                .unwrap_or(NO_DESCRIPTION),
                        ),
                ),
        );

        if let Some(text) = non_blank(record.detailed_description.as_deref()) {
            frag.push(
                Element::new("section")
                    .id("detailed-description-section")
                    .child(Element::new("h2").text("Overview"))
                    .child(
                        Element::new("div")
                            .id("detailed-description")
                            .children(render_paragraphs(text)),
                    ),
            );
        }

        frag.push(detail_properties("mechanical", "Mechanical Properties", &record.mechanical));
        frag.push(detail_properties("thermal", "Thermal Properties", &record.thermal));
        frag.push(detail_properties(
            "cure-kinetics",
            "Cure Kinetics Parameters",
            &record.cure_kinetics,
        ));
        if let Some(group) = &record.processing {
            frag.push(detail_properties("processing", "Processing Parameters", group));
        }
        if let Some(group) = &record.rheological {
            frag.push(detail_properties("rheological", "Rheological Properties", group));
        }

        if let Some(template) = record.code_template() {
            frag.push(
                Element::new("section")
                    .id("abaqus-section")
                    .child(Element::new("h2").text("ABAQUS Material Definition"))
                    .child(
                        action_button("copy-btn", "copy", "📋 Copy ABAQUS Code")
                            .attr("data-target", DETAIL_CODE_ID),
                    )
                    .child(
                        Element::new("pre")
                            .child(Element::new("code").id(DETAIL_CODE_ID).text(template)),
                    ),
            );
        }

        if !record.references().is_empty() {
            frag.push(
                Element::new("section")
                    .id("references-section")
                    .child(Element::new("h2").text("References"))
                    .child(
                        Element::new("ol").id("references-list").children(
                            record
                                .references()
                                .iter()
                                .map(|reference| Element::new("li").text(reference)),
                        ),
                    ),
            );
        }

        if let Some(notes) = non_blank(record.notes.as_deref()) {
            frag.push(
                Element::new("section")
                    .id("notes-section")
                    .child(Element::new("h2").text("Notes"))
                    .child(Element::new("p").id("notes-content").text(notes)),
            );
        }

        frag.push(
            Element::new("div")
                .class("detail-actions")
                .attr("data-material", &record.id)
                .maybe_child(record.code_template().map(|_| {
                    action_button("copy-btn", "copy", "📋 Copy All ABAQUS Code")
                        .attr("data-target", DETAIL_CODE_ID)
                }))
                .child(
                    action_button("export-btn", "export", "💾 Export JSON")
                        .attr("data-material", &record.id),
                )
                .child(action_button("print-btn", "print", "🖨️ Print Datasheet")),
        );

        frag
    }

    /// Placeholder document body.
    pub fn render_placeholder(&self, placeholder: &Placeholder) -> Fragment {
        Element::new("header")
            .class(format!("material-header placeholder placeholder-{}", placeholder.kind()))
            .child(Element::new("h1").text(placeholder.heading()))
            .child(
                Element::new("p")
                    .class("material-description")
                    .text(placeholder.message()),
            )
            .into()
    }
}

/// Render a listing card with default settings.
pub fn render_card(record: &MaterialRecord) -> Fragment {
    Renderer::default().render_card(record)
}

/// Render a detail document with default settings.
pub fn render_detail(record: &MaterialRecord) -> Fragment {
    Renderer::default().render_detail(record)
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.trim().is_empty())
}

fn action_button(class: &str, action: &'static str, label: &str) -> Element {
    Element::new("button")
        .attr("type", "button")
        .class(class.to_string())
        .attr("data-action", action)
        .text(label)
}

fn card_properties(heading: &str, group: &PropertyGroup) -> Element {
    Element::new("div")
        .class("property-section")
        .child(Element::new("h5").text(heading))
        .child(Element::new("div").class("property-grid").children(group.iter().map(|p| {
            Element::new("div")
                .class("property")
                .child(Element::new("span").class("prop-label").text(p.display_label()))
                .child(Element::new("span").class("prop-value").text(p.display()))
        })))
}

fn detail_properties(slug: &str, heading: &str, group: &PropertyGroup) -> Node {
    Element::new("section")
        .id(format!("{slug}-section"))
        .child(Element::new("h2").text(heading))
        .child(
            Element::new("div")
                .id(format!("{slug}-properties"))
                .class("property-table")
                .children(group.iter().map(|p| {
                    Element::new("div")
                        .class("property-row")
                        .child(Element::new("span").class("property-label").text(p.display_label()))
                        .child(Element::new("span").class("property-value").text(p.display()))
                })),
        )
        .into()
}
