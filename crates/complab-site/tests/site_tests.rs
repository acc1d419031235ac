//! Integration tests for CompositeLab listing and detail pages.
//!
//! Exercises the full path from catalog manifest through record cache and
//! renderer to page output, with in-memory record sources and a recording
//! platform.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod common;

use std::time::Duration;

use common::*;
use complab_core::{Capability, Category, MaterialRecord};
use complab_site::{DetailState, FsPlatform, PageHandle};

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_listing_groups_cards_in_manifest_order() {
    let (source, catalog) = catalog(standard_source());
    let page = catalog.load_listing().await;

    assert!(page.notices.is_empty());
    assert_eq!(page.card_count(), 3);
    assert_eq!(page.section(Category::Fiber).unwrap().ids, vec!["T300", "IM7"]);
    assert_eq!(page.section(Category::Matrix).unwrap().ids, vec!["8552"]);
    assert_eq!(source.total_fetches(), 4);
}

#[tokio::test]
async fn test_listing_order_ignores_completion_order() {
    let source = standard_source().with_delay(T300, Duration::from_millis(30));
    let (_, catalog) = catalog(source);
    let page = catalog.load_listing().await;
    assert_eq!(page.section(Category::Fiber).unwrap().ids, vec!["T300", "IM7"]);
}

#[tokio::test]
async fn test_listing_renders_property_row() {
    let (_, catalog) = catalog(standard_source());
    let html = catalog.load_listing().await.render(catalog.renderer()).to_html();
    assert!(html.contains(
        "<span class=\"prop-label\">Tensile Modulus</span><span class=\"prop-value\">230 GPa</span>"
    ));
    assert!(html.contains("<h3>Fiber Materials</h3>"));
    assert!(html.contains("<h3>Matrix Materials</h3>"));
}

#[tokio::test]
async fn test_listing_add_new_after_last_matrix_card() {
    let (_, catalog) = catalog(standard_source());
    let page = catalog.load_listing().await;

    assert!(page.section(Category::Fiber).unwrap().add_new.is_none());
    let matrices = page.section(Category::Matrix).unwrap();
    let html = matrices.render(catalog.renderer()).to_html();
    let last_card = html.rfind("class=\"material-card\"").unwrap();
    let add_new = html.find("add-material-card").unwrap();
    assert!(last_card < add_new);
}

#[tokio::test]
async fn test_listing_isolates_record_failures() {
    let manifest = r#"{"materials": {
        "fibers": [{"id": "T300", "file": "materials/fibers/t300.json"}],
        "matrices": [
            {"id": "BROKEN", "file": "materials/matrices/broken.json"},
            {"id": "8552", "file": "materials/matrices/8552.json"}
        ]
    }}"#;
    let source = standard_source()
        .with_document(INDEX, manifest)
        .with_document(BROKEN, "{not json");
    let (_, catalog) = catalog(source);

    let page = catalog.load_listing().await;
    assert_eq!(page.section(Category::Matrix).unwrap().ids, vec!["8552"]);
    assert_eq!(page.section(Category::Fiber).unwrap().ids, vec!["T300"]);
    assert_eq!(page.notices, vec!["Material 'BROKEN' could not be loaded."]);
    assert!(!catalog.cache().contains("BROKEN"));

    let html = page.render(catalog.renderer()).to_html();
    assert!(html.starts_with("<div class=\"notice\""));
}

#[tokio::test]
async fn test_listing_without_index() {
    let (source, catalog) = catalog(standard_source().fail(INDEX, "offline"));
    let page = catalog.load_listing().await;

    assert_eq!(page.card_count(), 0);
    assert_eq!(page.notices, vec!["The material catalog could not be loaded."]);
    assert_eq!(page.sections.len(), 2);
    assert_eq!(source.total_fetches(), 1);
}

#[tokio::test]
async fn test_listing_skips_unknown_category() {
    let source = standard_source()
        .with_document(IM7, r#"{"id": "IM7", "name": "IM7", "type": "Prepreg"}"#);
    let (_, catalog) = catalog(source);
    let page = catalog.load_listing().await;

    assert_eq!(page.section(Category::Fiber).unwrap().ids, vec!["T300"]);
    assert!(page.notices.is_empty());
    assert!(catalog.cache().contains("IM7"));
}

#[tokio::test]
async fn test_listing_duplicate_id_first_wins() {
    let manifest = r#"{"materials": {
        "fibers": [{"id": "T300", "file": "materials/fibers/t300.json"}],
        "matrices": [{"id": "T300", "file": "materials/matrices/8552.json"}]
    }}"#;
    let (source, catalog) = catalog(standard_source().with_document(INDEX, manifest));
    let page = catalog.load_listing().await;

    assert_eq!(page.card_count(), 1);
    assert_eq!(source.fetch_count(M8552), 0);
    assert_eq!(catalog.cache().get("T300").unwrap().name, "T300 Carbon Fiber");
}

// ============================================================================
// Detail
// ============================================================================

#[tokio::test]
async fn test_detail_populated() {
    let (source, catalog) = catalog(standard_source());
    let handle = PageHandle::new("detail");
    let page = catalog.open_detail_with("?id=T300", &handle).await;

    assert_eq!(page.state, DetailState::Populated { id: "T300".into() });
    assert_eq!(handle.state(), page.state);
    assert_eq!(page.title, "T300 Carbon Fiber - CompositeLab");
    let html = page.body.to_html();
    assert!(html.contains(
        "<span class=\"property-label\">Tensile Modulus</span><span class=\"property-value\">230 GPa</span>"
    ));
    assert!(html.contains("<ol id=\"references-list\"><li>Toray T300 datasheet</li><li>MIL-HDBK-17</li></ol>"));
    assert_eq!(source.fetch_count(T300), 1);
}

#[tokio::test]
async fn test_detail_without_identifier_fetches_nothing() {
    let (source, catalog) = catalog(standard_source());
    for query in ["", "?", "?id=", "?other=T300"] {
        let page = catalog.open_detail(query).await;
        assert_eq!(page.state, DetailState::MissingIdentifier);
        assert!(page.body.to_html().contains("No Material Specified"));
        assert!(page.record.is_none());
    }
    assert_eq!(source.total_fetches(), 0);
}

#[tokio::test]
async fn test_detail_unknown_identifier() {
    let (source, catalog) = catalog(standard_source());
    let page = catalog.open_detail("?id=NOPE").await;

    assert_eq!(page.state, DetailState::RecordNotFound { id: "NOPE".into() });
    assert!(page.body.to_html().contains("Material Not Found"));
    assert_eq!(source.total_fetches(), 1);
}

#[tokio::test]
async fn test_detail_fetch_failure_is_distinct() {
    let source = standard_source().fail(M8552, "connection reset");
    let (_, catalog) = catalog(source);

    let not_found = catalog.open_detail("?id=NOPE").await;
    let failed = catalog.open_detail("?id=8552").await;

    assert!(matches!(failed.state, DetailState::FetchFailed { ref id, .. } if id == "8552"));
    let failed_html = failed.body.to_html();
    assert!(failed_html.contains("Material Unavailable"));
    assert_ne!(failed_html, not_found.body.to_html());
}

#[tokio::test]
async fn test_detail_index_unavailable_shows_not_found() {
    let (_, catalog) = catalog(standard_source().fail(INDEX, "offline"));
    let page = catalog.open_detail("?id=T300").await;
    assert_eq!(page.state, DetailState::RecordNotFound { id: "T300".into() });
}

#[tokio::test]
async fn test_detail_decodes_identifier() {
    let manifest = r#"{"materials": {"fibers": [{"id": "IM7/12K", "file": "materials/fibers/im7.json"}]}}"#;
    let (_, catalog) = catalog(standard_source().with_document(INDEX, manifest));
    let page = catalog.open_detail("?id=IM7%2F12K").await;
    assert!(page.is_populated());
}

#[tokio::test]
async fn test_detail_and_listing_share_fetches() {
    let source = standard_source().with_delay(T300, Duration::from_millis(20));
    let (source, catalog) = catalog(source);

    let (page, listing) = tokio::join!(catalog.open_detail("?id=T300"), catalog.load_listing());

    assert!(page.is_populated());
    assert_eq!(listing.card_count(), 3);
    assert_eq!(source.fetch_count(T300), 1);
    assert_eq!(source.fetch_count(INDEX), 1);
}

#[tokio::test]
async fn test_reused_handle_keeps_first_outcome() {
    let (_, catalog) = catalog(standard_source());
    let handle = PageHandle::new("detail");
    catalog.open_detail_with("", &handle).await;
    let page = catalog.open_detail_with("?id=T300", &handle).await;

    assert!(page.is_populated());
    assert_eq!(handle.state(), DetailState::MissingIdentifier);
}

// ============================================================================
// Actions
// ============================================================================

#[tokio::test]
async fn test_copy_code() {
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=T300").await;
    let platform = RecordingPlatform::new();

    let feedback = catalog.copy_code(&platform, "T300").await;
    assert!(feedback.ok);
    assert_eq!(feedback.message, "✓ Copied!");
    assert_eq!(
        platform.calls(),
        vec![PlatformCall::Clipboard(
            "*MATERIAL, NAME=T300\n*ELASTIC\n230000., 0.2".to_string()
        )]
    );
}

#[tokio::test]
async fn test_copy_without_clipboard_is_inline_failure() {
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=T300").await;

    let feedback = catalog
        .copy_code(&RecordingPlatform::refusing(Capability::Clipboard), "T300")
        .await;
    assert!(!feedback.ok);
    assert_eq!(feedback.message, "Failed to copy to clipboard.");
}

#[tokio::test]
async fn test_copy_record_without_template() {
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=IM7").await;
    let platform = RecordingPlatform::new();

    let feedback = catalog.copy_code(&platform, "IM7").await;
    assert!(!feedback.ok);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_actions_never_fetch() {
    let (source, catalog) = catalog(standard_source());
    let platform = RecordingPlatform::new();

    assert!(!catalog.copy_code(&platform, "T300").await.ok);
    assert!(!catalog.export_record(&platform, "T300").await.ok);
    assert!(!catalog.edit_preview("T300").ok);
    assert_eq!(source.total_fetches(), 0);
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_export_record_round_trips() {
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=T300").await;
    let platform = RecordingPlatform::new();

    let feedback = catalog.export_record(&platform, "T300").await;
    assert_eq!(feedback.message, "✓ Exported!");

    let PlatformCall::Save { file_name, contents } = &platform.calls()[0] else {
        panic!("expected a save");
    };
    assert_eq!(file_name, "T300.json");
    let reparsed = MaterialRecord::from_json(contents).unwrap();
    assert_eq!(&reparsed, catalog.cache().get("T300").unwrap().as_ref());
}

#[tokio::test]
async fn test_export_all_keyed_by_id() {
    let (_, catalog) = catalog(standard_source());
    catalog.load_listing().await;
    let platform = RecordingPlatform::new();

    let feedback = catalog.export_all(&platform).await;
    assert!(feedback.ok);

    let PlatformCall::Save { file_name, contents } = &platform.calls()[0] else {
        panic!("expected a save");
    };
    assert_eq!(file_name, "all_materials.json");
    let value: serde_json::Value = serde_json::from_str(contents).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert_eq!(object["8552"]["name"], "Hexcel 8552");
}

#[tokio::test]
async fn test_export_without_file_save() {
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=T300").await;

    let feedback = catalog
        .export_record(&RecordingPlatform::refusing(Capability::FileSave), "T300")
        .await;
    assert_eq!(feedback.message, "Failed to save the file.");
}

#[tokio::test]
async fn test_export_to_download_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=8552").await;

    let feedback = catalog
        .export_record(&FsPlatform::new(tmp.path()), "8552")
        .await;
    assert!(feedback.ok);
    let saved = std::fs::read_to_string(tmp.path().join("8552.json")).unwrap();
    assert!(saved.contains("\"Activation Energy\""));
}

#[tokio::test]
async fn test_export_with_traversing_id_stays_in_download_dir() {
    let tmp = tempfile::TempDir::new().unwrap();
    let manifest = r#"{"materials": {"fibers": [{"id": "../escaped", "file": "materials/fibers/t300.json"}]}}"#;
    let (_, catalog) = catalog(standard_source().with_document(INDEX, manifest));
    assert!(catalog.open_detail("?id=..%2Fescaped").await.is_populated());

    let downloads = tmp.path().join("downloads");
    let feedback = catalog
        .export_record(&FsPlatform::new(downloads.clone()), "../escaped")
        .await;

    assert!(!feedback.ok);
    assert_eq!(feedback.message, "Failed to save the file.");
    assert!(!tmp.path().join("escaped.json").exists());
}

#[tokio::test]
async fn test_print_only_populated_pages() {
    let (_, catalog) = catalog(standard_source());
    let platform = RecordingPlatform::new();

    let placeholder = catalog.open_detail("").await;
    assert!(!catalog.print(&platform, &placeholder).await.ok);

    let page = catalog.open_detail("?id=T300").await;
    assert!(catalog.print(&platform, &page).await.ok);
    assert_eq!(
        platform.calls(),
        vec![PlatformCall::Print {
            title: "T300 Carbon Fiber - CompositeLab".to_string()
        }]
    );

    let feedback = catalog
        .print(&RecordingPlatform::refusing(Capability::Print), &page)
        .await;
    assert_eq!(feedback.message, "Printing is not available.");
}

#[tokio::test]
async fn test_edit_preview_does_not_mutate() {
    let (_, catalog) = catalog(standard_source());
    catalog.open_detail("?id=T300").await;
    let before = catalog.cache().get("T300").unwrap();

    let feedback = catalog.edit_preview("T300");
    assert!(feedback.ok);
    assert!(feedback.preview.unwrap().contains("\"T300 Carbon Fiber\""));
    assert_eq!(catalog.cache().get("T300").unwrap(), before);
}

#[test]
fn test_add_new_acknowledges_only() {
    let (_, catalog) = catalog(standard_source());
    assert!(!catalog.add_new(Category::Matrix, "   ").ok);

    let feedback = catalog.add_new(Category::Matrix, "RTM6");
    assert!(feedback.ok);
    assert!(feedback.message.contains("RTM6"));
    assert!(catalog.cache().is_empty());
}
