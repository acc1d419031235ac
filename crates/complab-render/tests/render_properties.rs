//! Property tests for record rendering.

#![allow(clippy::unwrap_used)]

use complab_core::{MaterialRecord, Property, PropertyGroup};
use complab_render::{render_card, render_detail};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = MaterialRecord> {
    (
        "[A-Za-z0-9<>&\"' ]{1,16}",
        proptest::collection::vec(
            ("[a-z_]{1,8}", "[A-Za-z <>&]{0,12}", 0i64..10_000, "[A-Za-z/%]{0,4}"),
            0..6,
        ),
        proptest::option::of(proptest::collection::vec("[A-Za-z0-9 <>&]{0,20}", 0..5)),
    )
        .prop_map(|(name, props, references)| {
            let mut record = MaterialRecord::new("M1", name, "Matrix");
            record.mechanical = PropertyGroup::new(
                props
                    .into_iter()
                    .map(|(key, label, value, unit)| Property::new(key, label, value, unit))
                    .collect(),
            );
            record.references = references;
            record
        })
}

proptest! {
    #[test]
    fn test_rendering_is_deterministic(record in record_strategy()) {
        prop_assert_eq!(render_detail(&record).to_html(), render_detail(&record).to_html());
        prop_assert_eq!(render_card(&record).to_html(), render_card(&record).to_html());
    }

    #[test]
    fn test_rendered_text_never_carries_raw_markup(record in record_strategy()) {
        let html = render_detail(&record).to_html();
        // Only the renderer's own tags may appear; every '<' from record
        // text is escaped.
        prop_assert!(!html.contains("< "));
        prop_assert_eq!(html.matches('<').count(), html.matches('>').count());
    }

    #[test]
    fn test_reference_count_matches(record in record_strategy()) {
        let html = render_detail(&record).to_html();
        let expected = record.references().len();
        prop_assert_eq!(html.matches("<li>").count(), expected);
        prop_assert_eq!(html.contains("references-section"), expected > 0);
    }
}
