/*!
 * Tests for the diff and merge engines
 */

use tmxdoc::tmx::{merge_variants, variant_diff};
use tmxdoc::{Document, Variant};
use crate::common;

/// variant_diff reports additions and content changes, never deletions
#[test]
fn test_variant_diff_withChangedAndAddedVariants_shouldReportOnlyNewKeys() {
    let a = common::unit_with_variants(
        "en-US",
        "Hello",
        &[("en-US", "Hello"), ("fr-FR", "Bonjour")],
    );
    let b = common::unit_with_variants(
        "en-US",
        "Hello",
        &[("en-US", "Hello"), ("fr-FR", "Salut"), ("de-DE", "Hallo")],
    );

    let added = variant_diff(&a, &b);
    let pairs: Vec<(&str, &str)> = added
        .iter()
        .map(|v| (v.locale.as_str(), v.string.as_str()))
        .collect();
    assert_eq!(pairs, vec![("fr-FR", "Salut"), ("de-DE", "Hallo")]);

    // Direction matters: b -> a reports a's fr content as the only novelty
    let reverse = variant_diff(&b, &a);
    assert_eq!(reverse.len(), 1);
    assert_eq!(reverse[0].string, "Bonjour");
}

/// Diff directionality: changed translations surface as additions in one
/// direction; when the newer document retains all old variants, the reverse
/// diff is empty because deletions are never reported
#[test]
fn test_diff_withChangedTranslation_shouldBeAsymmetric() {
    let a = common::document_with_unit(
        "en-US",
        common::unit_with_variants(
            "en-US",
            "Hello",
            &[("en-US", "Hello"), ("fr-FR", "Bonjour")],
        ),
    );
    let b = common::document_with_unit(
        "en-US",
        common::unit_with_variants(
            "en-US",
            "Hello",
            &[
                ("en-US", "Hello"),
                ("fr-FR", "Bonjour"),
                ("fr-FR", "Salut"),
                ("de-DE", "Hallo"),
            ],
        ),
    );

    let forward = a.diff(&b);
    assert_eq!(forward.size(), 1);
    let unit = &forward.get_translation_units()[0];
    // Mandatory source variant plus the changed fr and new de variants
    assert_eq!(
        common::variant_pairs(unit),
        vec![
            ("en-US".to_string(), "Hello".to_string()),
            ("fr-FR".to_string(), "Salut".to_string()),
            ("de-DE".to_string(), "Hallo".to_string()),
        ]
    );

    // Everything in a is already in b, so nothing is new in that direction
    let backward = b.diff(&a);
    assert_eq!(backward.size(), 0);
}

/// Units absent from the baseline are copied wholesale
#[test]
fn test_diff_withUnitMissingFromBaseline_shouldCopyUnit() {
    let base = Document::new("en-US");
    let mut other = Document::new("en-US");
    let mut unit = common::unit_with_variants(
        "en-US",
        "Goodbye",
        &[("en-US", "Goodbye"), ("fr-FR", "Au revoir")],
    );
    unit.set_property("x-context", "exit");
    other.add_translation_unit(unit.clone());

    let result = base.diff(&other);
    assert_eq!(result.size(), 1);
    let copied = &result.get_translation_units()[0];
    assert_eq!(copied.key(), unit.key());
    assert_eq!(copied.variant_keys(), unit.variant_keys());
    assert_eq!(copied.properties.get("x-context").map(String::as_str), Some("exit"));
}

/// Identical documents produce an empty diff
#[test]
fn test_diff_withIdenticalDocuments_shouldBeEmpty() {
    let doc = common::document_with_unit(
        "en-US",
        common::unit_with_variants(
            "en-US",
            "Hello",
            &[("en-US", "Hello"), ("fr-FR", "Bonjour")],
        ),
    );

    assert_eq!(doc.diff(&doc.clone()).size(), 0);
}

/// The diff result carries the baseline document's settings
#[test]
fn test_diff_withConfiguredBaseline_shouldInheritSettings() {
    let base = Document::new("en-US")
        .with_admin_locale("en")
        .with_property("creationtool", "custom-tool");
    let other = Document::new("en-US");

    let result = base.diff(&other);
    assert_eq!(result.source_locale(), "en-US");
    assert_eq!(result.admin_locale(), "en");
    assert_eq!(result.get_property("creationtool"), Some("custom-tool"));
}

/// merge_variants keeps left's content on a locale collision
#[test]
fn test_merge_variants_withLocaleCollision_shouldKeepLeftContent() {
    let mut left = common::unit_with_variants("en-US", "Hello", &[("fr-FR", "Bonjour")]);
    let right = common::unit_with_variants(
        "en-US",
        "Hello",
        &[("fr-FR", "Salut"), ("de-DE", "Hallo")],
    );

    merge_variants(&mut left, &right);
    assert_eq!(
        common::variant_pairs(&left),
        vec![
            ("fr-FR".to_string(), "Bonjour".to_string()),
            ("de-DE".to_string(), "Hallo".to_string()),
        ]
    );
}

/// Merge union with first-seen-wins reconciliation
#[test]
fn test_merge_withOverlappingUnits_shouldUnionFirstWins() {
    let x = common::document_with_unit(
        "en-US",
        common::unit_with_variants("en-US", "Hello", &[("fr-FR", "Bonjour")]),
    );
    let mut y = Document::new("en-US");
    y.add_translation_unit(common::unit_with_variants(
        "en-US",
        "Hello",
        &[("fr-FR", "Salut"), ("de-DE", "Hallo")],
    ));
    y.add_translation_unit(common::unit_with_variants(
        "en-US",
        "Goodbye",
        &[("en-US", "Goodbye"), ("fr-FR", "Au revoir")],
    ));

    let merged = x.merge(&[&y]);
    assert_eq!(merged.size(), 2);

    let hello = &merged.get_translation_units()[0];
    assert_eq!(
        common::variant_pairs(hello),
        vec![
            ("fr-FR".to_string(), "Bonjour".to_string()),
            ("de-DE".to_string(), "Hallo".to_string()),
        ]
    );

    let goodbye = &merged.get_translation_units()[1];
    assert_eq!(goodbye.variants.len(), 2);
}

/// Merging with no others is a plain copy
#[test]
fn test_merge_withNoOthers_shouldReturnCopy() {
    let doc = common::document_with_unit(
        "en-US",
        common::unit_with_variants(
            "en-US",
            "Hello",
            &[("en-US", "Hello"), ("fr-FR", "Bonjour")],
        ),
    );

    let merged = doc.merge(&[]);
    assert_eq!(merged.size(), 1);
    assert_eq!(
        merged.get_translation_units()[0].variant_keys(),
        doc.get_translation_units()[0].variant_keys()
    );
}

/// Three-way merge unions unit keys across all inputs
#[test]
fn test_merge_withThreeDocuments_shouldUnionAllUnits() {
    let make_doc = |source: &str, variant: Variant| {
        let mut unit = common::unit_with_variants("en-US", source, &[("en-US", source)]);
        unit.add_variant(variant);
        common::document_with_unit("en-US", unit)
    };

    let a = make_doc("One", Variant::new("fr-FR", "Un"));
    let b = make_doc("Two", Variant::new("fr-FR", "Deux"));
    let c = make_doc("Three", Variant::new("fr-FR", "Trois"));

    let merged = a.merge(&[&b, &c]);
    assert_eq!(merged.size(), 3);
}
