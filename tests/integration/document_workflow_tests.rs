/*!
 * End-to-end document lifecycle tests: ingest, write, reload, compare
 */

use std::fs;
use tempfile::tempdir;
use tmxdoc::{Document, Resource, ResourceContent, SegmentationMode};
use crate::common;

fn sample_resource(source: &str, target: &str) -> Resource {
    Resource {
        source_locale: "en-US".to_string(),
        target_locale: Some("fr-FR".to_string()),
        content: ResourceContent::String {
            source: source.to_string(),
            target: Some(target.to_string()),
        },
        context: None,
        flavor: None,
        project: Some("webapp".to_string()),
        datatype: None,
        comment: None,
    }
}

/// Ingest resources, write the document, reload it from disk and compare
#[test]
fn test_workflow_withIngestWriteReload_shouldPreserveUnits() {
    let dir = tempdir().unwrap();

    let mut document = Document::new("en-US").with_path("memory.tmx");
    document.add_resource(&sample_resource("Hello", "Bonjour"));
    document.add_resource(&sample_resource("Goodbye", "Au revoir"));
    assert_eq!(document.size(), 2);

    document.write(dir.path()).unwrap();
    let written = dir.path().join("memory.tmx");
    assert!(written.exists());

    let mut reloaded = Document::new("en").with_path(&written);
    reloaded.load().unwrap();

    assert_eq!(reloaded.size(), 2);
    assert_eq!(reloaded.source_locale(), "en-US");
    for unit in document.get_translation_units() {
        let key = unit.key();
        let loaded = reloaded.get_translation_unit(&key).unwrap();
        assert_eq!(loaded.variant_keys(), unit.variant_keys());
    }
}

/// Write creates missing directories below the target
#[test]
fn test_write_withNestedTargetDir_shouldCreateDirectories() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("out").join("tm");

    let mut document = Document::new("en-US").with_path("memory.tmx");
    document.add_resource(&sample_resource("Hello", "Bonjour"));

    document.write(&nested).unwrap();
    assert!(nested.join("memory.tmx").exists());
}

/// Load and write are no-ops without a configured path
#[test]
fn test_load_write_withNoPath_shouldBeNoOps() {
    let dir = tempdir().unwrap();

    let mut document = Document::new("en-US");
    document.add_resource(&sample_resource("Hello", "Bonjour"));

    assert!(document.load().is_ok());
    assert!(document.write(dir.path()).is_ok());
    assert_eq!(document.size(), 1);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

/// Loading a missing file is an error, not silent
#[test]
fn test_load_withMissingFile_shouldFail() {
    let dir = tempdir().unwrap();
    let mut document = Document::new("en-US").with_path(dir.path().join("absent.tmx"));
    assert!(document.load().is_err());
}

/// Diff two memories on disk and apply the diff through a merge
#[test]
fn test_workflow_withDiffThenMerge_shouldReconcile() {
    let dir = tempdir().unwrap();

    // The baseline memory knows one translation
    let mut base = Document::new("en-US").with_path("base.tmx");
    base.add_resource(&sample_resource("Hello", "Bonjour"));
    base.write(dir.path()).unwrap();

    // The newer memory adds a unit and a German variant
    let mut newer = base.clone().with_path("newer.tmx");
    newer.add_resource(&sample_resource("Goodbye", "Au revoir"));
    let extra = common::unit_with_variants("en-US", "Hello", &[("de-DE", "Hallo")]);
    newer.add_translation_unit(extra);
    newer.write(dir.path()).unwrap();

    let mut base_loaded = Document::new("en").with_path(dir.path().join("base.tmx"));
    base_loaded.load().unwrap();
    let mut newer_loaded = Document::new("en").with_path(dir.path().join("newer.tmx"));
    newer_loaded.load().unwrap();

    let delta = base_loaded.diff(&newer_loaded);
    assert_eq!(delta.size(), 2);

    let reconciled = base_loaded.merge(&[&delta]);
    assert_eq!(reconciled.size(), 2);
    let hello_key = newer_loaded
        .get_translation_units()
        .iter()
        .find(|u| u.source == "Hello")
        .unwrap()
        .key();
    let hello = reconciled.get_translation_unit(&hello_key).unwrap();
    let locales: Vec<&str> = hello.variants.iter().map(|v| v.locale.as_str()).collect();
    assert!(locales.contains(&"de-DE"));
}

/// Sentence-segmented ingestion survives a full round trip through disk
#[test]
fn test_workflow_withSentenceSegmentation_shouldRoundTrip() {
    let dir = tempdir().unwrap();

    let mut document = Document::new("en-US")
        .with_segmentation(SegmentationMode::Sentence)
        .with_path("segmented.tmx");
    let resource = Resource {
        source_locale: "en-US".to_string(),
        target_locale: Some("fr-FR".to_string()),
        content: ResourceContent::String {
            source: "Hello there. See you soon.".to_string(),
            target: Some("Bonjour. À bientôt.".to_string()),
        },
        context: None,
        flavor: None,
        project: None,
        datatype: None,
        comment: None,
    };
    document.add_resource(&resource);
    assert_eq!(document.size(), 2);

    document.write(dir.path()).unwrap();

    let mut reloaded = Document::new("en").with_path(dir.path().join("segmented.tmx"));
    reloaded.load().unwrap();
    assert_eq!(reloaded.size(), 2);
    assert_eq!(reloaded.segmentation_type(), SegmentationMode::Sentence);
}
