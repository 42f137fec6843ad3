/*!
 * The translation memory document aggregate.
 *
 * A document owns an ordered list of translation units together with a hash
 * index from unit identity key to list position. `add_translation_unit` is
 * the only writer to both structures, which keeps them consistent: every
 * unit in the list has exactly one index entry and vice versa.
 */

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use anyhow::Result;
use log::trace;

use crate::errors::TmxError;
use crate::file_utils::FileManager;
use crate::segmenter::{self, SegmentationMode};
use crate::tmx::model::TranslationUnit;

/// Default tool name written to the header's `creationtool` attribute
pub const CREATION_TOOL: &str = "tmxdoc";

/// Header property keys rendered as attributes rather than `<prop>` elements
pub const HEADER_ATTRIBUTES: [&str; 7] = [
    "segtype",
    "creationtool",
    "creationtoolversion",
    "adminlang",
    "srclang",
    "datatype",
    "o-tmf",
];

/// A TMX translation memory document
#[derive(Debug, Clone)]
pub struct Document {
    /// Format version, rendered as `<major>.<minor>`
    pub(crate) version: f32,

    /// Locale of the source strings
    pub(crate) source_locale: String,

    /// Administrative locale of the memory itself
    pub(crate) admin_locale: String,

    /// Header properties; a fixed subset renders as header attributes
    pub(crate) properties: BTreeMap<String, String>,

    /// Units in first-seen order
    pub(crate) units: Vec<TranslationUnit>,

    /// Unit identity key to position in `units`
    pub(crate) unit_index: HashMap<String, usize>,

    /// On-disk location, when the document is file-backed
    pub(crate) path: Option<PathBuf>,
}

impl Document {
    /// Create an empty document for the given source locale.
    ///
    /// The administrative locale defaults to the source locale and the
    /// segmentation type to paragraph.
    pub fn new(source_locale: &str) -> Self {
        let mut properties = BTreeMap::new();
        properties.insert("segtype".to_string(), SegmentationMode::Paragraph.as_str().to_string());
        properties.insert("creationtool".to_string(), CREATION_TOOL.to_string());
        properties.insert(
            "creationtoolversion".to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        properties.insert("datatype".to_string(), "plaintext".to_string());

        Document {
            version: 1.4,
            source_locale: source_locale.to_string(),
            admin_locale: source_locale.to_string(),
            properties,
            units: Vec::new(),
            unit_index: HashMap::new(),
            path: None,
        }
    }

    /// Set the format version
    pub fn with_version(mut self, version: f32) -> Self {
        self.version = version;
        self
    }

    /// Set the administrative locale
    pub fn with_admin_locale(mut self, admin_locale: &str) -> Self {
        self.admin_locale = admin_locale.to_string();
        self
    }

    /// Set the segmentation type
    pub fn with_segmentation(mut self, mode: SegmentationMode) -> Self {
        self.properties.insert("segtype".to_string(), mode.as_str().to_string());
        self
    }

    /// Set the on-disk location backing `load` and `write`
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set a header property
    pub fn with_property(mut self, key: &str, value: &str) -> Self {
        self.set_property(key, value);
        self
    }

    /// Set a header property
    pub fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    /// Get a header property
    pub fn get_property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(|v| v.as_str())
    }

    /// All header properties
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Locale of the source strings
    pub fn source_locale(&self) -> &str {
        &self.source_locale
    }

    /// Administrative locale
    pub fn admin_locale(&self) -> &str {
        &self.admin_locale
    }

    /// On-disk location, when configured
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Format version rendered the way the wire format expects it:
    /// always `<integer>.<fraction-or-0>`, so `1` becomes "1.0".
    pub fn version_string(&self) -> String {
        if self.version.fract() == 0.0 {
            format!("{:.1}", self.version)
        } else {
            self.version.to_string()
        }
    }

    /// Datatype configured for this document's content
    pub fn datatype(&self) -> &str {
        self.get_property("datatype").unwrap_or("plaintext")
    }

    /// Segmentation type configured through the `segtype` property
    pub fn segmentation_type(&self) -> SegmentationMode {
        self.get_property("segtype")
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Segment a string according to this document's segmentation type
    pub fn segment_string(&self, text: &str, locale: &str) -> Vec<String> {
        segmenter::segment(text, locale, self.segmentation_type())
    }

    /// Add a unit, merging by identity key.
    ///
    /// When a unit with the same key is already present, the incoming
    /// variants are appended to it, skipping variant keys it already has;
    /// existing variant content is never replaced. Otherwise the unit is
    /// appended and indexed. Re-adding an identical unit changes nothing.
    pub fn add_translation_unit(&mut self, unit: TranslationUnit) {
        let key = unit.key();

        if let Some(&pos) = self.unit_index.get(&key) {
            trace!("merging variants into existing unit {}", key);
            self.units[pos].add_variants(unit.variants);
        } else {
            trace!("adding new unit {}", key);
            self.unit_index.insert(key, self.units.len());
            self.units.push(unit);
        }
    }

    /// Units in first-seen order
    pub fn get_translation_units(&self) -> &[TranslationUnit] {
        &self.units
    }

    /// Look up a unit by its identity key
    pub fn get_translation_unit(&self, key: &str) -> Option<&TranslationUnit> {
        self.unit_index.get(key).map(|&pos| &self.units[pos])
    }

    /// Number of units in the document
    pub fn size(&self) -> usize {
        self.units.len()
    }

    /// Discard all units and their index
    pub(crate) fn clear_units(&mut self) {
        self.units.clear();
        self.unit_index.clear();
    }

    /// Read and decode the backing file. No-op when no path is configured.
    pub fn load(&mut self) -> Result<()> {
        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        let text = FileManager::read_to_string(&path)?;
        self.deserialize(&text)
    }

    /// Encode and write the document under the given directory, using the
    /// configured path's file name. No-op when no path is configured.
    pub fn write<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let file_name = path.file_name().unwrap_or(path.as_os_str());
        let target = dir.as_ref().join(file_name);
        let text = self.serialize()?;
        FileManager::write_to_file(target, &text)
    }

    /// Split the document into multiple documents by the given criterion.
    ///
    /// Declared by the format tooling but with no defined behavior yet;
    /// always reports a not-implemented error.
    pub fn split(&self, _by: &str) -> Result<Vec<Document>> {
        Err(TmxError::NotImplemented("split").into())
    }
}
