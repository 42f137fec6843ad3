/*!
 * Ingestion of localizable resources into translation units.
 *
 * A resource is one externally-sourced localizable item: a plain string, a
 * string array, or a pluralized string, each with a source payload and an
 * optional target payload. Ingestion segments the payloads according to the
 * document's segmentation type and produces one unit per source segment,
 * pairing target segments by index.
 */

use std::collections::BTreeMap;
use log::trace;
use serde::{Deserialize, Serialize};

use crate::tmx::document::Document;
use crate::tmx::model::{TranslationUnit, Variant};

/// Payload of a localizable resource, by shape
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResourceContent {
    /// A single string
    String {
        /// Source-language text
        source: String,
        /// Target-language text, when already translated
        #[serde(default)]
        target: Option<String>,
    },

    /// An ordered array of strings
    Array {
        /// Source-language elements
        source: Vec<String>,
        /// Target-language elements, paired by position
        #[serde(default)]
        target: Option<Vec<String>>,
    },

    /// A pluralized string: plural category to text.
    ///
    /// Ordered maps keep category iteration deterministic when aligning
    /// source and target categories.
    Plural {
        /// Source-language forms by category ("one", "other", ...)
        source: BTreeMap<String, String>,
        /// Target-language forms by category
        #[serde(default)]
        target: Option<BTreeMap<String, String>>,
    },
}

/// One localizable resource as produced by an extraction pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Locale of the source payload
    pub source_locale: String,

    /// Locale of the target payload, when present
    #[serde(default)]
    pub target_locale: Option<String>,

    /// The payload itself
    #[serde(flatten)]
    pub content: ResourceContent,

    /// Disambiguation context of the resource
    #[serde(default)]
    pub context: Option<String>,

    /// Flavor/variant tag of the resource
    #[serde(default)]
    pub flavor: Option<String>,

    /// Project the resource belongs to
    #[serde(default)]
    pub project: Option<String>,

    /// Datatype of the resource content
    #[serde(default)]
    pub datatype: Option<String>,

    /// Translator-facing note
    #[serde(default)]
    pub comment: Option<String>,
}

impl Document {
    /// Convert a resource into translation units and add them.
    ///
    /// A resource whose source locale differs from the document's source
    /// locale is skipped silently; that is the documented contract, not an
    /// error path. Target variants are only produced when the resource has
    /// a target locale that differs from its source locale.
    pub fn add_resource(&mut self, resource: &Resource) {
        if resource.source_locale != self.source_locale {
            trace!(
                "skipping resource with source locale {} (document is {})",
                resource.source_locale, self.source_locale
            );
            return;
        }

        let add_target = resource
            .target_locale
            .as_deref()
            .is_some_and(|t| t != resource.source_locale);
        let target_locale = resource.target_locale.clone().unwrap_or_default();

        match &resource.content {
            ResourceContent::String { source, target } => {
                let target = if add_target { target.as_deref() } else { None };
                self.ingest_string(resource, source, target, &target_locale);
            }
            ResourceContent::Array { source, target } => {
                let target = if add_target { target.as_deref() } else { None };
                self.ingest_array(resource, source, target, &target_locale);
            }
            ResourceContent::Plural { source, target } => {
                let target = if add_target { target.as_ref() } else { None };
                self.ingest_plural(resource, source, target, &target_locale);
            }
        }
    }

    fn ingest_string(
        &mut self,
        resource: &Resource,
        source: &str,
        target: Option<&str>,
        target_locale: &str,
    ) {
        let source_segments = self.segment_string(source, &resource.source_locale);
        let target_segments = target
            .map(|t| self.segment_string(t, target_locale))
            .unwrap_or_default();

        for (i, segment) in source_segments.iter().enumerate() {
            let mut unit = self.new_unit(resource, segment);
            unit.add_variant(Variant::new(&resource.source_locale, segment));
            if let Some(translated) = target_segments.get(i) {
                unit.add_variant(Variant::new(target_locale, translated));
            }
            self.add_translation_unit(unit);
        }
    }

    fn ingest_array(
        &mut self,
        resource: &Resource,
        source: &[String],
        target: Option<&[String]>,
        target_locale: &str,
    ) {
        for (element, text) in source.iter().enumerate() {
            let source_segments = self.segment_string(text, &resource.source_locale);
            // A target segment is attached only when both the element and
            // the segment index exist on the target side
            let target_segments = target
                .and_then(|t| t.get(element))
                .map(|t| self.segment_string(t, target_locale))
                .unwrap_or_default();

            for (i, segment) in source_segments.iter().enumerate() {
                let mut unit = self.new_unit(resource, segment);
                unit.add_variant(Variant::new(&resource.source_locale, segment));
                if let Some(translated) = target_segments.get(i) {
                    unit.add_variant(Variant::new(target_locale, translated));
                }
                self.add_translation_unit(unit);
            }
        }
    }

    fn ingest_plural(
        &mut self,
        resource: &Resource,
        source: &BTreeMap<String, String>,
        target: Option<&BTreeMap<String, String>>,
        target_locale: &str,
    ) {
        // Units built for the "other" category, retained so that target-only
        // categories can fold onto them afterwards
        let mut other_units: Vec<TranslationUnit> = Vec::new();

        for (category, text) in source {
            let source_segments = self.segment_string(text, &resource.source_locale);
            let target_segments = target
                .and_then(|t| t.get(category))
                .map(|t| self.segment_string(t, target_locale))
                .unwrap_or_default();

            for (i, segment) in source_segments.iter().enumerate() {
                let mut unit = self.new_unit(resource, segment);
                unit.add_variant(Variant::new(&resource.source_locale, segment));
                if let Some(translated) = target_segments.get(i) {
                    unit.add_variant(Variant::new(target_locale, translated));
                }
                if category == "other" {
                    other_units.push(unit.clone());
                }
                self.add_translation_unit(unit);
            }
        }

        // Target plural forms unrepresented in the source language fold onto
        // the "other"-category units by segment index instead of becoming
        // orphan units
        let Some(target) = target else {
            return;
        };

        for (category, text) in target {
            if source.contains_key(category) {
                continue;
            }

            let segments = self.segment_string(text, target_locale);
            for (i, segment) in segments.iter().enumerate() {
                let Some(base) = other_units.get(i) else {
                    trace!(
                        "no \"other\" unit at segment {} for extra plural category {}",
                        i, category
                    );
                    continue;
                };

                let mut unit =
                    TranslationUnit::new(&base.source_locale, &base.source, &base.datatype);
                unit.properties = base.properties.clone();
                unit.add_variant(Variant::new(target_locale, segment));
                self.add_translation_unit(unit);
            }
        }
    }

    fn new_unit(&self, resource: &Resource, segment: &str) -> TranslationUnit {
        let datatype = resource
            .datatype
            .clone()
            .unwrap_or_else(|| self.datatype().to_string());

        let mut unit = TranslationUnit::new(&resource.source_locale, segment, &datatype);
        if let Some(context) = &resource.context {
            unit.set_property("x-context", context);
        }
        if let Some(flavor) = &resource.flavor {
            unit.set_property("x-flavor", flavor);
        }
        if let Some(project) = &resource.project {
            unit.set_property("x-project", project);
        }
        unit.comment = resource.comment.clone();
        unit
    }
}
