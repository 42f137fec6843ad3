/*!
 * Core model types for translation memory documents.
 *
 * A translation unit is one source string plus all of its known locale-tagged
 * renderings (variants) and metadata. Units and variants carry a
 * content-addressed identity key derived from their immutable identity
 * fields; "sameness" across add/diff/merge is always decided by that key,
 * never by reference or full structural equality.
 */

use std::collections::BTreeMap;
use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Compute a stable hex key over a sequence of identity fields.
///
/// Fields are length-prefixed before hashing so that concatenation
/// ambiguities ("ab"+"c" vs "a"+"bc") cannot collide.
fn hash_fields(fields: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update((field.len() as u64).to_be_bytes());
        hasher.update(field.as_bytes());
    }
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// One locale-tagged rendering of a translation unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Locale of this rendering
    pub locale: String,

    /// The rendered string
    pub string: String,
}

impl Variant {
    /// Create a new variant
    pub fn new(locale: &str, string: &str) -> Self {
        Variant {
            locale: locale.to_string(),
            string: string.to_string(),
        }
    }

    /// Identity key of this variant.
    ///
    /// Two variants with the same locale but different strings are distinct:
    /// a changed translation surfaces as a new variant, never as an update.
    pub fn key(&self) -> String {
        hash_fields(&[&self.locale, &self.string])
    }
}

/// One source string plus its translations and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationUnit {
    /// Locale of the source string
    pub source_locale: String,

    /// The source string
    pub source: String,

    /// Datatype of the content (e.g. "plaintext", "html")
    pub datatype: String,

    /// Free-form metadata (context, flavor, project tags)
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    /// Translator-facing note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Markup context preceding the string in its original document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,

    /// Markup context following the string in its original document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,

    /// Locale-tagged renderings, in first-seen order
    #[serde(default)]
    pub variants: Vec<Variant>,
}

impl TranslationUnit {
    /// Create a new unit with no variants
    pub fn new(source_locale: &str, source: &str, datatype: &str) -> Self {
        TranslationUnit {
            source_locale: source_locale.to_string(),
            source: source.to_string(),
            datatype: datatype.to_string(),
            properties: BTreeMap::new(),
            comment: None,
            pre: None,
            post: None,
            variants: Vec::new(),
        }
    }

    /// Identity key of this unit, derived from source locale, source string
    /// and datatype. Units with equal keys are the same logical unit.
    pub fn key(&self) -> String {
        hash_fields(&[&self.source_locale, &self.source, &self.datatype])
    }

    /// Set a metadata property
    pub fn set_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    /// Append a variant unless one with the same identity key is already
    /// present. Existing variant content is never replaced.
    pub fn add_variant(&mut self, variant: Variant) {
        let key = variant.key();
        if !self.variants.iter().any(|v| v.key() == key) {
            self.variants.push(variant);
        }
    }

    /// Append every variant whose key is not already present
    pub fn add_variants(&mut self, variants: Vec<Variant>) {
        for variant in variants {
            self.add_variant(variant);
        }
    }

    /// The set of variant identity keys on this unit
    pub fn variant_keys(&self) -> HashSet<String> {
        self.variants.iter().map(|v| v.key()).collect()
    }
}
