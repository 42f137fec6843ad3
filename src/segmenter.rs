use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ResourceError;
use crate::language_utils;

// @module: Locale-aware string segmentation

// @const: Sentence boundary regex
// Latin scripts require trailing whitespace after the terminator so decimal
// points and ellipses inside a sentence are not boundaries; CJK full-width
// terminators need no whitespace.
static SENTENCE_BOUNDARY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?:[.!?…]+["'”’)\]]*\s+)|(?:[。！？]+)"#).unwrap()
});

// @const: Per-language abbreviation suppression sets
// Tokens that end with a period but never terminate a sentence, keyed by
// ISO 639-1 language subtag. Languages without an entry use an empty set.
static SUPPRESSIONS: Lazy<HashMap<&'static str, HashSet<&'static str>>> = Lazy::new(|| {
    let mut map = HashMap::new();
    map.insert("en", HashSet::from([
        "Mr.", "Mrs.", "Ms.", "Dr.", "Prof.", "St.", "Jr.", "Sr.",
        "vs.", "etc.", "e.g.", "i.e.", "cf.", "al.", "Inc.", "Ltd.",
        "Co.", "Corp.", "Ave.", "Blvd.", "No.", "U.S.", "a.m.", "p.m.",
    ]));
    map.insert("de", HashSet::from([
        "z.B.", "bzw.", "usw.", "ggf.", "ca.", "d.h.", "u.a.", "evtl.",
        "Dr.", "Prof.", "Nr.", "Str.", "Abs.", "inkl.", "zzgl.",
    ]));
    map.insert("fr", HashSet::from([
        "M.", "MM.", "Mme.", "Mlle.", "Dr.", "etc.", "p.ex.", "av.",
        "env.", "cf.", "chap.",
    ]));
    map.insert("es", HashSet::from([
        "Sr.", "Sra.", "Srta.", "Dr.", "Dra.", "Ud.", "Uds.", "etc.",
        "pág.", "núm.", "aprox.",
    ]));
    map.insert("it", HashSet::from([
        "Sig.", "Sig.ra", "Dott.", "Prof.", "ecc.", "pag.", "es.",
    ]));
    map
});

/// Segmentation policy of a document
///
/// Paragraph mode keeps each string whole; sentence mode splits strings at
/// locale-aware sentence boundaries before unit creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationMode {
    /// One segment per string
    #[default]
    Paragraph,
    /// One segment per sentence
    Sentence,
}

impl SegmentationMode {
    /// Wire name of the mode, as used by the `segtype` header attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Sentence => "sentence",
        }
    }
}

impl fmt::Display for SegmentationMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentationMode {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paragraph" => Ok(Self::Paragraph),
            "sentence" => Ok(Self::Sentence),
            other => Err(ResourceError::InvalidSegmentation(other.to_string())),
        }
    }
}

/// Split a string into segments according to the given mode
///
/// Empty input yields an empty sequence. Paragraph mode yields the input
/// unchanged as a single segment. Sentence mode splits at sentence
/// boundaries, honoring the suppression set selected by the locale's
/// language subtag, and trims each resulting piece.
pub fn segment(text: &str, locale: &str, mode: SegmentationMode) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    match mode {
        SegmentationMode::Paragraph => vec![text.to_string()],
        SegmentationMode::Sentence => {
            let language = language_subtag(locale);
            split_sentences(text, &language)
        }
    }
}

fn language_subtag(locale: &str) -> String {
    language_utils::language_subtag(locale)
}

fn split_sentences(text: &str, language: &str) -> Vec<String> {
    static EMPTY: Lazy<HashSet<&'static str>> = Lazy::new(HashSet::new);
    let suppressions = SUPPRESSIONS.get(language).unwrap_or(&*EMPTY);

    let mut segments = Vec::new();
    let mut start = 0;

    for boundary in SENTENCE_BOUNDARY.find_iter(text) {
        if is_suppressed(&text[..boundary.end()], suppressions) {
            continue;
        }

        segments.push(text[start..boundary.end()].trim().to_string());
        start = boundary.end();
    }

    // Trailing pieces are trimmed but not filtered when empty
    segments.push(text[start..].trim().to_string());
    segments
}

// The token ending at the boundary decides suppression: "Mr. Smith" must
// not split after "Mr." even though the period matched.
fn is_suppressed(head: &str, suppressions: &HashSet<&'static str>) -> bool {
    let trimmed = head.trim_end();
    if !trimmed.ends_with('.') {
        return false;
    }

    match trimmed.split_whitespace().last() {
        Some(token) => suppressions.contains(token),
        None => false,
    }
}
