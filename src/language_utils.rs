use anyhow::{Result, anyhow};
use isolang::Language;

/// Locale utilities for BCP-47 style locale identifiers
///
/// This module provides functions for extracting and validating the
/// language subtag of a locale identifier such as "en-US" or "zh-Hans-CN",
/// and for normalizing subtag casing.
/// Extract the language subtag of a locale identifier
///
/// "en-US" yields "en", "zh-Hans-CN" yields "zh", "de" yields "de".
/// The subtag is lowercased; no validation is performed here.
pub fn language_subtag(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .trim()
        .to_lowercase()
}

/// Validate that a locale's language subtag is a known ISO 639 code
pub fn validate_language_subtag(locale: &str) -> Result<()> {
    let subtag = language_subtag(locale);

    let known = match subtag.len() {
        2 => Language::from_639_1(&subtag).is_some(),
        3 => Language::from_639_3(&subtag).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid language subtag in locale: {}", locale))
    }
}

/// Normalize locale subtag casing: language lowercase, region uppercase,
/// script title case. Unknown subtag shapes are passed through lowercased.
pub fn normalize_locale(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .enumerate()
        .map(|(i, subtag)| {
            if i == 0 {
                subtag.to_lowercase()
            } else if subtag.len() == 2 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                subtag.to_uppercase()
            } else if subtag.len() == 4 && subtag.chars().all(|c| c.is_ascii_alphabetic()) {
                let mut chars = subtag.chars();
                let first = chars.next().map(|c| c.to_ascii_uppercase()).unwrap_or_default();
                format!("{}{}", first, chars.as_str().to_lowercase())
            } else {
                subtag.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Check if two locales share the same language subtag
pub fn languages_match(locale1: &str, locale2: &str) -> bool {
    language_subtag(locale1) == language_subtag(locale2)
}

/// Get the English language name for a locale's language subtag
pub fn get_language_name(locale: &str) -> Result<String> {
    let subtag = language_subtag(locale);

    let lang = match subtag.len() {
        2 => Language::from_639_1(&subtag),
        3 => Language::from_639_3(&subtag),
        _ => None,
    };

    lang.map(|l| l.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from locale: {}", locale))
}
