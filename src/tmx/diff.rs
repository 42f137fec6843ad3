/*!
 * One-directional diff between translation memory documents.
 *
 * The diff answers "what is new or changed in `other` relative to `self`",
 * never "what was removed": deletions are not representable. Because variant
 * identity covers both locale and string, a changed translation surfaces as
 * an added variant, not a replacement.
 */

use crate::tmx::document::Document;
use crate::tmx::model::{TranslationUnit, Variant};

/// Every variant of `b` whose identity key is absent from `a`.
///
/// Additions and content changes only; a variant present in `a` but missing
/// from `b` is never reported.
pub fn variant_diff(a: &TranslationUnit, b: &TranslationUnit) -> Vec<Variant> {
    let known = a.variant_keys();
    b.variants
        .iter()
        .filter(|v| !known.contains(&v.key()))
        .cloned()
        .collect()
}

impl Document {
    /// Produce a document containing what is new or changed in `other`
    /// relative to this document.
    ///
    /// The result carries this document's locale, version, segmentation and
    /// creation tool settings. Units of `other` missing here are copied
    /// wholesale; units present in both with a non-empty variant diff yield
    /// a fresh unit holding `other`'s fields, the mandatory source variant
    /// and the diffed variants. Units identical in both are omitted. This
    /// operation is asymmetric and non-commutative by design.
    pub fn diff(&self, other: &Document) -> Document {
        let mut result = self.clone();
        result.clear_units();
        result.path = None;

        for unit in other.get_translation_units() {
            let key = unit.key();

            let Some(existing) = self.get_translation_unit(&key) else {
                result.add_translation_unit(unit.clone());
                continue;
            };

            let added = variant_diff(existing, unit);
            if added.is_empty() {
                continue;
            }

            let mut diff_unit =
                TranslationUnit::new(&unit.source_locale, &unit.source, &unit.datatype);
            diff_unit.properties = unit.properties.clone();
            diff_unit.comment = unit.comment.clone();
            diff_unit.pre = unit.pre.clone();
            diff_unit.post = unit.post.clone();
            diff_unit.add_variant(Variant::new(&unit.source_locale, &unit.source));
            diff_unit.add_variants(added);
            result.add_translation_unit(diff_unit);
        }

        result
    }
}
