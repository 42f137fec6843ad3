/*!
 * Multi-way merge of translation memory documents.
 *
 * Merging unions unit identity keys across all inputs and reconciles
 * variants per unit by locale: a locale already represented on the left
 * side keeps its content, so first-seen content always wins on collision
 * and no duplicate translations accumulate.
 */

use std::collections::HashSet;

use crate::tmx::document::Document;
use crate::tmx::model::TranslationUnit;

/// Append to `left` every variant of `right` whose locale it lacks.
///
/// Existing variant content on a locale collision is never overwritten:
/// merging a different translation for an already-covered locale is a no-op.
pub fn merge_variants(left: &mut TranslationUnit, right: &TranslationUnit) {
    let mut locales: HashSet<String> =
        left.variants.iter().map(|v| v.locale.clone()).collect();

    for variant in &right.variants {
        if locales.insert(variant.locale.clone()) {
            left.variants.push(variant.clone());
        }
    }
}

impl Document {
    /// Merge this document with any number of others into a new document.
    ///
    /// With no others, the result is a plain copy of this document.
    /// Otherwise the result is seeded with this document's units; each unit
    /// of each other document then either merges its variants into the
    /// existing unit of equal key or is inserted fresh. The net effect is a
    /// union of unit keys with per-unit, per-locale variant reconciliation.
    pub fn merge(&self, others: &[&Document]) -> Document {
        if others.is_empty() {
            return self.clone();
        }

        let mut result = self.clone();

        for other in others {
            for unit in other.get_translation_units() {
                match result.unit_index.get(&unit.key()) {
                    Some(&pos) => merge_variants(&mut result.units[pos], unit),
                    None => result.add_translation_unit(unit.clone()),
                }
            }
        }

        result
    }
}
