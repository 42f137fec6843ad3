/*!
 * Translation memory exchange (TMX) document model.
 *
 * The module is organized around the `Document` aggregate:
 * - `model`: translation units and variants with content-addressed identity
 * - `document`: the aggregate itself, unit list plus key index
 * - `resource`: ingestion of string/array/plural resources into units
 * - `serialize`: the TMX 1.4 wire codec
 * - `diff`: one-directional additive comparison
 * - `merge`: multi-way union with first-seen-wins reconciliation
 */

pub mod model;
pub mod document;
pub mod resource;
pub mod serialize;
pub mod diff;
pub mod merge;

pub use document::Document;
pub use model::{TranslationUnit, Variant};
pub use resource::{Resource, ResourceContent};
pub use diff::variant_diff;
pub use merge::merge_variants;
