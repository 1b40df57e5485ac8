//! Catalog entities and request types.
//!
//! Contains the category/variation tree, product items with their
//! configuration sets, and the draft/patch types callers submit.

mod category;
mod item;

pub use category::{
    Category, CategoryDraft, CategoryList, CategoryPatch, CategoryVariations, Variation,
    VariationDraft, VariationOption,
};
pub use item::{ItemDraft, ItemPatch, OptionDescriptor, ProductConfiguration, ProductItem};

/// Get current Unix timestamp.
pub(crate) fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
