//! Category tree types: categories, variations, variation options.

use super::current_timestamp;
use crate::error::CatalogError;
use crate::ids::{CategoryId, OptionId, VariationId};
use serde::{Deserialize, Serialize};

/// A top-level catalog grouping of products.
///
/// Owns zero or more [`Variation`]s, which in turn own their options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category key.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Icon reference (opaque asset reference or URL).
    pub icon_url: Option<String>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl Category {
    /// Build a category row from a draft and a store-generated key.
    pub fn from_draft(id: CategoryId, draft: &CategoryDraft) -> Self {
        let now = current_timestamp();
        Self {
            id,
            name: draft.name.clone(),
            icon_url: draft.icon_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether an icon reference is attached.
    pub fn has_icon(&self) -> bool {
        self.icon_url.as_deref().is_some_and(|url| !url.is_empty())
    }
}

/// A named axis of customization within a category (e.g., size).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variation {
    /// Unique variation key.
    pub id: VariationId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Display name.
    pub name: String,
}

/// One concrete value on a variation axis (e.g., "Large").
///
/// The key is caller-supplied, not store-generated: a given key maps
/// permanently to one `(variation_id, value)` pair, and resolution never
/// rewrites a stored value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariationOption {
    /// Caller-supplied key.
    pub id: OptionId,
    /// Owning variation axis.
    pub variation_id: VariationId,
    /// The concrete value.
    pub value: String,
}

/// Request payload for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDraft {
    /// Display name; must be non-empty.
    pub name: String,
    /// Optional icon reference.
    pub icon_url: Option<String>,
}

impl CategoryDraft {
    /// Create a draft with a name and no icon.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_url: None,
        }
    }

    /// Attach an icon reference.
    pub fn with_icon(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    /// Reject an empty display name before anything is written.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::bad_request("category name must not be empty"));
        }
        Ok(())
    }
}

/// Request payload for creating a variation under a category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VariationDraft {
    /// Display name; must be non-empty.
    pub name: String,
}

impl VariationDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::bad_request(
                "variation name must not be empty",
            ));
        }
        Ok(())
    }
}

/// Tagged update request for a category.
///
/// Both fields are optional, but the all-absent patch is rejected up front
/// rather than branching on field presence deep in the update path.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryPatch {
    /// New display name, if changing.
    pub name: Option<String>,
    /// New icon source, if changing. Goes through the asset store before
    /// the category row is touched.
    pub icon_url: Option<String>,
}

impl CategoryPatch {
    /// Reject patches that would change nothing, or set an empty name.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.is_none() && self.icon_url.is_none() {
            return Err(CatalogError::bad_request(
                "category update requires a name or an icon",
            ));
        }
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(CatalogError::bad_request("category name must not be empty"));
        }
        Ok(())
    }
}

/// Response shape for the unrestricted category listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

/// A category with its variations populated: the read-only projection
/// returned when listing variations by category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryVariations {
    pub category: Category,
    pub variations: Vec<Variation>,
}
