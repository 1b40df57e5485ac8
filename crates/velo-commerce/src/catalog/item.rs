//! Product item types and their configuration sets.

use super::current_timestamp;
use crate::error::CatalogError;
use crate::ids::{OptionId, ProductId, ProductItemId, VariationId};
use serde::{Deserialize, Serialize};

/// A sellable unit of a product, with its own stock, price, image, and
/// variation-option configuration set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductItem {
    /// Unique item key.
    pub id: ProductItemId,
    /// Owning product.
    pub product_id: ProductId,
    /// Quantity in stock; never negative.
    pub qty_in_stock: i64,
    /// Price in the smallest currency unit (cents); never negative.
    pub price_cents: i64,
    /// Image reference; empty until the image step has run.
    pub image_url: String,
    /// Configuration links, replaceable only as a whole set.
    pub configurations: Vec<ProductConfiguration>,
    /// Unix timestamp of creation.
    pub created_at: i64,
    /// Unix timestamp of last update.
    pub updated_at: i64,
}

impl ProductItem {
    /// Build an item row from a store-generated key. The image reference
    /// starts empty; the image step fills it in after the row exists.
    pub fn new(id: ProductItemId, product_id: ProductId, qty_in_stock: i64, price_cents: i64) -> Self {
        let now = current_timestamp();
        Self {
            id,
            product_id,
            qty_in_stock,
            price_cents,
            image_url: String::new(),
            configurations: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The option keys currently linked to this item.
    pub fn option_ids(&self) -> Vec<OptionId> {
        self.configurations.iter().map(|c| c.option_id).collect()
    }
}

/// Link between a product item and a chosen variation option.
///
/// Created and deleted only as a byproduct of item configuration
/// replacement, never addressed individually by callers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProductConfiguration {
    pub product_item_id: ProductItemId,
    pub option_id: OptionId,
}

/// A caller-side description of one variation option: a caller-supplied
/// key, the owning variation axis, and the value to use if the option does
/// not exist yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OptionDescriptor {
    /// Caller-supplied option key.
    pub id: OptionId,
    /// Variation axis the option belongs to.
    pub variation_id: VariationId,
    /// Value used only when the option is created; an existing option keeps
    /// its stored value.
    pub value: String,
}

impl OptionDescriptor {
    pub fn new(id: OptionId, variation_id: VariationId, value: impl Into<String>) -> Self {
        Self {
            id,
            variation_id,
            value: value.into(),
        }
    }
}

/// Request payload for creating a product item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDraft {
    pub qty_in_stock: i64,
    pub price_cents: i64,
    /// Source for the image step; required on create.
    pub image_url: String,
    /// Must be non-empty on create.
    pub configurations: Vec<OptionDescriptor>,
}

impl ItemDraft {
    /// Reject invalid drafts before anything is written.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.qty_in_stock < 0 {
            return Err(CatalogError::bad_request("qty_in_stock must not be negative"));
        }
        if self.price_cents < 0 {
            return Err(CatalogError::bad_request("price must not be negative"));
        }
        if self.image_url.is_empty() {
            return Err(CatalogError::bad_request("image_url is required"));
        }
        if self.configurations.is_empty() {
            return Err(CatalogError::bad_request(
                "at least one configuration is required",
            ));
        }
        Ok(())
    }
}

/// Request payload for updating a product item.
///
/// `configurations` is always present: a non-empty set fully replaces the
/// item's links, an empty set leaves them untouched. The image is replaced
/// only when `image_url` is supplied, non-empty, and differs from the
/// stored reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemPatch {
    pub qty_in_stock: i64,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub configurations: Vec<OptionDescriptor>,
}

impl ItemPatch {
    /// Reject invalid patches before anything is written.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.qty_in_stock < 0 {
            return Err(CatalogError::bad_request("qty_in_stock must not be negative"));
        }
        if self.price_cents < 0 {
            return Err(CatalogError::bad_request("price must not be negative"));
        }
        Ok(())
    }

    /// Whether this patch replaces the configuration set.
    pub fn replaces_configurations(&self) -> bool {
        !self.configurations.is_empty()
    }
}
