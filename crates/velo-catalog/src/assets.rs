//! Asset store seam and deterministic asset naming.
//!
//! The engine never talks to the asset backend directly; it uploads through
//! [`AssetStore`] and writes the returned opaque reference into the owning
//! entity's image field. An upload failure is surfaced, never swallowed,
//! and never retried within the same request — and it always means the
//! owning entity was NOT updated by that step.

use async_trait::async_trait;
use thiserror::Error;
use velo_commerce::ids::{CategoryId, ProductId, ProductItemId};

/// Errors from the external asset transfer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// The transfer itself failed (network, backend rejection).
    #[error("asset transfer failed: {0}")]
    Transfer(String),
}

/// External asset storage collaborator.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Upload the content behind `source_url` under `folder/name` and
    /// return an opaque reference string.
    async fn upload(&self, source_url: &str, folder: &str, name: &str)
        -> Result<String, AssetError>;
}

/// Folder for category icons.
pub fn category_folder() -> String {
    "categories".to_string()
}

/// Folder for a product's item images.
pub fn product_folder(product_id: ProductId) -> String {
    format!("products/{product_id}")
}

/// Deterministic asset name for a category's icon.
pub fn category_icon_name(id: CategoryId) -> String {
    format!("ic-category-{id}")
}

/// Deterministic asset name for a product item's image.
pub fn item_image_name(id: ProductItemId) -> String {
    format!("item-{id}")
}
