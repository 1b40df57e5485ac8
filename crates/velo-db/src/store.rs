//! The catalog store trait.

use crate::StoreError;
use async_trait::async_trait;
use velo_commerce::catalog::{
    Category, CategoryDraft, OptionDescriptor, ProductItem, Variation, VariationDraft,
    VariationOption,
};
use velo_commerce::ids::{CategoryId, OptionId, ProductId, ProductItemId, VariationId};

/// Entity-scoped access to the catalog's relational store.
///
/// Every method is one atomic unit: composite methods (category tree
/// insert, item insert with links, field update with link clearing) either
/// fully apply or leave the store untouched. Implementations back this with
/// a transaction or equivalent; no application-level locking is expected on
/// top.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // --- categories ---

    /// List all categories.
    async fn categories(&self) -> Result<Vec<Category>, StoreError>;

    /// Look up a category by key.
    async fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Insert a bare category.
    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, StoreError>;

    /// Insert a category together with its variations as one nested
    /// composite write. If any variation fails, the category must not
    /// exist afterwards.
    async fn insert_category_tree(
        &self,
        draft: &CategoryDraft,
        variations: &[VariationDraft],
    ) -> Result<Category, StoreError>;

    /// Update a category's name and/or icon reference.
    async fn update_category(
        &self,
        id: CategoryId,
        name: Option<&str>,
        icon_url: Option<&str>,
    ) -> Result<Category, StoreError>;

    /// Delete a category and return the deleted snapshot. Variations owned
    /// by the category are dropped with it.
    async fn delete_category(&self, id: CategoryId) -> Result<Category, StoreError>;

    // --- variations ---

    /// Insert a variation under an existing category. Fails with
    /// [`StoreError::NotFound`] if the category is absent.
    async fn insert_variation(
        &self,
        name: &str,
        category_id: CategoryId,
    ) -> Result<Variation, StoreError>;

    /// List the variations owned by a category.
    async fn variations_of(&self, category_id: CategoryId) -> Result<Vec<Variation>, StoreError>;

    /// Look up a variation by key.
    async fn variation(&self, id: VariationId) -> Result<Option<Variation>, StoreError>;

    // --- variation options ---

    /// Connect-or-create keyed by the caller-supplied option identity.
    ///
    /// If an option with the descriptor's key exists it is returned as-is,
    /// including its stored value; otherwise the option is created from the
    /// descriptor. One atomic unit, so concurrent callers resolving the
    /// same key cannot race into duplicate rows.
    async fn get_or_create_option(
        &self,
        descriptor: &OptionDescriptor,
    ) -> Result<VariationOption, StoreError>;

    // --- product items ---

    /// Insert an item row (empty image reference) together with its
    /// configuration links in one composite write.
    async fn insert_item(
        &self,
        product_id: ProductId,
        qty_in_stock: i64,
        price_cents: i64,
        option_ids: &[OptionId],
    ) -> Result<ProductItem, StoreError>;

    /// Look up an item with its configuration links populated.
    async fn item(&self, id: ProductItemId) -> Result<Option<ProductItem>, StoreError>;

    /// Update stock and price, leaving configuration links untouched.
    async fn update_item_fields(
        &self,
        id: ProductItemId,
        qty_in_stock: i64,
        price_cents: i64,
    ) -> Result<ProductItem, StoreError>;

    /// Update stock and price AND bulk-delete all configuration links for
    /// the item, as one unit. The replacement links are attached separately
    /// via [`CatalogStore::attach_item_links`] so that options created by
    /// resolution are visible before the link write.
    async fn update_item_clearing_links(
        &self,
        id: ProductItemId,
        qty_in_stock: i64,
        price_cents: i64,
    ) -> Result<ProductItem, StoreError>;

    /// Attach configuration links to an item. Fails with
    /// [`StoreError::Constraint`] if an option key does not exist.
    async fn attach_item_links(
        &self,
        id: ProductItemId,
        option_ids: &[OptionId],
    ) -> Result<ProductItem, StoreError>;

    /// Write an item's image reference.
    async fn set_item_image(
        &self,
        id: ProductItemId,
        image_url: &str,
    ) -> Result<ProductItem, StoreError>;
}
