//! Product item composition.
//!
//! Item create/update are composite writes: each one is an explicit,
//! strictly ordered sequence of store steps, and the stage reached is
//! carried inside the failure kind. The update path is deliberately NOT
//! transactional end-to-end: stock/price/configuration changes commit
//! before the image step runs, and an image failure does not undo them.

use crate::assets::{item_image_name, product_folder, AssetStore};
use crate::category::store_error;
use crate::options::OptionResolver;
use std::sync::Arc;
use tracing::{debug, warn};
use velo_commerce::catalog::{ItemDraft, ItemPatch, ProductItem};
use velo_commerce::error::{CatalogError, WriteStage};
use velo_commerce::ids::{ProductId, ProductItemId};
use velo_db::{CatalogStore, StoreError};

/// Creates and replaces product items together with their full
/// variation-option configuration sets.
pub struct ProductItemComposer {
    store: Arc<dyn CatalogStore>,
    assets: Arc<dyn AssetStore>,
    resolver: OptionResolver,
}

impl ProductItemComposer {
    pub fn new(store: Arc<dyn CatalogStore>, assets: Arc<dyn AssetStore>) -> Self {
        let resolver = OptionResolver::new(store.clone());
        Self {
            store,
            assets,
            resolver,
        }
    }

    /// Create an item with stock, price, image, and configuration set.
    ///
    /// Ordered stages: validate, resolve options, write the item row with
    /// its links (one composite store write), then the image step. A row
    /// failure stops everything; an image failure after the row committed
    /// surfaces as a create failure at the image stage with the row left
    /// in place.
    pub async fn create(
        &self,
        product_id: ProductId,
        draft: ItemDraft,
    ) -> Result<ProductItem, CatalogError> {
        draft.validate()?;

        let option_ids = self
            .resolver
            .resolve(&draft.configurations)
            .await
            .map_err(stage_create(WriteStage::OptionResolution))?;

        let item = self
            .store
            .insert_item(product_id, draft.qty_in_stock, draft.price_cents, &option_ids)
            .await
            .map_err(|e| CatalogError::create_failed(WriteStage::ItemRow, e.to_string()))?;
        debug!(item = %item.id, product = %product_id, links = option_ids.len(), "created item row");

        self.attach_image(&item, &draft.image_url).await.map_err(|e| {
            warn!(item = %item.id, error = %e, "image step failed; item row remains");
            CatalogError::create_failed(WriteStage::ImageUpload, e.to_string())
        })
    }

    /// Update an item's stock, price, configuration set, and image.
    ///
    /// A non-empty configuration set fully replaces the item's links: one
    /// store step updates stock/price and bulk-deletes the existing links,
    /// a second resolves and attaches the new set. The split is deliberate:
    /// options created during resolution must be visible before the link
    /// write. An empty set updates stock/price only and leaves links
    /// untouched. The image is replaced last, and only when the supplied
    /// source is non-empty and differs from the stored reference.
    pub async fn update(
        &self,
        item_id: ProductItemId,
        patch: ItemPatch,
    ) -> Result<ProductItem, CatalogError> {
        patch.validate()?;

        let current = self
            .store
            .item(item_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CatalogError::not_found("Product item not found"))?;

        let item = if patch.replaces_configurations() {
            let cleared = self
                .store
                .update_item_clearing_links(item_id, patch.qty_in_stock, patch.price_cents)
                .await
                .map_err(update_row_error)?;
            debug!(item = %cleared.id, "cleared configuration links");

            let option_ids = self
                .resolver
                .resolve(&patch.configurations)
                .await
                .map_err(stage_update(WriteStage::OptionResolution))?;

            self.store
                .attach_item_links(item_id, &option_ids)
                .await
                .map_err(|e| {
                    CatalogError::update_failed(WriteStage::ConfigurationLinks, e.to_string())
                })?
        } else {
            self.store
                .update_item_fields(item_id, patch.qty_in_stock, patch.price_cents)
                .await
                .map_err(update_row_error)?
        };

        match patch.image_url.as_deref() {
            Some(source) if !source.is_empty() && source != current.image_url => {
                self.attach_image(&item, source).await.map_err(|e| {
                    warn!(
                        item = %item.id,
                        error = %e,
                        "image step failed; stock/price/configuration changes are committed"
                    );
                    CatalogError::update_failed(WriteStage::ImageUpload, e.to_string())
                })
            }
            _ => Ok(item),
        }
    }

    /// Look up an item with its configuration links populated.
    pub async fn get(&self, item_id: ProductItemId) -> Result<ProductItem, CatalogError> {
        self.store
            .item(item_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CatalogError::not_found("Product item not found"))
    }

    /// Replace an item's image on its own: upload under the product's
    /// folder with the item's deterministic name, then write the reference.
    pub async fn update_image(
        &self,
        item_id: ProductItemId,
        source_url: &str,
    ) -> Result<ProductItem, CatalogError> {
        let item = self
            .store
            .item(item_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CatalogError::not_found("Product item not found"))?;
        self.attach_image(&item, source_url).await
    }

    /// The image coordination step: upload, then write the returned
    /// reference to the item row. An upload failure means the row was not
    /// touched by this step.
    async fn attach_image(
        &self,
        item: &ProductItem,
        source_url: &str,
    ) -> Result<ProductItem, CatalogError> {
        let reference = self
            .assets
            .upload(
                source_url,
                &product_folder(item.product_id),
                &item_image_name(item.id),
            )
            .await
            .map_err(|e| CatalogError::AssetUploadFailed(e.to_string()))?;
        self.store
            .set_item_image(item.id, &reference)
            .await
            .map_err(store_error)
    }
}

fn update_row_error(e: StoreError) -> CatalogError {
    match e {
        StoreError::NotFound => CatalogError::not_found("Product item not found"),
        other => CatalogError::update_failed(WriteStage::ItemRow, other.to_string()),
    }
}

fn stage_create(stage: WriteStage) -> impl Fn(CatalogError) -> CatalogError {
    move |e| match e {
        CatalogError::Store(msg) => CatalogError::create_failed(stage, msg),
        other => other,
    }
}

fn stage_update(stage: WriteStage) -> impl Fn(CatalogError) -> CatalogError {
    move |e| match e {
        CatalogError::Store(msg) => CatalogError::update_failed(stage, msg),
        other => other,
    }
}
