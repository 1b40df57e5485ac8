//! Test doubles shared by the engine integration suites.
#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use velo_catalog::assets::{AssetError, AssetStore};
use velo_commerce::catalog::{
    Category, CategoryDraft, OptionDescriptor, ProductItem, Variation, VariationDraft,
    VariationOption,
};
use velo_commerce::ids::{CategoryId, OptionId, ProductId, ProductItemId, VariationId};
use velo_db::{CatalogStore, MemoryStore, StoreError};

/// Records every upload and answers with a deterministic reference, or
/// fails while the failure flag is set.
#[derive(Default)]
pub struct RecordingAssets {
    pub uploads: Mutex<Vec<(String, String, String)>>,
    fail: AtomicBool,
}

impl RecordingAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl AssetStore for RecordingAssets {
    async fn upload(
        &self,
        source_url: &str,
        folder: &str,
        name: &str,
    ) -> Result<String, AssetError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AssetError::Transfer("injected transfer failure".into()));
        }
        self.uploads.lock().unwrap().push((
            source_url.to_string(),
            folder.to_string(),
            name.to_string(),
        ));
        Ok(format!("cdn://{folder}/{name}"))
    }
}

/// Store wrapper that injects failures into selected write methods while
/// delegating everything else to a real in-memory store.
pub struct FlakyStore {
    pub inner: Arc<MemoryStore>,
    pub fail_category_tree: AtomicBool,
    pub fail_attach_links: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_category_tree: AtomicBool::new(false),
            fail_attach_links: AtomicBool::new(false),
        }
    }

    fn injected() -> StoreError {
        StoreError::Unavailable("injected write failure".into())
    }
}

#[async_trait]
impl CatalogStore for FlakyStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        self.inner.categories().await
    }

    async fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        self.inner.category(id).await
    }

    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, StoreError> {
        self.inner.insert_category(draft).await
    }

    async fn insert_category_tree(
        &self,
        draft: &CategoryDraft,
        variations: &[VariationDraft],
    ) -> Result<Category, StoreError> {
        if self.fail_category_tree.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.insert_category_tree(draft, variations).await
    }

    async fn update_category(
        &self,
        id: CategoryId,
        name: Option<&str>,
        icon_url: Option<&str>,
    ) -> Result<Category, StoreError> {
        self.inner.update_category(id, name, icon_url).await
    }

    async fn delete_category(&self, id: CategoryId) -> Result<Category, StoreError> {
        self.inner.delete_category(id).await
    }

    async fn insert_variation(
        &self,
        name: &str,
        category_id: CategoryId,
    ) -> Result<Variation, StoreError> {
        self.inner.insert_variation(name, category_id).await
    }

    async fn variations_of(&self, category_id: CategoryId) -> Result<Vec<Variation>, StoreError> {
        self.inner.variations_of(category_id).await
    }

    async fn variation(&self, id: VariationId) -> Result<Option<Variation>, StoreError> {
        self.inner.variation(id).await
    }

    async fn get_or_create_option(
        &self,
        descriptor: &OptionDescriptor,
    ) -> Result<VariationOption, StoreError> {
        self.inner.get_or_create_option(descriptor).await
    }

    async fn insert_item(
        &self,
        product_id: ProductId,
        qty_in_stock: i64,
        price_cents: i64,
        option_ids: &[OptionId],
    ) -> Result<ProductItem, StoreError> {
        self.inner
            .insert_item(product_id, qty_in_stock, price_cents, option_ids)
            .await
    }

    async fn item(&self, id: ProductItemId) -> Result<Option<ProductItem>, StoreError> {
        self.inner.item(id).await
    }

    async fn update_item_fields(
        &self,
        id: ProductItemId,
        qty_in_stock: i64,
        price_cents: i64,
    ) -> Result<ProductItem, StoreError> {
        self.inner
            .update_item_fields(id, qty_in_stock, price_cents)
            .await
    }

    async fn update_item_clearing_links(
        &self,
        id: ProductItemId,
        qty_in_stock: i64,
        price_cents: i64,
    ) -> Result<ProductItem, StoreError> {
        self.inner
            .update_item_clearing_links(id, qty_in_stock, price_cents)
            .await
    }

    async fn attach_item_links(
        &self,
        id: ProductItemId,
        option_ids: &[OptionId],
    ) -> Result<ProductItem, StoreError> {
        if self.fail_attach_links.load(Ordering::SeqCst) {
            return Err(Self::injected());
        }
        self.inner.attach_item_links(id, option_ids).await
    }

    async fn set_item_image(
        &self,
        id: ProductItemId,
        image_url: &str,
    ) -> Result<ProductItem, StoreError> {
        self.inner.set_item_image(id, image_url).await
    }
}
