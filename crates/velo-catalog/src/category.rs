//! Category composition.

use crate::assets::{category_folder, category_icon_name, AssetStore};
use std::sync::Arc;
use tracing::{debug, warn};
use velo_commerce::catalog::{Category, CategoryDraft, CategoryList, CategoryPatch, VariationDraft};
use velo_commerce::error::{CatalogError, WriteStage};
use velo_commerce::ids::CategoryId;
use velo_db::{CatalogStore, StoreError};

/// Creates and mutates categories, optionally together with their nested
/// variation tree.
pub struct CategoryComposer {
    store: Arc<dyn CatalogStore>,
    assets: Arc<dyn AssetStore>,
}

impl CategoryComposer {
    pub fn new(store: Arc<dyn CatalogStore>, assets: Arc<dyn AssetStore>) -> Self {
        Self { store, assets }
    }

    /// Create a bare category.
    pub async fn create(&self, draft: CategoryDraft) -> Result<Category, CatalogError> {
        draft.validate()?;
        let category = self
            .store
            .insert_category(&draft)
            .await
            .map_err(|e| CatalogError::create_failed(WriteStage::CategoryRow, e.to_string()))?;
        debug!(category = %category.id, "created category");
        Ok(category)
    }

    /// Create a category together with its variations as one unit.
    ///
    /// An empty variation list degrades to [`CategoryComposer::create`].
    /// Otherwise the category and every listed variation land in a single
    /// composite store write: if any variation fails, no category exists
    /// afterwards.
    pub async fn create_with_variations(
        &self,
        draft: CategoryDraft,
        variations: Vec<VariationDraft>,
    ) -> Result<Category, CatalogError> {
        if variations.is_empty() {
            return self.create(draft).await;
        }
        draft.validate()?;
        for variation in &variations {
            variation.validate()?;
        }
        let category = self
            .store
            .insert_category_tree(&draft, &variations)
            .await
            .map_err(|e| CatalogError::create_failed(WriteStage::CategoryRow, e.to_string()))?;
        debug!(
            category = %category.id,
            variations = variations.len(),
            "created category with variation tree"
        );
        Ok(category)
    }

    /// Update a category's name and/or icon.
    ///
    /// A supplied icon source is persisted through the asset store first,
    /// keyed by the deterministic icon name for this category; only the
    /// resulting reference is written to the row. An upload failure leaves
    /// the row unchanged.
    pub async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Category, CatalogError> {
        patch.validate()?;
        if self.store.category(id).await.map_err(store_error)?.is_none() {
            return Err(CatalogError::not_found("Category not found"));
        }

        let icon_ref = match patch.icon_url.as_deref() {
            Some(source) => Some(
                self.assets
                    .upload(source, &category_folder(), &category_icon_name(id))
                    .await
                    .map_err(|e| {
                        warn!(category = %id, error = %e, "category icon upload failed");
                        CatalogError::AssetUploadFailed(e.to_string())
                    })?,
            ),
            None => None,
        };

        self.store
            .update_category(id, patch.name.as_deref(), icon_ref.as_deref())
            .await
            .map_err(|e| match e {
                StoreError::NotFound => CatalogError::not_found("Category not found"),
                other => CatalogError::update_failed(WriteStage::CategoryRow, other.to_string()),
            })
    }

    /// Delete a category and return the deleted snapshot.
    pub async fn delete(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.store.delete_category(id).await.map_err(|e| match e {
            StoreError::NotFound => CatalogError::not_found("Category not found"),
            other => CatalogError::update_failed(WriteStage::CategoryRow, other.to_string()),
        })
    }

    /// Look up a category by key.
    pub async fn get(&self, id: CategoryId) -> Result<Category, CatalogError> {
        self.store
            .category(id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CatalogError::not_found("Category not found"))
    }

    /// List all categories.
    pub async fn list(&self) -> Result<CategoryList, CatalogError> {
        let categories = self.store.categories().await.map_err(store_error)?;
        Ok(CategoryList { categories })
    }
}

pub(crate) fn store_error(e: StoreError) -> CatalogError {
    CatalogError::Store(e.to_string())
}
