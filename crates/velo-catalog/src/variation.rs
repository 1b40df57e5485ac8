//! Variation management scoped to a category.

use crate::category::store_error;
use std::sync::Arc;
use tracing::debug;
use velo_commerce::catalog::{CategoryVariations, Variation, VariationDraft};
use velo_commerce::error::CatalogError;
use velo_commerce::ids::CategoryId;
use velo_db::{CatalogStore, StoreError};

/// Creates and lists variations under an existing category.
pub struct VariationManager {
    store: Arc<dyn CatalogStore>,
}

impl VariationManager {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Create a single variation under a category. The category must exist;
    /// nothing is created implicitly.
    pub async fn create(
        &self,
        draft: VariationDraft,
        category_id: CategoryId,
    ) -> Result<Variation, CatalogError> {
        draft.validate()?;
        let variation = self
            .store
            .insert_variation(&draft.name, category_id)
            .await
            .map_err(|e| match e {
                StoreError::NotFound => CatalogError::not_found("Category not found"),
                other => store_error(other),
            })?;
        debug!(variation = %variation.id, category = %category_id, "created variation");
        Ok(variation)
    }

    /// Read-only projection: the category with its variations populated.
    pub async fn list_by_category(
        &self,
        category_id: CategoryId,
    ) -> Result<CategoryVariations, CatalogError> {
        let category = self
            .store
            .category(category_id)
            .await
            .map_err(store_error)?
            .ok_or_else(|| CatalogError::not_found("Category not found"))?;
        let variations = self
            .store
            .variations_of(category_id)
            .await
            .map_err(store_error)?;
        Ok(CategoryVariations {
            category,
            variations,
        })
    }
}
