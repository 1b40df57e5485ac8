//! In-memory reference implementation of the catalog store.

use crate::{CatalogStore, StoreError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use velo_commerce::catalog::{
    Category, CategoryDraft, OptionDescriptor, ProductConfiguration, ProductItem, Variation,
    VariationDraft, VariationOption,
};
use velo_commerce::ids::{CategoryId, OptionId, ProductId, ProductItemId, VariationId};

/// Map-backed catalog store.
///
/// Every trait method runs under one lock, which makes each call an atomic
/// unit the same way a transaction would in the relational store this
/// stands in for. Keys are generated from per-entity sequences; option keys
/// are caller-supplied and unique by map construction.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    categories: BTreeMap<i64, Category>,
    variations: BTreeMap<i64, Variation>,
    options: BTreeMap<i64, VariationOption>,
    items: BTreeMap<i64, ProductItem>,
    links: Vec<ProductConfiguration>,
    next_category: i64,
    next_variation: i64,
    next_item: i64,
}

fn now() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A poisoned lock still holds consistent data; keep serving it.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl State {
    fn item_with_links(&self, id: i64) -> Option<ProductItem> {
        let mut item = self.items.get(&id).cloned()?;
        item.configurations = self
            .links
            .iter()
            .filter(|link| link.product_item_id.get() == id)
            .copied()
            .collect();
        Some(item)
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        Ok(self.lock().categories.values().cloned().collect())
    }

    async fn category(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        Ok(self.lock().categories.get(&id.get()).cloned())
    }

    async fn insert_category(&self, draft: &CategoryDraft) -> Result<Category, StoreError> {
        let mut state = self.lock();
        state.next_category += 1;
        let category = Category::from_draft(CategoryId::new(state.next_category), draft);
        state.categories.insert(category.id.get(), category.clone());
        Ok(category)
    }

    async fn insert_category_tree(
        &self,
        draft: &CategoryDraft,
        variations: &[VariationDraft],
    ) -> Result<Category, StoreError> {
        // One locked section: the category and its variations land together
        // or not at all.
        let mut state = self.lock();
        state.next_category += 1;
        let category = Category::from_draft(CategoryId::new(state.next_category), draft);
        for variation in variations {
            state.next_variation += 1;
            let row = Variation {
                id: VariationId::new(state.next_variation),
                category_id: category.id,
                name: variation.name.clone(),
            };
            state.variations.insert(row.id.get(), row);
        }
        state.categories.insert(category.id.get(), category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: CategoryId,
        name: Option<&str>,
        icon_url: Option<&str>,
    ) -> Result<Category, StoreError> {
        let mut state = self.lock();
        let category = state
            .categories
            .get_mut(&id.get())
            .ok_or(StoreError::NotFound)?;
        if let Some(name) = name {
            category.name = name.to_string();
        }
        if let Some(icon_url) = icon_url {
            category.icon_url = Some(icon_url.to_string());
        }
        category.updated_at = now();
        Ok(category.clone())
    }

    async fn delete_category(&self, id: CategoryId) -> Result<Category, StoreError> {
        let mut state = self.lock();
        let category = state
            .categories
            .remove(&id.get())
            .ok_or(StoreError::NotFound)?;
        state
            .variations
            .retain(|_, variation| variation.category_id != id);
        Ok(category)
    }

    async fn insert_variation(
        &self,
        name: &str,
        category_id: CategoryId,
    ) -> Result<Variation, StoreError> {
        let mut state = self.lock();
        if !state.categories.contains_key(&category_id.get()) {
            return Err(StoreError::NotFound);
        }
        state.next_variation += 1;
        let variation = Variation {
            id: VariationId::new(state.next_variation),
            category_id,
            name: name.to_string(),
        };
        state.variations.insert(variation.id.get(), variation.clone());
        Ok(variation)
    }

    async fn variations_of(&self, category_id: CategoryId) -> Result<Vec<Variation>, StoreError> {
        Ok(self
            .lock()
            .variations
            .values()
            .filter(|variation| variation.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn variation(&self, id: VariationId) -> Result<Option<Variation>, StoreError> {
        Ok(self.lock().variations.get(&id.get()).cloned())
    }

    async fn get_or_create_option(
        &self,
        descriptor: &OptionDescriptor,
    ) -> Result<VariationOption, StoreError> {
        let mut state = self.lock();
        if let Some(existing) = state.options.get(&descriptor.id.get()) {
            // Reuse as-is; a differing descriptor value never rewrites the row.
            return Ok(existing.clone());
        }
        if !state.variations.contains_key(&descriptor.variation_id.get()) {
            return Err(StoreError::Constraint(format!(
                "variation {} does not exist",
                descriptor.variation_id
            )));
        }
        let option = VariationOption {
            id: descriptor.id,
            variation_id: descriptor.variation_id,
            value: descriptor.value.clone(),
        };
        state.options.insert(option.id.get(), option.clone());
        Ok(option)
    }

    async fn insert_item(
        &self,
        product_id: ProductId,
        qty_in_stock: i64,
        price_cents: i64,
        option_ids: &[OptionId],
    ) -> Result<ProductItem, StoreError> {
        let mut state = self.lock();
        for option_id in option_ids {
            if !state.options.contains_key(&option_id.get()) {
                return Err(StoreError::Constraint(format!(
                    "option {option_id} does not exist"
                )));
            }
        }
        state.next_item += 1;
        let item = ProductItem::new(
            ProductItemId::new(state.next_item),
            product_id,
            qty_in_stock,
            price_cents,
        );
        state.items.insert(item.id.get(), item.clone());
        for option_id in option_ids {
            state.links.push(ProductConfiguration {
                product_item_id: item.id,
                option_id: *option_id,
            });
        }
        state
            .item_with_links(item.id.get())
            .ok_or(StoreError::NotFound)
    }

    async fn item(&self, id: ProductItemId) -> Result<Option<ProductItem>, StoreError> {
        Ok(self.lock().item_with_links(id.get()))
    }

    async fn update_item_fields(
        &self,
        id: ProductItemId,
        qty_in_stock: i64,
        price_cents: i64,
    ) -> Result<ProductItem, StoreError> {
        let mut state = self.lock();
        let item = state.items.get_mut(&id.get()).ok_or(StoreError::NotFound)?;
        item.qty_in_stock = qty_in_stock;
        item.price_cents = price_cents;
        item.updated_at = now();
        state.item_with_links(id.get()).ok_or(StoreError::NotFound)
    }

    async fn update_item_clearing_links(
        &self,
        id: ProductItemId,
        qty_in_stock: i64,
        price_cents: i64,
    ) -> Result<ProductItem, StoreError> {
        let mut state = self.lock();
        let item = state.items.get_mut(&id.get()).ok_or(StoreError::NotFound)?;
        item.qty_in_stock = qty_in_stock;
        item.price_cents = price_cents;
        item.updated_at = now();
        state.links.retain(|link| link.product_item_id != id);
        state.item_with_links(id.get()).ok_or(StoreError::NotFound)
    }

    async fn attach_item_links(
        &self,
        id: ProductItemId,
        option_ids: &[OptionId],
    ) -> Result<ProductItem, StoreError> {
        let mut state = self.lock();
        if !state.items.contains_key(&id.get()) {
            return Err(StoreError::NotFound);
        }
        for option_id in option_ids {
            if !state.options.contains_key(&option_id.get()) {
                return Err(StoreError::Constraint(format!(
                    "option {option_id} does not exist"
                )));
            }
        }
        for option_id in option_ids {
            state.links.push(ProductConfiguration {
                product_item_id: id,
                option_id: *option_id,
            });
        }
        state.item_with_links(id.get()).ok_or(StoreError::NotFound)
    }

    async fn set_item_image(
        &self,
        id: ProductItemId,
        image_url: &str,
    ) -> Result<ProductItem, StoreError> {
        let mut state = self.lock();
        let item = state.items.get_mut(&id.get()).ok_or(StoreError::NotFound)?;
        item.image_url = image_url.to_string();
        item.updated_at = now();
        state.item_with_links(id.get()).ok_or(StoreError::NotFound)
    }
}
