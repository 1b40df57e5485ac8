//! Product item composition flows against the in-memory store.

mod support;

use std::sync::Arc;
use support::{FlakyStore, RecordingAssets};
use velo_catalog::{CategoryComposer, OptionResolver, ProductItemComposer, VariationManager};
use velo_commerce::catalog::{
    CategoryDraft, ItemDraft, ItemPatch, OptionDescriptor, VariationDraft,
};
use velo_commerce::error::{CatalogError, WriteStage};
use velo_commerce::ids::{OptionId, ProductId, ProductItemId, VariationId};
use velo_db::{CatalogStore, MemoryStore};

struct Fixture {
    store: Arc<MemoryStore>,
    assets: Arc<RecordingAssets>,
    items: ProductItemComposer,
    size: VariationId,
    color: VariationId,
}

/// Seed a category with Size and Color variations.
async fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let assets = Arc::new(RecordingAssets::new());
    let categories = CategoryComposer::new(store.clone(), assets.clone());
    let variations = VariationManager::new(store.clone());

    let category = categories.create(CategoryDraft::new("Shirts")).await.unwrap();
    let size = variations
        .create(VariationDraft::new("Size"), category.id)
        .await
        .unwrap();
    let color = variations
        .create(VariationDraft::new("Color"), category.id)
        .await
        .unwrap();

    Fixture {
        items: ProductItemComposer::new(store.clone(), assets.clone()),
        store,
        assets,
        size: size.id,
        color: color.id,
    }
}

fn draft(configurations: Vec<OptionDescriptor>) -> ItemDraft {
    ItemDraft {
        qty_in_stock: 10,
        price_cents: 2599,
        image_url: "https://example.com/shirt-front.png".into(),
        configurations,
    }
}

#[tokio::test]
async fn test_create_item_with_configurations_and_image() {
    let fx = fixture().await;
    let descriptors = vec![
        OptionDescriptor::new(OptionId::new(100), fx.size, "Large"),
        OptionDescriptor::new(OptionId::new(200), fx.color, "Blue"),
    ];

    let item = fx
        .items
        .create(ProductId::new(1), draft(descriptors))
        .await
        .unwrap();

    assert_eq!(item.qty_in_stock, 10);
    assert_eq!(item.price_cents, 2599);
    assert_eq!(item.option_ids(), vec![OptionId::new(100), OptionId::new(200)]);
    let expected_ref = format!("cdn://products/1/item-{}", item.id);
    assert_eq!(item.image_url, expected_ref);
    assert_eq!(fx.assets.upload_count(), 1);
}

#[tokio::test]
async fn test_option_resolution_is_idempotent_across_calls() {
    let fx = fixture().await;
    let resolver = OptionResolver::new(fx.store.clone());
    let descriptor = OptionDescriptor::new(OptionId::new(100), fx.size, "Large");

    let first = resolver.resolve(std::slice::from_ref(&descriptor)).await.unwrap();
    let second = resolver.resolve(&[descriptor]).await.unwrap();
    assert_eq!(first, second);

    // Re-resolving with a different value reuses the stored option as-is.
    let conflicting = OptionDescriptor::new(OptionId::new(100), fx.size, "Small");
    resolver.resolve(&[conflicting]).await.unwrap();
    let stored = fx
        .store
        .get_or_create_option(&OptionDescriptor::new(OptionId::new(100), fx.size, "ignored"))
        .await
        .unwrap();
    assert_eq!(stored.value, "Large");
}

#[tokio::test]
async fn test_create_rejects_negative_values_before_any_write() {
    let fx = fixture().await;
    let descriptors = vec![OptionDescriptor::new(OptionId::new(100), fx.size, "Large")];

    let mut bad = draft(descriptors.clone());
    bad.qty_in_stock = -1;
    let err = fx.items.create(ProductId::new(1), bad).await.unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));

    let mut bad = draft(descriptors);
    bad.price_cents = -500;
    let err = fx.items.create(ProductId::new(1), bad).await.unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));

    // Nothing reached the store.
    assert!(fx.store.item(ProductItemId::new(1)).await.unwrap().is_none());
    assert_eq!(fx.assets.upload_count(), 0);
}

#[tokio::test]
async fn test_create_rejects_dangling_variation_reference() {
    let fx = fixture().await;
    let descriptors = vec![OptionDescriptor::new(
        OptionId::new(100),
        VariationId::new(777),
        "Large",
    )];

    let err = fx
        .items
        .create(ProductId::new(1), draft(descriptors))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::InvalidReference(_)));
    assert!(fx.store.item(ProductItemId::new(1)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_create_image_failure_leaves_item_row() {
    let fx = fixture().await;
    fx.assets.set_fail(true);
    let descriptors = vec![OptionDescriptor::new(OptionId::new(100), fx.size, "Large")];

    let err = fx
        .items
        .create(ProductId::new(1), draft(descriptors))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::CreateFailed {
            stage: WriteStage::ImageUpload,
            ..
        }
    ));

    // Documented partial state: the row and its links exist, image empty.
    let item = fx
        .store
        .item(ProductItemId::new(1))
        .await
        .unwrap()
        .expect("item row should remain");
    assert!(item.image_url.is_empty());
    assert_eq!(item.option_ids(), vec![OptionId::new(100)]);
}

#[tokio::test]
async fn test_update_replaces_configuration_set_entirely() {
    let fx = fixture().await;
    let item = fx
        .items
        .create(
            ProductId::new(1),
            draft(vec![
                OptionDescriptor::new(OptionId::new(100), fx.size, "Large"),
                OptionDescriptor::new(OptionId::new(200), fx.color, "Blue"),
            ]),
        )
        .await
        .unwrap();

    let updated = fx
        .items
        .update(
            item.id,
            ItemPatch {
                qty_in_stock: 4,
                price_cents: 1999,
                image_url: None,
                configurations: vec![OptionDescriptor::new(OptionId::new(300), fx.color, "Red")],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.option_ids(), vec![OptionId::new(300)]);
    assert_eq!(updated.qty_in_stock, 4);
    assert_eq!(updated.price_cents, 1999);
}

#[tokio::test]
async fn test_update_with_empty_configurations_preserves_links() {
    let fx = fixture().await;
    let item = fx
        .items
        .create(
            ProductId::new(1),
            draft(vec![
                OptionDescriptor::new(OptionId::new(100), fx.size, "Large"),
                OptionDescriptor::new(OptionId::new(200), fx.color, "Blue"),
            ]),
        )
        .await
        .unwrap();

    let updated = fx
        .items
        .update(
            item.id,
            ItemPatch {
                qty_in_stock: 1,
                price_cents: 999,
                image_url: None,
                configurations: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.option_ids(), vec![OptionId::new(100), OptionId::new(200)]);
    assert_eq!(updated.qty_in_stock, 1);
    assert_eq!(updated.price_cents, 999);
}

#[tokio::test]
async fn test_update_rejects_negative_values_without_mutation() {
    let fx = fixture().await;
    let item = fx
        .items
        .create(
            ProductId::new(1),
            draft(vec![OptionDescriptor::new(OptionId::new(100), fx.size, "Large")]),
        )
        .await
        .unwrap();

    let err = fx
        .items
        .update(
            item.id,
            ItemPatch {
                qty_in_stock: -3,
                price_cents: 100,
                image_url: None,
                configurations: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));

    let unchanged = fx.items.get(item.id).await.unwrap();
    assert_eq!(unchanged.qty_in_stock, item.qty_in_stock);
    assert_eq!(unchanged.price_cents, item.price_cents);
}

#[tokio::test]
async fn test_update_missing_item_not_found() {
    let fx = fixture().await;
    let err = fx
        .items
        .update(
            ProductItemId::new(9999),
            ItemPatch {
                qty_in_stock: 1,
                price_cents: 1,
                image_url: None,
                configurations: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}

#[tokio::test]
async fn test_update_image_failure_keeps_committed_changes() {
    let fx = fixture().await;
    let item = fx
        .items
        .create(
            ProductId::new(1),
            draft(vec![OptionDescriptor::new(OptionId::new(100), fx.size, "Large")]),
        )
        .await
        .unwrap();

    fx.assets.set_fail(true);
    let err = fx
        .items
        .update(
            item.id,
            ItemPatch {
                qty_in_stock: 7,
                price_cents: 4200,
                image_url: Some("https://example.com/new.png".into()),
                configurations: vec![OptionDescriptor::new(OptionId::new(300), fx.color, "Red")],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UpdateFailed {
            stage: WriteStage::ImageUpload,
            ..
        }
    ));

    // Step-3 commits are not rolled back by the image failure.
    let committed = fx.items.get(item.id).await.unwrap();
    assert_eq!(committed.qty_in_stock, 7);
    assert_eq!(committed.price_cents, 4200);
    assert_eq!(committed.option_ids(), vec![OptionId::new(300)]);
    assert_eq!(committed.image_url, item.image_url);
}

#[tokio::test]
async fn test_update_skips_upload_when_image_unchanged() {
    let fx = fixture().await;
    let item = fx
        .items
        .create(
            ProductId::new(1),
            draft(vec![OptionDescriptor::new(OptionId::new(100), fx.size, "Large")]),
        )
        .await
        .unwrap();
    let uploads_after_create = fx.assets.upload_count();

    let updated = fx
        .items
        .update(
            item.id,
            ItemPatch {
                qty_in_stock: 3,
                price_cents: 2599,
                image_url: Some(item.image_url.clone()),
                configurations: vec![],
            },
        )
        .await
        .unwrap();

    assert_eq!(fx.assets.upload_count(), uploads_after_create);
    assert_eq!(updated.image_url, item.image_url);
    assert_eq!(updated.qty_in_stock, 3);
}

#[tokio::test]
async fn test_update_link_attach_failure_reports_stage() {
    let inner = Arc::new(MemoryStore::new());
    let assets = Arc::new(RecordingAssets::new());
    let categories = CategoryComposer::new(inner.clone(), assets.clone());
    let variations = VariationManager::new(inner.clone());
    let category = categories.create(CategoryDraft::new("Shirts")).await.unwrap();
    let size = variations
        .create(VariationDraft::new("Size"), category.id)
        .await
        .unwrap();

    let flaky = Arc::new(FlakyStore::new(inner.clone()));
    let items = ProductItemComposer::new(flaky.clone(), assets);
    let item = items
        .create(
            ProductId::new(1),
            draft(vec![OptionDescriptor::new(OptionId::new(100), size.id, "Large")]),
        )
        .await
        .unwrap();

    flaky
        .fail_attach_links
        .store(true, std::sync::atomic::Ordering::SeqCst);
    let err = items
        .update(
            item.id,
            ItemPatch {
                qty_in_stock: 2,
                price_cents: 100,
                image_url: None,
                configurations: vec![OptionDescriptor::new(OptionId::new(101), size.id, "Small")],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::UpdateFailed {
            stage: WriteStage::ConfigurationLinks,
            ..
        }
    ));
}

#[tokio::test]
async fn test_get_and_standalone_image_update() {
    let fx = fixture().await;
    let err = fx.items.get(ProductItemId::new(42)).await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    let item = fx
        .items
        .create(
            ProductId::new(1),
            draft(vec![OptionDescriptor::new(OptionId::new(100), fx.size, "Large")]),
        )
        .await
        .unwrap();

    let updated = fx
        .items
        .update_image(item.id, "https://example.com/back.png")
        .await
        .unwrap();
    assert_eq!(updated.image_url, format!("cdn://products/1/item-{}", item.id));
    // Same deterministic name, so the reference is stable across replacements.
    assert_eq!(updated.image_url, item.image_url);
    assert_eq!(fx.assets.upload_count(), 2);

    let err = fx
        .items
        .update_image(ProductItemId::new(42), "https://example.com/x.png")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
}
