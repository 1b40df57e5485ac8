//! Catalog composition and variation consistency engine.
//!
//! The one place in the storefront backend where multiple related entities
//! are created or replaced together:
//!
//! - **Category composer**: a category with its nested variation tree, as
//!   one unit
//! - **Variation manager**: single variations scoped to a category
//! - **Product item composer**: an item's stock/price/image together with
//!   its full variation-option configuration set, with a
//!   delete-then-recreate replacement policy on update
//! - **Option resolver**: connect-or-create resolution of caller-supplied
//!   option identities, shared by both composition paths
//!
//! Persistence goes through the [`velo_db::CatalogStore`] seam; image
//! transfer goes through the [`AssetStore`] seam. Both are taken as
//! `Arc<dyn …>` at construction, never looked up from ambient state.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use velo_catalog::prelude::*;
//! use velo_commerce::prelude::*;
//! use velo_db::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let categories = CategoryComposer::new(store.clone(), assets.clone());
//!
//! let category = categories
//!     .create_with_variations(
//!         CategoryDraft::new("Shoes"),
//!         vec![VariationDraft::new("Size"), VariationDraft::new("Color")],
//!     )
//!     .await?;
//! ```

pub mod assets;
pub mod category;
pub mod item;
pub mod options;
pub mod variation;

pub use assets::{AssetError, AssetStore};
pub use category::CategoryComposer;
pub use item::ProductItemComposer;
pub use options::OptionResolver;
pub use variation::VariationManager;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::assets::{AssetError, AssetStore};
    pub use crate::category::CategoryComposer;
    pub use crate::item::ProductItemComposer;
    pub use crate::options::OptionResolver;
    pub use crate::variation::VariationManager;
}
