//! Catalog domain types for the VeloCommerce storefront backend.
//!
//! This crate provides the entity, request, and error types shared by the
//! catalog engine and its storage layer:
//!
//! - **Ids**: numeric newtype keys with coercion from route strings
//! - **Catalog**: categories, variations, variation options, product items
//! - **Requests**: draft/patch types with up-front validation
//! - **Errors**: the catalog error taxonomy with composite-write stages
//!
//! # Example
//!
//! ```rust
//! use velo_commerce::prelude::*;
//!
//! let draft = CategoryDraft::new("Shoes").with_icon("https://cdn.example/shoes.png");
//! assert!(draft.validate().is_ok());
//!
//! let id = CategoryId::parse("42").unwrap();
//! assert_eq!(id.get(), 42);
//! ```

pub mod catalog;
pub mod error;
pub mod ids;

pub use error::{CatalogError, WriteStage};
pub use ids::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, WriteStage};
    pub use crate::ids::*;

    pub use crate::catalog::{
        Category, CategoryDraft, CategoryList, CategoryPatch, CategoryVariations, ItemDraft,
        ItemPatch, OptionDescriptor, ProductConfiguration, ProductItem, Variation, VariationDraft,
        VariationOption,
    };
}
