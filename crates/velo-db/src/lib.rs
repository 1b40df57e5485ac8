//! Data-access seam for the VeloCommerce catalog.
//!
//! The engine talks to persistence through the [`CatalogStore`] trait: an
//! entity-scoped facade over a relational store that supports nested
//! composite creates, connect-or-create keyed by a caller-supplied identity,
//! bulk deletion of a child collection, and unique-key lookup. Each trait
//! method is one atomic unit from the caller's point of view; isolation
//! between concurrent requests is the store's job, not the application's.
//!
//! [`MemoryStore`] is the in-process reference implementation: a map-backed
//! store whose methods run under a single lock, standing in for the
//! relational store's transactional guarantees in tests and development.

mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::CatalogStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{CatalogStore, MemoryStore, StoreError};
}
