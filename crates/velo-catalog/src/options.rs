//! Variation-option resolution.

use crate::category::store_error;
use std::sync::Arc;
use tracing::debug;
use velo_commerce::catalog::OptionDescriptor;
use velo_commerce::error::CatalogError;
use velo_commerce::ids::OptionId;
use velo_db::{CatalogStore, StoreError};

/// Resolves caller-supplied option descriptors to stored option keys.
///
/// Option identity is caller-supplied, so resolution is an idempotent
/// get-or-create keyed by that identity: an existing option is reused
/// as-is (a differing descriptor value is ignored, never written), a
/// missing one is created. The connect-or-create itself is one store-level
/// unit, so concurrent callers resolving the same identity cannot race
/// into duplicate rows; no application-level check-then-act is layered on
/// top.
pub struct OptionResolver {
    store: Arc<dyn CatalogStore>,
}

impl OptionResolver {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Resolve descriptors to option keys, in input order.
    ///
    /// Each descriptor's `variation_id` must reference an existing
    /// variation; a dangling reference fails with
    /// [`CatalogError::InvalidReference`] before the option is created.
    pub async fn resolve(
        &self,
        descriptors: &[OptionDescriptor],
    ) -> Result<Vec<OptionId>, CatalogError> {
        let mut resolved = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if self
                .store
                .variation(descriptor.variation_id)
                .await
                .map_err(store_error)?
                .is_none()
            {
                return Err(CatalogError::InvalidReference(format!(
                    "variation {} does not exist",
                    descriptor.variation_id
                )));
            }
            let option = self
                .store
                .get_or_create_option(descriptor)
                .await
                .map_err(|e| match e {
                    // Constraint here means the FK backstop caught a
                    // dangling reference the lookup above missed.
                    StoreError::Constraint(msg) => CatalogError::InvalidReference(msg),
                    other => store_error(other),
                })?;
            debug!(option = %option.id, variation = %option.variation_id, "resolved option");
            resolved.push(option.id);
        }
        Ok(resolved)
    }
}
