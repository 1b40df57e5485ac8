//! Catalog error taxonomy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How far a composite write progressed before failing.
///
/// Composite operations (category-with-variations creation, product item
/// create/update) run as an ordered sequence of store writes. The stage is
/// carried inside [`CatalogError::CreateFailed`] / [`CatalogError::UpdateFailed`]
/// so callers can tell exactly which step committed and which did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WriteStage {
    /// Input validation; nothing has been written.
    Validation,
    /// The category row (with or without its variation tree).
    CategoryRow,
    /// Variation-option resolution; no item rows written yet.
    OptionResolution,
    /// The product item row, including its configuration links.
    ItemRow,
    /// The configuration link set attached after a replacement clear.
    ConfigurationLinks,
    /// The image upload and reference write; earlier stages are committed.
    ImageUpload,
}

impl WriteStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            WriteStage::Validation => "validation",
            WriteStage::CategoryRow => "category-row",
            WriteStage::OptionResolution => "option-resolution",
            WriteStage::ItemRow => "item-row",
            WriteStage::ConfigurationLinks => "configuration-links",
            WriteStage::ImageUpload => "image-upload",
        }
    }
}

impl std::fmt::Display for WriteStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors that can occur in catalog operations.
///
/// The boundary layer maps each kind to a wire-level response; this crate
/// only distinguishes the kind and carries a human-readable message.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Malformed or invalid caller input, detected before any mutation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A referenced entity is absent.
    #[error("{0}")]
    NotFound(String),

    /// A composite create did not fully succeed.
    #[error("Create failed at {stage}: {reason}")]
    CreateFailed { stage: WriteStage, reason: String },

    /// A composite update did not fully succeed. Stages before `stage`
    /// are already committed and are not rolled back.
    #[error("Update failed at {stage}: {reason}")]
    UpdateFailed { stage: WriteStage, reason: String },

    /// The external asset transfer failed; the owning entity was not updated.
    #[error("Asset upload failed: {0}")]
    AssetUploadFailed(String),

    /// An externally supplied identifier is not a valid key.
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// A supplied key does not reference an existing row.
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// The store failed outside a composite write (connectivity, unexpected
    /// rejection on a plain read).
    #[error("Store error: {0}")]
    Store(String),
}

impl CatalogError {
    /// Shorthand for a [`CatalogError::BadRequest`].
    pub fn bad_request(msg: impl Into<String>) -> Self {
        CatalogError::BadRequest(msg.into())
    }

    /// Shorthand for a [`CatalogError::NotFound`].
    pub fn not_found(msg: impl Into<String>) -> Self {
        CatalogError::NotFound(msg.into())
    }

    /// A create failure at the given stage.
    pub fn create_failed(stage: WriteStage, reason: impl Into<String>) -> Self {
        CatalogError::CreateFailed {
            stage,
            reason: reason.into(),
        }
    }

    /// An update failure at the given stage.
    pub fn update_failed(stage: WriteStage, reason: impl Into<String>) -> Self {
        CatalogError::UpdateFailed {
            stage,
            reason: reason.into(),
        }
    }
}
