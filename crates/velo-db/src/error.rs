//! Store error types.

use thiserror::Error;

/// Errors surfaced by a [`crate::CatalogStore`] implementation.
///
/// Deliberately coarse: callers only ever need to distinguish "the row is
/// absent" from "the write was rejected" from "the store is unreachable".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The referenced row does not exist.
    #[error("row not found")]
    NotFound,

    /// A constraint rejected the write (unique key, foreign key, check).
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// The store could not be reached or the write failed mid-flight.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
