//! Newtype ids for type-safe keys.
//!
//! Using newtypes prevents accidentally mixing up different key types,
//! e.g., passing a `VariationId` where a `CategoryId` is expected. All keys
//! live in a single non-negative `i64` space; identifiers arriving from the
//! outside (route segments, request bodies) are strings and go through
//! [`parse_key`] before touching the store.

use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coerce an externally supplied identifier string into the numeric key space.
///
/// Accepts only a non-negative integer literal; anything else fails with
/// [`CatalogError::InvalidIdentifier`]. No side effects.
pub fn parse_key(raw: &str) -> Result<i64, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('+') {
        return Err(CatalogError::InvalidIdentifier(raw.to_string()));
    }
    trimmed
        .parse::<i64>()
        .ok()
        .filter(|n| *n >= 0)
        .ok_or_else(|| CatalogError::InvalidIdentifier(raw.to_string()))
}

/// Macro to generate newtype key structs.
macro_rules! define_key {
    ($name:ident) => {
        /// A unique numeric key.
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Create a key from a raw numeric value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Coerce a key from an externally supplied string.
            pub fn parse(raw: &str) -> Result<Self, CatalogError> {
                parse_key(raw).map(Self)
            }

            /// Get the raw numeric value.
            pub fn get(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

// Define all key types
define_key!(CategoryId);
define_key!(VariationId);
define_key!(OptionId);
define_key!(ProductId);
define_key!(ProductItemId);
