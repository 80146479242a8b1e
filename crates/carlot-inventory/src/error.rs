//! Inventory error types.
//!
//! Normalization and filter evaluation never fail. The only fallible
//! operations in this crate parse user-supplied filter text.

use thiserror::Error;

/// Errors raised while interpreting filter input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Price range text is not `min-max` with numeric bounds.
    #[error("Invalid price range: {0}")]
    InvalidPriceRange(String),

    /// Year filter is neither `all` nor an integer.
    #[error("Invalid year: {0}")]
    InvalidYear(String),

    /// Unknown field or filter name.
    #[error("Unknown field: {0}")]
    UnknownField(String),
}
