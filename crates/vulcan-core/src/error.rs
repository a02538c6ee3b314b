//! # Error Types
//!
//! Domain errors for vulcan-core.
//!
//! Two layers, following the taxonomy the rest of the workspace builds on:
//! - [`ValidationError`] - malformed input, caught before any network call
//! - [`CoreError`] - stock-consistency violations and cart failures
//!
//! Every variant carries the context needed for a user-facing message
//! (product name, available quantity, requested quantity). None of these
//! errors is fatal; all are recoverable at the boundary of the triggering
//! action.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the stock ledger and the cart.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Product id is unknown to the local catalog mirror.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Cart operation referenced a product that has no line.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(i64),

    /// Adding to the cart when the mirror shows no sellable units.
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// A cart line tried to claim more than the mirrored stock.
    #[error("Only {available} of {name} available in stock (requested {requested})")]
    StockExceeded {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A relative adjustment would drive stock below zero.
    #[error("Cannot remove {requested}: only {available} in stock")]
    InsufficientStock { available: i64, requested: i64 },

    /// An absolute quantity outside the accepted range.
    #[error("Invalid quantity {quantity}: must be between {min} and {max}")]
    InvalidQuantity { quantity: i64, min: i64, max: i64 },

    /// Input validation failure (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Duplicate value detected in the local mirror.
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Width/ratio/rim must be provided together or not at all.
    #[error("size requires width, ratio and rim together")]
    IncompleteSize,
}

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_error_messages() {
        let err = CoreError::StockExceeded {
            name: "All-Season 205/55R16".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Only 3 of All-Season 205/55R16 available in stock (requested 5)"
        );

        let err = CoreError::InsufficientStock {
            available: 2,
            requested: 10,
        };
        assert_eq!(err.to_string(), "Cannot remove 10: only 2 in stock");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let err: CoreError = ValidationError::Required {
            field: "name".to_string(),
        }
        .into();
        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(err.to_string(), "name is required");
    }
}
