//! # Validation Module
//!
//! Field-level validation for user input, run before any network call so a
//! malformed request never leaves the terminal. The Remote Store repeats the
//! authoritative checks server-side; these are the optimistic front line.

use crate::error::ValidationError;
use crate::types::{Category, NewProduct, Product};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates and normalizes a product code.
///
/// Codes are case-normalized to uppercase; uniqueness is checked against the
/// local mirror separately (see [`ensure_unique_code`]).
///
/// ## Returns
/// The trimmed, uppercased code.
pub fn validate_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 50,
        });
    }

    Ok(code.to_uppercase())
}

/// Validates a category name: non-empty, at most 100 characters.
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "category name".to_string(),
        });
    }

    if name.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "category name".to_string(),
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price: must be strictly positive.
pub fn validate_price(price: crate::Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates the size triple: all three present or all three absent, and
/// strictly positive when present.
pub fn validate_size(
    width: Option<u32>,
    ratio: Option<u32>,
    rim: Option<u32>,
) -> ValidationResult<()> {
    let provided = [width, ratio, rim].iter().filter(|v| v.is_some()).count();
    if provided != 0 && provided != 3 {
        return Err(ValidationError::IncompleteSize);
    }

    for (field, value) in [("width", width), ("ratio", ratio), ("rim", rim)] {
        if value == Some(0) {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Local Duplicate Detection
// =============================================================================
// The mirror may be stale; the Remote Store has the last word on uniqueness.
// Checking locally first saves the round-trip for the common case.

/// Rejects a code that already exists in the catalog mirror.
/// Expects `code` to be normalized (uppercase) already.
pub fn ensure_unique_code(products: &[Product], code: &str) -> ValidationResult<()> {
    if products.iter().any(|p| p.code == code) {
        return Err(ValidationError::Duplicate {
            field: "code".to_string(),
            value: code.to_string(),
        });
    }

    Ok(())
}

/// Rejects a category name already present in the mirror, compared
/// case-insensitively.
pub fn ensure_unique_category(categories: &[Category], name: &str) -> ValidationResult<()> {
    let lowered = name.trim().to_lowercase();
    if categories
        .iter()
        .any(|c| c.category_name.to_lowercase() == lowered)
    {
        return Err(ValidationError::Duplicate {
            field: "category".to_string(),
            value: name.trim().to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Full pre-flight validation for a product creation request.
///
/// ## Note
/// `draft.code` must already be normalized via [`validate_code`]; the
/// duplicate check compares exact (uppercased) codes.
pub fn validate_new_product(draft: &NewProduct, existing: &[Product]) -> ValidationResult<()> {
    validate_product_name(&draft.name)?;
    validate_price(draft.price)?;
    validate_size(draft.width, draft.ratio, draft.rim)?;
    ensure_unique_code(existing, &draft.code)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
