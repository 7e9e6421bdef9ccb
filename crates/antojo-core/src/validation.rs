//! # Validation Module
//!
//! Input validation rules shared by the admin forms, the storefront and the
//! order record boundary.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Frontend (TypeScript)                                     │
//! │  └── Basic format checks, immediate user feedback                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE                                               │
//! │  └── Field rules shared by every Rust entry point                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Business rules (allocation, lifecycle, catalog bounds)    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu entry name (product, package or topping).
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 120 characters
pub fn validate_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates an optional free-text description.
///
/// ## Rules
/// - May be empty
/// - Must be at most 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.len() > 500 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 500,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary amount in cents.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items, pickup fee)
pub fn validate_money_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates an included-topping count.
///
/// ## Rules
/// - Must be non-negative
///
/// The upper bound (never more than the active toppings in the catalog) is
/// a catalog rule and is enforced where the catalog is in scope.
pub fn validate_included_count(count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "included_toppings".to_string(),
        });
    }

    Ok(())
}

/// Validates a line quantity.
///
/// ## Rules
/// - Must be between 1 and [`MAX_LINE_QUANTITY`]
///
/// Interactive quantity edits clamp below-1 values instead of failing;
/// this validator is for records crossing the system boundary, where a
/// zero or negative quantity means the record is corrupt.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 || qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Identifier Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use antojo_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

/// Validates a topping selection: no empty ids, no duplicates.
///
/// Toggle semantics make duplicates impossible for selections built through
/// [`crate::draft::ToppingSelection`]; this validator guards selections
/// arriving from outside (persisted records, request payloads).
pub fn validate_selection(ids: &[String]) -> ValidationResult<()> {
    let mut seen: Vec<&str> = Vec::with_capacity(ids.len());

    for id in ids {
        if id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "topping id".to_string(),
            });
        }
        if seen.contains(&id.as_str()) {
            return Err(ValidationError::DuplicateTopping { id: id.clone() });
        }
        seen.push(id);
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Bowl Clásico").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"A".repeat(200)).is_err());
    }

    #[test]
    fn test_validate_description() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Con todo.").is_ok());
        assert!(validate_description(&"A".repeat(600)).is_err());
    }

    #[test]
    fn test_validate_money_cents() {
        assert!(validate_money_cents("price", 0).is_ok());
        assert!(validate_money_cents("price", 3000).is_ok());
        assert!(validate_money_cents("price", -1).is_err());
    }

    #[test]
    fn test_validate_included_count() {
        assert!(validate_included_count(0).is_ok());
        assert!(validate_included_count(3).is_ok());
        assert!(validate_included_count(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(99).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-2).is_err());
        assert!(validate_quantity(100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("123").is_err());
    }

    #[test]
    fn test_validate_selection() {
        let ok = vec!["a".to_string(), "b".to_string()];
        assert!(validate_selection(&ok).is_ok());
        assert!(validate_selection(&[]).is_ok());

        let dup = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let err = validate_selection(&dup).unwrap_err();
        assert!(matches!(err, ValidationError::DuplicateTopping { .. }));

        let empty_id = vec!["a".to_string(), " ".to_string()];
        assert!(validate_selection(&empty_id).is_err());
    }
}
