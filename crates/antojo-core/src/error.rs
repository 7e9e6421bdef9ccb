//! # Error Types
//!
//! Domain-specific error types for antojo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  antojo-core errors (this file)                                     │
//! │  ├── CoreError        - Pricing and order lifecycle errors          │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  antojo-shop errors (separate crate)                                │
//! │  └── ShopError        - Catalog/storefront/board failures           │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → ShopError → Frontend           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ids, limits, offending values)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::order::OrderStatus;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent pricing rule violations or order lifecycle
/// failures. They must surface to the caller before any charge is computed
/// or any state is mutated.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A pricing policy carries a negative price or included-topping count.
    ///
    /// Raised before any allocation runs. A negative extra-topping price
    /// would silently produce a negative charge, so it is rejected outright
    /// and blocks order submission.
    #[error("invalid pricing policy: {reason}")]
    InvalidPricingPolicy { reason: String },

    /// An order-status change was attempted that the lifecycle forbids.
    ///
    /// Covers transitions out of a terminal state, backwards moves, and
    /// skipped states. The order is left unchanged.
    #[error("order cannot move from '{from}' to '{to}'")]
    InvalidStateTransition { from: OrderStatus, to: OrderStatus },

    /// An empty draft was submitted as an order.
    #[error("order has no line items")]
    EmptyOrder,

    /// Draft has exceeded the maximum allowed line items.
    #[error("order cannot have more than {max} line items")]
    OrderTooLarge { max: usize },

    /// Line quantity exceeds the maximum allowed.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Referenced line item does not exist in the draft.
    #[error("line item not found: {0}")]
    LineNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input from a form or a persisted record doesn't
/// meet requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., invalid UUID, malformed record JSON).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// The same topping appears twice in one selection.
    #[error("topping '{id}' is selected more than once")]
    DuplicateTopping { id: String },

    /// A persisted order record carries a schema version this build
    /// does not understand.
    #[error("unsupported order record version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidPricingPolicy {
            reason: "extra topping price is negative".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid pricing policy: extra topping price is negative"
        );

        let err = CoreError::InvalidStateTransition {
            from: OrderStatus::Ready,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.to_string(), "order cannot move from 'ready' to 'pending'");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::DuplicateTopping {
            id: "guacamole".to_string(),
        };
        assert_eq!(err.to_string(), "topping 'guacamole' is selected more than once");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustNotBeNegative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
