//! # Shop Error Type
//!
//! Unified error type for catalog, storefront and board operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │  antojo-core            antojo-shop              Frontend           │
//! │  ───────────            ───────────              ────────           │
//! │  CoreError ──────┐                                                  │
//! │  ValidationError ┼────► ShopError ────► ErrorBody { code, message } │
//! │  ConfigError ────┘                                                  │
//! │                                                                     │
//! │  Every variant maps to a stable machine-readable code so the UI     │
//! │  can branch without string-matching messages.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use antojo_core::CoreError;

use crate::config::ConfigError;

// =============================================================================
// Shop Error
// =============================================================================

/// Application-level errors around the pricing core.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Product id does not exist in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Package id does not exist in the catalog.
    #[error("package not found: {0}")]
    PackageNotFound(String),

    /// Topping id does not exist in the catalog.
    #[error("topping not found: {0}")]
    ToppingNotFound(String),

    /// Order id does not exist in the order book.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// Menu entry exists but is deactivated and cannot be sold.
    #[error("menu item is not available: {0}")]
    MenuItemUnavailable(String),

    /// Topping exists but is deactivated and cannot be selected.
    #[error("topping is not available: {0}")]
    ToppingUnavailable(String),

    /// A catalog entity with the same name already exists.
    #[error("a {kind} named '{name}' already exists")]
    DuplicateName { kind: &'static str, name: String },

    /// A product or package would include more free toppings than the
    /// catalog has active toppings.
    #[error("'{name}' includes {included} toppings but only {available} are available")]
    IncludedExceedsToppings {
        name: String,
        included: i64,
        available: i64,
    },

    /// Deactivating this topping would leave menu items whose included
    /// count exceeds the remaining active toppings.
    #[error("topping {id} is still required by {blocking} menu item(s)")]
    ToppingStillRequired { id: String, blocking: usize },

    /// Core pricing/lifecycle error.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Configuration error.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ShopError {
    /// Stable machine-readable code for the frontend.
    pub fn code(&self) -> &'static str {
        match self {
            ShopError::ProductNotFound(_)
            | ShopError::PackageNotFound(_)
            | ShopError::ToppingNotFound(_)
            | ShopError::OrderNotFound(_) => "NOT_FOUND",
            ShopError::MenuItemUnavailable(_) | ShopError::ToppingUnavailable(_) => "UNAVAILABLE",
            ShopError::DuplicateName { .. } => "DUPLICATE",
            ShopError::IncludedExceedsToppings { .. } | ShopError::ToppingStillRequired { .. } => {
                "CATALOG_CONFLICT"
            }
            ShopError::Core(CoreError::InvalidPricingPolicy { .. }) => "INVALID_PRICING",
            ShopError::Core(CoreError::InvalidStateTransition { .. }) => "INVALID_TRANSITION",
            ShopError::Core(CoreError::Validation(_)) => "VALIDATION_ERROR",
            ShopError::Core(_) => "INVALID_INPUT",
            ShopError::Config(_) => "CONFIG_ERROR",
        }
    }
}

// =============================================================================
// Error Envelope
// =============================================================================

/// What the frontend receives when an operation fails.
///
/// ```json
/// { "code": "UNAVAILABLE", "message": "topping is not available: t-12" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code for programmatic handling.
    pub code: &'static str,

    /// Human-readable error message for display.
    pub message: String,
}

impl From<&ShopError> for ErrorBody {
    fn from(err: &ShopError) -> Self {
        ErrorBody {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with ShopError.
pub type ShopResult<T> = Result<T, ShopError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use antojo_core::OrderStatus;

    #[test]
    fn test_error_codes() {
        assert_eq!(ShopError::ProductNotFound("p".into()).code(), "NOT_FOUND");
        assert_eq!(ShopError::ToppingUnavailable("t".into()).code(), "UNAVAILABLE");

        let core = ShopError::Core(CoreError::InvalidStateTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        });
        assert_eq!(core.code(), "INVALID_TRANSITION");
    }

    #[test]
    fn test_error_body_serialization() {
        let err = ShopError::ToppingNotFound("t-1".to_string());
        let body = ErrorBody::from(&err);
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"code":"NOT_FOUND","message":"topping not found: t-1"}"#
        );
    }

    #[test]
    fn test_core_errors_convert() {
        let err: ShopError = CoreError::EmptyOrder.into();
        assert!(matches!(err, ShopError::Core(CoreError::EmptyOrder)));
        assert_eq!(err.code(), "INVALID_INPUT");
    }
}
