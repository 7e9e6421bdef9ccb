//! # Domain Types
//!
//! Shared pricing and menu types used throughout Antojo.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌─────────────────┐   │
//! │  │  PricingPolicy   │  │     MenuRef      │  │  DeliveryMode   │   │
//! │  │  ──────────────  │  │  ──────────────  │  │  ─────────────  │   │
//! │  │  unit_price      │  │  Product(id)     │  │  Pickup         │   │
//! │  │  included count  │  │  Package(id)     │  │  Delivery       │   │
//! │  │  extra price     │  └──────────────────┘  └─────────────────┘   │
//! │  └──────────────────┘                                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Topping identifiers are opaque strings everywhere in this crate: the
//! pricing rules never inspect them, only their position in the selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::allocation::{allocate, Allocation};
use crate::error::CoreResult;
use crate::money::Money;

// =============================================================================
// Pricing Policy
// =============================================================================

/// Pricing attributes of a single product or package.
///
/// The policy is snapshotted into a line item when the item is added to a
/// draft, so later catalog edits never change a cart the customer is
/// already looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingPolicy {
    /// Base price in cents, before any extra toppings.
    pub unit_price_cents: i64,

    /// Number of toppings included in the base price.
    pub included_toppings: i64,

    /// Flat per-unit price in cents for each topping beyond the
    /// included count. Shared across the whole menu in practice.
    pub extra_topping_price_cents: i64,
}

impl PricingPolicy {
    /// Creates a new pricing policy.
    pub const fn new(
        unit_price_cents: i64,
        included_toppings: i64,
        extra_topping_price_cents: i64,
    ) -> Self {
        PricingPolicy {
            unit_price_cents,
            included_toppings,
            extra_topping_price_cents,
        }
    }

    /// Returns the base price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the per-extra-topping price as Money.
    #[inline]
    pub fn extra_topping_price(&self) -> Money {
        Money::from_cents(self.extra_topping_price_cents)
    }

    /// Splits a topping selection into included and extra toppings under
    /// this policy.
    ///
    /// Rejects invalid policies (negative values) before computing any
    /// charge. See [`crate::allocation::allocate`] for the allocation rule.
    pub fn allocate(&self, selected: &[String]) -> CoreResult<Allocation> {
        allocate(
            selected,
            self.included_toppings,
            self.extra_topping_price_cents,
        )
    }
}

// =============================================================================
// Menu Reference
// =============================================================================

/// Reference to a sellable menu entry: a single product or a package deal.
///
/// Line items and order records carry this reference for reporting; price
/// and name are snapshotted separately, so the reference is never followed
/// after submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
#[ts(export)]
pub enum MenuRef {
    /// A single product (e.g., one bowl).
    Product(String),
    /// A package deal bundling several products.
    Package(String),
}

impl MenuRef {
    /// Returns the referenced catalog id.
    pub fn id(&self) -> &str {
        match self {
            MenuRef::Product(id) | MenuRef::Package(id) => id,
        }
    }
}

impl fmt::Display for MenuRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuRef::Product(id) => write!(f, "product:{id}"),
            MenuRef::Package(id) => write!(f, "package:{id}"),
        }
    }
}

// =============================================================================
// Delivery Mode
// =============================================================================

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DeliveryMode {
    /// Customer picks the order up at the shop. No fee.
    Pickup,
    /// Order is delivered; the flat delivery fee applies.
    Delivery,
}

impl Default for DeliveryMode {
    fn default() -> Self {
        DeliveryMode::Pickup
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pricing_policy_accessors() {
        let policy = PricingPolicy::new(3000, 1, 500);
        assert_eq!(policy.unit_price().cents(), 3000);
        assert_eq!(policy.extra_topping_price().cents(), 500);
    }

    #[test]
    fn test_menu_ref_id_and_display() {
        let product = MenuRef::Product("p-1".to_string());
        let package = MenuRef::Package("k-9".to_string());
        assert_eq!(product.id(), "p-1");
        assert_eq!(package.id(), "k-9");
        assert_eq!(product.to_string(), "product:p-1");
        assert_eq!(package.to_string(), "package:k-9");
    }

    #[test]
    fn test_menu_ref_serialization() {
        let menu_ref = MenuRef::Product("p-1".to_string());
        let json = serde_json::to_string(&menu_ref).unwrap();
        assert_eq!(json, r#"{"kind":"product","id":"p-1"}"#);

        let back: MenuRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, menu_ref);
    }

    #[test]
    fn test_delivery_mode_default() {
        assert_eq!(DeliveryMode::default(), DeliveryMode::Pickup);
    }
}
