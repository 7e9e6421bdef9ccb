//! # Topping Allocation
//!
//! The single source of truth for the included-vs-extra topping rule.
//!
//! ## The Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Selection (in the order the customer picked):                      │
//! │                                                                     │
//! │    [ guacamole, queso, elote ]        included_toppings = 1         │
//! │       │          │      │                                           │
//! │       ▼          ▼      ▼                                           │
//! │    included    extra   extra          extra_charge = 2 × $5.00      │
//! │                                                                     │
//! │  FIFO by selection order. Never by topping identity, price,         │
//! │  or name. Removing `guacamole` promotes `queso` to included.        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every surface that shows a price — cart modal, product card, order
//! summary, the submitted order record — derives it from [`allocate`].
//! Nothing else in the codebase re-implements this split.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Allocation Result
// =============================================================================

/// The result of partitioning a topping selection.
///
/// Both id lists preserve the customer's original selection order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Allocation {
    /// Toppings covered by the item's free allotment, in selection order.
    pub included: Vec<String>,

    /// Toppings beyond the allotment, in selection order. Each one is
    /// billed at the flat extra-topping price.
    pub extras: Vec<String>,

    /// Total charge for the extras, in cents.
    pub extra_charge_cents: i64,
}

impl Allocation {
    /// Number of toppings billed as extras.
    #[inline]
    pub fn extra_count(&self) -> usize {
        self.extras.len()
    }

    /// Returns the extra charge as Money.
    #[inline]
    pub fn extra_charge(&self) -> Money {
        Money::from_cents(self.extra_charge_cents)
    }
}

// =============================================================================
// Allocation Function
// =============================================================================

/// Splits `selected` into included and extra toppings.
///
/// The first `included_count` selections (in selection order) are free;
/// every selection after that is billed at `extra_unit_price_cents`.
///
/// ## Contract
/// - `selected` contains no duplicates. Uniqueness is the caller's
///   responsibility: [`crate::draft::ToppingSelection`] toggles rather
///   than appends, so a well-formed selection can never repeat an id.
/// - `included_count < 0` or `extra_unit_price_cents < 0` fails with
///   [`CoreError::InvalidPricingPolicy`] before any charge is computed.
/// - Pure and deterministic: same inputs, same output, no side effects.
///
/// ## Edge Cases
/// - `included_count >= selected.len()` ⇒ everything included, no charge.
/// - Empty selection ⇒ empty result, no charge.
///
/// ## Example
/// ```rust
/// use antojo_core::allocation::allocate;
///
/// let selected: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
/// let result = allocate(&selected, 1, 500).unwrap();
///
/// assert_eq!(result.included, vec!["a".to_string()]);
/// assert_eq!(result.extras, vec!["b".to_string(), "c".to_string()]);
/// assert_eq!(result.extra_charge_cents, 1000);
/// ```
pub fn allocate(
    selected: &[String],
    included_count: i64,
    extra_unit_price_cents: i64,
) -> CoreResult<Allocation> {
    if included_count < 0 {
        return Err(CoreError::InvalidPricingPolicy {
            reason: format!("included topping count is negative ({included_count})"),
        });
    }
    if extra_unit_price_cents < 0 {
        return Err(CoreError::InvalidPricingPolicy {
            reason: format!("extra topping price is negative ({extra_unit_price_cents})"),
        });
    }

    let split = (included_count as usize).min(selected.len());
    let included = selected[..split].to_vec();
    let extras = selected[split..].to_vec();
    let extra_charge_cents = extras.len() as i64 * extra_unit_price_cents;

    Ok(Allocation {
        included,
        extras,
        extra_charge_cents,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
