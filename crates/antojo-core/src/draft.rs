//! # Order Draft
//!
//! Line items and the in-progress order (the cart).
//!
//! ## Draft Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Order Draft Operations                          │
//! │                                                                     │
//! │  Customer Action           Draft Change                             │
//! │  ───────────────           ────────────                             │
//! │  Pick menu item ─────────► add_line(LineItem)                       │
//! │  Tap a topping ──────────► line.toggle_topping(id)                  │
//! │  Change quantity ────────► line.set_quantity(n)   (clamps to ≥ 1)   │
//! │  Remove line ────────────► remove_line(line_id)                     │
//! │  Choose delivery ────────► set_delivery(mode, fee)                  │
//! │  View totals ────────────► summary()              (read only)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The draft is a caller-owned value. There is no module-level singleton:
//! whoever builds an order owns the `OrderDraft` and passes it around.
//!
//! Name and pricing are frozen into the line when the item is added, so a
//! draft keeps displaying consistent prices even if the catalog changes
//! underneath it.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::allocation::Allocation;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DeliveryMode, MenuRef, PricingPolicy};
use crate::validation::{validate_money_cents, validate_name};
use crate::{MAX_LINE_QUANTITY, MAX_ORDER_LINES};

// =============================================================================
// Topping Selection
// =============================================================================

/// An ordered topping selection for one line item.
///
/// Selection order is significant: it decides which toppings fall inside
/// the free allotment. Ids are unique within the selection because
/// selecting an already-selected topping removes it (a toggle, not an
/// append-only log).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToppingSelection {
    ids: Vec<String>,
}

impl ToppingSelection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        ToppingSelection { ids: Vec::new() }
    }

    /// Toggles a topping.
    ///
    /// If the topping is not selected it is appended (becoming the newest
    /// selection); if it is already selected it is removed. Returns `true`
    /// when the topping is selected after the call.
    pub fn toggle(&mut self, topping_id: &str) -> bool {
        if let Some(pos) = self.ids.iter().position(|id| id == topping_id) {
            self.ids.remove(pos);
            false
        } else {
            self.ids.push(topping_id.to_string());
            true
        }
    }

    /// Checks whether a topping is currently selected.
    pub fn contains(&self, topping_id: &str) -> bool {
        self.ids.iter().any(|id| id == topping_id)
    }

    /// The selected ids, oldest selection first.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of selected toppings.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Checks whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Removes every selection.
    pub fn clear(&mut self) {
        self.ids.clear();
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One product or package entry in a draft, with its own quantity and
/// topping selection.
///
/// `name` and `pricing` are snapshots taken when the line was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    /// Line id (UUID), assigned by the caller when the line is created.
    pub id: String,

    /// Which menu entry this line sells.
    pub menu_ref: MenuRef,

    /// Display name at the time the line was added (frozen).
    pub name: String,

    /// Pricing at the time the line was added (frozen).
    pub pricing: PricingPolicy,

    /// Topping selection for this line.
    pub toppings: ToppingSelection,

    quantity: i64,
}

impl LineItem {
    /// Creates a new line item with an empty topping selection.
    ///
    /// The pricing snapshot is validated up front so that an invalid
    /// policy can never reach a total. Quantities below 1 clamp to 1;
    /// quantities above [`MAX_LINE_QUANTITY`] are an error.
    pub fn new(
        id: impl Into<String>,
        menu_ref: MenuRef,
        name: impl Into<String>,
        pricing: PricingPolicy,
        quantity: i64,
    ) -> CoreResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_money_cents("unit price", pricing.unit_price_cents)
            .map_err(|_| CoreError::InvalidPricingPolicy {
                reason: format!("unit price is negative ({})", pricing.unit_price_cents),
            })?;
        // Included count and extra price are checked by every allocation,
        // but a bad policy should fail at line creation, not at display time.
        pricing.allocate(&[])?;

        let mut line = LineItem {
            id: id.into(),
            menu_ref,
            name,
            pricing,
            toppings: ToppingSelection::new(),
            quantity: 1,
        };
        line.set_quantity(quantity)?;
        Ok(line)
    }

    /// Current quantity (always ≥ 1).
    #[inline]
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Sets the quantity.
    ///
    /// Values below 1 clamp to 1 rather than failing; values above
    /// [`MAX_LINE_QUANTITY`] fail with [`CoreError::QuantityTooLarge`].
    pub fn set_quantity(&mut self, quantity: i64) -> CoreResult<()> {
        if quantity > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        self.quantity = quantity.max(1);
        Ok(())
    }

    /// Toggles a topping on this line. Returns `true` when the topping is
    /// selected after the call.
    ///
    /// Removing a topping re-runs allocation over the shorter selection,
    /// which can promote a previously-extra topping into the free
    /// allotment. That reclassification is intended behavior.
    pub fn toggle_topping(&mut self, topping_id: &str) -> bool {
        self.toppings.toggle(topping_id)
    }

    /// Runs the allocation rule over the current selection.
    pub fn allocation(&self) -> CoreResult<Allocation> {
        self.pricing.allocate(self.toppings.ids())
    }

    /// Line subtotal: `unit_price × quantity + extra_charge`.
    ///
    /// The extra-topping charge is never folded into the unit price, and
    /// it is flat per line: it does not scale with quantity.
    pub fn subtotal_cents(&self) -> CoreResult<i64> {
        let allocation = self.allocation()?;
        Ok(self.pricing.unit_price_cents * self.quantity + allocation.extra_charge_cents)
    }

    /// Line subtotal as Money.
    pub fn subtotal(&self) -> CoreResult<Money> {
        Ok(Money::from_cents(self.subtotal_cents()?))
    }

    /// Builds the per-line display breakdown.
    pub fn summary(&self) -> CoreResult<LineSummary> {
        let allocation = self.allocation()?;
        let subtotal_cents =
            self.pricing.unit_price_cents * self.quantity + allocation.extra_charge_cents;

        Ok(LineSummary {
            line_id: self.id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            unit_price_cents: self.pricing.unit_price_cents,
            included_toppings: allocation.included,
            extra_toppings: allocation.extras,
            extra_charge_cents: allocation.extra_charge_cents,
            subtotal_cents,
        })
    }
}

// =============================================================================
// Order Draft
// =============================================================================

/// The in-progress order: line items plus a delivery choice.
///
/// Line order is preserved; it is the order the customer sees.
#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    lines: Vec<LineItem>,
    delivery_mode: DeliveryMode,
    delivery_fee_cents: i64,
}

impl OrderDraft {
    /// Creates an empty draft (pickup, no fee).
    pub fn new() -> Self {
        OrderDraft::default()
    }

    /// Adds a line to the draft.
    pub fn add_line(&mut self, line: LineItem) -> CoreResult<&LineItem> {
        if self.lines.len() >= MAX_ORDER_LINES {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_LINES,
            });
        }
        self.lines.push(line);
        Ok(self.lines.last().expect("line was just pushed"))
    }

    /// Removes a line by id, returning it.
    pub fn remove_line(&mut self, line_id: &str) -> CoreResult<LineItem> {
        let pos = self
            .lines
            .iter()
            .position(|l| l.id == line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        Ok(self.lines.remove(pos))
    }

    /// Looks up a line by id.
    pub fn line(&self, line_id: &str) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    /// Looks up a line by id for mutation.
    pub fn line_mut(&mut self, line_id: &str) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|l| l.id == line_id)
    }

    /// All lines, in the order they were added.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Sets delivery mode and fee. Pickup always carries a zero fee.
    pub fn set_delivery(&mut self, mode: DeliveryMode, fee_cents: i64) -> CoreResult<()> {
        validate_money_cents("delivery fee", fee_cents)?;
        self.delivery_mode = mode;
        self.delivery_fee_cents = match mode {
            DeliveryMode::Pickup => 0,
            DeliveryMode::Delivery => fee_cents,
        };
        Ok(())
    }

    /// Current delivery mode.
    pub fn delivery_mode(&self) -> DeliveryMode {
        self.delivery_mode
    }

    /// Current delivery fee in cents.
    pub fn delivery_fee_cents(&self) -> i64 {
        self.delivery_fee_cents
    }

    /// Number of lines in the draft.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Checks if the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Removes every line and resets delivery to pickup.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.delivery_mode = DeliveryMode::Pickup;
        self.delivery_fee_cents = 0;
    }

    /// Sum of line subtotals, before the delivery fee.
    pub fn subtotal_cents(&self) -> CoreResult<i64> {
        let mut subtotal = 0i64;
        for line in &self.lines {
            subtotal += line.subtotal_cents()?;
        }
        Ok(subtotal)
    }

    /// Grand total: line subtotals plus the delivery fee.
    pub fn total_cents(&self) -> CoreResult<i64> {
        Ok(self.subtotal_cents()? + self.delivery_fee_cents)
    }

    /// Builds the full display breakdown for every surface that renders
    /// this draft. Any allocation error aborts the whole summary so a
    /// partial (under-charged) total can never be shown or submitted.
    pub fn summary(&self) -> CoreResult<DraftSummary> {
        let mut lines = Vec::with_capacity(self.lines.len());
        let mut subtotal_cents = 0i64;

        for line in &self.lines {
            let summary = line.summary()?;
            subtotal_cents += summary.subtotal_cents;
            lines.push(summary);
        }

        Ok(DraftSummary {
            lines,
            subtotal_cents,
            delivery_fee_cents: self.delivery_fee_cents,
            total_cents: subtotal_cents + self.delivery_fee_cents,
        })
    }
}

// =============================================================================
// Summary DTOs
// =============================================================================

/// Display breakdown for one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineSummary {
    pub line_id: String,
    pub name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// Toppings covered by the free allotment, in selection order.
    pub included_toppings: Vec<String>,
    /// Toppings billed as extras, in selection order.
    pub extra_toppings: Vec<String>,
    pub extra_charge_cents: i64,
    pub subtotal_cents: i64,
}

/// Display breakdown for the whole draft.
///
/// This is the one structure every price-rendering surface consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DraftSummary {
    pub lines: Vec<LineSummary>,
    pub subtotal_cents: i64,
    pub delivery_fee_cents: i64,
    pub total_cents: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bowl_pricing() -> PricingPolicy {
        // Matches the canonical pricing example: base 30.00, one topping
        // included, extras at 5.00.
        PricingPolicy::new(3000, 1, 500)
    }

    fn bowl_line(id: &str) -> LineItem {
        LineItem::new(
            id,
            MenuRef::Product("bowl".to_string()),
            "Bowl Clásico",
            bowl_pricing(),
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_toggle_selects_and_deselects() {
        let mut selection = ToppingSelection::new();

        assert!(selection.toggle("guacamole"));
        assert!(selection.toggle("queso"));
        assert!(selection.contains("guacamole"));
        assert_eq!(selection.len(), 2);

        // Re-selecting removes, never duplicates.
        assert!(!selection.toggle("guacamole"));
        assert!(!selection.contains("guacamole"));
        assert_eq!(selection.ids().to_vec(), vec!["queso".to_string()]);
    }

    #[test]
    fn test_toggle_reappends_at_the_end() {
        let mut selection = ToppingSelection::new();
        selection.toggle("a");
        selection.toggle("b");
        selection.toggle("a"); // remove
        selection.toggle("a"); // back, now newest

        assert_eq!(
            selection.ids().to_vec(),
            vec!["b".to_string(), "a".to_string()]
        );
    }

    #[test]
    fn test_line_subtotal_scenario() {
        // unit 30.00, included 1, extras 5.00, selection [a, b, c]
        let mut line = bowl_line("l-1");
        line.toggle_topping("a");
        line.toggle_topping("b");
        line.toggle_topping("c");

        let allocation = line.allocation().unwrap();
        assert_eq!(allocation.included, vec!["a".to_string()]);
        assert_eq!(allocation.extras, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(allocation.extra_charge_cents, 1000);
        assert_eq!(line.subtotal_cents().unwrap(), 4000);
    }

    #[test]
    fn test_line_subtotal_empty_selection() {
        let line = bowl_line("l-1");
        assert_eq!(line.subtotal_cents().unwrap(), 3000);
    }

    #[test]
    fn test_removing_topping_reprices_the_line() {
        let mut line = bowl_line("l-1");
        line.toggle_topping("a");
        line.toggle_topping("b");
        line.toggle_topping("c");
        assert_eq!(line.subtotal_cents().unwrap(), 4000);

        // Removing the included topping promotes `b`; one extra remains.
        line.toggle_topping("a");
        let allocation = line.allocation().unwrap();
        assert_eq!(allocation.included, vec!["b".to_string()]);
        assert_eq!(allocation.extras, vec!["c".to_string()]);
        assert_eq!(line.subtotal_cents().unwrap(), 3500);
    }

    #[test]
    fn test_subtotal_is_linear_in_quantity() {
        let mut line = bowl_line("l-1");
        line.toggle_topping("a");
        line.toggle_topping("b"); // one extra: 5.00 flat per line

        for qty in 1..=5 {
            line.set_quantity(qty).unwrap();
            // Extra charge does not scale with quantity.
            assert_eq!(line.subtotal_cents().unwrap(), 3000 * qty + 500);
        }
    }

    #[test]
    fn test_quantity_clamps_below_one() {
        let mut line = bowl_line("l-1");
        line.set_quantity(0).unwrap();
        assert_eq!(line.quantity(), 1);
        line.set_quantity(-5).unwrap();
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn test_quantity_above_max_fails() {
        let mut line = bowl_line("l-1");
        let err = line.set_quantity(MAX_LINE_QUANTITY + 1).unwrap_err();
        assert!(matches!(err, CoreError::QuantityTooLarge { .. }));
        assert_eq!(line.quantity(), 1);
    }

    #[test]
    fn test_line_rejects_invalid_pricing() {
        let bad = PricingPolicy::new(3000, 1, -500);
        let err = LineItem::new(
            "l-1",
            MenuRef::Product("bowl".to_string()),
            "Bowl Clásico",
            bad,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InvalidPricingPolicy { .. }));
    }

    #[test]
    fn test_draft_add_remove_lines() {
        let mut draft = OrderDraft::new();
        draft.add_line(bowl_line("l-1")).unwrap();
        draft.add_line(bowl_line("l-2")).unwrap();
        assert_eq!(draft.len(), 2);

        let removed = draft.remove_line("l-1").unwrap();
        assert_eq!(removed.id, "l-1");
        assert_eq!(draft.len(), 1);
        assert!(draft.line("l-1").is_none());

        let err = draft.remove_line("l-1").unwrap_err();
        assert!(matches!(err, CoreError::LineNotFound(_)));
    }

    #[test]
    fn test_draft_totals_include_delivery_fee() {
        let mut draft = OrderDraft::new();
        draft.add_line(bowl_line("l-1")).unwrap();
        draft.set_delivery(DeliveryMode::Delivery, 2500).unwrap();

        assert_eq!(draft.subtotal_cents().unwrap(), 3000);
        assert_eq!(draft.total_cents().unwrap(), 5500);
    }

    #[test]
    fn test_pickup_resets_fee_to_zero() {
        let mut draft = OrderDraft::new();
        draft.set_delivery(DeliveryMode::Delivery, 2500).unwrap();
        draft.set_delivery(DeliveryMode::Pickup, 2500).unwrap();
        assert_eq!(draft.delivery_fee_cents(), 0);
    }

    #[test]
    fn test_negative_delivery_fee_is_rejected() {
        let mut draft = OrderDraft::new();
        assert!(draft.set_delivery(DeliveryMode::Delivery, -100).is_err());
    }

    #[test]
    fn test_draft_summary_breakdown() {
        let mut draft = OrderDraft::new();
        draft.add_line(bowl_line("l-1")).unwrap();
        {
            let line = draft.line_mut("l-1").unwrap();
            line.toggle_topping("a");
            line.toggle_topping("b");
            line.set_quantity(2).unwrap();
        }
        draft.add_line(bowl_line("l-2")).unwrap();
        draft.set_delivery(DeliveryMode::Delivery, 2500).unwrap();

        let summary = draft.summary().unwrap();
        assert_eq!(summary.lines.len(), 2);

        let first = &summary.lines[0];
        assert_eq!(first.line_id, "l-1");
        assert_eq!(first.included_toppings, vec!["a".to_string()]);
        assert_eq!(first.extra_toppings, vec!["b".to_string()]);
        // 2 × 30.00 + flat 5.00 extra
        assert_eq!(first.subtotal_cents, 6500);

        assert_eq!(summary.subtotal_cents, 6500 + 3000);
        assert_eq!(summary.delivery_fee_cents, 2500);
        assert_eq!(summary.total_cents, 12000);
    }

    #[test]
    fn test_draft_line_cap() {
        let mut draft = OrderDraft::new();
        for i in 0..MAX_ORDER_LINES {
            draft.add_line(bowl_line(&format!("l-{i}"))).unwrap();
        }
        let err = draft.add_line(bowl_line("overflow")).unwrap_err();
        assert!(matches!(err, CoreError::OrderTooLarge { .. }));
    }
}
