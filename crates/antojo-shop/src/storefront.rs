//! # Storefront
//!
//! Customer-facing order building: one `OrderBuilder` per customer
//! session, wrapping the pure draft from antojo-core with catalog checks.
//!
//! ## Order Building Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Storefront Operations                             │
//! │                                                                     │
//! │  Customer Action        Builder Call              Checked Against   │
//! │  ───────────────        ────────────              ───────────────   │
//! │  Pick a bowl ─────────► add_product()             catalog: active   │
//! │  Pick a combo ────────► add_package()             catalog: active   │
//! │  Tap a topping ───────► toggle_topping()          catalog: active   │
//! │  Change quantity ─────► set_quantity()            core: clamp/max   │
//! │  Choose delivery ─────► set_delivery()            config: flat fee  │
//! │  Review order ────────► summary()                 core: allocation  │
//! │  Place order ─────────► submit()                  core: full check  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All price math happens in antojo-core; this module only resolves
//! catalog snapshots, generates ids and logs.

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use antojo_core::{
    CoreError, DeliveryMode, DraftSummary, LineItem, MenuRef, Order, OrderDraft,
};

use crate::board::OrderBook;
use crate::catalog::Catalog;
use crate::config::ShopConfig;
use crate::error::{ShopError, ShopResult};

// =============================================================================
// Order Builder
// =============================================================================

/// Builds one customer's order.
///
/// Owns the draft; callers own the builder. Dropping the builder abandons
/// the draft, submitting consumes it.
#[derive(Debug, Default)]
pub struct OrderBuilder {
    draft: OrderDraft,
}

impl OrderBuilder {
    /// Creates a builder with an empty draft (pickup, no fee).
    pub fn new() -> Self {
        OrderBuilder {
            draft: OrderDraft::new(),
        }
    }

    /// Adds a product line. Name and pricing are frozen into the line at
    /// this moment. Returns the new line's id.
    pub fn add_product(
        &mut self,
        catalog: &Catalog,
        product_id: &str,
        quantity: i64,
    ) -> ShopResult<String> {
        self.add_line(catalog, MenuRef::Product(product_id.to_string()), quantity)
    }

    /// Adds a package line. Returns the new line's id.
    pub fn add_package(
        &mut self,
        catalog: &Catalog,
        package_id: &str,
        quantity: i64,
    ) -> ShopResult<String> {
        self.add_line(catalog, MenuRef::Package(package_id.to_string()), quantity)
    }

    fn add_line(
        &mut self,
        catalog: &Catalog,
        menu_ref: MenuRef,
        quantity: i64,
    ) -> ShopResult<String> {
        let (name, pricing) = catalog.snapshot(&menu_ref)?;
        let line = LineItem::new(
            Uuid::new_v4().to_string(),
            menu_ref,
            name,
            pricing,
            quantity,
        )?;
        let line = self.draft.add_line(line)?;
        debug!(line_id = %line.id, item = %line.name, quantity = line.quantity(), "line added");
        Ok(line.id.clone())
    }

    /// Toggles a topping on a line. Returns `true` when the topping is
    /// selected after the call.
    ///
    /// Selecting requires the topping to exist and be active in the
    /// catalog. Deselecting skips the availability check: a topping that
    /// was deactivated after being picked can still be removed.
    pub fn toggle_topping(
        &mut self,
        catalog: &Catalog,
        line_id: &str,
        topping_id: &str,
    ) -> ShopResult<bool> {
        let line = self
            .draft
            .line_mut(line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;

        if !line.toppings.contains(topping_id) {
            if catalog.topping(topping_id).is_none() {
                return Err(ShopError::ToppingNotFound(topping_id.to_string()));
            }
            if !catalog.topping_available(topping_id) {
                return Err(ShopError::ToppingUnavailable(topping_id.to_string()));
            }
        }

        let selected = line.toggle_topping(topping_id);
        debug!(line_id, topping_id, selected, "topping toggled");
        Ok(selected)
    }

    /// Sets a line's quantity (values below 1 clamp to 1).
    pub fn set_quantity(&mut self, line_id: &str, quantity: i64) -> ShopResult<()> {
        let line = self
            .draft
            .line_mut(line_id)
            .ok_or_else(|| CoreError::LineNotFound(line_id.to_string()))?;
        line.set_quantity(quantity)?;
        Ok(())
    }

    /// Removes a line from the draft.
    pub fn remove_line(&mut self, line_id: &str) -> ShopResult<()> {
        self.draft.remove_line(line_id)?;
        Ok(())
    }

    /// Chooses pickup or delivery; the delivery fee comes from config.
    pub fn set_delivery(&mut self, mode: DeliveryMode, config: &ShopConfig) -> ShopResult<()> {
        self.draft.set_delivery(mode, config.delivery_fee_cents)?;
        Ok(())
    }

    /// The full price breakdown for whatever screen is rendering the cart.
    pub fn summary(&self) -> ShopResult<DraftSummary> {
        Ok(self.draft.summary()?)
    }

    /// Read access to the underlying draft.
    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Checks whether the draft has no lines.
    pub fn is_empty(&self) -> bool {
        self.draft.is_empty()
    }

    /// Submits the draft as an order into the book, consuming the builder.
    ///
    /// Any pricing or allocation error blocks submission entirely. Returns
    /// the new order's id.
    pub fn submit(self, book: &mut OrderBook) -> ShopResult<String> {
        let order = Order::from_draft(Uuid::new_v4().to_string(), &self.draft, Utc::now())?;
        info!(
            order_id = %order.id,
            lines = order.lines().len(),
            total = %order.total(),
            "order submitted"
        );
        let id = order.id.clone();
        book.insert(order);
        Ok(id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
