//! # Order Book & Status Board
//!
//! Submitted orders and the staff-side status workflow.
//!
//! ## Staff Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Status Board (staff screen)                                        │
//! │                                                                     │
//! │  PENDING          IN PREPARATION        READY                       │
//! │  ┌───────────┐    ┌───────────┐         ┌───────────┐               │
//! │  │ #a41  $65 │    │ #9f2  $40 │         │ #c07  $30 │               │
//! │  │ [confirm] │    │ [ready]   │         │ [deliver] │               │
//! │  │ [cancel]  │    │ [cancel]  │         │ [cancel]  │               │
//! │  └───────────┘    └───────────┘         └───────────┘               │
//! │                                                                     │
//! │  advance() moves a card one column right; cancel() retires it.      │
//! │  Rejected moves leave the order untouched.                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The book is insertion-ordered: the oldest order appears first on every
//! listing, which is the order the kitchen works through them.

use chrono::Utc;
use tracing::{info, warn};

use antojo_core::{Order, OrderRecord, OrderStatus};

use crate::error::{ShopError, ShopResult};

// =============================================================================
// Order Book
// =============================================================================

/// The in-memory collection of submitted orders.
#[derive(Debug, Default)]
pub struct OrderBook {
    orders: Vec<Order>,
}

impl OrderBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        OrderBook::default()
    }

    /// Inserts a submitted order.
    pub fn insert(&mut self, order: Order) -> &Order {
        self.orders.push(order);
        self.orders.last().expect("order was just pushed")
    }

    /// Looks up an order by id.
    pub fn order(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == order_id)
    }

    /// All orders, oldest first.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders currently in the given status, oldest first.
    pub fn with_status(&self, status: OrderStatus) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| o.status() == status)
            .collect()
    }

    /// Orders that still need staff attention (non-terminal), oldest first.
    pub fn open_orders(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| !o.status().is_terminal())
            .collect()
    }

    // -------------------------------------------------------------------------
    // Staff actions
    // -------------------------------------------------------------------------

    /// Moves an order to an explicit target status, stamping the
    /// transition time. The order is unchanged on rejection.
    pub fn set_status(&mut self, order_id: &str, to: OrderStatus) -> ShopResult<()> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| ShopError::OrderNotFound(order_id.to_string()))?;

        let from = order.status();
        if let Err(err) = order.transition(to, Utc::now()) {
            warn!(order_id, %from, %to, "status change rejected");
            return Err(err.into());
        }
        info!(order_id, %from, %to, "order status changed");
        Ok(())
    }

    /// Advances an order one step along the happy path, returning the new
    /// status.
    pub fn advance(&mut self, order_id: &str) -> ShopResult<OrderStatus> {
        let current = self
            .order(order_id)
            .ok_or_else(|| ShopError::OrderNotFound(order_id.to_string()))?
            .status();

        // Terminal states have no next step; reuse the transition error so
        // the caller sees one failure shape for every rejected move.
        let next = current.next().unwrap_or(current);
        self.set_status(order_id, next)?;
        Ok(next)
    }

    /// Cancels an order (allowed from any non-terminal status).
    pub fn cancel(&mut self, order_id: &str) -> ShopResult<()> {
        self.set_status(order_id, OrderStatus::Cancelled)
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Exports an order as versioned record JSON for the persistence
    /// collaborator.
    pub fn export_record(&self, order_id: &str) -> ShopResult<String> {
        let order = self
            .order(order_id)
            .ok_or_else(|| ShopError::OrderNotFound(order_id.to_string()))?;
        Ok(OrderRecord::from_order(order).to_json()?)
    }

    /// Imports a persisted record back into the book after full
    /// validation.
    pub fn import_record(&mut self, json: &str) -> ShopResult<&Order> {
        let order = OrderRecord::from_json(json)?.into_order()?;
        info!(order_id = %order.id, status = %order.status(), "order record imported");
        Ok(self.insert(order))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use antojo_core::{
        CoreError, DeliveryMode, LineItem, MenuRef, OrderDraft, PricingPolicy,
        ORDER_RECORD_SCHEMA_VERSION,
    };

    fn sample_order(id: &str) -> Order {
        let mut draft = OrderDraft::new();
        let mut line = LineItem::new(
            format!("{id}-l1"),
            MenuRef::Product("bowl".to_string()),
            "Bowl Clásico",
            PricingPolicy::new(3000, 1, 500),
            1,
        )
        .unwrap();
        line.toggle_topping("guacamole");
        line.toggle_topping("queso");
        draft.add_line(line).unwrap();
        draft.set_delivery(DeliveryMode::Delivery, 2500).unwrap();
        Order::from_draft(id, &draft, Utc::now()).unwrap()
    }

    #[test]
    fn test_advance_walks_the_happy_path() {
        let mut book = OrderBook::new();
        book.insert(sample_order("o-1"));

        assert_eq!(book.advance("o-1").unwrap(), OrderStatus::Confirmed);
        assert_eq!(book.advance("o-1").unwrap(), OrderStatus::InPreparation);
        assert_eq!(book.advance("o-1").unwrap(), OrderStatus::Ready);
        assert_eq!(book.advance("o-1").unwrap(), OrderStatus::Delivered);

        let stamps = book.order("o-1").unwrap().timestamps();
        assert!(stamps.confirmed_at.is_some());
        assert!(stamps.preparation_started_at.is_some());
        assert!(stamps.ready_at.is_some());
        assert!(stamps.delivered_at.is_some());

        // Terminal: no further moves.
        let err = book.advance("o-1").unwrap_err();
        assert!(matches!(
            err,
            ShopError::Core(CoreError::InvalidStateTransition { .. })
        ));
    }

    #[test]
    fn test_set_status_rejects_skips_and_backwards_moves() {
        let mut book = OrderBook::new();
        book.insert(sample_order("o-1"));

        assert!(book.set_status("o-1", OrderStatus::Ready).is_err());
        book.set_status("o-1", OrderStatus::Confirmed).unwrap();
        assert!(book.set_status("o-1", OrderStatus::Pending).is_err());
        assert_eq!(
            book.order("o-1").unwrap().status(),
            OrderStatus::Confirmed
        );
    }

    #[test]
    fn test_cancel_and_board_filtering() {
        let mut book = OrderBook::new();
        book.insert(sample_order("o-1"));
        book.insert(sample_order("o-2"));
        book.insert(sample_order("o-3"));

        book.advance("o-2").unwrap();
        book.cancel("o-3").unwrap();

        let pending: Vec<&str> = book
            .with_status(OrderStatus::Pending)
            .iter()
            .map(|o| o.id.as_str())
            .collect();
        assert_eq!(pending, vec!["o-1"]);

        let open: Vec<&str> = book.open_orders().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(open, vec!["o-1", "o-2"]);

        assert!(book.order("o-3").unwrap().timestamps().cancelled_at.is_some());
        // Cancelled is terminal.
        assert!(book.cancel("o-3").is_err());
    }

    #[test]
    fn test_unknown_order() {
        let mut book = OrderBook::new();
        assert!(matches!(
            book.advance("nope").unwrap_err(),
            ShopError::OrderNotFound(_)
        ));
        assert!(book.export_record("nope").is_err());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut book = OrderBook::new();
        book.insert(sample_order("o-1"));
        book.advance("o-1").unwrap();

        let json = book.export_record("o-1").unwrap();
        assert!(json.contains(&format!("\"schema_version\":{ORDER_RECORD_SCHEMA_VERSION}")));

        let mut restored = OrderBook::new();
        let order = restored.import_record(&json).unwrap();
        assert_eq!(order.id, "o-1");
        assert_eq!(order.status(), OrderStatus::Confirmed);
        assert_eq!(order.total_cents, 6000);
    }

    #[test]
    fn test_import_rejects_tampered_record() {
        let mut book = OrderBook::new();
        book.insert(sample_order("o-1"));
        let json = book.export_record("o-1").unwrap();

        // A record claiming a cheaper total than its lines derive.
        let tampered = json.replace("\"total_cents\":6000", "\"total_cents\":100");
        let mut restored = OrderBook::new();
        assert!(restored.import_record(&tampered).is_err());
    }
}
