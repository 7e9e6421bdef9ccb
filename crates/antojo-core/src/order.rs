//! # Orders & Status Lifecycle
//!
//! A submitted order: frozen line snapshots plus the staff-driven status
//! machine.
//!
//! ## Status Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │  pending ──► confirmed ──► in_preparation ──► ready ──► delivered   │
//! │     │            │               │              │           ▲       │
//! │     │            │               │              │       terminal    │
//! │     └────────────┴───────────────┴──────────────┘                   │
//! │                          │                                          │
//! │                          ▼                                          │
//! │                      cancelled  (terminal)                          │
//! │                                                                     │
//! │  One-directional, no skipping. Each transition stamps the           │
//! │  timestamp named for the state being entered.                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line items are frozen snapshots taken at submission time, not live
//! references to the catalog: once an order leaves `pending`, nothing about
//! its amounts can change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::draft::OrderDraft;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DeliveryMode, MenuRef};

// =============================================================================
// Order Status
// =============================================================================

/// Status of a submitted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum OrderStatus {
    /// Submitted, awaiting staff confirmation.
    Pending,
    /// Accepted by staff.
    Confirmed,
    /// Kitchen has started preparing it.
    InPreparation,
    /// Ready for pickup / waiting for the courier.
    Ready,
    /// Handed to the customer. Terminal.
    Delivered,
    /// Cancelled by staff before delivery. Terminal.
    Cancelled,
}

impl OrderStatus {
    /// Wire/display name (matches the serde encoding).
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::InPreparation => "in_preparation",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Terminal states allow no further transitions.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// The next status on the happy path, if any.
    pub const fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::InPreparation),
            OrderStatus::InPreparation => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered | OrderStatus::Cancelled => None,
        }
    }

    /// The allowed-transition predicate.
    ///
    /// Exactly two moves are legal from a non-terminal state: the next
    /// happy-path status, or `cancelled`. Backwards moves, skips and any
    /// move out of a terminal state are rejected.
    pub fn can_transition_to(&self, to: OrderStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match to {
            OrderStatus::Cancelled => true,
            _ => self.next() == Some(to),
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Status Timestamps
// =============================================================================

/// One timestamp per reached status, stamped at transition time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusTimestamps {
    #[ts(as = "Option<String>")]
    pub confirmed_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub preparation_started_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub ready_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub delivered_at: Option<DateTime<Utc>>,
    #[ts(as = "Option<String>")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl StatusTimestamps {
    /// Records the time a status was entered. `pending` is covered by the
    /// order's creation time and stamps nothing here.
    fn stamp(&mut self, status: OrderStatus, at: DateTime<Utc>) {
        match status {
            OrderStatus::Pending => {}
            OrderStatus::Confirmed => self.confirmed_at = Some(at),
            OrderStatus::InPreparation => self.preparation_started_at = Some(at),
            OrderStatus::Ready => self.ready_at = Some(at),
            OrderStatus::Delivered => self.delivered_at = Some(at),
            OrderStatus::Cancelled => self.cancelled_at = Some(at),
        }
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A frozen line snapshot inside a submitted order.
///
/// Carries the allocation result and the computed subtotal so the
/// historical record stays correct even if pricing rules change later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderLine {
    pub id: String,
    pub menu_ref: MenuRef,
    /// Name at submission time (frozen).
    pub name: String,
    /// Base price in cents at submission time (frozen).
    pub unit_price_cents: i64,
    pub quantity: i64,
    /// Toppings covered by the free allotment, in selection order.
    pub included_toppings: Vec<String>,
    /// Toppings billed as extras, in selection order.
    pub extra_toppings: Vec<String>,
    /// Flat extra-topping charge for the line, in cents.
    pub extra_charge_cents: i64,
    /// `unit_price × quantity + extra_charge`, in cents.
    pub subtotal_cents: i64,
}

impl OrderLine {
    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A submitted order.
///
/// Created from a draft at submission; afterwards only `status` (and its
/// timestamp) ever changes. Lines and amounts are immutable history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub delivery_mode: DeliveryMode,
    pub delivery_fee_cents: i64,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    pub created_at: DateTime<Utc>,
    lines: Vec<OrderLine>,
    status: OrderStatus,
    timestamps: StatusTimestamps,
}

impl Order {
    /// Freezes a draft into an order.
    ///
    /// Every line is priced through the allocation rule one final time;
    /// any pricing error blocks submission entirely rather than defaulting
    /// to zero extras, which would under-charge.
    pub fn from_draft(
        id: impl Into<String>,
        draft: &OrderDraft,
        created_at: DateTime<Utc>,
    ) -> CoreResult<Order> {
        if draft.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let mut lines = Vec::with_capacity(draft.len());
        let mut subtotal_cents = 0i64;

        for line in draft.lines() {
            let summary = line.summary()?;
            subtotal_cents += summary.subtotal_cents;
            lines.push(OrderLine {
                id: summary.line_id,
                menu_ref: line.menu_ref.clone(),
                name: summary.name,
                unit_price_cents: summary.unit_price_cents,
                quantity: summary.quantity,
                included_toppings: summary.included_toppings,
                extra_toppings: summary.extra_toppings,
                extra_charge_cents: summary.extra_charge_cents,
                subtotal_cents: summary.subtotal_cents,
            });
        }

        Ok(Order {
            id: id.into(),
            delivery_mode: draft.delivery_mode(),
            delivery_fee_cents: draft.delivery_fee_cents(),
            subtotal_cents,
            total_cents: subtotal_cents + draft.delivery_fee_cents(),
            created_at,
            lines,
            status: OrderStatus::Pending,
            timestamps: StatusTimestamps::default(),
        })
    }

    /// Rebuilds an order from already-validated record parts.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: String,
        delivery_mode: DeliveryMode,
        delivery_fee_cents: i64,
        subtotal_cents: i64,
        total_cents: i64,
        created_at: DateTime<Utc>,
        lines: Vec<OrderLine>,
        status: OrderStatus,
        timestamps: StatusTimestamps,
    ) -> Order {
        Order {
            id,
            delivery_mode,
            delivery_fee_cents,
            subtotal_cents,
            total_cents,
            created_at,
            lines,
            status,
            timestamps,
        }
    }

    /// The frozen lines, in customer display order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// Current status.
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Transition timestamps recorded so far.
    pub fn timestamps(&self) -> &StatusTimestamps {
        &self.timestamps
    }

    /// Grand total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// Moves the order to a new status, stamping the transition time.
    ///
    /// Fails with [`CoreError::InvalidStateTransition`] for any move the
    /// lifecycle forbids; the order is left unchanged in that case.
    pub fn transition(&mut self, to: OrderStatus, at: DateTime<Utc>) -> CoreResult<()> {
        if !self.status.can_transition_to(to) {
            return Err(CoreError::InvalidStateTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.timestamps.stamp(to, at);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::LineItem;
    use crate::types::PricingPolicy;
    use chrono::TimeZone;

    fn t(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn sample_draft() -> OrderDraft {
        let mut draft = OrderDraft::new();
        let mut line = LineItem::new(
            "l-1",
            MenuRef::Product("bowl".to_string()),
            "Bowl Clásico",
            PricingPolicy::new(3000, 1, 500),
            1,
        )
        .unwrap();
        line.toggle_topping("guacamole");
        line.toggle_topping("queso");
        line.toggle_topping("elote");
        draft.add_line(line).unwrap();
        draft.set_delivery(DeliveryMode::Delivery, 2500).unwrap();
        draft
    }

    #[test]
    fn test_happy_path_in_order() {
        let statuses = [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::InPreparation,
            OrderStatus::Ready,
            OrderStatus::Delivered,
        ];
        for pair in statuses.windows(2) {
            assert_eq!(pair[0].next(), Some(pair[1]));
            assert!(pair[0].can_transition_to(pair[1]));
        }
        assert_eq!(OrderStatus::Delivered.next(), None);
    }

    #[test]
    fn test_no_backwards_or_skipping_moves() {
        assert!(!OrderStatus::Ready.can_transition_to(OrderStatus::Pending));
        assert!(!OrderStatus::Confirmed.can_transition_to(OrderStatus::Confirmed));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Ready));
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn test_cancel_from_any_non_terminal_state() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::InPreparation,
            OrderStatus::Ready,
        ] {
            assert!(status.can_transition_to(OrderStatus::Cancelled));
        }
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_from_draft_freezes_lines_and_totals() {
        let order = Order::from_draft("o-1", &sample_draft(), t(0)).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.lines().len(), 1);

        let line = &order.lines()[0];
        assert_eq!(line.included_toppings, vec!["guacamole".to_string()]);
        assert_eq!(
            line.extra_toppings,
            vec!["queso".to_string(), "elote".to_string()]
        );
        assert_eq!(line.extra_charge_cents, 1000);
        assert_eq!(line.subtotal_cents, 4000);

        assert_eq!(order.subtotal_cents, 4000);
        assert_eq!(order.delivery_fee_cents, 2500);
        assert_eq!(order.total_cents, 6500);
        assert_eq!(order.total(), Money::from_cents(6500));
    }

    #[test]
    fn test_empty_draft_cannot_be_submitted() {
        let err = Order::from_draft("o-1", &OrderDraft::new(), t(0)).unwrap_err();
        assert!(matches!(err, CoreError::EmptyOrder));
    }

    #[test]
    fn test_transitions_stamp_timestamps() {
        let mut order = Order::from_draft("o-1", &sample_draft(), t(0)).unwrap();

        order.transition(OrderStatus::Confirmed, t(60)).unwrap();
        order.transition(OrderStatus::InPreparation, t(120)).unwrap();
        order.transition(OrderStatus::Ready, t(600)).unwrap();

        let stamps = order.timestamps();
        assert_eq!(stamps.confirmed_at, Some(t(60)));
        assert_eq!(stamps.preparation_started_at, Some(t(120)));
        assert_eq!(stamps.ready_at, Some(t(600)));
        assert_eq!(stamps.delivered_at, None);
    }

    #[test]
    fn test_ready_rejects_backwards_then_delivers() {
        let mut order = Order::from_draft("o-1", &sample_draft(), t(0)).unwrap();
        order.transition(OrderStatus::Confirmed, t(1)).unwrap();
        order.transition(OrderStatus::InPreparation, t(2)).unwrap();
        order.transition(OrderStatus::Ready, t(3)).unwrap();

        // Backwards move: rejected, order unchanged.
        let err = order.transition(OrderStatus::Pending, t(4)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStateTransition { .. }));
        assert_eq!(order.status(), OrderStatus::Ready);

        // Forward move: succeeds and stamps.
        order.transition(OrderStatus::Delivered, t(5)).unwrap();
        assert_eq!(order.status(), OrderStatus::Delivered);
        assert_eq!(order.timestamps().delivered_at, Some(t(5)));

        // Terminal: nothing further is allowed.
        let err = order.transition(OrderStatus::Cancelled, t(6)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidStateTransition { .. }));
    }

    #[test]
    fn test_cancelled_stamps_and_is_terminal() {
        let mut order = Order::from_draft("o-1", &sample_draft(), t(0)).unwrap();
        order.transition(OrderStatus::Cancelled, t(30)).unwrap();

        assert_eq!(order.status(), OrderStatus::Cancelled);
        assert_eq!(order.timestamps().cancelled_at, Some(t(30)));
        assert!(order
            .transition(OrderStatus::Confirmed, t(31))
            .is_err());
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(OrderStatus::InPreparation.to_string(), "in_preparation");
        assert_eq!(OrderStatus::Pending.to_string(), "pending");
    }
}
