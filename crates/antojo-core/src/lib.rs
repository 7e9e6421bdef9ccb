//! # antojo-core: Pure Business Logic for Antojo
//!
//! This crate is the **heart** of the Antojo ordering system. It contains all
//! pricing and order logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Antojo Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                     Frontend (React)                          │ │
//! │  │   Menu UI ──► Cart UI ──► Checkout UI ──► Status Board UI     │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                     antojo-shop                               │ │
//! │  │   Catalog admin, order building, order book, config           │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │               ★ antojo-core (THIS CRATE) ★                    │ │
//! │  │                                                               │ │
//! │  │   ┌─────────┐ ┌────────────┐ ┌─────────┐ ┌─────────────────┐ │ │
//! │  │   │  money  │ │ allocation │ │  draft  │ │ order / records │ │ │
//! │  │   └─────────┘ └────────────┘ └─────────┘ └─────────────────┘ │ │
//! │  │                                                               │ │
//! │  │   NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS            │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`allocation`] - included-vs-extra topping split and extra charges
//! - [`types`] - pricing policy, menu references, delivery modes
//! - [`draft`] - line items and the order draft (cart)
//! - [`order`] - submitted orders and the status lifecycle
//! - [`records`] - versioned order record schema for persistence boundaries
//! - [`validation`] - input validation rules
//! - [`error`] - domain error types
//!
//! ## Design Principles
//!
//! 1. **Single source of truth**: the topping allocation rule lives in
//!    [`allocation`] and nowhere else; every total on every screen is
//!    derived from it.
//! 2. **Pure functions**: deterministic, no side effects, no clock reads.
//!    Timestamps are always passed in by the caller.
//! 3. **Integer money**: all monetary values are cents (i64).
//! 4. **Explicit errors**: all failures are typed, never strings or panics.
//!
//! ## Example Usage
//!
//! ```rust
//! use antojo_core::allocation::allocate;
//!
//! // "Bowl" includes 1 free topping; extras are 5.00 each.
//! let selected = vec![
//!     "guacamole".to_string(),
//!     "queso".to_string(),
//!     "elote".to_string(),
//! ];
//! let result = allocate(&selected, 1, 500).unwrap();
//!
//! assert_eq!(result.included, vec!["guacamole".to_string()]);
//! assert_eq!(result.extra_count(), 2);
//! assert_eq!(result.extra_charge_cents, 1000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod allocation;
pub mod draft;
pub mod error;
pub mod money;
pub mod order;
pub mod records;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use antojo_core::Money` instead of
// `use antojo_core::money::Money`

pub use allocation::{allocate, Allocation};
pub use draft::{DraftSummary, LineItem, LineSummary, OrderDraft, ToppingSelection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{Order, OrderStatus, StatusTimestamps};
pub use records::{LineRecord, OrderRecord, ORDER_RECORD_SCHEMA_VERSION};
pub use types::{DeliveryMode, MenuRef, PricingPolicy};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single order draft.
///
/// Prevents runaway drafts and keeps submissions a reasonable size.
pub const MAX_ORDER_LINES: usize = 50;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 99;
