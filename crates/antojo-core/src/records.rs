//! # Order Records
//!
//! The versioned, explicitly-typed schema for orders crossing the
//! persistence boundary.
//!
//! ## Boundary Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                                                                     │
//! │   Order (in memory) ──► OrderRecord ──► JSON ──► external storage   │
//! │                                                                     │
//! │   external storage ──► JSON ──► OrderRecord ──► validate() ──► Order│
//! │                                        │                            │
//! │                                        └── reject: bad version,     │
//! │                                            missing fields, totals   │
//! │                                            that don't re-derive     │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every required field is typed; there are no free-form blobs. A record
//! is validated before it is allowed back into the core: amounts must
//! re-derive exactly from the allocation rule, so a tampered or corrupt
//! record can never under-charge silently.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreResult, ValidationError};
use crate::order::{Order, OrderLine, OrderStatus, StatusTimestamps};
use crate::types::{DeliveryMode, MenuRef};
use crate::validation::{validate_money_cents, validate_quantity, validate_selection};

/// Schema version written by this build.
///
/// Bump when a field is added, removed or changes meaning; readers reject
/// versions they do not understand instead of guessing.
pub const ORDER_RECORD_SCHEMA_VERSION: u32 = 1;

// =============================================================================
// Line Record
// =============================================================================

/// One frozen order line as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineRecord {
    pub line_id: String,
    pub item: MenuRef,
    pub name: String,
    pub unit_price_cents: i64,
    pub quantity: i64,
    pub included_toppings: Vec<String>,
    pub extra_toppings: Vec<String>,
    pub extra_charge_cents: i64,
    pub subtotal_cents: i64,
}

impl LineRecord {
    fn from_line(line: &OrderLine) -> Self {
        LineRecord {
            line_id: line.id.clone(),
            item: line.menu_ref.clone(),
            name: line.name.clone(),
            unit_price_cents: line.unit_price_cents,
            quantity: line.quantity,
            included_toppings: line.included_toppings.clone(),
            extra_toppings: line.extra_toppings.clone(),
            extra_charge_cents: line.extra_charge_cents,
            subtotal_cents: line.subtotal_cents,
        }
    }

    fn into_line(self) -> OrderLine {
        OrderLine {
            id: self.line_id,
            menu_ref: self.item,
            name: self.name,
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            included_toppings: self.included_toppings,
            extra_toppings: self.extra_toppings,
            extra_charge_cents: self.extra_charge_cents,
            subtotal_cents: self.subtotal_cents,
        }
    }

    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        let field = |name: &str| format!("lines[{index}].{name}");

        if self.line_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field("line_id"),
            });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field("name"),
            });
        }

        validate_money_cents(&field("unit_price_cents"), self.unit_price_cents)?;
        validate_money_cents(&field("extra_charge_cents"), self.extra_charge_cents)?;
        validate_money_cents(&field("subtotal_cents"), self.subtotal_cents)?;
        validate_quantity(self.quantity)?;

        // Included and extra ids together form one selection; a topping
        // appearing in both (or twice in either) is corrupt data.
        let mut selection = self.included_toppings.clone();
        selection.extend(self.extra_toppings.iter().cloned());
        validate_selection(&selection)?;

        if self.extra_toppings.is_empty() && self.extra_charge_cents != 0 {
            return Err(ValidationError::InvalidFormat {
                field: field("extra_charge_cents"),
                reason: "charge present without extra toppings".to_string(),
            });
        }

        // The subtotal must re-derive from the pricing rule exactly.
        let expected = self.unit_price_cents * self.quantity + self.extra_charge_cents;
        if self.subtotal_cents != expected {
            return Err(ValidationError::InvalidFormat {
                field: field("subtotal_cents"),
                reason: format!(
                    "does not equal unit_price × quantity + extra_charge ({expected})"
                ),
            });
        }

        Ok(())
    }
}

// =============================================================================
// Order Record
// =============================================================================

/// A whole order as persisted, version tag included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderRecord {
    pub schema_version: u32,
    pub order_id: String,
    pub status: OrderStatus,
    pub delivery_mode: DeliveryMode,
    pub delivery_fee_cents: i64,
    pub subtotal_cents: i64,
    pub total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub timestamps: StatusTimestamps,
    pub lines: Vec<LineRecord>,
}

impl OrderRecord {
    /// Snapshots an in-memory order into its persisted form.
    pub fn from_order(order: &Order) -> Self {
        OrderRecord {
            schema_version: ORDER_RECORD_SCHEMA_VERSION,
            order_id: order.id.clone(),
            status: order.status(),
            delivery_mode: order.delivery_mode,
            delivery_fee_cents: order.delivery_fee_cents,
            subtotal_cents: order.subtotal_cents,
            total_cents: order.total_cents,
            created_at: order.created_at,
            timestamps: order.timestamps().clone(),
            lines: order.lines().iter().map(LineRecord::from_line).collect(),
        }
    }

    /// Serializes the record to JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| {
            ValidationError::InvalidFormat {
                field: "order record".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Parses a record from JSON. Field-level validation is separate:
    /// call [`OrderRecord::validate`] (or [`OrderRecord::into_order`])
    /// before trusting the contents.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            ValidationError::InvalidFormat {
                field: "order record".to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Validates the record: schema version, required fields, ranges, and
    /// totals that re-derive exactly from the pricing rule.
    pub fn validate(&self) -> CoreResult<()> {
        if self.schema_version != ORDER_RECORD_SCHEMA_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                found: self.schema_version,
                supported: ORDER_RECORD_SCHEMA_VERSION,
            }
            .into());
        }

        if self.order_id.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "order_id".to_string(),
            }
            .into());
        }

        if self.lines.is_empty() {
            return Err(ValidationError::Required {
                field: "lines".to_string(),
            }
            .into());
        }

        validate_money_cents("delivery_fee_cents", self.delivery_fee_cents)?;
        validate_money_cents("subtotal_cents", self.subtotal_cents)?;
        validate_money_cents("total_cents", self.total_cents)?;

        let mut derived_subtotal = 0i64;
        for (index, line) in self.lines.iter().enumerate() {
            line.validate(index)?;
            derived_subtotal += line.subtotal_cents;
        }

        if self.subtotal_cents != derived_subtotal {
            return Err(ValidationError::InvalidFormat {
                field: "subtotal_cents".to_string(),
                reason: format!("does not equal the sum of line subtotals ({derived_subtotal})"),
            }
            .into());
        }

        let derived_total = derived_subtotal + self.delivery_fee_cents;
        if self.total_cents != derived_total {
            return Err(ValidationError::InvalidFormat {
                field: "total_cents".to_string(),
                reason: format!("does not equal subtotal + delivery fee ({derived_total})"),
            }
            .into());
        }

        Ok(())
    }

    /// Validates the record and rebuilds the in-memory order.
    pub fn into_order(self) -> CoreResult<Order> {
        self.validate()?;

        Ok(Order::from_parts(
            self.order_id,
            self.delivery_mode,
            self.delivery_fee_cents,
            self.subtotal_cents,
            self.total_cents,
            self.created_at,
            self.lines.into_iter().map(LineRecord::into_line).collect(),
            self.status,
            self.timestamps,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
