//! # Shop Configuration
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. All prices are integer cents, like everywhere else.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// Default flat delivery fee: $25.00.
pub const DEFAULT_DELIVERY_FEE_CENTS: i64 = 2500;

/// Default flat price per extra topping: $5.00.
///
/// One global value shared by every product and package; per-item override
/// is a catalog feature, not a config one.
pub const DEFAULT_EXTRA_TOPPING_PRICE_CENTS: i64 = 500;

// =============================================================================
// Shop Config
// =============================================================================

/// Runtime configuration for the shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Flat delivery fee in cents, applied when the customer chooses
    /// delivery instead of pickup.
    pub delivery_fee_cents: i64,

    /// Flat per-unit price in cents for each topping beyond an item's
    /// included allotment.
    pub extra_topping_price_cents: i64,
}

impl ShopConfig {
    /// Loads configuration from environment variables.
    ///
    /// ## Variables
    /// - `ANTOJO_DELIVERY_FEE_CENTS` (default: 2500)
    /// - `ANTOJO_EXTRA_TOPPING_PRICE_CENTS` (default: 500)
    ///
    /// Unparsable or negative values are a [`ConfigError`], not a silent
    /// fallback: a misconfigured price must never reach the pricing rules.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ShopConfig {
            delivery_fee_cents: read_cents("ANTOJO_DELIVERY_FEE_CENTS", DEFAULT_DELIVERY_FEE_CENTS)?,
            extra_topping_price_cents: read_cents(
                "ANTOJO_EXTRA_TOPPING_PRICE_CENTS",
                DEFAULT_EXTRA_TOPPING_PRICE_CENTS,
            )?,
        })
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            delivery_fee_cents: DEFAULT_DELIVERY_FEE_CENTS,
            extra_topping_price_cents: DEFAULT_EXTRA_TOPPING_PRICE_CENTS,
        }
    }
}

/// Reads one cents value from the environment.
fn read_cents(var: &str, default: i64) -> Result<i64, ConfigError> {
    let cents = match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ConfigError::InvalidValue(var.to_string()))?,
        Err(_) => default,
    };

    if cents < 0 {
        return Err(ConfigError::InvalidValue(var.to_string()));
    }
    Ok(cents)
}

// =============================================================================
// Config Error
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable is set but unparsable or negative.
    #[error("invalid value for {0}")]
    InvalidValue(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShopConfig::default();
        assert_eq!(config.delivery_fee_cents, DEFAULT_DELIVERY_FEE_CENTS);
        assert_eq!(
            config.extra_topping_price_cents,
            DEFAULT_EXTRA_TOPPING_PRICE_CENTS
        );
    }

    #[test]
    fn test_read_cents_rejects_garbage_and_negatives() {
        // Exercised through the parser directly to stay independent of
        // process-wide environment state.
        assert_eq!(read_cents("ANTOJO_TEST_UNSET_VAR", 1234).unwrap(), 1234);
        assert!("abc".parse::<i64>().is_err());

        env::set_var("ANTOJO_TEST_BAD_FEE", "not-a-number");
        assert!(read_cents("ANTOJO_TEST_BAD_FEE", 0).is_err());
        env::set_var("ANTOJO_TEST_NEGATIVE_FEE", "-5");
        assert!(read_cents("ANTOJO_TEST_NEGATIVE_FEE", 0).is_err());
        env::remove_var("ANTOJO_TEST_BAD_FEE");
        env::remove_var("ANTOJO_TEST_NEGATIVE_FEE");
    }
}
