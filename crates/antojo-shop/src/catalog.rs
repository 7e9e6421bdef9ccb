//! # Catalog
//!
//! The menu: products, packages and toppings, plus the back-office
//! administration that maintains them.
//!
//! ## Catalog Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Invariants                           │
//! │                                                                     │
//! │  • Names are unique per entity kind (products / packages /         │
//! │    toppings each have their own namespace)                          │
//! │  • Deactivation is a soft delete: history keeps its references      │
//! │  • No product or package may include more free toppings than        │
//! │    there are active toppings in the catalog                         │
//! │  • Deactivating a topping is refused while it would break the       │
//! │    rule above for any active menu item                              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The catalog is a caller-owned value; the embedding application decides
//! where it lives and how it is shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ts_rs::TS;
use uuid::Uuid;

use antojo_core::validation::{
    validate_description, validate_included_count, validate_money_cents, validate_name,
};
use antojo_core::{MenuRef, PricingPolicy};

use crate::error::{ShopError, ShopResult};

// =============================================================================
// Catalog Entities
// =============================================================================

/// An optional add-on selectable per product/package line item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Topping {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Display name shown to the customer.
    pub name: String,
    /// Whether the topping can currently be selected (soft delete).
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A single sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Base price in cents, before extra toppings.
    pub price_cents: i64,
    /// Toppings included in the base price.
    pub included_toppings: i64,
    /// Whether the product is currently on the menu (soft delete).
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Pricing snapshot for this product under the shop's flat
    /// extra-topping price.
    pub fn pricing(&self, extra_topping_price_cents: i64) -> PricingPolicy {
        PricingPolicy::new(
            self.price_cents,
            self.included_toppings,
            extra_topping_price_cents,
        )
    }
}

/// A package deal bundling several products under one price.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Package {
    /// Unique identifier (UUID v4).
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Package price in cents, before extra toppings.
    pub price_cents: i64,
    /// Toppings included in the package price.
    pub included_toppings: i64,
    /// The bundled products.
    pub product_ids: Vec<String>,
    /// Whether the package is currently on the menu (soft delete).
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Package {
    /// Pricing snapshot for this package under the shop's flat
    /// extra-topping price.
    pub fn pricing(&self, extra_topping_price_cents: i64) -> PricingPolicy {
        PricingPolicy::new(
            self.price_cents,
            self.included_toppings,
            extra_topping_price_cents,
        )
    }
}

// =============================================================================
// Admin Form Payloads
// =============================================================================

/// Back-office payload for creating or updating a topping.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewTopping {
    pub name: String,
}

/// Back-office payload for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub included_toppings: i64,
}

/// Back-office payload for creating or updating a package.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewPackage {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub included_toppings: i64,
    pub product_ids: Vec<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// The in-memory menu catalog.
///
/// Entity vectors keep insertion order, which is also menu display order.
#[derive(Debug, Clone)]
pub struct Catalog {
    extra_topping_price_cents: i64,
    toppings: Vec<Topping>,
    products: Vec<Product>,
    packages: Vec<Package>,
}

impl Catalog {
    /// Creates an empty catalog with the shop's flat extra-topping price.
    pub fn new(extra_topping_price_cents: i64) -> Self {
        Catalog {
            extra_topping_price_cents,
            toppings: Vec::new(),
            products: Vec::new(),
            packages: Vec::new(),
        }
    }

    /// The flat per-extra-topping price in cents.
    pub fn extra_topping_price_cents(&self) -> i64 {
        self.extra_topping_price_cents
    }

    // -------------------------------------------------------------------------
    // Topping administration
    // -------------------------------------------------------------------------

    /// Adds a topping to the catalog.
    pub fn add_topping(&mut self, new: NewTopping) -> ShopResult<&Topping> {
        validate_name(&new.name).map_err(antojo_core::CoreError::from)?;
        self.ensure_unique_name("topping", &new.name, self.toppings.iter().map(|t| &t.name))?;

        let now = Utc::now();
        let topping = Topping {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        debug!(topping = %topping.name, "topping added to catalog");
        self.toppings.push(topping);
        Ok(self.toppings.last().expect("topping was just pushed"))
    }

    /// Renames a topping.
    pub fn rename_topping(&mut self, topping_id: &str, name: &str) -> ShopResult<()> {
        validate_name(name).map_err(antojo_core::CoreError::from)?;
        self.ensure_unique_name(
            "topping",
            name,
            self.toppings
                .iter()
                .filter(|t| t.id != topping_id)
                .map(|t| &t.name),
        )?;

        let topping = self
            .toppings
            .iter_mut()
            .find(|t| t.id == topping_id)
            .ok_or_else(|| ShopError::ToppingNotFound(topping_id.to_string()))?;
        topping.name = name.trim().to_string();
        topping.updated_at = Utc::now();
        Ok(())
    }

    /// Deactivates a topping (soft delete).
    ///
    /// Refused while any active product or package would end up including
    /// more free toppings than the catalog still offers.
    pub fn deactivate_topping(&mut self, topping_id: &str) -> ShopResult<()> {
        let exists_active = self
            .toppings
            .iter()
            .any(|t| t.id == topping_id && t.is_active);
        if !exists_active {
            return Err(ShopError::ToppingNotFound(topping_id.to_string()));
        }

        let remaining = (self.active_topping_count() - 1) as i64;
        let blocking = self
            .products
            .iter()
            .filter(|p| p.is_active && p.included_toppings > remaining)
            .count()
            + self
                .packages
                .iter()
                .filter(|p| p.is_active && p.included_toppings > remaining)
                .count();
        if blocking > 0 {
            return Err(ShopError::ToppingStillRequired {
                id: topping_id.to_string(),
                blocking,
            });
        }

        let topping = self
            .toppings
            .iter_mut()
            .find(|t| t.id == topping_id)
            .expect("existence checked above");
        topping.is_active = false;
        topping.updated_at = Utc::now();
        info!(topping_id, "topping deactivated");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Product administration
    // -------------------------------------------------------------------------

    /// Adds a product to the catalog.
    pub fn add_product(&mut self, new: NewProduct) -> ShopResult<&Product> {
        self.validate_menu_entry(&new.name, new.description.as_deref(), new.price_cents, new.included_toppings)?;
        self.ensure_unique_name("product", &new.name, self.products.iter().map(|p| &p.name))?;

        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            description: new.description,
            price_cents: new.price_cents,
            included_toppings: new.included_toppings,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        info!(product = %product.name, price_cents = product.price_cents, "product added to catalog");
        self.products.push(product);
        Ok(self.products.last().expect("product was just pushed"))
    }

    /// Replaces a product's editable fields.
    pub fn update_product(&mut self, product_id: &str, new: NewProduct) -> ShopResult<()> {
        self.validate_menu_entry(&new.name, new.description.as_deref(), new.price_cents, new.included_toppings)?;
        self.ensure_unique_name(
            "product",
            &new.name,
            self.products
                .iter()
                .filter(|p| p.id != product_id)
                .map(|p| &p.name),
        )?;

        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;
        product.name = new.name.trim().to_string();
        product.description = new.description;
        product.price_cents = new.price_cents;
        product.included_toppings = new.included_toppings;
        product.updated_at = Utc::now();
        Ok(())
    }

    /// Deactivates a product (soft delete).
    pub fn deactivate_product(&mut self, product_id: &str) -> ShopResult<()> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id == product_id)
            .ok_or_else(|| ShopError::ProductNotFound(product_id.to_string()))?;
        product.is_active = false;
        product.updated_at = Utc::now();
        info!(product_id, "product deactivated");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Package administration
    // -------------------------------------------------------------------------

    /// Adds a package to the catalog. Every bundled product must exist
    /// and be active at creation time.
    pub fn add_package(&mut self, new: NewPackage) -> ShopResult<&Package> {
        self.validate_menu_entry(&new.name, new.description.as_deref(), new.price_cents, new.included_toppings)?;
        self.ensure_unique_name("package", &new.name, self.packages.iter().map(|p| &p.name))?;
        self.ensure_products_sellable(&new.product_ids)?;

        let now = Utc::now();
        let package = Package {
            id: Uuid::new_v4().to_string(),
            name: new.name.trim().to_string(),
            description: new.description,
            price_cents: new.price_cents,
            included_toppings: new.included_toppings,
            product_ids: new.product_ids,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        info!(package = %package.name, price_cents = package.price_cents, "package added to catalog");
        self.packages.push(package);
        Ok(self.packages.last().expect("package was just pushed"))
    }

    /// Replaces a package's editable fields.
    pub fn update_package(&mut self, package_id: &str, new: NewPackage) -> ShopResult<()> {
        self.validate_menu_entry(&new.name, new.description.as_deref(), new.price_cents, new.included_toppings)?;
        self.ensure_unique_name(
            "package",
            &new.name,
            self.packages
                .iter()
                .filter(|p| p.id != package_id)
                .map(|p| &p.name),
        )?;
        self.ensure_products_sellable(&new.product_ids)?;

        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == package_id)
            .ok_or_else(|| ShopError::PackageNotFound(package_id.to_string()))?;
        package.name = new.name.trim().to_string();
        package.description = new.description;
        package.price_cents = new.price_cents;
        package.included_toppings = new.included_toppings;
        package.product_ids = new.product_ids;
        package.updated_at = Utc::now();
        Ok(())
    }

    /// Deactivates a package (soft delete).
    pub fn deactivate_package(&mut self, package_id: &str) -> ShopResult<()> {
        let package = self
            .packages
            .iter_mut()
            .find(|p| p.id == package_id)
            .ok_or_else(|| ShopError::PackageNotFound(package_id.to_string()))?;
        package.is_active = false;
        package.updated_at = Utc::now();
        info!(package_id, "package deactivated");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Lookups
    // -------------------------------------------------------------------------

    /// Looks up a topping by id.
    pub fn topping(&self, topping_id: &str) -> Option<&Topping> {
        self.toppings.iter().find(|t| t.id == topping_id)
    }

    /// Looks up a product by id.
    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    /// Looks up a package by id.
    pub fn package(&self, package_id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == package_id)
    }

    /// Active toppings, in menu order. The topping catalog shown to
    /// customers while customizing a line.
    pub fn active_toppings(&self) -> Vec<&Topping> {
        self.toppings.iter().filter(|t| t.is_active).collect()
    }

    /// Number of active toppings.
    pub fn active_topping_count(&self) -> usize {
        self.toppings.iter().filter(|t| t.is_active).count()
    }

    /// Active products, in menu order.
    pub fn active_products(&self) -> Vec<&Product> {
        self.products.iter().filter(|p| p.is_active).collect()
    }

    /// Active packages, in menu order.
    pub fn active_packages(&self) -> Vec<&Package> {
        self.packages.iter().filter(|p| p.is_active).collect()
    }

    /// Checks that a topping exists and is active.
    pub fn topping_available(&self, topping_id: &str) -> bool {
        self.toppings
            .iter()
            .any(|t| t.id == topping_id && t.is_active)
    }

    /// Resolves a menu reference to a sellable (name, pricing) snapshot.
    ///
    /// This is the single lookup the storefront uses when a customer adds
    /// an item; deactivated entries are not sellable.
    pub fn snapshot(&self, menu_ref: &MenuRef) -> ShopResult<(String, PricingPolicy)> {
        match menu_ref {
            MenuRef::Product(id) => {
                let product = self
                    .product(id)
                    .ok_or_else(|| ShopError::ProductNotFound(id.clone()))?;
                if !product.is_active {
                    return Err(ShopError::MenuItemUnavailable(id.clone()));
                }
                Ok((
                    product.name.clone(),
                    product.pricing(self.extra_topping_price_cents),
                ))
            }
            MenuRef::Package(id) => {
                let package = self
                    .package(id)
                    .ok_or_else(|| ShopError::PackageNotFound(id.clone()))?;
                if !package.is_active {
                    return Err(ShopError::MenuItemUnavailable(id.clone()));
                }
                Ok((
                    package.name.clone(),
                    package.pricing(self.extra_topping_price_cents),
                ))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Shared validation
    // -------------------------------------------------------------------------

    fn validate_menu_entry(
        &self,
        name: &str,
        description: Option<&str>,
        price_cents: i64,
        included_toppings: i64,
    ) -> ShopResult<()> {
        validate_name(name).map_err(antojo_core::CoreError::from)?;
        if let Some(description) = description {
            validate_description(description).map_err(antojo_core::CoreError::from)?;
        }
        validate_money_cents("price", price_cents).map_err(antojo_core::CoreError::from)?;
        validate_included_count(included_toppings).map_err(antojo_core::CoreError::from)?;

        let available = self.active_topping_count() as i64;
        if included_toppings > available {
            return Err(ShopError::IncludedExceedsToppings {
                name: name.trim().to_string(),
                included: included_toppings,
                available,
            });
        }
        Ok(())
    }

    fn ensure_unique_name<'a>(
        &self,
        kind: &'static str,
        name: &str,
        existing: impl Iterator<Item = &'a String>,
    ) -> ShopResult<()> {
        let wanted = name.trim().to_lowercase();
        for other in existing {
            if other.to_lowercase() == wanted {
                return Err(ShopError::DuplicateName {
                    kind,
                    name: name.trim().to_string(),
                });
            }
        }
        Ok(())
    }

    fn ensure_products_sellable(&self, product_ids: &[String]) -> ShopResult<()> {
        for id in product_ids {
            let product = self
                .product(id)
                .ok_or_else(|| ShopError::ProductNotFound(id.clone()))?;
            if !product.is_active {
                return Err(ShopError::MenuItemUnavailable(id.clone()));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
