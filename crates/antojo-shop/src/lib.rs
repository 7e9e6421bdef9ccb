//! # antojo-shop: Application Layer for Antojo
//!
//! Everything between the frontend and the pure pricing core: the menu
//! catalog with its back-office administration, the storefront order
//! builder, and the staff order board.
//!
//! ## Module Organization
//! ```text
//! antojo_shop/
//! ├── lib.rs          ◄─── You are here
//! ├── catalog.rs      ◄─── Products, packages, toppings + admin CRUD
//! ├── storefront.rs   ◄─── Customer-facing order building
//! ├── board.rs        ◄─── Submitted orders & staff status board
//! ├── config.rs       ◄─── Environment configuration
//! ├── telemetry.rs    ◄─── Tracing subscriber setup
//! └── error.rs        ◄─── ShopError and frontend error envelope
//! ```
//!
//! ## State Ownership
//! There is no global state. The embedding application owns one `Catalog`,
//! one `OrderBook`, and one `OrderBuilder` per customer session, and passes
//! them into the functions that need them:
//!
//! ```rust
//! use antojo_shop::{Catalog, NewProduct, NewTopping, OrderBook, OrderBuilder, ShopConfig};
//!
//! let config = ShopConfig::default();
//! let mut catalog = Catalog::new(config.extra_topping_price_cents);
//! let guac = catalog.add_topping(NewTopping { name: "Guacamole".into() }).unwrap().id.clone();
//! let bowl = catalog
//!     .add_product(NewProduct {
//!         name: "Bowl Clásico".into(),
//!         description: None,
//!         price_cents: 3000,
//!         included_toppings: 1,
//!     })
//!     .unwrap()
//!     .id
//!     .clone();
//!
//! let mut builder = OrderBuilder::new();
//! let line = builder.add_product(&catalog, &bowl, 1).unwrap();
//! builder.toggle_topping(&catalog, &line, &guac).unwrap();
//!
//! let mut book = OrderBook::new();
//! let order_id = builder.submit(&mut book).unwrap();
//! assert!(book.order(&order_id).is_some());
//! ```

pub mod board;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storefront;
pub mod telemetry;

pub use board::OrderBook;
pub use catalog::{Catalog, NewPackage, NewProduct, NewTopping, Package, Product, Topping};
pub use config::{ConfigError, ShopConfig};
pub use error::{ErrorBody, ShopError, ShopResult};
pub use storefront::OrderBuilder;
