//! # pesatrack-core: Pure Business Logic for PesaTrack POS
//!
//! Everything the register does that is not I/O lives here: the cart store,
//! the checkout wizard, money parsing, catalog search, pagination and the
//! admin ledgers.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      PesaTrack POS Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Register shell / CLI (apps/register)           │   │
//! │  │    Catalog ──► Cart ──► Checkout ──► Dashboard / Admin views    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ pesatrack-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────────────┐   │   │
//! │  │   │  money   │ │   cart   │ │ checkout │ │ catalog         │   │   │
//! │  │   │  Money   │ │  Cart    │ │ Checkout │ │ search / group  │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └─────────────────┘   │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌─────────────────┐   │   │
//! │  │   │pagination│ │analytics │ │ expenses │ │ permissions     │   │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └─────────────────┘   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILES                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             pesatrack-client (HTTP + session token)             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic and lenient parsing
//! - [`types`] - Domain types (Product, InventoryItem, sales series, ...)
//! - [`cart`] - The cart store, keyed by product id
//! - [`checkout`] - Summary → tender → completion wizard
//! - [`catalog`] - Search filter and category grouping
//! - [`pagination`] - 1-based page cursor used by the admin lists
//! - [`analytics`] - Dashboard / report / monthly sales shaping
//! - [`expenses`] - Expense ledger
//! - [`permissions`] - Staff roster and permission edits
//! - [`validation`] - Form validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pesatrack_core::cart::Cart;
//! use pesatrack_core::money::Money;
//! use pesatrack_core::types::Product;
//!
//! let bread = Product::new("1", "Bread", Money::parse("Kshs. 100").unwrap());
//! let mut cart = Cart::new();
//! cart.add_to_cart(&bread).unwrap();
//! cart.add_to_cart(&bread).unwrap();
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total(), Money::from_major(200));
//! ```

pub mod analytics;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod expenses;
pub mod money;
pub mod pagination;
pub mod permissions;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use checkout::{Checkout, CheckoutStep, CompletedSale};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single cart line.
///
/// Guards against a cashier typing 1000 instead of 10.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Currency prefix printed before amounts when nothing else is configured.
pub const DEFAULT_CURRENCY_PREFIX: &str = "Kshs.";

/// Category used for products the catalog sends without one.
pub const UNCATEGORIZED: &str = "Uncategorized";
