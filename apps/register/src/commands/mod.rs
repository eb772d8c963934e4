//! # Commands Module
//!
//! Every action the shell and the CLI can take.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── catalog.rs   ◄─── Product load, search, grouping, sync
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── checkout.rs  ◄─── Summary → cash tender → completion
//! ├── auth.rs      ◄─── Sign-in, sign-up, reset, sign-out
//! ├── admin.rs     ◄─── Dashboard, analytics, inventory, sales history
//! ├── expenses.rs  ◄─── Expense ledger
//! └── users.rs     ◄─── Staff permissions
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Shell line / CLI args                                                  │
//! │  ─────────────────────                                                  │
//! │  "add 3"                                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::cart::add_to_cart(&state.cart, &state.catalog, "3")          │
//! │      -> Result<CartResponse, ApiError>                                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  render (text) or serde_json (--json)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs the catalog to resolve the product
//! fn add_to_cart(cart: &CartState, catalog: &CatalogState, key: &str)
//!
//! // Talks to the backend
//! async fn dashboard(api: &ApiClient)
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod expenses;
pub mod users;
