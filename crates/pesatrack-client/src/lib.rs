//! # pesatrack-client: Backend Access for PesaTrack POS
//!
//! Configuration, the HTTP client and the session token. Every network call
//! the register makes goes through [`ApiClient`].
//!
//! ## Modules
//! - [`config`] - `pesatrack.toml` + `PESATRACK_*` overrides
//! - [`client`] - `ApiClient`, URL building, response reading
//! - [`session`] - Session token in memory and on disk
//! - [`catalog`] - Product list and sync
//! - [`auth`] - Sign-in, sign-up, password reset, sign-out
//! - [`admin`] - Dashboard, reports, inventory, sales history
//! - [`protocol`] - Wire shapes of request and response bodies
//! - [`error`] - Client error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pesatrack_client::{ApiClient, ClientConfig, SessionStore};
//!
//! # async fn demo() -> pesatrack_client::ClientResult<()> {
//! let config = ClientConfig::load(None)?;
//! let session = SessionStore::new(config.session_path()?);
//! session.load().await?;
//!
//! let api = ApiClient::new(&config, session)?;
//! let products = api.fetch_products(config.catalog.source).await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod session;

pub use auth::request_password_reset;
pub use client::ApiClient;
pub use config::{CatalogSource, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use session::SessionStore;
