//! # State Module
//!
//! Everything a command may need, grouped by concern. Commands take only the
//! pieces they use; [`AppState`] is the bundle handed to the shell and CLI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                         AppState                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │        │               │                │               │              │
//! │        ▼               ▼                ▼               ▼              │
//! │  ┌───────────┐  ┌─────────────┐  ┌─────────────┐  ┌────────────────┐  │
//! │  │ CartState │  │CatalogState │  │ AdminState  │  │ ConfigState    │  │
//! │  │           │  │             │  │             │  │ + ApiClient    │  │
//! │  │ Cart +    │  │ products as │  │ expenses,   │  │ (session token │  │
//! │  │ Checkout  │  │ last loaded │  │ staff,      │  │  inside)       │  │
//! │  │ (Mutex)   │  │ (RwLock)    │  │ inventory   │  │                │  │
//! │  └───────────┘  └─────────────┘  └─────────────┘  └────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: one Mutex over cart and checkout together                │
//! │  • CatalogState: RwLock, many readers, replaced on load/sync           │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod admin;
mod cart;
mod catalog;
mod config;

pub use admin::AdminState;
pub use cart::CartState;
pub use catalog::CatalogState;
pub use config::{ConfigState, ConfigSummary};

use pesatrack_client::{ApiClient, ClientConfig, ClientResult, SessionStore};
use tracing::info;

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: ConfigState,
    pub api: ApiClient,
    pub cart: CartState,
    pub catalog: CatalogState,
    pub admin: AdminState,
}

impl AppState {
    /// Builds state from configuration and loads any stored session token.
    pub async fn init(config: ClientConfig) -> ClientResult<Self> {
        let session = SessionStore::new(config.session_path()?);
        let signed_in = session.load().await?.is_some();

        let api = ApiClient::new(&config, session)?;
        info!(
            base_url = %api.base_url(),
            catalog = %config.catalog.source,
            signed_in,
            "Register state initialized"
        );

        Ok(AppState {
            config: ConfigState::new(config),
            api,
            cart: CartState::new(),
            catalog: CatalogState::new(),
            admin: AdminState::seeded(),
        })
    }
}
