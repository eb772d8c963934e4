//! # Configuration State
//!
//! The loaded `ClientConfig`, read-only for the life of the process.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`PESATRACK_*`)
//! 2. Config file (`--config PATH` or the platform `pesatrack.toml`)
//! 3. Defaults
//!
//! ## Thread Safety
//! Never mutated after startup, so it is shared behind a plain `Arc`.

use std::sync::Arc;
use std::time::Duration;

use pesatrack_client::{CatalogSource, ClientConfig};
use pesatrack_core::Money;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ConfigState {
    config: Arc<ClientConfig>,
}

/// What `config` prints.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSummary {
    pub store_name: String,
    pub api_base_url: String,
    pub catalog_source: CatalogSource,
    pub currency_prefix: String,
    pub timeout_secs: u64,
}

impl ConfigState {
    pub fn new(config: ClientConfig) -> Self {
        ConfigState {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store_name(&self) -> &str {
        &self.config.store.name
    }

    pub fn catalog_source(&self) -> CatalogSource {
        self.config.catalog.source
    }

    /// Formats an amount with the store's currency prefix.
    pub fn money(&self, amount: Money) -> String {
        amount.format_with(&self.config.store.currency_prefix)
    }

    pub fn success_delay(&self) -> Duration {
        self.config.success_delay()
    }

    pub fn inventory_page_size(&self) -> usize {
        self.config.admin.inventory_page_size
    }

    pub fn expenses_page_size(&self) -> usize {
        self.config.admin.expenses_page_size
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            store_name: self.config.store.name.clone(),
            api_base_url: self.config.api.base_url.clone(),
            catalog_source: self.config.catalog.source,
            currency_prefix: self.config.store.currency_prefix.clone(),
            timeout_secs: self.config.api.timeout_secs,
        }
    }
}

impl Default for ConfigState {
    fn default() -> Self {
        ConfigState::new(ClientConfig::default())
    }
}
