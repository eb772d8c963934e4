//! # Client Configuration
//!
//! Where the backend lives, which endpoints to call, and the few knobs the
//! register exposes.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PESATRACK_API_URL=http://192.168.1.25:5000/                        │
//! │     PESATRACK_CATALOG_SOURCE=json                                      │
//! │                                                                         │
//! │  2. TOML Config File (--config PATH, or the platform default)          │
//! │     ~/.config/pesatrack/pesatrack.toml (Linux)                         │
//! │     ~/Library/Application Support/com.pesatrack.pos/pesatrack.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://192.168.100.20/payment/"
//! timeout_secs = 10
//!
//! [endpoints]
//! sign_in = "sign-in"
//! inventory = "fetch_products.php"
//!
//! [catalog]
//! source = "sql"    # sql | json | mock
//!
//! [store]
//! name = "Mama Mboga Store"
//! currency_prefix = "Kshs."
//!
//! [checkout]
//! success_delay_ms = 2000
//!
//! [admin]
//! inventory_page_size = 8
//! expenses_page_size = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Catalog Source
// =============================================================================

/// Where the register's product list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// `GET products`, backed by the shop database.
    #[default]
    Sql,
    /// `GET products-json`, the exported JSON catalog.
    Json,
    /// Built-in sample list, no network.
    Mock,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Sql => write!(f, "sql"),
            CatalogSource::Json => write!(f, "json"),
            CatalogSource::Mock => write!(f, "mock"),
        }
    }
}

impl std::str::FromStr for CatalogSource {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sql" | "db" | "database" => Ok(CatalogSource::Sql),
            "json" => Ok(CatalogSource::Json),
            "mock" | "offline" => Ok(CatalogSource::Mock),
            other => Err(ClientError::InvalidConfig(format!(
                "Unknown catalog source: '{}'. Valid options: sql, json, mock",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Every relative endpoint path is joined onto this.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Whole-request timeout. A hung backend ends in a timeout error.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Last path segment of `endpoints.sales_details`, replaced per request.
pub const CUSTOMER_PLACEHOLDER: &str = "{customer}";

/// Endpoint paths, relative to `api.base_url` unless absolute.
///
/// `sales_details` ends with a `{customer}` placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointSettings {
    pub products: String,
    pub products_json: String,
    pub sync_products: String,
    pub sign_in: String,
    pub sign_up: String,
    pub dashboard: String,
    pub monthly_sales: String,
    pub detailed_sales: String,
    pub inventory: String,
    pub add_product: String,
    pub update_product: String,
    pub recent_sales: String,
    pub sales_details: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        EndpointSettings {
            products: "products".into(),
            products_json: "products-json".into(),
            sync_products: "sync-products".into(),
            sign_in: "sign-in".into(),
            sign_up: "signup.php".into(),
            dashboard: "admin/dashboard_cal.php".into(),
            monthly_sales: "admin/monthly_sales.php".into(),
            detailed_sales: "admin/detailed_sales.php".into(),
            inventory: "fetch_products.php".into(),
            add_product: "admin/add_products.php".into(),
            update_product: "admin/update_product.php".into(),
            recent_sales: "recent-sales".into(),
            sales_details: "sales-details/{customer}".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default)]
    pub source: CatalogSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    /// Printed before every amount ("Kshs. 100.00").
    #[serde(default = "default_currency_prefix")]
    pub currency_prefix: String,
}

fn default_store_name() -> String {
    "PesaTrack".to_string()
}

fn default_currency_prefix() -> String {
    pesatrack_core::DEFAULT_CURRENCY_PREFIX.to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_prefix: default_currency_prefix(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// How long the "Purchase complete" message stays up.
    #[serde(default = "default_success_delay_ms")]
    pub success_delay_ms: u64,
}

fn default_success_delay_ms() -> u64 {
    2000
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            success_delay_ms: default_success_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminSettings {
    #[serde(default = "default_inventory_page_size")]
    pub inventory_page_size: usize,

    #[serde(default = "default_expenses_page_size")]
    pub expenses_page_size: usize,
}

fn default_inventory_page_size() -> usize {
    8
}

fn default_expenses_page_size() -> usize {
    10
}

impl Default for AdminSettings {
    fn default() -> Self {
        AdminSettings {
            inventory_page_size: default_inventory_page_size(),
            expenses_page_size: default_expenses_page_size(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Token file. Defaults to `session_token` in the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub endpoints: EndpointSettings,

    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,

    #[serde(default)]
    pub admin: AdminSettings,

    #[serde(default)]
    pub session: SessionSettings,
}

impl ClientConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`pesatrack.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the platform default may not.
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
                })?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ClientError::ConfigLoadFailed(format!(
                    "{} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.admin.inventory_page_size == 0 || self.admin.expenses_page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "page sizes must be greater than 0".into(),
            ));
        }

        if !self.endpoints.sales_details.ends_with(CUSTOMER_PLACEHOLDER) {
            return Err(ClientError::InvalidConfig(format!(
                "endpoints.sales_details must end with {}",
                CUSTOMER_PLACEHOLDER
            )));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `PESATRACK_*` overrides from a variable lookup.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("PESATRACK_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(source) = lookup("PESATRACK_CATALOG_SOURCE") {
            match source.parse() {
                Ok(parsed) => {
                    debug!(source = %source, "Overriding catalog source from environment");
                    self.catalog.source = parsed;
                }
                Err(_) => warn!(source = %source, "Unknown catalog source in environment"),
            }
        }

        if let Some(timeout) = lookup("PESATRACK_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => warn!(timeout = %timeout, "Invalid timeout in environment"),
            }
        }

        if let Some(prefix) = lookup("PESATRACK_CURRENCY") {
            self.store.currency_prefix = prefix;
        }

        if let Some(path) = lookup("PESATRACK_SESSION_PATH") {
            debug!(path = %path, "Overriding session path from environment");
            self.session.path = Some(PathBuf::from(path));
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "pesatrack", "pos")
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("pesatrack.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Base URL with a guaranteed trailing slash, so relative joins append.
    pub fn base_url(&self) -> ClientResult<Url> {
        let mut raw = self.api.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    pub fn success_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.success_delay_ms)
    }

    /// Where the session token lives.
    pub fn session_path(&self) -> ClientResult<PathBuf> {
        if let Some(path) = &self.session.path {
            return Ok(path.clone());
        }
        Self::project_dirs()
            .map(|dirs| dirs.data_dir().join("session_token"))
            .ok_or_else(|| ClientError::InvalidConfig("No data directory available".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_catalog_source_parsing() {
        assert_eq!("sql".parse::<CatalogSource>().unwrap(), CatalogSource::Sql);
        assert_eq!("JSON".parse::<CatalogSource>().unwrap(), CatalogSource::Json);
        assert_eq!("mock".parse::<CatalogSource>().unwrap(), CatalogSource::Mock);
        assert!("firebase".parse::<CatalogSource>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.catalog.source, CatalogSource::Sql);
        assert_eq!(config.store.currency_prefix, "Kshs.");
        assert_eq!(config.checkout.success_delay_ms, 2000);
        assert_eq!(config.admin.inventory_page_size, 8);
        assert_eq!(config.admin.expenses_page_size, 10);
        assert_eq!(config.endpoints.sign_up, "signup.php");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.api.base_url = "ftp://files.local/".into();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.api.base_url = "not a url".into();
        assert!(config.validate().is_err());

        config.api.base_url = "https://pos.example.com/api/".into();
        config.api.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.api.timeout_secs = 5;
        config.admin.expenses_page_size = 0;
        assert!(config.validate().is_err());

        config.admin.expenses_page_size = 10;
        config.endpoints.sales_details = "sales-details/{customer}/items".into();
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pesatrack.toml");
        std::fs::write(
            &path,
            r#"
            [api]
            base_url = "http://192.168.100.20/payment"

            [catalog]
            source = "json"

            [endpoints]
            inventory = "inventory/list.php"
            "#,
        )
        .unwrap();

        let config = ClientConfig::load(Some(path)).unwrap();
        assert_eq!(config.catalog.source, CatalogSource::Json);
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.endpoints.inventory, "inventory/list.php");
        assert_eq!(config.endpoints.sign_in, "sign-in");
        assert_eq!(
            config.base_url().unwrap().as_str(),
            "http://192.168.100.20/payment/"
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ClientConfig::load(Some(dir.path().join("nope.toml")));
        assert!(matches!(result, Err(ClientError::ConfigLoadFailed(_))));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("PESATRACK_API_URL", "http://10.0.0.5:5000"),
            ("PESATRACK_CATALOG_SOURCE", "mock"),
            ("PESATRACK_TIMEOUT_SECS", "3"),
            ("PESATRACK_CURRENCY", "KES"),
            ("PESATRACK_SESSION_PATH", "/tmp/pt-session"),
        ]
        .into_iter()
        .collect();

        let mut config = ClientConfig::default();
        config.apply_overrides(|k| vars.get(k).map(|v| v.to_string()));

        assert_eq!(config.api.base_url, "http://10.0.0.5:5000");
        assert_eq!(config.catalog.source, CatalogSource::Mock);
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.store.currency_prefix, "KES");
        assert_eq!(config.session_path().unwrap(), PathBuf::from("/tmp/pt-session"));
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = ClientConfig::default();
        config.apply_overrides(|k| match k {
            "PESATRACK_CATALOG_SOURCE" => Some("carrier-pigeon".into()),
            "PESATRACK_TIMEOUT_SECS" => Some("soon".into()),
            _ => None,
        });

        assert_eq!(config.catalog.source, CatalogSource::Sql);
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pesatrack.toml");

        let mut config = ClientConfig::default();
        config.store.name = "Duka La Mama".into();
        config.save(Some(path.clone())).unwrap();

        let reloaded = ClientConfig::load(Some(path)).unwrap();
        assert_eq!(reloaded.store.name, "Duka La Mama");
    }
}
