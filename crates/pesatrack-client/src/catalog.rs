//! # Catalog Endpoints
//!
//! Product list for the register, from whichever source is configured, and
//! the backend-side sync trigger.
//!
//! ## Sync Flow
//! ```text
//! sync ──► POST sync-products ──► { success } ──► GET products (refetch)
//!                              └► { error }   ──► Backend(error), no refetch
//! ```

use pesatrack_core::catalog::{extract_products, mock_products};
use pesatrack_core::Product;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::client::ApiClient;
use crate::config::CatalogSource;
use crate::error::{ClientError, ClientResult};
use crate::protocol::StatusResponse;

impl ApiClient {
    /// Fetches the sellable products.
    ///
    /// A body that is not JSON or has no usable `products` list gives an
    /// empty catalog, and unreadable rows are dropped; all are logged, none
    /// is an error.
    #[instrument(skip(self))]
    pub async fn fetch_products(&self, source: CatalogSource) -> ClientResult<Vec<Product>> {
        let path = match source {
            CatalogSource::Mock => {
                let products = mock_products();
                debug!(count = products.len(), "Using built-in catalog");
                return Ok(products);
            }
            CatalogSource::Sql => self.endpoints().products.clone(),
            CatalogSource::Json => self.endpoints().products_json.clone(),
        };

        let body = self.get_list_json(&path).await?;
        let extracted = extract_products(&body);

        if let Some(reason) = extracted.missing_list {
            warn!(%source, reason, "Catalog response has no product list");
        }
        for skipped in &extracted.skipped {
            warn!(%source, row = %skipped, "Skipping unreadable product");
        }

        info!(%source, count = extracted.products.len(), "Catalog loaded");
        Ok(extracted.products)
    }

    /// Asks the backend to resync its product table.
    #[instrument(skip(self))]
    pub async fn sync_products(&self) -> ClientResult<()> {
        let path = self.endpoints().sync_products.clone();
        let body = self.post_json::<Value>(&path, None).await?;

        let status: StatusResponse = match body {
            Value::Null => StatusResponse::default(),
            other => serde_json::from_value(other)?,
        };
        if let Some(message) = status.failure("Sync failed") {
            error!(message = %message, "Product sync failed");
            return Err(ClientError::Backend(message));
        }

        info!("Product sync requested");
        Ok(())
    }

    /// Sync, then fetch the refreshed list.
    pub async fn sync_and_fetch(&self, source: CatalogSource) -> ClientResult<Vec<Product>> {
        self.sync_products().await?;
        self.fetch_products(source).await
    }
}
