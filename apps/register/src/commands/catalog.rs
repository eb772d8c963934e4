//! # Catalog Commands
//!
//! Load, search, group and sync the product list.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Register opens ──► load_products() ──► CatalogState                    │
//! │                                             │                           │
//! │  Cashier types "b" ──► search_products("b") ┤──► Bread, Butter          │
//! │                                             │                           │
//! │  "Browse" ──► grouped_products("") ─────────┘──► Bakery: Bread, ...     │
//! │                                                 Dairy: Milk, Butter     │
//! │                                                                         │
//! │  "Sync" ──► sync_products() ──► backend resync ──► reload               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pesatrack_client::ApiClient;
use pesatrack_core::catalog::{filter_by_name, group_by_category};
use pesatrack_core::Product;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState};

/// One category and its products, owned for display.
#[derive(Debug, Clone, Serialize)]
pub struct ProductGroup {
    pub category: String,
    pub products: Vec<Product>,
}

/// Fetches the catalog from the configured source. Returns the count.
pub async fn load_products(
    api: &ApiClient,
    config: &ConfigState,
    catalog: &CatalogState,
) -> Result<usize, ApiError> {
    debug!(source = %config.catalog_source(), "load_products command");
    let products = api.fetch_products(config.catalog_source()).await?;
    Ok(catalog.replace(products))
}

/// Loads the catalog unless it is already in memory.
pub async fn ensure_products(
    api: &ApiClient,
    config: &ConfigState,
    catalog: &CatalogState,
) -> Result<(), ApiError> {
    if catalog.is_empty() {
        load_products(api, config, catalog).await?;
    }
    Ok(())
}

/// Products whose name contains `query`, case-insensitive. Empty matches all.
pub fn search_products(catalog: &CatalogState, query: &str) -> Vec<Product> {
    debug!(query = %query, "search_products command");
    catalog.with_products(|products| {
        filter_by_name(products, query).into_iter().cloned().collect()
    })
}

/// Search results grouped by category, in order of first appearance.
pub fn grouped_products(catalog: &CatalogState, query: &str) -> Vec<ProductGroup> {
    debug!(query = %query, "grouped_products command");
    catalog.with_products(|products| {
        group_by_category(filter_by_name(products, query))
            .into_iter()
            .map(|group| ProductGroup {
                category: group.category.to_string(),
                products: group.products.into_iter().cloned().collect(),
            })
            .collect()
    })
}

/// Triggers a backend resync, then reloads. Returns the new count.
pub async fn sync_products(
    api: &ApiClient,
    config: &ConfigState,
    catalog: &CatalogState,
) -> Result<usize, ApiError> {
    debug!("sync_products command");
    let products = api.sync_and_fetch(config.catalog_source()).await?;
    let count = catalog.replace(products);
    info!(count, "Catalog synced");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pesatrack_core::Money;

    fn catalog() -> CatalogState {
        let catalog = CatalogState::new();
        catalog.replace(vec![
            Product::new("1", "Bread", Money::from_major(60)).with_category("Bakery"),
            Product::new("2", "Milk", Money::from_major(65)).with_category("Dairy"),
            Product::new("3", "Butter", Money::from_major(300)).with_category("Dairy"),
            Product::new("4", "Matches", Money::from_major(5)),
        ]);
        catalog
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let names: Vec<_> = search_products(&catalog(), "B")
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, ["Bread", "Butter"]);
        assert_eq!(search_products(&catalog(), "  ").len(), 4);
    }

    #[test]
    fn test_grouping_keeps_first_appearance_order() {
        let groups = grouped_products(&catalog(), "");
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, ["Bakery", "Dairy", "Uncategorized"]);
        assert_eq!(groups[1].products.len(), 2);
    }

    #[test]
    fn test_grouping_applies_search() {
        let groups = grouped_products(&catalog(), "m");
        let categories: Vec<_> = groups.iter().map(|g| g.category.as_str()).collect();
        assert_eq!(categories, ["Dairy", "Uncategorized"]);
    }

    #[tokio::test]
    async fn test_load_mock_catalog() {
        let mut client_config = pesatrack_client::ClientConfig::default();
        client_config.catalog.source = pesatrack_client::CatalogSource::Mock;
        let config = ConfigState::new(client_config.clone());
        let api = ApiClient::new(
            &client_config,
            pesatrack_client::SessionStore::new("/nonexistent/token"),
        )
        .unwrap();

        let catalog = CatalogState::new();
        let count = load_products(&api, &config, &catalog).await.unwrap();
        assert!(count > 0);

        ensure_products(&api, &config, &catalog).await.unwrap();
        catalog.with_products(|p| assert_eq!(p.len(), count));
    }
}
