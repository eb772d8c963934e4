//! # Catalog State
//!
//! The product list as last fetched. Read by every search and every add to
//! cart, replaced on load and after a sync.

use std::sync::{Arc, PoisonError, RwLock};

use pesatrack_core::catalog::find_product;
use pesatrack_core::Product;

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    products: Arc<RwLock<Vec<Product>>>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the cached list. Returns the new count.
    pub fn replace(&self, products: Vec<Product>) -> usize {
        let mut guard = self.products.write().unwrap_or_else(PoisonError::into_inner);
        *guard = products;
        guard.len()
    }

    pub fn with_products<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&[Product]) -> R,
    {
        let guard = self.products.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    pub fn is_empty(&self) -> bool {
        self.with_products(|p| p.is_empty())
    }

    /// Looks a product up by id or exact name.
    pub fn find(&self, key: &str) -> Option<Product> {
        self.with_products(|products| find_product(products, key).cloned())
    }
}
