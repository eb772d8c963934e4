//! # Catalog
//!
//! Product list shaping: pulling products out of a response body, the search
//! filter, and category grouping.
//!
//! ## Data Flow
//! ```text
//! backend body ──► extract_products() ──► Vec<Product> ──► filter_by_name()
//!  { products }      (skips bad rows)                            │
//!                                                                ▼
//!                                                     group_by_category()
//!                                                     Bakery: Bread, Buns
//!                                                     Dairy:  Milk, Butter
//! ```

use serde::Serialize;
use serde_json::Value;

use crate::money::Money;
use crate::types::Product;
use crate::validation::normalize_search_query;

// =============================================================================
// Response Extraction
// =============================================================================

/// Result of reading a `{ products: [...] }` body.
#[derive(Debug, Clone, Default)]
pub struct ExtractedProducts {
    pub products: Vec<Product>,
    /// Why the list was treated as empty, when it was.
    pub missing_list: Option<&'static str>,
    /// One message per row that could not be read.
    pub skipped: Vec<String>,
}

/// Reads products out of a catalog response body.
///
/// A missing or non-array `products` field yields an empty list; rows that
/// fail to deserialize are skipped and reported, the rest are kept.
pub fn extract_products(body: &Value) -> ExtractedProducts {
    let rows = match body.get("products") {
        Some(Value::Array(rows)) => rows,
        Some(_) => {
            return ExtractedProducts {
                missing_list: Some("`products` is not an array"),
                ..Default::default()
            }
        }
        None => {
            return ExtractedProducts {
                missing_list: Some("`products` field missing"),
                ..Default::default()
            }
        }
    };

    let mut extracted = ExtractedProducts::default();
    for (index, row) in rows.iter().enumerate() {
        match serde_json::from_value::<Product>(row.clone()) {
            Ok(product) => extracted.products.push(product),
            Err(e) => extracted.skipped.push(format!("row {}: {}", index, e)),
        }
    }
    extracted
}

// =============================================================================
// Search & Grouping
// =============================================================================

/// Case-insensitive substring match on the product name.
///
/// ```rust
/// use pesatrack_core::catalog::filter_by_name;
/// use pesatrack_core::{Money, Product};
///
/// let products = vec![
///     Product::new("1", "Bread", Money::from_major(60)),
///     Product::new("2", "Milk", Money::from_major(65)),
///     Product::new("3", "Butter", Money::from_major(300)),
/// ];
/// let names: Vec<_> = filter_by_name(&products, "b").iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, ["Bread", "Butter"]);
/// ```
pub fn filter_by_name<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let query = normalize_search_query(query);
    products
        .iter()
        .filter(|p| query.is_empty() || p.name.to_lowercase().contains(&query))
        .collect()
}

/// Products of one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub products: Vec<&'a Product>,
}

/// Groups products by category, categories in order of first appearance.
pub fn group_by_category<'a, I>(products: I) -> Vec<CategoryGroup<'a>>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for product in products {
        let category = product.category_name();
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.products.push(product),
            None => groups.push(CategoryGroup {
                category,
                products: vec![product],
            }),
        }
    }
    groups
}

/// Finds a product by id, falling back to an exact (case-insensitive) name.
pub fn find_product<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    let key = key.trim();
    products
        .iter()
        .find(|p| p.id == key)
        .or_else(|| products.iter().find(|p| p.name.eq_ignore_ascii_case(key)))
}

// =============================================================================
// Mock Catalog
// =============================================================================

/// Built-in sample catalog for demos and offline use.
pub fn mock_products() -> Vec<Product> {
    let rows: [(&str, &str, i64, &str); 10] = [
        ("1", "Bread", 60, "Bakery"),
        ("2", "Milk 500ml", 65, "Dairy"),
        ("3", "Butter 250g", 300, "Dairy"),
        ("4", "Sugar 1kg", 150, "Groceries"),
        ("5", "Maize Flour 2kg", 210, "Groceries"),
        ("6", "Cooking Oil 1L", 380, "Groceries"),
        ("7", "Eggs (tray)", 450, "Poultry"),
        ("8", "Tomatoes 1kg", 120, "Produce"),
        ("9", "Bananas (bunch)", 100, "Produce"),
        ("10", "Soda 500ml", 80, "Beverages"),
    ];

    rows.iter()
        .map(|(id, name, price, category)| {
            Product::new(*id, *name, Money::from_major(*price))
                .with_category(*category)
                .with_image(format!("{}.png", id))
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::UNCATEGORIZED;
    use serde_json::json;

    fn names<'a>(products: &[&'a Product]) -> Vec<&'a str> {
        products.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let products = vec![
            Product::new("1", "Bread", Money::from_major(60)),
            Product::new("2", "Milk", Money::from_major(65)),
            Product::new("3", "Butter", Money::from_major(300)),
        ];

        assert_eq!(names(&filter_by_name(&products, "b")), ["Bread", "Butter"]);
        assert_eq!(names(&filter_by_name(&products, "MIL")), ["Milk"]);
        assert_eq!(filter_by_name(&products, "").len(), 3);
        assert!(filter_by_name(&products, "rice").is_empty());
    }

    #[test]
    fn test_group_by_category_keeps_first_appearance_order() {
        let products = vec![
            Product::new("1", "Milk", Money::from_major(65)).with_category("Dairy"),
            Product::new("2", "Bread", Money::from_major(60)).with_category("Bakery"),
            Product::new("3", "Butter", Money::from_major(300)).with_category("Dairy"),
            Product::new("4", "Mystery", Money::from_major(1)),
        ];

        let groups = group_by_category(&products);
        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, ["Dairy", "Bakery", UNCATEGORIZED]);
        assert_eq!(names(&groups[0].products), ["Milk", "Butter"]);
    }

    #[test]
    fn test_extract_products_skips_malformed_rows() {
        let body = json!({
            "products": [
                { "id": 1, "name": "Bread", "price": "Kshs. 60" },
                { "id": 2, "name": "Broken" },
                { "id": "3", "name": "Milk", "price": 65.5 },
                { "id": 4, "name": "Eggs", "price": 15, "image": "e.png", "image_url": "x.png" }
            ]
        });

        let extracted = extract_products(&body);
        assert_eq!(extracted.products.len(), 3);
        assert_eq!(extracted.products[2].image.as_deref(), Some("e.png"));
        assert_eq!(extracted.skipped.len(), 1);
        assert!(extracted.skipped[0].starts_with("row 1"));
        assert_eq!(extracted.products[1].price, Money::from_cents(6550));
        assert!(extracted.missing_list.is_none());
    }

    #[test]
    fn test_extract_products_missing_or_wrong_shape_is_empty() {
        let missing = extract_products(&json!({ "error": "db down" }));
        assert!(missing.products.is_empty());
        assert!(missing.missing_list.is_some());

        let not_array = extract_products(&json!({ "products": { "1": "Bread" } }));
        assert!(not_array.products.is_empty());
        assert!(not_array.missing_list.is_some());
    }

    #[test]
    fn test_find_product_by_id_or_name() {
        let products = mock_products();
        assert_eq!(find_product(&products, "4").map(|p| p.name.as_str()), Some("Sugar 1kg"));
        assert_eq!(find_product(&products, "bread").map(|p| p.id.as_str()), Some("1"));
        assert!(find_product(&products, "caviar").is_none());
    }

    #[test]
    fn test_mock_catalog_has_unique_ids() {
        let products = mock_products();
        let mut ids: Vec<_> = products.iter().map(|p| p.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), products.len());
    }
}
