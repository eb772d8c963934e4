//! # Cart Store
//!
//! The one and only cart of the register.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Cashier Action           Operation               Cart Change           │
//! │  ──────────────           ─────────               ───────────           │
//! │                                                                         │
//! │  Tap product ────────────► add_to_cart() ───────► qty+1 or new line    │
//! │                                                                         │
//! │  "+" on a line ──────────► increment() ─────────► qty+1                │
//! │                                                                         │
//! │  "−" on a line ──────────► decrement() ─────────► qty−1 (never < 1)    │
//! │                                                                         │
//! │  Trash icon ─────────────► remove() ────────────► line removed         │
//! │                                                                         │
//! │  Reset / sale done ──────► reset() ─────────────► lines cleared        │
//! │                                                                         │
//! │  Every read ─────────────► total() ─────────────► Σ unit × qty         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by product id (adding the same product bumps quantity)
//! - Every line has `1 <= quantity <= MAX_LINE_QUANTITY`
//! - At most `MAX_CART_LINES` lines
//! - The total is never stored, always derived

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// A product in the cart with its quantity.
///
/// Holds a snapshot of the product as it was when first added, so a catalog
/// refresh mid-sale does not change what the customer is charged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub image: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
}

impl CartLine {
    pub fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            image: product.image.clone(),
            category: product.category.clone(),
            quantity: 1,
        }
    }

    /// unit price × quantity
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of a product.
    ///
    /// If the product already has a line its quantity goes up by one;
    /// otherwise a new line with quantity 1 is appended. Returns the line's
    /// new quantity.
    ///
    /// ```rust
    /// use pesatrack_core::{Cart, Money, Product};
    ///
    /// let milk = Product::new("2", "Milk", Money::from_major(65));
    /// let mut cart = Cart::new();
    /// assert_eq!(cart.add_to_cart(&milk).unwrap(), 1);
    /// assert_eq!(cart.add_to_cart(&milk).unwrap(), 2);
    /// ```
    pub fn add_to_cart(&mut self, product: &Product) -> CoreResult<i64> {
        if self.find(&product.id).is_some() {
            return self.increment(&product.id);
        }

        if self.lines.len() >= MAX_CART_LINES {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_LINES,
            });
        }

        self.lines.push(CartLine::from_product(product));
        Ok(1)
    }

    /// Raises a line's quantity by one.
    pub fn increment(&mut self, product_id: &str) -> CoreResult<i64> {
        let line = self.find_mut(product_id)?;

        let requested = line.quantity + 1;
        if requested > MAX_LINE_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested,
                max: MAX_LINE_QUANTITY,
            });
        }

        line.quantity = requested;
        Ok(requested)
    }

    /// Lowers a line's quantity by one, stopping at 1.
    ///
    /// Removing a line is always an explicit [`Cart::remove`].
    pub fn decrement(&mut self, product_id: &str) -> CoreResult<i64> {
        let line = self.find_mut(product_id)?;
        if line.quantity > 1 {
            line.quantity -= 1;
        }
        Ok(line.quantity)
    }

    /// Removes a line and returns it.
    pub fn remove(&mut self, product_id: &str) -> CoreResult<CartLine> {
        let index = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))?;

        Ok(self.lines.remove(index))
    }

    /// Clears every line.
    pub fn reset(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn find(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn find_mut(&mut self, product_id: &str) -> CoreResult<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| CoreError::LineNotFound(product_id.to_string()))
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of units across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Order total: Σ unit price × quantity.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

/// Cart summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: i64,
    pub total: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            total: cart.total(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bread() -> Product {
        Product::new("1", "Bread", Money::from_major(100)).with_category("Bakery")
    }

    fn milk() -> Product {
        Product::new("2", "Milk", Money::from_major(50)).with_category("Dairy")
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();
        cart.add_to_cart(&bread()).unwrap();
        cart.add_to_cart(&milk()).unwrap();

        // [{Kshs. 100, 2}, {Kshs. 50, 1}]
        assert_eq!(cart.total(), Money::from_major(250));
        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.total_quantity(), 3);
    }

    #[test]
    fn test_add_increases_total_by_unit_price() {
        let mut cart = Cart::new();
        cart.add_to_cart(&milk()).unwrap();

        for product in [bread(), milk(), bread()] {
            let before = cart.total();
            cart.add_to_cart(&product).unwrap();
            assert_eq!(cart.total() - before, product.price);
        }
    }

    #[test]
    fn test_duplicate_add_merges_into_one_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();
        let qty = cart.add_to_cart(&bread()).unwrap();

        assert_eq!(qty, 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();

        assert_eq!(cart.decrement("1").unwrap(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);

        cart.increment("1").unwrap();
        assert_eq!(cart.decrement("1").unwrap(), 1);
    }

    #[test]
    fn test_remove_last_line_empties_cart() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();

        let removed = cart.remove("1").unwrap();
        assert_eq!(removed.name, "Bread");
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();
        cart.add_to_cart(&milk()).unwrap();

        cart.reset();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total(), Money::zero());
    }

    #[test]
    fn test_unknown_line_operations_fail() {
        let mut cart = Cart::new();
        assert!(matches!(cart.increment("9"), Err(CoreError::LineNotFound(_))));
        assert!(matches!(cart.decrement("9"), Err(CoreError::LineNotFound(_))));
        assert!(matches!(cart.remove("9"), Err(CoreError::LineNotFound(_))));
    }

    #[test]
    fn test_quantity_limit() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();
        for _ in 1..MAX_LINE_QUANTITY {
            cart.increment("1").unwrap();
        }

        assert_eq!(cart.lines()[0].quantity, MAX_LINE_QUANTITY);
        assert!(matches!(
            cart.add_to_cart(&bread()),
            Err(CoreError::QuantityTooLarge { .. })
        ));
    }

    #[test]
    fn test_line_limit() {
        let mut cart = Cart::new();
        for i in 0..MAX_CART_LINES {
            let p = Product::new(i.to_string(), format!("Item {}", i), Money::from_major(1));
            cart.add_to_cart(&p).unwrap();
        }

        let extra = Product::new("extra", "Extra", Money::from_major(1));
        assert!(matches!(
            cart.add_to_cart(&extra),
            Err(CoreError::CartTooLarge { max: MAX_CART_LINES })
        ));
    }

    #[test]
    fn test_line_snapshot_survives_catalog_change() {
        let mut cart = Cart::new();
        cart.add_to_cart(&bread()).unwrap();

        let repriced = Product::new("1", "Bread", Money::from_major(120));
        cart.add_to_cart(&repriced).unwrap();

        assert_eq!(cart.lines()[0].unit_price, Money::from_major(100));
        assert_eq!(cart.totals().total, Money::from_major(200));
    }

    #[test]
    fn test_absurd_price_does_not_overflow_total() {
        let mut cart = Cart::new();
        let gold = Product::new("9", "Gold bar", Money::from_cents(i64::MAX / 2));
        cart.add_to_cart(&gold).unwrap();
        cart.increment("9").unwrap();
        cart.increment("9").unwrap();
        cart.add_to_cart(&milk()).unwrap();

        assert_eq!(cart.total(), Money::from_cents(i64::MAX));
    }
}
