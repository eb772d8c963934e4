//! # Cart Commands
//!
//! Commands for the cart screen.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│ Completed│       │
//! │  │  Cart    │     │          │     │ (locked) │     │ (empty)  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   increment / decrement                                 │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   reset_cart ──────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pesatrack_core::cart::CartTotals;
use pesatrack_core::{Cart, CartLine, Checkout, CheckoutStep, CoreResult};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState};

/// Cart contents and totals.
#[derive(Debug, Clone, Serialize)]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            lines: cart.lines().to_vec(),
            totals: cart.totals(),
        }
    }
}

/// Cart edits are only allowed while browsing.
fn ensure_editable(checkout: &Checkout) -> Result<(), ApiError> {
    match checkout.step() {
        CheckoutStep::Browsing => Ok(()),
        step => Err(ApiError::cart(format!(
            "Cart is locked during checkout ({}); cancel it first",
            step
        ))),
    }
}

/// Runs one cart edit under the lock and returns the updated cart.
fn edit<F>(cart: &CartState, f: F) -> Result<CartResponse, ApiError>
where
    F: FnOnce(&mut Cart) -> CoreResult<i64>,
{
    cart.with_cart_mut(|c, checkout| -> Result<CartResponse, ApiError> {
        ensure_editable(checkout)?;
        f(c)?;
        Ok(CartResponse::from(&*c))
    })
}

pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds one unit of a catalog product, by id or exact name.
///
/// ## Behavior
/// - Product already in cart: its quantity goes up by one
/// - Otherwise: a new line with quantity 1
pub fn add_to_cart(
    cart: &CartState,
    catalog: &CatalogState,
    product_key: &str,
) -> Result<CartResponse, ApiError> {
    debug!(product = %product_key, "add_to_cart command");

    let product = catalog
        .find(product_key)
        .ok_or_else(|| ApiError::not_found("Product", product_key))?;

    let response = edit(cart, |c| c.add_to_cart(&product))?;
    info!(product_id = %product.id, total = %response.totals.total, "Added to cart");
    Ok(response)
}

pub fn increment_item(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "increment_item command");
    edit(cart, |c| c.increment(product_id))
}

/// Quantity minus one; a line at 1 stays at 1.
pub fn decrement_item(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "decrement_item command");
    edit(cart, |c| c.decrement(product_id))
}

pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");
    edit(cart, |c| c.remove(product_id).map(|line| line.quantity))
}

/// Empties the cart.
pub fn reset_cart(cart: &CartState) -> Result<CartResponse, ApiError> {
    debug!("reset_cart command");
    let response = edit(cart, |c| {
        c.reset();
        Ok(0)
    })?;
    info!("Cart reset");
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pesatrack_core::{Money, Product};

    fn setup() -> (CartState, CatalogState) {
        let catalog = CatalogState::new();
        catalog.replace(vec![
            Product::new("1", "Bread", Money::from_major(100)),
            Product::new("2", "Milk", Money::from_major(50)),
        ]);
        (CartState::new(), catalog)
    }

    #[test]
    fn test_add_increases_total_by_unit_price() {
        let (cart, catalog) = setup();
        let before = get_cart(&cart).totals.total;
        let after = add_to_cart(&cart, &catalog, "2").unwrap().totals.total;
        assert_eq!(after - before, Money::from_major(50));
    }

    #[test]
    fn test_worked_example_total() {
        let (cart, catalog) = setup();
        add_to_cart(&cart, &catalog, "1").unwrap();
        increment_item(&cart, "1").unwrap();
        let response = add_to_cart(&cart, &catalog, "milk").unwrap();

        assert_eq!(response.lines.len(), 2);
        assert_eq!(response.totals.total, Money::from_major(250));
        assert_eq!(response.totals.total_quantity, 3);
    }

    #[test]
    fn test_decrement_floors_at_one() {
        let (cart, catalog) = setup();
        add_to_cart(&cart, &catalog, "1").unwrap();
        add_to_cart(&cart, &catalog, "1").unwrap();

        assert_eq!(decrement_item(&cart, "1").unwrap().lines[0].quantity, 1);
        assert_eq!(decrement_item(&cart, "1").unwrap().lines[0].quantity, 1);
    }

    #[test]
    fn test_remove_last_line_empties_cart() {
        let (cart, catalog) = setup();
        add_to_cart(&cart, &catalog, "1").unwrap();
        let response = remove_from_cart(&cart, "1").unwrap();

        assert!(response.lines.is_empty());
        assert_eq!(response.totals.total, Money::zero());
    }

    #[test]
    fn test_unknown_product_and_line() {
        let (cart, catalog) = setup();
        assert_eq!(add_to_cart(&cart, &catalog, "99").unwrap_err().code, ErrorCode::NotFound);
        assert_eq!(increment_item(&cart, "1").unwrap_err().code, ErrorCode::NotFound);
    }

    #[test]
    fn test_reset() {
        let (cart, catalog) = setup();
        add_to_cart(&cart, &catalog, "1").unwrap();
        add_to_cart(&cart, &catalog, "2").unwrap();

        let response = reset_cart(&cart).unwrap();
        assert!(response.lines.is_empty());
        assert_eq!(response.totals.total, Money::zero());
    }

    #[test]
    fn test_cart_is_locked_during_checkout() {
        let (cart, catalog) = setup();
        add_to_cart(&cart, &catalog, "1").unwrap();
        cart.with_checkout_mut(|checkout, c| checkout.begin_checkout(c)).unwrap();

        let err = add_to_cart(&cart, &catalog, "2").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_cart(&cart).totals.line_count, 1);
    }
}
