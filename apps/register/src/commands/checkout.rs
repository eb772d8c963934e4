//! # Checkout Commands
//!
//! The order summary → cash tender → completion wizard.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. "Checkout"          begin_checkout()   total shown, cart locked     │
//! │  2. "Pay with Cash"     pay_with_cash()    tender input opens           │
//! │  3. types "300"         enter_tender()     balance: Kshs. 50.00         │
//! │     types "200"                            balance hidden, cannot pay   │
//! │  4. "Complete Purchase" complete_purchase()                             │
//! │        │                                                                │
//! │        ▼                                                                │
//! │     "Purchase complete", cart emptied                                   │
//! │        │  success delay (2 s by default)                                │
//! │        ▼                                                                │
//! │     acknowledge() ──► back to the catalog                               │
//! │                                                                         │
//! │  cancel_checkout() from 1-3 returns to the cart unchanged               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use pesatrack_core::{Cart, Checkout, CheckoutStep, CompletedSale, Money};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::CartState;

/// Where the wizard stands, with the figures the screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub step: CheckoutStep,
    pub total: Money,
    pub received: Option<Money>,
    /// Change due; present only when the cash covers the total.
    pub balance: Option<Money>,
    pub can_complete: bool,
}

impl CheckoutResponse {
    fn read(checkout: &Checkout, cart: &Cart) -> Self {
        let balance = checkout.balance(cart);
        CheckoutResponse {
            step: checkout.step(),
            total: cart.total(),
            received: checkout.received(),
            balance,
            can_complete: balance.is_some() && !cart.is_empty(),
        }
    }
}

pub fn checkout_status(cart: &CartState) -> CheckoutResponse {
    cart.with_checkout_mut(|checkout, c| CheckoutResponse::read(checkout, c))
}

/// Opens the order summary. Refused on an empty cart.
pub fn begin_checkout(cart: &CartState) -> Result<CheckoutResponse, ApiError> {
    debug!("begin_checkout command");
    cart.with_checkout_mut(|checkout, c| -> Result<CheckoutResponse, ApiError> {
        checkout.begin_checkout(c)?;
        Ok(CheckoutResponse::read(checkout, c))
    })
}

pub fn pay_with_cash(cart: &CartState) -> Result<CheckoutResponse, ApiError> {
    debug!("pay_with_cash command");
    cart.with_checkout_mut(|checkout, c| -> Result<CheckoutResponse, ApiError> {
        checkout.pay_with_cash()?;
        Ok(CheckoutResponse::read(checkout, c))
    })
}

/// Records the cash amount as typed. Text that is not an amount clears it.
pub fn enter_tender(cart: &CartState, text: &str) -> Result<CheckoutResponse, ApiError> {
    debug!(text = %text, "enter_tender command");
    cart.with_checkout_mut(|checkout, c| -> Result<CheckoutResponse, ApiError> {
        checkout.enter_tender(text)?;
        Ok(CheckoutResponse::read(checkout, c))
    })
}

/// Back to the cart; nothing is lost.
pub fn cancel_checkout(cart: &CartState) -> Result<CheckoutResponse, ApiError> {
    debug!("cancel_checkout command");
    cart.with_checkout_mut(|checkout, c| -> Result<CheckoutResponse, ApiError> {
        checkout.cancel()?;
        Ok(CheckoutResponse::read(checkout, c))
    })
}

/// Completes the sale and empties the cart. Refused unless the cash covers
/// the total.
pub fn complete_purchase(cart: &CartState) -> Result<CompletedSale, ApiError> {
    debug!("complete_purchase command");
    let sale = cart.with_checkout_mut(|checkout, c| checkout.complete_purchase(c))?;
    info!(
        receipt = %sale.receipt_number,
        total = %sale.total,
        change = %sale.change,
        lines = sale.lines.len(),
        "Purchase complete"
    );
    Ok(sale)
}

/// Dismisses the success message.
pub fn acknowledge(cart: &CartState) -> Result<Option<CompletedSale>, ApiError> {
    debug!("acknowledge command");
    Ok(cart.with_checkout_mut(|checkout, _| checkout.acknowledge())?)
}

/// Completes the purchase, holds the success state for `delay`, then
/// returns to browsing.
pub async fn complete_and_return(
    cart: &CartState,
    delay: Duration,
) -> Result<CompletedSale, ApiError> {
    let sale = complete_purchase(cart)?;
    tokio::time::sleep(delay).await;
    acknowledge(cart)?;
    Ok(sale)
}
