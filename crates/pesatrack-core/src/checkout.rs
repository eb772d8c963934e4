//! # Checkout Wizard
//!
//! The three-step cash checkout that follows the cart screen.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Checkout Steps                                    │
//! │                                                                         │
//! │   ┌──────────┐ begin_checkout ┌─────────┐ pay_with_cash ┌────────────┐ │
//! │   │ Browsing │ ──────────────►│ Summary │ ─────────────►│TenderEntry │ │
//! │   └──────────┘  (cart ≠ ∅)    └─────────┘               │ {received} │ │
//! │        ▲  ▲                        │                    └────────────┘ │
//! │        │  └──────── cancel ────────┴──────── cancel ──────────┤        │
//! │        │                                                      │        │
//! │        │                                      complete_purchase        │
//! │        │                                    (received ≥ total)         │
//! │        │                                                      ▼        │
//! │        │                 acknowledge                   ┌───────────┐   │
//! │        └───────────────────────────────────────────────│ Completed │   │
//! │                                                        └───────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The wizard never owns the cart. Every operation that needs the total
//! reads it from the cart passed in, so the figure shown on the tender step
//! is always the live one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Checkout Step
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Catalog / cart screens, no checkout in progress.
    #[default]
    Browsing,
    /// Order summary with the "Pay with Cash" button.
    Summary,
    /// Cash tender input. `received` is `None` until the text parses.
    TenderEntry { received: Option<Money> },
    /// Success message is showing.
    Completed,
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutStep::Browsing => "browsing",
            CheckoutStep::Summary => "summary",
            CheckoutStep::TenderEntry { .. } => "tender entry",
            CheckoutStep::Completed => "completed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Completed Sale
// =============================================================================

/// What the customer paid for, handed back once at completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedSale {
    pub receipt_number: String,
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
    pub completed_at: DateTime<Utc>,
}

/// `PT-20240916-1A2B3C4D`
fn receipt_number(at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "PT-{}-{}",
        at.format("%Y%m%d"),
        suffix[..8].to_ascii_uppercase()
    )
}

// =============================================================================
// Checkout
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct Checkout {
    step: CheckoutStep,
    last_sale: Option<CompletedSale>,
}

impl Checkout {
    pub fn new() -> Self {
        Checkout::default()
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    fn invalid(&self, action: &str) -> CoreError {
        CoreError::InvalidCheckoutStep {
            step: self.step.to_string(),
            action: action.to_string(),
        }
    }

    /// Opens the order summary. Returns the order total.
    pub fn begin_checkout(&mut self, cart: &Cart) -> CoreResult<Money> {
        if self.step != CheckoutStep::Browsing {
            return Err(self.invalid("begin checkout"));
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        self.step = CheckoutStep::Summary;
        Ok(cart.total())
    }

    /// Moves from the summary to cash entry.
    pub fn pay_with_cash(&mut self) -> CoreResult<()> {
        if self.step != CheckoutStep::Summary {
            return Err(self.invalid("pay with cash"));
        }
        self.step = CheckoutStep::TenderEntry { received: None };
        Ok(())
    }

    /// Abandons the checkout. The cart is left untouched.
    pub fn cancel(&mut self) -> CoreResult<()> {
        match self.step {
            CheckoutStep::Browsing => Ok(()),
            CheckoutStep::Summary | CheckoutStep::TenderEntry { .. } => {
                self.step = CheckoutStep::Browsing;
                Ok(())
            }
            CheckoutStep::Completed => Err(self.invalid("cancel")),
        }
    }

    /// Records the cash amount as typed. Unparseable text clears it.
    pub fn enter_tender(&mut self, text: &str) -> CoreResult<Option<Money>> {
        if !matches!(self.step, CheckoutStep::TenderEntry { .. }) {
            return Err(self.invalid("enter tender"));
        }

        let received = Money::parse(text);
        self.step = CheckoutStep::TenderEntry { received };
        Ok(received)
    }

    /// Cash received so far, if any parsed.
    pub fn received(&self) -> Option<Money> {
        match self.step {
            CheckoutStep::TenderEntry { received } => received,
            _ => None,
        }
    }

    /// Change due: `received - total`, only when the cash covers the total.
    ///
    /// ```rust
    /// use pesatrack_core::{Cart, Checkout, Money, Product};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_to_cart(&Product::new("1", "Sugar", Money::from_major(250))).unwrap();
    ///
    /// let mut checkout = Checkout::new();
    /// checkout.begin_checkout(&cart).unwrap();
    /// checkout.pay_with_cash().unwrap();
    ///
    /// checkout.enter_tender("300").unwrap();
    /// assert_eq!(checkout.balance(&cart), Some(Money::from_major(50)));
    ///
    /// checkout.enter_tender("200").unwrap();
    /// assert_eq!(checkout.balance(&cart), None);
    /// ```
    pub fn balance(&self, cart: &Cart) -> Option<Money> {
        let received = self.received()?;
        let total = cart.total();
        if received >= total {
            Some(received - total)
        } else {
            None
        }
    }

    /// Finishes the sale: records it, empties the cart, shows success.
    ///
    /// Refused unless the tender covers the total.
    pub fn complete_purchase(&mut self, cart: &mut Cart) -> CoreResult<CompletedSale> {
        self.complete_purchase_at(cart, Utc::now())
    }

    pub fn complete_purchase_at(
        &mut self,
        cart: &mut Cart,
        now: DateTime<Utc>,
    ) -> CoreResult<CompletedSale> {
        if !matches!(self.step, CheckoutStep::TenderEntry { .. }) {
            return Err(self.invalid("complete purchase"));
        }
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        let total = cart.total();
        let change = self.balance(cart).ok_or(CoreError::InsufficientTender {
            total,
            received: self.received(),
        })?;

        let sale = CompletedSale {
            receipt_number: receipt_number(now),
            lines: cart.lines().to_vec(),
            total,
            tendered: total + change,
            change,
            completed_at: now,
        };

        cart.reset();
        self.step = CheckoutStep::Completed;
        self.last_sale = Some(sale.clone());
        Ok(sale)
    }

    /// Dismisses the success message and returns to the catalog.
    pub fn acknowledge(&mut self) -> CoreResult<Option<CompletedSale>> {
        if self.step != CheckoutStep::Completed {
            return Err(self.invalid("acknowledge"));
        }
        self.step = CheckoutStep::Browsing;
        Ok(self.last_sale.take())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;
    use chrono::TimeZone;

    fn cart_of_250() -> Cart {
        let mut cart = Cart::new();
        let bread = Product::new("1", "Bread", Money::from_major(100));
        let milk = Product::new("2", "Milk", Money::from_major(50));
        cart.add_to_cart(&bread).unwrap();
        cart.add_to_cart(&bread).unwrap();
        cart.add_to_cart(&milk).unwrap();
        cart
    }

    fn at_tender(cart: &Cart) -> Checkout {
        let mut checkout = Checkout::new();
        checkout.begin_checkout(cart).unwrap();
        checkout.pay_with_cash().unwrap();
        checkout
    }

    #[test]
    fn test_begin_checkout_rejects_empty_cart() {
        let mut checkout = Checkout::new();
        assert!(matches!(checkout.begin_checkout(&Cart::new()), Err(CoreError::EmptyCart)));
        assert_eq!(checkout.step(), CheckoutStep::Browsing);
    }

    #[test]
    fn test_happy_path() {
        let mut cart = cart_of_250();
        let mut checkout = Checkout::new();

        assert_eq!(checkout.begin_checkout(&cart).unwrap(), Money::from_major(250));
        assert_eq!(checkout.step(), CheckoutStep::Summary);

        checkout.pay_with_cash().unwrap();
        assert_eq!(checkout.step(), CheckoutStep::TenderEntry { received: None });

        checkout.enter_tender("300").unwrap();
        assert_eq!(checkout.balance(&cart), Some(Money::from_major(50)));

        let now = Utc.with_ymd_and_hms(2024, 9, 16, 10, 30, 0).unwrap();
        let sale = checkout.complete_purchase_at(&mut cart, now).unwrap();

        assert_eq!(sale.total, Money::from_major(250));
        assert_eq!(sale.tendered, Money::from_major(300));
        assert_eq!(sale.change, Money::from_major(50));
        assert_eq!(sale.lines.len(), 2);
        assert!(sale.receipt_number.starts_with("PT-20240916-"));
        assert!(cart.is_empty());
        assert_eq!(checkout.step(), CheckoutStep::Completed);

        let acknowledged = checkout.acknowledge().unwrap();
        assert_eq!(acknowledged.map(|s| s.receipt_number), Some(sale.receipt_number));
        assert_eq!(checkout.step(), CheckoutStep::Browsing);
    }

    #[test]
    fn test_short_tender_has_no_balance_and_cannot_complete() {
        let mut cart = cart_of_250();
        let mut checkout = at_tender(&cart);

        checkout.enter_tender("200").unwrap();
        assert_eq!(checkout.balance(&cart), None);

        let err = checkout.complete_purchase(&mut cart).unwrap_err();
        assert!(matches!(
            err,
            CoreError::InsufficientTender { received: Some(r), .. } if r == Money::from_major(200)
        ));
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_exact_tender_gives_zero_change() {
        let mut cart = cart_of_250();
        let mut checkout = at_tender(&cart);

        checkout.enter_tender("Kshs. 250").unwrap();
        assert_eq!(checkout.balance(&cart), Some(Money::zero()));
        assert!(checkout.complete_purchase(&mut cart).is_ok());
    }

    #[test]
    fn test_unparseable_tender_clears_received() {
        let cart = cart_of_250();
        let mut checkout = at_tender(&cart);

        checkout.enter_tender("300").unwrap();
        assert_eq!(checkout.enter_tender("three hundred").unwrap(), None);
        assert_eq!(checkout.received(), None);
        assert_eq!(checkout.balance(&cart), None);
    }

    #[test]
    fn test_cancel_keeps_cart() {
        let cart = cart_of_250();
        let mut checkout = at_tender(&cart);

        checkout.cancel().unwrap();
        assert_eq!(checkout.step(), CheckoutStep::Browsing);
        assert_eq!(cart.total(), Money::from_major(250));
    }

    #[test]
    fn test_steps_out_of_order_are_rejected() {
        let mut cart = cart_of_250();
        let mut checkout = Checkout::new();

        assert!(matches!(checkout.pay_with_cash(), Err(CoreError::InvalidCheckoutStep { .. })));
        assert!(matches!(checkout.enter_tender("1"), Err(CoreError::InvalidCheckoutStep { .. })));
        assert!(matches!(
            checkout.complete_purchase(&mut cart),
            Err(CoreError::InvalidCheckoutStep { .. })
        ));
        assert!(matches!(checkout.acknowledge(), Err(CoreError::InvalidCheckoutStep { .. })));

        checkout.begin_checkout(&cart).unwrap();
        assert!(matches!(
            checkout.begin_checkout(&cart),
            Err(CoreError::InvalidCheckoutStep { .. })
        ));
    }

    #[test]
    fn test_balance_tracks_live_cart() {
        let mut cart = cart_of_250();
        let mut checkout = at_tender(&cart);
        checkout.enter_tender("300").unwrap();

        cart.remove("2").unwrap();
        assert_eq!(checkout.balance(&cart), Some(Money::from_major(100)));
    }
}
