//! # Cart State
//!
//! The one cart of the register, together with the checkout wizard that
//! drains it.
//!
//! ## Thread Safety
//! Cart and checkout sit behind a single `Mutex`. Every command takes the
//! lock for its whole read-modify-write, so two quick "+" presses always end
//! up as two increments.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Cashier Action           Command                 State Change          │
//! │  ──────────────           ───────                 ────────────          │
//! │                                                                         │
//! │  Pick product ───────────► add_to_cart() ───────► line qty + 1 / push  │
//! │  "+" / "-" ──────────────► increment/decrement ─► qty ± 1 (min 1)      │
//! │  Remove ─────────────────► remove_from_cart() ──► line removed         │
//! │  Checkout ───────────────► begin_checkout() ────► Browsing → Summary   │
//! │  Complete Purchase ──────► complete_purchase() ─► cart reset           │
//! │                                                                         │
//! │  NOTE: cart edits are refused while a checkout is in progress.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use pesatrack_core::{Cart, Checkout};

#[derive(Debug, Default)]
struct Register {
    cart: Cart,
    checkout: Checkout,
}

/// Shared cart + checkout.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    inner: Arc<Mutex<Register>>,
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Register> {
        // A panic mid-command leaves a cart that is still structurally valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = cart_state.with_cart(|cart| cart.total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let register = self.lock();
        f(&register.cart)
    }

    /// Write access to the cart, with the checkout step for guarding.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart, &Checkout) -> R,
    {
        let mut register = self.lock();
        let Register { cart, checkout } = &mut *register;
        f(cart, checkout)
    }

    /// Write access to both, for checkout transitions.
    pub fn with_checkout_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Checkout, &mut Cart) -> R,
    {
        let mut register = self.lock();
        let Register { cart, checkout } = &mut *register;
        f(checkout, cart)
    }
}
