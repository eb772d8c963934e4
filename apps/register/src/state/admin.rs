//! # Admin State
//!
//! Data the admin screens keep on the register itself: the expense ledger,
//! the staff roster, and the inventory list as last loaded (so edits can
//! start from the stored record).
//!
//! Expenses and staff are never sent to the backend; they start from the
//! shop's sample data on every launch.

use std::sync::{Arc, Mutex, PoisonError};

use pesatrack_core::expenses::ExpenseLedger;
use pesatrack_core::permissions::StaffRoster;
use pesatrack_core::InventoryItem;

#[derive(Debug, Clone)]
pub struct AdminState {
    expenses: Arc<Mutex<ExpenseLedger>>,
    staff: Arc<Mutex<StaffRoster>>,
    inventory: Arc<Mutex<Vec<InventoryItem>>>,
}

impl AdminState {
    pub fn new(expenses: ExpenseLedger, staff: StaffRoster) -> Self {
        AdminState {
            expenses: Arc::new(Mutex::new(expenses)),
            staff: Arc::new(Mutex::new(staff)),
            inventory: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Sample ledger and roster.
    pub fn seeded() -> Self {
        AdminState::new(ExpenseLedger::seeded(), StaffRoster::seeded())
    }

    pub fn with_expenses<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ExpenseLedger) -> R,
    {
        let mut guard = self.expenses.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn with_staff<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut StaffRoster) -> R,
    {
        let mut guard = self.staff.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    pub fn with_inventory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Vec<InventoryItem>) -> R,
    {
        let mut guard = self.inventory.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

impl Default for AdminState {
    fn default() -> Self {
        AdminState::seeded()
    }
}
