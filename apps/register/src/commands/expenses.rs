//! # Expense Commands
//!
//! The expense ledger screen: a paginated list, totals per category, and an
//! add form. Nothing here talks to the backend.

use chrono::NaiveDate;
use pesatrack_core::expenses::{CategoryTotal, Expense};
use pesatrack_core::pagination::Paginator;
use pesatrack_core::validation::{validate_expense_form, ExpenseForm};
use pesatrack_core::Money;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AdminState, ConfigState};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensePage {
    pub expenses: Vec<Expense>,
    pub page: usize,
    pub page_count: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
    /// Sum of the whole ledger, not just this page.
    pub total: Money,
    pub by_category: Vec<CategoryTotal>,
}

pub fn list_expenses(admin: &AdminState, config: &ConfigState, page: usize) -> ExpensePage {
    debug!(page, "list_expenses command");
    admin.with_expenses(|ledger| {
        let mut paginator = Paginator::new(config.expenses_page_size(), ledger.len());
        paginator.go_to(page);

        ExpensePage {
            expenses: paginator.slice(ledger.expenses()).to_vec(),
            page: paginator.page(),
            page_count: paginator.page_count(),
            total_items: ledger.len(),
            has_prev: paginator.has_prev(),
            has_next: paginator.has_next(),
            total: ledger.total(),
            by_category: ledger.totals_by_category(),
        }
    })
}

/// Validates and records an expense. An empty date means `today`.
pub fn add_expense(
    admin: &AdminState,
    form: &ExpenseForm,
    today: NaiveDate,
) -> Result<Expense, ApiError> {
    debug!(title = %form.title, "add_expense command");
    let valid = validate_expense_form(form, today)?;
    let expense = admin.with_expenses(|ledger| ledger.add(valid).clone());
    info!(
        id = %expense.id,
        amount = %expense.amount,
        category = %expense.category,
        "Expense added"
    );
    Ok(expense)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pesatrack_client::ClientConfig;

    fn config() -> ConfigState {
        let mut config = ClientConfig::default();
        config.admin.expenses_page_size = 8;
        ConfigState::new(config)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 20).unwrap()
    }

    #[test]
    fn test_seeded_ledger_pages() {
        let admin = AdminState::seeded();
        let page = list_expenses(&admin, &config(), 3);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_count, 3);
        assert_eq!(page.expenses.len(), 4);
        assert_eq!(page.total_items, 20);
        assert_eq!(page.total, Money::from_major(346_000));
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[test]
    fn test_add_expense_defaults_to_today() {
        let admin = AdminState::seeded();
        let form = ExpenseForm {
            title: "Water".into(),
            amount: "1,200".into(),
            category: "Utilities".into(),
            date: None,
        };
        let expense = add_expense(&admin, &form, today()).unwrap();
        assert_eq!(expense.date, today());
        assert_eq!(expense.amount, Money::from_major(1200));

        let page = list_expenses(&admin, &config(), 1);
        assert_eq!(page.total_items, 21);
        assert_eq!(page.total, Money::from_major(347_200));
    }

    #[test]
    fn test_add_expense_rejects_missing_title() {
        let admin = AdminState::seeded();
        let form = ExpenseForm {
            amount: "500".into(),
            category: "Office".into(),
            ..Default::default()
        };
        let err = add_expense(&admin, &form, today()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(list_expenses(&admin, &config(), 1).total_items, 20);
    }
}
