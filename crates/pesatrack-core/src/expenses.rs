//! # Expense Ledger
//!
//! In-memory shop expenses shown on the admin expense screen. The ledger
//! starts with the shop's sample month and grows as expenses are added; it
//! is not sent anywhere.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Money;
use crate::validation::ValidExpense;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    pub amount: Money,
    pub category: String,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// Total spent in one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Money,
    pub count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ExpenseLedger {
    expenses: Vec<Expense>,
}

// (title, whole shillings, date, category)
const SEED: [(&str, i64, &str, &str); 20] = [
    ("Office Supplies", 3000, "2024-09-15", "Office"),
    ("Transport", 2000, "2024-09-14", "Logistics"),
    ("Utility Bills", 5000, "2024-09-13", "Utilities"),
    ("Marketing", 1500, "2024-09-12", "Marketing"),
    ("Inventory Purchase", 150000, "2024-09-11", "Inventory"),
    ("Advertising", 8000, "2024-09-10", "Marketing"),
    ("Rent", 25000, "2024-09-09", "Rent"),
    ("Salaries", 50000, "2024-09-08", "Payroll"),
    ("Electricity Bill", 4000, "2024-09-07", "Utilities"),
    ("Internet Subscription", 3000, "2024-09-06", "Utilities"),
    ("Equipment Maintenance", 6000, "2024-09-05", "Maintenance"),
    ("Software License", 12000, "2024-09-04", "IT Expenses"),
    ("Packaging Materials", 5000, "2024-09-03", "Supplies"),
    ("Training Programs", 10000, "2024-09-02", "Training"),
    ("Delivery Expenses", 4500, "2024-09-01", "Logistics"),
    ("Website Hosting", 7000, "2024-08-31", "IT Expenses"),
    ("Security Services", 15000, "2024-08-30", "Security"),
    ("Furniture", 20000, "2024-08-29", "Office"),
    ("Stationery", 3000, "2024-08-28", "Supplies"),
    ("Insurance", 12000, "2024-08-27", "Insurance"),
];

impl ExpenseLedger {
    pub fn new() -> Self {
        ExpenseLedger::default()
    }

    /// Ledger preloaded with the sample expenses.
    pub fn seeded() -> Self {
        let expenses = SEED
            .iter()
            .filter_map(|(title, amount, date, category)| {
                let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
                Some(Expense {
                    id: Uuid::new_v4().to_string(),
                    title: title.to_string(),
                    amount: Money::from_major(*amount),
                    category: category.to_string(),
                    date,
                })
            })
            .collect();

        ExpenseLedger { expenses }
    }

    /// Appends a validated expense under a fresh id.
    pub fn add(&mut self, input: ValidExpense) -> &Expense {
        let index = self.expenses.len();
        self.expenses.push(Expense {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            amount: input.amount,
            category: input.category,
            date: input.date,
        });
        &self.expenses[index]
    }

    /// Insertion order.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn total(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Per-category totals, categories in order of first appearance.
    pub fn totals_by_category(&self) -> Vec<CategoryTotal> {
        let mut totals: Vec<CategoryTotal> = Vec::new();
        for expense in &self.expenses {
            match totals.iter_mut().find(|t| t.category == expense.category) {
                Some(t) => {
                    t.total += expense.amount;
                    t.count += 1;
                }
                None => totals.push(CategoryTotal {
                    category: expense.category.clone(),
                    total: expense.amount,
                    count: 1,
                }),
            }
        }
        totals
    }
}
