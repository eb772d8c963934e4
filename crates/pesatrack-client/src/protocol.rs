//! # Wire Protocol
//!
//! Request and response bodies exactly as the backend endpoints speak them.
//! Nothing outside this crate sees these types; the endpoint modules turn
//! them into `pesatrack-core` domain types.
//!
//! ## Endpoint Shapes
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ POST sign-in             │ { email, password }                          │
//! │                          │ → { success, sessionId?, message? }          │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ POST signup.php          │ { name, id_number, phone, email, password }  │
//! │                          │ → { success, message }                       │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ GET  dashboard_cal.php   │ → { success, today_sales, month_sales,       │
//! │                          │     daily_sales_data }                       │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ GET  detailed_sales.php  │ → { success, daily_sales, weekly_sales,      │
//! │                          │     monthly_sales, sales_data,               │
//! │                          │     weekly_sales_data, quarterly_sales_data }│
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ GET  monthly_sales.php   │ → { weekly_sales: [{ week, sales: [...] }],  │
//! │                          │     weekly_totals? }                         │
//! ├──────────────────────────┼──────────────────────────────────────────────┤
//! │ POST add/update product  │ InventoryItem → { id? } | { error }          │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```

use pesatrack_core::money::{self, Money};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Serialize)]
pub struct SignInRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct SignInResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "sessionId", alias = "session_id")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignUpRequest<'a> {
    pub name: &'a str,
    pub id_number: &'a str,
    pub phone: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

/// The generic `{ success, message }` / `{ error }` envelope.
#[derive(Debug, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl StatusResponse {
    /// Failure text if the body reports one: an `error` field, or
    /// `success: false` with its message.
    pub fn failure(&self, fallback: &str) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if self.success == Some(false) {
            return Some(self.message.clone().unwrap_or_else(|| fallback.to_string()));
        }
        None
    }
}

// =============================================================================
// Analytics
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct DashboardResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "money::wire::or_zero")]
    pub today_sales: Money,
    #[serde(default, with = "money::wire::or_zero")]
    pub month_sales: Money,
    #[serde(default)]
    pub daily_sales_data: Value,
}

#[derive(Debug, Deserialize)]
pub struct DetailedSalesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "money::wire::or_zero")]
    pub daily_sales: Money,
    #[serde(default, with = "money::wire::or_zero")]
    pub weekly_sales: Money,
    #[serde(default, with = "money::wire::or_zero")]
    pub monthly_sales: Money,
    #[serde(default)]
    pub sales_data: Value,
    #[serde(default)]
    pub weekly_sales_data: Value,
    #[serde(default)]
    pub quarterly_sales_data: Value,
}

#[derive(Debug, Deserialize)]
pub struct DayWire {
    #[serde(default)]
    pub day: String,
    #[serde(default, with = "money::wire::or_zero")]
    pub amount: Money,
}

#[derive(Debug, Deserialize)]
pub struct WeekWire {
    pub week: String,
    #[serde(default)]
    pub sales: Vec<DayWire>,
}

#[derive(Debug, Deserialize)]
pub struct MonthlySalesResponse {
    #[serde(default)]
    pub weekly_sales: Vec<WeekWire>,
    #[serde(default)]
    pub weekly_totals: Option<Vec<Value>>,
}

// =============================================================================
// Inventory
// =============================================================================

/// Reply to add/update product.
#[derive(Debug, Default, Deserialize)]
pub struct SaveProductResponse {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(flatten)]
    pub status: StatusResponse,
}

impl SaveProductResponse {
    pub fn saved_id(&self) -> Option<String> {
        match &self.id {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

// =============================================================================
// Sales
// =============================================================================

/// `recent-sales` answers with a bare array or `{ sales: [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecentSalesResponse {
    List(Vec<Value>),
    Wrapped {
        #[serde(default)]
        sales: Vec<Value>,
    },
}

impl RecentSalesResponse {
    pub fn into_rows(self) -> Vec<Value> {
        match self {
            RecentSalesResponse::List(rows) => rows,
            RecentSalesResponse::Wrapped { sales } => sales,
        }
    }
}
