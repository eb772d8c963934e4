//! # Admin Commands
//!
//! Dashboard, analytics, inventory and sales history. Every read goes to the
//! backend; inventory is also kept in [`AdminState`] so an edit can start
//! from the stored record.
//!
//! ## Screens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  dashboard()            today / month totals + Mon..Sun chart           │
//! │  detailed_report(view)  headline + series for daily/weekly/monthly      │
//! │  monthly_sales(month)   weeks with totals ──► week_sales(month, "2")    │
//! │  inventory_page(q, p)   filtered, paginated stock list                  │
//! │  save_inventory(form)   add (no id) or update (id)                      │
//! │  recent_sales()         ──► sale_details(customer)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pesatrack_client::ApiClient;
use pesatrack_core::pagination::Paginator;
use pesatrack_core::validation::{normalize_search_query, validate_inventory_form, InventoryForm};
use pesatrack_core::{
    DashboardSummary, InventoryItem, Money, MonthlySales, ReportView, SaleDetails, SaleSummary,
    SalesSeries, WeekSales,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::{AdminState, ConfigState};

// =============================================================================
// Analytics
// =============================================================================

pub async fn dashboard(api: &ApiClient) -> Result<DashboardSummary, ApiError> {
    debug!("dashboard command");
    Ok(api.dashboard().await?)
}

/// One view of the detailed analytics screen.
#[derive(Debug, Clone, Serialize)]
pub struct ReportResponse {
    pub view: ReportView,
    pub headline: Money,
    pub series: SalesSeries,
}

pub async fn detailed_report(
    api: &ApiClient,
    view: ReportView,
) -> Result<ReportResponse, ApiError> {
    debug!(view = %view, "detailed_report command");
    let report = api.detailed_report().await?;
    Ok(ReportResponse {
        view,
        headline: report.headline(view),
        series: report.series(view).clone(),
    })
}

pub async fn monthly_sales(api: &ApiClient, month: &str) -> Result<MonthlySales, ApiError> {
    debug!(month = %month, "monthly_sales command");
    Ok(api.monthly_sales(month).await?)
}

/// Day breakdown of one week, by label ("Week 2") or position ("2").
pub async fn week_sales(api: &ApiClient, month: &str, week: &str) -> Result<WeekSales, ApiError> {
    debug!(month = %month, week = %week, "week_sales command");
    let monthly = api.monthly_sales(month).await?;
    select_week(&monthly, week)
}

fn select_week(monthly: &MonthlySales, week: &str) -> Result<WeekSales, ApiError> {
    monthly
        .week(week)
        .cloned()
        .ok_or_else(|| {
            ApiError::not_found("Week", &format!("{} of {}", week.trim(), monthly.month))
        })
}

// =============================================================================
// Inventory
// =============================================================================

/// One page of the (optionally filtered) stock list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPage {
    pub items: Vec<InventoryItem>,
    pub page: usize,
    pub page_count: usize,
    pub total_items: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// Reloads the stock list from the backend. Returns the count.
pub async fn load_inventory(api: &ApiClient, admin: &AdminState) -> Result<usize, ApiError> {
    debug!("load_inventory command");
    let items = api.inventory().await?;
    let count = items.len();
    admin.with_inventory(|inventory| *inventory = items);
    Ok(count)
}

/// Filters the loaded list by name and returns page `page` (clamped).
pub fn inventory_page(
    admin: &AdminState,
    config: &ConfigState,
    search: &str,
    page: usize,
) -> InventoryPage {
    debug!(search = %search, page, "inventory_page command");
    let query = normalize_search_query(search);

    admin.with_inventory(|inventory| {
        let matching: Vec<&InventoryItem> = inventory
            .iter()
            .filter(|item| query.is_empty() || item.name.to_lowercase().contains(&query))
            .collect();

        let mut paginator = Paginator::new(config.inventory_page_size(), matching.len());
        paginator.go_to(page);

        InventoryPage {
            items: paginator.slice(&matching).iter().map(|item| (*item).clone()).collect(),
            page: paginator.page(),
            page_count: paginator.page_count(),
            total_items: matching.len(),
            has_prev: paginator.has_prev(),
            has_next: paginator.has_next(),
        }
    })
}

/// Edit form prefilled from the stored record.
pub fn edit_form(admin: &AdminState, id: &str) -> Result<InventoryForm, ApiError> {
    admin.with_inventory(|inventory| {
        inventory
            .iter()
            .find(|item| item.id.as_deref() == Some(id))
            .map(InventoryForm::from_item)
            .ok_or_else(|| ApiError::not_found("Product", id))
    })
}

/// Validates the form and saves it: add when `id` is `None`, update otherwise.
/// The stored list is updated with the record as saved.
pub async fn save_inventory(
    api: &ApiClient,
    admin: &AdminState,
    form: &InventoryForm,
    id: Option<String>,
) -> Result<InventoryItem, ApiError> {
    debug!(name = %form.name, id = ?id, "save_inventory command");
    let item = validate_inventory_form(form, id)?;
    let saved = api.save_inventory_item(&item).await?;

    admin.with_inventory(|inventory| {
        match inventory.iter_mut().find(|i| i.id.is_some() && i.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => inventory.push(saved.clone()),
        }
    });

    info!(id = ?saved.id, name = %saved.name, "Inventory item saved");
    Ok(saved)
}

// =============================================================================
// Sales History
// =============================================================================

pub async fn recent_sales(api: &ApiClient) -> Result<Vec<SaleSummary>, ApiError> {
    debug!("recent_sales command");
    Ok(api.recent_sales().await?)
}

pub async fn sale_details(api: &ApiClient, customer: &str) -> Result<SaleDetails, ApiError> {
    debug!(customer = %customer, "sale_details command");
    Ok(api.sale_details(customer).await?)
}
