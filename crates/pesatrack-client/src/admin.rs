//! # Admin Endpoints
//!
//! Dashboard, analytics, inventory and sales history reads, plus inventory
//! writes. Everything here turns loose backend JSON into core types.
//!
//! ## Leniency Rules
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ amount as "5000" / 5000  │ accepted (Money::from_json)                  │
//! │ unreadable series value  │ zero, logged at warn                         │
//! │ list body not JSON       │ empty list, logged at warn                   │
//! │ list field missing       │ empty list, logged at warn                   │
//! │ unreadable list row      │ skipped, logged at warn                      │
//! │ weekly_totals mismatched │ recomputed from the days                     │
//! │ success: false           │ ClientError::Backend(message)                │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```

use pesatrack_core::analytics::{build_monthly, parse_series, WEEKDAY_LABELS};
use pesatrack_core::validation::{validate_month, validate_required};
use pesatrack_core::{
    DashboardSummary, DaySale, DetailedReport, InventoryItem, Money, MonthlySales, ReportView,
    SaleDetails, SaleSummary, SalesSeries,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info, instrument, warn};

use crate::client::ApiClient;
use crate::config::CUSTOMER_PLACEHOLDER;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{
    DashboardResponse, DetailedSalesResponse, MonthlySalesResponse, RecentSalesResponse,
    SaveProductResponse,
};

impl ApiClient {
    // =========================================================================
    // Analytics
    // =========================================================================

    /// Loads the dashboard. Checks the stored session first; a missing token
    /// is reported as an expired session without calling the backend.
    #[instrument(skip(self))]
    pub async fn dashboard(&self) -> ClientResult<DashboardSummary> {
        self.session().verify().await?;

        let path = self.endpoints().dashboard.clone();
        let body: DashboardResponse = serde_json::from_value(self.get_json(&path, &[]).await?)?;
        if !body.success {
            return Err(backend_failure(body.message, "Failed to load dashboard data"));
        }

        Ok(DashboardSummary {
            today_sales: body.today_sales,
            month_sales: body.month_sales,
            daily: series("daily_sales_data", &body.daily_sales_data, &WEEKDAY_LABELS),
        })
    }

    /// Loads the detailed analytics figures for every view mode.
    #[instrument(skip(self))]
    pub async fn detailed_report(&self) -> ClientResult<DetailedReport> {
        let path = self.endpoints().detailed_sales.clone();
        let body: DetailedSalesResponse = serde_json::from_value(self.get_json(&path, &[]).await?)?;
        if !body.success {
            return Err(backend_failure(body.message, "Failed to load sales report"));
        }

        let view_series =
            |view: ReportView, value: &Value| series(view.field(), value, view.labels());

        Ok(DetailedReport {
            daily_sales: body.daily_sales,
            weekly_sales: body.weekly_sales,
            monthly_sales: body.monthly_sales,
            sales_data: view_series(ReportView::Daily, &body.sales_data),
            weekly_sales_data: view_series(ReportView::Weekly, &body.weekly_sales_data),
            quarterly_sales_data: view_series(ReportView::Monthly, &body.quarterly_sales_data),
        })
    }

    /// Loads one month's weeks. `month` is a month name, full or short.
    #[instrument(skip(self))]
    pub async fn monthly_sales(&self, month: &str) -> ClientResult<MonthlySales> {
        let month = validate_month(month)?;

        let path = self.endpoints().monthly_sales.clone();
        let body: MonthlySalesResponse =
            serde_json::from_value(self.get_json(&path, &[("month", month)]).await?)?;

        let weeks: Vec<(String, Vec<DaySale>)> = body
            .weekly_sales
            .into_iter()
            .map(|w| {
                let days = w
                    .sales
                    .into_iter()
                    .map(|d| DaySale { day: d.day, amount: d.amount })
                    .collect();
                (w.week, days)
            })
            .collect();

        let reported = body.weekly_totals.and_then(|totals| {
            let parsed: Option<Vec<Money>> = totals.iter().map(Money::from_json).collect();
            if parsed.is_none() {
                warn!(month, "Unreadable weekly_totals, computing from days");
            }
            parsed
        });

        let monthly = build_monthly(month, weeks, reported);
        debug!(
            month,
            weeks = monthly.weeks.len(),
            total = %monthly.total(),
            "Monthly sales loaded"
        );
        Ok(monthly)
    }

    // =========================================================================
    // Inventory
    // =========================================================================

    /// Lists stock records. Unreadable rows are skipped.
    #[instrument(skip(self))]
    pub async fn inventory(&self) -> ClientResult<Vec<InventoryItem>> {
        let path = self.endpoints().inventory.clone();
        let body = self.get_list_json(&path).await?;

        let rows: &[Value] = match body.get("products") {
            Some(Value::Array(rows)) => rows,
            _ => {
                warn!("Inventory response has no product list");
                &[]
            }
        };

        let items = lenient_rows::<InventoryItem>("inventory", rows);
        info!(count = items.len(), "Inventory loaded");
        Ok(items)
    }

    /// Saves a stock record: add when it has no id, update otherwise.
    /// Returns the record as saved, with the id the backend assigned.
    #[instrument(skip(self, item), fields(name = %item.name, id = ?item.id))]
    pub async fn save_inventory_item(&self, item: &InventoryItem) -> ClientResult<InventoryItem> {
        let is_new = item.id.is_none();
        let path = if is_new {
            self.endpoints().add_product.clone()
        } else {
            self.endpoints().update_product.clone()
        };

        let body = self.post_json(&path, Some(item)).await?;
        let response: SaveProductResponse = match body {
            Value::Null => SaveProductResponse::default(),
            other => serde_json::from_value(other)?,
        };

        if let Some(message) = response.status.failure("Failed to save product") {
            error!(message = %message, "Product save failed");
            return Err(ClientError::Backend(message));
        }

        let mut saved = item.clone();
        match (is_new, response.saved_id()) {
            (_, Some(id)) => saved.id = Some(id),
            (true, None) => {
                return Err(ClientError::InvalidResponse(
                    "add product reply has no id".into(),
                ))
            }
            (false, None) => {}
        }

        info!(id = ?saved.id, created = is_new, "Product saved");
        Ok(saved)
    }

    // =========================================================================
    // Sales History
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn recent_sales(&self) -> ClientResult<Vec<SaleSummary>> {
        let path = self.endpoints().recent_sales.clone();
        let body = self.get_list_json(&path).await?;

        let rows = match serde_json::from_value::<RecentSalesResponse>(body) {
            Ok(response) => response.into_rows(),
            Err(_) => {
                warn!("Recent sales response is neither a list nor {{ sales }}");
                Vec::new()
            }
        };

        Ok(lenient_rows::<SaleSummary>("recent sales", &rows))
    }

    /// One customer's sale. An unknown customer is `NotFound`.
    #[instrument(skip(self))]
    pub async fn sale_details(&self, customer: &str) -> ClientResult<SaleDetails> {
        let customer = validate_required("customer number", customer)?;
        let url = self.sale_details_url(customer)?;

        let body = match self.get_json(url.as_str(), &[]).await {
            Ok(body) => body,
            Err(ClientError::HttpStatus { status: 404, .. }) => {
                return Err(ClientError::NotFound(format!("sale for customer {}", customer)))
            }
            Err(e) => return Err(e),
        };

        if body.is_null() {
            return Err(ClientError::NotFound(format!("sale for customer {}", customer)));
        }
        Ok(serde_json::from_value(body)?)
    }

    /// `sales_details` with its placeholder replaced by one encoded segment.
    fn sale_details_url(&self, customer: &str) -> ClientResult<url::Url> {
        let template = &self.endpoints().sales_details;
        let prefix = template
            .strip_suffix(CUSTOMER_PLACEHOLDER)
            .ok_or_else(|| ClientError::InvalidConfig("sales_details has no {customer}".into()))?;

        let mut url = self.endpoint_url(prefix)?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(base))?
            .pop_if_empty()
            .push(customer);
        Ok(url)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn backend_failure(message: Option<String>, fallback: &str) -> ClientError {
    let message = message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    error!(message = %message, "Backend reported failure");
    ClientError::Backend(message)
}

fn series(field: &str, value: &Value, labels: &[&str]) -> SalesSeries {
    let parsed = parse_series(value, labels);
    if parsed.unreadable > 0 {
        warn!(field, unreadable = parsed.unreadable, "Series values read as zero");
    }
    parsed.series
}

fn lenient_rows<T: DeserializeOwned>(what: &str, rows: &[Value]) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match serde_json::from_value::<T>(row.clone()) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(what, index, error = %e, "Skipping unreadable row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::session::SessionStore;
    use serde_json::json;

    fn client_with(base: &str, sales_details: &str) -> ApiClient {
        let mut config = ClientConfig::default();
        config.api.base_url = base.into();
        config.endpoints.sales_details = sales_details.into();
        ApiClient::new(&config, SessionStore::new("/nonexistent/token")).unwrap()
    }

    #[test]
    fn test_sale_details_url_encodes_customer() {
        let api = client_with("http://localhost:5000/", "sales-details/{customer}");
        assert_eq!(
            api.sale_details_url("C-001").unwrap().as_str(),
            "http://localhost:5000/sales-details/C-001"
        );
        assert_eq!(
            api.sale_details_url("a/b c").unwrap().as_str(),
            "http://localhost:5000/sales-details/a%2Fb%20c"
        );
    }

    #[test]
    fn test_sale_details_url_under_nested_base() {
        let api = client_with("http://192.168.100.20/payment", "{customer}");
        assert_eq!(
            api.sale_details_url("77").unwrap().as_str(),
            "http://192.168.100.20/payment/77"
        );
    }

    #[test]
    fn test_lenient_rows_skips_bad_entries() {
        let rows = vec![
            json!({ "customer_number": 1, "total": "1200" }),
            json!({ "total": 50 }),
            json!({ "customerNumber": "C9", "amount": 300 }),
        ];
        let sales = lenient_rows::<SaleSummary>("recent sales", &rows);
        assert_eq!(sales.len(), 2);
        assert_eq!(sales[0].customer_number, "1");
        assert_eq!(sales[0].total, Money::from_major(1200));
        assert_eq!(sales[1].total, Money::from_major(300));
    }

    #[tokio::test]
    async fn test_dashboard_without_session_is_expired() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ClientConfig::default();
        config.api.base_url = "http://127.0.0.1:9/".into();
        let api = ApiClient::new(&config, SessionStore::new(dir.path().join("token"))).unwrap();

        assert!(matches!(api.dashboard().await, Err(ClientError::NotAuthenticated)));
    }
}
