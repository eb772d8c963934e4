//! # Text Rendering
//!
//! Plain-text views of command responses, for the shell and for the CLI
//! when `--json` is not given. Amounts use the store's currency prefix.

use pesatrack_core::expenses::Expense;
use pesatrack_core::permissions::StaffUser;
use pesatrack_core::{
    CompletedSale, DashboardSummary, InventoryItem, MonthlySales, Product, SaleDetails,
    SaleSummary, SalesSeries, WeekSales,
};

use crate::commands::admin::{InventoryPage, ReportResponse};
use crate::commands::auth::SessionStatus;
use crate::commands::cart::CartResponse;
use crate::commands::catalog::ProductGroup;
use crate::commands::checkout::CheckoutResponse;
use crate::commands::expenses::ExpensePage;
use crate::state::{ConfigState, ConfigSummary};

/// Widest bar in a series chart.
const BAR_WIDTH: usize = 30;

pub struct Renderer<'a> {
    config: &'a ConfigState,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a ConfigState) -> Self {
        Renderer { config }
    }

    fn money(&self, amount: pesatrack_core::Money) -> String {
        self.config.money(amount)
    }

    // =========================================================================
    // Register
    // =========================================================================

    pub fn products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return "No products found".to_string();
        }
        products
            .iter()
            .map(|p| format!("  [{}] {:<28} {:>16}", p.id, p.name, self.money(p.price)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn groups(&self, groups: &[ProductGroup]) -> String {
        if groups.is_empty() {
            return "No products found".to_string();
        }
        groups
            .iter()
            .map(|g| format!("{}\n{}", g.category, self.products(&g.products)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn cart(&self, cart: &CartResponse) -> String {
        if cart.lines.is_empty() {
            return "Cart is empty".to_string();
        }
        let mut out: Vec<String> = cart
            .lines
            .iter()
            .map(|line| {
                format!(
                    "  [{}] {:<24} {:>3} x {:>14} = {:>16}",
                    line.product_id,
                    line.name,
                    line.quantity,
                    self.money(line.unit_price),
                    self.money(line.line_total())
                )
            })
            .collect();
        out.push(format!(
            "Items: {}  Total: {}",
            cart.totals.total_quantity,
            self.money(cart.totals.total)
        ));
        out.join("\n")
    }

    pub fn checkout(&self, status: &CheckoutResponse) -> String {
        let mut out = vec![
            format!("Checkout: {}", status.step),
            format!("Total: {}", self.money(status.total)),
        ];
        if let Some(received) = status.received {
            out.push(format!("Cash received: {}", self.money(received)));
        }
        if let Some(balance) = status.balance {
            out.push(format!("Balance: {}", self.money(balance)));
        }
        out.join("\n")
    }

    pub fn receipt(&self, sale: &CompletedSale) -> String {
        let mut out = vec![
            format!("Purchase complete  {}", sale.receipt_number),
            self.config.store_name().to_string(),
        ];
        for line in &sale.lines {
            out.push(format!(
                "  {:<24} {:>3} x {:>14}",
                line.name,
                line.quantity,
                self.money(line.unit_price)
            ));
        }
        out.push(format!("Total:    {}", self.money(sale.total)));
        out.push(format!("Tendered: {}", self.money(sale.tendered)));
        out.push(format!("Change:   {}", self.money(sale.change)));
        out.join("\n")
    }

    // =========================================================================
    // Admin
    // =========================================================================

    pub fn dashboard(&self, summary: &DashboardSummary) -> String {
        format!(
            "Today's sales: {}\nThis month:    {}\n\n{}",
            self.money(summary.today_sales),
            self.money(summary.month_sales),
            self.series(&summary.daily)
        )
    }

    pub fn report(&self, report: &ReportResponse) -> String {
        format!(
            "{} sales: {}\n\n{}",
            capitalize(report.view.as_str()),
            self.money(report.headline),
            self.series(&report.series)
        )
    }

    /// Horizontal bar chart, scaled to the largest point.
    pub fn series(&self, series: &SalesSeries) -> String {
        let max = series
            .peak()
            .map(|p| p.amount.cents())
            .filter(|c| *c > 0)
            .unwrap_or(1);

        series
            .points
            .iter()
            .map(|p| {
                let scaled = p.amount.cents().max(0) as u128 * BAR_WIDTH as u128;
                let width = (scaled / max as u128) as usize;
                format!(
                    "  {:<10} {:<w$} {}",
                    p.label,
                    "#".repeat(width),
                    self.money(p.amount),
                    w = BAR_WIDTH
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn monthly(&self, monthly: &MonthlySales) -> String {
        let mut out = vec![format!("{}: {}", monthly.month, self.money(monthly.total()))];
        for week in &monthly.weeks {
            out.push(format!("  {:<10} {:>16}", week.week, self.money(week.total)));
        }
        out.join("\n")
    }

    pub fn week(&self, week: &WeekSales) -> String {
        let mut out = vec![format!("{}: {}", week.week, self.money(week.total))];
        for day in &week.days {
            out.push(format!("  {:<10} {:>16}", day.day, self.money(day.amount)));
        }
        out.join("\n")
    }

    pub fn inventory(&self, page: &InventoryPage) -> String {
        let mut out: Vec<String> = page.items.iter().map(|i| self.inventory_item(i)).collect();
        if out.is_empty() {
            out.push("No inventory items".to_string());
        }
        out.push(format!(
            "Page {} of {} ({} items){}",
            page.page,
            page.page_count,
            page.total_items,
            page_nav(page.has_prev, page.has_next)
        ));
        out.join("\n")
    }

    pub fn inventory_item(&self, item: &InventoryItem) -> String {
        format!(
            "  [{}] {:<24} {:<12} {:>14}  stock {} / {}",
            item.id.as_deref().unwrap_or("new"),
            item.name,
            item.category,
            self.money(item.price),
            item.remaining_stock,
            item.quantity_in_stock
        )
    }

    pub fn recent_sales(&self, sales: &[SaleSummary]) -> String {
        if sales.is_empty() {
            return "No recent sales".to_string();
        }
        sales
            .iter()
            .map(|s| {
                format!(
                    "  {:<10} {:<20} {:>16}  {}",
                    s.customer_number,
                    s.customer_name.as_deref().unwrap_or("-"),
                    self.money(s.total),
                    s.date.as_deref().unwrap_or("")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn sale_details(&self, sale: &SaleDetails) -> String {
        let mut out = vec![format!(
            "Customer {} {}",
            sale.customer_number,
            sale.customer_name.as_deref().unwrap_or("")
        )
        .trim_end()
        .to_string()];
        if let Some(date) = &sale.date {
            out.push(format!("Date: {}", date));
        }
        for item in &sale.items {
            out.push(format!(
                "  {:<24} {:>3} x {:>14}",
                item.name,
                item.quantity,
                self.money(item.price)
            ));
        }
        out.push(format!("Total: {}", self.money(sale.effective_total())));
        out.join("\n")
    }

    pub fn expenses(&self, page: &ExpensePage) -> String {
        let mut out: Vec<String> = page.expenses.iter().map(|e| self.expense(e)).collect();
        out.push(format!(
            "Page {} of {} ({} expenses){}  Total: {}",
            page.page,
            page.page_count,
            page.total_items,
            page_nav(page.has_prev, page.has_next),
            self.money(page.total)
        ));
        out.push("By category:".to_string());
        for c in &page.by_category {
            out.push(format!("  {:<14} {:>16}  ({})", c.category, self.money(c.total), c.count));
        }
        out.join("\n")
    }

    pub fn expense(&self, e: &Expense) -> String {
        format!(
            "  {}  {:<24} {:<12} {:>16}",
            e.date,
            e.title,
            e.category,
            self.money(e.amount)
        )
    }

    pub fn users(&self, users: &[StaffUser]) -> String {
        if users.is_empty() {
            return "No staff users".to_string();
        }
        users.iter().map(user_line).collect::<Vec<_>>().join("\n")
    }

    pub fn user(&self, user: &StaffUser) -> String {
        user_line(user)
    }

    pub fn session(&self, status: &SessionStatus) -> String {
        if status.signed_in {
            format!("Signed in (token at {})", status.token_path)
        } else {
            "Signed out".to_string()
        }
    }

    pub fn config(&self, summary: &ConfigSummary) -> String {
        format!(
            "Store:    {}\nBackend:  {}\nCatalog:  {}\nCurrency: {}\nTimeout:  {}s",
            summary.store_name,
            summary.api_base_url,
            summary.catalog_source,
            summary.currency_prefix,
            summary.timeout_secs
        )
    }
}

fn user_line(u: &StaffUser) -> String {
    let logout = if u.auto_logout {
        format!("auto-logout {}", u.logout_time)
    } else {
        "no auto-logout".to_string()
    };
    format!("  [{}] {:<16} {:<7} {:<10} {}", u.id, u.name, u.permission, u.status, logout)
}

/// Footer hint for the paged lists.
fn page_nav(has_prev: bool, has_next: bool) -> &'static str {
    match (has_prev, has_next) {
        (false, false) => "",
        (true, false) => "  [prev]",
        (false, true) => "  [next]",
        (true, true) => "  [prev] [next]",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pesatrack_core::{Money, SeriesPoint};

    #[test]
    fn test_series_bars_scale_to_peak() {
        let config = ConfigState::default();
        let series = SalesSeries::new(vec![
            SeriesPoint { label: "Mon".into(), amount: Money::from_major(100) },
            SeriesPoint { label: "Tue".into(), amount: Money::from_major(50) },
            SeriesPoint { label: "Wed".into(), amount: Money::zero() },
        ]);
        let text = Renderer::new(&config).series(&series);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0].matches('#').count(), BAR_WIDTH);
        assert_eq!(lines[1].matches('#').count(), BAR_WIDTH / 2);
        assert_eq!(lines[2].matches('#').count(), 0);
        assert!(lines[0].ends_with("Kshs. 100.00"));
    }

    #[test]
    fn test_empty_views() {
        let config = ConfigState::default();
        let r = Renderer::new(&config);
        assert_eq!(r.products(&[]), "No products found");
        assert_eq!(r.recent_sales(&[]), "No recent sales");
    }

    #[test]
    fn test_inventory_footer_shows_paging() {
        let config = ConfigState::default();
        let page = InventoryPage {
            items: Vec::new(),
            page: 2,
            page_count: 3,
            total_items: 18,
            has_prev: true,
            has_next: true,
        };
        let text = Renderer::new(&config).inventory(&page);
        assert!(text.ends_with("Page 2 of 3 (18 items)  [prev] [next]"));
        assert_eq!(page_nav(false, false), "");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("weekly"), "Weekly");
        assert_eq!(capitalize(""), "");
    }
}
