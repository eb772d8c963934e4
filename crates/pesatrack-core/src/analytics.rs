//! # Sales Analytics
//!
//! Turns the loosely shaped analytics responses into labelled series.
//!
//! ## Series Shapes on the Wire
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Array form                     Object form (document order kept)       │
//! │  [1200, 1000, 2500, ...]        { "Mon": 1200, "Tue": "1000", ... }     │
//! │        │                                 │                              │
//! │        └──────────────┬──────────────────┘                              │
//! │                       ▼                                                 │
//! │           SalesSeries [ Mon 1200 | Tue 1000 | Wed 2500 | ... ]          │
//! │                                                                         │
//! │  Labels come from the view: Mon..Sun, Week 1..Week 4, Jan-Mar..Oct-Dec  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::Value;

use crate::money::Money;
use crate::types::{
    DaySale, DetailedReport, MonthlySales, ReportView, SalesSeries, SeriesPoint, WeekSales,
};

pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
pub const WEEK_LABELS: [&str; 4] = ["Week 1", "Week 2", "Week 3", "Week 4"];
pub const QUARTER_LABELS: [&str; 4] = ["Jan-Mar", "Apr-Jun", "Jul-Sep", "Oct-Dec"];

impl ReportView {
    /// Chart labels for this view.
    pub fn labels(&self) -> &'static [&'static str] {
        match self {
            ReportView::Daily => &WEEKDAY_LABELS,
            ReportView::Weekly => &WEEK_LABELS,
            ReportView::Monthly => &QUARTER_LABELS,
        }
    }

    /// Response field holding this view's series.
    pub fn field(&self) -> &'static str {
        match self {
            ReportView::Daily => "sales_data",
            ReportView::Weekly => "weekly_sales_data",
            ReportView::Monthly => "quarterly_sales_data",
        }
    }
}

impl DetailedReport {
    /// The chart series for a view mode.
    pub fn series(&self, view: ReportView) -> &SalesSeries {
        match view {
            ReportView::Daily => &self.sales_data,
            ReportView::Weekly => &self.weekly_sales_data,
            ReportView::Monthly => &self.quarterly_sales_data,
        }
    }

    /// The headline figure matching a view mode.
    pub fn headline(&self, view: ReportView) -> Money {
        match view {
            ReportView::Daily => self.daily_sales,
            ReportView::Weekly => self.weekly_sales,
            ReportView::Monthly => self.monthly_sales,
        }
    }
}

// =============================================================================
// Series Parsing
// =============================================================================

/// A parsed series plus how many values had to be read as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSeries {
    pub series: SalesSeries,
    pub unreadable: usize,
}

/// Reads a chart series from an array or an object.
///
/// Values are labelled positionally from `labels`; positions past the end of
/// `labels` use the object key, or `#n` for arrays. Values that are not
/// amounts count as zero and are reported in `unreadable`. Anything other
/// than an array or object is an empty series.
pub fn parse_series(value: &Value, labels: &[&str]) -> ParsedSeries {
    let entries: Vec<(String, &Value)> = match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (format!("#{}", i + 1), v))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        _ => Vec::new(),
    };

    let mut unreadable = 0;
    let points: Vec<SeriesPoint> = entries
        .into_iter()
        .enumerate()
        .map(|(i, (fallback, v))| {
            let amount = Money::from_json(v).unwrap_or_else(|| {
                unreadable += 1;
                Money::zero()
            });
            let label = labels.get(i).map(|l| l.to_string()).unwrap_or(fallback);
            SeriesPoint { label, amount }
        })
        .collect();

    ParsedSeries {
        series: SalesSeries::new(points),
        unreadable,
    }
}

// =============================================================================
// Monthly Sales
// =============================================================================

/// Sums each week's day amounts.
pub fn weekly_totals(weeks: &[(String, Vec<DaySale>)]) -> Vec<Money> {
    weeks
        .iter()
        .map(|(_, days)| days.iter().map(|d| d.amount).sum())
        .collect()
}

/// Assembles a month from its weeks.
///
/// Reported totals are used only when there is exactly one per week;
/// otherwise every total is computed from the days.
pub fn build_monthly(
    month: &str,
    weeks: Vec<(String, Vec<DaySale>)>,
    reported_totals: Option<Vec<Money>>,
) -> MonthlySales {
    let totals = match reported_totals {
        Some(totals) if totals.len() == weeks.len() => totals,
        _ => weekly_totals(&weeks),
    };

    MonthlySales {
        month: month.to_string(),
        weeks: weeks
            .into_iter()
            .zip(totals)
            .map(|((week, days), total)| WeekSales { week, days, total })
            .collect(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
