//! # Domain Types
//!
//! Core domain types shared by the register and the admin views.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │  InventoryItem  │   │   SalesSeries   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (string)    │   │  id (optional)  │   │  [SeriesPoint]  │       │
//! │  │  name           │   │  name, category │   │  label + amount │       │
//! │  │  price (Money)  │   │  price, stock   │   │                 │       │
//! │  │  image, category│   │  image_url      │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ DashboardSummary│   │ DetailedReport  │   │  MonthlySales   │       │
//! │  │  today / month  │   │  3 series       │   │  WeekSales[]    │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │   SaleSummary   │   │   SaleDetails   │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Leniency
//! The backends are a mix of PHP, Node and Flask endpoints. Ids arrive as
//! strings or numbers, prices as numbers or `"Kshs. 100"` strings, stock
//! counts sometimes quoted. The serde attributes here absorb all of that so
//! the rest of the code only ever sees `String` ids and [`Money`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::{self, Money};
use crate::UNCATEGORIZED;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Immutable on the client; the cart copies what it needs into a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ProductRow")]
pub struct Product {
    /// Backend identifier, normalized to a string.
    pub id: String,

    /// Display name shown to cashier.
    pub name: String,

    /// Unit price.
    #[serde(serialize_with = "money::wire::serialize")]
    pub price: Money,

    /// Image reference (URL or asset name).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    /// Category; absent means "Uncategorized".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Wire shape of a product row. Some backends send `image`, some
/// `image_url`, and some both; `image` wins when both are present.
#[derive(Deserialize)]
struct ProductRow {
    #[serde(deserialize_with = "lenient::id")]
    id: String,
    name: String,
    #[serde(deserialize_with = "money::wire::deserialize")]
    price: Money,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            image: row.image.or(row.image_url),
            category: row.category,
        }
    }
}

impl Product {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
            category: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Category name used for grouping.
    pub fn category_name(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.trim().is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }
}

// =============================================================================
// Inventory
// =============================================================================

/// A stock record as managed from the inventory screen.
///
/// The same shape is read from `fetch_products.php` and posted to the add
/// and update endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// Absent for items not yet saved.
    #[serde(
        default,
        deserialize_with = "lenient::optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(with = "money::wire::or_zero", default)]
    pub price: Money,

    #[serde(default, deserialize_with = "lenient::count")]
    pub quantity_in_stock: i64,

    #[serde(default, deserialize_with = "lenient::count")]
    pub remaining_stock: i64,

    #[serde(default, alias = "image")]
    pub image_url: String,
}

// =============================================================================
// Sales Series
// =============================================================================

/// One labelled point of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub amount: Money,
}

/// Ordered chart data (Mon..Sun, Week 1..Week 4, Q1..Q4).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesSeries {
    pub points: Vec<SeriesPoint>,
}

impl SalesSeries {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        SalesSeries { points }
    }

    pub fn total(&self) -> Money {
        self.points.iter().map(|p| p.amount).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Point with the highest amount (first wins on ties).
    pub fn peak(&self) -> Option<&SeriesPoint> {
        self.points
            .iter()
            .fold(None, |best: Option<&SeriesPoint>, p| match best {
                Some(b) if b.amount >= p.amount => Some(b),
                _ => Some(p),
            })
    }
}

/// Headline figures for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub today_sales: Money,
    pub month_sales: Money,
    /// Labelled Mon..Sun.
    pub daily: SalesSeries,
}

/// Chart granularity on the detailed analytics screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportView {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl ReportView {
    pub const ALL: [ReportView; 3] = [ReportView::Daily, ReportView::Weekly, ReportView::Monthly];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportView::Daily => "daily",
            ReportView::Weekly => "weekly",
            ReportView::Monthly => "monthly",
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportView {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(ReportView::Daily),
            "weekly" => Ok(ReportView::Weekly),
            "monthly" => Ok(ReportView::Monthly),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "view".to_string(),
                allowed: ReportView::ALL.iter().map(|v| v.to_string()).collect(),
            }),
        }
    }
}

/// Figures behind the detailed analytics screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedReport {
    pub daily_sales: Money,
    pub weekly_sales: Money,
    pub monthly_sales: Money,
    pub sales_data: SalesSeries,
    pub weekly_sales_data: SalesSeries,
    pub quarterly_sales_data: SalesSeries,
}

// =============================================================================
// Monthly Sales
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySale {
    pub day: String,
    pub amount: Money,
}

/// One week of a month, with its day-level breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSales {
    pub week: String,
    pub days: Vec<DaySale>,
    pub total: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: String,
    pub weeks: Vec<WeekSales>,
}

impl MonthlySales {
    pub fn total(&self) -> Money {
        self.weeks.iter().map(|w| w.total).sum()
    }

    /// Finds a week by its label ("Week 2") or 1-based position ("2").
    pub fn week(&self, key: &str) -> Option<&WeekSales> {
        let key = key.trim();
        if let Ok(n) = key.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.weeks.get(i));
        }
        self.weeks.iter().find(|w| w.week.eq_ignore_ascii_case(key))
    }
}

// =============================================================================
// Recent Sales
// =============================================================================

/// One row of the recent-sales list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSummary {
    #[serde(
        alias = "customerNumber",
        alias = "customer_id",
        deserialize_with = "lenient::id"
    )]
    pub customer_number: String,

    #[serde(default, alias = "customerName", alias = "name")]
    pub customer_name: Option<String>,

    #[serde(default, alias = "amount", alias = "total_amount", with = "money::wire::or_zero")]
    pub total: Money,

    #[serde(default, alias = "sale_date", alias = "created_at")]
    pub date: Option<String>,
}

/// A single item on a customer's sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    #[serde(alias = "product_name")]
    pub name: String,

    #[serde(default = "one", deserialize_with = "lenient::count")]
    pub quantity: i64,

    #[serde(default, alias = "unit_price", with = "money::wire::or_zero")]
    pub price: Money,
}

fn one() -> i64 {
    1
}

/// Everything the backend knows about one customer's sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleDetails {
    #[serde(
        alias = "customerNumber",
        alias = "customer_id",
        deserialize_with = "lenient::id"
    )]
    pub customer_number: String,

    #[serde(default, alias = "customerName", alias = "name")]
    pub customer_name: Option<String>,

    #[serde(default)]
    pub items: Vec<SaleItem>,

    #[serde(default, alias = "total_amount", with = "money::wire::option")]
    pub total: Option<Money>,

    #[serde(default, alias = "sale_date", alias = "created_at")]
    pub date: Option<String>,
}

impl SaleDetails {
    /// The reported total, or the item sum when the backend omits it.
    pub fn effective_total(&self) -> Money {
        self.total.unwrap_or_else(|| {
            self.items
                .iter()
                .map(|i| i.price.multiply_quantity(i.quantity))
                .sum()
        })
    }
}

// =============================================================================
// Lenient Deserializers
// =============================================================================

pub(crate) mod lenient {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn id_from_value<E: serde::de::Error>(value: Value) -> Result<Option<String>, E> {
        match value {
            Value::Null => Ok(None),
            Value::String(s) => Ok(Some(s)),
            Value::Number(n) => Ok(Some(n.to_string())),
            other => Err(E::custom(format!("invalid id: {}", other))),
        }
    }

    pub fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        id_from_value(Value::deserialize(deserializer)?)?
            .ok_or_else(|| D::Error::custom("id is null"))
    }

    pub fn optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        id_from_value(Value::deserialize(deserializer)?)
    }

    /// Stock counts: integers, floats (truncated) or numeric strings.
    pub fn count<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(0),
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .ok_or_else(|| D::Error::custom(format!("invalid count: {}", n))),
            Value::String(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| D::Error::custom(format!("invalid count: {}", s))),
            other => Err(D::Error::custom(format!("invalid count: {}", other))),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
