use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Metric: Which reduction an aggregate table is sorted by
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Sum of price.
    Revenue,
    /// Number of transactions.
    Sales,
}

impl Metric {
    /// Result column holding this reduction.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Sales => "sales",
        }
    }
}

// ---------------------------------------------------------------------------
// StateTotal: Revenue and sales for one purchase location
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateTotal {
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub revenue: f64,
    pub sales: i64,
}

// ---------------------------------------------------------------------------
// MonthTotal: Revenue and sales for one calendar month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    /// Last day of the month, the bucket label.
    pub month_end: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub revenue: f64,
    pub sales: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub revenue: f64,
    pub sales: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellerTotal {
    pub seller: String,
    pub revenue: f64,
    pub sales: i64,
}

// ---------------------------------------------------------------------------
// SalesSummary: Headline metrics of the filtered set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub revenue: f64,
    pub sales: i64,
}

// ---------------------------------------------------------------------------
// DashboardSnapshot: Everything a renderer needs for one pass
// ---------------------------------------------------------------------------

/// All aggregate tables over the current filtered set, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub summary: SalesSummary,
    /// `format_number(revenue, "R$")`
    pub revenue_label: String,
    /// `format_number(sales, "")`
    pub sales_label: String,
    pub states_by_revenue: Vec<StateTotal>,
    pub states_by_sales: Vec<StateTotal>,
    pub top_states_by_revenue: Vec<StateTotal>,
    pub top_states_by_sales: Vec<StateTotal>,
    pub monthly: Vec<MonthTotal>,
    pub top_categories_by_revenue: Vec<CategoryTotal>,
    pub top_categories_by_sales: Vec<CategoryTotal>,
    pub top_sellers_by_revenue: Vec<SellerTotal>,
    pub top_sellers_by_sales: Vec<SellerTotal>,
}
