//! Client-side predicates over the canonical record set.
//!
//! A [`SalesFilter`] is compiled into WHERE clauses by [`SalesFilter::apply_to`].
//! Unset predicates do not restrict anything; a selection set to an empty
//! list restricts to nothing.

use chrono::NaiveDate;
use duckdb::types::Value;
use serde::{Deserialize, Serialize};

use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// An inclusive `[min, max]` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

impl<T: PartialOrd> Bounds<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: &T) -> bool {
        &self.min <= value && value <= &self.max
    }

    fn check(&self, name: &str) -> Result<()>
    where
        T: std::fmt::Debug,
    {
        if self.min > self.max {
            return Err(DashboardError::InvalidArgument(format!(
                "{} range is inverted: {:?} > {:?}",
                name, self.min, self.max
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FilterBounds
// ---------------------------------------------------------------------------

/// Values observed in a record set, used as the defaults of every control.
///
/// Selection lists keep first-seen order. Ranges are `None` when the set is
/// empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FilterBounds {
    pub products: Vec<String>,
    pub categories: Vec<String>,
    pub sellers: Vec<String>,
    pub locations: Vec<String>,
    pub price: Option<Bounds<f64>>,
    pub freight: Option<Bounds<f64>>,
    pub purchase_date: Option<Bounds<NaiveDate>>,
    pub rating: Option<Bounds<i64>>,
    pub installments: Option<Bounds<i64>>,
}

#[derive(Deserialize)]
struct RangeRow {
    row_count: i64,
    price_min: Option<f64>,
    price_max: Option<f64>,
    freight_min: Option<f64>,
    freight_max: Option<f64>,
    date_min: Option<NaiveDate>,
    date_max: Option<NaiveDate>,
    rating_min: Option<i64>,
    rating_max: Option<i64>,
    installments_min: Option<i64>,
    installments_max: Option<i64>,
}

fn pair<T>(min: Option<T>, max: Option<T>) -> Option<Bounds<T>> {
    match (min, max) {
        (Some(min), Some(max)) => Some(Bounds { min, max }),
        _ => None,
    }
}

impl FilterBounds {
    /// Observe the bounds of `table`.
    pub fn observe(conn: &Connection, table: &str) -> Result<Self> {
        let ranges: Vec<RangeRow> = conn.execute_into(
            &format!(
                "SELECT COUNT(*) AS row_count, \
                 MIN(price) AS price_min, MAX(price) AS price_max, \
                 MIN(freight) AS freight_min, MAX(freight) AS freight_max, \
                 CAST(MIN(purchase_date) AS VARCHAR) AS date_min, \
                 CAST(MAX(purchase_date) AS VARCHAR) AS date_max, \
                 MIN(rating) AS rating_min, MAX(rating) AS rating_max, \
                 MIN(installments) AS installments_min, MAX(installments) AS installments_max \
                 FROM {}",
                table
            ),
            &[],
        )?;

        let mut bounds = FilterBounds {
            products: distinct(conn, table, "product")?,
            categories: distinct(conn, table, "category")?,
            sellers: distinct(conn, table, "seller")?,
            locations: distinct(conn, table, "location")?,
            ..Default::default()
        };

        if let Some(r) = ranges.into_iter().next().filter(|r| r.row_count > 0) {
            bounds.price = pair(r.price_min, r.price_max);
            bounds.freight = pair(r.freight_min, r.freight_max);
            bounds.purchase_date = pair(r.date_min, r.date_max);
            bounds.rating = pair(r.rating_min, r.rating_max);
            bounds.installments = pair(r.installments_min, r.installments_max);
        }

        Ok(bounds)
    }
}

/// Distinct values of `column` in first-seen order.
fn distinct(conn: &Connection, table: &str, column: &str) -> Result<Vec<String>> {
    let (sql, params) = SqlBuilder::new(table)
        .select(&[column])
        .group_by(&[column])
        .order_by(&["MIN(row_id) ASC"])
        .build();

    let rows = conn.execute(&sql, &params)?;
    Ok(rows
        .into_iter()
        .filter_map(|mut r| match r.remove(column) {
            Some(serde_json::Value::String(s)) => Some(s),
            _ => None,
        })
        .collect())
}

// ---------------------------------------------------------------------------
// SalesFilter
// ---------------------------------------------------------------------------

/// User-chosen predicates. A record passes when it satisfies all of them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesFilter {
    pub products: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub sellers: Option<Vec<String>>,
    pub locations: Option<Vec<String>>,
    pub price: Option<Bounds<f64>>,
    pub freight: Option<Bounds<f64>>,
    pub purchase_date: Option<Bounds<NaiveDate>>,
    pub rating: Option<Bounds<i64>>,
    pub installments: Option<Bounds<i64>>,
}

fn owned<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl SalesFilter {
    /// A filter with no predicates: every record passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every control at its default: all observed values selected, every
    /// range spanning the observed min/max.
    pub fn from_bounds(bounds: &FilterBounds) -> Self {
        Self {
            products: Some(bounds.products.clone()),
            categories: Some(bounds.categories.clone()),
            sellers: Some(bounds.sellers.clone()),
            locations: Some(bounds.locations.clone()),
            price: bounds.price,
            freight: bounds.freight,
            purchase_date: bounds.purchase_date,
            rating: bounds.rating,
            installments: bounds.installments,
        }
    }

    pub fn with_products<I: IntoIterator<Item = S>, S: Into<String>>(mut self, v: I) -> Self {
        self.products = Some(owned(v));
        self
    }

    pub fn with_categories<I: IntoIterator<Item = S>, S: Into<String>>(mut self, v: I) -> Self {
        self.categories = Some(owned(v));
        self
    }

    pub fn with_sellers<I: IntoIterator<Item = S>, S: Into<String>>(mut self, v: I) -> Self {
        self.sellers = Some(owned(v));
        self
    }

    pub fn with_locations<I: IntoIterator<Item = S>, S: Into<String>>(mut self, v: I) -> Self {
        self.locations = Some(owned(v));
        self
    }

    pub fn with_price(mut self, min: f64, max: f64) -> Self {
        self.price = Some(Bounds::new(min, max));
        self
    }

    pub fn with_freight(mut self, min: f64, max: f64) -> Self {
        self.freight = Some(Bounds::new(min, max));
        self
    }

    pub fn with_purchase_date(mut self, min: NaiveDate, max: NaiveDate) -> Self {
        self.purchase_date = Some(Bounds::new(min, max));
        self
    }

    pub fn with_rating(mut self, min: i64, max: i64) -> Self {
        self.rating = Some(Bounds::new(min, max));
        self
    }

    pub fn with_installments(mut self, min: i64, max: i64) -> Self {
        self.installments = Some(Bounds::new(min, max));
        self
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject inverted ranges.
    pub fn validate(&self) -> Result<()> {
        if let Some(b) = &self.price {
            b.check("price")?;
        }
        if let Some(b) = &self.freight {
            b.check("freight")?;
        }
        if let Some(b) = &self.purchase_date {
            b.check("purchase date")?;
        }
        if let Some(b) = &self.rating {
            b.check("rating")?;
        }
        if let Some(b) = &self.installments {
            b.check("installments")?;
        }
        Ok(())
    }

    /// Add this filter's predicates to a query.
    pub fn apply_to(&self, qb: &mut SqlBuilder) -> Result<()> {
        self.validate()?;

        if let Some(v) = &self.products {
            qb.where_in("product", v.as_slice());
        }
        if let Some(v) = &self.categories {
            qb.where_in("category", v.as_slice());
        }
        if let Some(v) = &self.sellers {
            qb.where_in("seller", v.as_slice());
        }
        if let Some(v) = &self.locations {
            qb.where_in("location", v.as_slice());
        }
        if let Some(b) = &self.price {
            qb.where_between("price", Value::Double(b.min), Value::Double(b.max));
        }
        if let Some(b) = &self.freight {
            qb.where_between("freight", Value::Double(b.min), Value::Double(b.max));
        }
        if let Some(b) = &self.purchase_date {
            qb.where_clause(
                "purchase_date BETWEEN CAST(? AS DATE) AND CAST(? AS DATE)",
                vec![
                    Value::Text(b.min.format("%Y-%m-%d").to_string()),
                    Value::Text(b.max.format("%Y-%m-%d").to_string()),
                ],
            );
        }
        if let Some(b) = &self.rating {
            qb.where_between("rating", Value::BigInt(b.min), Value::BigInt(b.max));
        }
        if let Some(b) = &self.installments {
            qb.where_between("installments", Value::BigInt(b.min), Value::BigInt(b.max));
        }
        Ok(())
    }
}

/// Select the records of `table` that pass `filter`, in arrival order.
pub fn select_records(
    conn: &Connection,
    table: &str,
    filter: &SalesFilter,
) -> Result<Vec<crate::models::SalesRecord>> {
    let mut qb = SqlBuilder::new(table);
    qb.select(&crate::connection::RECORD_COLUMNS)
        .order_by(&["row_id ASC"]);
    filter.apply_to(&mut qb)?;

    let (sql, params) = qb.build();
    conn.execute_into(&sql, &params)
}
