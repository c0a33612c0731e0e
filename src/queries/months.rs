//! Monthly revenue and sales series.
//!
//! Buckets are calendar months keyed by (year, month) and labelled with the
//! month-end date. Months without sales between the first and last observed
//! month are emitted as zero buckets so the series is contiguous.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::config;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::MonthTotal;
use crate::sql_builder::SqlBuilder;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English name of a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[(month.clamp(1, 12) - 1) as usize]
}

/// Last day of the given month.
pub fn month_end(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1).and_then(|d| d.pred_opt())
}

#[derive(Deserialize)]
struct MonthRow {
    bucket_year: i64,
    bucket_month: i64,
    revenue: f64,
    sales: i64,
}

pub struct MonthQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
}

impl<'a> MonthQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self::on(conn, config::FILTERED_TABLE)
    }

    pub fn on(conn: &'a Connection, table: &'a str) -> Self {
        Self { conn, table }
    }

    /// The monthly series in chronological order.
    pub fn series(&self) -> Result<Vec<MonthTotal>> {
        let (sql, params) = SqlBuilder::new(self.table)
            .select(&[
                "year(purchase_date) AS bucket_year",
                "month(purchase_date) AS bucket_month",
                "SUM(price) AS revenue",
                "COUNT(*) AS sales",
            ])
            .group_by(&["bucket_year", "bucket_month"])
            .order_by(&["bucket_year ASC", "bucket_month ASC"])
            .build();

        let rows: Vec<MonthRow> = self.conn.execute_into(&sql, &params)?;
        let (first, last) = match (rows.first(), rows.last()) {
            (Some(f), Some(l)) => (
                (f.bucket_year as i32, f.bucket_month as u32),
                (l.bucket_year as i32, l.bucket_month as u32),
            ),
            _ => return Ok(Vec::new()),
        };

        let observed: HashMap<(i32, u32), (f64, i64)> = rows
            .iter()
            .map(|r| {
                (
                    (r.bucket_year as i32, r.bucket_month as u32),
                    (r.revenue, r.sales),
                )
            })
            .collect();

        let mut series = Vec::new();
        let (mut year, mut month) = first;
        loop {
            let (revenue, sales) = observed.get(&(year, month)).copied().unwrap_or((0.0, 0));
            let end = month_end(year, month).ok_or_else(|| {
                DashboardError::InvalidDate(format!("no month-end for {}-{:02}", year, month))
            })?;
            series.push(MonthTotal {
                month_end: end,
                year,
                month,
                month_name: month_name(month).to_string(),
                revenue,
                sales,
            });

            if (year, month) >= last {
                break;
            }
            if month == 12 {
                year += 1;
                month = 1;
            } else {
                month += 1;
            }
        }

        Ok(series)
    }
}
