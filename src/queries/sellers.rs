//! Revenue and sales per seller, with the adjustable top-N view.

use crate::config;
use crate::connection::Connection;
use crate::error::{DashboardError, Result};
use crate::models::{Metric, SellerTotal};
use crate::sql_builder::SqlBuilder;

use super::descending;

/// Query interface for per-seller totals over the filtered table.
pub struct SellerQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
}

impl<'a> SellerQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self::on(conn, config::FILTERED_TABLE)
    }

    pub fn on(conn: &'a Connection, table: &'a str) -> Self {
        Self { conn, table }
    }

    /// All sellers, sorted descending by `metric`.
    pub fn by(&self, metric: Metric) -> Result<Vec<SellerTotal>> {
        self.query(metric, None)
    }

    /// The first `n` sellers by `metric`.
    ///
    /// `n` must lie within [`config::SELLER_TOP_MIN`]..=[`config::SELLER_TOP_MAX`].
    /// Fewer rows come back when there are fewer sellers.
    pub fn top(&self, metric: Metric, n: usize) -> Result<Vec<SellerTotal>> {
        if !(config::SELLER_TOP_MIN..=config::SELLER_TOP_MAX).contains(&n) {
            return Err(DashboardError::InvalidArgument(format!(
                "seller count {} outside {}-{}",
                n,
                config::SELLER_TOP_MIN,
                config::SELLER_TOP_MAX
            )));
        }
        self.query(metric, Some(n))
    }

    fn query(&self, metric: Metric, limit: Option<usize>) -> Result<Vec<SellerTotal>> {
        let mut qb = SqlBuilder::new(self.table);
        qb.select(&["seller", "SUM(price) AS revenue", "COUNT(*) AS sales"])
            .group_by(&["seller"])
            .order_by(&descending(metric, "seller"));

        if let Some(n) = limit {
            qb.limit(n);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }
}
