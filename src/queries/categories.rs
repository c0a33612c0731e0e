//! Revenue and sales per product category.

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{CategoryTotal, Metric};
use crate::sql_builder::SqlBuilder;

use super::descending;

pub struct CategoryQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
}

impl<'a> CategoryQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self::on(conn, config::FILTERED_TABLE)
    }

    pub fn on(conn: &'a Connection, table: &'a str) -> Self {
        Self { conn, table }
    }

    /// All categories, sorted descending by `metric`.
    pub fn by(&self, metric: Metric) -> Result<Vec<CategoryTotal>> {
        self.query(metric, None)
    }

    /// The top [`config::TOP_N`] categories by `metric`.
    pub fn top(&self, metric: Metric) -> Result<Vec<CategoryTotal>> {
        self.query(metric, Some(config::TOP_N))
    }

    fn query(&self, metric: Metric, limit: Option<usize>) -> Result<Vec<CategoryTotal>> {
        let mut qb = SqlBuilder::new(self.table);
        qb.select(&["category", "SUM(price) AS revenue", "COUNT(*) AS sales"])
            .group_by(&["category"])
            .order_by(&descending(metric, "category"));

        if let Some(n) = limit {
            qb.limit(n);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }
}
