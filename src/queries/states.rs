//! Revenue and sales per purchase location.

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{Metric, StateTotal};
use crate::sql_builder::SqlBuilder;

use super::descending;

/// Query interface for per-state totals over the filtered table.
pub struct StateQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
}

impl<'a> StateQuery<'a> {
    /// Create a new `StateQuery` bound to the filtered table.
    pub fn new(conn: &'a Connection) -> Self {
        Self::on(conn, config::FILTERED_TABLE)
    }

    /// Create a `StateQuery` reading an arbitrary sales table.
    pub fn on(conn: &'a Connection, table: &'a str) -> Self {
        Self { conn, table }
    }

    /// All locations, sorted descending by `metric`.
    ///
    /// Coordinates come from the first record seen for each location.
    pub fn by(&self, metric: Metric) -> Result<Vec<StateTotal>> {
        self.query(metric, None)
    }

    /// The first `n` locations of [`by`](Self::by).
    pub fn top(&self, metric: Metric, n: usize) -> Result<Vec<StateTotal>> {
        self.query(metric, Some(n))
    }

    /// Locations recorded with more than one coordinate pair.
    pub fn conflicting_coordinates(&self) -> Result<Vec<String>> {
        let (sql, params) = SqlBuilder::new(self.table)
            .select(&["location"])
            .group_by(&["location"])
            .having("COUNT(DISTINCT lat) > 1 OR COUNT(DISTINCT lon) > 1", vec![])
            .order_by(&["location ASC"])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        Ok(rows
            .into_iter()
            .filter_map(|r| r.get("location").and_then(|v| v.as_str()).map(String::from))
            .collect())
    }

    fn query(&self, metric: Metric, limit: Option<usize>) -> Result<Vec<StateTotal>> {
        let mut qb = SqlBuilder::new(self.table);
        qb.select(&[
            "location",
            "arg_min(lat, row_id) AS lat",
            "arg_min(lon, row_id) AS lon",
            "SUM(price) AS revenue",
            "COUNT(*) AS sales",
        ])
        .group_by(&["location"])
        .order_by(&descending(metric, "location"));

        if let Some(n) = limit {
            qb.limit(n);
        }

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }
}
