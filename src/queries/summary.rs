//! Headline totals of the filtered set.

use crate::config;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::SalesSummary;
use crate::sql_builder::SqlBuilder;

pub struct SummaryQuery<'a> {
    conn: &'a Connection,
    table: &'a str,
}

impl<'a> SummaryQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self::on(conn, config::FILTERED_TABLE)
    }

    pub fn on(conn: &'a Connection, table: &'a str) -> Self {
        Self { conn, table }
    }

    /// Total revenue and number of sales. Both are zero for an empty set.
    pub fn totals(&self) -> Result<SalesSummary> {
        let (sql, params) = SqlBuilder::new(self.table)
            .select(&[
                "CAST(COALESCE(SUM(price), 0) AS DOUBLE) AS revenue",
                "COUNT(*) AS sales",
            ])
            .build();

        let rows: Vec<SalesSummary> = self.conn.execute_into(&sql, &params)?;
        Ok(rows.into_iter().next().unwrap_or(SalesSummary {
            revenue: 0.0,
            sales: 0,
        }))
    }
}
