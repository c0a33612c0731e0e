//! Sales dashboard core.
//!
//! Fetches sales transactions from the remote products API, holds them in an
//! in-process DuckDB database, narrows them with client-side filters and
//! computes the summary tables a dashboard renders: revenue and sales count
//! by state, month, category and seller.
//!
//! # Quick start
//!
//! ```no_run
//! use sales_dashboard::{Metric, Region, SalesDashboard, SalesFilter, SalesQuery};
//!
//! let mut dash = SalesDashboard::builder().build().unwrap();
//! dash.load(&SalesQuery::new(Region::Sudeste, Some(2022))).unwrap();
//!
//! dash.apply_filter(&SalesFilter::new().with_sellers(["Thiago Silva"])).unwrap();
//! let states = dash.states().top(Metric::Revenue, 5).unwrap();
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod export;
pub mod filter;
pub mod format;
pub mod models;
pub mod queries;
pub mod source;
pub mod sql_builder;

pub use config::Region;
pub use connection::Connection;
pub use error::{DashboardError, Result};
pub use export::{csv_file_name, write_csv, Column};
pub use filter::{Bounds, FilterBounds, SalesFilter};
pub use format::format_number;
pub use models::*;
pub use source::{parse_records, SalesQuery, SalesSource};
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

// ---------------------------------------------------------------------------
// SalesDashboardBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SalesDashboard`].
pub struct SalesDashboardBuilder {
    endpoint: String,
    timeout: Duration,
}

impl Default for SalesDashboardBuilder {
    fn default() -> Self {
        Self {
            endpoint: config::API_URL.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
        }
    }
}

impl SalesDashboardBuilder {
    /// Override the products endpoint. Defaults to [`config::API_URL`].
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the HTTP request timeout. Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the dashboard with empty canonical and filtered tables.
    ///
    /// Nothing is fetched until [`SalesDashboard::load`] is called.
    pub fn build(self) -> Result<SalesDashboard> {
        let conn = Connection::new()?;
        conn.load_records(config::SALES_TABLE, &[])?;
        conn.load_records(config::FILTERED_TABLE, &[])?;
        Ok(SalesDashboard {
            conn,
            source: SalesSource::new(self.endpoint, self.timeout),
            query: None,
        })
    }
}

// ---------------------------------------------------------------------------
// SalesDashboard
// ---------------------------------------------------------------------------

/// One dashboard session: the fetched record set, its filtered view and the
/// aggregate queries over it.
///
/// Data flows `load` (or `ingest`) -> `apply_filter` -> query accessors.
/// Loading new data resets the filtered view to the full record set.
pub struct SalesDashboard {
    conn: Connection,
    source: SalesSource,
    query: Option<SalesQuery>,
}

impl SalesDashboard {
    /// Create a new builder for configuring the dashboard.
    pub fn builder() -> SalesDashboardBuilder {
        SalesDashboardBuilder::default()
    }

    // -- Canonical record set ----------------------------------------------

    /// Fetch the records matching `query` and make them the canonical set.
    ///
    /// Returns the number of records fetched.
    pub fn load(&mut self, query: &SalesQuery) -> Result<usize> {
        let records = self.source.fetch(query)?;
        self.ingest(&records)?;
        self.query = Some(*query);
        Ok(records.len())
    }

    /// Make `records` the canonical set without going through the API.
    pub fn ingest(&self, records: &[SalesRecord]) -> Result<()> {
        self.conn.load_records(config::SALES_TABLE, records)?;
        self.conn.load_records(config::FILTERED_TABLE, records)?;

        let conflicts = queries::StateQuery::on(&self.conn, config::SALES_TABLE)
            .conflicting_coordinates()?;
        if !conflicts.is_empty() {
            warn!(
                locations = ?conflicts,
                "Locations with more than one coordinate pair; using the first seen"
            );
        }
        Ok(())
    }

    /// The server-side query of the last successful [`load`](Self::load).
    pub fn current_query(&self) -> Option<&SalesQuery> {
        self.query.as_ref()
    }

    /// The canonical record set, in arrival order.
    pub fn records(&self) -> Result<Vec<SalesRecord>> {
        self.conn.read_records(config::SALES_TABLE)
    }

    /// Observed values and ranges of the canonical set.
    pub fn bounds(&self) -> Result<FilterBounds> {
        FilterBounds::observe(&self.conn, config::SALES_TABLE)
    }

    // -- Filtered record set -----------------------------------------------

    /// Narrow the canonical set with `filter` and make the result the
    /// filtered set read by every aggregate query.
    pub fn apply_filter(&self, filter: &SalesFilter) -> Result<Vec<SalesRecord>> {
        let records = filter::select_records(&self.conn, config::SALES_TABLE, filter)?;
        self.conn.load_records(config::FILTERED_TABLE, &records)?;
        info!("Filter kept {} records", records.len());
        Ok(records)
    }

    /// Drop any client-side filter: the filtered set becomes the canonical set.
    pub fn reset_filter(&self) -> Result<Vec<SalesRecord>> {
        self.apply_filter(&SalesFilter::new())
    }

    /// The current filtered record set, in arrival order.
    pub fn filtered(&self) -> Result<Vec<SalesRecord>> {
        self.conn.read_records(config::FILTERED_TABLE)
    }

    // -- Aggregate accessors -----------------------------------------------

    /// Per-state totals over the filtered set.
    pub fn states(&self) -> queries::StateQuery<'_> {
        queries::StateQuery::new(&self.conn)
    }

    /// Monthly series over the filtered set.
    pub fn months(&self) -> queries::MonthQuery<'_> {
        queries::MonthQuery::new(&self.conn)
    }

    /// Per-category totals over the filtered set.
    pub fn categories(&self) -> queries::CategoryQuery<'_> {
        queries::CategoryQuery::new(&self.conn)
    }

    /// Per-seller totals over the filtered set.
    pub fn sellers(&self) -> queries::SellerQuery<'_> {
        queries::SellerQuery::new(&self.conn)
    }

    /// Total revenue and sales of the filtered set.
    pub fn summary(&self) -> Result<SalesSummary> {
        queries::SummaryQuery::new(&self.conn).totals()
    }

    /// Every aggregate table a dashboard renders, with `top_sellers` rows in
    /// the seller views.
    pub fn snapshot(&self, top_sellers: usize) -> Result<DashboardSnapshot> {
        let summary = self.summary()?;
        let states = self.states();
        let categories = self.categories();
        let sellers = self.sellers();

        Ok(DashboardSnapshot {
            revenue_label: format_number(summary.revenue, "R$"),
            sales_label: format_number(summary.sales as f64, ""),
            summary,
            states_by_revenue: states.by(Metric::Revenue)?,
            states_by_sales: states.by(Metric::Sales)?,
            top_states_by_revenue: states.top(Metric::Revenue, config::TOP_N)?,
            top_states_by_sales: states.top(Metric::Sales, config::TOP_N)?,
            monthly: self.months().series()?,
            top_categories_by_revenue: categories.top(Metric::Revenue)?,
            top_categories_by_sales: categories.top(Metric::Sales)?,
            top_sellers_by_revenue: sellers.top(Metric::Revenue, top_sellers)?,
            top_sellers_by_sales: sellers.top(Metric::Sales, top_sellers)?,
        })
    }

    // -- Export --------------------------------------------------------------

    /// Write the filtered set as CSV with the selected columns.
    pub fn export_csv<W: Write>(&self, writer: W, columns: &[Column]) -> Result<usize> {
        let records = self.filtered()?;
        export::write_csv(writer, &records, columns)
    }

    /// Write the filtered set to `dir/<name>.csv`.
    pub fn export_csv_file(&self, dir: &Path, name: &str, columns: &[Column]) -> Result<PathBuf> {
        let records = self.filtered()?;
        let path = export::write_csv_file(dir, name, &records, columns)?;
        info!("Exported {} records to {}", records.len(), path.display());
        Ok(path)
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the dashboard and release the database and HTTP client.
    pub fn close(mut self) {
        self.source.close();
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SalesDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query = match &self.query {
            Some(q) => format!(
                "{}/{}",
                q.region,
                q.year.map(|y| y.to_string()).unwrap_or_else(|| "all".to_string())
            ),
            None => "none".to_string(),
        };
        write!(
            f,
            "SalesDashboard(endpoint={}, query={}, tables=[{}])",
            self.source.endpoint,
            query,
            self.conn.tables().join(", ")
        )
    }
}
