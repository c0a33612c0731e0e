//! Aggregate queries over the filtered record set.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and reads the filtered table.
//! Rows carry both reductions over price (revenue = sum, sales = count); the
//! [`Metric`](crate::models::Metric) argument picks the sort key.

pub mod categories;
pub mod months;
pub mod sellers;
pub mod states;
pub mod summary;

pub use categories::CategoryQuery;
pub use months::MonthQuery;
pub use sellers::SellerQuery;
pub use states::StateQuery;
pub use summary::SummaryQuery;

use crate::models::Metric;

/// ORDER BY clauses: the metric descending, ties broken by `key` ascending.
pub(crate) fn descending(metric: Metric, key: &str) -> [String; 2] {
    [format!("{} DESC", metric.column()), format!("{} ASC", key)]
}
