//! DuckDB connection wrapper holding the sales tables and running queries.
//!
//! Record sets are loaded into in-memory tables with an explicit schema and a
//! hidden `row_id` column that preserves arrival order. Every read goes through
//! [`Connection::execute`] so rows come back as `serde_json` maps that can be
//! deserialized into the model types.

use crate::error::Result;
use crate::models::SalesRecord;
use duckdb::types::{Value, ValueRef};
use duckdb::{Connection as DuckDbConnection, ToSql};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info};

/// Columns selected when reading a table back as [`SalesRecord`]s.
///
/// The purchase date is cast to its ISO text form so it deserializes
/// straight into a `NaiveDate`.
pub const RECORD_COLUMNS: [&str; 12] = [
    "product",
    "category",
    "price",
    "freight",
    "CAST(purchase_date AS VARCHAR) AS purchase_date",
    "location",
    "lat",
    "lon",
    "seller",
    "rating",
    "payment_type",
    "installments",
];

const INSERT_PLACEHOLDERS: &str = "?, ?, ?, ?, ?, CAST(? AS DATE), ?, ?, ?, ?, ?, ?, ?";

/// Wraps an in-memory DuckDB database holding the sales tables.
pub struct Connection {
    conn: DuckDbConnection,
    tables: RefCell<BTreeSet<String>>,
}

impl Connection {
    /// Open an empty in-memory database.
    pub fn new() -> Result<Self> {
        let conn = DuckDbConnection::open_in_memory()?;
        Ok(Self {
            conn,
            tables: RefCell::new(BTreeSet::new()),
        })
    }

    /// Replace `table` with the given records, preserving their order.
    ///
    /// The table is recreated even when `records` is empty, so queries
    /// against it always succeed.
    pub fn load_records(&self, table: &str, records: &[SalesRecord]) -> Result<()> {
        self.conn.execute_batch(&format!(
            "CREATE OR REPLACE TABLE {} (\
               row_id BIGINT, \
               product VARCHAR, \
               category VARCHAR, \
               price DOUBLE, \
               freight DOUBLE, \
               purchase_date DATE, \
               location VARCHAR, \
               lat DOUBLE, \
               lon DOUBLE, \
               seller VARCHAR, \
               rating BIGINT, \
               payment_type VARCHAR, \
               installments BIGINT)",
            table
        ))?;

        if !records.is_empty() {
            self.conn.execute_batch("BEGIN TRANSACTION")?;
            let inserted = self.insert_records(table, records);
            match inserted {
                Ok(()) => self.conn.execute_batch("COMMIT")?,
                Err(e) => {
                    let _ = self.conn.execute_batch("ROLLBACK");
                    return Err(e);
                }
            }
        }

        self.tables.borrow_mut().insert(table.to_string());
        info!("Loaded {} records into {}", records.len(), table);
        Ok(())
    }

    fn insert_records(&self, table: &str, records: &[SalesRecord]) -> Result<()> {
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO {} VALUES ({})",
            table, INSERT_PLACEHOLDERS
        ))?;

        for (row_id, r) in records.iter().enumerate() {
            let date = r.purchase_date.format("%Y-%m-%d").to_string();
            stmt.execute(duckdb::params![
                row_id as i64,
                r.product,
                r.category,
                r.price,
                r.freight,
                date,
                r.location,
                r.lat,
                r.lon,
                r.seller,
                r.rating,
                r.payment_type,
                r.installments,
            ])?;
        }
        Ok(())
    }

    /// Read a whole table back as records, in arrival order.
    pub fn read_records(&self, table: &str) -> Result<Vec<SalesRecord>> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY row_id ASC",
            RECORD_COLUMNS.join(", "),
            table
        );
        self.execute_into(&sql, &[])
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// Each row is represented as a `HashMap<String, serde_json::Value>`.
    pub fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        debug!(%sql, params = params.len(), "executing query");
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();

        let mut rows_result = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the query has run
        let (column_names, column_count) = match rows_result.as_ref() {
            Some(stmt) => (
                stmt.column_names()
                    .into_iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>(),
                stmt.column_count(),
            ),
            None => (Vec::new(), 0),
        };

        let mut out: Vec<HashMap<String, serde_json::Value>> = Vec::new();

        while let Some(row) = rows_result.next()? {
            let mut map = HashMap::with_capacity(column_count);
            for (i, col_name) in column_names.iter().enumerate() {
                let value = convert_value_ref(row.get_ref(i)?);
                map.insert(col_name.clone(), value);
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[Value]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn ToSql> = params.iter().map(|p| p as &dyn ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        if let Some(row) = rows.next()? {
            Ok(Some(convert_value_ref(row.get_ref(0)?)))
        } else {
            Ok(None)
        }
    }

    /// Check whether a table has been loaded.
    pub fn has_table(&self, name: &str) -> bool {
        self.tables.borrow().contains(name)
    }

    /// Names of all loaded tables, sorted.
    pub fn tables(&self) -> Vec<String> {
        self.tables.borrow().iter().cloned().collect()
    }

    /// Access the underlying DuckDB connection for advanced usage.
    pub fn raw(&self) -> &DuckDbConnection {
        &self.conn
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::SmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::Int(n) => serde_json::Value::Number(n.into()),
        ValueRef::BigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UTinyInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::USmallInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::UBigInt(n) => serde_json::Value::Number(n.into()),
        ValueRef::HugeInt(n) => {
            // SUM over BIGINT widens to HUGEINT
            if let Ok(i) = i64::try_from(n) {
                serde_json::Value::Number(i.into())
            } else {
                serde_json::Value::String(n.to_string())
            }
        }
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Date32(days) => chrono::NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|epoch| epoch.checked_add_signed(chrono::Duration::days(days as i64)))
            .map(|d| serde_json::Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(serde_json::Value::Null),
        _ => serde_json::Value::Null,
    }
}
