//! SQL builder with parameterized query construction.
//!
//! Every user-supplied value goes through DuckDB's parameter binding (`?`
//! placeholders) as a typed [`Value`], never through string interpolation.
//! Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use sales_dashboard::SqlBuilder;
//! use duckdb::types::Value;
//!
//! let (sql, params) = SqlBuilder::new("vendas")
//!     .where_in("seller", &["Thiago Silva", "Bianca Santos"])
//!     .where_between("price", Value::Double(0.0), Value::Double(5000.0))
//!     .order_by(&["row_id ASC"])
//!     .build();
//! assert_eq!(params.len(), 4);
//! ```

use duckdb::types::Value;

/// Builds parameterized SQL queries over the sales tables.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    group_by_cols: Vec<String>,
    having_clauses: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by_cols: Vec::new(),
            having_clauses: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add a WHERE condition with one `?` placeholder per param, in order.
    pub fn where_clause(&mut self, condition: &str, params: Vec<Value>) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// Add an IN condition over text values.
    ///
    /// An empty list produces `FALSE`: nothing is selected.
    pub fn where_in<S: AsRef<str>>(&mut self, column: &str, values: &[S]) -> &mut Self {
        if values.is_empty() {
            self.where_clauses.push("FALSE".to_string());
            return self;
        }
        let placeholders = vec!["?"; values.len()].join(", ");
        self.where_clauses
            .push(format!("{} IN ({})", column, placeholders));
        self.params
            .extend(values.iter().map(|v| Value::Text(v.as_ref().to_string())));
        self
    }

    /// Add an equality condition: `{column} = ?`.
    pub fn where_eq(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value);
        self
    }

    /// Add an inclusive range condition: `{column} BETWEEN ? AND ?`.
    pub fn where_between(&mut self, column: &str, min: Value, max: Value) -> &mut Self {
        self.where_clauses
            .push(format!("{} BETWEEN ? AND ?", column));
        self.params.push(min);
        self.params.push(max);
        self
    }

    /// Add GROUP BY columns.
    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by_cols
            .extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add a HAVING condition with `?` placeholders.
    pub fn having(&mut self, condition: &str, params: Vec<Value>) -> &mut Self {
        self.having_clauses.push(condition.to_string());
        self.params.extend(params);
        self
    }

    /// Add ORDER BY clauses (e.g. `"revenue DESC"`, `"location ASC"`).
    pub fn order_by<S: AsRef<str>>(&mut self, clauses: &[S]) -> &mut Self {
        self.order_by_cols
            .extend(clauses.iter().map(|c| c.as_ref().to_string()));
        self
    }

    /// Set the maximum number of rows to return.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    /// Build the final SQL string and parameter list.
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut parts = vec![
            format!("SELECT {}", self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.group_by_cols.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by_cols.join(", ")));
        }

        if !self.having_clauses.is_empty() {
            parts.push(format!("HAVING {}", self.having_clauses.join(" AND ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
