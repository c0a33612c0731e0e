//! CSV export of a record set.
//!
//! Headers use the API's Portuguese field names so an export reads like the
//! raw table it came from.

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::config;
use crate::error::{DashboardError, Result};
use crate::models::SalesRecord;

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// An exportable column, in the order the API returns them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Product,
    Category,
    Price,
    Freight,
    PurchaseDate,
    Seller,
    Location,
    Rating,
    PaymentType,
    Installments,
    Lat,
    Lon,
}

impl Column {
    pub const ALL: [Column; 12] = [
        Column::Product,
        Column::Category,
        Column::Price,
        Column::Freight,
        Column::PurchaseDate,
        Column::Seller,
        Column::Location,
        Column::Rating,
        Column::PaymentType,
        Column::Installments,
        Column::Lat,
        Column::Lon,
    ];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Product => "Produto",
            Column::Category => "Categoria do Produto",
            Column::Price => "Preço",
            Column::Freight => "Frete",
            Column::PurchaseDate => "Data da Compra",
            Column::Seller => "Vendedor",
            Column::Location => "Local da compra",
            Column::Rating => "Avaliação da compra",
            Column::PaymentType => "Tipo de pagamento",
            Column::Installments => "Quantidade de parcelas",
            Column::Lat => "lat",
            Column::Lon => "lon",
        }
    }

    /// The cell text of this column for one record.
    pub fn value(&self, r: &SalesRecord) -> String {
        match self {
            Column::Product => r.product.clone(),
            Column::Category => r.category.clone(),
            Column::Price => r.price.to_string(),
            Column::Freight => r.freight.to_string(),
            Column::PurchaseDate => r.purchase_date.format("%Y-%m-%d").to_string(),
            Column::Seller => r.seller.clone(),
            Column::Location => r.location.clone(),
            Column::Rating => r.rating.to_string(),
            Column::PaymentType => r.payment_type.clone().unwrap_or_default(),
            Column::Installments => r.installments.to_string(),
            Column::Lat => r.lat.to_string(),
            Column::Lon => r.lon.to_string(),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

impl FromStr for Column {
    type Err = DashboardError;

    /// Accepts the header text, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Column::ALL
            .iter()
            .copied()
            .find(|c| c.header().to_lowercase() == wanted)
            .ok_or_else(|| DashboardError::InvalidArgument(format!("Unknown column '{}'", s)))
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Write `records` as UTF-8 CSV with a header row for `columns`.
///
/// Returns the number of data rows written. An empty record set still
/// produces the header row.
pub fn write_csv<W: Write>(writer: W, records: &[SalesRecord], columns: &[Column]) -> Result<usize> {
    if columns.is_empty() {
        return Err(DashboardError::InvalidArgument(
            "at least one column must be selected".to_string(),
        ));
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(columns.iter().map(|c| c.header()))?;
    for r in records {
        wtr.write_record(columns.iter().map(|c| c.value(r)))?;
    }
    wtr.flush()?;
    Ok(records.len())
}

/// File name for an export: `name` with a `.csv` suffix.
///
/// A blank name falls back to [`config::DEFAULT_EXPORT_STEM`]; a name that
/// already ends in `.csv` is kept as is.
pub fn csv_file_name(name: &str) -> String {
    let stem = name.trim();
    let stem = if stem.is_empty() { config::DEFAULT_EXPORT_STEM } else { stem };
    if stem.to_lowercase().ends_with(".csv") {
        stem.to_string()
    } else {
        format!("{}.csv", stem)
    }
}

/// Write `records` to `dir/<name>.csv`, returning the path written.
pub fn write_csv_file(
    dir: &Path,
    name: &str,
    records: &[SalesRecord],
    columns: &[Column],
) -> Result<PathBuf> {
    let path = dir.join(csv_file_name(name));
    let file = File::create(&path)?;
    write_csv(file, records, columns)?;
    Ok(path)
}
