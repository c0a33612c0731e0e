use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};

/// Date format used by the API for "Data da Compra".
pub const WIRE_DATE_FORMAT: &str = "%d/%m/%Y";

// ---------------------------------------------------------------------------
// SalesRecord: One transaction, as held in memory and in DuckDB
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub product: String,
    pub category: String,
    pub price: f64,
    pub freight: f64,
    pub purchase_date: NaiveDate,
    pub location: String,
    pub lat: f64,
    pub lon: f64,
    pub seller: String,
    pub rating: i64,
    pub payment_type: Option<String>,
    pub installments: i64,
}

// ---------------------------------------------------------------------------
// RawSale: One transaction as returned by the API (Portuguese keys)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSale {
    #[serde(rename = "Produto")]
    pub product: String,
    #[serde(rename = "Categoria do Produto")]
    pub category: String,
    #[serde(rename = "Preço")]
    pub price: f64,
    #[serde(rename = "Frete")]
    pub freight: f64,
    #[serde(rename = "Data da Compra")]
    pub purchase_date: String,
    #[serde(rename = "Vendedor")]
    pub seller: String,
    #[serde(rename = "Local da compra")]
    pub location: String,
    #[serde(rename = "Avaliação da compra")]
    pub rating: i64,
    #[serde(rename = "Tipo de pagamento", default)]
    pub payment_type: Option<String>,
    #[serde(rename = "Quantidade de parcelas")]
    pub installments: i64,
    pub lat: f64,
    pub lon: f64,
}

impl TryFrom<RawSale> for SalesRecord {
    type Error = DashboardError;

    fn try_from(raw: RawSale) -> Result<Self> {
        let purchase_date = NaiveDate::parse_from_str(raw.purchase_date.trim(), WIRE_DATE_FORMAT)
            .map_err(|e| {
                DashboardError::InvalidDate(format!("'{}': {}", raw.purchase_date, e))
            })?;

        Ok(SalesRecord {
            product: raw.product,
            category: raw.category,
            price: raw.price,
            freight: raw.freight,
            purchase_date,
            location: raw.location,
            lat: raw.lat,
            lon: raw.lon,
            seller: raw.seller,
            rating: raw.rating,
            payment_type: raw.payment_type,
            installments: raw.installments,
        })
    }
}
