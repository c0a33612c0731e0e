//! Shared test fixtures for the sales dashboard integration tests.
//!
//! Provides `setup_sample_dashboard()` which builds a dashboard and ingests a
//! small hand-written record set, so no test touches the network.

#![allow(dead_code)]

use chrono::NaiveDate;
use sales_dashboard::{SalesDashboard, SalesRecord};

pub const TOTAL_REVENUE: f64 = 8466.45;
pub const TOTAL_SALES: usize = 8;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[allow(clippy::too_many_arguments)]
fn record(
    product: &str,
    category: &str,
    price: f64,
    freight: f64,
    purchase_date: NaiveDate,
    location: (&str, f64, f64),
    seller: &str,
    rating: i64,
    payment_type: &str,
    installments: i64,
) -> SalesRecord {
    SalesRecord {
        product: product.to_string(),
        category: category.to_string(),
        price,
        freight,
        purchase_date,
        location: location.0.to_string(),
        lat: location.1,
        lon: location.2,
        seller: seller.to_string(),
        rating,
        payment_type: Some(payment_type.to_string()),
        installments,
    }
}

const BA: (&str, f64, f64) = ("BA", -13.29, -41.71);
const SP: (&str, f64, f64) = ("SP", -22.19, -48.79);
const RJ: (&str, f64, f64) = ("RJ", -22.25, -42.66);
const MG: (&str, f64, f64) = ("MG", -18.10, -44.38);
const RS: (&str, f64, f64) = ("RS", -30.17, -53.50);

/// Eight sales across five states, six sellers and five categories,
/// spanning January 2020 to June 2022.
pub fn sample_records() -> Vec<SalesRecord> {
    vec![
        record("Modelagem preditiva", "livros", 92.45, 5.60, date(2020, 1, 1), BA, "Thiago Silva", 1, "cartao_credito", 8),
        record("Iphone 6", "eletronicos", 3534.0, 187.0, date(2020, 1, 15), SP, "Mariana Ferreira", 4, "cartao_credito", 10),
        record("Cama king", "moveis", 1500.0, 60.0, date(2020, 3, 10), SP, "Thiago Silva", 5, "boleto", 1),
        record("Bola de basquete", "esporte e lazer", 120.0, 8.5, date(2021, 2, 20), RJ, "Juliana Costa", 3, "cartao_debito", 1),
        record("Fone de ouvido", "eletronicos", 250.0, 12.0, date(2021, 2, 28), BA, "Bianca Santos", 5, "cartao_credito", 2),
        record("Dashboards com Power BI", "livros", 80.0, 4.0, date(2021, 3, 5), MG, "Lucas Oliveira", 2, "boleto", 1),
        record("Geladeira", "eletrodomesticos", 2800.0, 150.0, date(2022, 6, 12), SP, "Mariana Ferreira", 4, "cartao_credito", 12),
        record("Bola de futebol", "esporte e lazer", 90.0, 6.0, date(2022, 6, 30), RS, "Rafael Costa", 3, "cupom", 1),
    ]
}

/// A dashboard with `sample_records()` as its canonical set.
pub fn setup_sample_dashboard() -> SalesDashboard {
    let dash = SalesDashboard::builder().build().unwrap();
    dash.ingest(&sample_records()).unwrap();
    dash
}

/// The API's wire format for two sales.
pub fn sample_api_body() -> String {
    serde_json::json!([
        {
            "Produto": "Modelagem preditiva",
            "Categoria do Produto": "livros",
            "Preço": 92.45,
            "Frete": 5.6096965236,
            "Data da Compra": "01/01/2020",
            "Vendedor": "Thiago Silva",
            "Local da compra": "BA",
            "Avaliação da compra": 1,
            "Tipo de pagamento": "cartao_credito",
            "Quantidade de parcelas": 8,
            "lat": -13.29,
            "lon": -41.71
        },
        {
            "Produto": "Iphone 6",
            "Categoria do Produto": "eletronicos",
            "Preço": 3534,
            "Frete": 187.0,
            "Data da Compra": "25/12/2022",
            "Vendedor": "Mariana Ferreira",
            "Local da compra": "SP",
            "Avaliação da compra": 4,
            "Quantidade de parcelas": 10,
            "lat": -22.19,
            "lon": -48.79
        }
    ])
    .to_string()
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
