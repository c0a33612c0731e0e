//! Data source tests: wire parsing, query parameters, region handling.

mod common;

use sales_dashboard::{parse_records, DashboardError, Region, SalesQuery};

// ---------------------------------------------------------------------------
// parse_records
// ---------------------------------------------------------------------------

#[test]
fn parse_records_maps_portuguese_fields() {
    let records = parse_records(&common::sample_api_body()).unwrap();
    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.product, "Modelagem preditiva");
    assert_eq!(first.category, "livros");
    assert!(common::approx_eq(first.price, 92.45));
    assert_eq!(first.seller, "Thiago Silva");
    assert_eq!(first.location, "BA");
    assert_eq!(first.rating, 1);
    assert_eq!(first.installments, 8);
    assert_eq!(first.payment_type.as_deref(), Some("cartao_credito"));
}

#[test]
fn parse_records_reads_day_month_year_dates() {
    let records = parse_records(&common::sample_api_body()).unwrap();
    assert_eq!(records[0].purchase_date, common::date(2020, 1, 1));
    assert_eq!(records[1].purchase_date, common::date(2022, 12, 25));
}

#[test]
fn parse_records_accepts_integer_prices_and_missing_payment_type() {
    let records = parse_records(&common::sample_api_body()).unwrap();
    assert!(common::approx_eq(records[1].price, 3534.0));
    assert!(records[1].payment_type.is_none());
}

#[test]
fn parse_records_empty_array() {
    assert!(parse_records("[]").unwrap().is_empty());
}

#[test]
fn parse_records_rejects_malformed_body() {
    let err = parse_records("<html>bad gateway</html>").unwrap_err();
    assert!(matches!(err, DashboardError::Json(_)));
}

#[test]
fn parse_records_rejects_missing_required_field() {
    let body = serde_json::json!([{ "Produto": "Cama king" }]).to_string();
    assert!(matches!(
        parse_records(&body).unwrap_err(),
        DashboardError::Json(_)
    ));
}

#[test]
fn parse_records_rejects_iso_dates() {
    let body = common::sample_api_body().replace("01/01/2020", "2020-01-01");
    assert!(matches!(
        parse_records(&body).unwrap_err(),
        DashboardError::InvalidDate(_)
    ));
}

// ---------------------------------------------------------------------------
// SalesQuery
// ---------------------------------------------------------------------------

#[test]
fn query_all_sends_empty_params() {
    let params = SalesQuery::all().query_params();
    assert_eq!(params[0], ("regiao", String::new()));
    assert_eq!(params[1], ("ano", String::new()));
}

#[test]
fn query_sends_lowercase_region_and_year() {
    let params = SalesQuery::new(Region::CentroOeste, Some(2021)).query_params();
    assert_eq!(params[0], ("regiao", "centro-oeste".to_string()));
    assert_eq!(params[1], ("ano", "2021".to_string()));
}

#[test]
fn query_validates_year_range() {
    assert!(SalesQuery::new(Region::Sul, Some(2020)).validate().is_ok());
    assert!(SalesQuery::new(Region::Sul, Some(2023)).validate().is_ok());
    assert!(SalesQuery::new(Region::Sul, None).validate().is_ok());
    assert!(matches!(
        SalesQuery::new(Region::Sul, Some(2019)).validate().unwrap_err(),
        DashboardError::InvalidArgument(_)
    ));
    assert!(SalesQuery::new(Region::Sul, Some(2024)).validate().is_err());
}

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

#[test]
fn region_brasil_is_no_filter() {
    assert_eq!(Region::Brasil.query_value(), "");
    assert_eq!(Region::default(), Region::Brasil);
}

#[test]
fn region_parses_labels_and_query_values() {
    assert_eq!("Centro-Oeste".parse::<Region>().unwrap(), Region::CentroOeste);
    assert_eq!("centro-oeste".parse::<Region>().unwrap(), Region::CentroOeste);
    assert_eq!("SUDESTE".parse::<Region>().unwrap(), Region::Sudeste);
    assert_eq!("Brasil".parse::<Region>().unwrap(), Region::Brasil);
    assert!("Atlantida".parse::<Region>().is_err());
}

#[test]
fn region_lists_six_options() {
    let labels: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
    assert_eq!(
        labels,
        vec!["Brasil", "Centro-Oeste", "Nordeste", "Norte", "Sudeste", "Sul"]
    );
}
