//! Filter engine tests against the in-memory sample dashboard.

mod common;

use sales_dashboard::{Bounds, DashboardError, SalesDashboard, SalesFilter};

// ---------------------------------------------------------------------------
// bounds
// ---------------------------------------------------------------------------

#[test]
fn bounds_follow_observed_data() {
    let dash = common::setup_sample_dashboard();
    let bounds = dash.bounds().unwrap();

    assert_eq!(bounds.price, Some(Bounds::new(80.0, 3534.0)));
    assert_eq!(bounds.freight, Some(Bounds::new(4.0, 187.0)));
    assert_eq!(
        bounds.purchase_date,
        Some(Bounds::new(common::date(2020, 1, 1), common::date(2022, 6, 30)))
    );
    assert_eq!(bounds.rating, Some(Bounds::new(1, 5)));
    assert_eq!(bounds.installments, Some(Bounds::new(1, 12)));
}

#[test]
fn bounds_list_distinct_values_in_first_seen_order() {
    let dash = common::setup_sample_dashboard();
    let bounds = dash.bounds().unwrap();

    assert_eq!(bounds.locations, vec!["BA", "SP", "RJ", "MG", "RS"]);
    assert_eq!(
        bounds.sellers,
        vec![
            "Thiago Silva",
            "Mariana Ferreira",
            "Juliana Costa",
            "Bianca Santos",
            "Lucas Oliveira",
            "Rafael Costa"
        ]
    );
    assert_eq!(
        bounds.categories,
        vec!["livros", "eletronicos", "moveis", "esporte e lazer", "eletrodomesticos"]
    );
    assert_eq!(bounds.products.len(), 8);
}

#[test]
fn bounds_of_empty_set_have_no_ranges() {
    let dash = SalesDashboard::builder().build().unwrap();
    let bounds = dash.bounds().unwrap();
    assert!(bounds.products.is_empty());
    assert!(bounds.price.is_none());
    assert!(bounds.purchase_date.is_none());
}

#[test]
fn bounds_ignore_the_current_filter() {
    let dash = common::setup_sample_dashboard();
    dash.apply_filter(&SalesFilter::new().with_locations(["SP"]))
        .unwrap();
    let bounds = dash.bounds().unwrap();
    assert_eq!(bounds.locations.len(), 5);
    assert_eq!(bounds.price, Some(Bounds::new(80.0, 3534.0)));
}

// ---------------------------------------------------------------------------
// apply_filter
// ---------------------------------------------------------------------------

#[test]
fn default_filter_from_bounds_keeps_everything() {
    let dash = common::setup_sample_dashboard();
    let filter = SalesFilter::from_bounds(&dash.bounds().unwrap());

    let filtered = dash.apply_filter(&filter).unwrap();
    assert_eq!(filtered, common::sample_records());
}

#[test]
fn empty_filter_keeps_everything() {
    let dash = common::setup_sample_dashboard();
    let filtered = dash.apply_filter(&SalesFilter::new()).unwrap();
    assert_eq!(filtered.len(), common::TOTAL_SALES);
}

#[test]
fn cleared_selection_yields_nothing() {
    let dash = common::setup_sample_dashboard();
    let cleared: Vec<String> = Vec::new();

    let filter = SalesFilter::from_bounds(&dash.bounds().unwrap()).with_sellers(cleared);
    let filtered = dash.apply_filter(&filter).unwrap();
    assert!(filtered.is_empty());
    assert!(dash.filtered().unwrap().is_empty());
}

#[test]
fn seller_selection_narrows() {
    let dash = common::setup_sample_dashboard();
    let filtered = dash
        .apply_filter(&SalesFilter::new().with_sellers(["Thiago Silva"]))
        .unwrap();
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|r| r.seller == "Thiago Silva"));
}

#[test]
fn ranges_are_inclusive() {
    let dash = common::setup_sample_dashboard();

    let filtered = dash
        .apply_filter(&SalesFilter::new().with_price(90.0, 250.0))
        .unwrap();
    let mut prices: Vec<f64> = filtered.iter().map(|r| r.price).collect();
    prices.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(prices, vec![90.0, 92.45, 120.0, 250.0]);

    let filtered = dash
        .apply_filter(&SalesFilter::new().with_installments(10, 12))
        .unwrap();
    assert_eq!(filtered.len(), 2);
}

#[test]
fn date_range_filters_by_purchase_date() {
    let dash = common::setup_sample_dashboard();
    let filtered = dash
        .apply_filter(
            &SalesFilter::new()
                .with_purchase_date(common::date(2021, 1, 1), common::date(2021, 12, 31)),
        )
        .unwrap();
    let products: Vec<&str> = filtered.iter().map(|r| r.product.as_str()).collect();
    assert_eq!(
        products,
        vec!["Bola de basquete", "Fone de ouvido", "Dashboards com Power BI"]
    );
}

#[test]
fn predicates_combine_with_and() {
    let dash = common::setup_sample_dashboard();
    let filter = SalesFilter::new()
        .with_categories(["eletronicos", "eletrodomesticos"])
        .with_locations(["SP"])
        .with_rating(4, 5)
        .with_freight(100.0, 200.0);

    let filtered = dash.apply_filter(&filter).unwrap();
    let products: Vec<&str> = filtered.iter().map(|r| r.product.as_str()).collect();
    assert_eq!(products, vec!["Iphone 6", "Geladeira"]);
}

#[test]
fn filtered_set_is_subset_in_canonical_order() {
    let dash = common::setup_sample_dashboard();
    let canonical = dash.records().unwrap();
    let filtered = dash
        .apply_filter(&SalesFilter::new().with_rating(3, 5))
        .unwrap();

    assert!(filtered.iter().all(|r| canonical.contains(r)));
    let positions: Vec<usize> = filtered
        .iter()
        .map(|r| canonical.iter().position(|c| c == r).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn reapplying_filter_to_its_output_is_idempotent() {
    let dash = common::setup_sample_dashboard();
    let filter = SalesFilter::new()
        .with_categories(["eletronicos", "livros", "moveis"])
        .with_price(50.0, 2000.0);
    let once = dash.apply_filter(&filter).unwrap();

    let again = SalesDashboard::builder().build().unwrap();
    again.ingest(&once).unwrap();
    let twice = again.apply_filter(&filter).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn inverted_range_is_rejected() {
    let dash = common::setup_sample_dashboard();
    let err = dash
        .apply_filter(&SalesFilter::new().with_price(500.0, 100.0))
        .unwrap_err();
    assert!(matches!(err, DashboardError::InvalidArgument(_)));
}

#[test]
fn reset_filter_restores_canonical_set() {
    let dash = common::setup_sample_dashboard();
    dash.apply_filter(&SalesFilter::new().with_locations(["RS"]))
        .unwrap();
    assert_eq!(dash.filtered().unwrap().len(), 1);

    dash.reset_filter().unwrap();
    assert_eq!(dash.filtered().unwrap(), common::sample_records());
}

#[test]
fn ingest_replaces_previous_data() {
    let dash = common::setup_sample_dashboard();
    let first_two: Vec<_> = common::sample_records().into_iter().take(2).collect();
    dash.ingest(&first_two).unwrap();
    assert_eq!(dash.records().unwrap(), first_two);
    assert_eq!(dash.filtered().unwrap(), first_two);
}

#[test]
fn filter_is_empty_only_without_predicates() {
    assert!(SalesFilter::new().is_empty());
    assert!(!SalesFilter::new().with_rating(1, 5).is_empty());
}
