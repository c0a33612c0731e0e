use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};
use sales_dashboard::config;
use sales_dashboard::{Bounds, Column, FilterBounds, Region, SalesFilter, SalesQuery};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, default_value = config::API_URL)]
    pub endpoint: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "60")]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Revenue, sales and top-N tables for a region/year
    Overview(OverviewArgs),
    /// Filter the full dataset and export it as CSV
    Raw(RawArgs),
}

#[derive(ClapArgs, Debug)]
pub struct OverviewArgs {
    #[arg(long, default_value = "Brasil", value_parser = parse_region)]
    pub region: Region,

    /// Omit for the whole period
    #[arg(long)]
    pub year: Option<i32>,

    /// Restrict to these sellers (repeatable; none means all)
    #[arg(long = "seller")]
    pub sellers: Vec<String>,

    #[arg(long, default_value_t = config::SELLER_TOP_DEFAULT, value_parser = parse_top_sellers)]
    pub top_sellers: usize,

    /// Print the snapshot as JSON instead of tables
    #[arg(long)]
    pub json: bool,
}

impl OverviewArgs {
    pub fn query(&self) -> SalesQuery {
        SalesQuery::new(self.region, self.year)
    }

    /// The main page only filters by seller, and an empty choice means all.
    pub fn filter(&self) -> SalesFilter {
        if self.sellers.is_empty() {
            SalesFilter::new()
        } else {
            SalesFilter::new().with_sellers(self.sellers.iter().cloned())
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct RawArgs {
    #[arg(long = "product")]
    pub products: Vec<String>,

    #[arg(long = "category")]
    pub categories: Vec<String>,

    #[arg(long = "seller")]
    pub sellers: Vec<String>,

    #[arg(long = "location")]
    pub locations: Vec<String>,

    #[arg(long)]
    pub price_min: Option<f64>,
    #[arg(long)]
    pub price_max: Option<f64>,

    #[arg(long)]
    pub freight_min: Option<f64>,
    #[arg(long)]
    pub freight_max: Option<f64>,

    /// YYYY-MM-DD
    #[arg(long)]
    pub date_from: Option<NaiveDate>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_to: Option<NaiveDate>,

    #[arg(long)]
    pub rating_min: Option<i64>,
    #[arg(long)]
    pub rating_max: Option<i64>,

    #[arg(long)]
    pub installments_min: Option<i64>,
    #[arg(long)]
    pub installments_max: Option<i64>,

    /// Comma-separated column headers to export (default: all)
    #[arg(long, value_delimiter = ',', value_parser = parse_column)]
    pub columns: Vec<Column>,

    /// Export file name; `.csv` is appended
    #[arg(long, default_value = config::DEFAULT_EXPORT_STEM)]
    pub output: String,

    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl RawArgs {
    /// Start from every control at its observed default, then apply the
    /// predicates given on the command line.
    pub fn filter(&self, bounds: &FilterBounds) -> SalesFilter {
        let mut filter = SalesFilter::from_bounds(bounds);

        if !self.products.is_empty() {
            filter.products = Some(self.products.clone());
        }
        if !self.categories.is_empty() {
            filter.categories = Some(self.categories.clone());
        }
        if !self.sellers.is_empty() {
            filter.sellers = Some(self.sellers.clone());
        }
        if !self.locations.is_empty() {
            filter.locations = Some(self.locations.clone());
        }

        filter.price = narrow(filter.price, self.price_min, self.price_max);
        filter.freight = narrow(filter.freight, self.freight_min, self.freight_max);
        filter.purchase_date = narrow(filter.purchase_date, self.date_from, self.date_to);
        filter.rating = narrow(filter.rating, self.rating_min, self.rating_max);
        filter.installments =
            narrow(filter.installments, self.installments_min, self.installments_max);
        filter
    }

    pub fn columns(&self) -> Vec<Column> {
        if self.columns.is_empty() {
            Column::ALL.to_vec()
        } else {
            self.columns.clone()
        }
    }
}

/// Override either end of an observed range.
fn narrow<T: Copy + PartialOrd>(
    observed: Option<Bounds<T>>,
    min: Option<T>,
    max: Option<T>,
) -> Option<Bounds<T>> {
    match (observed, min, max) {
        (Some(b), min, max) => Some(Bounds::new(min.unwrap_or(b.min), max.unwrap_or(b.max))),
        (None, Some(min), Some(max)) => Some(Bounds::new(min, max)),
        (None, _, _) => None,
    }
}

fn parse_region(s: &str) -> Result<Region, String> {
    s.parse::<Region>().map_err(|e| e.to_string())
}

fn parse_column(s: &str) -> Result<Column, String> {
    s.parse::<Column>().map_err(|e| e.to_string())
}

fn parse_top_sellers(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|e| format!("{}", e))?;
    if (config::SELLER_TOP_MIN..=config::SELLER_TOP_MAX).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "must be between {} and {}",
            config::SELLER_TOP_MIN,
            config::SELLER_TOP_MAX
        ))
    }
}
