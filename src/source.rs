//! Remote sales API client.
//!
//! Issues the region/year query against the products endpoint and turns the
//! JSON body into [`SalesRecord`]s. Failures propagate to the caller; there is
//! no retry and nothing is cached between fetches.

use crate::config::{self, Region};
use crate::error::{DashboardError, Result};
use crate::models::{RawSale, SalesRecord};
use reqwest::blocking::Client;
use std::time::Duration;
use tracing::info;

// ---------------------------------------------------------------------------
// SalesQuery
// ---------------------------------------------------------------------------

/// Server-side filter: region and year are applied by the API itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SalesQuery {
    pub region: Region,
    /// `None` means the whole period.
    pub year: Option<i32>,
}

impl SalesQuery {
    pub fn new(region: Region, year: Option<i32>) -> Self {
        Self { region, year }
    }

    /// The unscoped query: whole country, whole period.
    pub fn all() -> Self {
        Self::default()
    }

    /// Reject years outside the range the API serves.
    pub fn validate(&self) -> Result<()> {
        match self.year {
            Some(y) if !(config::YEAR_MIN..=config::YEAR_MAX).contains(&y) => {
                Err(DashboardError::InvalidArgument(format!(
                    "year {} outside {}-{}",
                    y,
                    config::YEAR_MIN,
                    config::YEAR_MAX
                )))
            }
            _ => Ok(()),
        }
    }

    /// The `regiao` / `ano` query parameters; empty values mean "all".
    pub fn query_params(&self) -> [(&'static str, String); 2] {
        [
            ("regiao", self.region.query_value()),
            (
                "ano",
                self.year.map(|y| y.to_string()).unwrap_or_default(),
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// SalesSource
// ---------------------------------------------------------------------------

/// Fetches the canonical record set from the remote endpoint.
pub struct SalesSource {
    /// Endpoint URL queried by [`fetch`](Self::fetch).
    pub endpoint: String,
    timeout: Duration,
    client: Option<Client>,
}

impl SalesSource {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout,
            client: None,
        }
    }

    /// Lazy HTTP client, created on first use.
    fn client(&mut self) -> Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let client = Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        self.client = Some(client.clone());
        Ok(client)
    }

    /// Fetch and parse the records matching `query`.
    pub fn fetch(&mut self, query: &SalesQuery) -> Result<Vec<SalesRecord>> {
        query.validate()?;
        let params = query.query_params();
        info!(
            endpoint = %self.endpoint,
            region = %query.region,
            year = ?query.year,
            "Fetching sales"
        );

        let client = self.client()?;
        let body = client
            .get(&self.endpoint)
            .query(&params)
            .send()?
            .error_for_status()?
            .text()?;

        let records = parse_records(&body)?;
        info!("Fetched {} sales records", records.len());
        Ok(records)
    }

    /// Drop the HTTP client, if open.
    pub fn close(&mut self) {
        self.client = None;
    }
}

/// Parse an API response body (a JSON array of flat sale objects).
pub fn parse_records(body: &str) -> Result<Vec<SalesRecord>> {
    let raw: Vec<RawSale> = serde_json::from_str(body)?;
    raw.into_iter().map(SalesRecord::try_from).collect()
}
