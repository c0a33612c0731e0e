use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::DashboardError;

pub const API_URL: &str = "https://labdados.com/produtos";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Table holding the canonical record set for the current server-side query.
pub const SALES_TABLE: &str = "vendas";
/// Table holding the canonical set narrowed by the client-side filter.
pub const FILTERED_TABLE: &str = "vendas_filtradas";

pub const YEAR_MIN: i32 = 2020;
pub const YEAR_MAX: i32 = 2023;

/// Row count of the fixed top-N views (states, categories).
pub const TOP_N: usize = 5;
pub const SELLER_TOP_MIN: usize = 2;
pub const SELLER_TOP_MAX: usize = 10;
pub const SELLER_TOP_DEFAULT: usize = 5;

pub const DEFAULT_EXPORT_STEM: &str = "dados";

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

/// Region selector sent to the API as the `regiao` query parameter.
///
/// `Brasil` covers the whole country and is sent as an empty value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Region {
    #[default]
    Brasil,
    CentroOeste,
    Nordeste,
    Norte,
    Sudeste,
    Sul,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Brasil,
        Region::CentroOeste,
        Region::Nordeste,
        Region::Norte,
        Region::Sudeste,
        Region::Sul,
    ];

    /// Display label, as shown in the region selector.
    pub fn label(&self) -> &'static str {
        match self {
            Region::Brasil => "Brasil",
            Region::CentroOeste => "Centro-Oeste",
            Region::Nordeste => "Nordeste",
            Region::Norte => "Norte",
            Region::Sudeste => "Sudeste",
            Region::Sul => "Sul",
        }
    }

    /// Value of the `regiao` query parameter (empty for the whole country).
    pub fn query_value(&self) -> String {
        match self {
            Region::Brasil => String::new(),
            other => other.label().to_lowercase(),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Region::ALL
            .iter()
            .copied()
            .find(|r| r.label().to_lowercase() == wanted || r.query_value() == wanted)
            .ok_or_else(|| {
                DashboardError::InvalidArgument(format!(
                    "Unknown region '{}' (expected one of: {})",
                    s,
                    Region::ALL
                        .iter()
                        .map(|r| r.label())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}
