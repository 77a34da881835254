//! Request/response types for a discovery run.

use serde::{Deserialize, Serialize};

use shopscout_core::{PriceBands, Product};

use crate::intent::Intent;

/// Inbound discovery parameters. Field names follow the public JSON
/// interface (`ikeaOnly`, not `ikea_only`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryRequest {
    /// Free-text idea of what to shop for.
    pub description: String,
    /// Raw budget as sent; read through [`DiscoveryRequest::budget`],
    /// which substitutes the default for absent or invalid values.
    #[serde(default)]
    pub budget: Option<f64>,
    /// Restrict the retailer scope to the primary (highest-priority)
    /// retailer. On by default.
    #[serde(default = "default_true")]
    pub ikea_only: bool,
    /// Explicit hostname override for the retailer scope.
    #[serde(default)]
    pub retailers: Option<Vec<String>>,
    /// Use image search instead of link search.
    #[serde(default)]
    pub image: bool,
}

fn default_true() -> bool {
    true
}

impl DiscoveryRequest {
    pub const DEFAULT_BUDGET: f64 = 150.0;

    /// The effective budget: the supplied value when finite and positive,
    /// otherwise [`Self::DEFAULT_BUDGET`].
    #[must_use]
    pub fn budget(&self) -> f64 {
        match self.budget {
            Some(b) if b.is_finite() && b > 0.0 => b,
            _ => Self::DEFAULT_BUDGET,
        }
    }
}

/// The discovery result: price bands plus up to five products per tier,
/// ascending by price within each tier.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResponse {
    pub bands: PriceBands,
    pub low: Vec<Product>,
    pub mid: Vec<Product>,
    pub high: Vec<Product>,
    /// Deduplicated products found across all rounds.
    pub all_count: usize,
    /// Products carrying a price. Materialization requires a price, so
    /// this currently equals `all_count`; both are part of the interface.
    pub priced_count: usize,
    pub intent: Intent,
    pub ikea_only: bool,
    /// The retailer scope the initial search ran against.
    pub retailers: Vec<String>,
}
