//! Retailer registry: which hostnames the search is scoped to, in what
//! widening order, and what their product detail URLs look like.
//!
//! Loaded from a YAML file (`config/retailers.yaml`) at startup, with
//! compiled-in defaults when the file is absent so a bare checkout still
//! runs. The `product_paths` entries drive the hydrator's pre-fetch
//! filter: on a known retailer, a candidate URL whose path matches none of
//! them is rejected before any network I/O.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetailerConfig {
    /// Canonical hostname used in site-scoped searches, e.g. `"www.ikea.com"`.
    pub host: String,
    /// Widening order during expansion; lower is tried first.
    pub priority: u8,
    /// Path fragments that identify a product detail page on this retailer,
    /// e.g. `"/p/"` for IKEA or `"/dp/"` for Amazon. Empty means the
    /// retailer has no distinguishable product URL shape and the prefilter
    /// passes everything through.
    #[serde(default)]
    pub product_paths: Vec<String>,
    /// Alternate hostnames that should resolve to this retailer entry.
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl RetailerConfig {
    /// Whether `host` names this retailer, canonically or via an alias.
    #[must_use]
    pub fn matches_host(&self, host: &str) -> bool {
        self.host.eq_ignore_ascii_case(host)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(host))
    }

    /// Whether a URL path looks like a product detail page on this
    /// retailer. Retailers without configured shapes accept every path.
    #[must_use]
    pub fn is_product_path(&self, path: &str) -> bool {
        self.product_paths.is_empty() || self.product_paths.iter().any(|p| path.contains(p.as_str()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RetailerRegistry {
    pub retailers: Vec<RetailerConfig>,
}

impl RetailerRegistry {
    /// Compiled-in registry used when no YAML file is present.
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |host: &str, priority: u8, paths: &[&str], aliases: &[&str]| RetailerConfig {
            host: host.to_string(),
            priority,
            product_paths: paths.iter().map(ToString::to_string).collect(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
        };
        Self {
            retailers: vec![
                entry("www.ikea.com", 1, &["/p/"], &["ikea.com"]),
                entry("www.wayfair.com", 2, &["/pdp/"], &["wayfair.com"]),
                entry("www.target.com", 3, &["/p/"], &["target.com"]),
                entry(
                    "www.amazon.com",
                    4,
                    &["/dp/", "/gp/product/"],
                    &["amazon.com"],
                ),
                entry("www.etsy.com", 5, &["/listing/"], &["etsy.com"]),
                entry("www.walmart.com", 6, &["/ip/"], &["walmart.com"]),
            ],
        }
    }

    /// Looks up a retailer by hostname (canonical or alias).
    #[must_use]
    pub fn find(&self, host: &str) -> Option<&RetailerConfig> {
        self.retailers.iter().find(|r| r.matches_host(host))
    }

    /// All hostnames in widening order (ascending priority).
    #[must_use]
    pub fn widening_order(&self) -> Vec<String> {
        let mut ordered: Vec<&RetailerConfig> = self.retailers.iter().collect();
        ordered.sort_by_key(|r| r.priority);
        ordered.iter().map(|r| r.host.clone()).collect()
    }

    /// The highest-priority retailer hostname — the single-retailer default
    /// scope when a request does not widen it.
    #[must_use]
    pub fn primary_host(&self) -> Option<String> {
        self.retailers
            .iter()
            .min_by_key(|r| r.priority)
            .map(|r| r.host.clone())
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.retailers.is_empty() {
            return Err(ConfigError::RetailersValidation(
                "at least one retailer is required".to_string(),
            ));
        }
        for r in &self.retailers {
            if r.host.trim().is_empty() {
                return Err(ConfigError::RetailersValidation(
                    "retailer host must not be empty".to_string(),
                ));
            }
        }
        let mut hosts: Vec<&str> = self.retailers.iter().map(|r| r.host.as_str()).collect();
        hosts.sort_unstable();
        hosts.dedup();
        if hosts.len() != self.retailers.len() {
            return Err(ConfigError::RetailersValidation(
                "retailer hosts must be unique".to_string(),
            ));
        }
        Ok(self)
    }
}

/// Load and validate the retailer registry from a YAML file, falling back
/// to the compiled-in defaults when the file does not exist.
///
/// # Errors
///
/// Returns `ConfigError` if an existing file cannot be read, parsed, or
/// fails validation. A missing file is not an error.
pub fn load_retailers(path: &Path) -> Result<RetailerRegistry, ConfigError> {
    if !path.exists() {
        return Ok(RetailerRegistry::builtin());
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RetailersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    let registry: RetailerRegistry =
        serde_yaml::from_str(&content).map_err(|e| ConfigError::RetailersFileParse {
            path: path.display().to_string(),
            source: e,
        })?;
    registry.validate()
}
