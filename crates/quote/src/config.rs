//! Runtime configuration, read from the environment.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use cursorcat_core::Money;
use cursorcat_pricing::{Catalog, DisplayOverrides};

/// Path to a JSON catalog replacing the published one.
pub const CATALOG_ENV: &str = "CURSORCAT_CATALOG";
/// Per-campaign lead-generation price to display instead of the catalog's.
pub const LEAD_GEN_DISPLAY_PRICE_ENV: &str = "CURSORCAT_LEAD_GEN_DISPLAY_PRICE";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteConfig {
    pub catalog_path: Option<PathBuf>,
    pub overrides: DisplayOverrides,
}

impl QuoteConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog_path = lookup(CATALOG_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let lead_gen_unit_price = match lookup(LEAD_GEN_DISPLAY_PRICE_ENV) {
            Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<u64>() {
                Ok(amount) => Some(Money::dollars(amount)),
                Err(e) => bail!("{LEAD_GEN_DISPLAY_PRICE_ENV}={raw:?} is not a whole-dollar amount: {e}"),
            },
            _ => None,
        };

        Ok(Self {
            catalog_path,
            overrides: DisplayOverrides { lead_gen_unit_price },
        })
    }

    /// The configured catalog, or the published one.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.catalog_path else {
            tracing::warn!("{CATALOG_ENV} not set; using the published catalog");
            return Ok(*Catalog::standard());
        };

        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading catalog {}", path.display()))?;
        let catalog = Catalog::from_json(&json)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        tracing::info!(path = %path.display(), "catalog loaded");
        Ok(catalog)
    }
}
