//! Quote rendering for the `cursorcat-quote` binary.

pub mod config;

use anyhow::{Context, Result};

use cursorcat_pricing::{Quote, QuoteSummary, SelectionPatch, SelectionStore};

pub use config::QuoteConfig;

/// Parse a selection patch (JSON object; blank input means "nothing selected").
pub fn parse_patch(input: &str) -> Result<SelectionPatch> {
    if input.trim().is_empty() {
        return Ok(SelectionPatch::default());
    }
    serde_json::from_str(input).context("parsing selection patch")
}

/// Apply `patch` to a fresh selection and summarise the quote.
pub fn render_quote(config: &QuoteConfig, patch: &SelectionPatch) -> Result<QuoteSummary> {
    let mut store = SelectionStore::new(config.load_catalog()?);
    store.patch(patch);

    let quote = Quote::new(store.catalog(), store.snapshot()).with_overrides(config.overrides);
    let summary = quote.summary();
    tracing::info!(
        monthly = %summary.monthly_label,
        one_time = %summary.one_time_label,
        items = summary.line_items.len(),
        "quote rendered"
    );
    Ok(summary)
}
