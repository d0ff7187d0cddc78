//! Quote view: what the calculator summary bar shows.
//!
//! Display overrides live here and never reach the catalog or [`Totals`].

use serde::Serialize;

use cursorcat_core::{CURRENCY_CODE, Money};

use crate::catalog::Catalog;
use crate::selection::{Quantities, Selection};
use crate::totals::{LineItem, Totals};

/// Presentation-only price substitutions.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DisplayOverrides {
    /// Per-campaign price to show instead of the catalog's.
    pub lead_gen_unit_price: Option<Money>,
}

/// Serializable summary of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuoteSummary {
    pub currency: &'static str,
    pub monthly_total: Money,
    pub one_time_total: Money,
    pub monthly_label: String,
    pub one_time_label: String,
    pub line_items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    totals: Totals,
    line_items: Vec<LineItem>,
    lead_gen_campaigns: u64,
    lead_gen_catalog_price: Money,
    overrides: DisplayOverrides,
}

impl Quote {
    pub fn new(catalog: &Catalog, selection: &Selection) -> Self {
        let line_items = catalog.line_items(selection);
        Self {
            totals: Totals::from_line_items(&line_items),
            line_items,
            lead_gen_campaigns: Quantities::sanitize(selection).lead_gen_campaigns,
            lead_gen_catalog_price: catalog.one_time.lead_gen_campaign,
            overrides: DisplayOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: DisplayOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Engine totals, unaffected by display overrides.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    pub fn display_monthly_total(&self) -> Money {
        self.totals.monthly_total
    }

    /// One-time total with the campaign unit price swapped for the override.
    pub fn display_one_time_total(&self) -> Money {
        let Some(unit) = self.overrides.lead_gen_unit_price else {
            return self.totals.one_time_total;
        };
        let catalog_part = self.lead_gen_catalog_price * self.lead_gen_campaigns;
        let display_part = unit * self.lead_gen_campaigns;
        self.totals.one_time_total.saturating_sub(catalog_part) + display_part
    }

    pub fn monthly_label(&self) -> String {
        self.display_monthly_total().to_string()
    }

    pub fn one_time_label(&self) -> String {
        self.display_one_time_total().to_string()
    }

    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            currency: CURRENCY_CODE,
            monthly_total: self.display_monthly_total(),
            one_time_total: self.display_one_time_total(),
            monthly_label: self.monthly_label(),
            one_time_label: self.one_time_label(),
            line_items: self.line_items.clone(),
        }
    }
}
