//! Pricing engine for the agency's packages and add-ons.
//!
//! Deterministic domain logic only (no IO, no rendering): a static catalog, the
//! visitor's selection, and a pure reducer from selection to totals.

pub mod catalog;
pub mod offerings;
pub mod quote;
pub mod selection;
pub mod store;
pub mod totals;

pub use catalog::{AdMgmtFees, AdTier, Catalog, MonthlyPrices, OneTimePrices};
pub use cursorcat_core::{Money, format_currency};
pub use offerings::{Offering, offerings};
pub use quote::{DisplayOverrides, Quote, QuoteSummary};
pub use selection::{
    LeadGenType, Quantities, Selection, SelectionPatch, Toggle, MIN_COUNT, MIN_LOCATIONS,
    parse_quantity,
};
pub use store::{ChangeCause, SelectionChanged, SelectionStore};
pub use totals::{Billing, LineItem, Totals, compute_totals};
