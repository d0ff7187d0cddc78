//! Totals reducer: selection + catalog → monthly and one-time totals.
//!
//! The reducer is a pure function. It never fails: quantities are clamped
//! before use, and every line item is a non-negative whole-dollar amount.

use serde::{Deserialize, Serialize};

use cursorcat_core::{Money, ValueObject};

use crate::catalog::Catalog;
use crate::selection::{Quantities, Selection};

/// How a line item is billed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Billing {
    Monthly,
    OneTime,
}

/// One priced row of a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub billing: Billing,
    pub amount: Money,
}

impl LineItem {
    fn monthly(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            billing: Billing::Monthly,
            amount,
        }
    }

    fn one_time(label: impl Into<String>, amount: Money) -> Self {
        Self {
            label: label.into(),
            billing: Billing::OneTime,
            amount,
        }
    }
}

/// Monthly recurring and one-time totals.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub monthly_total: Money,
    pub one_time_total: Money,
}

impl ValueObject for Totals {}

impl Totals {
    pub fn from_line_items<'a>(items: impl IntoIterator<Item = &'a LineItem>) -> Self {
        items.into_iter().fold(Totals::default(), |mut totals, item| {
            match item.billing {
                Billing::Monthly => totals.monthly_total += item.amount,
                Billing::OneTime => totals.one_time_total += item.amount,
            }
            totals
        })
    }

    pub fn is_zero(&self) -> bool {
        self.monthly_total.is_zero() && self.one_time_total.is_zero()
    }
}

/// Totals against the published catalog.
pub fn compute_totals(selection: &Selection) -> Totals {
    Catalog::standard().compute_totals(selection)
}

impl Catalog {
    /// Totals for `selection`; the fold of [`Catalog::line_items`].
    pub fn compute_totals(&self, selection: &Selection) -> Totals {
        let totals = Totals::from_line_items(&self.line_items(selection));
        tracing::trace!(
            monthly = totals.monthly_total.amount(),
            one_time = totals.one_time_total.amount(),
            "computed totals"
        );
        totals
    }

    /// Itemised breakdown in canonical order.
    pub fn line_items(&self, selection: &Selection) -> Vec<LineItem> {
        let q = Quantities::sanitize(selection);
        let monthly = &self.monthly;
        let one_time = &self.one_time;
        let mut items = Vec::new();

        if selection.local_dominance {
            items.push(LineItem::monthly("Local Dominance", monthly.local_dominance_base));
            let extras = q.extra_locations();
            if extras > 0 {
                items.push(LineItem::monthly(
                    format!("Additional locations ({extras} × {})", monthly.extra_location),
                    monthly.extra_location * extras,
                ));
            }
        }

        if selection.ecom_sprint {
            items.push(LineItem::monthly("E-commerce Growth Sprint", monthly.ecom_sprint_base));
        }

        // Billed once per account, however many ad-running packages are active.
        if selection.runs_ads() {
            items.push(LineItem::monthly(
                format!("Ad management ({})", selection.ad_tier.label()),
                self.ad_mgmt_fee(selection.ad_tier),
            ));
        }

        if selection.pilot_with_proof {
            items.push(LineItem::one_time("Pilot with Proof", one_time.pilot_with_proof));
        }

        if selection.measurement_makeover {
            items.push(LineItem::one_time("Measurement Makeover", one_time.measurement_makeover));
        }

        if q.landing_pages > 0 {
            items.push(LineItem::one_time(
                format!("Landing pages ({} × {})", q.landing_pages, one_time.landing_page),
                one_time.landing_page * q.landing_pages,
            ));
        }

        let recurring_addons = [
            (selection.social_media_mgmt, "Social Media Management", monthly.social_media_mgmt),
            (selection.analytics_reporting, "Analytics & Reporting", monthly.analytics_reporting),
            (selection.seo_essentials, "SEO Essentials", monthly.seo_essentials),
            (selection.ecom_funnels_lite, "E-commerce & Funnels (Lite)", monthly.ecom_funnels_lite),
        ];
        items.extend(
            recurring_addons
                .into_iter()
                .filter(|(on, _, _)| *on)
                .map(|(_, label, price)| LineItem::monthly(label, price)),
        );

        if selection.web_design {
            items.push(LineItem::one_time("Web Design & Development", one_time.web_design_base));
        }
        if selection.branding_strategy {
            items.push(LineItem::one_time("Branding & Strategy", one_time.branding_strategy));
        }

        if q.lead_gen_campaigns > 0 {
            items.push(LineItem::one_time(
                format!("Lead generation campaigns ({} × {})", q.lead_gen_campaigns, one_time.lead_gen_campaign),
                one_time.lead_gen_campaign * q.lead_gen_campaigns,
            ));
        }

        items
    }
}
