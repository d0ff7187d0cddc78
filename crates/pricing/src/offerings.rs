//! Service cards for the "Packages & Pricing" section.
//!
//! Price labels are rendered from the catalog, so a card can never show a
//! different price than the calculator charges.

use serde::Serialize;

use crate::catalog::Catalog;
use crate::selection::{Selection, Toggle};

/// A service card that can be added to the estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offering {
    pub toggle: Toggle,
    pub title: &'static str,
    pub price_label: String,
    pub summary: &'static str,
    pub includes: &'static [&'static str],
}

impl Offering {
    pub fn is_selected(&self, selection: &Selection) -> bool {
        selection.is_selected(self.toggle)
    }

    /// Button text on the card.
    pub fn action_label(&self, selection: &Selection) -> &'static str {
        if self.is_selected(selection) {
            "Remove from estimate"
        } else {
            "Add to estimate"
        }
    }
}

/// Core packages followed by add-ons, in display order.
pub fn offerings(catalog: &Catalog) -> Vec<Offering> {
    let m = &catalog.monthly;
    let o = &catalog.one_time;

    vec![
        Offering {
            toggle: Toggle::PilotWithProof,
            title: "Pilot with Proof (8 weeks)",
            price_label: format!("One-time {}", o.pilot_with_proof),
            summary: "Rapid proof-of-channel. Tracking fixed, landing page live, and two creative/ad sprints to hit CPL/booked-call targets.",
            includes: &[
                "Analytics + conversion tracking (GA4, CRM/offline conversions)",
                "Landing page + form/call tracking",
                "2x ad sprints (Google Search/Meta) with weekly iteration",
                "Success criteria agreed day 1 (e.g., <$X CPL or Y booked calls)",
            ],
        },
        Offering {
            toggle: Toggle::LocalDominance,
            title: "Local Dominance (monthly)",
            price_label: format!("From {}/mo (first location)", m.local_dominance_base),
            summary: "Own your local area with GBP + Local SEO + high-intent Google Ads. Built for service businesses.",
            includes: &[
                "Google Business Profile + reviews ops",
                "Local SEO pages + citation cleanup",
                "Google Ads (Search/PMax) with call quality checks",
                "Looker Studio dashboard + biweekly experiments",
            ],
        },
        Offering {
            toggle: Toggle::EcomSprint,
            title: "E-commerce Growth Sprint (monthly)",
            price_label: format!("From {}/mo", m.ecom_sprint_base),
            summary: "Scale revenue with Shopping/PMax, CRO testing, and lifecycle email flows.",
            includes: &[
                "Merchant Center + feed optimization",
                "Shopping/PMax structure and testing",
                "CRO tests across PDP/cart/checkout",
                "Email flows + remarketing",
            ],
        },
        Offering {
            toggle: Toggle::MeasurementMakeover,
            title: "Measurement Makeover (one-time)",
            price_label: format!("From {} one-time", o.measurement_makeover),
            summary: "Confidence in data. GA4 + server-side GTM, CAPI, offline conversions, naming conventions, and a clean dashboard.",
            includes: &[
                "GA4 + (optional) server-side GTM",
                "Meta CAPI and Google Ads conversions",
                "Offline/CRM conversions and UTM hygiene",
                "Looker Studio dashboard with exec summary",
            ],
        },
        Offering {
            toggle: Toggle::WebDesign,
            title: "Web Design & Development*",
            price_label: format!("From {} one-time", o.web_design_base),
            summary: "Modern, mobile-first websites (1-5 pages) built for speed and conversion.",
            includes: &[
                "Custom design",
                "Mobile & speed optimization",
                "Optional: blog, booking, or ecommerce",
            ],
        },
        Offering {
            toggle: Toggle::SeoEssentials,
            title: "SEO Essentials (monthly)",
            price_label: format!("{}/mo", m.seo_essentials),
            summary: "Practical SEO for local intent: on-page fixes, content tweaks, and GBP support.",
            includes: &["On-page & titles", "Content updates", "Local/GBP basics"],
        },
        Offering {
            toggle: Toggle::SocialMediaMgmt,
            title: "Social Media Management (monthly)",
            price_label: format!("{}/mo", m.social_media_mgmt),
            summary: "Consistent, on-brand posts without the stress.",
            includes: &[
                "Content calendar",
                "Branded posts (graphics + captions)",
                "Performance summary",
            ],
        },
        Offering {
            toggle: Toggle::AnalyticsReporting,
            title: "Analytics & Reporting (monthly)",
            price_label: format!("{}/mo", m.analytics_reporting),
            summary: "Know what's working and where to improve.",
            includes: &[
                "Monthly dashboard",
                "Traffic & lead reporting",
                "Simple insights summary",
            ],
        },
        Offering {
            toggle: Toggle::EcomFunnelsLite,
            title: "E-commerce & Funnels (Lite, monthly)",
            price_label: format!("{}/mo", m.ecom_funnels_lite),
            summary: "Lightweight funnel or ecommerce support without a full sprint.",
            includes: &["Basic funnel setup", "Simple CRO checks", "Light remarketing"],
        },
        Offering {
            toggle: Toggle::BrandingStrategy,
            title: "Branding & Strategy (one-time)",
            price_label: format!("{} one-time", o.branding_strategy),
            summary: "Align your brand with a practical identity & voice guide.",
            includes: &[
                "Logo & visual identity",
                "Voice + positioning",
                "Launch/growth plan",
            ],
        },
    ]
}
