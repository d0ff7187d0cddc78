//! The price catalog: every editable price in one place.

use core::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use cursorcat_core::{DomainError, DomainResult, Money, ValueObject};

/// Monthly ad-spend band, used to look up the ad-management fee.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AdTier {
    /// Spend under $2k/month.
    #[default]
    #[serde(rename = "lt2")]
    Lt2,
    #[serde(rename = "2to5")]
    From2To5,
    #[serde(rename = "5to10")]
    From5To10,
    /// Spend over $10k/month.
    #[serde(rename = "gt10")]
    Gt10,
}

impl AdTier {
    /// All tiers, lowest band first.
    pub const ALL: [AdTier; 4] = [AdTier::Lt2, AdTier::From2To5, AdTier::From5To10, AdTier::Gt10];

    pub fn as_str(self) -> &'static str {
        match self {
            AdTier::Lt2 => "lt2",
            AdTier::From2To5 => "2to5",
            AdTier::From5To10 => "5to10",
            AdTier::Gt10 => "gt10",
        }
    }

    /// Spend band as shown in the tier selector.
    pub fn label(self) -> &'static str {
        match self {
            AdTier::Lt2 => "< $2k/mo",
            AdTier::From2To5 => "$2k–$5k",
            AdTier::From5To10 => "$5k–$10k",
            AdTier::Gt10 => "> $10k",
        }
    }
}

impl core::fmt::Display for AdTier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AdTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s.trim())
            .ok_or_else(|| DomainError::validation(format!("unknown ad tier: {s:?}")))
    }
}

/// Ad-management fee per spend band.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdMgmtFees {
    pub lt2: Money,
    #[serde(rename = "2to5")]
    pub from_2_to_5: Money,
    #[serde(rename = "5to10")]
    pub from_5_to_10: Money,
    pub gt10: Money,
}

impl AdMgmtFees {
    pub fn fee(&self, tier: AdTier) -> Money {
        match tier {
            AdTier::Lt2 => self.lt2,
            AdTier::From2To5 => self.from_2_to_5,
            AdTier::From5To10 => self.from_5_to_10,
            AdTier::Gt10 => self.gt10,
        }
    }
}

/// Recurring prices, billed monthly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyPrices {
    /// Local Dominance, first location included.
    pub local_dominance_base: Money,
    /// Each location beyond the first.
    pub extra_location: Money,
    pub ecom_sprint_base: Money,
    pub ad_mgmt: AdMgmtFees,
    pub social_media_mgmt: Money,
    pub analytics_reporting: Money,
    pub seo_essentials: Money,
    pub ecom_funnels_lite: Money,
}

/// One-time prices. `landing_page` and `lead_gen_campaign` are per unit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimePrices {
    pub pilot_with_proof: Money,
    pub measurement_makeover: Money,
    pub landing_page: Money,
    pub web_design_base: Money,
    pub branding_strategy: Money,
    pub lead_gen_campaign: Money,
}

/// Every price the site quotes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub monthly: MonthlyPrices,
    pub one_time: OneTimePrices,
}

impl ValueObject for Catalog {}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            monthly: MonthlyPrices {
                local_dominance_base: Money::dollars(900),
                extra_location: Money::dollars(250),
                ecom_sprint_base: Money::dollars(1200),
                ad_mgmt: AdMgmtFees {
                    lt2: Money::dollars(300),
                    from_2_to_5: Money::dollars(600),
                    from_5_to_10: Money::dollars(900),
                    gt10: Money::dollars(1200),
                },
                social_media_mgmt: Money::dollars(199),
                analytics_reporting: Money::dollars(99),
                seo_essentials: Money::dollars(349),
                ecom_funnels_lite: Money::dollars(449),
            },
            one_time: OneTimePrices {
                pilot_with_proof: Money::dollars(3500),
                measurement_makeover: Money::dollars(1200),
                landing_page: Money::dollars(300),
                web_design_base: Money::dollars(499),
                branding_strategy: Money::dollars(299),
                lead_gen_campaign: Money::dollars(499),
            },
        }
    }
}

impl Catalog {
    /// The published catalog, built once per process.
    pub fn standard() -> &'static Catalog {
        static STANDARD: OnceLock<Catalog> = OnceLock::new();
        STANDARD.get_or_init(Catalog::default)
    }

    /// Load a catalog from JSON (same shape as `Serialize` produces).
    pub fn from_json(json: &str) -> DomainResult<Catalog> {
        let catalog: Catalog = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("catalog: {e}")))?;
        catalog.validate()?;
        tracing::debug!(?catalog, "catalog loaded");
        Ok(catalog)
    }

    /// A higher spend band never costs less to manage.
    pub fn validate(&self) -> DomainResult<()> {
        let fees = AdTier::ALL.map(|tier| self.ad_mgmt_fee(tier));
        if let Some(pair) = fees.windows(2).find(|pair| pair[1] < pair[0]) {
            return Err(DomainError::validation(format!(
                "ad management fees must not decrease with spend ({} then {})",
                pair[0], pair[1]
            )));
        }
        Ok(())
    }

    pub fn ad_mgmt_fee(&self, tier: AdTier) -> Money {
        self.monthly.ad_mgmt.fee(tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_published_prices() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.monthly.local_dominance_base, Money::dollars(900));
        assert_eq!(catalog.monthly.extra_location, Money::dollars(250));
        assert_eq!(catalog.monthly.ecom_sprint_base, Money::dollars(1200));
        assert_eq!(catalog.one_time.pilot_with_proof, Money::dollars(3500));
        assert_eq!(catalog.one_time.landing_page, Money::dollars(300));
        assert!(catalog.validate().is_ok());
    }

    #[test]
    fn standard_is_built_once() {
        assert!(core::ptr::eq(Catalog::standard(), Catalog::standard()));
    }

    #[test]
    fn ad_fee_lookup_by_tier() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.ad_mgmt_fee(AdTier::Lt2), Money::dollars(300));
        assert_eq!(catalog.ad_mgmt_fee(AdTier::From2To5), Money::dollars(600));
        assert_eq!(catalog.ad_mgmt_fee(AdTier::From5To10), Money::dollars(900));
        assert_eq!(catalog.ad_mgmt_fee(AdTier::Gt10), Money::dollars(1200));
    }

    #[test]
    fn tier_parses_wire_names() {
        assert_eq!("lt2".parse::<AdTier>().unwrap(), AdTier::Lt2);
        assert_eq!("2to5".parse::<AdTier>().unwrap(), AdTier::From2To5);
        assert_eq!(" 5to10 ".parse::<AdTier>().unwrap(), AdTier::From5To10);
        assert_eq!("gt10".parse::<AdTier>().unwrap(), AdTier::Gt10);
        assert!(matches!("10k".parse::<AdTier>(), Err(DomainError::Validation(_))));
        assert_eq!(AdTier::default(), AdTier::Lt2);
    }

    #[test]
    fn tier_serializes_to_wire_names() {
        assert_eq!(serde_json::to_string(&AdTier::From2To5).unwrap(), "\"2to5\"");
        let tier: AdTier = serde_json::from_str("\"gt10\"").unwrap();
        assert_eq!(tier, AdTier::Gt10);
    }

    #[test]
    fn catalog_json_round_trips_through_loader() {
        let json = serde_json::to_string(Catalog::standard()).unwrap();
        assert!(json.contains("\"2to5\":600"));
        let loaded = Catalog::from_json(&json).unwrap();
        assert_eq!(&loaded, Catalog::standard());
    }

    #[test]
    fn loader_rejects_decreasing_ad_fees() {
        let mut catalog = Catalog::default();
        catalog.monthly.ad_mgmt.gt10 = Money::dollars(100);
        let json = serde_json::to_string(&catalog).unwrap();

        let err = Catalog::from_json(&json).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.contains("must not decrease")));
    }

    #[test]
    fn loader_rejects_malformed_json() {
        assert!(matches!(Catalog::from_json("{\"monthly\": 3}"), Err(DomainError::Validation(_))));
    }
}
