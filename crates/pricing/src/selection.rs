//! What the visitor picked: package/add-on toggles, quantities and ad tier.

use serde::{Deserialize, Deserializer, Serialize};

use cursorcat_core::ValueObject;

use crate::catalog::AdTier;

/// Minimum number of locations (Local Dominance always covers one).
pub const MIN_LOCATIONS: u32 = 1;
/// Minimum for landing-page and campaign counts.
pub const MIN_COUNT: u32 = 0;

/// A toggleable package or add-on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Toggle {
    PilotWithProof,
    LocalDominance,
    EcomSprint,
    MeasurementMakeover,
    SocialMediaMgmt,
    AnalyticsReporting,
    SeoEssentials,
    EcomFunnelsLite,
    WebDesign,
    BrandingStrategy,
}

impl Toggle {
    /// Core packages first, then add-ons.
    pub const ALL: [Toggle; 10] = [
        Toggle::PilotWithProof,
        Toggle::LocalDominance,
        Toggle::EcomSprint,
        Toggle::MeasurementMakeover,
        Toggle::SocialMediaMgmt,
        Toggle::AnalyticsReporting,
        Toggle::SeoEssentials,
        Toggle::EcomFunnelsLite,
        Toggle::WebDesign,
        Toggle::BrandingStrategy,
    ];

    /// One of the four outcome-based core packages.
    pub fn is_package(self) -> bool {
        matches!(
            self,
            Toggle::PilotWithProof
                | Toggle::LocalDominance
                | Toggle::EcomSprint
                | Toggle::MeasurementMakeover
        )
    }

    /// Packages that run paid ads and therefore incur the ad-management fee.
    pub fn runs_ads(self) -> bool {
        matches!(self, Toggle::PilotWithProof | Toggle::LocalDominance | Toggle::EcomSprint)
    }
}

/// Lead-generation campaign type offered in the calculator dropdown.
///
/// The calculator only prices one campaign per chosen type; "None" means zero.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadGenType {
    #[default]
    None,
    GoogleAds,
    MetaAds,
    LinkedInOutreach,
    EmailOutreach,
    LeadMagnetLandingPage,
}

impl LeadGenType {
    pub const ALL: [LeadGenType; 6] = [
        LeadGenType::None,
        LeadGenType::GoogleAds,
        LeadGenType::MetaAds,
        LeadGenType::LinkedInOutreach,
        LeadGenType::EmailOutreach,
        LeadGenType::LeadMagnetLandingPage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeadGenType::None => "None",
            LeadGenType::GoogleAds => "Google Ads (Search/PMax)",
            LeadGenType::MetaAds => "Meta Ads (Facebook/Instagram)",
            LeadGenType::LinkedInOutreach => "LinkedIn Outreach",
            LeadGenType::EmailOutreach => "Email Outreach",
            LeadGenType::LeadMagnetLandingPage => "Lead Magnet + Landing Page",
        }
    }

    pub fn campaign_count(self) -> u32 {
        match self {
            LeadGenType::None => 0,
            _ => 1,
        }
    }

    /// Initial dropdown value for an existing campaign count.
    pub fn from_campaigns(campaigns: i64) -> Self {
        if campaigns > 0 {
            LeadGenType::GoogleAds
        } else {
            LeadGenType::None
        }
    }
}

/// The visitor's current selection.
///
/// [`Selection::apply`] clamps quantities to their bounds as they are written.
/// A selection built or deserialized directly may still be out of range, so
/// pricing clamps again through [`Quantities::sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub pilot_with_proof: bool,
    pub local_dominance: bool,
    pub ecom_sprint: bool,
    pub measurement_makeover: bool,

    pub locations: i64,
    pub landing_pages: i64,
    pub ad_tier: AdTier,

    pub social_media_mgmt: bool,
    pub analytics_reporting: bool,
    pub seo_essentials: bool,
    pub ecom_funnels_lite: bool,
    pub web_design: bool,
    pub branding_strategy: bool,
    pub lead_gen_campaigns: i64,
}

impl ValueObject for Selection {}

impl Default for Selection {
    fn default() -> Self {
        Self {
            pilot_with_proof: false,
            local_dominance: false,
            ecom_sprint: false,
            measurement_makeover: false,
            locations: i64::from(MIN_LOCATIONS),
            landing_pages: 0,
            ad_tier: AdTier::default(),
            social_media_mgmt: false,
            analytics_reporting: false,
            seo_essentials: false,
            ecom_funnels_lite: false,
            web_design: false,
            branding_strategy: false,
            lead_gen_campaigns: 0,
        }
    }
}

impl Selection {
    fn flag_mut(&mut self, toggle: Toggle) -> &mut bool {
        match toggle {
            Toggle::PilotWithProof => &mut self.pilot_with_proof,
            Toggle::LocalDominance => &mut self.local_dominance,
            Toggle::EcomSprint => &mut self.ecom_sprint,
            Toggle::MeasurementMakeover => &mut self.measurement_makeover,
            Toggle::SocialMediaMgmt => &mut self.social_media_mgmt,
            Toggle::AnalyticsReporting => &mut self.analytics_reporting,
            Toggle::SeoEssentials => &mut self.seo_essentials,
            Toggle::EcomFunnelsLite => &mut self.ecom_funnels_lite,
            Toggle::WebDesign => &mut self.web_design,
            Toggle::BrandingStrategy => &mut self.branding_strategy,
        }
    }

    pub fn is_selected(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::PilotWithProof => self.pilot_with_proof,
            Toggle::LocalDominance => self.local_dominance,
            Toggle::EcomSprint => self.ecom_sprint,
            Toggle::MeasurementMakeover => self.measurement_makeover,
            Toggle::SocialMediaMgmt => self.social_media_mgmt,
            Toggle::AnalyticsReporting => self.analytics_reporting,
            Toggle::SeoEssentials => self.seo_essentials,
            Toggle::EcomFunnelsLite => self.ecom_funnels_lite,
            Toggle::WebDesign => self.web_design,
            Toggle::BrandingStrategy => self.branding_strategy,
        }
    }

    pub fn set(&mut self, toggle: Toggle, on: bool) {
        *self.flag_mut(toggle) = on;
    }

    /// Flip a flag; returns the new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let flag = self.flag_mut(toggle);
        *flag = !*flag;
        *flag
    }

    /// At least one ad-running package is active.
    pub fn runs_ads(&self) -> bool {
        Toggle::ALL
            .into_iter()
            .any(|t| t.runs_ads() && self.is_selected(t))
    }

    pub fn lead_gen_type(&self) -> LeadGenType {
        LeadGenType::from_campaigns(self.lead_gen_campaigns)
    }

    /// Overwrite only the fields present in `patch`.
    pub fn apply(&mut self, patch: &SelectionPatch) {
        if let Some(value) = patch.pilot_with_proof {
            self.pilot_with_proof = value;
        }
        if let Some(value) = patch.local_dominance {
            self.local_dominance = value;
        }
        if let Some(value) = patch.ecom_sprint {
            self.ecom_sprint = value;
        }
        if let Some(value) = patch.measurement_makeover {
            self.measurement_makeover = value;
        }
        if let Some(value) = patch.locations {
            self.locations = value.max(i64::from(MIN_LOCATIONS));
        }
        if let Some(value) = patch.landing_pages {
            self.landing_pages = value.max(i64::from(MIN_COUNT));
        }
        if let Some(value) = patch.ad_tier {
            self.ad_tier = value;
        }
        if let Some(value) = patch.social_media_mgmt {
            self.social_media_mgmt = value;
        }
        if let Some(value) = patch.analytics_reporting {
            self.analytics_reporting = value;
        }
        if let Some(value) = patch.seo_essentials {
            self.seo_essentials = value;
        }
        if let Some(value) = patch.ecom_funnels_lite {
            self.ecom_funnels_lite = value;
        }
        if let Some(value) = patch.web_design {
            self.web_design = value;
        }
        if let Some(value) = patch.branding_strategy {
            self.branding_strategy = value;
        }
        if let Some(value) = patch.lead_gen_campaigns {
            self.lead_gen_campaigns = value.max(i64::from(MIN_COUNT));
        }
    }
}

/// Partial update of a [`Selection`].
///
/// Quantity fields accept JSON numbers or text as typed into an input box;
/// anything non-numeric is coerced to the field's minimum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pilot_with_proof: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_dominance: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecom_sprint: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_makeover: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_locations")]
    pub locations: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_count")]
    pub landing_pages: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_tier: Option<AdTier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_media_mgmt: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analytics_reporting: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_essentials: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecom_funnels_lite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_design: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branding_strategy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient_count")]
    pub lead_gen_campaigns: Option<i64>,
}

impl SelectionPatch {
    pub fn toggle(toggle: Toggle, on: bool) -> Self {
        let mut patch = Self::default();
        let slot = match toggle {
            Toggle::PilotWithProof => &mut patch.pilot_with_proof,
            Toggle::LocalDominance => &mut patch.local_dominance,
            Toggle::EcomSprint => &mut patch.ecom_sprint,
            Toggle::MeasurementMakeover => &mut patch.measurement_makeover,
            Toggle::SocialMediaMgmt => &mut patch.social_media_mgmt,
            Toggle::AnalyticsReporting => &mut patch.analytics_reporting,
            Toggle::SeoEssentials => &mut patch.seo_essentials,
            Toggle::EcomFunnelsLite => &mut patch.ecom_funnels_lite,
            Toggle::WebDesign => &mut patch.web_design,
            Toggle::BrandingStrategy => &mut patch.branding_strategy,
        };
        *slot = Some(on);
        patch
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Quantities after clamping to their valid ranges.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Quantities {
    pub locations: u64,
    pub landing_pages: u64,
    pub lead_gen_campaigns: u64,
}

impl Quantities {
    pub fn sanitize(selection: &Selection) -> Self {
        Self {
            locations: clamp_quantity(selection.locations, MIN_LOCATIONS),
            landing_pages: clamp_quantity(selection.landing_pages, MIN_COUNT),
            lead_gen_campaigns: clamp_quantity(selection.lead_gen_campaigns, MIN_COUNT),
        }
    }

    /// Locations beyond the first one.
    pub fn extra_locations(&self) -> u64 {
        self.locations.saturating_sub(1)
    }
}

fn clamp_quantity(raw: i64, min: u32) -> u64 {
    raw.max(i64::from(min)).unsigned_abs()
}

/// Coerce text typed into a quantity input.
///
/// Reads the leading integer (`"3.7"` is 3, `"12abc"` is 12). Empty or
/// non-numeric text and values below `min` become `min`. Never fails.
pub fn parse_quantity(raw: &str, min: u32) -> u32 {
    let trimmed = raw.trim();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return min;
    }

    let value = digits
        .bytes()
        .fold(0u32, |acc, d| acc.saturating_mul(10).saturating_add(u32::from(d - b'0')));

    if negative && value != 0 {
        return min;
    }
    value.max(min)
}

fn lenient_quantity<'de, D>(deserializer: D, min: u32) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde_json::Value;

    let value = Option::<Value>::deserialize(deserializer)?;
    let quantity = match value {
        None => return Ok(None),
        Some(Value::Number(n)) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.max(i64::from(min)),
            (None, Some(f)) if f.is_finite() => (f.floor() as i64).max(i64::from(min)),
            _ => i64::from(min),
        },
        Some(Value::String(s)) => i64::from(parse_quantity(&s, min)),
        Some(_) => i64::from(min),
    };
    Ok(Some(quantity))
}

fn lenient_locations<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_quantity(deserializer, MIN_LOCATIONS)
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_quantity(deserializer, MIN_COUNT)
}
