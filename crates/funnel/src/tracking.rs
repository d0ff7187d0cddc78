//! Trackable links for printed QR codes.
//!
//! The QR tool points flyers at the QR landing page with UTM parameters so
//! scans show up as their own campaign.

use url::Url;

use cursorcat_core::{DomainError, DomainResult};

pub const DEFAULT_BASE_URL: &str = "https://cursorcat.digital/#/qr";
pub const QR_SVG_FILE_NAME: &str = "cursorcat-qr.svg";

const UTM_KEYS: [&str; 3] = ["utm_source", "utm_medium", "utm_campaign"];

/// Landing URL plus UTM parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLink {
    pub base: String,
    pub utm_source: String,
    pub utm_medium: String,
    pub utm_campaign: String,
}

impl Default for TrackedLink {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_URL.to_string(),
            utm_source: "qr".to_string(),
            utm_medium: "flyer".to_string(),
            utm_campaign: "qr_flyer".to_string(),
        }
    }
}

impl TrackedLink {
    /// Full URL. A UTM key already on the base keeps its position with the
    /// new value (later duplicates are dropped); missing ones are appended.
    /// Other query parameters and the fragment (hash route) are kept.
    pub fn build(&self) -> DomainResult<Url> {
        let mut url = Url::parse(self.base.trim())
            .map_err(|e| DomainError::validation(format!("invalid base url {:?}: {e}", self.base)))?;
        if url.cannot_be_a_base() {
            return Err(DomainError::validation(format!(
                "base url {:?} cannot carry query parameters",
                self.base
            )));
        }

        let utm = [
            (UTM_KEYS[0], self.utm_source.as_str()),
            (UTM_KEYS[1], self.utm_medium.as_str()),
            (UTM_KEYS[2], self.utm_campaign.as_str()),
        ];
        let mut written = [false; 3];
        let mut pairs: Vec<(String, String)> = Vec::new();

        for (key, value) in url.query_pairs() {
            match utm.iter().position(|(utm_key, _)| *utm_key == key) {
                Some(i) if written[i] => {}
                Some(i) => {
                    written[i] = true;
                    pairs.push((key.into_owned(), utm[i].1.to_string()));
                }
                None => pairs.push((key.into_owned(), value.into_owned())),
            }
        }
        for (i, (key, value)) in utm.iter().enumerate() {
            if !written[i] {
                pairs.push((key.to_string(), value.to_string()));
            }
        }

        url.set_query(None);
        url.query_pairs_mut().extend_pairs(pairs);

        Ok(url)
    }
}

/// Rendering parameters for a print-ready QR code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrRenderOptions {
    pub width: u32,
    pub margin: u32,
    pub dark: &'static str,
    pub light: &'static str,
}

impl Default for QrRenderOptions {
    fn default() -> Self {
        // Large for print; very dark modules on solid white scan reliably.
        Self {
            width: 768,
            margin: 1,
            dark: "#111111",
            light: "#ffffffff",
        }
    }
}

/// Turns text into an SVG QR code.
pub trait QrEncoder {
    type Error: core::fmt::Display;

    fn to_svg(&self, data: &str, options: &QrRenderOptions) -> Result<String, Self::Error>;
}

/// SVG for `link`, or `None` if the link or the encoder fails.
pub fn generate_svg<E: QrEncoder>(encoder: &E, link: &TrackedLink) -> Option<String> {
    let url = match link.build() {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(%err, "cannot build tracked link");
            return None;
        }
    };

    match encoder.to_svg(url.as_str(), &QrRenderOptions::default()) {
        Ok(svg) => Some(svg),
        Err(err) => {
            tracing::error!(%err, url = %url, "QR generation failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoEncoder;

    impl QrEncoder for EchoEncoder {
        type Error = String;

        fn to_svg(&self, data: &str, options: &QrRenderOptions) -> Result<String, Self::Error> {
            if data.len() > 2048 {
                return Err("payload too large".to_string());
            }
            Ok(format!("<svg width=\"{}\"><!-- {data} --></svg>", options.width))
        }
    }

    #[test]
    fn default_link_puts_query_before_hash_route() {
        let url = TrackedLink::default().build().unwrap();
        assert_eq!(
            url.as_str(),
            "https://cursorcat.digital/?utm_source=qr&utm_medium=flyer&utm_campaign=qr_flyer#/qr"
        );
    }

    #[test]
    fn replaces_existing_utm_and_keeps_other_params() {
        let link = TrackedLink {
            base: "https://cursorcat.digital/?ref=door&utm_source=old#/qr".into(),
            utm_source: "qr".into(),
            utm_medium: "poster".into(),
            utm_campaign: "spring sale".into(),
        };
        let url = link.build().unwrap();

        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("ref".to_string(), "door".to_string()),
                ("utm_source".to_string(), "qr".to_string()),
                ("utm_medium".to_string(), "poster".to_string()),
                ("utm_campaign".to_string(), "spring sale".to_string()),
            ]
        );
        assert_eq!(url.fragment(), Some("/qr"));
    }

    #[test]
    fn existing_utm_keys_keep_their_position() {
        let link = TrackedLink {
            base: "https://cursorcat.digital/?utm_campaign=old&ref=door&utm_campaign=dup&utm_source=x#/qr".into(),
            ..TrackedLink::default()
        };
        let url = link.build().unwrap();

        let keys: Vec<String> = url.query_pairs().map(|(key, _)| key.into_owned()).collect();
        assert_eq!(keys, vec!["utm_campaign", "ref", "utm_source", "utm_medium"]);
        assert_eq!(
            url.as_str(),
            "https://cursorcat.digital/?utm_campaign=qr_flyer&ref=door&utm_source=qr&utm_medium=flyer#/qr"
        );
    }

    #[test]
    fn rejects_invalid_base() {
        let link = TrackedLink {
            base: "not a url".into(),
            ..TrackedLink::default()
        };
        assert!(matches!(link.build(), Err(DomainError::Validation(_))));

        let link = TrackedLink {
            base: "mailto:hello@cursorcat.digital".into(),
            ..TrackedLink::default()
        };
        assert!(link.build().is_err());
    }

    #[test]
    fn generates_svg_for_tracked_url() {
        let svg = generate_svg(&EchoEncoder, &TrackedLink::default()).unwrap();
        assert!(svg.starts_with("<svg width=\"768\">"));
        assert!(svg.contains("utm_campaign=qr_flyer"));
    }

    #[test]
    fn encoder_failure_yields_none() {
        let link = TrackedLink {
            utm_campaign: "x".repeat(4096),
            ..TrackedLink::default()
        };
        assert!(generate_svg(&EchoEncoder, &link).is_none());
        assert!(generate_svg(&EchoEncoder, &TrackedLink { base: "::".into(), ..TrackedLink::default() }).is_none());
    }
}
