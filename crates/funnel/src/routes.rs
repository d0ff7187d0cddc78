//! Hash-based routes of the single-page site.

use serde::Serialize;

/// A page of the site.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    Home,
    QrLanding,
    QrCodeTool,
    ThankYou,
}

impl Route {
    pub const ALL: [Route; 4] = [Route::Home, Route::QrLanding, Route::QrCodeTool, Route::ThankYou];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::QrLanding => "/qr",
            Route::QrCodeTool => "/qr-code",
            Route::ThankYou => "/thank-you",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Cursor Cat Digital — Where Curiosity Meets Creativity & Conversion",
            Route::QrLanding => "Get Results. Not Predictions. — Cursor Cat Digital (QR Landing)",
            Route::QrCodeTool => "QR Code Generator — Cursor Cat Digital",
            Route::ThankYou => "Thanks — Cursor Cat Digital",
        }
    }

    /// Hash fragment that routes to this page, e.g. `#/qr`.
    pub fn hash(self) -> String {
        format!("#{}", self.path())
    }

    fn from_path(path: &str) -> Option<Route> {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        Route::ALL.into_iter().find(|route| route.path() == path)
    }

    /// Route for a location. A hash route wins; otherwise pretty paths such as
    /// `/qr` resolve directly. Anything unknown lands on the home page.
    pub fn resolve(pathname: &str, hash: &str) -> Route {
        if let Some(route) = hash_path(hash).and_then(Route::from_path) {
            return route;
        }
        if hash_path(hash).is_some_and(|p| p != "/") {
            tracing::debug!(hash, "unknown hash route, showing home");
            return Route::Home;
        }
        Route::from_path(pathname).unwrap_or(Route::Home)
    }

    /// Hash to redirect to when a pretty path was requested without one.
    pub fn canonical_hash(pathname: &str, hash: &str) -> Option<String> {
        let route = Route::from_path(pathname)?;
        if route == Route::Home || hash == route.hash() {
            return None;
        }
        Some(route.hash())
    }

    /// Landing pages show a thank-you notice when redirected with `?thanks=1`.
    pub fn thanks_flag(hash: &str) -> bool {
        hash_query(hash).iter().any(|(key, value)| key == "thanks" && value == "1")
    }
}

fn hash_path(hash: &str) -> Option<&str> {
    let route = hash.strip_prefix('#')?;
    let path = route.split('?').next().unwrap_or_default();
    path.starts_with('/').then_some(path)
}

/// Query string carried inside the hash, e.g. `#/qr?thanks=1`.
pub fn hash_query(hash: &str) -> Vec<(String, String)> {
    match hash.split_once('?') {
        Some((_, query)) => url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect(),
        None => Vec::new(),
    }
}

/// The hash with its query removed (after the thank-you notice was shown).
pub fn strip_hash_query(hash: &str) -> &str {
    hash.split_once('?').map_or(hash, |(route, _)| route)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_hash_routes() {
        assert_eq!(Route::resolve("/", "#/qr"), Route::QrLanding);
        assert_eq!(Route::resolve("/", "#/qr-code"), Route::QrCodeTool);
        assert_eq!(Route::resolve("/", "#/thank-you"), Route::ThankYou);
        assert_eq!(Route::resolve("/", "#/qr?thanks=1"), Route::QrLanding);
        assert_eq!(Route::resolve("/", "#/"), Route::Home);
        assert_eq!(Route::resolve("/", ""), Route::Home);
    }

    #[test]
    fn resolves_pretty_paths_without_hash() {
        assert_eq!(Route::resolve("/qr", ""), Route::QrLanding);
        assert_eq!(Route::resolve("/qr-code/", ""), Route::QrCodeTool);
        assert_eq!(Route::resolve("/thank-you", "#"), Route::ThankYou);
    }

    #[test]
    fn unknown_routes_fall_back_to_home() {
        assert_eq!(Route::resolve("/", "#/pricing"), Route::Home);
        assert_eq!(Route::resolve("/qr", "#/nope"), Route::Home);
        assert_eq!(Route::resolve("/blog", ""), Route::Home);
        assert_eq!(Route::resolve("/", "#services"), Route::Home);
    }

    #[test]
    fn section_anchor_on_pretty_path_keeps_page() {
        assert_eq!(Route::resolve("/qr", "#form"), Route::QrLanding);
    }

    #[test]
    fn canonical_hash_for_pretty_paths() {
        assert_eq!(Route::canonical_hash("/qr", ""), Some("#/qr".to_string()));
        assert_eq!(Route::canonical_hash("/qr", "#/qr"), None);
        assert_eq!(Route::canonical_hash("/thank-you", ""), Some("#/thank-you".to_string()));
        assert_eq!(Route::canonical_hash("/", ""), None);
        assert_eq!(Route::canonical_hash("/blog", ""), None);
    }

    #[test]
    fn thanks_flag_reads_query_inside_hash() {
        assert!(Route::thanks_flag("#/qr?thanks=1"));
        assert!(Route::thanks_flag("#/qr?utm_source=qr&thanks=1"));
        assert!(!Route::thanks_flag("#/qr?thanks=0"));
        assert!(!Route::thanks_flag("#/qr"));
        assert_eq!(strip_hash_query("#/qr?thanks=1"), "#/qr");
        assert_eq!(strip_hash_query("#/qr"), "#/qr");
    }

    #[test]
    fn every_route_has_a_title() {
        for route in Route::ALL {
            assert!(route.title().contains("Cursor Cat Digital"));
            assert_eq!(Route::resolve("/", &route.hash()), route);
        }
    }
}
