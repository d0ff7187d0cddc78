//! Analytics events for CTA clicks and form submissions.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// What kind of target a CTA points at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaKind {
    Link,
    Tel,
    Mailto,
    Calendly,
    Form,
}

impl CtaKind {
    /// Classify a link target by its href.
    pub fn classify(href: &str) -> Self {
        let href = href.trim().to_ascii_lowercase();
        if href.starts_with("tel:") {
            CtaKind::Tel
        } else if href.starts_with("mailto:") {
            CtaKind::Mailto
        } else if href.contains("calendly") {
            CtaKind::Calendly
        } else {
            CtaKind::Link
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CtaKind::Link => "link",
            CtaKind::Tel => "tel",
            CtaKind::Mailto => "mailto",
            CtaKind::Calendly => "calendly",
            CtaKind::Form => "form",
        }
    }
}

/// A single analytics event: `{ "event": .., <params>, "ts": <epoch ms> }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub event: String,
    #[serde(flatten)]
    pub params: Map<String, Value>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub ts: DateTime<Utc>,
}

impl AnalyticsEvent {
    pub fn new(event: impl Into<String>) -> Self {
        Self::at(event, Utc::now())
    }

    pub fn at(event: impl Into<String>, ts: DateTime<Utc>) -> Self {
        Self {
            event: event.into(),
            params: Map::new(),
            ts,
        }
    }

    /// Attach a parameter. `event` and `ts` are reserved and ignored.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        if key != "event" && key != "ts" {
            self.params.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn with_kind(self, kind: CtaKind) -> Self {
        self.with("type", kind.as_str())
    }

    /// `cta_click` for an element tagged with a CTA id.
    pub fn cta_click(cta: &str, href: Option<&str>, hash: Option<&str>) -> Self {
        let cta = if cta.trim().is_empty() { "cta" } else { cta };
        let href = href.unwrap_or_default();
        let kind = if href.is_empty() {
            CtaKind::Link
        } else {
            CtaKind::classify(href)
        };

        let mut event = AnalyticsEvent::new("cta_click")
            .with("cta", cta)
            .with("href", href)
            .with_kind(kind);
        if let Some(hash) = hash {
            event = event.with("hash", hash);
        }
        event
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    #[error("analytics sink unavailable: {0}")]
    Unavailable(String),
}

/// Where events go (tag manager bridge, log, test buffer).
pub trait AnalyticsSink: Send + Sync {
    fn dispatch(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError>;
}

/// Send an event; analytics failures never reach the visitor.
pub fn track(sink: &dyn AnalyticsSink, event: AnalyticsEvent) {
    if let Err(err) = sink.dispatch(&event) {
        tracing::debug!(%err, event = %event.event, "analytics dispatch failed");
    }
}

/// Logs each event at debug level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn dispatch(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| AnalyticsError::Unavailable(e.to_string()))?;
        tracing::debug!(target: "analytics", %payload, "event");
        Ok(())
    }
}

/// Keeps events in memory (previews and tests).
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.event).collect()
    }
}

impl AnalyticsSink for MemorySink {
    fn dispatch(&self, event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
        self.events
            .lock()
            .map_err(|_| AnalyticsError::Unavailable("memory sink poisoned".into()))?
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FailingSink;

    impl AnalyticsSink for FailingSink {
        fn dispatch(&self, _event: &AnalyticsEvent) -> Result<(), AnalyticsError> {
            Err(AnalyticsError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn classifies_cta_targets() {
        assert_eq!(CtaKind::classify("tel:587-986-3069"), CtaKind::Tel);
        assert_eq!(CtaKind::classify("MAILTO:hello@example.com"), CtaKind::Mailto);
        assert_eq!(CtaKind::classify("https://calendly.com/cursorcat"), CtaKind::Calendly);
        assert_eq!(CtaKind::classify("#form"), CtaKind::Link);
    }

    #[test]
    fn event_serializes_flat_with_millisecond_timestamp() {
        let ts = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let event = AnalyticsEvent::at("qr_lead_submit", ts)
            .with_kind(CtaKind::Form)
            .with("cta", "qr-lead-submit")
            .with("message_length", 42);

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "qr_lead_submit");
        assert_eq!(json["type"], "form");
        assert_eq!(json["cta"], "qr-lead-submit");
        assert_eq!(json["message_length"], 42);
        assert_eq!(json["ts"], 1_700_000_000_123i64);
    }

    #[test]
    fn reserved_keys_are_not_overwritten() {
        let event = AnalyticsEvent::new("cta_click").with("event", "spoof").with("ts", 1);
        assert!(event.params.is_empty());
        assert_eq!(event.event, "cta_click");
    }

    #[test]
    fn cta_click_derives_kind_from_href() {
        let event = AnalyticsEvent::cta_click("hero-call", Some("tel:587-986-3069"), Some("#/qr"));
        assert_eq!(event.param("type"), Some(&Value::from("tel")));
        assert_eq!(event.param("hash"), Some(&Value::from("#/qr")));

        let event = AnalyticsEvent::cta_click("", None, None);
        assert_eq!(event.param("cta"), Some(&Value::from("cta")));
        assert_eq!(event.param("type"), Some(&Value::from("link")));
        assert!(event.param("hash").is_none());
    }

    #[test]
    fn failed_dispatch_is_swallowed() {
        track(&FailingSink, AnalyticsEvent::new("cta_click"));
        track(&TracingSink, AnalyticsEvent::new("cta_click"));
    }

    #[test]
    fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        track(&sink, AnalyticsEvent::new("a"));
        track(&sink, AnalyticsEvent::new("b"));
        assert_eq!(sink.names(), vec!["a", "b"]);
    }
}
