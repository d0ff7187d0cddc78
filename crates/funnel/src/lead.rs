//! QR landing lead form: validation, encoding and submission outcome.
//!
//! The form is posted once to a hosted forms backend as
//! `application/x-www-form-urlencoded`. There is no retry; a failure shows a
//! fallback message with the phone number instead. A filled honeypot field
//! marks the submission as a bot: it is answered like a success but never
//! sent or tracked.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use cursorcat_core::{DomainError, DomainResult};

use crate::analytics::{AnalyticsEvent, AnalyticsSink, CtaKind, track};

/// Form name the backend routes submissions by.
pub const FORM_NAME: &str = "contact";
pub const CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
pub const THANK_YOU_URL: &str = "https://cursorcat.digital/#/thank-you";
pub const CONTACT_PHONE: &str = "587-986-3069";

/// Shown when the backend answered with a non-success status.
pub const NON_SUCCESS_MESSAGE: &str =
    "Submission received. If this page did not redirect, we will still follow up within 24 hours.";
/// Shown when the request never completed.
pub const NETWORK_FAILURE_MESSAGE: &str =
    "We could not submit right now. Please try again, or call 587-986-3069.";

const SUBMIT_CTA: &str = "qr-lead-submit";

/// Identifier of one submission attempt.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(Uuid);

impl LeadId {
    /// Uses UUIDv7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for LeadId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LeadId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Fields of the lead form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub business: String,
    pub message: String,
    /// Honeypot hidden from people; anything in it came from a bot.
    #[serde(default, rename = "bot-field")]
    pub bot_field: String,
}

impl LeadForm {
    /// Name, a plausible email and a message are required; business is optional.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if !is_plausible_email(email) {
            return Err(DomainError::validation(format!("invalid email: {email}")));
        }
        if self.message.trim().is_empty() {
            return Err(DomainError::validation("message is required"));
        }
        Ok(())
    }

    /// URL-encoded body, `form-name` first.
    pub fn encode(&self, form_name: &str) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .append_pair("form-name", form_name)
            .append_pair("name", &self.name)
            .append_pair("email", &self.email)
            .append_pair("business", &self.business)
            .append_pair("message", &self.message)
            .finish()
    }

    pub fn is_bot(&self) -> bool {
        !self.bot_field.trim().is_empty()
    }

    fn message_length(&self) -> usize {
        self.message.trim().chars().count()
    }
}

fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// A ready-to-post submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadSubmission {
    pub id: LeadId,
    pub form_name: String,
    pub content_type: &'static str,
    pub body: String,
    pub submitted_at: DateTime<Utc>,
}

impl LeadSubmission {
    pub fn new(form: &LeadForm) -> Self {
        Self {
            id: LeadId::new(),
            form_name: FORM_NAME.to_string(),
            content_type: CONTENT_TYPE,
            body: form.encode(FORM_NAME),
            submitted_at: Utc::now(),
        }
    }
}

/// Status and body returned by the forms backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResponse {
    pub status: u16,
    pub body: String,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request did not complete (offline, DNS, TLS, ...).
    #[error("transport error: {0}")]
    Transport(String),
}

/// Hosted forms endpoint. One call per submission.
pub trait FormBackend {
    fn post(&self, submission: &LeadSubmission) -> Result<BackendResponse, BackendError>;
}

/// What the page does after a submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Navigate to the thank-you page.
    Redirect(String),
    /// Stay on the page (values kept) and show this message.
    Fallback(String),
}

/// Validate, post once, and decide what the visitor sees.
///
/// `hash` is the page's current location hash, recorded with the submit
/// event. Invalid input returns an error before anything is sent or tracked.
pub fn submit_lead(
    backend: &dyn FormBackend,
    analytics: &dyn AnalyticsSink,
    form: &LeadForm,
    hash: Option<&str>,
) -> DomainResult<SubmissionOutcome> {
    if form.is_bot() {
        tracing::info!("honeypot filled, submission dropped");
        return Ok(SubmissionOutcome::Redirect(THANK_YOU_URL.to_string()));
    }
    form.validate()?;

    let mut event = AnalyticsEvent::new("qr_lead_submit")
        .with_kind(CtaKind::Form)
        .with("cta", SUBMIT_CTA)
        .with("business", form.business.trim())
        .with("message_length", form.message_length());
    if let Some(hash) = hash {
        event = event.with("hash", hash);
    }
    track(analytics, event);

    let submission = LeadSubmission::new(form);
    let outcome = match backend.post(&submission) {
        Ok(response) if response.is_success() => {
            tracing::info!(lead_id = %submission.id, "lead submitted");
            track(
                analytics,
                AnalyticsEvent::new("qr_lead_submit_success")
                    .with_kind(CtaKind::Form)
                    .with("cta", SUBMIT_CTA),
            );
            SubmissionOutcome::Redirect(THANK_YOU_URL.to_string())
        }
        Ok(response) => {
            tracing::error!(
                lead_id = %submission.id,
                status = response.status,
                body = %response.body,
                "form submission rejected"
            );
            SubmissionOutcome::Fallback(NON_SUCCESS_MESSAGE.to_string())
        }
        Err(err) => {
            tracing::error!(lead_id = %submission.id, %err, "form submission failed");
            SubmissionOutcome::Fallback(NETWORK_FAILURE_MESSAGE.to_string())
        }
    };

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::MemorySink;
    use std::cell::RefCell;

    struct StubBackend {
        reply: Result<BackendResponse, BackendError>,
        seen: RefCell<Vec<LeadSubmission>>,
    }

    impl StubBackend {
        fn status(status: u16) -> Self {
            Self {
                reply: Ok(BackendResponse {
                    status,
                    body: String::new(),
                }),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                reply: Err(BackendError::Transport("connection refused".into())),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl FormBackend for StubBackend {
        fn post(&self, submission: &LeadSubmission) -> Result<BackendResponse, BackendError> {
            self.seen.borrow_mut().push(submission.clone());
            self.reply.clone()
        }
    }

    fn valid_form() -> LeadForm {
        LeadForm {
            name: "Jordan Lee".into(),
            email: "jordan@example.ca".into(),
            business: "Lee Plumbing".into(),
            message: "Need more calls & reviews".into(),
            bot_field: String::new(),
        }
    }

    #[test]
    fn encodes_urlencoded_with_form_name_first() {
        let body = valid_form().encode(FORM_NAME);
        assert_eq!(
            body,
            "form-name=contact&name=Jordan+Lee&email=jordan%40example.ca&business=Lee+Plumbing&message=Need+more+calls+%26+reviews"
        );
    }

    #[test]
    fn validation_requires_name_email_and_message() {
        assert!(valid_form().validate().is_ok());

        let missing_name = LeadForm { name: "  ".into(), ..valid_form() };
        assert_eq!(
            missing_name.validate(),
            Err(DomainError::validation("name is required"))
        );

        let missing_email = LeadForm { email: String::new(), ..valid_form() };
        assert!(matches!(missing_email.validate(), Err(DomainError::Validation(_))));

        let missing_message = LeadForm { message: " \n ".into(), ..valid_form() };
        assert_eq!(
            missing_message.validate(),
            Err(DomainError::validation("message is required"))
        );

        let no_business = LeadForm { business: String::new(), ..valid_form() };
        assert!(no_business.validate().is_ok());
    }

    #[test]
    fn filled_honeypot_is_answered_but_never_sent() {
        let backend = StubBackend::status(200);
        let sink = MemorySink::new();
        let form = LeadForm { bot_field: "http://spam.example".into(), ..valid_form() };

        let outcome = submit_lead(&backend, &sink, &form, Some("#/qr")).unwrap();

        assert_eq!(outcome, SubmissionOutcome::Redirect(THANK_YOU_URL.to_string()));
        assert!(backend.seen.borrow().is_empty());
        assert!(sink.events().is_empty());
        assert!(!form.encode(FORM_NAME).contains("bot-field"));
    }

    #[test]
    fn honeypot_reads_from_form_field_name() {
        let form: LeadForm = serde_json::from_str(
            r#"{"name": "A", "email": "a@b.ca", "business": "", "message": "hi", "bot-field": "x"}"#,
        )
        .unwrap();
        assert!(form.is_bot());

        let form: LeadForm =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.ca", "business": "", "message": "hi"}"#).unwrap();
        assert!(!form.is_bot());
    }

    #[test]
    fn submit_event_records_current_hash() {
        let sink = MemorySink::new();
        submit_lead(&StubBackend::status(200), &sink, &valid_form(), Some("#/qr?utm_source=qr")).unwrap();

        let events = sink.events();
        assert_eq!(events[0].param("hash"), Some(&serde_json::Value::from("#/qr?utm_source=qr")));
        assert!(events[1].param("hash").is_none());
    }

    #[test]
    fn rejects_implausible_emails() {
        for email in ["jordan", "@example.ca", "jordan@", "jordan@example", "jo rdan@example.ca", "a@b@c.ca", "a@.ca", "a@b."] {
            let form = LeadForm { email: email.into(), ..valid_form() };
            assert!(form.validate().is_err(), "{email} should be rejected");
        }
    }

    #[test]
    fn success_redirects_and_tracks_both_events() {
        let backend = StubBackend::status(200);
        let sink = MemorySink::new();

        let outcome = submit_lead(&backend, &sink, &valid_form(), None).unwrap();

        assert_eq!(outcome, SubmissionOutcome::Redirect(THANK_YOU_URL.to_string()));
        assert_eq!(sink.names(), vec!["qr_lead_submit", "qr_lead_submit_success"]);

        let seen = backend.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].content_type, CONTENT_TYPE);
        assert!(seen[0].body.starts_with("form-name=contact&"));
    }

    #[test]
    fn submit_event_carries_length_not_message() {
        let sink = MemorySink::new();
        submit_lead(&StubBackend::status(204), &sink, &valid_form(), None).unwrap();

        let submit = &sink.events()[0];
        assert_eq!(submit.param("message_length"), Some(&serde_json::Value::from(25)));
        assert!(submit.param("message").is_none());
    }

    #[test]
    fn non_success_status_falls_back_without_retry() {
        let backend = StubBackend::status(500);
        let sink = MemorySink::new();

        let outcome = submit_lead(&backend, &sink, &valid_form(), None).unwrap();

        assert_eq!(outcome, SubmissionOutcome::Fallback(NON_SUCCESS_MESSAGE.to_string()));
        assert_eq!(backend.seen.borrow().len(), 1);
        assert_eq!(sink.names(), vec!["qr_lead_submit"]);
    }

    #[test]
    fn transport_error_offers_phone_number() {
        let backend = StubBackend::offline();
        let outcome = submit_lead(&backend, &MemorySink::new(), &valid_form(), None).unwrap();

        match outcome {
            SubmissionOutcome::Fallback(message) => assert!(message.contains(CONTACT_PHONE)),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn invalid_form_is_not_sent_or_tracked() {
        let backend = StubBackend::status(200);
        let sink = MemorySink::new();
        let form = LeadForm { email: "nope".into(), ..valid_form() };

        assert!(submit_lead(&backend, &sink, &form, None).is_err());
        assert!(backend.seen.borrow().is_empty());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn submissions_get_distinct_ids() {
        let a = LeadSubmission::new(&valid_form());
        let b = LeadSubmission::new(&valid_form());
        assert_ne!(a.id, b.id);
        assert_eq!(a.body, b.body);
    }
}
