//! Lead funnel: lead capture, analytics events, trackable QR links and routes.
//!
//! Transport (form POST, analytics dispatch, QR image encoding) sits behind
//! traits; this crate only decides what to send and how to react.

pub mod analytics;
pub mod lead;
pub mod routes;
pub mod tracking;

pub use analytics::{AnalyticsError, AnalyticsEvent, AnalyticsSink, CtaKind, MemorySink, TracingSink, track};
pub use lead::{
    BackendError, BackendResponse, FormBackend, LeadForm, LeadId, LeadSubmission, SubmissionOutcome,
    submit_lead, CONTACT_PHONE, FORM_NAME, THANK_YOU_URL,
};
pub use routes::{Route, hash_query, strip_hash_query};
pub use tracking::{
    QrEncoder, QrRenderOptions, TrackedLink, generate_svg, DEFAULT_BASE_URL, QR_SVG_FILE_NAME,
};
