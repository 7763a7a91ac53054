//! Lead capture handed off at a terminal step: contact form, phone mask,
//! and the webhook submission that always ends in a redirect.

pub mod form;
pub mod phone;
pub mod submit;

pub use form::{LeadField, LeadForm};
pub use phone::{format_phone, is_phone_complete, phone_digits};
pub use submit::{submit_lead, LeadError, LeadOutcome, LeadPayload, LeadSink, WebhookSink};
