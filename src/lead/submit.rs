use super::LeadForm;
use crate::engine::QuizState;
use crate::flow::StepId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum LeadError {
    #[error("lead form incomplete: {0}")]
    IncompleteForm(&'static str),
    #[error("failed to encode lead payload: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("lead webhook request failed: {0}")]
    Request(String),
    #[error("lead webhook responded with status {code}")]
    Status { code: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub name: String,
    pub phone: String,
    pub quiz_data: BTreeMap<String, String>,
    pub final_step: StepId,
}

impl LeadPayload {
    pub fn from_session(form: &LeadForm, state: &QuizState) -> Self {
        Self {
            name: form.name.clone(),
            phone: form.phone.clone(),
            quiz_data: state.answers_by_name(),
            final_step: state.current_step_id,
        }
    }
}

/// Destination for captured leads.
pub trait LeadSink {
    fn deliver(&self, payload: &LeadPayload) -> Result<(), LeadError>;
}

#[derive(Debug, Clone)]
pub struct WebhookSink {
    url: String,
    timeout: Duration,
}

impl WebhookSink {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            timeout,
        }
    }
}

impl LeadSink for WebhookSink {
    fn deliver(&self, payload: &LeadPayload) -> Result<(), LeadError> {
        let body = serde_json::to_string(payload).map_err(LeadError::Encode)?;
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        match agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&body)
        {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(code, _)) => Err(LeadError::Status { code }),
            Err(err) => Err(LeadError::Request(err.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadOutcome {
    pub delivered: bool,
    pub redirect_url: String,
}

/// Sends the lead and hands back the redirect target.
///
/// Only an incomplete form stops the submission. Once sent, the outcome of
/// the delivery is logged and otherwise ignored: the redirect is always
/// returned.
pub fn submit_lead(
    sink: &dyn LeadSink,
    form: &LeadForm,
    state: &QuizState,
    redirect_url: &str,
) -> Result<LeadOutcome, LeadError> {
    if let Some(reason) = form.blocking_reason() {
        return Err(LeadError::IncompleteForm(reason));
    }
    let payload = LeadPayload::from_session(form, state);
    let delivered = match sink.deliver(&payload) {
        Ok(()) => {
            tracing::info!(final_step = %payload.final_step, "lead delivered");
            true
        }
        Err(err) => {
            tracing::warn!(final_step = %payload.final_step, error = %err, "lead delivery failed");
            false
        }
    };
    tracing::info!(redirect = redirect_url, "redirecting after lead submission");
    Ok(LeadOutcome {
        delivered,
        redirect_url: redirect_url.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingSink {
        fail: bool,
        seen: RefCell<Vec<LeadPayload>>,
    }

    impl RecordingSink {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl LeadSink for RecordingSink {
        fn deliver(&self, payload: &LeadPayload) -> Result<(), LeadError> {
            self.seen.borrow_mut().push(payload.clone());
            if self.fail {
                Err(LeadError::Status { code: 500 })
            } else {
                Ok(())
            }
        }
    }

    fn finished_state() -> QuizState {
        QuizState::start()
            .advance(Some("learn"), StepId::PathALevel)
            .advance(Some("zero"), StepId::PathAInterest)
            .advance(Some("ads"), StepId::ResultElecti)
    }

    #[test]
    fn payload_uses_wire_field_names() {
        let payload =
            LeadPayload::from_session(&LeadForm::new("Ana", "11987654321"), &finished_state());
        let value = serde_json::to_value(&payload).expect("encode");
        assert_eq!(value["name"], "Ana");
        assert_eq!(value["phone"], "(11) 98765-4321");
        assert_eq!(value["finalStep"], "RESULT_ELECTI");
        assert_eq!(value["quizData"]["START"], "learn");
        assert_eq!(value["quizData"]["PATH_A_INTEREST"], "ads");
    }

    #[test]
    fn failed_delivery_still_redirects() {
        let sink = RecordingSink::new(true);
        let outcome = submit_lead(
            &sink,
            &LeadForm::new("Ana", "11987654321"),
            &finished_state(),
            "https://wa.link/3ddvr0",
        )
        .expect("submitted");
        assert!(!outcome.delivered);
        assert_eq!(outcome.redirect_url, "https://wa.link/3ddvr0");
        assert_eq!(sink.seen.borrow().len(), 1);
    }

    #[test]
    fn incomplete_form_never_reaches_sink() {
        let sink = RecordingSink::new(false);
        let err = submit_lead(
            &sink,
            &LeadForm::new("", "11987654321"),
            &finished_state(),
            "https://wa.link/3ddvr0",
        )
        .expect_err("blocked");
        assert!(matches!(err, LeadError::IncompleteForm("name is required")));
        assert!(sink.seen.borrow().is_empty());
    }

    #[test]
    fn unreachable_webhook_is_swallowed() {
        let sink = WebhookSink::new("http://127.0.0.1:9/webhook", Duration::from_millis(500));
        let outcome = submit_lead(
            &sink,
            &LeadForm::new("Ana", "11987654321"),
            &finished_state(),
            "https://wa.link/3ddvr0",
        )
        .expect("submitted");
        assert!(!outcome.delivered);
        assert_eq!(outcome.redirect_url, "https://wa.link/3ddvr0");
    }
}
