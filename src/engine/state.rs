use crate::flow::StepId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizState {
    pub current_step_id: StepId,
    /// Steps already left, in visitation order. Never holds the current step.
    #[serde(default)]
    pub history: Vec<StepId>,
    /// One answer per step; a revisit overwrites the earlier answer.
    #[serde(default)]
    pub answers: BTreeMap<StepId, String>,
}

impl QuizState {
    pub fn start() -> Self {
        Self {
            current_step_id: StepId::Start,
            history: Vec::new(),
            answers: BTreeMap::new(),
        }
    }

    /// Next state after leaving the current step for `destination`.
    ///
    /// `answer`, when present, is recorded under the step being left. `self`
    /// is left untouched so callers can diff old and new states.
    pub fn advance(&self, answer: Option<&str>, destination: StepId) -> QuizState {
        let mut history = self.history.clone();
        history.push(self.current_step_id);
        let mut answers = self.answers.clone();
        if let Some(value) = answer {
            answers.insert(self.current_step_id, value.to_string());
        }
        QuizState {
            current_step_id: destination,
            history,
            answers,
        }
    }

    pub fn answer_for(&self, step: StepId) -> Option<&str> {
        self.answers.get(&step).map(String::as_str)
    }

    /// Answers keyed by step name, as sent with a lead.
    pub fn answers_by_name(&self) -> BTreeMap<String, String> {
        self.answers
            .iter()
            .map(|(step, value)| (step.as_str().to_string(), value.clone()))
            .collect()
    }
}

impl Default for QuizState {
    fn default() -> Self {
        Self::start()
    }
}
