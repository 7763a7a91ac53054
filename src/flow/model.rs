use super::StepId;
use serde::{Deserialize, Serialize};

/// Option value that carries the destination of a `text_input` step.
pub const TEXT_SUBMIT_VALUE: &str = "next";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    SingleChoice,
    TextInput,
    Info,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::SingleChoice => "single_choice",
            StepKind::TextInput => "text_input",
            StepKind::Info => "info",
        }
    }
}

impl std::fmt::Display for StepKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOption {
    pub label: String,
    pub value: String,
    /// Default destination. `None` defers to the branching rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_step: Option<StepId>,
}

impl StepOption {
    pub fn new(label: &str, value: &str, next_step: Option<StepId>) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
            next_step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    #[serde(rename = "type")]
    pub kind: StepKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<StepOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_link: Option<String>,
}

impl Step {
    pub fn find_option(&self, value: &str) -> Option<&StepOption> {
        self.options.iter().find(|option| option.value == value)
    }

    /// Destination of a `text_input` step, read from its `next` option.
    pub fn text_destination(&self) -> Option<StepId> {
        self.find_option(TEXT_SUBMIT_VALUE)
            .and_then(|option| option.next_step)
    }

    pub fn is_terminal(&self) -> bool {
        self.kind == StepKind::Info
    }

    pub fn question_text(&self) -> &str {
        self.question.as_deref().unwrap_or_default()
    }
}
