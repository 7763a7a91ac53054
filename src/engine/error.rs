use crate::flow::{FlowError, StepId, StepKind};

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("no destination for value `{value}` at step `{step}`")]
    NoDestination { step: StepId, value: String },
    #[error("text step `{step}` has no `next` option with a destination")]
    MissingTextDestination { step: StepId },
    #[error("answer for step `{step}` is empty")]
    EmptyAnswer { step: StepId },
    #[error("step `{step}` is a {actual} step, expected {expected}")]
    UnexpectedStepKind {
        step: StepId,
        expected: StepKind,
        actual: StepKind,
    },
    #[error("step `{step}` is terminal and does not navigate further")]
    TerminalStep { step: StepId },
    #[error("step `{step}` has no option `{value}`")]
    UnknownOption { step: StepId, value: String },
    #[error(transparent)]
    Flow(#[from] FlowError),
}
