use super::progress::{progress_snapshot, Progress};
use super::resolve::{resolve_next, resolve_text_destination};
use super::{NavigationError, QuizState};
use crate::flow::{BranchRules, FlowDefinition, Step, StepId, StepKind};

/// What a rendering layer needs to draw the current position.
#[derive(Debug, Clone, Copy)]
pub struct StepView<'a> {
    pub step: &'a Step,
    pub progress: Progress,
}

/// Single writer of a [`QuizState`]. Write entry points either produce the
/// next state or fail without touching the current one.
#[derive(Debug, Clone)]
pub struct QuizSession {
    flow: FlowDefinition,
    rules: BranchRules,
    state: QuizState,
}

impl QuizSession {
    pub fn new(flow: FlowDefinition, rules: BranchRules) -> Self {
        tracing::info!(steps = flow.len(), rules = rules.rules().len(), "quiz session started");
        Self {
            flow,
            rules,
            state: QuizState::start(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(FlowDefinition::builtin(), BranchRules::builtin())
    }

    pub fn state(&self) -> &QuizState {
        &self.state
    }

    pub fn rules(&self) -> &BranchRules {
        &self.rules
    }

    pub fn current_step(&self) -> Result<&Step, NavigationError> {
        Ok(self.flow.get_step(self.state.current_step_id)?)
    }

    pub fn view(&self) -> Result<StepView<'_>, NavigationError> {
        Ok(StepView {
            step: self.current_step()?,
            progress: progress_snapshot(self.state.current_step_id),
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.current_step()
            .map(|step| step.is_terminal())
            .unwrap_or(false)
    }

    /// Answers the current single-choice step with `value`.
    ///
    /// `override_next` is the chosen option's own `next_step`; branching
    /// rules for the current step take precedence over it.
    pub fn select_option(
        &mut self,
        value: &str,
        override_next: Option<StepId>,
    ) -> Result<QuizState, NavigationError> {
        let current = self.state.current_step_id;
        let outcome = self
            .expect_kind(StepKind::SingleChoice)
            .and_then(|_| resolve_next(&self.rules, current, value, override_next));
        let destination = self.checked_destination(outcome)?;
        Ok(self.apply(Some(value), destination))
    }

    /// Answers the current step with the option whose value is `value`.
    pub fn choose(&mut self, value: &str) -> Result<QuizState, NavigationError> {
        let option = self
            .expect_kind(StepKind::SingleChoice)
            .and_then(|step| {
                step.find_option(value)
                    .ok_or_else(|| NavigationError::UnknownOption {
                        step: step.id,
                        value: value.to_string(),
                    })
            })
            .map(|option| (option.value.clone(), option.next_step));
        let (value, next_step) = self.logged(option)?;
        self.select_option(&value, next_step)
    }

    /// Answers the current step with its option at `index`.
    pub fn select_option_at(&mut self, index: usize) -> Result<QuizState, NavigationError> {
        let option = self
            .expect_kind(StepKind::SingleChoice)
            .and_then(|step| {
                step.options
                    .get(index)
                    .ok_or_else(|| NavigationError::UnknownOption {
                        step: step.id,
                        value: format!("#{index}"),
                    })
            })
            .map(|option| (option.value.clone(), option.next_step));
        let (value, next_step) = self.logged(option)?;
        self.select_option(&value, next_step)
    }

    /// Submits free text at the current text step. Blank text is rejected
    /// before any resolution happens.
    pub fn submit_text(&mut self, text: &str) -> Result<QuizState, NavigationError> {
        let trimmed = text.trim();
        let outcome = self.expect_kind(StepKind::TextInput).and_then(|step| {
            if trimmed.is_empty() {
                return Err(NavigationError::EmptyAnswer { step: step.id });
            }
            resolve_text_destination(step)
        });
        let destination = self.checked_destination(outcome)?;
        Ok(self.apply(Some(trimmed), destination))
    }

    fn expect_kind(&self, expected: StepKind) -> Result<&Step, NavigationError> {
        let step = self.current_step()?;
        if step.kind == expected {
            return Ok(step);
        }
        if step.is_terminal() {
            return Err(NavigationError::TerminalStep { step: step.id });
        }
        Err(NavigationError::UnexpectedStepKind {
            step: step.id,
            expected,
            actual: step.kind,
        })
    }

    fn checked_destination(
        &self,
        outcome: Result<StepId, NavigationError>,
    ) -> Result<StepId, NavigationError> {
        let destination = outcome.and_then(|destination| {
            self.flow.get_step(destination)?;
            Ok(destination)
        });
        self.logged(destination)
    }

    fn logged<T>(&self, outcome: Result<T, NavigationError>) -> Result<T, NavigationError> {
        if let Err(err) = &outcome {
            tracing::warn!(
                step = %self.state.current_step_id,
                error = %err,
                "navigation rejected"
            );
        }
        outcome
    }

    fn apply(&mut self, answer: Option<&str>, destination: StepId) -> QuizState {
        let next = self.state.advance(answer, destination);
        tracing::info!(
            from = %self.state.current_step_id,
            to = %destination,
            answered = answer.is_some(),
            "quiz advanced"
        );
        self.state = next.clone();
        next
    }
}
