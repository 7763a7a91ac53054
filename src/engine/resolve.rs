use super::NavigationError;
use crate::flow::{BranchRules, Step, StepId, StepKind};

/// Destination for `chosen_value` at `current`.
///
/// A matching branching rule wins over `option_override` (the option's own
/// `next_step`); with neither, the pair is a dead end. Pure: identical
/// arguments always yield the identical destination.
pub fn resolve_next(
    rules: &BranchRules,
    current: StepId,
    chosen_value: &str,
    option_override: Option<StepId>,
) -> Result<StepId, NavigationError> {
    rules
        .lookup(current, chosen_value)
        .or(option_override)
        .ok_or_else(|| NavigationError::NoDestination {
            step: current,
            value: chosen_value.to_string(),
        })
}

/// Destination of a text step, taken from its `next` option.
pub fn resolve_text_destination(step: &Step) -> Result<StepId, NavigationError> {
    if step.kind != StepKind::TextInput {
        return Err(NavigationError::UnexpectedStepKind {
            step: step.id,
            expected: StepKind::TextInput,
            actual: step.kind,
        });
    }
    step.text_destination()
        .ok_or(NavigationError::MissingTextDestination { step: step.id })
}
