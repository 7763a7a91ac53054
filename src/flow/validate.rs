use super::{BranchRules, FlowDefinition, FlowError, Step, StepId, StepKind, TEXT_SUBMIT_VALUE};
use std::collections::{BTreeSet, HashSet};

/// Checks referential closure, reachability from START, and the per-kind
/// option invariants. Every violation is reported, not just the first.
pub fn validate_flow(flow: &FlowDefinition, rules: &BranchRules) -> Result<(), FlowError> {
    let mut problems = Vec::new();

    if !flow.contains(StepId::Start) {
        problems.push(format!("entry step `{}` is missing", StepId::Start));
    }

    for step in flow.steps() {
        match step.kind {
            StepKind::SingleChoice => check_single_choice(flow, rules, step, &mut problems),
            StepKind::TextInput => check_text_input(flow, step, &mut problems),
            StepKind::Info => check_info(step, &mut problems),
        }
    }

    for rule in rules.rules() {
        let Ok(step) = flow.get_step(rule.step) else {
            continue;
        };
        // Rules only apply while their step still offers the value.
        if step.find_option(rule.value).is_some() && !flow.contains(rule.destination) {
            problems.push(format!(
                "branching rule `{}`/`{}` targets undefined step `{}`",
                rule.step, rule.value, rule.destination
            ));
        }
    }

    if flow.contains(StepId::Start) {
        let reachable = reachable_steps(flow, rules);
        for step in flow.steps() {
            if !reachable.contains(&step.id) {
                problems.push(format!("step `{}` is unreachable from START", step.id));
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(FlowError::Validation(problems.join("; ")))
    }
}

fn check_single_choice(
    flow: &FlowDefinition,
    rules: &BranchRules,
    step: &Step,
    problems: &mut Vec<String>,
) {
    if step.options.is_empty() {
        problems.push(format!("single_choice step `{}` has no options", step.id));
        return;
    }
    let mut seen = HashSet::new();
    for option in &step.options {
        if !seen.insert(option.value.as_str()) {
            problems.push(format!(
                "step `{}` repeats option value `{}`",
                step.id, option.value
            ));
        }
        match option.next_step {
            Some(next) if !flow.contains(next) => problems.push(format!(
                "option `{}` on step `{}` targets undefined step `{next}`",
                option.value, step.id
            )),
            Some(_) => {}
            None if rules.lookup(step.id, &option.value).is_none() => problems.push(format!(
                "option `{}` on step `{}` has no destination",
                option.value, step.id
            )),
            None => {}
        }
    }
}

fn check_text_input(flow: &FlowDefinition, step: &Step, problems: &mut Vec<String>) {
    let [option] = step.options.as_slice() else {
        problems.push(format!(
            "text_input step `{}` must have exactly one option",
            step.id
        ));
        return;
    };
    if option.value != TEXT_SUBMIT_VALUE {
        problems.push(format!(
            "text_input step `{}` option value must be `{TEXT_SUBMIT_VALUE}`",
            step.id
        ));
    }
    match option.next_step {
        Some(next) if !flow.contains(next) => problems.push(format!(
            "text_input step `{}` targets undefined step `{next}`",
            step.id
        )),
        Some(_) => {}
        None => problems.push(format!(
            "text_input step `{}` has no destination",
            step.id
        )),
    }
}

fn check_info(step: &Step, problems: &mut Vec<String>) {
    if !step.options.is_empty() {
        problems.push(format!("info step `{}` must not define options", step.id));
    }
    if step.cta_text.as_deref().unwrap_or_default().trim().is_empty() {
        problems.push(format!("info step `{}` has no cta_text", step.id));
    }
}

/// Successors of a step, as the engine would resolve them.
pub(crate) fn successors(step: &Step, rules: &BranchRules) -> Vec<StepId> {
    let mut out = Vec::new();
    for option in &step.options {
        let destination = match step.kind {
            StepKind::SingleChoice => rules.lookup(step.id, &option.value).or(option.next_step),
            StepKind::TextInput if option.value == TEXT_SUBMIT_VALUE => option.next_step,
            _ => None,
        };
        if let Some(destination) = destination {
            if !out.contains(&destination) {
                out.push(destination);
            }
        }
    }
    out
}

fn reachable_steps(flow: &FlowDefinition, rules: &BranchRules) -> BTreeSet<StepId> {
    let mut visited = BTreeSet::new();
    let mut pending = vec![StepId::Start];
    while let Some(id) = pending.pop() {
        if !visited.insert(id) {
            continue;
        }
        let Ok(step) = flow.get_step(id) else {
            continue;
        };
        pending.extend(successors(step, rules));
    }
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::StepOption;

    fn steps_without(id: StepId) -> Vec<Step> {
        FlowDefinition::builtin()
            .steps()
            .filter(|step| step.id != id)
            .cloned()
            .collect()
    }

    #[test]
    fn builtin_flow_is_valid() {
        validate_flow(&FlowDefinition::builtin(), &BranchRules::builtin())
            .expect("builtin flow validates");
    }

    #[test]
    fn builtin_flow_needs_its_branching_rules() {
        let err = validate_flow(&FlowDefinition::builtin(), &BranchRules::empty())
            .expect_err("learn option has no destination without rules");
        let text = err.to_string();
        assert!(text.contains("option `learn` on step `START` has no destination"));
        assert!(text.contains("option `zero` on step `PATH_A_LEVEL` has no destination"));
    }

    #[test]
    fn dangling_destination_is_reported() {
        let flow =
            FlowDefinition::from_steps(steps_without(StepId::PathCRevenue)).expect("flow");
        let err = validate_flow(&flow, &BranchRules::builtin()).expect_err("dangling");
        assert!(err
            .to_string()
            .contains("text_input step `PATH_C_DESC` targets undefined step `PATH_C_REVENUE`"));
    }

    #[test]
    fn unreachable_step_is_reported() {
        let mut steps = FlowDefinition::builtin().steps().cloned().collect::<Vec<_>>();
        for step in &mut steps {
            if step.id == StepId::Start {
                step.options.retain(|option| option.value != "hire");
            }
        }
        let flow = FlowDefinition::from_steps(steps).expect("flow");
        let err = validate_flow(&flow, &BranchRules::builtin()).expect_err("unreachable");
        let text = err.to_string();
        assert!(text.contains("step `PATH_C_AREA` is unreachable from START"));
        assert!(text.contains("step `PATH_C_DESC` is unreachable from START"));
    }

    #[test]
    fn text_input_must_carry_single_next_option() {
        let mut steps = FlowDefinition::builtin().steps().cloned().collect::<Vec<_>>();
        for step in &mut steps {
            if step.id == StepId::PathCDesc {
                step.options = vec![StepOption::new(
                    "Continuar",
                    "continue",
                    Some(StepId::PathCRevenue),
                )];
            }
        }
        let flow = FlowDefinition::from_steps(steps).expect("flow");
        let err = validate_flow(&flow, &BranchRules::builtin()).expect_err("bad sentinel");
        assert!(err
            .to_string()
            .contains("text_input step `PATH_C_DESC` option value must be `next`"));
    }

    #[test]
    fn info_steps_require_cta_and_no_options() {
        let mut steps = FlowDefinition::builtin().steps().cloned().collect::<Vec<_>>();
        for step in &mut steps {
            if step.id == StepId::ResultElecti {
                step.cta_text = None;
                step.options = vec![StepOption::new("x", "x", Some(StepId::Start))];
            }
        }
        let flow = FlowDefinition::from_steps(steps).expect("flow");
        let text = validate_flow(&flow, &BranchRules::builtin())
            .expect_err("bad info")
            .to_string();
        assert!(text.contains("info step `RESULT_ELECTI` must not define options"));
        assert!(text.contains("info step `RESULT_ELECTI` has no cta_text"));
    }

    #[test]
    fn missing_start_is_reported() {
        let flow = FlowDefinition::from_steps(steps_without(StepId::Start)).expect("flow");
        let err = validate_flow(&flow, &BranchRules::builtin()).expect_err("no start");
        assert!(err.to_string().contains("entry step `START` is missing"));
    }

    fn result_step() -> Step {
        FlowDefinition::builtin()
            .get_step(StepId::ResultCalendly)
            .expect("result")
            .clone()
    }

    fn start_with(options: Vec<StepOption>) -> Step {
        let mut start = FlowDefinition::builtin()
            .get_step(StepId::Start)
            .expect("start")
            .clone();
        start.options = options;
        start
    }

    #[test]
    fn rules_for_absent_options_are_inactive() {
        let flow = FlowDefinition::from_steps(vec![
            start_with(vec![StepOption::new(
                "Escalar",
                "scale",
                Some(StepId::ResultCalendly),
            )]),
            result_step(),
        ])
        .expect("flow");
        validate_flow(&flow, &BranchRules::builtin()).expect("small flow validates");
    }

    #[test]
    fn rule_targeting_missing_step_is_reported() {
        let flow = FlowDefinition::from_steps(vec![
            start_with(vec![
                StepOption::new("Aprender", "learn", None),
                StepOption::new("Escalar", "scale", Some(StepId::ResultCalendly)),
            ]),
            result_step(),
        ])
        .expect("flow");
        let err = validate_flow(&flow, &BranchRules::builtin()).expect_err("dangling rule");
        assert!(err
            .to_string()
            .contains("branching rule `START`/`learn` targets undefined step `PATH_A_LEVEL`"));
    }

    #[test]
    fn successors_prefer_branching_rules() {
        let flow = FlowDefinition::builtin();
        let level = flow.get_step(StepId::PathALevel).expect("level");
        assert_eq!(
            successors(level, &BranchRules::builtin()),
            vec![StepId::PathAInterest, StepId::PathBArea]
        );
        let result = flow.get_step(StepId::ResultCalendly).expect("result");
        assert!(successors(result, &BranchRules::builtin()).is_empty());
    }
}
