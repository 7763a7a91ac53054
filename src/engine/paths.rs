use super::resolve::{resolve_next, resolve_text_destination};
use super::NavigationError;
use crate::flow::{BranchRules, FlowDefinition, StepId, StepKind};

/// Placeholder answer recorded for text steps while enumerating routes.
pub const TEXT_ANSWER_PLACEHOLDER: &str = "<text>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPath {
    pub answers: Vec<(StepId, String)>,
    pub terminal: StepId,
}

impl QuizPath {
    pub fn steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.answers
            .iter()
            .map(|(step, _)| *step)
            .chain(std::iter::once(self.terminal))
    }
}

/// Every answer sequence that leads from START to a terminal step, resolved
/// the same way a session would resolve it. Routes that would revisit a
/// step already on the route are cut off.
pub fn enumerate_paths(
    flow: &FlowDefinition,
    rules: &BranchRules,
) -> Result<Vec<QuizPath>, NavigationError> {
    let mut out = Vec::new();
    let mut trail = Vec::new();
    walk(flow, rules, StepId::Start, &mut trail, &mut out)?;
    Ok(out)
}

fn walk(
    flow: &FlowDefinition,
    rules: &BranchRules,
    current: StepId,
    trail: &mut Vec<(StepId, String)>,
    out: &mut Vec<QuizPath>,
) -> Result<(), NavigationError> {
    if trail.iter().any(|(step, _)| *step == current) {
        return Ok(());
    }
    let step = flow.get_step(current)?;
    let branches = match step.kind {
        StepKind::Info => {
            out.push(QuizPath {
                answers: trail.clone(),
                terminal: current,
            });
            return Ok(());
        }
        StepKind::TextInput => vec![(
            TEXT_ANSWER_PLACEHOLDER.to_string(),
            resolve_text_destination(step)?,
        )],
        StepKind::SingleChoice => step
            .options
            .iter()
            .map(|option| {
                resolve_next(rules, current, &option.value, option.next_step)
                    .map(|destination| (option.value.clone(), destination))
            })
            .collect::<Result<Vec<_>, _>>()?,
    };
    for (answer, destination) in branches {
        trail.push((current, answer));
        walk(flow, rules, destination, trail, out)?;
        trail.pop();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_flow_routes_all_end_at_results() {
        let paths =
            enumerate_paths(&FlowDefinition::builtin(), &BranchRules::builtin()).expect("paths");
        assert!(!paths.is_empty());
        for path in &paths {
            assert!(matches!(
                path.terminal,
                StepId::ResultElecti | StepId::ResultCalendly
            ));
            assert_eq!(path.answers[0].0, StepId::Start);
        }
    }

    #[test]
    fn advanced_learner_route_passes_through_scaling_path() {
        let paths =
            enumerate_paths(&FlowDefinition::builtin(), &BranchRules::builtin()).expect("paths");
        let route = paths
            .iter()
            .find(|path| {
                path.answers.get(1) == Some(&(StepId::PathALevel, "advanced".to_string()))
            })
            .expect("advanced route");
        let steps = route.steps().collect::<Vec<_>>();
        assert_eq!(steps[2], StepId::PathBArea);
        assert_eq!(route.terminal, StepId::ResultCalendly);
    }

    #[test]
    fn hiring_route_records_text_placeholder() {
        let paths =
            enumerate_paths(&FlowDefinition::builtin(), &BranchRules::builtin()).expect("paths");
        let hire = paths
            .iter()
            .find(|path| path.answers[0].1 == "hire")
            .expect("hire route");
        assert_eq!(
            hire.answers[2],
            (StepId::PathCDesc, TEXT_ANSWER_PLACEHOLDER.to_string())
        );
    }

    #[test]
    fn path_count_matches_branching_of_builtin_flow() {
        // Scaling path: service -> 4 x 3, three product areas -> 4 x 4 each.
        // Reached from both "learn/advanced" and "scale".
        let scaling = 4 * 3 + 3 * 4 * 4;
        let expected = 3 * 5 + scaling + scaling + 4 * 4;
        let paths =
            enumerate_paths(&FlowDefinition::builtin(), &BranchRules::builtin()).expect("paths");
        assert_eq!(paths.len(), expected);
    }
}
