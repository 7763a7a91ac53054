use super::builtin::builtin_steps;
use super::validate::validate_flow;
use super::{BranchRules, FlowError, Step, StepId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FlowDocument {
    steps: Vec<Step>,
}

/// Immutable step graph. Lookups never mutate, so a definition can be shared
/// freely between readers once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDefinition {
    steps: BTreeMap<StepId, Step>,
    order: Vec<StepId>,
}

impl FlowDefinition {
    pub fn builtin() -> Self {
        let steps = builtin_steps();
        let order = steps.iter().map(|step| step.id).collect();
        Self {
            steps: steps.into_iter().map(|step| (step.id, step)).collect(),
            order,
        }
    }

    pub fn from_steps(steps: Vec<Step>) -> Result<Self, FlowError> {
        let mut by_id = BTreeMap::new();
        let mut order = Vec::with_capacity(steps.len());
        for step in steps {
            let id = step.id;
            if by_id.insert(id, step).is_some() {
                return Err(FlowError::Validation(format!(
                    "step `{id}` is defined more than once"
                )));
            }
            order.push(id);
        }
        Ok(Self {
            steps: by_id,
            order,
        })
    }

    pub fn from_yaml_str(raw: &str, origin: &str) -> Result<Self, FlowError> {
        let document: FlowDocument =
            serde_yaml::from_str(raw).map_err(|source| FlowError::Parse {
                path: origin.to_string(),
                source,
            })?;
        Self::from_steps(document.steps)
    }

    pub fn from_path(path: &Path) -> Result<Self, FlowError> {
        let raw = fs::read_to_string(path).map_err(|source| FlowError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&raw, &path.display().to_string())
    }

    /// Loads the flow at `path` (or the built-in flow) and checks it against
    /// `rules` before handing it out.
    pub fn load(path: Option<&Path>, rules: &BranchRules) -> Result<Self, FlowError> {
        let flow = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::builtin(),
        };
        if let Err(err) = validate_flow(&flow, rules) {
            tracing::error!(error = %err, "flow definition rejected");
            return Err(err);
        }
        Ok(flow)
    }

    pub fn get_step(&self, id: StepId) -> Result<&Step, FlowError> {
        self.steps.get(&id).ok_or(FlowError::UnknownStep { step: id })
    }

    pub fn contains(&self, id: StepId) -> bool {
        self.steps.contains_key(&id)
    }

    /// Steps in authoring order.
    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.order.iter().filter_map(|id| self.steps.get(id))
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn to_yaml(&self) -> Result<String, FlowError> {
        let document = FlowDocument {
            steps: self.steps().cloned().collect(),
        };
        serde_yaml::to_string(&document).map_err(FlowError::Encode)
    }
}
