use super::StepId;

/// A `(step, value) -> destination` override consulted before an option's
/// own `next_step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BranchRule {
    pub step: StepId,
    pub value: &'static str,
    pub destination: StepId,
}

impl BranchRule {
    pub const fn new(step: StepId, value: &'static str, destination: StepId) -> Self {
        Self {
            step,
            value,
            destination,
        }
    }
}

// "advanced" on the learning path lands in the scaling path on purpose.
const BUILTIN_RULES: [BranchRule; 5] = [
    BranchRule::new(StepId::Start, "learn", StepId::PathALevel),
    BranchRule::new(StepId::PathALevel, "zero", StepId::PathAInterest),
    BranchRule::new(StepId::PathALevel, "beginner", StepId::PathAInterest),
    BranchRule::new(StepId::PathALevel, "intermediate", StepId::PathAInterest),
    BranchRule::new(StepId::PathALevel, "advanced", StepId::PathBArea),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRules {
    rules: Vec<BranchRule>,
}

impl BranchRules {
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES.to_vec(),
        }
    }

    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// First rule matching `(step, value)`, in table order.
    pub fn lookup(&self, step: StepId, value: &str) -> Option<StepId> {
        self.rules
            .iter()
            .find(|rule| rule.step == step && rule.value == value)
            .map(|rule| rule.destination)
    }

    pub fn rules(&self) -> &[BranchRule] {
        &self.rules
    }

    pub fn for_step(&self, step: StepId) -> impl Iterator<Item = &BranchRule> {
        self.rules.iter().filter(move |rule| rule.step == step)
    }
}

impl Default for BranchRules {
    fn default() -> Self {
        Self::builtin()
    }
}
