//! Static description of the quiz graph: step identifiers, step descriptors,
//! the branching rule table, and load-time validation.

pub mod branching;
mod builtin;
pub mod definition;
pub mod error;
pub mod model;
pub mod step_id;
pub mod validate;

pub use branching::{BranchRule, BranchRules};
pub use definition::FlowDefinition;
pub use error::FlowError;
pub use model::{Step, StepKind, StepOption, TEXT_SUBMIT_VALUE};
pub use step_id::{StepId, ALL_STEP_IDS};
pub use validate::validate_flow;
