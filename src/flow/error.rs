use super::StepId;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("step `{step}` is not defined in the flow")]
    UnknownStep { step: StepId },
    #[error("flow validation failed: {0}")]
    Validation(String),
    #[error("failed to read flow file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in flow file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to encode flow as yaml: {0}")]
    Encode(#[source] serde_yaml::Error),
}
