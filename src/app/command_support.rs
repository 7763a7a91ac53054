use crate::config::{load_settings, ConfigError, Settings, StatePaths};
use crate::flow::{BranchRules, FlowDefinition, FlowError};
use crate::shared::{init_file_logging, RuntimeError};

/// Everything a command needs after startup: state paths, effective
/// settings and the validated flow.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub paths: StatePaths,
    pub settings: Settings,
    pub flow: FlowDefinition,
    pub rules: BranchRules,
}

impl AppContext {
    pub fn flow_source(&self) -> String {
        match &self.settings.flow_path {
            Some(path) => path.display().to_string(),
            None => "builtin".to_string(),
        }
    }
}

pub fn map_config_err(err: ConfigError) -> String {
    err.to_string()
}

pub fn map_flow_err(err: FlowError) -> String {
    err.to_string()
}

fn ensure_logging(paths: &StatePaths) -> Result<(), String> {
    match init_file_logging(paths) {
        // Already installed for this process.
        Ok(()) | Err(RuntimeError::Logging(_)) => Ok(()),
        Err(err) => Err(err.to_string()),
    }
}

pub fn load_context() -> Result<AppContext, String> {
    let paths = StatePaths::from_home().map_err(map_config_err)?;
    ensure_logging(&paths)?;
    let settings = load_settings(&paths).map_err(|err| {
        tracing::error!(error = %err, "failed to load settings");
        map_config_err(err)
    })?;
    let rules = BranchRules::builtin();
    let flow = FlowDefinition::load(settings.flow_path.as_deref(), &rules).map_err(map_flow_err)?;
    Ok(AppContext {
        paths,
        settings,
        flow,
        rules,
    })
}
