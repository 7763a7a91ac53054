use crate::config::ConfigError;
use std::path::PathBuf;

pub const STATE_DIR: &str = ".quizfunnel";
pub const SETTINGS_FILE_NAME: &str = "config.yaml";
pub const LOG_FILE_NAME: &str = "quizfunnel.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatePaths {
    pub root: PathBuf,
}

impl StatePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_home() -> Result<Self, ConfigError> {
        let home = std::env::var_os("HOME").ok_or(ConfigError::HomeDirectoryUnavailable)?;
        Ok(Self::new(PathBuf::from(home).join(STATE_DIR)))
    }

    pub fn settings_file(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE_NAME)
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_path(&self) -> PathBuf {
        self.logs_dir().join(LOG_FILE_NAME)
    }
}
