use super::RuntimeError;
use crate::config::StatePaths;
use std::fs;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "QUIZFUNNEL_LOG";
const DEFAULT_LOG_FILTER: &str = "info";

pub fn log_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Routes `tracing` output to `<state_root>/logs/quizfunnel.log`. The
/// terminal stays reserved for the quiz screens and command output.
pub fn init_file_logging(paths: &StatePaths) -> Result<(), RuntimeError> {
    let logs_dir = paths.logs_dir();
    fs::create_dir_all(&logs_dir).map_err(|source| RuntimeError::CreateDir {
        path: logs_dir.display().to_string(),
        source,
    })?;
    let log_path = paths.log_path();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .map_err(|source| RuntimeError::OpenLog {
            path: log_path.display().to_string(),
            source,
        })?;
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| RuntimeError::Logging(err.to_string()))
}
