use super::{ConfigError, Settings, StatePaths};

/// Settings from `~/.quizfunnel/config.yaml` when present, defaults
/// otherwise, with env overrides applied and the result validated.
pub fn load_settings(paths: &StatePaths) -> Result<Settings, ConfigError> {
    let path = paths.settings_file();
    let mut settings = if path.exists() {
        Settings::from_path(&path)?
    } else {
        Settings::default()
    };
    settings.apply_env_overrides(|key| std::env::var(key).ok());
    settings.validate()?;
    Ok(settings)
}
