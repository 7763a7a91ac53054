use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WEBHOOK_URL: &str = "https://www.n8n.conversanaweb.top/webhook/electi";
pub const DEFAULT_REDIRECT_URL: &str = "https://wa.link/3ddvr0";
pub const DEFAULT_TRANSITION_DELAY_MS: u64 = 300;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_FOOTER_BRAND: &str = "JP Digital";

pub const WEBHOOK_URL_ENV: &str = "QUIZFUNNEL_WEBHOOK_URL";
pub const REDIRECT_URL_ENV: &str = "QUIZFUNNEL_REDIRECT_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub webhook_url: String,
    pub redirect_url: String,
    pub transition_delay_ms: u64,
    pub request_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow_path: Option<PathBuf>,
    pub footer_brand: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.to_string(),
            redirect_url: DEFAULT_REDIRECT_URL.to_string(),
            transition_delay_ms: DEFAULT_TRANSITION_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            flow_path: None,
            footer_brand: DEFAULT_FOOTER_BRAND.to_string(),
        }
    }
}

fn validate_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::Settings(format!(
        "`{field}` must be an http(s) url, got `{value}`"
    )))
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_url("webhook_url", &self.webhook_url)?;
        validate_url("redirect_url", &self.redirect_url)?;
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Settings(
                "`request_timeout_secs` must be greater than 0".to_string(),
            ));
        }
        if let Some(path) = &self.flow_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Settings(
                    "`flow_path` must be non-empty when set".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Applies `QUIZFUNNEL_*` overrides, reading values through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(WEBHOOK_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.webhook_url = url.trim().to_string();
        }
        if let Some(url) = lookup(REDIRECT_URL_ENV).filter(|value| !value.trim().is_empty()) {
            self.redirect_url = url.trim().to_string();
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn transition_delay(&self) -> Duration {
        Duration::from_millis(self.transition_delay_ms)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(ConfigError::Encode)
    }
}
