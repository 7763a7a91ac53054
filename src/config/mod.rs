pub mod error;
pub mod load;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use load::load_settings;
pub use paths::{StatePaths, LOG_FILE_NAME, SETTINGS_FILE_NAME, STATE_DIR};
pub use settings::{
    Settings, DEFAULT_FOOTER_BRAND, DEFAULT_REDIRECT_URL, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_TRANSITION_DELAY_MS, DEFAULT_WEBHOOK_URL, REDIRECT_URL_ENV, WEBHOOK_URL_ENV,
};
