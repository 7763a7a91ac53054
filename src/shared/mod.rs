pub mod errors;
pub mod logging;

pub use errors::RuntimeError;
pub use logging::{init_file_logging, LOG_FILTER_ENV};
