//! Application glue module
//!
//! Configuration and logging setup.

mod config;
mod logging;

pub use config::{default_config_path, Config, ConfigError};
pub use logging::init_logging;
