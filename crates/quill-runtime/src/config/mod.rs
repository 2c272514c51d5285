//! Configuration module for the Quill runtime.
//!
//! TOML-based configuration loading for predictor selection, the settings
//! directory, and logging options.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config};
pub use schema::{LogFormat, LogLevel, LogOutput, LoggingConfig, PredictorConfig, QuillConfig};
