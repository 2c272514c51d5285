//! Configuration schema for the Quill runtime.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use quill_predict::DEFAULT_MAX_RESULTS;

// =============================================================================
// Top-level config
// =============================================================================

/// Root configuration for the Quill runtime.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuillConfig {
    /// Logging configuration.
    pub logging: LoggingConfig,
    /// Predictor selection and behavior.
    pub predictor: PredictorConfig,
}

// =============================================================================
// Predictor section
// =============================================================================

/// Predictor selection and behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Id of the predictor to activate. Stored as the descriptor's UUID
    /// string so the reference survives renames of the implementation.
    /// `None` (or an unknown id) falls back to the null predictor.
    pub active: Option<String>,

    /// Directory handed to the active predictor for its settings
    /// round-trip.
    pub settings_dir: PathBuf,

    /// Candidate bound pushed to the active predictor at startup.
    pub prediction_word_count: usize,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            active: None,
            settings_dir: default_settings_dir(),
            prediction_word_count: DEFAULT_MAX_RESULTS,
        }
    }
}

fn default_settings_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("quill"))
        .unwrap_or_else(|| PathBuf::from("quill-settings"))
}

// =============================================================================
// Logging section
// =============================================================================

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level emitted.
    pub level: LogLevel,
    /// Formatter layout.
    pub format: LogFormat,
    /// Destination for log output.
    pub output: LogOutput,
    /// Log file path, used when `output` is [`LogOutput::File`].
    pub file_path: Option<PathBuf>,
    /// Include thread ids in log lines.
    pub thread_ids: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            output: LogOutput::Stdout,
            file_path: None,
            thread_ids: false,
        }
    }
}

/// Minimum log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// The level name in lowercase, as used in filter directives.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Converts to the `tracing` level.
    pub fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formatter layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Full,
    Pretty,
}

/// Log output destination.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    #[default]
    Stdout,
    Stderr,
    File,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = QuillConfig::default();
        assert_eq!(config.logging.level, LogLevel::Info);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.predictor.active.is_none());
        assert_eq!(
            config.predictor.prediction_word_count,
            DEFAULT_MAX_RESULTS
        );
    }

    #[test]
    fn test_level_round_trip() {
        assert_eq!(LogLevel::Debug.as_str(), "debug");
        assert_eq!(LogLevel::Warn.to_tracing_level(), tracing::Level::WARN);
        let parsed: LogLevel = serde_json::from_str("\"error\"").unwrap();
        assert_eq!(parsed, LogLevel::Error);
    }
}
