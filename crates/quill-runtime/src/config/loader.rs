//! Configuration loader using figment.
//!
//! Layered, lowest priority first:
//!
//! 1. Built-in defaults ([`QuillConfig::default`])
//! 2. `quill.toml` found in a search path (current directory, then the
//!    user config directory under `quill/`)
//! 3. Environment variables (`QUILL_*`, `__` as section separator)
//! 4. Programmatic overrides via [`ConfigLoader::merge`]
//!
//! # Environment Variable Mapping
//!
//! - `QUILL_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `QUILL_PREDICTOR__PREDICTION_WORD_COUNT=5` →
//!   `predictor.prediction_word_count = 5`
//!
//! # Example
//!
//! ```rust,ignore
//! use quill_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new().load()?;
//!
//! // Load from a specific file with env overrides
//! let config = ConfigLoader::new()
//!     .file("./config/quill.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use tracing::{debug, info, trace, warn};

use super::error::{ConfigError, ConfigResult};
use super::schema::QuillConfig;

/// Base name of the configuration file.
const CONFIG_FILE: &str = "quill.toml";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    /// Programmatic overrides, merged last.
    figment: Figment,
    /// Search paths for configuration files.
    search_paths: Vec<PathBuf>,
    /// Whether to load environment variables.
    load_env: bool,
    /// Specific config file to load (overrides search).
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Creates a new configuration loader with defaults.
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load.
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: QuillConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<QuillConfig> {
        let figment = self.build_figment()?;

        let config: QuillConfig = figment.extract().map_err(|e| {
            ConfigError::ParseError(format!("failed to extract configuration: {e}"))
        })?;

        debug!(
            logging_level = %config.logging.level,
            active_predictor = config.predictor.active.as_deref().unwrap_or("<none>"),
            "Configuration loaded successfully"
        );

        Ok(config)
    }

    /// Builds the figment instance with all sources.
    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(QuillConfig::default()));

        if let Some(path) = &self.config_file {
            if path.exists() {
                info!(path = %path.display(), "Loading configuration file");
                figment = figment.merge(Toml::file(path));
            } else {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
        } else {
            figment = self.search_config_files(figment);
        }

        if self.load_env {
            trace!("Loading environment variables with QUILL_ prefix");
            figment = figment.merge(Env::prefixed("QUILL_").split("__"));
        }

        // User's programmatic overrides win over everything else.
        let user_figment = std::mem::take(&mut self.figment);
        figment = figment.merge(user_figment);

        Ok(figment)
    }

    /// Resolves the effective list of search paths.
    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if self.search_paths.is_empty() {
            let mut paths = Vec::new();
            if let Ok(cwd) = std::env::current_dir() {
                paths.push(cwd);
            }
            if let Some(config_dir) = dirs::config_dir() {
                paths.push(config_dir.join("quill"));
            }
            paths
        } else {
            self.search_paths.clone()
        }
    }

    /// Searches for and loads the first `quill.toml` found.
    fn search_config_files(&self, mut figment: Figment) -> Figment {
        for search_path in self.resolve_search_paths() {
            let path = search_path.join(CONFIG_FILE);
            if path.exists() {
                info!(path = %path.display(), "Loading configuration file");
                figment = figment.merge(Toml::file(path));
                return figment;
            }
        }
        warn!("No configuration file found, using defaults");
        figment
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<QuillConfig> {
    ConfigLoader::new().load()
}

// =============================================================================
// Tests
// =============================================================================
