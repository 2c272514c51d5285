//! # Quill Runtime
//!
//! Host orchestration for the Quill plugin runtime.
//!
//! This crate wires the core contracts together on the host side:
//!
//! - **Registry** ([`PredictorRegistry`]): reads the link-time registration
//!   slice, validates descriptors, and instantiates predictors by id.
//!   Registration problems are logged and skipped, never fatal.
//! - **Host** ([`PredictionHost`]): owns the active predictor, applies
//!   configuration through the invocation bridge, and drives the settings
//!   round-trip. Falls back to the null predictor when the configured choice
//!   is unavailable.
//! - **Completion routing** ([`CompletionSink`], [`spawn_completion_pump`]):
//!   moves asynchronous prediction completions from the predictor's worker
//!   back onto the host's terms.
//! - **Configuration** ([`config`]): figment-layered TOML + environment
//!   loading.
//! - **Logging** ([`logging`]): tracing-subscriber setup from configuration.
//!
//! ## Example
//!
//! ```rust,ignore
//! use quill_runtime::config::load_config;
//! use quill_runtime::{PredictionHost, logging};
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let host = PredictionHost::from_config(&config)?;
//! let active = host.active();
//! let words = active.predictor.predict_sync("hello", "wo");
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod logging;
pub mod registry;

pub use dispatch::{CompletionSink, spawn_completion_pump};
pub use error::{RegistryError, RegistryResult, RuntimeError, RuntimeResult};
pub use host::PredictionHost;
pub use registry::{ActivePredictor, PredictorRegistry};
