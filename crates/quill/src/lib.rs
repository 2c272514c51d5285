//! # Quill
//!
//! An extensible plugin runtime for assistive writing aids.
//!
//! Quill identifies interchangeable components (word predictors today;
//! agents and scanners follow the same pattern) by stable descriptor id
//! rather than static type, manipulates them through a late-bound invocation
//! bridge, and drives the stateful word-prediction contract: context
//! lifetimes, synchronous and asynchronous prediction, mode switching, and
//! learning.
//!
//! This facade re-exports the three layers:
//!
//! - [`quill_core`]: descriptors and the invocation bridge
//! - [`quill_predict`]: the predictor contract and bundled predictors
//! - [`quill_runtime`]: registry, host, completion routing, config, logging
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use quill::prelude::*;
//! use quill::quill_runtime::config::load_config;
//! use quill::quill_runtime::logging;
//!
//! let config = load_config()?;
//! logging::init_from_config(&config.logging);
//!
//! let host = PredictionHost::from_config(&config)?;
//! let active = host.active();
//!
//! let response = active.predictor.predict(PredictionRequest::new("hello", "wo"));
//! for candidate in &response.candidates {
//!     println!("{candidate}");
//! }
//! ```

pub use quill_core;
pub use quill_predict;
pub use quill_runtime;

pub use quill_core::{Descriptor, ExtensionInvoker, InvokeError, InvokerBuilder};
pub use quill_predict::{
    ContextHandle, FrequencyPredictor, LearnKind, NullPredictor, PredictionMode,
    PredictionRequest, PredictionResponse, PredictorPreferences, WordPredictor,
};
pub use quill_runtime::{
    ActivePredictor, CompletionSink, PredictionHost, PredictorRegistry, spawn_completion_pump,
};

/// Prelude for common imports.
pub mod prelude {
    pub use quill_core::{Descriptor, ExtensionInvoker, InvokeError, InvokerBuilder};
    pub use quill_predict::{
        ContextHandle, LearnKind, PredictionMode, PredictionRequest, PredictionResponse,
        WordPredictor,
    };
    pub use quill_runtime::{
        ActivePredictor, CompletionSink, PredictionHost, PredictorRegistry,
        spawn_completion_pump,
    };
}
