//! # Quill Predict
//!
//! The word-prediction plugin contract for the Quill runtime, plus the
//! bundled reference predictors.
//!
//! ## The contract
//!
//! Every prediction extension implements [`WordPredictor`]: one operation
//! set for the no-op variant, statistical predictors, and third-party
//! engines alike. Behavioral differences are expressed only through
//! capability flags. The contract covers:
//!
//! - **Mode** ([`PredictionMode`]): word vs. sentence granularity; every
//!   `set_mode` notifies synchronously on the calling thread.
//! - **Context handles** ([`ContextHandle`]): opaque, strictly increasing,
//!   never reused; stale handles degrade to the empty outcome.
//! - **Prediction** ([`PredictionRequest`] / [`PredictionResponse`]):
//!   synchronous calls return inline; `predict_async` returns only an
//!   acceptance flag, and accepted requests complete exactly once on a
//!   channel from an unspecified worker.
//! - **Learning, preferences, settings**: best-effort learning and a
//!   load/save-by-directory settings round-trip.
//!
//! ## Registration
//!
//! Implementations register link-time via
//! [`register_predictor!`](crate::register_predictor); the registry in
//! quill-runtime discovers them from the
//! [`WORD_PREDICTORS`](registration::WORD_PREDICTORS) slice.

pub mod builtin;
pub mod context;
pub mod mode;
pub mod notify;
pub mod predictor;
pub mod registration;
pub mod request;

pub use builtin::{FrequencyPredictor, NullPredictor};
pub use context::{ContextHandle, HandleMinter};
pub use mode::PredictionMode;
pub use notify::{Fanout, LetterProbabilities, ModeNotifier, ModeSubscriber, WordProbabilities};
pub use predictor::{LearnKind, PredictorPreferences, WordPredictor};
pub use registration::{PredictorRegistration, WORD_PREDICTORS};
pub use request::{DEFAULT_MAX_RESULTS, PredictionRequest, PredictionResponse};

// ─── Macro-internal re-export (needed by register_predictor! at call sites) ──
#[doc(hidden)]
pub use linkme;
