//! The word-prediction plugin contract.
//!
//! Every prediction extension (the no-op variant, statistical predictors,
//! third-party engines) implements the identical [`WordPredictor`] operation
//! set. Behavioral differences are expressed only through capability flags,
//! never through different method signatures, so the host can drive any
//! predictor through one code path.
//!
//! # Fault containment
//!
//! Nothing may escape a predictor as a panic or unhandled fault: a fault at
//! the plugin boundary is fatal to the host. Implementations catch their own
//! internal failures and translate them into the documented neutral
//! outcomes: an empty candidate list, `false`, or a skipped broadcast.
//! User-visible
//! behavior is always "no suggestions" or "feature unavailable", never a
//! crash.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use quill_core::{Descriptor, ExtensionInvoker};

use crate::context::ContextHandle;
use crate::mode::PredictionMode;
use crate::notify::{LetterProbabilities, ModeSubscriber, WordProbabilities};
use crate::request::{DEFAULT_MAX_RESULTS, PredictionRequest, PredictionResponse};

// =============================================================================
// Preferences
// =============================================================================

/// Configurable preferences shared by the bundled predictors.
///
/// Persisted as part of the settings round-trip. Predictors with nothing
/// configurable return `None` from the preference accessors instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorPreferences {
    /// Maximum number of candidates a prediction may return.
    pub prediction_word_count: usize,
    /// N-gram order used by statistical predictors.
    pub ngram: usize,
    /// Whether candidates containing punctuation are filtered out.
    pub filter_punctuations: bool,
}

impl Default for PredictorPreferences {
    fn default() -> Self {
        Self {
            prediction_word_count: DEFAULT_MAX_RESULTS,
            ngram: 3,
            filter_punctuations: true,
        }
    }
}

// =============================================================================
// Learn request tag
// =============================================================================

/// Tags a `learn` call with the granularity of the supplied text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearnKind {
    /// The text is a run of individual words.
    Words,
    /// The text is one or more complete sentences.
    Sentences,
}

// =============================================================================
// WordPredictor
// =============================================================================

/// The stateful word-prediction contract.
///
/// # State machine
///
/// Each instance owns a [`PredictionMode`]; `set_mode` transitions
/// unconditionally and synchronously notifies subscribers on the calling
/// thread before returning. Context handles are independent sub-lifecycles:
/// `load_context` mints a strictly increasing handle, `unload_context`
/// releases it, and operations against stale handles degrade to the empty
/// outcome.
///
/// # Synchronous vs. asynchronous prediction
///
/// `predict` always returns a complete [`PredictionResponse`] inline.
/// `predict_async` returns only an acceptance flag: `false` means no
/// completion will ever fire, `true` commits the predictor to delivering
/// exactly one completion on the channel returned by
/// [`subscribe_completions`](WordPredictor::subscribe_completions), from an
/// unspecified worker. There is no cancellation.
///
/// # Capability gating
///
/// `predict_sync` is only meaningful when
/// [`supports_sync_predict`](WordPredictor::supports_sync_predict) is `true`;
/// the guard is the caller's obligation and the reference implementations do
/// not self-guard. The same applies to the other capability flags.
pub trait WordPredictor: Send + Sync {
    /// The identity descriptor of this implementation.
    fn descriptor(&self) -> &Descriptor;

    /// The invocation bridge bound to this instance.
    ///
    /// Created with the instance; no other instance shares it.
    fn invoker(&self) -> Arc<ExtensionInvoker>;

    // ─── Capability flags ─────────────────────────────────────────────────

    /// Whether [`predict_sync`](WordPredictor::predict_sync) is supported.
    fn supports_sync_predict(&self) -> bool {
        false
    }

    /// Whether [`predict_async`](WordPredictor::predict_async) can ever
    /// accept a request.
    fn supports_async_predict(&self) -> bool {
        false
    }

    /// Whether [`learn`](WordPredictor::learn) does anything.
    fn supports_learning(&self) -> bool {
        false
    }

    /// Whether this predictor offers a preferences dialog.
    fn supports_preferences_dialog(&self) -> bool {
        false
    }

    // ─── Mode ─────────────────────────────────────────────────────────────

    /// The current prediction mode.
    fn mode(&self) -> PredictionMode;

    /// Sets the mode and synchronously notifies all subscribers before
    /// returning. No de-duplication.
    fn set_mode(&self, mode: PredictionMode);

    /// Subscribes to mode-change notifications.
    fn on_mode_changed(&self, subscriber: ModeSubscriber);

    // ─── Context handles ──────────────────────────────────────────────────

    /// Supplies document context and returns a fresh handle for it.
    fn load_context(&self, text: &str) -> ContextHandle;

    /// Releases any resources tied to `handle`. Stale handles are ignored.
    fn unload_context(&self, handle: ContextHandle);

    // ─── Prediction ───────────────────────────────────────────────────────

    /// Simple synchronous prediction; candidates are bounded by the
    /// configured word count. Empty output is valid.
    fn predict_sync(&self, prev_words: &str, last_fragment: &str) -> Vec<String>;

    /// Full synchronous prediction. Always succeeds; "no matches" is an
    /// empty candidate list, not an error.
    fn predict(&self, request: PredictionRequest) -> PredictionResponse;

    /// Defers a prediction. Returns immediately with only the acceptance
    /// flag; see the trait-level docs for the delivery contract.
    fn predict_async(&self, request: PredictionRequest) -> bool;

    /// Channel on which accepted asynchronous predictions complete.
    ///
    /// Delivery thread is unspecified; resynchronizing onto whatever thread
    /// must touch shared state is the host's job.
    fn subscribe_completions(&self) -> mpsc::UnboundedReceiver<PredictionResponse>;

    // ─── Advisory broadcasts ──────────────────────────────────────────────

    /// Optional next-letter probability broadcasts. The default
    /// implementation never emits; the returned receiver is already closed.
    fn subscribe_letter_probabilities(&self) -> mpsc::UnboundedReceiver<LetterProbabilities> {
        let (_tx, rx) = mpsc::unbounded_channel();
        rx
    }

    /// Optional next-word probability broadcasts. Same contract as
    /// [`subscribe_letter_probabilities`](WordPredictor::subscribe_letter_probabilities).
    fn subscribe_word_probabilities(&self) -> mpsc::UnboundedReceiver<WordProbabilities> {
        let (_tx, rx) = mpsc::unbounded_channel();
        rx
    }

    // ─── Learning ─────────────────────────────────────────────────────────

    /// Feeds text to the predictor's learning machinery. Best-effort:
    /// failure is non-fatal, and the call must not block indefinitely.
    fn learn(&self, text: &str, kind: LearnKind) -> bool;

    // ─── Preferences and settings ─────────────────────────────────────────

    /// Current preferences, or `None` when nothing is configurable.
    fn preferences(&self) -> Option<PredictorPreferences> {
        None
    }

    /// Factory-default preferences, or `None` when nothing is configurable.
    fn default_preferences(&self) -> Option<PredictorPreferences> {
        None
    }

    /// Loads this predictor's own configuration from `dir`. Returns `true`
    /// when there is nothing to load.
    fn load_settings(&self, dir: &Path) -> bool {
        let _ = dir;
        true
    }

    /// Persists this predictor's own configuration into `dir`. Returns
    /// `true` when there is nothing to persist.
    fn save_settings(&self, dir: &Path) -> bool {
        let _ = dir;
        true
    }
}
