//! The null word predictor.
//!
//! Does nothing, on purpose. Used where no real predictor is currently
//! valid, and as the baseline against which every other predictor's contract
//! conformance is tested: empty candidates are still final successes, async
//! requests are never accepted, learning always "succeeds", and mode changes
//! still notify.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

use quill_core::{Descriptor, ExtensionInvoker, InvokerBuilder};

use crate::context::{ContextHandle, HandleMinter};
use crate::mode::PredictionMode;
use crate::notify::{Fanout, ModeNotifier, ModeSubscriber};
use crate::predictor::{LearnKind, WordPredictor};
use crate::request::{DEFAULT_MAX_RESULTS, PredictionRequest, PredictionResponse};

/// State shared between a [`NullPredictor`] and its invoker closures.
struct Shared {
    mode: Mutex<PredictionMode>,
    mode_changed: ModeNotifier,
    prediction_word_count: AtomicUsize,
    ngram: AtomicUsize,
    filter_punctuations: AtomicBool,
}

impl Shared {
    fn set_mode(&self, mode: PredictionMode) {
        *self.mode.lock() = mode;
        self.mode_changed.notify(mode);
    }
}

/// The no-op reference predictor.
pub struct NullPredictor {
    descriptor: Descriptor,
    shared: Arc<Shared>,
    handles: HandleMinter,
    completions: Fanout<PredictionResponse>,
    invoker: Arc<ExtensionInvoker>,
}

impl NullPredictor {
    /// Stable identity of the null predictor.
    pub const ID: &'static str = "7c1f6f36-94b5-4f4a-9c58-0d3a2e6f1b77";

    /// Creates an instance with its own invocation bridge.
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            mode: Mutex::new(PredictionMode::Sentence),
            mode_changed: ModeNotifier::new(),
            prediction_word_count: AtomicUsize::new(DEFAULT_MAX_RESULTS),
            ngram: AtomicUsize::new(0),
            filter_punctuations: AtomicBool::new(false),
        });
        Self {
            descriptor: Descriptor::new(
                Self::ID,
                "Null Word Predictor",
                "Word Predictors",
                "Disable word prediction",
            ),
            invoker: Arc::new(build_invoker(&shared)),
            shared,
            handles: HandleMinter::with_seed(1),
            completions: Fanout::new(),
        }
    }
}

impl Default for NullPredictor {
    fn default() -> Self {
        Self::new()
    }
}

fn build_invoker(shared: &Arc<Shared>) -> ExtensionInvoker {
    let count_get = Arc::clone(shared);
    let count_set = Arc::clone(shared);
    let ngram_get = Arc::clone(shared);
    let ngram_set = Arc::clone(shared);
    let filter_get = Arc::clone(shared);
    let filter_set = Arc::clone(shared);
    let mode_get = Arc::clone(shared);
    let mode_set = Arc::clone(shared);

    InvokerBuilder::new()
        .property(
            "prediction_word_count",
            move || Value::from(count_get.prediction_word_count.load(Ordering::Relaxed)),
            move |v| {
                let n = v.as_u64().ok_or("expected an unsigned integer")?;
                count_set
                    .prediction_word_count
                    .store(n as usize, Ordering::Relaxed);
                Ok(())
            },
        )
        .property(
            "ngram",
            move || Value::from(ngram_get.ngram.load(Ordering::Relaxed)),
            move |v| {
                let n = v.as_u64().ok_or("expected an unsigned integer")?;
                ngram_set.ngram.store(n as usize, Ordering::Relaxed);
                Ok(())
            },
        )
        .property(
            "filter_punctuations",
            move || Value::from(filter_get.filter_punctuations.load(Ordering::Relaxed)),
            move |v| {
                let b = v.as_bool().ok_or("expected a boolean")?;
                filter_set.filter_punctuations.store(b, Ordering::Relaxed);
                Ok(())
            },
        )
        .property(
            "mode",
            move || Value::from(mode_get.mode.lock().to_string()),
            move |v| {
                let s = v.as_str().ok_or("expected a string")?;
                let mode = s.parse::<PredictionMode>()?;
                mode_set.set_mode(mode);
                Ok(())
            },
        )
        .build()
}

impl WordPredictor for NullPredictor {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn invoker(&self) -> Arc<ExtensionInvoker> {
        Arc::clone(&self.invoker)
    }

    fn supports_sync_predict(&self) -> bool {
        true
    }

    fn mode(&self) -> PredictionMode {
        *self.shared.mode.lock()
    }

    fn set_mode(&self, mode: PredictionMode) {
        self.shared.set_mode(mode);
    }

    fn on_mode_changed(&self, subscriber: ModeSubscriber) {
        self.shared.mode_changed.subscribe(subscriber);
    }

    fn load_context(&self, _text: &str) -> ContextHandle {
        self.handles.mint()
    }

    fn unload_context(&self, _handle: ContextHandle) {}

    fn predict_sync(&self, _prev_words: &str, _last_fragment: &str) -> Vec<String> {
        Vec::new()
    }

    fn predict(&self, request: PredictionRequest) -> PredictionResponse {
        PredictionResponse::empty(request)
    }

    fn predict_async(&self, _request: PredictionRequest) -> bool {
        false
    }

    fn subscribe_completions(&self) -> mpsc::UnboundedReceiver<PredictionResponse> {
        self.completions.subscribe()
    }

    /// Doesn't learn anything, but reports success.
    fn learn(&self, _text: &str, _kind: LearnKind) -> bool {
        true
    }
}

fn create() -> Arc<dyn WordPredictor> {
    Arc::new(NullPredictor::new())
}

crate::register_predictor! {
    id: "7c1f6f36-94b5-4f4a-9c58-0d3a2e6f1b77",
    name: "Null Word Predictor",
    category: "Word Predictors",
    description: "Disable word prediction",
    create: create,
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_predictions_are_empty_and_final() {
        let predictor = NullPredictor::new();
        assert!(predictor.supports_sync_predict());
        assert!(predictor.predict_sync("", "").is_empty());

        let request = PredictionRequest::new("hello", "wo");
        let response = predictor.predict(request.clone());
        assert_eq!(response.request, request);
        assert!(response.candidates.is_empty());
        assert!(response.is_final);
    }

    #[test]
    fn test_async_is_never_accepted() {
        let predictor = NullPredictor::new();
        let mut completions = predictor.subscribe_completions();
        assert!(!predictor.predict_async(PredictionRequest::new("", "")));
        assert!(!predictor.supports_async_predict());
        assert!(completions.try_recv().is_err());
    }

    #[test]
    fn test_learn_reports_success() {
        let predictor = NullPredictor::new();
        assert!(predictor.learn("anything at all", LearnKind::Sentences));
        assert!(!predictor.supports_learning());
    }

    #[test]
    fn test_mode_change_notifies_without_dedup() {
        let predictor = NullPredictor::new();
        let fired = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&fired);
        predictor.on_mode_changed(Arc::new(move |mode| {
            assert_eq!(mode, PredictionMode::Sentence);
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        predictor.set_mode(PredictionMode::Sentence);
        predictor.set_mode(PredictionMode::Sentence);
        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_context_handles_survive_unload() {
        let predictor = NullPredictor::new();
        let h1 = predictor.load_context("hello world");
        let h2 = predictor.load_context("goodbye");
        assert!(h2 > h1);

        predictor.unload_context(h1);
        let response = predictor.predict(PredictionRequest::new("", "").with_context(h1));
        assert!(response.candidates.is_empty());
        assert!(response.is_final);

        // Handles keep increasing across unloads.
        let h3 = predictor.load_context("again");
        assert!(h3 > h2);
    }

    #[test]
    fn test_bridge_is_per_instance() {
        let a = NullPredictor::new();
        let b = NullPredictor::new();

        a.invoker()
            .set_value("prediction_word_count", Value::from(3))
            .unwrap();

        assert_eq!(
            a.invoker().get_value("prediction_word_count").unwrap(),
            Value::from(3)
        );
        assert_eq!(
            b.invoker().get_value("prediction_word_count").unwrap(),
            Value::from(DEFAULT_MAX_RESULTS)
        );
    }

    #[test]
    fn test_mode_is_settable_through_the_bridge() {
        let predictor = NullPredictor::new();
        predictor
            .invoker()
            .set_value("mode", Value::from("word"))
            .unwrap();
        assert_eq!(predictor.mode(), PredictionMode::Word);

        let err = predictor
            .invoker()
            .set_value("mode", Value::from("telepathy"))
            .unwrap_err();
        assert!(!err.is_not_supported());
    }

    #[test]
    fn test_no_preferences() {
        let predictor = NullPredictor::new();
        assert!(predictor.preferences().is_none());
        assert!(predictor.default_preferences().is_none());
        assert!(!predictor.supports_preferences_dialog());
        assert!(predictor.load_settings(std::path::Path::new("/nonexistent")));
        assert!(predictor.save_settings(std::path::Path::new("/nonexistent")));
    }
}
