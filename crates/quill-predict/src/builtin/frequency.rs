//! Unigram frequency word predictor.
//!
//! Ranks known words by how often they have been seen in learned text and
//! in the loaded document contexts, and completes the last word fragment
//! with the most frequent matches. Deliberately simple: no n-gram chaining
//! yet, the `ngram` preference is persisted for forward compatibility.
//!
//! Supports the full contract surface: synchronous and asynchronous
//! prediction, learning, preferences, and the JSON settings round-trip.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use quill_core::{Descriptor, ExtensionInvoker, InvokerBuilder};

use crate::context::{ContextHandle, HandleMinter};
use crate::mode::PredictionMode;
use crate::notify::{Fanout, ModeNotifier, ModeSubscriber, WordProbabilities};
use crate::predictor::{LearnKind, PredictorPreferences, WordPredictor};
use crate::request::{PredictionRequest, PredictionResponse};

/// File name used for the settings round-trip.
const SETTINGS_FILE: &str = "frequency_predictor.json";

/// Serialized form of the predictor's own configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SavedState {
    preferences: PredictorPreferences,
    words: HashMap<String, u64>,
}

/// State shared between the predictor, its invoker closures, and its
/// prediction workers.
struct Shared {
    mode: Mutex<PredictionMode>,
    mode_changed: ModeNotifier,
    prefs: Mutex<PredictorPreferences>,
    /// Learned corpus: lowercased token → occurrence count.
    words: RwLock<HashMap<String, u64>>,
    /// Live document contexts keyed by handle, each with its own counts.
    contexts: RwLock<HashMap<ContextHandle, HashMap<String, u64>>>,
    completions: Fanout<PredictionResponse>,
    word_probabilities: Fanout<WordProbabilities>,
}

impl Shared {
    fn set_mode(&self, mode: PredictionMode) {
        *self.mode.lock() = mode;
        self.mode_changed.notify(mode);
    }

    /// Ranks candidate completions for `fragment`, best match first.
    ///
    /// Counts from the request's context (when the handle is still live) are
    /// merged with the learned corpus; a stale or absent handle simply
    /// contributes nothing.
    fn candidates(
        &self,
        fragment: &str,
        context: Option<ContextHandle>,
        cap: usize,
    ) -> Vec<(String, u64)> {
        let prefix = fragment.to_lowercase();
        let filter_punctuations = self.prefs.lock().filter_punctuations;

        let mut merged: HashMap<String, u64> = HashMap::new();
        for (word, count) in self.words.read().iter() {
            if word.starts_with(&prefix) {
                *merged.entry(word.clone()).or_insert(0) += count;
            }
        }
        if let Some(handle) = context {
            if let Some(table) = self.contexts.read().get(&handle) {
                for (word, count) in table {
                    if word.starts_with(&prefix) {
                        *merged.entry(word.clone()).or_insert(0) += count;
                    }
                }
            }
        }

        let mut ranked: Vec<(String, u64)> = merged
            .into_iter()
            .filter(|(word, _)| {
                !filter_punctuations || word.chars().all(|c| c.is_alphanumeric() || c == '\'')
            })
            .collect();
        ranked.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));
        ranked.truncate(cap);
        ranked
    }

    /// Computes the complete response for `request` and broadcasts the
    /// advisory word probabilities.
    fn respond(&self, request: PredictionRequest) -> PredictionResponse {
        let cap = request
            .max_results
            .min(self.prefs.lock().prediction_word_count);
        let ranked = self.candidates(&request.last_word_fragment, request.context_handle, cap);

        if self.word_probabilities.has_subscribers() && !ranked.is_empty() {
            let total: u64 = ranked.iter().map(|(_, c)| *c).sum();
            self.word_probabilities.send(WordProbabilities {
                entries: ranked
                    .iter()
                    .map(|(w, c)| (w.clone(), *c as f64 / total as f64))
                    .collect(),
            });
        }

        let candidates = ranked.into_iter().map(|(word, _)| word).collect();
        PredictionResponse::new(request, candidates)
    }

    fn absorb(table: &mut HashMap<String, u64>, text: &str) {
        for token in text.split_whitespace() {
            let word: String = token
                .trim_matches(|c: char| !c.is_alphanumeric())
                .to_lowercase();
            if !word.is_empty() {
                *table.entry(word).or_insert(0) += 1;
            }
        }
    }
}

/// Frequency-ranked word predictor.
pub struct FrequencyPredictor {
    descriptor: Descriptor,
    shared: Arc<Shared>,
    handles: HandleMinter,
    invoker: Arc<ExtensionInvoker>,
    /// Captured at construction; asynchronous prediction is refused when the
    /// instance was created outside a tokio runtime.
    runtime: Option<Handle>,
}

impl FrequencyPredictor {
    /// Stable identity of the frequency predictor.
    pub const ID: &'static str = "f3b8d2c4-7a61-49e0-b5ff-2d94c0a81e35";

    /// Creates an instance with its own invocation bridge.
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            mode: Mutex::new(PredictionMode::Word),
            mode_changed: ModeNotifier::new(),
            prefs: Mutex::new(PredictorPreferences::default()),
            words: RwLock::new(HashMap::new()),
            contexts: RwLock::new(HashMap::new()),
            completions: Fanout::new(),
            word_probabilities: Fanout::new(),
        });
        Self {
            descriptor: Descriptor::new(
                Self::ID,
                "Frequency Word Predictor",
                "Word Predictors",
                "Completes words from learned usage frequencies",
            ),
            invoker: Arc::new(build_invoker(&shared)),
            shared,
            handles: HandleMinter::with_seed(100),
            runtime: Handle::try_current().ok(),
        }
    }
}

impl Default for FrequencyPredictor {
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
    let forget = Arc::clone(shared);

    InvokerBuilder::new()
        .property(
            "prediction_word_count",
            move || Value::from(count_get.prefs.lock().prediction_word_count),
            move |v| {
                let n = v.as_u64().ok_or("expected an unsigned integer")?;
                count_set.prefs.lock().prediction_word_count = n as usize;
                Ok(())
            },
        )
        .property(
            "ngram",
            move || Value::from(ngram_get.prefs.lock().ngram),
            move |v| {
                let n = v.as_u64().ok_or("expected an unsigned integer")?;
                ngram_set.prefs.lock().ngram = n as usize;
                Ok(())
            },
        )
        .property(
            "filter_punctuations",
            move || Value::from(filter_get.prefs.lock().filter_punctuations),
            move |v| {
                let b = v.as_bool().ok_or("expected a boolean")?;
                filter_set.prefs.lock().filter_punctuations = b;
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
        .method("forget_all", move |_args| {
            let removed = {
                let mut words = forget.words.write();
                let n = words.len();
                words.clear();
                n
            };
            Ok(Value::from(removed))
        })
        .build()
}

impl WordPredictor for FrequencyPredictor {
    fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    fn invoker(&self) -> Arc<ExtensionInvoker> {
        Arc::clone(&self.invoker)
    }

    fn supports_sync_predict(&self) -> bool {
        true
    }

    fn supports_async_predict(&self) -> bool {
        self.runtime.is_some()
    }

    fn supports_learning(&self) -> bool {
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

    fn load_context(&self, text: &str) -> ContextHandle {
        let handle = self.handles.mint();
        let mut table = HashMap::new();
        Shared::absorb(&mut table, text);
        self.shared.contexts.write().insert(handle, table);
        debug!(context = %handle, "Loaded prediction context");
        handle
    }

    fn unload_context(&self, handle: ContextHandle) {
        if self.shared.contexts.write().remove(&handle).is_none() {
            debug!(context = %handle, "Ignoring unload of unknown context");
        }
    }

    fn predict_sync(&self, _prev_words: &str, last_fragment: &str) -> Vec<String> {
        let cap = self.shared.prefs.lock().prediction_word_count;
        self.shared
            .candidates(last_fragment, None, cap)
            .into_iter()
            .map(|(word, _)| word)
            .collect()
    }

    fn predict(&self, request: PredictionRequest) -> PredictionResponse {
        self.shared.respond(request)
    }

    fn predict_async(&self, request: PredictionRequest) -> bool {
        let Some(runtime) = &self.runtime else {
            return false;
        };
        let shared = Arc::clone(&self.shared);
        runtime.spawn(async move {
            let response = shared.respond(request);
            shared.completions.send(response);
        });
        true
    }

    fn subscribe_completions(&self) -> mpsc::UnboundedReceiver<PredictionResponse> {
        self.shared.completions.subscribe()
    }

    fn subscribe_word_probabilities(&self) -> mpsc::UnboundedReceiver<WordProbabilities> {
        self.shared.word_probabilities.subscribe()
    }

    fn learn(&self, text: &str, _kind: LearnKind) -> bool {
        let mut words = self.shared.words.write();
        Shared::absorb(&mut words, text);
        true
    }

    fn preferences(&self) -> Option<PredictorPreferences> {
        Some(self.shared.prefs.lock().clone())
    }

    fn default_preferences(&self) -> Option<PredictorPreferences> {
        Some(PredictorPreferences::default())
    }

    fn load_settings(&self, dir: &Path) -> bool {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return true;
        }
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to read predictor settings");
                return false;
            }
        };
        match serde_json::from_str::<SavedState>(&raw) {
            Ok(state) => {
                *self.shared.prefs.lock() = state.preferences;
                *self.shared.words.write() = state.words;
                debug!(path = %path.display(), "Loaded predictor settings");
                true
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to parse predictor settings");
                false
            }
        }
    }

    fn save_settings(&self, dir: &Path) -> bool {
        if let Err(e) = fs::create_dir_all(dir) {
            warn!(dir = %dir.display(), error = %e, "Failed to create settings directory");
            return false;
        }
        let state = SavedState {
            preferences: self.shared.prefs.lock().clone(),
            words: self.shared.words.read().clone(),
        };
        let path = dir.join(SETTINGS_FILE);
        let raw = match serde_json::to_string_pretty(&state) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to serialize predictor settings");
                return false;
            }
        };
        match fs::write(&path, raw) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to write predictor settings");
                false
            }
        }
    }
}

fn create() -> Arc<dyn WordPredictor> {
    Arc::new(FrequencyPredictor::new())
}

crate::register_predictor! {
    id: "f3b8d2c4-7a61-49e0-b5ff-2d94c0a81e35",
    name: "Frequency Word Predictor",
    category: "Word Predictors",
    description: "Completes words from learned usage frequencies",
    create: create,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained() -> FrequencyPredictor {
        let predictor = FrequencyPredictor::new();
        predictor.learn(
            "the quick brown fox jumps over the lazy dog the fox",
            LearnKind::Sentences,
        );
        predictor
    }

    #[test]
    fn test_ranks_by_frequency_then_name() {
        let predictor = trained();
        // "the" seen 3 times, "fox" twice, everything else once.
        let all = predictor.predict_sync("", "");
        assert_eq!(all[0], "the");
        assert_eq!(all[1], "fox");
        // Ties broken lexicographically.
        assert!(all[2..].windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_prefix_match_is_case_insensitive() {
        let predictor = trained();
        let response = predictor.predict(PredictionRequest::new("over", "Fo"));
        assert_eq!(response.candidates, vec!["fox".to_string()]);
        assert!(response.is_final);
    }

    #[test]
    fn test_truncates_to_max_results() {
        let predictor = trained();
        let response = predictor.predict(PredictionRequest::new("", "").with_max_results(2));
        assert_eq!(response.candidates.len(), 2);

        // The configured word count bounds the request's own limit too.
        predictor
            .invoker()
            .set_value("prediction_word_count", Value::from(1))
            .unwrap();
        let response = predictor.predict(PredictionRequest::new("", "").with_max_results(5));
        assert_eq!(response.candidates, vec!["the".to_string()]);
    }

    #[test]
    fn test_punctuation_filter_is_a_preference() {
        let predictor = FrequencyPredictor::new();
        predictor.learn("don't use check-in here", LearnKind::Words);

        // Apostrophes survive the default filter; hyphens do not.
        assert_eq!(predictor.predict_sync("", "d"), vec!["don't".to_string()]);
        assert!(predictor.predict_sync("", "check").is_empty());

        predictor
            .invoker()
            .set_value("filter_punctuations", Value::from(false))
            .unwrap();
        assert_eq!(
            predictor.predict_sync("", "check"),
            vec!["check-in".to_string()]
        );
    }

    #[test]
    fn test_context_lifecycle_shapes_predictions() {
        let predictor = FrequencyPredictor::new();
        predictor.learn("zebra", LearnKind::Words);

        let h1 = predictor.load_context("zephyr zephyr zephyr");
        let h2 = predictor.load_context("unrelated text");
        assert!(h2 > h1);

        let with_context = predictor.predict(PredictionRequest::new("", "ze").with_context(h1));
        assert_eq!(with_context.candidates[0], "zephyr");

        predictor.unload_context(h1);
        let after_unload = predictor.predict(PredictionRequest::new("", "ze").with_context(h1));
        assert_eq!(after_unload.candidates, vec!["zebra".to_string()]);
        assert!(after_unload.is_final);

        // Unloading again is harmless.
        predictor.unload_context(h1);
    }

    #[test]
    fn test_async_refused_outside_a_runtime() {
        let predictor = FrequencyPredictor::new();
        assert!(!predictor.supports_async_predict());
        assert!(!predictor.predict_async(PredictionRequest::new("", "")));
    }

    #[tokio::test]
    async fn test_async_delivers_exactly_one_completion() {
        let predictor = trained();
        let mut completions = predictor.subscribe_completions();

        let request = PredictionRequest::new("the quick", "f").with_max_results(3);
        assert!(predictor.supports_async_predict());
        assert!(predictor.predict_async(request.clone()));

        let response = completions.recv().await.unwrap();
        assert_eq!(response.request, request);
        assert_eq!(response.candidates, vec!["fox".to_string()]);
        assert!(response.is_final);
        assert!(completions.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_word_probabilities_are_broadcast() {
        let predictor = trained();
        let mut probabilities = predictor.subscribe_word_probabilities();

        predictor.predict(PredictionRequest::new("", "t").with_max_results(1));
        let dist = probabilities.recv().await.unwrap();
        assert_eq!(dist.entries.len(), 1);
        assert_eq!(dist.entries[0].0, "the");
        assert!((dist.entries[0].1 - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "quill-frequency-settings-{}",
            std::process::id()
        ));

        let predictor = trained();
        predictor
            .invoker()
            .set_value("prediction_word_count", Value::from(4))
            .unwrap();
        assert!(predictor.save_settings(&dir));

        let restored = FrequencyPredictor::new();
        assert!(restored.load_settings(&dir));
        assert_eq!(
            restored.preferences().unwrap().prediction_word_count,
            4
        );
        assert_eq!(restored.predict_sync("", "fo"), vec!["fox".to_string()]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_settings_directory_is_fine() {
        let predictor = FrequencyPredictor::new();
        assert!(predictor.load_settings(std::path::Path::new("/nonexistent/quill")));
    }

    #[test]
    fn test_forget_all_through_the_bridge() {
        let predictor = trained();
        let cleared = predictor.invoker().invoke("forget_all", &[]).unwrap();
        assert!(cleared.as_u64().unwrap() > 0);
        assert!(predictor.predict_sync("", "").is_empty());
    }
}
