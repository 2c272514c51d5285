//! Prediction request and response value objects.

use serde::{Deserialize, Serialize};

use crate::context::ContextHandle;

/// Default candidate bound when the caller does not specify one.
pub const DEFAULT_MAX_RESULTS: usize = 10;

// ─── PredictionRequest ────────────────────────────────────────────────────────

/// A single prediction request.
///
/// Requests are plain value objects; a response always carries its
/// originating request so callers can correlate concurrently in-flight
/// asynchronous predictions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Words preceding the insertion point.
    pub preceding_words: String,
    /// The partially typed word to complete. May be empty.
    pub last_word_fragment: String,
    /// Optional context handle previously issued by `load_context`.
    pub context_handle: Option<ContextHandle>,
    /// Upper bound on the number of candidates in the response.
    pub max_results: usize,
}

impl PredictionRequest {
    /// Creates a request with no context handle and the default result bound.
    pub fn new(preceding_words: impl Into<String>, last_word_fragment: impl Into<String>) -> Self {
        Self {
            preceding_words: preceding_words.into(),
            last_word_fragment: last_word_fragment.into(),
            context_handle: None,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Attaches a context handle.
    pub fn with_context(mut self, handle: ContextHandle) -> Self {
        self.context_handle = Some(handle);
        self
    }

    /// Overrides the candidate bound.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

// ─── PredictionResponse ───────────────────────────────────────────────────────

/// The outcome of a prediction request.
///
/// An empty candidate list with `is_final = true` is a valid, successful
/// result; "no suggestions" is never signalled as a failure. `is_final`
/// marks the single, complete response for the request; truncation to
/// `max_results` is the predictor's responsibility and is not reflected in
/// this flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// The originating request, echoed for correlation.
    pub request: PredictionRequest,
    /// Candidate strings, best match first.
    pub candidates: Vec<String>,
    /// Whether this is the complete response for the request.
    pub is_final: bool,
}

impl PredictionResponse {
    /// A final response carrying the given candidates.
    pub fn new(request: PredictionRequest, candidates: Vec<String>) -> Self {
        Self {
            request,
            candidates,
            is_final: true,
        }
    }

    /// The neutral "no suggestions" outcome.
    pub fn empty(request: PredictionRequest) -> Self {
        Self::new(request, Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_response_is_final_success() {
        let req = PredictionRequest::new("hello", "wo");
        let resp = PredictionResponse::empty(req.clone());
        assert!(resp.is_final);
        assert!(resp.candidates.is_empty());
        assert_eq!(resp.request, req);
    }
}
