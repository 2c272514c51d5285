//! Prediction mode state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Granularity a predictor uses to interpret its input.
///
/// A single mutable piece of state per predictor instance. Every transition
/// through `set_mode` is broadcast to subscribers, with no de-duplication:
/// setting the same mode twice notifies twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionMode {
    /// Predict completions for the word being typed.
    Word,
    /// Predict whole-sentence continuations.
    Sentence,
}

impl FromStr for PredictionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "word" => Ok(PredictionMode::Word),
            "sentence" => Ok(PredictionMode::Sentence),
            other => Err(format!("unknown prediction mode '{other}'")),
        }
    }
}

impl fmt::Display for PredictionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionMode::Word => write!(f, "word"),
            PredictionMode::Sentence => write!(f, "sentence"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_round_trips_through_str() {
        assert_eq!("word".parse::<PredictionMode>(), Ok(PredictionMode::Word));
        assert_eq!(
            "Sentence".parse::<PredictionMode>(),
            Ok(PredictionMode::Sentence)
        );
        assert!("paragraph".parse::<PredictionMode>().is_err());
        assert_eq!(PredictionMode::Word.to_string(), "word");
    }
}
