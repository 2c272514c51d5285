//! Bundled predictor implementations.
//!
//! [`NullPredictor`] is the required no-op baseline; [`FrequencyPredictor`]
//! is a working statistical predictor. Both register themselves into
//! [`WORD_PREDICTORS`](crate::registration::WORD_PREDICTORS).

pub mod frequency;
pub mod null;

pub use frequency::FrequencyPredictor;
pub use null::NullPredictor;
