//! Runtime error types.

use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;

// =============================================================================
// Registry Errors
// =============================================================================

/// Errors raised while validating a predictor registration.
///
/// Both variants are non-fatal to the host: the registry logs the entry and
/// skips it.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    /// The registration's id string did not parse, so the entry has no
    /// usable identity.
    #[error("predictor '{name}' has no usable identity and was skipped")]
    Unidentified {
        /// Friendly name from the registration.
        name: String,
    },

    /// Another registration already claimed this id.
    #[error("duplicate predictor id {id} from '{name}'; first registration wins")]
    Duplicate {
        /// The contested id.
        id: Uuid,
        /// Friendly name of the rejected registration.
        name: String,
    },
}

// =============================================================================
// Runtime Errors
// =============================================================================

/// Errors that can occur during host orchestration.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration loading failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No registered predictor carries the requested id.
    #[error("no word predictor registered with id {0}")]
    PredictorNotFound(Uuid),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
