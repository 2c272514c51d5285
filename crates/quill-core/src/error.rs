//! Unified error types for the Quill core crate.
//!
//! This module provides standardized error types used across core components.
//! Runtime-level errors (registry, configuration) are defined in quill-runtime.

use thiserror::Error;

// =============================================================================
// Invocation Errors
// =============================================================================

/// Errors produced by the invocation bridge.
///
/// [`NotSupported`](InvokeError::NotSupported) is a normal, expected outcome:
/// host code probes an extension for optional members by name, and an absent
/// member simply means "feature absent". Callers must not treat it as a crash
/// signal.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    /// The bound instance has no member with the given name.
    #[error("member '{name}' is not supported by this extension")]
    NotSupported {
        /// The member name that was looked up.
        name: String,
    },

    /// A setter rejected the supplied value.
    #[error("invalid value for member '{name}': {reason}")]
    InvalidValue {
        /// The member name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A method ran but reported a failure.
    #[error("invocation of '{name}' failed: {reason}")]
    Failed {
        /// The member name.
        name: String,
        /// Reason for failure.
        reason: String,
    },
}

impl InvokeError {
    /// Shorthand constructor for the `NotSupported` case.
    pub fn not_supported(name: impl Into<String>) -> Self {
        Self::NotSupported { name: name.into() }
    }

    /// Returns `true` when the error only means the member is absent.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported { .. })
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for invocation bridge operations.
pub type InvokeResult<T> = Result<T, InvokeError>;
