//! Opaque handles for caller-supplied text contexts.
//!
//! A predictor may use the text of the currently active document to condition
//! its predictions. The caller loads that text with `load_context` and gets
//! back a [`ContextHandle`]; the handle is valid only against the instance
//! that minted it, and is released with `unload_context`.
//!
//! Handles are strictly increasing and never reused, even after the handle's
//! context has been unloaded, so a stale handle can never alias a live one.
//! Operations referencing a stale or never-issued handle must degrade to a
//! harmless no-result outcome, never an uncontrolled fault.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

// ─── ContextHandle ────────────────────────────────────────────────────────────

/// Opaque token for a loaded prediction context.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ContextHandle(u64);

impl ContextHandle {
    /// The raw handle value. Only meaningful for ordering and logging.
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ─── HandleMinter ─────────────────────────────────────────────────────────────

/// Mints strictly increasing context handles for one predictor instance.
pub struct HandleMinter {
    next: AtomicU64,
}

impl HandleMinter {
    /// Creates a minter starting at `seed`. The seed must be positive; zero is
    /// bumped to one so a minted handle is always distinguishable from "none".
    pub fn with_seed(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed.max(1)),
        }
    }

    /// Mints the next handle.
    pub fn mint(&self) -> ContextHandle {
        ContextHandle(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for HandleMinter {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_strictly_increase() {
        let minter = HandleMinter::with_seed(1);
        let a = minter.mint();
        let b = minter.mint();
        let c = minter.mint();
        assert!(a < b && b < c);
        assert_eq!(a.raw(), 1);
    }

    #[test]
    fn test_zero_seed_is_bumped() {
        let minter = HandleMinter::with_seed(0);
        assert_eq!(minter.mint().raw(), 1);
    }
}
