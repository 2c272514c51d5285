//! Link-time registration of word-predictor implementations.
//!
//! Each predictor crate contributes one [`PredictorRegistration`] to the
//! [`WORD_PREDICTORS`] distributed slice, carrying the descriptor fields and
//! a factory function. The registry in quill-runtime reads the slice at
//! startup; discovery is a static table lookup, not runtime type
//! introspection.
//!
//! Use the [`register_predictor!`](crate::register_predictor) macro:
//!
//! ```rust,ignore
//! fn create() -> Arc<dyn WordPredictor> {
//!     Arc::new(MyPredictor::new())
//! }
//!
//! quill_predict::register_predictor! {
//!     id: "0c7f1a9e-2d5b-4e8f-8a33-6b1f0d9c42e1",
//!     name: "My Predictor",
//!     category: "Word Predictors",
//!     description: "Predicts words my way",
//!     create: create,
//! }
//! ```

use std::sync::Arc;

use linkme::distributed_slice;

use quill_core::Descriptor;

use crate::predictor::WordPredictor;

// ─── PredictorRegistration ────────────────────────────────────────────────────

/// A static registration entry: descriptor fields plus a factory.
///
/// Exactly one registration may be associated with an implementation. The
/// registry skips entries whose id does not parse (nil identity) or whose id
/// duplicates an earlier entry (logged, never fatal).
pub struct PredictorRegistration {
    /// UUID string identifying the implementation. Parsed at discovery time;
    /// malformed ids resolve to the nil identity.
    pub id: &'static str,
    /// Friendly name.
    pub name: &'static str,
    /// User-defined category.
    pub category: &'static str,
    /// Friendly description.
    pub description: &'static str,
    /// Factory function creating a live instance.
    pub create: fn() -> Arc<dyn WordPredictor>,
}

impl PredictorRegistration {
    /// Builds the runtime [`Descriptor`] for this entry.
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::new(self.id, self.name, self.category, self.description)
    }

    /// Creates a live instance from the factory function.
    #[inline]
    pub fn instantiate(&self) -> Arc<dyn WordPredictor> {
        (self.create)()
    }
}

// ─── Registry slice ───────────────────────────────────────────────────────────

/// Registry of word-predictor registrations. Each predictor crate
/// contributes one entry via [`register_predictor!`](crate::register_predictor).
#[distributed_slice]
pub static WORD_PREDICTORS: [PredictorRegistration];

/// Registers a word predictor into [`WORD_PREDICTORS`].
///
/// Expands to a static slice element; see the module docs for usage.
#[macro_export]
macro_rules! register_predictor {
    (
        id: $id:literal,
        name: $name:literal,
        category: $category:literal,
        description: $description:literal,
        create: $create:path $(,)?
    ) => {
        const _: () = {
            #[$crate::linkme::distributed_slice($crate::registration::WORD_PREDICTORS)]
            #[linkme(crate = $crate::linkme)]
            static REGISTRATION: $crate::registration::PredictorRegistration =
                $crate::registration::PredictorRegistration {
                    id: $id,
                    name: $name,
                    category: $category,
                    description: $description,
                    create: $create,
                };
        };
    };
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_registered_entries_resolve_to_identified_descriptors() {
        let mut seen = HashSet::new();
        assert!(!WORD_PREDICTORS.is_empty());
        for registration in WORD_PREDICTORS {
            let descriptor = registration.descriptor();
            assert!(
                descriptor.is_identified(),
                "{} has a nil id",
                descriptor.name()
            );
            assert!(seen.insert(descriptor.id()), "duplicate id {}", descriptor.id());
            // Resolution is stable: the same entry yields the same identity.
            assert_eq!(registration.descriptor(), descriptor);
        }
    }
}
