//! Predictor registry.
//!
//! The registry owns the mapping from stable identity to predictor factory.
//! It reads [`WORD_PREDICTORS`], the link-time registration slice, at
//! startup, validates each entry's descriptor, and hands out live
//! `(Descriptor, instance)` pairs on demand. Invalid entries (unparsable or
//! duplicate ids) are logged and skipped; registration problems are never
//! fatal to the host.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use quill_core::{Descriptor, ExtensionInvoker};
use quill_predict::registration::{PredictorRegistration, WORD_PREDICTORS};
use quill_predict::WordPredictor;

use crate::error::{RegistryError, RegistryResult};

// =============================================================================
// ActivePredictor
// =============================================================================

/// A live predictor bundled with its identity.
///
/// The invocation bridge is reached through the instance; it was bound at
/// construction and no other instance shares it.
#[derive(Clone)]
pub struct ActivePredictor {
    /// Identity of the implementation.
    pub descriptor: Descriptor,
    /// The live instance.
    pub predictor: Arc<dyn WordPredictor>,
}

impl ActivePredictor {
    /// The instance's invocation bridge.
    pub fn invoker(&self) -> Arc<ExtensionInvoker> {
        self.predictor.invoker()
    }
}

// =============================================================================
// PredictorRegistry
// =============================================================================

struct RegistryEntry {
    descriptor: Descriptor,
    create: fn() -> Arc<dyn WordPredictor>,
}

/// Registry of word-predictor implementations, keyed by descriptor id.
///
/// Identity is the descriptor's UUID, never the implementing type, so saved
/// references (e.g. the configured active predictor) survive renames.
pub struct PredictorRegistry {
    entries: RwLock<Vec<RegistryEntry>>,
}

impl PredictorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Creates a registry populated from the link-time registration slice.
    ///
    /// Entries that fail validation are logged at `warn` and skipped.
    pub fn discover() -> Self {
        let registry = Self::new();
        for registration in WORD_PREDICTORS {
            if let Err(e) = registry.register(registration) {
                warn!(error = %e, "Skipping predictor registration");
            }
        }
        info!(count = registry.count(), "Discovered word predictors");
        registry
    }

    /// Validates and adds one registration.
    ///
    /// Unidentified entries (nil id after parsing) and duplicate ids are
    /// rejected; the first registration of an id wins.
    pub fn register(&self, registration: &PredictorRegistration) -> RegistryResult<()> {
        let descriptor = registration.descriptor();
        if !descriptor.is_identified() {
            return Err(RegistryError::Unidentified {
                name: descriptor.name().to_string(),
            });
        }

        let mut entries = self.entries.write();
        if entries.iter().any(|e| e.descriptor.id() == descriptor.id()) {
            return Err(RegistryError::Duplicate {
                id: descriptor.id(),
                name: descriptor.name().to_string(),
            });
        }

        debug!(predictor = %descriptor, "Registered word predictor");
        entries.push(RegistryEntry {
            descriptor,
            create: registration.create,
        });
        Ok(())
    }

    /// Descriptors of all registered predictors, in registration order.
    pub fn descriptors(&self) -> Vec<Descriptor> {
        self.entries
            .read()
            .iter()
            .map(|e| e.descriptor.clone())
            .collect()
    }

    /// Looks up a descriptor by id.
    pub fn get(&self, id: Uuid) -> Option<Descriptor> {
        self.entries
            .read()
            .iter()
            .find(|e| e.descriptor.id() == id)
            .map(|e| e.descriptor.clone())
    }

    /// Returns `true` when a predictor with `id` is registered.
    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of registered predictors.
    pub fn count(&self) -> usize {
        self.entries.read().len()
    }

    /// Instantiates the predictor registered under `id`.
    ///
    /// Each call produces a fresh instance with its own invocation bridge.
    pub fn create(&self, id: Uuid) -> Option<ActivePredictor> {
        let entries = self.entries.read();
        let entry = entries.iter().find(|e| e.descriptor.id() == id)?;
        let predictor = (entry.create)();
        info!(predictor = %entry.descriptor, "Created word predictor instance");
        Some(ActivePredictor {
            descriptor: entry.descriptor.clone(),
            predictor,
        })
    }
}

impl Default for PredictorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use quill_predict::{FrequencyPredictor, NullPredictor, PredictionRequest};

    use super::*;

    fn make_null() -> Arc<dyn WordPredictor> {
        Arc::new(NullPredictor::new())
    }

    fn null_id() -> Uuid {
        Uuid::try_parse(NullPredictor::ID).unwrap()
    }

    #[test]
    fn test_discover_finds_bundled_predictors() {
        let registry = PredictorRegistry::discover();
        assert!(registry.contains(null_id()));
        assert!(registry.contains(Uuid::try_parse(FrequencyPredictor::ID).unwrap()));
        assert!(registry.count() >= 2);
    }

    #[test]
    fn test_unidentified_registration_is_rejected() {
        let registry = PredictorRegistry::new();
        let registration = PredictorRegistration {
            id: "definitely-not-a-uuid",
            name: "Broken",
            category: "",
            description: "",
            create: make_null,
        };
        assert!(matches!(
            registry.register(&registration),
            Err(RegistryError::Unidentified { .. })
        ));
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_duplicate_id_first_registration_wins() {
        let registry = PredictorRegistry::new();
        let first = PredictorRegistration {
            id: NullPredictor::ID,
            name: "First",
            category: "",
            description: "",
            create: make_null,
        };
        let second = PredictorRegistration {
            id: NullPredictor::ID,
            name: "Second",
            category: "",
            description: "",
            create: make_null,
        };

        registry.register(&first).unwrap();
        assert!(matches!(
            registry.register(&second),
            Err(RegistryError::Duplicate { .. })
        ));
        assert_eq!(registry.get(null_id()).unwrap().name(), "First");
    }

    #[test]
    fn test_create_yields_fresh_instances() {
        let registry = PredictorRegistry::discover();

        let a = registry.create(null_id()).unwrap();
        let b = registry.create(null_id()).unwrap();

        a.invoker()
            .set_value("prediction_word_count", serde_json::Value::from(1))
            .unwrap();
        assert_ne!(
            a.invoker().get_value("prediction_word_count").unwrap(),
            b.invoker().get_value("prediction_word_count").unwrap()
        );

        let response = a.predictor.predict(PredictionRequest::new("", ""));
        assert!(response.candidates.is_empty() && response.is_final);
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let registry = PredictorRegistry::discover();
        let unknown = Uuid::try_parse("11111111-2222-3333-4444-555555555555").unwrap();
        assert!(registry.create(unknown).is_none());
        assert!(registry.get(unknown).is_none());
    }
}
