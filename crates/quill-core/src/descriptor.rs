//! Identity descriptors for dynamically registered extensions.
//!
//! Every swappable component in the host (word predictors, agents, scanners)
//! carries a [`Descriptor`]: a unique id, a friendly name, a category, and a
//! description. Identity is the id alone, never the implementing type's name,
//! so implementations can be renamed or relocated without breaking saved
//! references (a user's chosen predictor is stored by id in settings).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

// ─── Descriptor ───────────────────────────────────────────────────────────────

/// Immutable identity metadata attached to an extension implementation.
///
/// Created once when the implementation registers itself and read-only
/// thereafter. A malformed id string resolves to the nil UUID rather than a
/// fabricated one; such descriptors are "unidentified" and the registry
/// excludes them from identity-keyed lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    id: Uuid,
    name: String,
    category: String,
    description: String,
}

impl Descriptor {
    /// Creates a descriptor, parsing `id` as a UUID.
    ///
    /// An unparsable id falls back to [`Uuid::nil`]; it never invents an
    /// identity.
    pub fn new(
        id: &str,
        name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let parsed = Uuid::try_parse(id).unwrap_or_else(|_| {
            debug!(raw = id, "Descriptor id failed to parse, using nil identity");
            Uuid::nil()
        });
        Self {
            id: parsed,
            name: name.into(),
            category: category.into(),
            description: description.into(),
        }
    }

    /// The unique id. Nil when the registered id string failed to parse.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The friendly name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user-defined category.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The friendly description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns `true` when this descriptor carries a usable identity.
    ///
    /// Unidentified descriptors must be excluded from identity-keyed lookups.
    pub fn is_identified(&self) -> bool {
        !self.id.is_nil()
    }
}

/// Identity equality: by id only.
impl PartialEq for Descriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Descriptor {}

impl std::hash::Hash for Descriptor {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_id() {
        let d = Descriptor::new(
            "9d3c86a5-4f0b-4c2e-9a57-1de1c6b4f0aa",
            "Sample",
            "Predictors",
            "A sample extension",
        );
        assert!(d.is_identified());
        assert_eq!(d.name(), "Sample");
        assert_eq!(
            d.id(),
            Uuid::try_parse("9d3c86a5-4f0b-4c2e-9a57-1de1c6b4f0aa").unwrap()
        );
    }

    #[test]
    fn test_malformed_id_resolves_to_nil() {
        let d = Descriptor::new("not-a-uuid", "Broken", "", "");
        assert!(!d.is_identified());
        assert_eq!(d.id(), Uuid::nil());
    }

    #[test]
    fn test_equality_is_by_id_only() {
        let a = Descriptor::new("9d3c86a5-4f0b-4c2e-9a57-1de1c6b4f0aa", "Old Name", "", "");
        let b = Descriptor::new(
            "9d3c86a5-4f0b-4c2e-9a57-1de1c6b4f0aa",
            "Renamed",
            "Other",
            "Relocated",
        );
        assert_eq!(a, b);
    }
}
