//! Late-bound invocation bridge.
//!
//! An [`ExtensionInvoker`] lets host-side generic code manipulate an
//! extension's members by name (get a value, set a value, invoke an
//! operation) without a compile-time reference to the extension's concrete
//! type. A command handler can set an option named `"mode"` on whichever
//! predictor happens to be active; this is the mechanism that keeps the
//! plugin set truly swappable.
//!
//! There is no runtime reflection involved: the extension registers an
//! explicit map from member names to closures at construction time, via
//! [`InvokerBuilder`]. Each live instance owns exactly one invoker, built
//! over that instance's own state; two instances of the same extension type
//! never share a bridge.
//!
//! # Example
//!
//! ```rust,ignore
//! let counter = Arc::new(AtomicUsize::new(10));
//!
//! let invoker = InvokerBuilder::new()
//!     .property(
//!         "prediction_word_count",
//!         {
//!             let c = Arc::clone(&counter);
//!             move || Value::from(c.load(Ordering::Relaxed))
//!         },
//!         {
//!             let c = Arc::clone(&counter);
//!             move |v| {
//!                 let n = v.as_u64().ok_or("expected an unsigned integer")?;
//!                 c.store(n as usize, Ordering::Relaxed);
//!                 Ok(())
//!             }
//!         },
//!     )
//!     .build();
//!
//! assert_eq!(invoker.get_value("prediction_word_count")?, Value::from(10));
//! ```

use std::collections::HashMap;

use serde_json::Value;

use crate::error::{InvokeError, InvokeResult};

/// Getter closure: reads a named value from the bound instance.
type GetterFn = Box<dyn Fn() -> Value + Send + Sync>;

/// Setter closure: writes a named value. Returns a rejection reason on bad
/// input; the invoker wraps it into [`InvokeError::InvalidValue`].
type SetterFn = Box<dyn Fn(Value) -> Result<(), String> + Send + Sync>;

/// Method closure: runs a named operation. Returns a failure reason on error;
/// the invoker wraps it into [`InvokeError::Failed`].
type MethodFn = Box<dyn Fn(&[Value]) -> Result<Value, String> + Send + Sync>;

// =============================================================================
// ExtensionInvoker
// =============================================================================

/// Per-instance dynamic dispatch table over a bound extension instance.
///
/// Immutable after construction; holds no state of its own beyond the
/// registered closures, which capture (shared handles to) the owner's state.
/// All lookups for unknown names fail with [`InvokeError::NotSupported`],
/// a recoverable, expected outcome used for capability probing.
pub struct ExtensionInvoker {
    getters: HashMap<&'static str, GetterFn>,
    setters: HashMap<&'static str, SetterFn>,
    methods: HashMap<&'static str, MethodFn>,
}

impl ExtensionInvoker {
    /// Starts building an invoker.
    pub fn builder() -> InvokerBuilder {
        InvokerBuilder::new()
    }

    /// Reads the member named `name`.
    pub fn get_value(&self, name: &str) -> InvokeResult<Value> {
        match self.getters.get(name) {
            Some(getter) => Ok(getter()),
            None => Err(InvokeError::not_supported(name)),
        }
    }

    /// Writes `value` to the member named `name`.
    pub fn set_value(&self, name: &str, value: Value) -> InvokeResult<()> {
        match self.setters.get(name) {
            Some(setter) => setter(value).map_err(|reason| InvokeError::InvalidValue {
                name: name.to_string(),
                reason,
            }),
            None => Err(InvokeError::not_supported(name)),
        }
    }

    /// Invokes the operation named `name` with `args`.
    pub fn invoke(&self, name: &str, args: &[Value]) -> InvokeResult<Value> {
        match self.methods.get(name) {
            Some(method) => method(args).map_err(|reason| InvokeError::Failed {
                name: name.to_string(),
                reason,
            }),
            None => Err(InvokeError::not_supported(name)),
        }
    }

    /// Returns `true` when any member (getter, setter, or method) with the
    /// given name is registered. Cheap capability probe.
    pub fn supports(&self, name: &str) -> bool {
        self.getters.contains_key(name)
            || self.setters.contains_key(name)
            || self.methods.contains_key(name)
    }
}

impl std::fmt::Debug for ExtensionInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtensionInvoker")
            .field("getters", &self.getters.keys())
            .field("setters", &self.setters.keys())
            .field("methods", &self.methods.keys())
            .finish()
    }
}

// =============================================================================
// InvokerBuilder
// =============================================================================

/// Builder used by an extension at construction time to register its named
/// members.
#[derive(Default)]
pub struct InvokerBuilder {
    getters: HashMap<&'static str, GetterFn>,
    setters: HashMap<&'static str, SetterFn>,
    methods: HashMap<&'static str, MethodFn>,
}

impl InvokerBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a read-only member.
    pub fn getter<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.getters.insert(name, Box::new(f));
        self
    }

    /// Registers a write-only member.
    pub fn setter<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.setters.insert(name, Box::new(f));
        self
    }

    /// Registers a readable and writable member.
    pub fn property<G, S>(self, name: &'static str, getter: G, setter: S) -> Self
    where
        G: Fn() -> Value + Send + Sync + 'static,
        S: Fn(Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.getter(name, getter).setter(name, setter)
    }

    /// Registers an invokable operation.
    pub fn method<F>(mut self, name: &'static str, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.methods.insert(name, Box::new(f));
        self
    }

    /// Finishes the build.
    pub fn build(self) -> ExtensionInvoker {
        ExtensionInvoker {
            getters: self.getters,
            setters: self.setters,
            methods: self.methods,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn counting_invoker(state: &Arc<AtomicUsize>) -> ExtensionInvoker {
        let get_state = Arc::clone(state);
        let set_state = Arc::clone(state);
        let bump_state = Arc::clone(state);
        InvokerBuilder::new()
            .property(
                "count",
                move || Value::from(get_state.load(Ordering::Relaxed)),
                move |v| {
                    let n = v.as_u64().ok_or("expected an unsigned integer")?;
                    set_state.store(n as usize, Ordering::Relaxed);
                    Ok(())
                },
            )
            .method("bump", move |_args| {
                Ok(Value::from(bump_state.fetch_add(1, Ordering::Relaxed) + 1))
            })
            .build()
    }

    #[test]
    fn test_get_set_invoke() {
        let state = Arc::new(AtomicUsize::new(5));
        let invoker = counting_invoker(&state);

        assert_eq!(invoker.get_value("count").unwrap(), Value::from(5));
        invoker.set_value("count", Value::from(42)).unwrap();
        assert_eq!(state.load(Ordering::Relaxed), 42);
        assert_eq!(invoker.invoke("bump", &[]).unwrap(), Value::from(43));
    }

    #[test]
    fn test_unknown_member_is_not_supported() {
        let invoker = InvokerBuilder::new().build();
        let err = invoker.get_value("move_window").unwrap_err();
        assert!(err.is_not_supported());
        assert!(invoker.set_value("move_window", Value::Null).is_err());
        assert!(!invoker.supports("move_window"));
    }

    #[test]
    fn test_setter_rejects_bad_value() {
        let state = Arc::new(AtomicUsize::new(0));
        let invoker = counting_invoker(&state);
        let err = invoker.set_value("count", Value::from("ten")).unwrap_err();
        assert!(matches!(err, InvokeError::InvalidValue { .. }));
        assert_eq!(state.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_bridges_are_isolated_per_instance() {
        let first = Arc::new(AtomicUsize::new(1));
        let second = Arc::new(AtomicUsize::new(1));
        let invoker_a = counting_invoker(&first);
        let invoker_b = counting_invoker(&second);

        invoker_a.set_value("count", Value::from(99)).unwrap();

        assert_eq!(invoker_a.get_value("count").unwrap(), Value::from(99));
        assert_eq!(invoker_b.get_value("count").unwrap(), Value::from(1));
    }
}
