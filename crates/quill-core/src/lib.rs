//! # Quill Core
//!
//! Core building blocks of the Quill plugin runtime: identity descriptors and
//! the late-bound invocation bridge.
//!
//! Quill hosts a set of interchangeable extensions (word predictors, agents,
//! scanners). Two pieces make that swappability real:
//!
//! - **Descriptors** ([`Descriptor`]): every extension is identified by a
//!   stable UUID, never by its concrete type. Saved references (the user's
//!   chosen predictor, for example) survive renames and relocations.
//! - **Invocation bridge** ([`ExtensionInvoker`]): a per-instance table of
//!   named getter/setter/method closures that the host uses to manipulate an
//!   extension's members without static typing. Absent members resolve to
//!   [`InvokeError::NotSupported`], a normal capability-probe outcome.
//!
//! The word-prediction contract built on these lives in `quill-predict`; the
//! registry and host orchestration live in `quill-runtime`.

pub mod descriptor;
pub mod error;
pub mod invoker;

pub use descriptor::Descriptor;
pub use error::{InvokeError, InvokeResult};
pub use invoker::{ExtensionInvoker, InvokerBuilder};
