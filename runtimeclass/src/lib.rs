//! Validation for `RuntimeClass` objects.
//!
//! A runtime class names a container-execution handler and may carry a
//! placement policy (node selector plus tolerations). This crate decides
//! whether a candidate object, or an old/new pair on update, is well formed,
//! and reports every violation it finds rather than stopping at the first.
//!
//! - **[`core`]**: Pure identifier grammars, placement-policy aggregation and
//!   immutability checks.
//! - **[`delegate`]**: Capability traits for the metadata, selector-term and
//!   toleration validators, plus the built-in implementations.
//!
//! [`validate`] wires the two together behind [`RuntimeClassValidator`].
//! Nothing here performs I/O except [`config::load_config`].

pub mod api;
pub mod config;
pub mod core;
pub mod delegate;
pub mod field;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod validate;

pub use api::RuntimeClass;
pub use field::{FieldPath, Violation, ViolationKind, ViolationList};
pub use validate::{RuntimeClassValidator, validate_runtime_class, validate_runtime_class_update};
