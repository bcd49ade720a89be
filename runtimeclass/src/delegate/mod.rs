//! Capability contracts for the structural validators a runtime class defers to.
//!
//! The runtime-class core never inspects object metadata, selector terms or
//! tolerations itself. It hands each one to a delegate and forwards whatever
//! comes back. Closures with the matching signature implement every trait,
//! so tests can stub a delegate in one line.

pub mod meta;
pub mod selector;
pub mod toleration;

use crate::api::{NodeSelectorTerm, ObjectMeta, Toleration};
use crate::field::{FieldPath, ViolationList};

pub use meta::GenericObjectMeta;
pub use selector::StructuralSelector;
pub use toleration::StructuralToleration;

/// Generic object-metadata rules for create and update.
pub trait ObjectMetaValidator: Send + Sync {
    fn validate_create(&self, meta: &ObjectMeta, path: &FieldPath) -> ViolationList;

    fn validate_update(&self, new: &ObjectMeta, old: &ObjectMeta, path: &FieldPath)
    -> ViolationList;
}

/// Grammar of a single node-selector term.
pub trait SelectorTermValidator: Send + Sync {
    fn validate_term(&self, term: &NodeSelectorTerm, path: &FieldPath) -> ViolationList;
}

/// Grammar of a single toleration.
pub trait TolerationValidator: Send + Sync {
    fn validate_toleration(&self, toleration: &Toleration, path: &FieldPath) -> ViolationList;
}

impl<F> SelectorTermValidator for F
where
    F: Fn(&NodeSelectorTerm, &FieldPath) -> ViolationList + Send + Sync,
{
    fn validate_term(&self, term: &NodeSelectorTerm, path: &FieldPath) -> ViolationList {
        self(term, path)
    }
}

impl<F> TolerationValidator for F
where
    F: Fn(&Toleration, &FieldPath) -> ViolationList + Send + Sync,
{
    fn validate_toleration(&self, toleration: &Toleration, path: &FieldPath) -> ViolationList {
        self(toleration, path)
    }
}

/// Pair of closures standing in for an [`ObjectMetaValidator`].
pub struct MetaFns<C, U> {
    pub create: C,
    pub update: U,
}

impl<C, U> ObjectMetaValidator for MetaFns<C, U>
where
    C: Fn(&ObjectMeta, &FieldPath) -> ViolationList + Send + Sync,
    U: Fn(&ObjectMeta, &ObjectMeta, &FieldPath) -> ViolationList + Send + Sync,
{
    fn validate_create(&self, meta: &ObjectMeta, path: &FieldPath) -> ViolationList {
        (self.create)(meta, path)
    }

    fn validate_update(
        &self,
        new: &ObjectMeta,
        old: &ObjectMeta,
        path: &FieldPath,
    ) -> ViolationList {
        (self.update)(new, old, path)
    }
}
