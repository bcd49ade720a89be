//! Create and update validation for runtime classes.
//!
//! Both entry points run every check and concatenate the results in a fixed
//! order, so a caller gets the complete diagnosis in one pass. An empty list
//! means accept.

use tracing::debug;

use crate::api::RuntimeClass;
use crate::config::{TopologyUpdatePolicy, ValidationConfig};
use crate::core::identifier::{IdentifierKind, validate_identifier};
use crate::core::immutability::validate_immutable_field;
use crate::core::topology::validate_topology;
use crate::delegate::{
    GenericObjectMeta, ObjectMetaValidator, SelectorTermValidator, StructuralSelector,
    StructuralToleration, TolerationValidator,
};
use crate::field::{FieldPath, ViolationList};

/// Runtime-class validator wired to its metadata, selector and toleration delegates.
///
/// Stateless between calls; share one instance freely across threads.
#[derive(Debug, Clone)]
pub struct RuntimeClassValidator<
    M = GenericObjectMeta,
    S = StructuralSelector,
    T = StructuralToleration,
> {
    metadata: M,
    selector: S,
    toleration: T,
    config: ValidationConfig,
}

impl RuntimeClassValidator {
    /// Validator using the built-in structural delegates.
    pub fn new() -> Self {
        Self::with_delegates(GenericObjectMeta, StructuralSelector, StructuralToleration)
    }
}

impl Default for RuntimeClassValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl<M, S, T> RuntimeClassValidator<M, S, T>
where
    M: ObjectMetaValidator,
    S: SelectorTermValidator,
    T: TolerationValidator,
{
    pub fn with_delegates(metadata: M, selector: S, toleration: T) -> Self {
        Self {
            metadata,
            selector,
            toleration,
            config: ValidationConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate a runtime class about to be created.
    ///
    /// Order: metadata, handler, topology.
    pub fn validate_create(&self, rc: &RuntimeClass) -> ViolationList {
        let mut errors = self
            .metadata
            .validate_create(&rc.metadata, &FieldPath::new("metadata"));
        errors.extend(validate_identifier(
            IdentifierKind::Handler,
            &rc.handler,
            &FieldPath::new("handler"),
        ));
        errors.extend(validate_topology(
            rc.topology.as_ref(),
            &FieldPath::new("topology"),
            &self.selector,
            &self.toleration,
        ));

        debug!(
            name = %rc.metadata.name,
            handler = %rc.handler,
            violations = errors.len(),
            "validated runtime class create"
        );
        errors
    }

    /// Validate `new` replacing the stored `old`.
    ///
    /// Only metadata update rules and handler immutability are checked, plus
    /// whatever the configured [`TopologyUpdatePolicy`] asks for.
    pub fn validate_update(&self, new: &RuntimeClass, old: &RuntimeClass) -> ViolationList {
        let mut errors = self.metadata.validate_update(
            &new.metadata,
            &old.metadata,
            &FieldPath::new("metadata"),
        );
        errors.extend(validate_immutable_field(
            &new.handler,
            &old.handler,
            &FieldPath::new("handler"),
        ));

        let topology_path = FieldPath::new("topology");
        match self.config.update.topology {
            TopologyUpdatePolicy::Ignore => {}
            TopologyUpdatePolicy::Immutable => {
                errors.extend(validate_immutable_field(
                    &new.topology,
                    &old.topology,
                    &topology_path,
                ));
            }
            TopologyUpdatePolicy::Revalidate => {
                errors.extend(validate_topology(
                    new.topology.as_ref(),
                    &topology_path,
                    &self.selector,
                    &self.toleration,
                ));
            }
        }

        debug!(
            name = %new.metadata.name,
            topology_policy = ?self.config.update.topology,
            violations = errors.len(),
            "validated runtime class update"
        );
        errors
    }
}

/// Validate a new runtime class with the default delegates.
pub fn validate_runtime_class(rc: &RuntimeClass) -> ViolationList {
    RuntimeClassValidator::new().validate_create(rc)
}

/// Validate a runtime class update with the default delegates.
pub fn validate_runtime_class_update(new: &RuntimeClass, old: &RuntimeClass) -> ViolationList {
    RuntimeClassValidator::new().validate_update(new, old)
}
