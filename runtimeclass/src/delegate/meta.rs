//! Generic object-metadata validation for cluster-scoped objects.

use std::collections::BTreeMap;

use tracing::trace;

use crate::api::ObjectMeta;
use crate::core::identifier::{
    IdentifierKind, dns1123_subdomain_prefix_errors, label_value_errors, qualified_name_errors,
    validate_identifier,
};
use crate::core::immutability::validate_immutable_field;
use crate::delegate::ObjectMetaValidator;
use crate::field::{FieldPath, Violation, ViolationList};

/// Upper bound on the summed size of all annotation keys and values.
pub const TOTAL_ANNOTATION_SIZE_LIMIT: usize = 256 * 1024;

/// Metadata rules shared by every cluster-scoped object kind.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericObjectMeta;

impl ObjectMetaValidator for GenericObjectMeta {
    fn validate_create(&self, meta: &ObjectMeta, path: &FieldPath) -> ViolationList {
        let mut errors = ViolationList::new();

        if meta.generate_name.is_empty() {
            if meta.name.is_empty() {
                errors.push(Violation::required(
                    path.child("name"),
                    "name or generateName is required",
                ));
            }
        } else {
            let generate_name = path.child("generateName");
            errors.extend(
                dns1123_subdomain_prefix_errors(&meta.generate_name)
                    .into_iter()
                    .map(|msg| Violation::invalid(generate_name.clone(), &meta.generate_name, msg)),
            );
        }
        if !meta.name.is_empty() {
            errors.extend(validate_identifier(
                IdentifierKind::Name,
                &meta.name,
                &path.child("name"),
            ));
        }

        if !meta.namespace.is_empty() {
            errors.push(Violation::forbidden(
                path.child("namespace"),
                "not allowed on this type",
            ));
        }
        if meta.generation < 0 {
            errors.push(Violation::invalid(
                path.child("generation"),
                meta.generation,
                "must be greater than or equal to 0",
            ));
        }
        if let Some(seconds) = meta.deletion_grace_period_seconds
            && seconds < 0
        {
            errors.push(Violation::invalid(
                path.child("deletionGracePeriodSeconds"),
                seconds,
                "must be greater than or equal to 0",
            ));
        }

        errors.extend(validate_common(meta, path));
        trace!(name = %meta.name, violations = errors.len(), "validated object metadata");
        errors
    }

    fn validate_update(
        &self,
        new: &ObjectMeta,
        old: &ObjectMeta,
        path: &FieldPath,
    ) -> ViolationList {
        let mut errors = validate_common(new, path);

        if new.resource_version.is_empty() {
            errors.push(Violation::invalid(
                path.child("resourceVersion"),
                &new.resource_version,
                "must be specified for an update",
            ));
        }

        errors.extend(validate_immutable_field(&new.name, &old.name, &path.child("name")));
        errors.extend(validate_immutable_field(
            &new.namespace,
            &old.namespace,
            &path.child("namespace"),
        ));
        errors.extend(validate_immutable_field(&new.uid, &old.uid, &path.child("uid")));
        errors.extend(validate_immutable_field(
            &new.creation_timestamp,
            &old.creation_timestamp,
            &path.child("creationTimestamp"),
        ));
        errors.extend(validate_immutable_field(
            &new.cluster_name,
            &old.cluster_name,
            &path.child("clusterName"),
        ));

        if new.generation < old.generation {
            errors.push(Violation::invalid(
                path.child("generation"),
                new.generation,
                "must not be decremented",
            ));
        }

        // Deletion markers may be set once and then only move toward completion.
        if old.deletion_timestamp.is_some() {
            errors.extend(validate_immutable_field(
                &new.deletion_timestamp,
                &old.deletion_timestamp,
                &path.child("deletionTimestamp"),
            ));
        }
        match (old.deletion_grace_period_seconds, new.deletion_grace_period_seconds) {
            (Some(_), None) => errors.push(Violation::immutable(
                path.child("deletionGracePeriodSeconds"),
            )),
            (Some(before), Some(after)) if after > before => errors.push(Violation::invalid(
                path.child("deletionGracePeriodSeconds"),
                after,
                format!("must not be increased (was {before})"),
            )),
            _ => {}
        }

        trace!(name = %new.name, violations = errors.len(), "validated object metadata update");
        errors
    }
}

/// Rules checked on every write: labels, annotations and finalizers.
fn validate_common(meta: &ObjectMeta, path: &FieldPath) -> ViolationList {
    let mut errors = validate_labels(&meta.labels, &path.child("labels"));
    errors.extend(validate_annotations(&meta.annotations, &path.child("annotations")));
    errors.extend(validate_finalizers(&meta.finalizers, &path.child("finalizers")));
    errors
}

fn validate_labels(labels: &BTreeMap<String, String>, path: &FieldPath) -> ViolationList {
    let mut errors = ViolationList::new();
    for (key, value) in labels {
        errors.extend(
            qualified_name_errors(key)
                .into_iter()
                .map(|msg| Violation::invalid(path.clone(), key, msg)),
        );
        errors.extend(
            label_value_errors(value)
                .into_iter()
                .map(|msg| Violation::invalid(path.key(key), value, msg)),
        );
    }
    errors
}

fn validate_annotations(annotations: &BTreeMap<String, String>, path: &FieldPath) -> ViolationList {
    let mut errors = ViolationList::new();
    let mut total = 0usize;
    for (key, value) in annotations {
        errors.extend(
            qualified_name_errors(&key.to_lowercase())
                .into_iter()
                .map(|msg| Violation::invalid(path.clone(), key, msg)),
        );
        total += key.len() + value.len();
    }
    if total > TOTAL_ANNOTATION_SIZE_LIMIT {
        errors.push(Violation::too_long(
            path.clone(),
            total,
            TOTAL_ANNOTATION_SIZE_LIMIT,
        ));
    }
    errors
}

fn validate_finalizers(finalizers: &[String], path: &FieldPath) -> ViolationList {
    let mut errors = ViolationList::new();
    for (i, finalizer) in finalizers.iter().enumerate() {
        errors.extend(
            qualified_name_errors(finalizer)
                .into_iter()
                .map(|msg| Violation::invalid(path.index(i), finalizer, msg)),
        );
    }
    errors
}
