//! Structural grammar of node-selector terms.

use crate::api::{NodeSelectorOperator, NodeSelectorRequirement, NodeSelectorTerm};
use crate::core::identifier::{dns1123_subdomain_errors, qualified_name_errors};
use crate::delegate::SelectorTermValidator;
use crate::field::{FieldPath, Violation, ViolationList};

/// The only node field a `matchFields` requirement may select on.
pub const NODE_FIELD_SELECTOR_KEY: &str = "metadata.name";

/// Checks match expressions against node-label rules and match fields
/// against the node-field rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralSelector;

impl SelectorTermValidator for StructuralSelector {
    fn validate_term(&self, term: &NodeSelectorTerm, path: &FieldPath) -> ViolationList {
        let mut errors = ViolationList::new();
        for (i, requirement) in term.match_expressions.iter().enumerate() {
            errors.extend(validate_expression(
                requirement,
                &path.child("matchExpressions").index(i),
            ));
        }
        for (i, requirement) in term.match_fields.iter().enumerate() {
            errors.extend(validate_field_requirement(
                requirement,
                &path.child("matchFields").index(i),
            ));
        }
        errors
    }
}

fn validate_expression(requirement: &NodeSelectorRequirement, path: &FieldPath) -> ViolationList {
    let mut errors = ViolationList::new();

    let key_errors = qualified_name_errors(&requirement.key);
    if !key_errors.is_empty() {
        errors.push(Violation::invalid(
            path.child("key"),
            &requirement.key,
            key_errors.join("; "),
        ));
    }

    let values = path.child("values");
    match requirement.operator {
        NodeSelectorOperator::In | NodeSelectorOperator::NotIn => {
            if requirement.values.is_empty() {
                errors.push(Violation::required(
                    values,
                    "must be specified when `operator` is 'In' or 'NotIn'",
                ));
            }
        }
        NodeSelectorOperator::Exists | NodeSelectorOperator::DoesNotExist => {
            if !requirement.values.is_empty() {
                errors.push(Violation::forbidden(
                    values,
                    "may not be specified when `operator` is 'Exists' or 'DoesNotExist'",
                ));
            }
        }
        NodeSelectorOperator::Gt | NodeSelectorOperator::Lt => match requirement.values.as_slice() {
            [value] => {
                if value.parse::<i64>().is_err() {
                    errors.push(Violation::invalid(
                        values.index(0),
                        value,
                        "must be an integer when `operator` is 'Gt' or 'Lt'",
                    ));
                }
            }
            _ => errors.push(Violation::required(
                values,
                "must have a single value when `operator` is 'Gt' or 'Lt'",
            )),
        },
    }
    errors
}

fn validate_field_requirement(
    requirement: &NodeSelectorRequirement,
    path: &FieldPath,
) -> ViolationList {
    let mut errors = ViolationList::new();

    if requirement.key != NODE_FIELD_SELECTOR_KEY {
        errors.push(Violation::not_supported(
            path.child("key"),
            &requirement.key,
            &[NODE_FIELD_SELECTOR_KEY],
        ));
    }

    match requirement.operator {
        NodeSelectorOperator::In | NodeSelectorOperator::NotIn => {
            match requirement.values.as_slice() {
                [value] => {
                    let messages = dns1123_subdomain_errors(value);
                    if !messages.is_empty() {
                        errors.push(Violation::invalid(
                            path.child("values").index(0),
                            value,
                            messages.join("; "),
                        ));
                    }
                }
                _ => errors.push(Violation::required(
                    path.child("values"),
                    "must have exactly one value for a node field selector",
                )),
            }
        }
        other => errors.push(Violation::not_supported(
            path.child("operator"),
            other.as_str(),
            &[
                NodeSelectorOperator::In.as_str(),
                NodeSelectorOperator::NotIn.as_str(),
            ],
        )),
    }
    errors
}
