//! Structural grammar of tolerations.

use crate::api::{TaintEffect, Toleration, TolerationOperator};
use crate::core::identifier::{label_value_errors, qualified_name_errors};
use crate::delegate::TolerationValidator;
use crate::field::{FieldPath, Violation, ViolationList};

/// Checks one toleration's key, operator/value pairing and effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralToleration;

impl TolerationValidator for StructuralToleration {
    fn validate_toleration(&self, toleration: &Toleration, path: &FieldPath) -> ViolationList {
        let mut errors = ViolationList::new();

        if toleration.key.is_empty() {
            // An empty key only makes sense as "tolerate everything".
            if toleration.operator != TolerationOperator::Exists {
                errors.push(Violation::invalid(
                    path.child("operator"),
                    toleration.operator,
                    "operator must be Exists when `key` is empty, which means \
                     \"match all values and all keys\"",
                ));
            }
        } else {
            let key_errors = qualified_name_errors(&toleration.key);
            if !key_errors.is_empty() {
                errors.push(Violation::invalid(
                    path.child("key"),
                    &toleration.key,
                    key_errors.join("; "),
                ));
            }
        }

        let effect = path.child("effect");
        if !toleration.effect.is_empty() && TaintEffect::parse(&toleration.effect).is_none() {
            errors.push(Violation::not_supported(
                effect.clone(),
                &toleration.effect,
                &TaintEffect::ALL.map(TaintEffect::as_str),
            ));
        }
        if toleration.toleration_seconds.is_some()
            && toleration.effect != TaintEffect::NoExecute.as_str()
        {
            errors.push(Violation::invalid(
                effect,
                &toleration.effect,
                "effect must be 'NoExecute' when `tolerationSeconds` is set",
            ));
        }

        match toleration.operator {
            TolerationOperator::Equal => {
                let value_errors = label_value_errors(&toleration.value);
                if !value_errors.is_empty() {
                    errors.push(Violation::invalid(
                        path.child("value"),
                        &toleration.value,
                        value_errors.join("; "),
                    ));
                }
            }
            TolerationOperator::Exists => {
                if !toleration.value.is_empty() {
                    errors.push(Violation::invalid(
                        path.child("value"),
                        &toleration.value,
                        "value must be empty when `operator` is 'Exists'",
                    ));
                }
            }
        }

        errors
    }
}
