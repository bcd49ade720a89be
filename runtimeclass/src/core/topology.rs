//! Placement policy (topology) aggregation.
//!
//! The grammar of selector terms and tolerations belongs to the delegates.
//! This module only fans out to them and roots each call at the right path.
//! Results are strictly additive: every term and every toleration is visited,
//! and nothing a delegate reported is checked again here.

use tracing::trace;

use crate::api::Topology;
use crate::delegate::{SelectorTermValidator, TolerationValidator};
use crate::field::{FieldPath, Violation, ViolationList};

/// Validate an optional placement policy rooted at `path`.
///
/// `None` is always valid.
pub fn validate_topology<S, T>(
    topology: Option<&Topology>,
    path: &FieldPath,
    selector: &S,
    toleration: &T,
) -> ViolationList
where
    S: SelectorTermValidator + ?Sized,
    T: TolerationValidator + ?Sized,
{
    let mut errors = ViolationList::new();
    let Some(topology) = topology else {
        return errors;
    };

    if let Some(node_selector) = &topology.node_selector {
        let terms_path = path.child("nodeSelector").child("nodeSelectorTerms");
        if node_selector.node_selector_terms.is_empty() {
            errors.push(Violation::required(
                terms_path.clone(),
                "must have at least one node selector term",
            ));
        }
        trace!(
            terms = node_selector.node_selector_terms.len(),
            "validating node selector terms"
        );
        for (i, term) in node_selector.node_selector_terms.iter().enumerate() {
            errors.extend(selector.validate_term(term, &terms_path.index(i)));
        }
    }

    let tolerations_path = path.child("tolerations");
    trace!(
        tolerations = topology.tolerations.len(),
        "validating tolerations"
    );
    for (i, toleration_entry) in topology.tolerations.iter().enumerate() {
        errors.extend(toleration.validate_toleration(toleration_entry, &tolerations_path.index(i)));
    }

    errors
}
