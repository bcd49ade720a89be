//! Test-only helpers for constructing runtime classes and placement policies.

use crate::api::{
    NodeSelector, NodeSelectorOperator, NodeSelectorRequirement, NodeSelectorTerm, ObjectMeta,
    RuntimeClass, TaintEffect, Toleration, TolerationOperator, Topology,
};

/// Runtime class with the given name and handler and no topology.
pub fn runtime_class(name: &str, handler: &str) -> RuntimeClass {
    RuntimeClass {
        metadata: ObjectMeta::named(name),
        handler: handler.to_string(),
        topology: None,
    }
}

/// Runtime class as read back from storage (carries a resource version).
pub fn stored_runtime_class(name: &str, handler: &str) -> RuntimeClass {
    let mut rc = runtime_class(name, handler);
    rc.metadata.resource_version = "1".to_string();
    rc
}

/// Selector term with a single `key Exists` expression.
pub fn exists_term(key: &str) -> NodeSelectorTerm {
    NodeSelectorTerm {
        match_expressions: vec![NodeSelectorRequirement {
            key: key.to_string(),
            operator: NodeSelectorOperator::Exists,
            values: Vec::new(),
        }],
        match_fields: Vec::new(),
    }
}

/// `key Exists` toleration for the `NoSchedule` effect.
pub fn exists_toleration(key: &str) -> Toleration {
    Toleration {
        key: key.to_string(),
        operator: TolerationOperator::Exists,
        value: String::new(),
        effect: TaintEffect::NoSchedule.as_str().to_string(),
        toleration_seconds: None,
    }
}

/// Topology from optional selector terms and tolerations.
pub fn topology(terms: Option<Vec<NodeSelectorTerm>>, tolerations: Vec<Toleration>) -> Topology {
    Topology {
        node_selector: terms.map(|node_selector_terms| NodeSelector { node_selector_terms }),
        tolerations,
    }
}
