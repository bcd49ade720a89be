//! End-to-end create/update validation with the built-in delegates.

mod common;

use std::collections::BTreeMap;

use runtimeclass::api::{ObjectMeta, RuntimeClass, Topology};
use runtimeclass::test_support::{
    exists_term, exists_toleration, runtime_class, stored_runtime_class, topology,
};
use runtimeclass::{ViolationKind, validate_runtime_class, validate_runtime_class_update};

struct CreateCase {
    name: &'static str,
    rc: RuntimeClass,
    expect_error: bool,
}

#[test]
fn validate_runtime_class_cases() {
    common::init_tracing();
    let cases = vec![
        CreateCase {
            name: "invalid name",
            rc: runtime_class("&!@#", "foo"),
            expect_error: true,
        },
        CreateCase {
            name: "invalid handler",
            rc: runtime_class("foo", "&@#$"),
            expect_error: true,
        },
        CreateCase {
            name: "empty handler",
            rc: runtime_class("empty", ""),
            expect_error: true,
        },
        CreateCase {
            name: "valid handler",
            rc: runtime_class("foo", "bar-baz"),
            expect_error: false,
        },
    ];

    for case in cases {
        let errors = validate_runtime_class(&case.rc);
        assert_eq!(
            !errors.is_empty(),
            case.expect_error,
            "{}: {errors}",
            case.name
        );
    }
}

struct UpdateCase {
    name: &'static str,
    new: RuntimeClass,
    expect_error: bool,
}

#[test]
fn validate_runtime_class_update_cases() {
    common::init_tracing();
    let old = stored_runtime_class("foo", "bar");

    let mut labelled = stored_runtime_class("foo", "bar");
    labelled.metadata.labels = BTreeMap::from([("foo".to_string(), "bar".to_string())]);

    let moved_cluster = RuntimeClass {
        metadata: ObjectMeta {
            name: "empty".to_string(),
            cluster_name: "somethingelse".to_string(),
            resource_version: "1".to_string(),
            ..ObjectMeta::default()
        },
        handler: "bar".to_string(),
        topology: None,
    };

    let cases = vec![
        UpdateCase {
            name: "valid metadata update",
            new: labelled,
            expect_error: false,
        },
        UpdateCase {
            name: "invalid metadata update",
            new: moved_cluster,
            expect_error: true,
        },
        UpdateCase {
            name: "invalid handler update",
            new: stored_runtime_class("foo", "somethingelse"),
            expect_error: true,
        },
    ];

    for case in cases {
        let errors = validate_runtime_class_update(&case.new, &old);
        assert_eq!(
            !errors.is_empty(),
            case.expect_error,
            "{}: {errors}",
            case.name
        );
    }
}

#[test]
fn handler_change_is_an_immutable_field_violation() {
    let old = stored_runtime_class("foo", "bar");
    let new = stored_runtime_class("foo", "somethingelse");
    let errors = validate_runtime_class_update(&new, &old);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ViolationKind::Immutable);
    assert_eq!(errors[0].field.to_string(), "handler");
}

struct TopologyCase {
    name: &'static str,
    topology: Topology,
    expect_errs: usize,
}

#[test]
fn validate_topology_cases() {
    common::init_tracing();
    let cases = vec![
        TopologyCase {
            name: "valid topology",
            topology: topology(
                Some(vec![exists_term("valid")]),
                vec![exists_toleration("valid")],
            ),
            expect_errs: 0,
        },
        TopologyCase {
            name: "empty topology",
            topology: Topology::default(),
            expect_errs: 0,
        },
        TopologyCase {
            name: "invalid nodeSelector",
            topology: topology(Some(vec![exists_term("not a valid key!!!")]), Vec::new()),
            expect_errs: 1,
        },
        TopologyCase {
            name: "invalid toleration",
            topology: topology(
                None,
                vec![
                    exists_toleration("valid"),
                    exists_toleration("not a valid key!!!"),
                ],
            ),
            expect_errs: 1,
        },
        TopologyCase {
            name: "invalid topology",
            topology: topology(
                Some(vec![exists_term("not a valid label key!!!")]),
                vec![
                    exists_toleration("valid"),
                    exists_toleration("not a valid toleration key!!!"),
                ],
            ),
            expect_errs: 2,
        },
    ];

    for case in cases {
        let mut rc = runtime_class("foo", "bar");
        rc.topology = Some(case.topology);
        let errors = validate_runtime_class(&rc);
        assert_eq!(errors.len(), case.expect_errs, "{}: {errors}", case.name);
    }
}

#[test]
fn invalid_topology_paths() {
    let mut rc = runtime_class("foo", "bar");
    rc.topology = Some(topology(
        Some(vec![exists_term("not a valid label key!!!")]),
        vec![
            exists_toleration("valid"),
            exists_toleration("not a valid toleration key!!!"),
        ],
    ));
    assert_eq!(
        validate_runtime_class(&rc).fields(),
        vec![
            "topology.nodeSelector.nodeSelectorTerms[0].matchExpressions[0].key",
            "topology.tolerations[1].key",
        ]
    );
}

#[test]
fn every_field_is_reported_in_one_pass() {
    let mut rc = runtime_class("&!@#", "&@#$");
    rc.topology = Some(topology(None, vec![exists_toleration("bad key!")]));
    let errors = validate_runtime_class(&rc);
    assert_eq!(
        errors.fields(),
        vec!["metadata.name", "handler", "topology.tolerations[0].key"]
    );
}

#[test]
fn create_is_idempotent() {
    let mut rc = runtime_class("&!@#", "");
    rc.topology = Some(topology(
        Some(vec![exists_term("bad key!")]),
        vec![exists_toleration("also bad!")],
    ));
    let first = validate_runtime_class(&rc);
    let second = validate_runtime_class(&rc);
    assert_eq!(first, second);
}

#[test]
fn violations_serialize_for_hosts() {
    let errors = validate_runtime_class(&runtime_class("foo", ""));
    let json = serde_json::to_value(&errors).expect("serialize");
    assert_eq!(
        json,
        serde_json::json!([{
            "field": "handler",
            "kind": "required",
            "detail": "must not be empty",
        }])
    );
}

#[test]
fn into_result_rejects_with_summary() {
    let err = validate_runtime_class(&runtime_class("foo", "&@#$"))
        .into_result()
        .expect_err("should reject");
    assert!(err.to_string().starts_with("validation failed: handler: Invalid value"));
    assert!(validate_runtime_class(&runtime_class("foo", "bar")).into_result().is_ok());
}
