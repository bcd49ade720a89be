//! A single validator shared across threads gives the same answers as a
//! fresh one per call.

mod common;

use std::sync::Arc;
use std::thread;

use runtimeclass::test_support::{exists_toleration, runtime_class, topology};
use runtimeclass::{RuntimeClassValidator, validate_runtime_class};

#[test]
fn shared_validator_is_reentrant() {
    common::init_tracing();
    let validator = Arc::new(RuntimeClassValidator::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                let handler = if i % 2 == 0 { "runc".to_string() } else { format!("Bad_{i}") };
                let mut rc = runtime_class(&format!("class-{i}"), &handler);
                rc.topology = Some(topology(None, vec![exists_toleration("bad key!")]));
                (rc.clone(), validator.validate_create(&rc))
            })
        })
        .collect();

    for handle in handles {
        let (rc, errors) = handle.join().expect("join");
        assert_eq!(errors, validate_runtime_class(&rc));
    }
}
