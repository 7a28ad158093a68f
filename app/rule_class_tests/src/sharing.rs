/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::thread;

use attr_schema::attrs::schema::AttributeSchema;
use dupe::Dupe;
use rule_class::descriptor::RuleClassDescriptor;
use rule_class::environment::RuleDefinitionEnvironment;
use rule_class::registry::RuleClassRegistry;
use rule_class::rules::builtin_rule_classes;
use rule_class::rules::objc_proto_library::OBJC_PROTO_LIBRARY;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_registration_products_are_thread_safe() {
    assert_send_sync::<AttributeSchema>();
    assert_send_sync::<RuleClassDescriptor>();
    assert_send_sync::<RuleClassRegistry>();
}

#[test]
fn test_concurrent_readers_see_the_same_schema() -> anyhow::Result<()> {
    let registry = builtin_rule_classes(&RuleDefinitionEnvironment::default())?;
    let rule = registry.instantiable(OBJC_PROTO_LIBRARY)?.dupe();

    let signatures = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let rule = rule.dupe();
                s.spawn(move || {
                    (
                        rule.signature(),
                        rule.schema().implicit_attributes().count(),
                    )
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("reader thread panicked"))
            .collect::<Vec<_>>()
    });

    for (signature, implicit) in signatures {
        assert_eq!(rule.signature(), signature);
        assert_eq!(4, implicit);
    }
    Ok(())
}
