/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Rule kinds shipped with the build system.

pub mod base;
pub mod objc_proto_library;

use crate::environment::RuleDefinitionEnvironment;
use crate::registry::RuleClassRegistry;
use crate::registry::RuleClassRegistryBuilder;

/// Registers the built-in rule kinds, ancestors first.
pub fn register_builtin_rules(
    registry: &mut RuleClassRegistryBuilder,
    env: &RuleDefinitionEnvironment,
) -> anyhow::Result<()> {
    registry.register(&base::BaseRule, env)?;
    registry.register(&objc_proto_library::ObjcProtoLibraryRule, env)?;
    Ok(())
}

pub fn builtin_rule_classes(env: &RuleDefinitionEnvironment) -> anyhow::Result<RuleClassRegistry> {
    let mut registry = RuleClassRegistryBuilder::new();
    register_builtin_rules(&mut registry, env)?;
    Ok(registry.build())
}
