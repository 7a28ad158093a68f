/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use crate::descriptor::RuleCategory;
use crate::descriptor::RuleClassBuilder;
use crate::environment::RuleDefinitionEnvironment;
use crate::factory::RuleFactory;

/// Identity of a rule kind, known before its attributes are declared.
#[derive(Debug, Clone)]
pub struct RuleDefinitionMetadata {
    pub name: &'static str,
    /// Rule kinds whose attributes are inherited, in layering order. They must already be
    /// registered.
    pub ancestors: &'static [&'static str],
    pub category: RuleCategory,
    pub family: Option<&'static str>,
    pub doc: &'static str,
    /// `None` leaves the factory unset, which fails registration.
    pub factory: Option<RuleFactory>,
}

/// Declares the attributes of one rule kind.
pub trait RuleDefinition {
    fn metadata(&self) -> RuleDefinitionMetadata;

    fn build(
        &self,
        builder: &mut RuleClassBuilder,
        env: &RuleDefinitionEnvironment,
    ) -> anyhow::Result<()>;
}
