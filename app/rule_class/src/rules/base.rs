/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use attr_schema::attrs::attr::Attribute;
use attr_schema::attrs::literal::AttrLiteral;

use crate::definition::RuleDefinition;
use crate::definition::RuleDefinitionMetadata;
use crate::descriptor::RuleCategory;
use crate::descriptor::RuleClassBuilder;
use crate::environment::RuleDefinitionEnvironment;
use crate::factory::RuleFactory;

pub const BASE_RULE: &str = "$base_rule";

pub const DEPS_ATTRIBUTE_FIELD: &str = "deps";
pub const DATA_ATTRIBUTE_FIELD: &str = "data";
pub const TAGS_ATTRIBUTE_FIELD: &str = "tags";
pub const TESTONLY_ATTRIBUTE_FIELD: &str = "testonly";
pub const DEPRECATION_ATTRIBUTE_FIELD: &str = "deprecation";

/// Attributes shared by every concrete rule kind.
pub struct BaseRule;

impl RuleDefinition for BaseRule {
    fn metadata(&self) -> RuleDefinitionMetadata {
        RuleDefinitionMetadata {
            name: BASE_RULE,
            ancestors: &[],
            category: RuleCategory::Other,
            family: None,
            doc: "",
            factory: Some(RuleFactory::Abstract),
        }
    }

    fn build(
        &self,
        builder: &mut RuleClassBuilder,
        _env: &RuleDefinitionEnvironment,
    ) -> anyhow::Result<()> {
        builder
            .add(
                DEPS_ATTRIBUTE_FIELD,
                Attribute::label_list()
                    .allow_any_file()
                    .with_doc("The list of other targets this target depends on."),
            )?
            .add(
                DATA_ATTRIBUTE_FIELD,
                Attribute::label_list()
                    .allow_any_file()
                    .with_doc("Files needed by this target at runtime."),
            )?
            .add(
                TAGS_ATTRIBUTE_FIELD,
                Attribute::string_list()
                    .with_default(AttrLiteral::empty_string_list())
                    .with_doc("Free-form tags, used by tests and tooling to filter targets."),
            )?
            .add(
                TESTONLY_ATTRIBUTE_FIELD,
                Attribute::bool()
                    .with_default(AttrLiteral::Bool(false))
                    .with_doc("If set, only test targets may depend on this target."),
            )?
            .add(
                DEPRECATION_ATTRIBUTE_FIELD,
                Attribute::string()
                    .with_default(AttrLiteral::string(""))
                    .with_doc("Warning shown when another target depends on this one."),
            )?;
        Ok(())
    }
}
