/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Whole-declaration checks run by `AttributeSchemaBuilder::build`.

use crate::attrs::attr::Attribute;
use crate::attrs::constraints::AllowedFiles;
use crate::attrs::constraints::AllowedRuleKinds;
use crate::attrs::error::SchemaViolation;
use crate::attrs::error::SchemaViolationKind;
use crate::attrs::literal::AttrDefault;
use crate::attrs::name::is_valid_attr_name;
use crate::attrs::name::AttrVisibility;

/// Appends every problem with `attr` to `violations`. Does not stop at the first one.
pub(crate) fn validate_attribute(
    name: &str,
    attr: &Attribute,
    violations: &mut Vec<SchemaViolation>,
) {
    let mut report = |kind| {
        violations.push(SchemaViolation {
            attribute: name.to_owned(),
            kind,
        })
    };

    if !is_valid_attr_name(name) {
        report(SchemaViolationKind::InvalidName);
    }

    let visibility = AttrVisibility::of(name);
    match (visibility, attr.default()) {
        (AttrVisibility::Implicit, None) => report(SchemaViolationKind::ImplicitWithoutDefault),
        (AttrVisibility::Implicit, Some(AttrDefault::Computed(_))) => {
            report(SchemaViolationKind::ImplicitWithComputedDefault)
        }
        (AttrVisibility::Computed, None | Some(AttrDefault::Value(_))) => {
            report(SchemaViolationKind::ComputedWithoutComputedDefault)
        }
        _ => {}
    }

    if let Some(value) = attr.default_value() {
        if !value.is_assignable_to(attr.value_type()) {
            report(SchemaViolationKind::DefaultTypeMismatch {
                expected: attr.value_type(),
                value: value.to_string(),
            });
        }
    }

    if attr.is_mandatory() {
        if attr.default().is_some() {
            report(SchemaViolationKind::MandatoryWithDefault);
        }
        if !visibility.is_user_settable() {
            report(SchemaViolationKind::MandatoryNotUserSettable);
        }
    }

    let constraints = attr.constraints();
    let value_type = attr.value_type();
    if !value_type.is_label() {
        for constraint in constraints.label_only_constraints() {
            report(SchemaViolationKind::LabelConstraintOnNonLabel {
                constraint,
                value_type,
            });
        }
        return;
    }

    if value_type.is_list() {
        if constraints.single_artifact {
            report(SchemaViolationKind::SingleLabelConstraintOnList(
                "single_artifact",
            ));
        }
        if constraints.executable {
            report(SchemaViolationKind::SingleLabelConstraintOnList("exec"));
        }
    }
    if constraints.allowed_rule_kinds == AllowedRuleKinds::Any
        && constraints.allowed_files == AllowedFiles::Unset
        && !constraints.executable
    {
        report(SchemaViolationKind::UnrestrictedByOmission);
    }
    if let AllowedRuleKinds::Only(kinds) = &constraints.allowed_rule_kinds {
        if kinds.is_empty() {
            report(SchemaViolationKind::EmptyRuleKinds);
        }
    }
    if let AllowedFiles::Suffixes(suffixes) = &constraints.allowed_files {
        if suffixes.is_empty() {
            report(SchemaViolationKind::EmptyFileSuffixes);
        }
        for suffix in suffixes {
            if !suffix.starts_with('.') || suffix.len() < 2 {
                report(SchemaViolationKind::MalformedFileSuffix(suffix.clone()));
            }
        }
    }
}
