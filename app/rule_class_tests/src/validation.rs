/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use attr_schema::attrs::attr::Attribute;
use attr_schema::attrs::attr_type::AttrType;
use attr_schema::attrs::builder::AttributeSchemaBuilder;
use attr_schema::attrs::constraints::AttrConfiguration;
use attr_schema::attrs::error::AttributeSchemaError;
use attr_schema::attrs::error::SchemaViolationKind;
use attr_schema::attrs::error::SchemaViolations;
use attr_schema::attrs::literal::AttrLiteral;
use rule_class::descriptor::RuleClassBuilder;

fn violations(err: &anyhow::Error) -> &SchemaViolations {
    match err.downcast_ref::<AttributeSchemaError>() {
        Some(AttributeSchemaError::SchemaValidation(violations)) => violations,
        _ => panic!("expected a schema validation error, got {:#}", err),
    }
}

#[test]
fn test_implicit_without_default() -> anyhow::Result<()> {
    let mut builder = AttributeSchemaBuilder::new();
    builder.declare("$tool", Attribute::label_list().allow_any_file())?;
    let err = builder.build().unwrap_err();
    let violations = violations(&err);
    assert_eq!(1, violations.iter().len());
    assert!(violations.contains("$tool", &SchemaViolationKind::ImplicitWithoutDefault));
    assert!(err.to_string().contains("$tool"));
    Ok(())
}

#[test]
fn test_every_violation_reported() -> anyhow::Result<()> {
    let mut builder = RuleClassBuilder::new("broken_rule", &[])?;
    builder
        .make_abstract()
        .add("$a", Attribute::label().exec())?
        .add("$b", Attribute::string())?
        .add("srcs", Attribute::label_list())?
        .add(
            "copts",
            Attribute::string_list().cfg(AttrConfiguration::Host),
        )?
        .add(
            "linkstatic",
            Attribute::bool().with_default(AttrLiteral::string("yes")),
        )?;
    let err = builder.build().unwrap_err();

    let rendered = format!("{:#}", err);
    assert!(rendered.contains("broken_rule"));
    for name in ["$a", "$b", "srcs", "copts", "linkstatic"] {
        assert!(rendered.contains(&format!("attribute `{}`", name)), "{}", rendered);
    }

    let violations = violations(&err);
    assert!(violations.contains("$a", &SchemaViolationKind::ImplicitWithoutDefault));
    assert!(violations.contains("$b", &SchemaViolationKind::ImplicitWithoutDefault));
    assert!(violations.contains("srcs", &SchemaViolationKind::UnrestrictedByOmission));
    assert!(violations.contains(
        "copts",
        &SchemaViolationKind::LabelConstraintOnNonLabel {
            constraint: "cfg",
            value_type: AttrType::StringList,
        }
    ));
    assert!(violations.contains(
        "linkstatic",
        &SchemaViolationKind::DefaultTypeMismatch {
            expected: AttrType::Bool,
            value: "\"yes\"".to_owned(),
        }
    ));
    Ok(())
}

#[test]
fn test_query_surface_reports_declared_constraints() -> anyhow::Result<()> {
    let mut builder = AttributeSchemaBuilder::new();
    builder.declare(
        "options_file",
        Attribute::label()
            .allow_any_file()
            .cfg(AttrConfiguration::Host)
            .single_artifact(),
    )?;
    let schema = builder.build()?;
    let (name, id, attr) = schema.attr_specs().next().unwrap();
    assert_eq!("options_file", name);
    assert_eq!(0, id.index());
    assert_eq!(AttrType::Label, attr.value_type());
    assert_eq!(AttrConfiguration::Host, attr.configuration());
    assert!(attr.is_single_artifact());
    assert_eq!(None, attr.allowed_rule_kinds_list());
    Ok(())
}

#[test]
fn test_build_twice() -> anyhow::Result<()> {
    let mut builder = RuleClassBuilder::new("proto_lib", &[])?;
    builder
        .make_abstract()
        .add("deps", Attribute::label_list().allowed_rule_kinds(["proto_library"]))?
        .add(
            "$xcodegen",
            Attribute::label()
                .exec()
                .cfg(AttrConfiguration::Host)
                .with_default(AttrLiteral::label("//tools/objc:xcodegen")?),
        )?;
    let first = builder.build()?;
    let second = builder.build()?;
    assert_eq!(first.schema(), second.schema());
    assert_eq!(first, second);
    Ok(())
}
