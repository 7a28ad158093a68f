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
use attr_schema::attrs::error::AttributeSchemaError;
use attr_schema::attrs::literal::AttrLiteral;
use rule_class::descriptor::RuleClassBuilder;
use rule_class::descriptor::RuleClassDescriptor;

fn abstract_rule(
    name: &str,
    attrs: Vec<(&str, Attribute)>,
) -> anyhow::Result<RuleClassDescriptor> {
    let mut builder = RuleClassBuilder::new(name, &[])?;
    builder.make_abstract();
    for (attr_name, attr) in attrs {
        builder.add(attr_name, attr)?;
    }
    builder.build()
}

#[test]
fn test_later_parent_then_own_declaration_wins() -> anyhow::Result<()> {
    let p1 = abstract_rule(
        "$p1",
        vec![
            (
                "deps",
                Attribute::label_list().allowed_rule_kinds(["library"]),
            ),
            (
                "copts",
                Attribute::string_list().with_default(AttrLiteral::empty_string_list()),
            ),
        ],
    )?;
    let p2 = abstract_rule(
        "$p2",
        vec![(
            "deps",
            Attribute::label_list().allowed_rule_kinds(["proto_library"]),
        )],
    )?;

    let inherited_only = {
        let mut builder = RuleClassBuilder::new("$merged", &[&p1, &p2])?;
        builder.make_abstract();
        builder.build()?
    };
    assert!(inherited_only
        .attribute("deps")
        .unwrap()
        .allows_rule_kind("proto_library"));
    assert!(!inherited_only
        .attribute("deps")
        .unwrap()
        .allows_rule_kind("library"));

    let mut builder = RuleClassBuilder::new("$own", &[&p1, &p2])?;
    builder.make_abstract().override_attr(
        "deps",
        Attribute::label_list().allowed_rule_kinds(["objc_library"]),
    )?;
    let own = builder.build()?;
    assert_eq!(
        Some(&["objc_library".to_owned()][..]),
        own.attribute("deps").unwrap().allowed_rule_kinds_list()
    );
    assert_eq!(
        vec!["name", "deps", "copts"],
        own.schema().names().collect::<Vec<_>>()
    );
    assert_eq!(&["$p1".to_owned(), "$p2".to_owned()], own.ancestors());
    Ok(())
}

#[test]
fn test_override_keeps_type_or_fails() -> anyhow::Result<()> {
    let base = abstract_rule(
        "$library_base",
        vec![(
            "deps",
            Attribute::label_list().allowed_rule_kinds(["library"]),
        )],
    )?;

    let mut builder = RuleClassBuilder::new("proto_lib", &[&base])?;
    builder.make_abstract().override_attr(
        "deps",
        Attribute::label_list().allowed_rule_kinds(["library", "filegroup"]),
    )?;
    let rule = builder.build()?;
    let deps = rule.attribute("deps").unwrap();
    assert!(deps.allows_rule_kind("library"));
    assert!(deps.allows_rule_kind("filegroup"));

    for attr in [
        Attribute::label().allow_any_file(),
        Attribute::string(),
        Attribute::string_list(),
        Attribute::bool(),
        Attribute::int(),
    ] {
        let mut builder = RuleClassBuilder::new("proto_lib", &[&base])?;
        let err = builder.override_attr("deps", attr).unwrap_err();
        match err.downcast_ref::<AttributeSchemaError>() {
            Some(AttributeSchemaError::TypeMismatch {
                name, inherited, ..
            }) => {
                assert_eq!("deps", name);
                assert_eq!(AttrType::LabelList, *inherited);
            }
            _ => panic!("unexpected error: {:#}", err),
        }
        assert!(format!("{:#}", err).contains("proto_lib"));
    }
    Ok(())
}

#[test]
fn test_override_of_unknown_attribute() -> anyhow::Result<()> {
    let mut builder = RuleClassBuilder::new("proto_lib", &[])?;
    let err = builder
        .override_attr("deps", Attribute::label_list().allow_any_file())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AttributeSchemaError>(),
        Some(AttributeSchemaError::UnknownAttribute(name)) if name == "deps"
    ));
    Ok(())
}

#[test]
fn test_duplicate_declaration() -> anyhow::Result<()> {
    let mut builder = RuleClassBuilder::new("proto_lib", &[])?;
    builder.add("srcs", Attribute::label_list().allow_any_file())?;
    for attr in [
        Attribute::label_list().allow_any_file(),
        Attribute::string(),
    ] {
        let err = builder.add("srcs", attr).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AttributeSchemaError>(),
            Some(AttributeSchemaError::DuplicateAttribute(name)) if name == "srcs"
        ));
    }
    Ok(())
}
