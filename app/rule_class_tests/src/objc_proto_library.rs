/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use attr_schema::attrs::literal::AttrDefault;
use attr_schema::attrs::literal::AttrLiteral;
use rule_class::environment::RuleDefinitionEnvironment;
use rule_class::rules::base::BASE_RULE;
use rule_class::rules::builtin_rule_classes;
use rule_class::rules::objc_proto_library::OBJC_PROTO_LIBRARY;

#[test]
fn test_builtin_registry() -> anyhow::Result<()> {
    let registry = builtin_rule_classes(&RuleDefinitionEnvironment::default())?;
    assert_eq!(
        vec![BASE_RULE, OBJC_PROTO_LIBRARY],
        registry.iter().map(|r| r.name()).collect::<Vec<_>>()
    );
    assert!(registry.get(BASE_RULE).unwrap().is_abstract());
    assert_eq!(
        &[BASE_RULE.to_owned()],
        registry.instantiable(OBJC_PROTO_LIBRARY)?.ancestors()
    );
    Ok(())
}

#[test]
fn test_implicit_tools_have_fixed_defaults() -> anyhow::Result<()> {
    let registry = builtin_rule_classes(&RuleDefinitionEnvironment::default())?;
    let schema = registry.instantiable(OBJC_PROTO_LIBRARY)?.schema();
    let defaults: Vec<(&str, Option<&AttrDefault>)> = schema
        .implicit_attributes()
        .map(|(name, attr)| (name, attr.default()))
        .collect();
    assert_eq!(
        vec![
            (
                "$compile_protos",
                Some(&AttrDefault::Value(AttrLiteral::label(
                    "//tools/objc:compile_protos"
                )?))
            ),
            (
                "$proto_support",
                Some(&AttrDefault::Value(AttrLiteral::label(
                    "//tools/objc:proto_support"
                )?))
            ),
            (
                "$lib_protobuf",
                Some(&AttrDefault::Value(AttrLiteral::label(
                    "//googlemac/ThirdParty/ProtocolBuffers2/objectivec:ProtocolBuffers_lib"
                )?))
            ),
            (
                "$xcodegen",
                Some(&AttrDefault::Value(AttrLiteral::label(
                    "//tools/objc:xcodegen"
                )?))
            ),
        ],
        defaults
    );
    Ok(())
}

#[test]
fn test_documentation_json() -> anyhow::Result<()> {
    let registry = builtin_rule_classes(&RuleDefinitionEnvironment::default())?;
    let json = serde_json::to_value(registry.instantiable(OBJC_PROTO_LIBRARY)?)?;

    assert_eq!("objc_proto_library", json["name"]);
    assert_eq!("library", json["category"]);
    assert_eq!("Objective-C", json["family"]);
    assert_eq!("ObjcProtoLibrary", json["factory"]);
    assert_eq!(
        "The directly depended upon proto_library rules.",
        json["schema"]["deps"]["doc"]
    );
    assert_eq!(
        serde_json::json!({"only": ["proto_library", "filegroup"]}),
        json["schema"]["deps"]["allowed_rule_kinds"]
    );
    assert_eq!(
        serde_json::json!({"suffixes": [".py"]}),
        json["schema"]["$compile_protos"]["allowed_files"]
    );
    assert_eq!(true, json["schema"]["$xcodegen"]["executable"]);
    assert_eq!("host", json["schema"]["options_file"]["configuration"]);
    Ok(())
}
