/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! `objc_proto_library`: a static library generated from `proto_library` dependencies.
//!
//! The proto compiler script and the Xcode project generator are wired in as implicit, host
//! configured attributes so they run on the machine doing the build.

use attr_schema::attrs::attr::Attribute;
use attr_schema::attrs::constraints::AttrConfiguration;

use crate::definition::RuleDefinition;
use crate::definition::RuleDefinitionMetadata;
use crate::descriptor::RuleCategory;
use crate::descriptor::RuleClassBuilder;
use crate::environment::RuleDefinitionEnvironment;
use crate::factory::RuleConfiguredTargetFactory;
use crate::factory::RuleFactory;
use crate::rules::base::BASE_RULE;
use crate::rules::base::DEPS_ATTRIBUTE_FIELD;

pub const OBJC_PROTO_LIBRARY: &str = "objc_proto_library";

pub const OPTIONS_FILE_ATTR: &str = "options_file";
pub const COMPILE_PROTOS_ATTR: &str = "$compile_protos";
pub const PROTO_SUPPORT_ATTR: &str = "$proto_support";
pub const LIBPROTOBUF_ATTR: &str = "$lib_protobuf";
pub const XCODEGEN_ATTR: &str = "$xcodegen";

const COMPILE_PROTOS_LABEL: &str = "//tools/objc:compile_protos";
const PROTO_SUPPORT_LABEL: &str = "//tools/objc:proto_support";
const LIBPROTOBUF_LABEL: &str =
    "//googlemac/ThirdParty/ProtocolBuffers2/objectivec:ProtocolBuffers_lib";
const XCODEGEN_LABEL: &str = "//tools/objc:xcodegen";

#[derive(Debug)]
pub struct ObjcProtoLibraryFactory;

impl RuleConfiguredTargetFactory for ObjcProtoLibraryFactory {
    fn name(&self) -> &str {
        "ObjcProtoLibrary"
    }
}

pub struct ObjcProtoLibraryRule;

impl RuleDefinition for ObjcProtoLibraryRule {
    fn metadata(&self) -> RuleDefinitionMetadata {
        RuleDefinitionMetadata {
            name: OBJC_PROTO_LIBRARY,
            ancestors: &[BASE_RULE],
            category: RuleCategory::Library,
            family: Some("Objective-C"),
            doc: "This rule produces a static library from the given proto_library \
                  dependencies, after applying an options file.",
            factory: Some(RuleFactory::new(ObjcProtoLibraryFactory)),
        }
    }

    fn build(
        &self,
        builder: &mut RuleClassBuilder,
        env: &RuleDefinitionEnvironment,
    ) -> anyhow::Result<()> {
        builder
            .override_attr(
                DEPS_ATTRIBUTE_FIELD,
                Attribute::label_list()
                    .allowed_rule_kinds(["proto_library", "filegroup"])
                    .allow_any_file()
                    .with_doc("The directly depended upon proto_library rules."),
            )?
            .add(
                OPTIONS_FILE_ATTR,
                Attribute::label()
                    .allow_any_file()
                    .single_artifact()
                    .cfg(AttrConfiguration::Host)
                    .with_doc(
                        "Optional options file to apply to protos which affects compilation \
                         (e.g. class whitelist/blacklist settings).",
                    ),
            )?
            .add(
                COMPILE_PROTOS_ATTR,
                Attribute::label()
                    .allowed_file_suffixes([".py"])
                    .cfg(AttrConfiguration::Host)
                    .single_artifact()
                    .with_default_label(env.label(COMPILE_PROTOS_LABEL)?),
            )?
            .add(
                PROTO_SUPPORT_ATTR,
                Attribute::label()
                    .allow_any_file()
                    .cfg(AttrConfiguration::Host)
                    .with_default_label(env.label(PROTO_SUPPORT_LABEL)?),
            )?
            .add(
                LIBPROTOBUF_ATTR,
                Attribute::label()
                    .allowed_rule_kinds(["objc_library"])
                    .with_default_label(env.label(LIBPROTOBUF_LABEL)?),
            )?
            .add(
                XCODEGEN_ATTR,
                Attribute::label()
                    .cfg(AttrConfiguration::Host)
                    .exec()
                    .with_default_label(env.label(XCODEGEN_LABEL)?),
            )?;
        Ok(())
    }
}
