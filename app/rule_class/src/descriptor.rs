/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::iter;
use std::sync::Arc;

use allocative::Allocative;
use anyhow::Context;
use attr_schema::attrs::attr::Attribute;
use attr_schema::attrs::builder::AttributeSchemaBuilder;
use attr_schema::attrs::name::is_valid_identifier;
use attr_schema::attrs::schema::AttributeSchema;
use derive_more::Display;
use dupe::Dupe;
use itertools::Itertools;
use serde::Serialize;

use crate::factory::RuleConfiguredTargetFactory;
use crate::factory::RuleFactory;
use crate::internal::internal_schema;
use crate::internal::is_internal_attr;

/// Errors around rule class definition
#[derive(Debug, thiserror::Error)]
pub enum RuleClassError {
    #[error("`{0}` is not a valid rule class name")]
    InvalidRuleClassName(String),
    #[error("Rule class `{0}` has no factory; supply one or mark the rule class abstract")]
    MissingFactory(String),
    #[error("Rule class `{rule_class}` redefines internal attribute `{attribute}`")]
    InternalAttributeRedefined {
        rule_class: String,
        attribute: String,
    },
}

/// What targets of a rule kind produce. Used to group rule kinds in documentation.
#[derive(
    Debug, Display, Clone, Copy, Dupe, Default, Eq, PartialEq, Hash, Allocative, Serialize
)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    #[display(fmt = "library")]
    Library,
    #[display(fmt = "binary")]
    Binary,
    #[display(fmt = "test")]
    Test,
    #[default]
    #[display(fmt = "other")]
    Other,
}

#[derive(Debug, Eq, PartialEq, Allocative, Serialize)]
struct RuleClassData {
    name: String,
    category: RuleCategory,
    family: Option<String>,
    doc: String,
    /// Names of the rule classes whose attributes were inherited, in layering order.
    ancestors: Vec<String>,
    factory: RuleFactory,
    schema: Arc<AttributeSchema>,
}

/// A registered rule kind. Immutable and cheap to clone; shared by every target of the kind.
#[derive(Debug, Display, Clone, Dupe, Eq, PartialEq, Allocative, Serialize)]
#[display(fmt = "{}()", "_0.name")]
#[serde(transparent)]
pub struct RuleClassDescriptor(Arc<RuleClassData>);

impl RuleClassDescriptor {
    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn category(&self) -> RuleCategory {
        self.0.category
    }

    pub fn family(&self) -> Option<&str> {
        self.0.family.as_deref()
    }

    pub fn doc(&self) -> &str {
        &self.0.doc
    }

    pub fn ancestors(&self) -> &[String] {
        &self.0.ancestors
    }

    pub fn factory(&self) -> &RuleFactory {
        &self.0.factory
    }

    /// Abstract rule classes can be inherited from but have no targets of their own.
    pub fn is_abstract(&self) -> bool {
        self.0.factory.is_abstract()
    }

    pub fn schema(&self) -> &Arc<AttributeSchema> {
        &self.0.schema
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.0.schema.attribute(name)
    }

    /// The call signature shown in documentation, listing attributes the rule author may set,
    /// e.g. `objc_proto_library(name, deps, options_file)`.
    pub fn signature(&self) -> String {
        format!(
            "{}({})",
            self.0.name,
            self.0.schema.user_attributes().map(|(name, _)| name).join(", ")
        )
    }
}

/// `$` is allowed as a prefix, it marks rule classes that only exist to be inherited from.
fn is_valid_rule_class_name(name: &str) -> bool {
    is_valid_identifier(name.strip_prefix('$').unwrap_or(name))
}

/// Assembles a [`RuleClassDescriptor`].
///
/// The schema starts from the internal attributes, then each ancestor's schema is layered on in
/// order, then the builder's own `add`/`override_attr` calls are applied on top.
#[derive(Debug, Clone)]
pub struct RuleClassBuilder {
    name: String,
    category: RuleCategory,
    family: Option<String>,
    doc: String,
    ancestors: Vec<String>,
    factory: Option<RuleFactory>,
    attributes: AttributeSchemaBuilder,
}

impl RuleClassBuilder {
    pub fn new(
        name: impl Into<String>,
        ancestors: &[&RuleClassDescriptor],
    ) -> anyhow::Result<Self> {
        let name = name.into();
        let internal = internal_schema()?;
        let attributes = AttributeSchemaBuilder::inheriting(
            iter::once(&internal).chain(ancestors.iter().map(|a| &**a.schema())),
        )
        .with_context(|| format!("Error defining rule class `{}`", name))?;
        Ok(RuleClassBuilder {
            ancestors: ancestors.iter().map(|a| a.name().to_owned()).collect(),
            name,
            category: RuleCategory::default(),
            family: None,
            doc: String::new(),
            factory: None,
            attributes,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn check_not_internal(&self, attribute: &str) -> anyhow::Result<()> {
        if is_internal_attr(attribute) {
            return Err(RuleClassError::InternalAttributeRedefined {
                rule_class: self.name.clone(),
                attribute: attribute.to_owned(),
            }
            .into());
        }
        Ok(())
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        attr: Attribute,
    ) -> anyhow::Result<&mut Self> {
        let name = name.into();
        self.check_not_internal(&name)?;
        let res = self.attributes.declare(name, attr).map(|_| ());
        res.with_context(|| format!("Error defining rule class `{}`", self.name))?;
        Ok(self)
    }

    pub fn override_attr(
        &mut self,
        name: impl Into<String>,
        attr: Attribute,
    ) -> anyhow::Result<&mut Self> {
        let name = name.into();
        self.check_not_internal(&name)?;
        let res = self.attributes.override_attr(name, attr).map(|_| ());
        res.with_context(|| format!("Error defining rule class `{}`", self.name))?;
        Ok(self)
    }

    pub fn category(&mut self, category: RuleCategory) -> &mut Self {
        self.category = category;
        self
    }

    pub fn family(&mut self, family: impl Into<String>) -> &mut Self {
        self.family = Some(family.into());
        self
    }

    pub fn doc(&mut self, doc: impl Into<String>) -> &mut Self {
        self.doc = doc.into();
        self
    }

    pub fn factory(&mut self, factory: impl RuleConfiguredTargetFactory) -> &mut Self {
        self.factory = Some(RuleFactory::new(factory));
        self
    }

    pub fn set_factory(&mut self, factory: RuleFactory) -> &mut Self {
        self.factory = Some(factory);
        self
    }

    pub fn make_abstract(&mut self) -> &mut Self {
        self.factory = Some(RuleFactory::Abstract);
        self
    }

    pub fn build(&self) -> anyhow::Result<RuleClassDescriptor> {
        if !is_valid_rule_class_name(&self.name) {
            return Err(RuleClassError::InvalidRuleClassName(self.name.clone()).into());
        }
        let schema = self
            .attributes
            .build()
            .with_context(|| format!("Error defining rule class `{}`", self.name))?;
        let factory = match &self.factory {
            Some(factory) => factory.dupe(),
            None => return Err(RuleClassError::MissingFactory(self.name.clone()).into()),
        };
        tracing::debug!(
            rule_class = %self.name,
            attributes = schema.len(),
            ancestors = ?self.ancestors,
            "defined rule class"
        );
        Ok(RuleClassDescriptor(Arc::new(RuleClassData {
            name: self.name.clone(),
            category: self.category,
            family: self.family.clone(),
            doc: self.doc.clone(),
            ancestors: self.ancestors.clone(),
            factory,
            schema: Arc::new(schema),
        })))
    }
}

#[cfg(test)]
mod tests {
    use attr_schema::attrs::attr::Attribute;
    use attr_schema::attrs::error::AttributeSchemaError;
    use attr_schema::attrs::error::SchemaViolationKind;

    use crate::descriptor::is_valid_rule_class_name;
    use crate::descriptor::RuleCategory;
    use crate::descriptor::RuleClassBuilder;
    use crate::descriptor::RuleClassDescriptor;
    use crate::descriptor::RuleClassError;
    use crate::factory::RuleConfiguredTargetFactory;

    #[derive(Debug)]
    struct TestFactory;

    impl RuleConfiguredTargetFactory for TestFactory {
        fn name(&self) -> &str {
            "TestFactory"
        }
    }

    fn library_base() -> anyhow::Result<RuleClassDescriptor> {
        let mut builder = RuleClassBuilder::new("$library_base", &[])?;
        builder
            .make_abstract()
            .add("deps", Attribute::label_list().allowed_rule_kinds(["library"]))?;
        builder.build()
    }

    #[test]
    fn test_rule_class_names() {
        assert!(is_valid_rule_class_name("objc_proto_library"));
        assert!(is_valid_rule_class_name("$base_rule"));
        assert!(!is_valid_rule_class_name(""));
        assert!(!is_valid_rule_class_name("objc-proto-library"));
        assert!(!is_valid_rule_class_name(":rule"));
    }

    #[test]
    fn test_build() -> anyhow::Result<()> {
        let base = library_base()?;
        assert!(base.is_abstract());

        let mut builder = RuleClassBuilder::new("proto_lib", &[&base])?;
        builder
            .category(RuleCategory::Library)
            .family("Protocol Buffers")
            .factory(TestFactory)
            .override_attr(
                "deps",
                Attribute::label_list().allowed_rule_kinds(["library", "filegroup"]),
            )?
            .add("options_file", Attribute::label().allow_any_file())?;
        let rule = builder.build()?;

        assert_eq!("proto_lib", rule.name());
        assert_eq!("proto_lib()", rule.to_string());
        assert_eq!(RuleCategory::Library, rule.category());
        assert_eq!(Some("Protocol Buffers"), rule.family());
        assert_eq!(Some("TestFactory"), rule.factory().name());
        assert_eq!(&["$library_base".to_owned()], rule.ancestors());
        assert_eq!(
            vec!["name", "deps", "options_file"],
            rule.schema().names().collect::<Vec<_>>()
        );
        assert!(rule.attribute("deps").unwrap().allows_rule_kind("filegroup"));
        assert_eq!("proto_lib(name, deps, options_file)", rule.signature());
        Ok(())
    }

    #[test]
    fn test_missing_factory() -> anyhow::Result<()> {
        let builder = RuleClassBuilder::new("proto_lib", &[])?;
        let err = builder.build().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassError>(),
            Some(RuleClassError::MissingFactory(name)) if name == "proto_lib"
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_schema_names_rule_class() -> anyhow::Result<()> {
        let mut builder = RuleClassBuilder::new("proto_lib", &[])?;
        builder
            .factory(TestFactory)
            .add("$tool", Attribute::label_list().allow_any_file())?;
        let err = builder.build().unwrap_err();
        assert!(format!("{:#}", err).contains("Error defining rule class `proto_lib`"));
        match err.downcast_ref::<AttributeSchemaError>() {
            Some(AttributeSchemaError::SchemaValidation(violations)) => {
                assert!(violations.contains("$tool", &SchemaViolationKind::ImplicitWithoutDefault))
            }
            _ => panic!("unexpected error: {:#}", err),
        }
        Ok(())
    }

    #[test]
    fn test_internal_attribute_redefined() -> anyhow::Result<()> {
        let mut builder = RuleClassBuilder::new("proto_lib", &[])?;
        let err = builder.add("name", Attribute::string()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassError>(),
            Some(RuleClassError::InternalAttributeRedefined { attribute, .. })
                if attribute == "name"
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_name() -> anyhow::Result<()> {
        for name in ["Proto-Lib", ":proto_lib", "$$proto_lib", "2proto"] {
            let mut builder = RuleClassBuilder::new(name, &[])?;
            builder.factory(TestFactory);
            let err = builder.build().unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<RuleClassError>(),
                    Some(RuleClassError::InvalidRuleClassName(n)) if n == name
                ),
                "{}",
                name
            );
        }
        Ok(())
    }

    #[test]
    fn test_serialize() -> anyhow::Result<()> {
        let base = library_base()?;
        let json = serde_json::to_value(&base)?;
        assert_eq!("$library_base", json["name"]);
        assert_eq!(serde_json::Value::Null, json["factory"]);
        assert_eq!("label_list", json["schema"]["deps"]["value_type"]);
        Ok(())
    }
}
