/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use dupe::Dupe;
use starlark_map::ordered_map::OrderedMap;

use crate::definition::RuleDefinition;
use crate::descriptor::RuleClassBuilder;
use crate::descriptor::RuleClassDescriptor;
use crate::environment::RuleDefinitionEnvironment;

#[derive(Debug, thiserror::Error)]
pub enum RuleClassRegistryError {
    #[error("Rule class `{0}` is already registered")]
    DuplicateRuleClass(String),
    #[error("Rule class `{rule_class}` inherits from `{ancestor}`, which is not registered")]
    UnknownAncestor { rule_class: String, ancestor: String },
    #[error("Unknown rule class `{0}`")]
    UnknownRuleClass(String),
    #[error("Rule class `{0}` is abstract and cannot be instantiated")]
    AbstractRuleClass(String),
}

/// Collects rule classes during registration. A failed registration leaves the rule classes
/// registered before it untouched.
#[derive(Debug, Default)]
pub struct RuleClassRegistryBuilder {
    rule_classes: OrderedMap<String, RuleClassDescriptor>,
}

impl RuleClassRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&RuleClassDescriptor> {
        self.rule_classes.get(name)
    }

    /// Adds an already built rule class.
    pub fn add(&mut self, rule_class: RuleClassDescriptor) -> anyhow::Result<()> {
        if self.rule_classes.contains_key(rule_class.name()) {
            return Err(
                RuleClassRegistryError::DuplicateRuleClass(rule_class.name().to_owned()).into(),
            );
        }
        tracing::debug!(rule_class = %rule_class.name(), "registered rule class");
        self.rule_classes
            .insert(rule_class.name().to_owned(), rule_class);
        Ok(())
    }

    /// Builds the rule class declared by `definition` on top of its registered ancestors, and
    /// registers it.
    pub fn register(
        &mut self,
        definition: &dyn RuleDefinition,
        env: &RuleDefinitionEnvironment,
    ) -> anyhow::Result<RuleClassDescriptor> {
        let metadata = definition.metadata();
        if self.rule_classes.contains_key(metadata.name) {
            return Err(RuleClassRegistryError::DuplicateRuleClass(metadata.name.to_owned()).into());
        }

        let ancestors = metadata
            .ancestors
            .iter()
            .map(|ancestor| {
                self.rule_classes.get(*ancestor).ok_or_else(|| {
                    RuleClassRegistryError::UnknownAncestor {
                        rule_class: metadata.name.to_owned(),
                        ancestor: (*ancestor).to_owned(),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut builder = RuleClassBuilder::new(metadata.name, &ancestors)?;
        builder.category(metadata.category).doc(metadata.doc);
        if let Some(family) = metadata.family {
            builder.family(family);
        }
        if let Some(factory) = metadata.factory {
            builder.set_factory(factory);
        }
        definition.build(&mut builder, env)?;
        let rule_class = builder.build()?;
        self.add(rule_class.dupe())?;
        Ok(rule_class)
    }

    pub fn build(self) -> RuleClassRegistry {
        tracing::info!(
            rule_classes = self.rule_classes.len(),
            "rule class registration complete"
        );
        RuleClassRegistry {
            rule_classes: self.rule_classes,
        }
    }
}

/// All registered rule classes. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RuleClassRegistry {
    rule_classes: OrderedMap<String, RuleClassDescriptor>,
}

impl RuleClassRegistry {
    pub fn len(&self) -> usize {
        self.rule_classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rule_classes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&RuleClassDescriptor> {
        self.rule_classes.get(name)
    }

    /// Rule classes in registration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &RuleClassDescriptor> {
        self.rule_classes.values()
    }

    /// The rule class targets of kind `name` are created from.
    pub fn instantiable(&self, name: &str) -> anyhow::Result<&RuleClassDescriptor> {
        let rule_class = self
            .rule_classes
            .get(name)
            .ok_or_else(|| RuleClassRegistryError::UnknownRuleClass(name.to_owned()))?;
        if rule_class.is_abstract() {
            return Err(RuleClassRegistryError::AbstractRuleClass(name.to_owned()).into());
        }
        Ok(rule_class)
    }
}

#[cfg(test)]
mod tests {
    use attr_schema::attrs::attr::Attribute;
    use attr_schema::attrs::error::AttributeSchemaError;

    use crate::definition::RuleDefinition;
    use crate::definition::RuleDefinitionMetadata;
    use crate::descriptor::RuleCategory;
    use crate::descriptor::RuleClassBuilder;
    use crate::descriptor::RuleClassError;
    use crate::environment::RuleDefinitionEnvironment;
    use crate::factory::RuleConfiguredTargetFactory;
    use crate::factory::RuleFactory;
    use crate::registry::RuleClassRegistryBuilder;
    use crate::registry::RuleClassRegistryError;
    use crate::rules::base::BaseRule;
    use crate::rules::base::BASE_RULE;

    #[derive(Debug)]
    struct GenruleFactory;

    impl RuleConfiguredTargetFactory for GenruleFactory {
        fn name(&self) -> &str {
            "Genrule"
        }
    }

    struct TestRule {
        name: &'static str,
        ancestors: &'static [&'static str],
        factory: Option<RuleFactory>,
    }

    impl RuleDefinition for TestRule {
        fn metadata(&self) -> RuleDefinitionMetadata {
            RuleDefinitionMetadata {
                name: self.name,
                ancestors: self.ancestors,
                category: RuleCategory::Other,
                family: None,
                doc: "",
                factory: self.factory.clone(),
            }
        }

        fn build(
            &self,
            builder: &mut RuleClassBuilder,
            _env: &RuleDefinitionEnvironment,
        ) -> anyhow::Result<()> {
            builder.add("cmd", Attribute::string().mandatory())?;
            Ok(())
        }
    }

    /// Declares `cmd` twice.
    struct RepeatedAttributeRule;

    impl RuleDefinition for RepeatedAttributeRule {
        fn metadata(&self) -> RuleDefinitionMetadata {
            RuleDefinitionMetadata {
                name: "repeated_rule",
                ancestors: &[],
                category: RuleCategory::Other,
                family: None,
                doc: "",
                factory: Some(RuleFactory::new(GenruleFactory)),
            }
        }

        fn build(
            &self,
            builder: &mut RuleClassBuilder,
            _env: &RuleDefinitionEnvironment,
        ) -> anyhow::Result<()> {
            builder
                .add("cmd", Attribute::string())?
                .add("cmd", Attribute::string())?;
            Ok(())
        }
    }

    fn genrule() -> TestRule {
        TestRule {
            name: "genrule",
            ancestors: &[BASE_RULE],
            factory: Some(RuleFactory::new(GenruleFactory)),
        }
    }

    #[test]
    fn test_register() -> anyhow::Result<()> {
        let env = RuleDefinitionEnvironment::default();
        let mut registry = RuleClassRegistryBuilder::new();
        registry.register(&BaseRule, &env)?;
        let genrule = registry.register(&genrule(), &env)?;
        assert_eq!(&[BASE_RULE.to_owned()], genrule.ancestors());
        assert!(genrule.attribute("deps").is_some());

        let registry = registry.build();
        assert_eq!(2, registry.len());
        assert_eq!(
            vec![BASE_RULE, "genrule"],
            registry.iter().map(|r| r.name()).collect::<Vec<_>>()
        );
        assert_eq!(Some("Genrule"), registry.instantiable("genrule")?.factory().name());
        Ok(())
    }

    #[test]
    fn test_duplicate() -> anyhow::Result<()> {
        let env = RuleDefinitionEnvironment::default();
        let mut registry = RuleClassRegistryBuilder::new();
        registry.register(&BaseRule, &env)?;
        let err = registry.register(&BaseRule, &env).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassRegistryError>(),
            Some(RuleClassRegistryError::DuplicateRuleClass(name)) if name == BASE_RULE
        ));
        Ok(())
    }

    #[test]
    fn test_unknown_ancestor() {
        let env = RuleDefinitionEnvironment::default();
        let mut registry = RuleClassRegistryBuilder::new();
        let err = registry.register(&genrule(), &env).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassRegistryError>(),
            Some(RuleClassRegistryError::UnknownAncestor { ancestor, .. }) if ancestor == BASE_RULE
        ));
    }

    #[test]
    fn test_failed_registration_keeps_others() -> anyhow::Result<()> {
        let env = RuleDefinitionEnvironment::default();
        let mut registry = RuleClassRegistryBuilder::new();
        registry.register(&BaseRule, &env)?;
        let err = registry
            .register(
                &TestRule {
                    name: "genrule",
                    ancestors: &[BASE_RULE],
                    factory: None,
                },
                &env,
            )
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassError>(),
            Some(RuleClassError::MissingFactory(name)) if name == "genrule"
        ));
        assert!(registry.get("genrule").is_none());

        registry.register(&genrule(), &env)?;
        assert!(registry.get(BASE_RULE).is_some());
        Ok(())
    }

    #[test]
    fn test_definition_error_names_rule_class_once() {
        let env = RuleDefinitionEnvironment::default();
        let mut registry = RuleClassRegistryBuilder::new();
        let err = registry.register(&RepeatedAttributeRule, &env).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AttributeSchemaError>(),
            Some(AttributeSchemaError::DuplicateAttribute(name)) if name == "cmd"
        ));
        assert_eq!(
            "Error defining rule class `repeated_rule`: Duplicate attribute `cmd`",
            format!("{:#}", err)
        );
        assert!(registry.get("repeated_rule").is_none());
    }

    #[test]
    fn test_instantiable() -> anyhow::Result<()> {
        let env = RuleDefinitionEnvironment::default();
        let mut registry = RuleClassRegistryBuilder::new();
        registry.register(&BaseRule, &env)?;
        let registry = registry.build();

        let err = registry.instantiable(BASE_RULE).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassRegistryError>(),
            Some(RuleClassRegistryError::AbstractRuleClass(_))
        ));
        let err = registry.instantiable("cc_library").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RuleClassRegistryError>(),
            Some(RuleClassRegistryError::UnknownRuleClass(_))
        ));
        Ok(())
    }
}
