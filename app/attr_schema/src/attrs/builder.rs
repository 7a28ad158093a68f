/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use starlark_map::ordered_map::OrderedMap;
use starlark_map::small_set::SmallSet;

use crate::attrs::attr::Attribute;
use crate::attrs::error::AttributeSchemaError;
use crate::attrs::error::SchemaViolations;
use crate::attrs::schema::AttributeSchema;
use crate::attrs::validate::validate_attribute;

/// Accumulates attribute declarations on top of zero or more parent schemas.
///
/// Parents are layered in order: a later parent's declaration of a name replaces an earlier one
/// (it must keep the value type), and the builder's own declarations and overrides replace both.
/// An overridden attribute keeps the position it had in the first parent that declared it.
///
/// `declare` and `override_attr` only check naming and typing conflicts. Everything else is
/// checked by `build`, which reports all problems at once.
#[derive(Debug, Clone, Default)]
pub struct AttributeSchemaBuilder {
    attributes: OrderedMap<String, Attribute>,
    /// Names that came from a parent schema.
    inherited: SmallSet<String>,
    /// Names declared or overridden by this builder.
    own: SmallSet<String>,
}

impl AttributeSchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inheriting<'a>(
        parents: impl IntoIterator<Item = &'a AttributeSchema>,
    ) -> anyhow::Result<Self> {
        let mut builder = Self::new();
        for parent in parents {
            for (name, attr) in parent.iter() {
                builder.layer_inherited(name, attr)?;
            }
        }
        Ok(builder)
    }

    fn layer_inherited(&mut self, name: &str, attr: &Attribute) -> anyhow::Result<()> {
        match self.attributes.get_mut(name) {
            Some(existing) => {
                if existing.value_type() != attr.value_type() {
                    return Err(AttributeSchemaError::TypeMismatch {
                        name: name.to_owned(),
                        inherited: existing.value_type(),
                        declared: attr.value_type(),
                    }
                    .into());
                }
                *existing = attr.clone();
            }
            None => {
                self.attributes.insert(name.to_owned(), attr.clone());
                self.inherited.insert(name.to_owned());
            }
        }
        Ok(())
    }

    /// Adds a new attribute. Declaring an inherited name with the same value type overrides it.
    pub fn declare(
        &mut self,
        name: impl Into<String>,
        attr: Attribute,
    ) -> anyhow::Result<&mut Self> {
        let name = name.into();
        if self.own.contains(&name) {
            return Err(AttributeSchemaError::DuplicateAttribute(name).into());
        }
        if self.inherited.contains(&name) {
            return self.replace_inherited(name, attr);
        }
        self.attributes.insert(name.clone(), attr);
        self.own.insert(name);
        Ok(self)
    }

    /// Replaces the declaration of an inherited attribute, keeping its value type.
    pub fn override_attr(
        &mut self,
        name: impl Into<String>,
        attr: Attribute,
    ) -> anyhow::Result<&mut Self> {
        let name = name.into();
        if self.own.contains(&name) {
            return Err(AttributeSchemaError::DuplicateAttribute(name).into());
        }
        if !self.inherited.contains(&name) {
            return Err(AttributeSchemaError::UnknownAttribute(name).into());
        }
        self.replace_inherited(name, attr)
    }

    fn replace_inherited(
        &mut self,
        name: String,
        mut attr: Attribute,
    ) -> anyhow::Result<&mut Self> {
        let Some(existing) = self.attributes.get_mut(&name) else {
            return Err(AttributeSchemaError::UnknownAttribute(name).into());
        };
        if existing.value_type() != attr.value_type() {
            return Err(AttributeSchemaError::TypeMismatch {
                inherited: existing.value_type(),
                declared: attr.value_type(),
                name,
            }
            .into());
        }
        attr.inherit_doc_from(existing);
        *existing = attr;
        self.own.insert(name);
        Ok(self)
    }

    /// Validates every attribute and returns the immutable schema.
    ///
    /// Does not consume the builder, and building twice gives equal schemas.
    pub fn build(&self) -> anyhow::Result<AttributeSchema> {
        let mut violations = Vec::new();
        for (name, attr) in &self.attributes {
            validate_attribute(name, attr, &mut violations);
        }
        if !violations.is_empty() {
            tracing::debug!(
                violations = violations.len(),
                "attribute schema failed validation"
            );
            return Err(
                AttributeSchemaError::SchemaValidation(SchemaViolations(violations)).into(),
            );
        }
        tracing::debug!(
            attributes = self.attributes.len(),
            overridden_or_declared = self.own.len(),
            "built attribute schema"
        );
        Ok(AttributeSchema::new_validated(self.attributes.clone()))
    }
}
