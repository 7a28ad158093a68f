/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use allocative::Allocative;
use serde::Serialize;
use starlark_map::ordered_map::OrderedMap;

use crate::attrs::attr::Attribute;
use crate::attrs::id::AttributeId;
use crate::attrs::literal::AttrDefault;
use crate::attrs::name::AttrVisibility;

/// AttributeSchema holds the validated, flattened attributes of a rule kind, in declaration order
/// (inherited attributes first).
///
/// It is built once when the rule kind is registered and never changes afterwards, so it can be
/// shared between every target of that kind and read from any thread.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Allocative, Serialize)]
#[serde(transparent)]
pub struct AttributeSchema {
    attributes: OrderedMap<String, Attribute>,
}

impl AttributeSchema {
    /// Callers must have validated `attributes`.
    pub(crate) fn new_validated(attributes: OrderedMap<String, Attribute>) -> Self {
        AttributeSchema { attributes }
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attr_specs(&self) -> impl ExactSizeIterator<Item = (&str, AttributeId, &Attribute)> {
        self.attributes
            .iter()
            .enumerate()
            .map(|(index_in_schema, (name, attribute))| {
                (name.as_str(), AttributeId { index_in_schema }, attribute)
            })
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, attr)| (name.as_str(), attr))
    }

    pub fn names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attribute_id(&self, name: &str) -> Option<AttributeId> {
        self.attributes
            .get_index_of(name)
            .map(|index_in_schema| AttributeId { index_in_schema })
    }

    /// Returns `None` if `id` was produced by a different schema that has more attributes.
    pub fn attribute_by_id(&self, id: AttributeId) -> Option<(&str, &Attribute)> {
        self.attributes
            .get_index(id.index_in_schema)
            .map(|(name, attr)| (name.as_str(), attr))
    }

    pub fn default_value(&self, name: &str) -> Option<&AttrDefault> {
        self.attributes.get(name).and_then(Attribute::default)
    }

    /// Attributes the rule author may set, in declaration order.
    pub fn user_attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.iter()
            .filter(|(name, _)| AttrVisibility::of(name).is_user_settable())
    }

    /// Attributes injected by the build system (`$` and `:` prefixed).
    pub fn implicit_attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.iter()
            .filter(|(name, _)| !AttrVisibility::of(name).is_user_settable())
    }
}

pub mod testing {
    use starlark_map::ordered_map::OrderedMap;

    use crate::attrs::attr::Attribute;
    use crate::attrs::schema::AttributeSchema;

    pub trait AttributeSchemaExt {
        /// Builds a schema without validation, for tests of code consuming schemas.
        fn testing_new(attributes: Vec<(&str, Attribute)>) -> Self;
    }

    impl AttributeSchemaExt for AttributeSchema {
        fn testing_new(attributes: Vec<(&str, Attribute)>) -> AttributeSchema {
            AttributeSchema::new_validated(OrderedMap::from_iter(
                attributes
                    .into_iter()
                    .map(|(name, attr)| (name.to_owned(), attr)),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::attrs::attr::Attribute;
    use crate::attrs::literal::AttrLiteral;
    use crate::attrs::schema::testing::AttributeSchemaExt;
    use crate::attrs::schema::AttributeSchema;

    fn schema() -> anyhow::Result<AttributeSchema> {
        Ok(AttributeSchema::testing_new(vec![
            ("deps", Attribute::label_list().allow_any_file()),
            (
                "$proto_support",
                Attribute::label()
                    .allow_any_file()
                    .with_default(AttrLiteral::label("//tools/objc:proto_support")?),
            ),
            ("options_file", Attribute::label().allow_any_file()),
        ]))
    }

    #[test]
    fn test_lookup() -> anyhow::Result<()> {
        let schema = schema()?;
        assert_eq!(3, schema.len());
        assert_eq!(
            vec!["deps", "$proto_support", "options_file"],
            schema.names().collect::<Vec<_>>()
        );

        let id = schema.attribute_id("options_file").unwrap();
        assert_eq!(2, id.index());
        assert_eq!(
            Some(("options_file", schema.attribute("options_file").unwrap())),
            schema.attribute_by_id(id)
        );
        assert!(schema.attribute_id("srcs").is_none());
        assert!(schema.default_value("deps").is_none());
        assert_eq!(
            Some(&AttrLiteral::label("//tools/objc:proto_support")?),
            schema.default_value("$proto_support").and_then(|d| d.as_value())
        );
        Ok(())
    }

    #[test]
    fn test_user_and_implicit() -> anyhow::Result<()> {
        let schema = schema()?;
        assert_eq!(
            vec!["deps", "options_file"],
            schema.user_attributes().map(|(n, _)| n).collect::<Vec<_>>()
        );
        assert_eq!(
            vec!["$proto_support"],
            schema.implicit_attributes().map(|(n, _)| n).collect::<Vec<_>>()
        );
        Ok(())
    }

    #[test]
    fn test_equality_depends_on_order() {
        let deps = ("deps", Attribute::label_list().allow_any_file());
        let tags = ("tags", Attribute::string_list());
        let forward = AttributeSchema::testing_new(vec![deps.clone(), tags.clone()]);
        assert_eq!(
            forward,
            AttributeSchema::testing_new(vec![deps.clone(), tags.clone()])
        );
        assert_ne!(forward, AttributeSchema::testing_new(vec![tags, deps]));
    }

    #[test]
    fn test_serialize_preserves_order() -> anyhow::Result<()> {
        let json = serde_json::to_string(&schema()?)?;
        let deps = json.find("\"deps\"").unwrap();
        let proto_support = json.find("\"$proto_support\"").unwrap();
        let options_file = json.find("\"options_file\"").unwrap();
        assert!(deps < proto_support && proto_support < options_file);
        Ok(())
    }
}
