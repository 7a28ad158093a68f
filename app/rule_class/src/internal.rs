/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Attributes every rule class has, whatever its ancestors.

use attr_schema::attrs::attr::Attribute;
use attr_schema::attrs::builder::AttributeSchemaBuilder;
use attr_schema::attrs::schema::AttributeSchema;

pub const NAME_ATTRIBUTE_FIELD: &str = "name";

fn name_attribute() -> Attribute {
    Attribute::string().mandatory().with_doc("name of the target")
}

pub(crate) fn internal_attrs() -> Vec<(&'static str, Attribute)> {
    vec![(NAME_ATTRIBUTE_FIELD, name_attribute())]
}

pub(crate) fn is_internal_attr(name: &str) -> bool {
    internal_attrs().iter().any(|(n, _)| *n == name)
}

/// The schema every rule class implicitly inherits from before its declared ancestors.
pub(crate) fn internal_schema() -> anyhow::Result<AttributeSchema> {
    let mut builder = AttributeSchemaBuilder::new();
    for (name, attr) in internal_attrs() {
        builder.declare(name, attr)?;
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use crate::internal::internal_schema;
    use crate::internal::is_internal_attr;
    use crate::internal::NAME_ATTRIBUTE_FIELD;

    #[test]
    fn test_internal_schema() -> anyhow::Result<()> {
        let schema = internal_schema()?;
        assert_eq!(vec![NAME_ATTRIBUTE_FIELD], schema.names().collect::<Vec<_>>());
        assert!(schema.attribute(NAME_ATTRIBUTE_FIELD).unwrap().is_mandatory());
        assert!(is_internal_attr("name"));
        assert!(!is_internal_attr("deps"));
        Ok(())
    }
}
