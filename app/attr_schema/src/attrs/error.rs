/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::fmt;
use std::fmt::Display;

use crate::attrs::attr_type::AttrType;

#[derive(Debug, thiserror::Error)]
pub enum AttributeSchemaError {
    #[error("Duplicate attribute `{0}`")]
    DuplicateAttribute(String),
    #[error("Cannot override attribute `{0}`: no parent schema declares it")]
    UnknownAttribute(String),
    #[error(
        "Attribute `{name}` is declared as `{inherited}` by a parent schema and cannot be redeclared as `{declared}`"
    )]
    TypeMismatch {
        name: String,
        inherited: AttrType,
        declared: AttrType,
    },
    #[error("Invalid attribute schema:\n{0}")]
    SchemaValidation(SchemaViolations),
}

/// Why a single attribute declaration is malformed.
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum SchemaViolationKind {
    #[error("not a valid attribute name")]
    InvalidName,
    #[error("implicit attributes must have a default value")]
    ImplicitWithoutDefault,
    #[error("implicit attributes must have a static default, not a computed one")]
    ImplicitWithComputedDefault,
    #[error("attributes with a computed-default name must have a computed default")]
    ComputedWithoutComputedDefault,
    #[error("default value {value} is not a `{expected}`")]
    DefaultTypeMismatch { expected: AttrType, value: String },
    #[error("mandatory attributes cannot have a default value")]
    MandatoryWithDefault,
    #[error("attributes hidden from the rule author cannot be mandatory")]
    MandatoryNotUserSettable,
    #[error("`{constraint}` only applies to label attributes, not `{value_type}`")]
    LabelConstraintOnNonLabel {
        constraint: &'static str,
        value_type: AttrType,
    },
    #[error("`{0}` only applies to single label attributes, not `label_list`")]
    SingleLabelConstraintOnList(&'static str),
    #[error(
        "label attribute does not say what it may refer to; restrict allowed rule kinds, allowed files, or allow any file explicitly"
    )]
    UnrestrictedByOmission,
    #[error("allowed rule kinds must not be empty")]
    EmptyRuleKinds,
    #[error("allowed file suffixes must not be empty")]
    EmptyFileSuffixes,
    #[error("file suffix `{0}` must start with `.`")]
    MalformedFileSuffix(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SchemaViolation {
    pub attribute: String,
    pub kind: SchemaViolationKind,
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attribute `{}`: {}", self.attribute, self.kind)
    }
}

/// Every violation found while validating a schema, in declaration order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SchemaViolations(pub Vec<SchemaViolation>);

impl SchemaViolations {
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &SchemaViolation> {
        self.0.iter()
    }

    pub fn attributes(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|v| v.attribute.as_str())
    }

    pub fn contains(&self, attribute: &str, kind: &SchemaViolationKind) -> bool {
        self.0
            .iter()
            .any(|v| v.attribute == attribute && &v.kind == kind)
    }
}

impl Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i != 0 {
                writeln!(f)?;
            }
            write!(f, "  {}", violation)?;
        }
        Ok(())
    }
}
