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

use allocative::Allocative;
use derive_more::Display;
use itertools::Itertools;
use serde::Serialize;

use crate::attrs::attr_type::AttrType;
use crate::attrs::label::Label;

/// A static attribute value, fixed when the schema is defined.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Allocative, Serialize)]
#[serde(untagged)]
pub enum AttrLiteral {
    /// The absence of a label. Only meaningful for single label attributes.
    None,
    Bool(bool),
    Int(i64),
    String(String),
    StringList(Vec<String>),
    Label(Label),
    LabelList(Vec<Label>),
}

impl AttrLiteral {
    /// The value type this literal inhabits. `None` inhabits no type of its own.
    pub fn attr_type(&self) -> Option<AttrType> {
        match self {
            AttrLiteral::None => None,
            AttrLiteral::Bool(_) => Some(AttrType::Bool),
            AttrLiteral::Int(_) => Some(AttrType::Int),
            AttrLiteral::String(_) => Some(AttrType::String),
            AttrLiteral::StringList(_) => Some(AttrType::StringList),
            AttrLiteral::Label(_) => Some(AttrType::Label),
            AttrLiteral::LabelList(_) => Some(AttrType::LabelList),
        }
    }

    pub fn is_assignable_to(&self, ty: AttrType) -> bool {
        match self.attr_type() {
            Some(t) => t == ty,
            None => ty == AttrType::Label,
        }
    }

    pub fn label(label: &str) -> anyhow::Result<AttrLiteral> {
        Ok(AttrLiteral::Label(Label::new(label)?))
    }

    pub fn string(s: impl Into<String>) -> AttrLiteral {
        AttrLiteral::String(s.into())
    }

    pub fn empty_string_list() -> AttrLiteral {
        AttrLiteral::StringList(Vec::new())
    }
}

impl Display for AttrLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrLiteral::None => write!(f, "None"),
            AttrLiteral::Bool(true) => write!(f, "True"),
            AttrLiteral::Bool(false) => write!(f, "False"),
            AttrLiteral::Int(v) => write!(f, "{}", v),
            AttrLiteral::String(v) => write!(f, "\"{}\"", v),
            AttrLiteral::StringList(v) => {
                write!(f, "[{}]", v.iter().map(|s| format!("\"{}\"", s)).join(", "))
            }
            AttrLiteral::Label(v) => write!(f, "\"{}\"", v),
            AttrLiteral::LabelList(v) => {
                write!(f, "[{}]", v.iter().map(|l| format!("\"{}\"", l)).join(", "))
            }
        }
    }
}

/// A late-bound default. The build engine looks it up by name when a target is analyzed, so the
/// schema only records which computation is responsible.
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Allocative, Serialize)]
#[display(fmt = "<computed {}>", name)]
pub struct ComputedDefault {
    name: String,
}

impl ComputedDefault {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Allocative, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrDefault {
    Value(AttrLiteral),
    Computed(ComputedDefault),
}

impl AttrDefault {
    pub fn as_value(&self) -> Option<&AttrLiteral> {
        match self {
            AttrDefault::Value(v) => Some(v),
            AttrDefault::Computed(_) => None,
        }
    }
}
