/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use allocative::Allocative;
use derive_more::Display;
use dupe::Dupe;
use serde::Serialize;

/// The value type of an attribute. An override may never change it.
#[derive(
    Debug, Display, Clone, Copy, Dupe, Eq, PartialEq, Hash, Allocative, Serialize
)]
#[serde(rename_all = "snake_case")]
pub enum AttrType {
    /// A single reference to another target.
    #[display(fmt = "label")]
    Label,
    #[display(fmt = "label_list")]
    LabelList,
    #[display(fmt = "string")]
    String,
    #[display(fmt = "string_list")]
    StringList,
    #[display(fmt = "bool")]
    Bool,
    #[display(fmt = "int")]
    Int,
}

impl AttrType {
    /// Label-valued attributes name other targets and carry referent constraints.
    pub fn is_label(self) -> bool {
        matches!(self, AttrType::Label | AttrType::LabelList)
    }

    pub fn is_list(self) -> bool {
        matches!(self, AttrType::LabelList | AttrType::StringList)
    }
}
