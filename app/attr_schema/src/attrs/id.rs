/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use allocative::Allocative;
use dupe::Dupe;

/// Position of an attribute in its schema. Only meaningful for the schema that produced it.
#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq, Hash, Ord, PartialOrd, Allocative)]
pub struct AttributeId {
    pub(crate) index_in_schema: usize,
}

impl AttributeId {
    pub fn index(self) -> usize {
        self.index_in_schema
    }
}
