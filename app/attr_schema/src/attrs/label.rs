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
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Label must not be empty")]
    Empty,
    #[error("Label `{0}` must not contain whitespace")]
    Whitespace(String),
}

/// A reference to a target in the build graph.
///
/// Labels are opaque here: they are resolved by the build engine, so only trivially malformed
/// strings are rejected.
#[derive(
    Debug, Clone, Dupe, Eq, PartialEq, Hash, Ord, PartialOrd, Allocative, Serialize
)]
#[serde(transparent)]
pub struct Label(Arc<str>);

impl Label {
    pub fn new(label: &str) -> anyhow::Result<Label> {
        if label.is_empty() {
            return Err(LabelError::Empty.into());
        }
        if label.contains(char::is_whitespace) {
            return Err(LabelError::Whitespace(label.to_owned()).into());
        }
        Ok(Label(Arc::from(label)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
