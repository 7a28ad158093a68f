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

/// Which rule kinds a label-valued attribute may point to.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Allocative, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedRuleKinds {
    #[default]
    Any,
    Only(Vec<String>),
}

/// Which plain files a label-valued attribute may point to.
///
/// `Unset` is distinct from `AnyFile`: a label attribute must say what it accepts, it does not
/// become unrestricted by omission.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Allocative, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllowedFiles {
    #[default]
    Unset,
    NoFile,
    AnyFile,
    Suffixes(Vec<String>),
}

impl AllowedFiles {
    pub fn allows_file(&self, file_name: &str) -> bool {
        match self {
            AllowedFiles::Unset | AllowedFiles::NoFile => false,
            AllowedFiles::AnyFile => true,
            AllowedFiles::Suffixes(suffixes) => suffixes.iter().any(|s| file_name.ends_with(s)),
        }
    }
}

/// The configuration a referenced label is analyzed in.
#[derive(
    Debug, Display, Clone, Copy, Dupe, Default, Eq, PartialEq, Hash, Allocative, Serialize
)]
#[serde(rename_all = "snake_case")]
pub enum AttrConfiguration {
    /// Same configuration as the target that declares the attribute.
    #[default]
    #[display(fmt = "target")]
    Target,
    /// Configuration of the machine running the build. Used for build-time tools.
    #[display(fmt = "host")]
    Host,
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Hash, Allocative, Serialize)]
pub struct AttrConstraints {
    pub allowed_rule_kinds: AllowedRuleKinds,
    pub allowed_files: AllowedFiles,
    pub configuration: AttrConfiguration,
    /// The referent must resolve to exactly one artifact.
    pub single_artifact: bool,
    /// The referent must be invokable as a tool.
    pub executable: bool,
    /// The rule author must supply a value.
    pub mandatory: bool,
}

impl AttrConstraints {
    /// Names of the set constraints that only make sense on label-valued attributes.
    pub(crate) fn label_only_constraints(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.allowed_rule_kinds != AllowedRuleKinds::Any {
            set.push("allowed_rule_kinds");
        }
        if self.allowed_files != AllowedFiles::Unset {
            set.push("allowed_files");
        }
        if self.configuration != AttrConfiguration::Target {
            set.push("cfg");
        }
        if self.single_artifact {
            set.push("single_artifact");
        }
        if self.executable {
            set.push("exec");
        }
        set
    }
}
