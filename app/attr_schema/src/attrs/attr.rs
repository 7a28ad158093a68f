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
use itertools::Itertools;
use serde::Serialize;

use crate::attrs::attr_type::AttrType;
use crate::attrs::constraints::AllowedFiles;
use crate::attrs::constraints::AllowedRuleKinds;
use crate::attrs::constraints::AttrConfiguration;
use crate::attrs::constraints::AttrConstraints;
use crate::attrs::label::Label;
use crate::attrs::literal::AttrDefault;
use crate::attrs::literal::AttrLiteral;
use crate::attrs::literal::ComputedDefault;

/// A single attribute declaration: what an attribute holds, its default and what it may refer to.
///
/// Built with chained calls, e.g.
/// `Attribute::label().allow_any_file().single_artifact().cfg(AttrConfiguration::Host)`.
/// Nothing is checked until the schema containing it is built.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Allocative, Serialize)]
pub struct Attribute {
    value_type: AttrType,
    /// The default value. If None, the rule author may leave the attribute unset (unless it is
    /// mandatory) and the engine uses the type's empty value.
    default: Option<AttrDefault>,
    /// Documentation for what the attribute actually means
    doc: String,
    #[serde(flatten)]
    constraints: AttrConstraints,
}

impl Attribute {
    pub fn new(value_type: AttrType) -> Self {
        Self {
            value_type,
            default: None,
            doc: String::new(),
            constraints: AttrConstraints::default(),
        }
    }

    pub fn label() -> Self {
        Self::new(AttrType::Label)
    }

    pub fn label_list() -> Self {
        Self::new(AttrType::LabelList)
    }

    pub fn string() -> Self {
        Self::new(AttrType::String)
    }

    pub fn string_list() -> Self {
        Self::new(AttrType::StringList)
    }

    pub fn bool() -> Self {
        Self::new(AttrType::Bool)
    }

    pub fn int() -> Self {
        Self::new(AttrType::Int)
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    pub fn with_default(mut self, value: AttrLiteral) -> Self {
        self.default = Some(AttrDefault::Value(value));
        self
    }

    pub fn with_default_label(self, label: Label) -> Self {
        self.with_default(AttrLiteral::Label(label))
    }

    pub fn with_computed_default(mut self, name: impl Into<String>) -> Self {
        self.default = Some(AttrDefault::Computed(ComputedDefault::new(name)));
        self
    }

    /// Restricts referents to rules of the given kinds. Repeated kinds are ignored.
    pub fn allowed_rule_kinds<S: Into<String>>(
        mut self,
        kinds: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut only: Vec<String> = Vec::new();
        for kind in kinds {
            let kind = kind.into();
            if !only.contains(&kind) {
                only.push(kind);
            }
        }
        self.constraints.allowed_rule_kinds = AllowedRuleKinds::Only(only);
        self
    }

    /// Allows any plain file as a referent.
    pub fn allow_any_file(mut self) -> Self {
        self.constraints.allowed_files = AllowedFiles::AnyFile;
        self
    }

    /// Rejects plain files; only rules may be referenced.
    pub fn allow_no_file(mut self) -> Self {
        self.constraints.allowed_files = AllowedFiles::NoFile;
        self
    }

    pub fn allowed_file_suffixes<S: Into<String>>(
        mut self,
        suffixes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.constraints.allowed_files =
            AllowedFiles::Suffixes(suffixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn cfg(mut self, configuration: AttrConfiguration) -> Self {
        self.constraints.configuration = configuration;
        self
    }

    pub fn single_artifact(mut self) -> Self {
        self.constraints.single_artifact = true;
        self
    }

    pub fn exec(mut self) -> Self {
        self.constraints.executable = true;
        self
    }

    pub fn mandatory(mut self) -> Self {
        self.constraints.mandatory = true;
        self
    }

    pub fn value_type(&self) -> AttrType {
        self.value_type
    }

    pub fn default(&self) -> Option<&AttrDefault> {
        self.default.as_ref()
    }

    pub fn default_value(&self) -> Option<&AttrLiteral> {
        self.default.as_ref().and_then(AttrDefault::as_value)
    }

    pub fn doc(&self) -> &str {
        &self.doc
    }

    pub fn constraints(&self) -> &AttrConstraints {
        &self.constraints
    }

    /// The rule kinds this attribute may refer to, or `None` if it is not restricted.
    pub fn allowed_rule_kinds_list(&self) -> Option<&[String]> {
        match &self.constraints.allowed_rule_kinds {
            AllowedRuleKinds::Any => None,
            AllowedRuleKinds::Only(kinds) => Some(kinds),
        }
    }

    pub fn allows_rule_kind(&self, kind: &str) -> bool {
        match &self.constraints.allowed_rule_kinds {
            AllowedRuleKinds::Any => true,
            AllowedRuleKinds::Only(kinds) => kinds.iter().any(|k| k == kind),
        }
    }

    pub fn allowed_files(&self) -> &AllowedFiles {
        &self.constraints.allowed_files
    }

    pub fn configuration(&self) -> AttrConfiguration {
        self.constraints.configuration
    }

    pub fn is_single_artifact(&self) -> bool {
        self.constraints.single_artifact
    }

    pub fn is_executable(&self) -> bool {
        self.constraints.executable
    }

    pub fn is_mandatory(&self) -> bool {
        self.constraints.mandatory
    }

    pub(crate) fn inherit_doc_from(&mut self, parent: &Attribute) {
        if self.doc.is_empty() {
            self.doc = parent.doc.clone();
        }
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut args = Vec::new();
        if let AllowedRuleKinds::Only(kinds) = &self.constraints.allowed_rule_kinds {
            args.push(format!(
                "allowed_rule_kinds = [{}]",
                kinds.iter().map(|k| format!("\"{}\"", k)).join(", ")
            ));
        }
        match &self.constraints.allowed_files {
            AllowedFiles::Unset => {}
            AllowedFiles::NoFile => args.push("allowed_files = none".to_owned()),
            AllowedFiles::AnyFile => args.push("allowed_files = any".to_owned()),
            AllowedFiles::Suffixes(suffixes) => args.push(format!(
                "allowed_files = [{}]",
                suffixes.iter().map(|s| format!("\"{}\"", s)).join(", ")
            )),
        }
        if self.constraints.configuration != AttrConfiguration::Target {
            args.push(format!("cfg = \"{}\"", self.constraints.configuration));
        }
        if self.constraints.single_artifact {
            args.push("single_artifact = True".to_owned());
        }
        if self.constraints.executable {
            args.push("exec = True".to_owned());
        }
        if self.constraints.mandatory {
            args.push("mandatory = True".to_owned());
        }
        if let Some(default) = &self.default {
            args.push(format!("default = {}", default));
        }
        write!(f, "{}({})", self.value_type, args.join(", "))
    }
}
