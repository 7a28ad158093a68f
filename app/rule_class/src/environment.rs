/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use anyhow::Context;
use attr_schema::attrs::label::Label;

use crate::config::ToolsConfig;

/// Everything a rule definition may consult while declaring its attributes.
#[derive(Debug, Clone, Default)]
pub struct RuleDefinitionEnvironment {
    tools: ToolsConfig,
}

impl RuleDefinitionEnvironment {
    pub fn new(tools: ToolsConfig) -> Self {
        Self { tools }
    }

    pub fn tools(&self) -> &ToolsConfig {
        &self.tools
    }

    /// Resolves the label of a built-in tool, applying configured overrides and the tool
    /// repository.
    pub fn label(&self, raw: &str) -> anyhow::Result<Label> {
        if let Some(label) = self.tools.tool_override(raw) {
            return Ok(label.clone());
        }
        match self.tools.repository() {
            Some(repository) if raw.starts_with("//") => {
                Label::new(&format!("{}{}", repository, raw))
            }
            _ => Label::new(raw),
        }
        .with_context(|| format!("Invalid tool label `{}`", raw))
    }
}
