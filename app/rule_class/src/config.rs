/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Configuration of the tool labels wired into implicit attributes.
//!
//! Accepts `section.key=value` arguments:
//!
//! ```text
//! tools.repository=@bazel_tools
//! tool_overrides.//tools/objc:xcodegen=//third_party/xcodegen:xcodegen
//! ```
//!
//! `tools.repository` is prepended to every `//`-rooted tool label. An entry in `tool_overrides`
//! replaces one tool label outright and is not prefixed.

use attr_schema::attrs::label::Label;
use starlark_map::ordered_map::OrderedMap;

pub const TOOLS_SECTION: &str = "tools";
pub const TOOL_OVERRIDES_SECTION: &str = "tool_overrides";
const REPOSITORY_KEY: &str = "repository";

#[derive(Debug, thiserror::Error)]
enum ConfigArgumentParseError {
    #[error("Could not find section separator (`.`) in pair `{0}`")]
    NoSectionDotSeparator(String),
    #[error("Could not find equals sign (`=`) in pair `{0}`")]
    NoEqualsSeparator(String),
    #[error("Expected key-value in format of `section.key=value` but only got `{0}`")]
    MissingData(String),
    #[error("Contains whitespace in key-value pair `{0}`")]
    WhitespaceInKeyOrValue(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ToolsConfigError {
    #[error("Unknown config section `{0}`, expected `tools` or `tool_overrides`")]
    UnknownSection(String),
    #[error("Unknown config key `{0}.{1}`")]
    UnknownKey(String, String),
    #[error("Tool repository `{0}` must start with `@`")]
    InvalidRepository(String),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ConfigSectionAndKey {
    pub section: String,
    pub key: String,
}

// Parses config key in the format `section.key`
pub fn parse_config_section_and_key(
    raw_section_and_key: &str,
    raw_arg: &str,
) -> anyhow::Result<ConfigSectionAndKey> {
    let (raw_section, raw_key) = raw_section_and_key
        .split_once('.')
        .ok_or_else(|| ConfigArgumentParseError::NoSectionDotSeparator(raw_arg.to_owned()))?;

    let section = raw_section.trim();
    let key = raw_key.trim();
    if section.contains(char::is_whitespace) || key.contains(char::is_whitespace) {
        return Err(ConfigArgumentParseError::WhitespaceInKeyOrValue(raw_arg.to_owned()).into());
    }
    if section.is_empty() || key.is_empty() {
        return Err(ConfigArgumentParseError::MissingData(raw_arg.to_owned()).into());
    }

    Ok(ConfigSectionAndKey {
        section: section.to_owned(),
        key: key.to_owned(),
    })
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ToolsConfig {
    repository: Option<String>,
    overrides: OrderedMap<String, Label>,
}

impl ToolsConfig {
    /// Parses `section.key=value` arguments. Later arguments win over earlier ones.
    pub fn parse(args: &[&str]) -> anyhow::Result<ToolsConfig> {
        let mut config = ToolsConfig::default();
        for raw_arg in args {
            let (raw_section_and_key, raw_value) = raw_arg
                .split_once('=')
                .ok_or_else(|| ConfigArgumentParseError::NoEqualsSeparator((*raw_arg).to_owned()))?;
            let ConfigSectionAndKey { section, key } =
                parse_config_section_and_key(raw_section_and_key, raw_arg)?;
            let value = raw_value.trim();
            if value.is_empty() {
                return Err(ConfigArgumentParseError::MissingData((*raw_arg).to_owned()).into());
            }
            match section.as_str() {
                TOOLS_SECTION if key == REPOSITORY_KEY => {
                    if !value.starts_with('@') {
                        return Err(ToolsConfigError::InvalidRepository(value.to_owned()).into());
                    }
                    config.repository = Some(value.to_owned());
                }
                TOOLS_SECTION => return Err(ToolsConfigError::UnknownKey(section, key).into()),
                TOOL_OVERRIDES_SECTION => {
                    config.overrides.insert(key, Label::new(value)?);
                }
                _ => return Err(ToolsConfigError::UnknownSection(section).into()),
            }
        }
        Ok(config)
    }

    pub fn repository(&self) -> Option<&str> {
        self.repository.as_deref()
    }

    pub fn tool_override(&self, label: &str) -> Option<&Label> {
        self.overrides.get(label)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::ToolsConfig;
    use crate::config::ToolsConfigError;

    #[test]
    fn test_parse() -> anyhow::Result<()> {
        let config = ToolsConfig::parse(&[
            "tools.repository=@bazel_tools",
            "tool_overrides.//tools/objc:xcodegen=//third_party/xcodegen:xcodegen",
            "tool_overrides.//tools/objc:xcodegen = //third_party/xcodegen:xcodegen2",
        ])?;
        assert_eq!(Some("@bazel_tools"), config.repository());
        assert_eq!(
            Some("//third_party/xcodegen:xcodegen2"),
            config
                .tool_override("//tools/objc:xcodegen")
                .map(|l| l.as_str())
        );
        assert!(config.tool_override("//tools/objc:proto_support").is_none());
        Ok(())
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "tools.repository",
            "repository=@bazel_tools",
            "tools.=x",
            "tools.repository=",
            "tools.repo sitory=@x",
        ] {
            assert!(ToolsConfig::parse(&[bad]).is_err(), "{}", bad);
        }

        let err = ToolsConfig::parse(&["cxx.compiler=clang"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolsConfigError>(),
            Some(ToolsConfigError::UnknownSection(s)) if s == "cxx"
        ));
        let err = ToolsConfig::parse(&["tools.compiler=clang"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolsConfigError>(),
            Some(ToolsConfigError::UnknownKey(..))
        ));
        let err = ToolsConfig::parse(&["tools.repository=bazel_tools"]).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ToolsConfigError>(),
            Some(ToolsConfigError::InvalidRepository(_))
        ));
    }
}
