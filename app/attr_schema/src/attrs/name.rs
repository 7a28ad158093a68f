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
use serde::Serialize;

/// Prefix of attributes injected by the build system, e.g. `$xcodegen`.
pub const IMPLICIT_ATTR_PREFIX: char = '$';
/// Prefix of attributes whose default is computed late, e.g. `:cc_toolchain`.
pub const COMPUTED_ATTR_PREFIX: char = ':';

#[derive(Debug, Clone, Copy, Dupe, Eq, PartialEq, Hash, Allocative, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttrVisibility {
    /// Settable by the rule author.
    User,
    /// Hidden, with a fixed default.
    Implicit,
    /// Hidden, with a computed default.
    Computed,
}

impl AttrVisibility {
    pub fn of(name: &str) -> AttrVisibility {
        if name.starts_with(IMPLICIT_ATTR_PREFIX) {
            AttrVisibility::Implicit
        } else if name.starts_with(COMPUTED_ATTR_PREFIX) {
            AttrVisibility::Computed
        } else {
            AttrVisibility::User
        }
    }

    pub fn is_user_settable(self) -> bool {
        self == AttrVisibility::User
    }
}

/// `[a-z_][a-z0-9_]*`. Shared by attribute and rule class names.
pub fn is_valid_identifier(ident: &str) -> bool {
    let mut chars = ident.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_lowercase() || c.is_ascii_digit())
}

/// Valid names are an identifier with an optional `$` or `:` prefix.
pub fn is_valid_attr_name(name: &str) -> bool {
    let ident = name
        .strip_prefix(IMPLICIT_ATTR_PREFIX)
        .or_else(|| name.strip_prefix(COMPUTED_ATTR_PREFIX))
        .unwrap_or(name);
    is_valid_identifier(ident)
}

#[cfg(test)]
mod tests {
    use crate::attrs::name::is_valid_attr_name;
    use crate::attrs::name::is_valid_identifier;
    use crate::attrs::name::AttrVisibility;

    #[test]
    fn test_visibility() {
        assert_eq!(AttrVisibility::User, AttrVisibility::of("options_file"));
        assert_eq!(AttrVisibility::Implicit, AttrVisibility::of("$xcodegen"));
        assert_eq!(AttrVisibility::Computed, AttrVisibility::of(":cc_toolchain"));
    }

    #[test]
    fn test_valid_names() {
        assert!(is_valid_attr_name("deps"));
        assert!(is_valid_attr_name("$lib_protobuf"));
        assert!(is_valid_attr_name(":stl2"));
        assert!(is_valid_attr_name("_private"));
        assert!(!is_valid_attr_name(""));
        assert!(!is_valid_attr_name("$"));
        assert!(!is_valid_attr_name("$$x"));
        assert!(!is_valid_attr_name("2deps"));
        assert!(!is_valid_attr_name("Deps"));
        assert!(!is_valid_attr_name("options-file"));
    }

    #[test]
    fn test_identifier_has_no_prefix() {
        assert!(is_valid_identifier("objc_proto_library"));
        assert!(is_valid_identifier("_x1"));
        assert!(!is_valid_identifier("$base_rule"));
        assert!(!is_valid_identifier(":stl"));
        assert!(!is_valid_identifier(""));
    }
}
