/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

use std::fmt::Debug;
use std::sync::Arc;

use allocative::Allocative;
use dupe::Dupe;
use serde::Serialize;
use serde::Serializer;

/// The logic that generates build actions for targets of a rule kind.
///
/// Action generation belongs to the build engine; a rule class only needs a handle to it.
pub trait RuleConfiguredTargetFactory: Debug + Send + Sync + 'static {
    /// Identifies the factory, e.g. `ObjcProtoLibrary`.
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, Dupe, Allocative)]
pub struct FactoryHandle(#[allocative(skip)] Arc<dyn RuleConfiguredTargetFactory>);

impl FactoryHandle {
    pub fn new(factory: impl RuleConfiguredTargetFactory) -> Self {
        FactoryHandle(Arc::new(factory))
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }
}

/// Either a factory, or an explicit marker that the rule class only exists to be inherited.
#[derive(Debug, Clone, Dupe, Allocative)]
pub enum RuleFactory {
    Abstract,
    Factory(FactoryHandle),
}

impl RuleFactory {
    pub fn new(factory: impl RuleConfiguredTargetFactory) -> Self {
        RuleFactory::Factory(FactoryHandle::new(factory))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            RuleFactory::Abstract => None,
            RuleFactory::Factory(f) => Some(f.name()),
        }
    }

    pub fn is_abstract(&self) -> bool {
        matches!(self, RuleFactory::Abstract)
    }
}

/// Factories are compared by name.
impl PartialEq for RuleFactory {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name()
    }
}

impl Eq for RuleFactory {}

impl Serialize for RuleFactory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.name().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use crate::factory::RuleConfiguredTargetFactory;
    use crate::factory::RuleFactory;

    #[derive(Debug)]
    struct Named(&'static str);

    impl RuleConfiguredTargetFactory for Named {
        fn name(&self) -> &str {
            self.0
        }
    }

    #[test]
    fn test_eq_by_name() {
        assert_eq!(RuleFactory::new(Named("a")), RuleFactory::new(Named("a")));
        assert_ne!(RuleFactory::new(Named("a")), RuleFactory::new(Named("b")));
        assert_ne!(RuleFactory::new(Named("a")), RuleFactory::Abstract);
        assert_eq!(RuleFactory::Abstract, RuleFactory::Abstract);
        assert!(RuleFactory::Abstract.is_abstract());
    }
}
