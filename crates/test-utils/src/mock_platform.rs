// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Mock platform implementation for testing
//!
//! Provides an in-memory type provider with a builder pattern, for tests
//! that want an exactly controlled external surface instead of the full
//! built-in one.

use javalens_platform::{ExternalClass, TypeProvider};
use std::collections::HashMap;

/// In-memory mock platform for testing
#[derive(Debug, Clone, Default)]
pub struct MockPlatform {
    types: HashMap<String, ExternalClass>,
}

impl MockPlatform {
    /// Create a new empty mock platform
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock carrying only the root class `java.lang.Object`
    pub fn with_root() -> Self {
        Self::new().add_type(ExternalClass::new("java.lang.Object"))
    }

    /// Add a type description
    pub fn add_type(mut self, class: ExternalClass) -> Self {
        self.types.insert(class.qualified_name.clone(), class);
        self
    }

    /// Number of described types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }
}

impl TypeProvider for MockPlatform {
    fn resolve_type(&self, qualified_name: &str) -> Option<ExternalClass> {
        self.types.get(qualified_name).cloned()
    }

    fn list_types(&self) -> Vec<ExternalClass> {
        self.types.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalens_platform::ExternalMethod;

    #[test]
    fn test_mock_platform_round_trip() {
        let platform = MockPlatform::with_root().add_type(
            ExternalClass::new("demo.Widget")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("render")),
        );

        assert_eq!(platform.type_count(), 2);
        let widget = platform.resolve_type("demo.Widget").unwrap();
        assert_eq!(widget.methods.len(), 1);
        assert!(platform.resolve_type("demo.Gone").is_none());
    }
}
