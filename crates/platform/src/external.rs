// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # External type descriptions
//!
//! This module defines the plain-data shape of a type that lives outside
//! the analyzed source set. Member and supertype types are referenced by
//! Java type name (`"int"`, `"java.lang.String"`, `"char[]"`); the semantic
//! layer parses those names into its own type representation when the
//! description is interned.

use serde::{Deserialize, Serialize};

/// A type known only through its public surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalClass {
    /// Fully qualified name, e.g. `java.lang.String`
    pub qualified_name: String,

    /// Qualified superclass name; `None` only for `java.lang.Object`
    /// and for interfaces
    #[serde(default)]
    pub superclass: Option<String>,

    /// Qualified names of implemented (or, for interfaces, extended)
    /// interfaces
    #[serde(default)]
    pub interfaces: Vec<String>,

    /// Public methods and constructors
    #[serde(default)]
    pub methods: Vec<ExternalMethod>,

    /// Public fields
    #[serde(default)]
    pub fields: Vec<ExternalField>,

    /// Whether this type is an interface
    #[serde(default)]
    pub is_interface: bool,
}

impl ExternalClass {
    /// Create a class description with no members.
    ///
    /// Classes other than `java.lang.Object` normally follow up with
    /// [`with_superclass`](Self::with_superclass).
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            superclass: None,
            interfaces: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
            is_interface: false,
        }
    }

    /// Create an interface description
    pub fn interface(qualified_name: impl Into<String>) -> Self {
        let mut class = Self::new(qualified_name);
        class.is_interface = true;
        class
    }

    /// Set the superclass
    pub fn with_superclass(mut self, superclass: impl Into<String>) -> Self {
        self.superclass = Some(superclass.into());
        self
    }

    /// Add an implemented or extended interface
    pub fn with_interface(mut self, interface: impl Into<String>) -> Self {
        self.interfaces.push(interface.into());
        self
    }

    /// Add a method
    pub fn with_method(mut self, method: ExternalMethod) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a field
    pub fn with_field(mut self, field: ExternalField) -> Self {
        self.fields.push(field);
        self
    }

    /// The simple (unqualified) name, e.g. `String`
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }

    /// The package part of the qualified name, e.g. `java.lang`
    pub fn package_name(&self) -> &str {
        match self.qualified_name.rfind('.') {
            Some(idx) => &self.qualified_name[..idx],
            None => "",
        }
    }

    /// All methods with the given name
    pub fn methods_named(&self, name: &str) -> Vec<&ExternalMethod> {
        self.methods.iter().filter(|m| m.name == name).collect()
    }

    /// The field with the given name, if any
    pub fn field_named(&self, name: &str) -> Option<&ExternalField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A method (or constructor) of an external type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalMethod {
    /// Method name; constructors use the class's simple name
    pub name: String,

    /// Parameter type names, in order
    #[serde(default)]
    pub parameters: Vec<String>,

    /// Return type name; `"void"` for void methods and constructors
    #[serde(default = "default_void")]
    pub return_type: String,

    /// Checked exception type names from the `throws` clause
    #[serde(default)]
    pub exceptions: Vec<String>,

    /// Whether the method is static
    #[serde(default)]
    pub is_static: bool,
}

fn default_void() -> String {
    "void".to_string()
}

impl ExternalMethod {
    /// Create a void, no-argument method
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_type: default_void(),
            exceptions: Vec::new(),
            is_static: false,
        }
    }

    /// Set the parameter type names
    pub fn with_parameters(mut self, parameters: &[&str]) -> Self {
        self.parameters = parameters.iter().map(|p| p.to_string()).collect();
        self
    }

    /// Set the return type name
    pub fn returns(mut self, return_type: impl Into<String>) -> Self {
        self.return_type = return_type.into();
        self
    }

    /// Add a declared exception type
    pub fn throws(mut self, exception: impl Into<String>) -> Self {
        self.exceptions.push(exception.into());
        self
    }

    /// Mark the method static
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// A field of an external type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalField {
    /// Field name
    pub name: String,

    /// Field type name
    pub field_type: String,

    /// Whether the field is static
    #[serde(default)]
    pub is_static: bool,
}

impl ExternalField {
    /// Create an instance field
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            is_static: false,
        }
    }

    /// Mark the field static
    pub fn static_member(mut self) -> Self {
        self.is_static = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_and_package_name() {
        let class = ExternalClass::new("java.lang.String");
        assert_eq!(class.simple_name(), "String");
        assert_eq!(class.package_name(), "java.lang");

        let unpackaged = ExternalClass::new("Toplevel");
        assert_eq!(unpackaged.simple_name(), "Toplevel");
        assert_eq!(unpackaged.package_name(), "");
    }

    #[test]
    fn test_methods_named_collects_overloads() {
        let class = ExternalClass::new("java.io.PrintStream")
            .with_method(ExternalMethod::new("println").with_parameters(&["int"]))
            .with_method(
                ExternalMethod::new("println").with_parameters(&["java.lang.String"]),
            )
            .with_method(ExternalMethod::new("flush"));

        assert_eq!(class.methods_named("println").len(), 2);
        assert_eq!(class.methods_named("flush").len(), 1);
        assert_eq!(class.methods_named("close").len(), 0);
    }

    #[test]
    fn test_yaml_description_round_trip() {
        let yaml = r#"
qualified_name: demo.Clock
superclass: java.lang.Object
methods:
  - name: tick
    return_type: void
  - name: millis
    return_type: long
    is_static: true
fields:
  - name: ticks
    field_type: int
"#;
        let class: ExternalClass = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(class.qualified_name, "demo.Clock");
        assert_eq!(class.methods.len(), 2);
        assert!(class.methods[1].is_static);
        assert_eq!(class.fields[0].field_type, "int");
        assert!(!class.is_interface);
    }
}
