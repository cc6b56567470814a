// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Static platform provider
//!
//! A [`TypeProvider`] backed by a predefined description of the runtime
//! core: `java.lang`, the exception hierarchy, and a handful of `java.io`
//! and `java.util` types that analyzed sources reach constantly
//! (`System.out`, collections, iterators).
//!
//! The built-in surface is deliberately a subset - enough for supertype
//! chains, common members, and overload scoring to behave like the real
//! platform. Additional types can be merged in from a YAML description via
//! [`StaticPlatform::from_yaml`].

use std::collections::HashMap;

use crate::error::{PlatformError, PlatformResult};
use crate::external::{ExternalClass, ExternalField, ExternalMethod};
use crate::provider::TypeProvider;

/// Type provider with a predefined platform surface
pub struct StaticPlatform {
    types: HashMap<String, ExternalClass>,
}

impl StaticPlatform {
    /// Create a provider covering the built-in core surface
    pub fn new() -> Self {
        let mut platform = Self {
            types: HashMap::new(),
        };

        platform.register_lang_roots();
        platform.register_lang_interfaces();
        platform.register_boxed_primitives();
        platform.register_lang_utilities();
        platform.register_throwables();
        platform.register_io();
        platform.register_util();

        platform
    }

    /// Create an empty provider; useful for tests that want full control
    /// over the visible surface
    pub fn empty() -> Self {
        Self {
            types: HashMap::new(),
        }
    }

    /// Parse a YAML sequence of type descriptions and merge it over the
    /// built-in surface.
    ///
    /// # Examples
    ///
    /// ```
    /// use javalens_platform::{StaticPlatform, TypeProvider};
    ///
    /// let extra = "
    /// - qualified_name: demo.Clock
    ///   superclass: java.lang.Object
    ///   methods:
    ///     - name: millis
    ///       return_type: long
    /// ";
    /// let platform = StaticPlatform::from_yaml(extra).unwrap();
    /// assert!(platform.resolve_type("demo.Clock").is_some());
    /// assert!(platform.resolve_type("java.lang.Object").is_some());
    /// ```
    pub fn from_yaml(yaml: &str) -> PlatformResult<Self> {
        let described: Vec<ExternalClass> = serde_yaml::from_str(yaml)
            .map_err(|e| PlatformError::InvalidDescription(e.to_string()))?;
        tracing::debug!(count = described.len(), "merging described platform types");

        let mut platform = Self::new();
        for class in described {
            platform.register(class);
        }
        Ok(platform)
    }

    /// Add or replace a type description
    pub fn register(&mut self, class: ExternalClass) {
        self.types.insert(class.qualified_name.clone(), class);
    }

    /// Number of known types
    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    fn register_lang_roots(&mut self) {
        self.register(
            ExternalClass::new("java.lang.Object")
                .with_method(
                    ExternalMethod::new("equals")
                        .with_parameters(&["java.lang.Object"])
                        .returns("boolean"),
                )
                .with_method(ExternalMethod::new("hashCode").returns("int"))
                .with_method(ExternalMethod::new("toString").returns("java.lang.String"))
                .with_method(ExternalMethod::new("getClass").returns("java.lang.Class"))
                .with_method(
                    ExternalMethod::new("clone")
                        .returns("java.lang.Object")
                        .throws("java.lang.CloneNotSupportedException"),
                )
                .with_method(ExternalMethod::new("notify"))
                .with_method(ExternalMethod::new("notifyAll"))
                .with_method(
                    ExternalMethod::new("wait").throws("java.lang.InterruptedException"),
                )
                .with_method(
                    ExternalMethod::new("wait")
                        .with_parameters(&["long"])
                        .throws("java.lang.InterruptedException"),
                ),
        );

        self.register(
            ExternalClass::new("java.lang.Class")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("getName").returns("java.lang.String"))
                .with_method(
                    ExternalMethod::new("isInstance")
                        .with_parameters(&["java.lang.Object"])
                        .returns("boolean"),
                ),
        );

        self.register(
            ExternalClass::new("java.lang.String")
                .with_superclass("java.lang.Object")
                .with_interface("java.lang.Comparable")
                .with_interface("java.lang.CharSequence")
                .with_interface("java.io.Serializable")
                .with_method(ExternalMethod::new("length").returns("int"))
                .with_method(
                    ExternalMethod::new("charAt")
                        .with_parameters(&["int"])
                        .returns("char"),
                )
                .with_method(
                    ExternalMethod::new("substring")
                        .with_parameters(&["int"])
                        .returns("java.lang.String"),
                )
                .with_method(
                    ExternalMethod::new("substring")
                        .with_parameters(&["int", "int"])
                        .returns("java.lang.String"),
                )
                .with_method(
                    ExternalMethod::new("indexOf")
                        .with_parameters(&["java.lang.String"])
                        .returns("int"),
                )
                .with_method(
                    ExternalMethod::new("concat")
                        .with_parameters(&["java.lang.String"])
                        .returns("java.lang.String"),
                )
                .with_method(ExternalMethod::new("toUpperCase").returns("java.lang.String"))
                .with_method(ExternalMethod::new("toLowerCase").returns("java.lang.String"))
                .with_method(ExternalMethod::new("trim").returns("java.lang.String"))
                .with_method(
                    ExternalMethod::new("equals")
                        .with_parameters(&["java.lang.Object"])
                        .returns("boolean"),
                )
                .with_method(
                    ExternalMethod::new("valueOf")
                        .with_parameters(&["int"])
                        .returns("java.lang.String")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("valueOf")
                        .with_parameters(&["char"])
                        .returns("java.lang.String")
                        .static_member(),
                ),
        );

        self.register(
            ExternalClass::new("java.lang.StringBuilder")
                .with_superclass("java.lang.Object")
                .with_interface("java.lang.CharSequence")
                .with_method(
                    ExternalMethod::new("append")
                        .with_parameters(&["java.lang.String"])
                        .returns("java.lang.StringBuilder"),
                )
                .with_method(
                    ExternalMethod::new("append")
                        .with_parameters(&["int"])
                        .returns("java.lang.StringBuilder"),
                )
                .with_method(
                    ExternalMethod::new("append")
                        .with_parameters(&["char"])
                        .returns("java.lang.StringBuilder"),
                )
                .with_method(
                    ExternalMethod::new("append")
                        .with_parameters(&["java.lang.Object"])
                        .returns("java.lang.StringBuilder"),
                )
                .with_method(ExternalMethod::new("length").returns("int"))
                .with_method(ExternalMethod::new("toString").returns("java.lang.String")),
        );
    }

    fn register_lang_interfaces(&mut self) {
        self.register(
            ExternalClass::interface("java.lang.Comparable").with_method(
                ExternalMethod::new("compareTo")
                    .with_parameters(&["java.lang.Object"])
                    .returns("int"),
            ),
        );
        self.register(
            ExternalClass::interface("java.lang.CharSequence")
                .with_method(ExternalMethod::new("length").returns("int"))
                .with_method(
                    ExternalMethod::new("charAt")
                        .with_parameters(&["int"])
                        .returns("char"),
                ),
        );
        self.register(ExternalClass::interface("java.lang.Cloneable"));
        self.register(
            ExternalClass::interface("java.lang.Runnable")
                .with_method(ExternalMethod::new("run")),
        );
        self.register(
            ExternalClass::interface("java.lang.Iterable")
                .with_method(ExternalMethod::new("iterator").returns("java.util.Iterator")),
        );
        self.register(ExternalClass::interface("java.io.Serializable"));
    }

    fn register_boxed_primitives(&mut self) {
        self.register(
            ExternalClass::new("java.lang.Number")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("intValue").returns("int"))
                .with_method(ExternalMethod::new("longValue").returns("long"))
                .with_method(ExternalMethod::new("floatValue").returns("float"))
                .with_method(ExternalMethod::new("doubleValue").returns("double")),
        );

        self.register(
            ExternalClass::new("java.lang.Integer")
                .with_superclass("java.lang.Number")
                .with_interface("java.lang.Comparable")
                .with_field(ExternalField::new("MAX_VALUE", "int").static_member())
                .with_field(ExternalField::new("MIN_VALUE", "int").static_member())
                .with_method(
                    ExternalMethod::new("parseInt")
                        .with_parameters(&["java.lang.String"])
                        .returns("int")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("toString")
                        .with_parameters(&["int"])
                        .returns("java.lang.String")
                        .static_member(),
                ),
        );
        self.register(
            ExternalClass::new("java.lang.Long")
                .with_superclass("java.lang.Number")
                .with_field(ExternalField::new("MAX_VALUE", "long").static_member())
                .with_method(
                    ExternalMethod::new("parseLong")
                        .with_parameters(&["java.lang.String"])
                        .returns("long")
                        .static_member(),
                ),
        );
        self.register(
            ExternalClass::new("java.lang.Short").with_superclass("java.lang.Number"),
        );
        self.register(
            ExternalClass::new("java.lang.Byte").with_superclass("java.lang.Number"),
        );
        self.register(
            ExternalClass::new("java.lang.Float").with_superclass("java.lang.Number"),
        );
        self.register(
            ExternalClass::new("java.lang.Double")
                .with_superclass("java.lang.Number")
                .with_method(
                    ExternalMethod::new("parseDouble")
                        .with_parameters(&["java.lang.String"])
                        .returns("double")
                        .static_member(),
                ),
        );
        self.register(
            ExternalClass::new("java.lang.Boolean")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("booleanValue").returns("boolean")),
        );
        self.register(
            ExternalClass::new("java.lang.Character")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("charValue").returns("char"))
                .with_method(
                    ExternalMethod::new("isDigit")
                        .with_parameters(&["char"])
                        .returns("boolean")
                        .static_member(),
                ),
        );
    }

    fn register_lang_utilities(&mut self) {
        self.register(
            ExternalClass::new("java.lang.Math")
                .with_superclass("java.lang.Object")
                .with_field(ExternalField::new("PI", "double").static_member())
                .with_field(ExternalField::new("E", "double").static_member())
                .with_method(
                    ExternalMethod::new("abs")
                        .with_parameters(&["int"])
                        .returns("int")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("abs")
                        .with_parameters(&["long"])
                        .returns("long")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("abs")
                        .with_parameters(&["double"])
                        .returns("double")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("max")
                        .with_parameters(&["int", "int"])
                        .returns("int")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("min")
                        .with_parameters(&["int", "int"])
                        .returns("int")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("sqrt")
                        .with_parameters(&["double"])
                        .returns("double")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("pow")
                        .with_parameters(&["double", "double"])
                        .returns("double")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("random").returns("double").static_member(),
                ),
        );

        self.register(
            ExternalClass::new("java.lang.System")
                .with_superclass("java.lang.Object")
                .with_field(ExternalField::new("out", "java.io.PrintStream").static_member())
                .with_field(ExternalField::new("err", "java.io.PrintStream").static_member())
                .with_field(ExternalField::new("in", "java.io.InputStream").static_member())
                .with_method(
                    ExternalMethod::new("currentTimeMillis")
                        .returns("long")
                        .static_member(),
                )
                .with_method(
                    ExternalMethod::new("exit")
                        .with_parameters(&["int"])
                        .static_member(),
                ),
        );

        self.register(
            ExternalClass::new("java.lang.Thread")
                .with_superclass("java.lang.Object")
                .with_interface("java.lang.Runnable")
                .with_method(ExternalMethod::new("start"))
                .with_method(ExternalMethod::new("run"))
                .with_method(
                    ExternalMethod::new("sleep")
                        .with_parameters(&["long"])
                        .throws("java.lang.InterruptedException")
                        .static_member(),
                ),
        );
    }

    fn register_throwables(&mut self) {
        self.register(
            ExternalClass::new("java.lang.Throwable")
                .with_superclass("java.lang.Object")
                .with_interface("java.io.Serializable")
                .with_method(ExternalMethod::new("getMessage").returns("java.lang.String"))
                .with_method(ExternalMethod::new("printStackTrace")),
        );

        let subclasses = [
            ("java.lang.Exception", "java.lang.Throwable"),
            ("java.lang.Error", "java.lang.Throwable"),
            ("java.lang.RuntimeException", "java.lang.Exception"),
            ("java.lang.InterruptedException", "java.lang.Exception"),
            ("java.lang.CloneNotSupportedException", "java.lang.Exception"),
            ("java.lang.ArithmeticException", "java.lang.RuntimeException"),
            ("java.lang.NullPointerException", "java.lang.RuntimeException"),
            ("java.lang.ClassCastException", "java.lang.RuntimeException"),
            (
                "java.lang.IllegalArgumentException",
                "java.lang.RuntimeException",
            ),
            (
                "java.lang.IndexOutOfBoundsException",
                "java.lang.RuntimeException",
            ),
            (
                "java.lang.ArrayIndexOutOfBoundsException",
                "java.lang.IndexOutOfBoundsException",
            ),
            (
                "java.lang.NumberFormatException",
                "java.lang.IllegalArgumentException",
            ),
            ("java.io.IOException", "java.lang.Exception"),
            ("java.io.FileNotFoundException", "java.io.IOException"),
        ];
        for (name, superclass) in subclasses {
            self.register(ExternalClass::new(name).with_superclass(superclass));
        }
    }

    fn register_io(&mut self) {
        self.register(
            ExternalClass::new("java.io.PrintStream")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("println"))
                .with_method(ExternalMethod::new("println").with_parameters(&["java.lang.String"]))
                .with_method(ExternalMethod::new("println").with_parameters(&["java.lang.Object"]))
                .with_method(ExternalMethod::new("println").with_parameters(&["boolean"]))
                .with_method(ExternalMethod::new("println").with_parameters(&["char"]))
                .with_method(ExternalMethod::new("println").with_parameters(&["int"]))
                .with_method(ExternalMethod::new("println").with_parameters(&["long"]))
                .with_method(ExternalMethod::new("println").with_parameters(&["double"]))
                .with_method(ExternalMethod::new("print").with_parameters(&["java.lang.String"]))
                .with_method(ExternalMethod::new("print").with_parameters(&["int"]))
                .with_method(ExternalMethod::new("print").with_parameters(&["char"]))
                .with_method(ExternalMethod::new("flush")),
        );
        self.register(
            ExternalClass::new("java.io.InputStream")
                .with_superclass("java.lang.Object")
                .with_method(
                    ExternalMethod::new("read")
                        .returns("int")
                        .throws("java.io.IOException"),
                )
                .with_method(ExternalMethod::new("close").throws("java.io.IOException")),
        );
    }

    fn register_util(&mut self) {
        self.register(
            ExternalClass::interface("java.util.Iterator")
                .with_method(ExternalMethod::new("hasNext").returns("boolean"))
                .with_method(ExternalMethod::new("next").returns("java.lang.Object")),
        );
        self.register(
            ExternalClass::interface("java.util.Collection")
                .with_interface("java.lang.Iterable")
                .with_method(
                    ExternalMethod::new("add")
                        .with_parameters(&["java.lang.Object"])
                        .returns("boolean"),
                )
                .with_method(ExternalMethod::new("size").returns("int"))
                .with_method(ExternalMethod::new("isEmpty").returns("boolean"))
                .with_method(
                    ExternalMethod::new("contains")
                        .with_parameters(&["java.lang.Object"])
                        .returns("boolean"),
                ),
        );
        self.register(
            ExternalClass::interface("java.util.List")
                .with_interface("java.util.Collection")
                .with_method(
                    ExternalMethod::new("get")
                        .with_parameters(&["int"])
                        .returns("java.lang.Object"),
                )
                .with_method(
                    ExternalMethod::new("set")
                        .with_parameters(&["int", "java.lang.Object"])
                        .returns("java.lang.Object"),
                ),
        );
        self.register(
            ExternalClass::interface("java.util.Set").with_interface("java.util.Collection"),
        );
        self.register(
            ExternalClass::interface("java.util.Map")
                .with_method(
                    ExternalMethod::new("get")
                        .with_parameters(&["java.lang.Object"])
                        .returns("java.lang.Object"),
                )
                .with_method(
                    ExternalMethod::new("put")
                        .with_parameters(&["java.lang.Object", "java.lang.Object"])
                        .returns("java.lang.Object"),
                )
                .with_method(ExternalMethod::new("size").returns("int")),
        );
        self.register(
            ExternalClass::new("java.util.ArrayList")
                .with_superclass("java.lang.Object")
                .with_interface("java.util.List")
                .with_method(ExternalMethod::new("ArrayList"))
                .with_method(ExternalMethod::new("ArrayList").with_parameters(&["int"])),
        );
        self.register(
            ExternalClass::new("java.util.HashMap")
                .with_superclass("java.lang.Object")
                .with_interface("java.util.Map")
                .with_method(ExternalMethod::new("HashMap")),
        );
        self.register(
            ExternalClass::new("java.util.HashSet")
                .with_superclass("java.lang.Object")
                .with_interface("java.util.Set")
                .with_method(ExternalMethod::new("HashSet")),
        );
        self.register(
            ExternalClass::new("java.util.Random")
                .with_superclass("java.lang.Object")
                .with_method(ExternalMethod::new("Random"))
                .with_method(
                    ExternalMethod::new("nextInt")
                        .with_parameters(&["int"])
                        .returns("int"),
                ),
        );
        self.register(
            ExternalClass::new("java.util.Vector")
                .with_superclass("java.lang.Object")
                .with_interface("java.util.List")
                .with_method(ExternalMethod::new("Vector"))
                .with_method(
                    ExternalMethod::new("elementAt")
                        .with_parameters(&["int"])
                        .returns("java.lang.Object"),
                ),
        );
    }
}

impl Default for StaticPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeProvider for StaticPlatform {
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

    #[test]
    fn test_object_is_the_root() {
        let platform = StaticPlatform::new();
        let object = platform.resolve_type("java.lang.Object").unwrap();
        assert!(object.superclass.is_none());
        assert!(!object.is_interface);
    }

    #[test]
    fn test_string_surface() {
        let platform = StaticPlatform::new();
        let string = platform.resolve_type("java.lang.String").unwrap();

        assert_eq!(string.superclass.as_deref(), Some("java.lang.Object"));
        assert!(string
            .interfaces
            .iter()
            .any(|i| i == "java.lang.Comparable"));
        assert_eq!(string.methods_named("substring").len(), 2);
        assert_eq!(
            string.methods_named("length")[0].return_type,
            "int"
        );
    }

    #[test]
    fn test_println_overloads() {
        let platform = StaticPlatform::new();
        let stream = platform.resolve_type("java.io.PrintStream").unwrap();
        let println = stream.methods_named("println");

        assert!(println.len() >= 7);
        assert!(println.iter().any(|m| m.parameters.is_empty()));
        assert!(println.iter().any(|m| m.parameters == ["int"]));
    }

    #[test]
    fn test_exception_hierarchy_reaches_throwable() {
        let platform = StaticPlatform::new();

        let mut current = "java.lang.ArrayIndexOutOfBoundsException".to_string();
        let mut hops = 0;
        while let Some(class) = platform.resolve_type(&current) {
            match class.superclass {
                Some(superclass) => {
                    current = superclass;
                    hops += 1;
                }
                None => break,
            }
        }
        assert_eq!(current, "java.lang.Object");
        assert!(hops >= 4, "expected a multi-level hierarchy, got {} hops", hops);
    }

    #[test]
    fn test_unknown_type_is_none() {
        let platform = StaticPlatform::new();
        assert!(platform.resolve_type("com.example.Missing").is_none());
    }

    #[test]
    fn test_list_types_matches_resolution() {
        let platform = StaticPlatform::new();
        for class in platform.list_types() {
            assert!(platform.resolve_type(&class.qualified_name).is_some());
        }
        assert_eq!(platform.list_types().len(), platform.type_count());
    }

    #[test]
    fn test_from_yaml_merges_over_builtins() {
        let yaml = "
- qualified_name: demo.Sensor
  superclass: java.lang.Object
  methods:
    - name: sample
      return_type: double
";
        let platform = StaticPlatform::from_yaml(yaml).unwrap();
        assert!(platform.resolve_type("demo.Sensor").is_some());
        assert!(platform.resolve_type("java.lang.String").is_some());
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        let result = StaticPlatform::from_yaml(": not valid : [");
        assert!(matches!(result, Err(PlatformError::InvalidDescription(_))));
    }
}
