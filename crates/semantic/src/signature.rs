// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Method signatures
//!
//! A [`MethodSignature`] is the ordered list of a method's parameter types.
//! Equality is structural; it serves both as the declaration key that keeps
//! overloads apart and as the comparison value during overload selection.

use crate::definition::TypeRef;
use serde::{Deserialize, Serialize};

/// The ordered parameter types of a method or constructor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct MethodSignature {
    parameters: Vec<TypeRef>,
}

impl MethodSignature {
    /// Create a signature from parameter types
    pub fn new(parameters: Vec<TypeRef>) -> Self {
        Self { parameters }
    }

    /// The empty signature `()`
    pub fn empty() -> Self {
        Self::default()
    }

    /// The parameter types, in order
    pub fn parameters(&self) -> &[TypeRef] {
        &self.parameters
    }

    /// Mutable access for the linker's type-name rewriting pass
    pub(crate) fn parameters_mut(&mut self) -> &mut [TypeRef] {
        &mut self.parameters
    }

    /// Number of parameters
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// Render as `(T1, T2, ...)` with a caller-supplied type renderer.
    ///
    /// Type names need the symbol table (a [`TypeRef::Named`] is just a
    /// handle), so rendering takes the lookup as a closure.
    pub fn render(&self, mut type_name: impl FnMut(&TypeRef) -> String) -> String {
        let names: Vec<String> = self.parameters.iter().map(&mut type_name).collect();
        format!("({})", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalens_platform::PrimitiveType;

    #[test]
    fn test_signature_equality_is_structural() {
        let a = MethodSignature::new(vec![
            TypeRef::Primitive(PrimitiveType::Int),
            TypeRef::Primitive(PrimitiveType::Double),
        ]);
        let b = MethodSignature::new(vec![
            TypeRef::Primitive(PrimitiveType::Int),
            TypeRef::Primitive(PrimitiveType::Double),
        ]);
        let c = MethodSignature::new(vec![
            TypeRef::Primitive(PrimitiveType::Double),
            TypeRef::Primitive(PrimitiveType::Int),
        ]);

        assert_eq!(a, b);
        assert_ne!(a, c, "parameter order matters");
        assert_ne!(a, MethodSignature::empty());
    }

    #[test]
    fn test_render() {
        let sig = MethodSignature::new(vec![
            TypeRef::Primitive(PrimitiveType::Int),
            TypeRef::Primitive(PrimitiveType::Char).array(),
        ]);

        let rendered = sig.render(|t| match t {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Array(e) => match e.as_ref() {
                TypeRef::Primitive(p) => format!("{}[]", p.name()),
                _ => "?[]".to_string(),
            },
            _ => "?".to_string(),
        });

        assert_eq!(rendered, "(int, char[])");
        assert_eq!(MethodSignature::empty().render(|_| String::new()), "()");
    }
}
