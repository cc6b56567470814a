// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Definitions
//!
//! A [`Definition`] is the thing a name resolves to: a class or interface,
//! a method or constructor, a variable (field, local, parameter), a
//! synthesized default constructor, or a statement label.
//!
//! Definitions live in an arena owned by the symbol table and refer to each
//! other by [`DefId`] handle. The class graph is cyclic by design -
//! superclass links point up while the live `subclasses`/`implementors`
//! lists point back down - and handles avoid ownership cycles while keeping
//! both directions O(1).
//!
//! The variants are a single tagged union rather than a trait hierarchy so
//! that resolution logic can match exhaustively and the compiler flags any
//! unhandled kind.

use crate::scope::ScopeId;
use javalens_core::Occurrence;
use javalens_platform::PrimitiveType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Stable handle of a definition in the symbol table's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DefId(pub usize);

impl DefId {
    /// Arena index of this definition
    pub fn index(self) -> usize {
        self.0
    }
}

/// A resolved (or residually unresolved) type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeRef {
    /// One of the eight primitive types
    Primitive(PrimitiveType),
    /// A class or interface definition, source or platform
    Named(DefId),
    /// An array of some element type
    Array(Box<TypeRef>),
    /// The type of the `null` literal, assignable to any reference type
    Null,
    /// The `void` non-type of void method returns
    Void,
    /// A name that neither the sources nor the platform could supply.
    /// Survives linking only for genuinely unknown names.
    Unresolved(String),
}

impl TypeRef {
    /// Wrap this type into an array type
    pub fn array(self) -> TypeRef {
        TypeRef::Array(Box::new(self))
    }

    /// The element type, if this is an array
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Array(element) => Some(element),
            _ => None,
        }
    }

    /// The primitive type, if this is one
    pub fn as_primitive(&self) -> Option<PrimitiveType> {
        match self {
            TypeRef::Primitive(p) => Some(*p),
            _ => None,
        }
    }

    /// The class definition, if this is a named type
    pub fn as_class(&self) -> Option<DefId> {
        match self {
            TypeRef::Named(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether this is a reference type (class, interface, or array)
    pub fn is_reference(&self) -> bool {
        matches!(self, TypeRef::Named(_) | TypeRef::Array(_))
    }
}

/// Fields shared by every definition variant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefCommon {
    /// Simple name, e.g. `add`
    pub name: String,

    /// Dotted qualified name, e.g. `geometry.Point.add`
    pub qualified_name: String,

    /// The scope the definition was declared in; `None` for platform
    /// definitions, which belong to no scope
    pub scope: Option<ScopeId>,

    /// Where the declaration's identifier token starts; `None` for
    /// platform definitions and synthesized constructors
    pub occurrence: Option<Occurrence>,
}

impl DefCommon {
    pub fn new(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qualified_name: qualified_name.into(),
            scope: None,
            occurrence: None,
        }
    }

    pub fn with_scope(mut self, scope: ScopeId) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_occurrence(mut self, occurrence: Occurrence) -> Self {
        self.occurrence = Some(occurrence);
        self
    }
}

/// Where a class definition came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassOrigin {
    /// Declared in an analyzed source file
    Source,
    /// Interned from the platform's public surface
    External,
}

/// A class or interface
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    pub common: DefCommon,

    /// Whether this is an interface
    pub is_interface: bool,

    /// Source declaration or interned platform surface
    pub origin: ClassOrigin,

    /// The class body scope; `None` for external classes
    pub body: Option<ScopeId>,

    /// Linked superclass. `None` for `java.lang.Object` and for
    /// interfaces; every other class defaults to the external root class
    /// once linked.
    pub superclass: Option<DefId>,

    /// Linked implemented (or extended, for interfaces) interfaces
    pub interfaces: Vec<DefId>,

    /// Classes discovered to extend this one; maintained by the linker
    /// regardless of build order
    pub subclasses: Vec<DefId>,

    /// Classes discovered to implement this interface
    pub implementors: Vec<DefId>,

    /// Nested type name to nested class definition
    pub nested: HashMap<String, DefId>,

    /// Member methods by name, for external classes only; source classes
    /// keep their members in the body scope
    pub methods: HashMap<String, Vec<DefId>>,

    /// Member fields by name, for external classes only
    pub fields: HashMap<String, DefId>,

    /// Superclass name as written, until the linker resolves it
    pub unresolved_superclass: Option<String>,

    /// Interface names as written, until the linker resolves them
    pub unresolved_interfaces: Vec<String>,
}

impl ClassDef {
    pub fn new(common: DefCommon, origin: ClassOrigin) -> Self {
        Self {
            common,
            is_interface: false,
            origin,
            body: None,
            superclass: None,
            interfaces: Vec::new(),
            subclasses: Vec::new(),
            implementors: Vec::new(),
            nested: HashMap::new(),
            methods: HashMap::new(),
            fields: HashMap::new(),
            unresolved_superclass: None,
            unresolved_interfaces: Vec::new(),
        }
    }
}

/// A method or constructor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDef {
    pub common: DefCommon,

    /// The class or interface declaring this method
    pub owner: DefId,

    /// Ordered parameter types
    pub signature: crate::signature::MethodSignature,

    /// Declared return type; `Void` for constructors
    pub return_type: TypeRef,

    /// Declared `throws` types
    pub exceptions: Vec<TypeRef>,

    /// Whether the method is static
    pub is_static: bool,

    /// Whether this is a constructor
    pub is_constructor: bool,

    /// The parameter-and-body scope; `None` for external methods
    pub body: Option<ScopeId>,

    /// Position among the declarations of the owning type; the documented
    /// tie-break for otherwise equally specific overloads
    pub declared_index: usize,
}

/// What kind of value a variable definition is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableKind {
    Field,
    Local,
    Parameter,
}

/// A field, local variable, or parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableDef {
    pub common: DefCommon,

    /// Declared type; arrays wrap their element type
    pub var_type: TypeRef,

    /// Whether the variable is static
    pub is_static: bool,

    /// Field, local, or parameter
    pub kind: VariableKind,
}

/// The zero-argument constructor synthesized for a class that declares none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultConstructorDef {
    pub common: DefCommon,

    /// The class the constructor was synthesized for
    pub owner: DefId,
}

/// A statement label
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDef {
    pub common: DefCommon,
}

/// The thing a name resolves to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Definition {
    Class(ClassDef),
    Method(MethodDef),
    Variable(VariableDef),
    DefaultConstructor(DefaultConstructorDef),
    Label(LabelDef),
}

impl Definition {
    /// The shared common fields of any variant
    pub fn common(&self) -> &DefCommon {
        match self {
            Definition::Class(d) => &d.common,
            Definition::Method(d) => &d.common,
            Definition::Variable(d) => &d.common,
            Definition::DefaultConstructor(d) => &d.common,
            Definition::Label(d) => &d.common,
        }
    }

    /// Simple name of the definition
    pub fn name(&self) -> &str {
        &self.common().name
    }

    /// Dotted qualified name of the definition
    pub fn qualified_name(&self) -> &str {
        &self.common().qualified_name
    }

    /// The scope the definition was declared in
    pub fn parent_scope(&self) -> Option<ScopeId> {
        self.common().scope
    }

    /// Where the declaration's identifier starts, if it has a source
    /// location
    pub fn occurrence(&self) -> Option<&Occurrence> {
        self.common().occurrence.as_ref()
    }

    /// The declared type of a variable, or the return type of a method.
    /// `None` for classes and labels, whose "type" is themselves or nothing.
    pub fn get_type(&self) -> Option<&TypeRef> {
        match self {
            Definition::Variable(d) => Some(&d.var_type),
            Definition::Method(d) => Some(&d.return_type),
            _ => None,
        }
    }

    /// Declared exception types of a method; empty for everything else
    pub fn get_exceptions(&self) -> &[TypeRef] {
        match self {
            Definition::Method(d) => &d.exceptions,
            _ => &[],
        }
    }

    /// The linked superclass, for class definitions
    pub fn superclass(&self) -> Option<DefId> {
        self.as_class().and_then(|c| c.superclass)
    }

    /// Classes known to extend this one, for class definitions
    pub fn subclasses(&self) -> &[DefId] {
        self.as_class().map(|c| c.subclasses.as_slice()).unwrap_or(&[])
    }

    /// Classes known to implement this interface, for class definitions
    pub fn implementors(&self) -> &[DefId] {
        self.as_class()
            .map(|c| c.implementors.as_slice())
            .unwrap_or(&[])
    }

    /// View as a class definition
    pub fn as_class(&self) -> Option<&ClassDef> {
        match self {
            Definition::Class(d) => Some(d),
            _ => None,
        }
    }

    /// View as a method definition
    pub fn as_method(&self) -> Option<&MethodDef> {
        match self {
            Definition::Method(d) => Some(d),
            _ => None,
        }
    }

    /// View as a variable definition
    pub fn as_variable(&self) -> Option<&VariableDef> {
        match self {
            Definition::Variable(d) => Some(d),
            _ => None,
        }
    }

    /// Whether this definition can answer a constructor call: a declared
    /// constructor or a synthesized default constructor
    pub fn is_constructor(&self) -> bool {
        match self {
            Definition::Method(d) => d.is_constructor,
            Definition::DefaultConstructor(_) => true,
            _ => false,
        }
    }
}

/// A recorded use of a name, resolvable to a definition.
///
/// Every identifier occurrence the resolver understands produces one
/// reference, including the identifier of the declaration itself; many
/// references may point at one definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    /// The identifier text as written
    pub name: String,

    /// Where the identifier token starts
    pub occurrence: Occurrence,

    /// The namespace the use occupies syntactically
    pub namespace: javalens_core::Namespace,

    /// The definition this use resolves to, when resolution succeeded
    pub resolved: Option<DefId>,
}
