// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Scopes
//!
//! A [`Scope`] is a named region of visibility with three independent
//! namespace tables (types, values, labels) plus a side table for methods,
//! which - unlike every other kind of name - may legally be declared more
//! than once per scope (overloads).
//!
//! Scopes live in an arena owned by the symbol table and refer to each
//! other by [`ScopeId`]; the scopes of one file form a tree, and the set of
//! all scopes forms a forest rooted in the synthetic global scope. All
//! cross-file links (inheritance, type references) live on definitions,
//! never on scopes.

use crate::definition::DefId;
use crate::error::{SemanticError, SemanticResult};
use javalens_core::{Namespace, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Stable handle of a scope in the symbol table's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScopeId(pub usize);

impl ScopeId {
    /// Arena index of this scope
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// What kind of region a scope covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScopeKind {
    /// The synthetic root above all package scopes
    Root,
    /// A package; shared by every compilation unit declaring it
    Package,
    /// One source file
    CompilationUnit,
    /// A class body
    Class,
    /// An interface body
    Interface,
    /// The body of an anonymous class expression
    AnonymousClass,
    /// Method parameters and body
    Method,
    /// Constructor parameters and body
    Constructor,
    /// A static or instance initializer block
    Initializer,
    /// A brace-delimited block or a degenerate single-statement branch
    Block,
    /// A `for` statement: its own init variables, parent of the body scope
    For,
    /// A catch clause body, holding the catch parameter
    Catch,
    /// A whole switch block; case groups do not open scopes of their own
    Switch,
}

impl ScopeKind {
    /// Whether names declared here become visible only from their
    /// declaration point onward (locals and local classes), as opposed to
    /// member scopes where declaration order does not matter.
    pub fn is_ordered(&self) -> bool {
        matches!(
            self,
            ScopeKind::Block
                | ScopeKind::For
                | ScopeKind::Switch
                | ScopeKind::Method
                | ScopeKind::Constructor
                | ScopeKind::Initializer
                | ScopeKind::Catch
        )
    }

    /// Whether this scope is a class-like body, where lookups continue into
    /// the inheritance chain before moving lexically outward.
    pub fn is_class_like(&self) -> bool {
        matches!(
            self,
            ScopeKind::Class | ScopeKind::Interface | ScopeKind::AnonymousClass
        )
    }
}

/// A lexical region with its own namespace tables and a parent link
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scope {
    /// Handle of this scope in the arena
    pub id: ScopeId,

    /// Enclosing scope; `None` only for the root
    pub parent: Option<ScopeId>,

    /// Kind of region this scope covers
    pub kind: ScopeKind,

    /// Scope name; synthetic for anonymous classes (`~Anonymous~1`) and
    /// unnamed regions (`~Block~`)
    pub name: String,

    /// File the scope belongs to; `None` for the root and package scopes
    pub file: Option<PathBuf>,

    /// Source span the scope covers (meaningless for root/package scopes)
    pub span: Span,

    /// Nested scopes, in source order
    pub children: Vec<ScopeId>,

    /// The definition (class or method) that owns this scope, if any
    pub owner: Option<DefId>,

    /// Type names declared directly in this scope
    types: HashMap<String, DefId>,

    /// Value names (fields, locals, parameters) declared directly here
    values: HashMap<String, DefId>,

    /// Statement labels declared directly here
    labels: HashMap<String, DefId>,

    /// Methods and constructors, grouped by name; one name may carry
    /// several overloads
    methods: HashMap<String, Vec<DefId>>,
}

impl Scope {
    /// Create a new scope
    pub fn new(id: ScopeId, kind: ScopeKind, name: impl Into<String>) -> Self {
        Self {
            id,
            parent: None,
            kind,
            name: name.into(),
            file: None,
            span: Span::default(),
            children: Vec::new(),
            owner: None,
            types: HashMap::new(),
            values: HashMap::new(),
            labels: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    /// Set the parent scope
    pub fn with_parent(mut self, parent: ScopeId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Set the file and span the scope covers
    pub fn with_extent(mut self, file: PathBuf, span: Span) -> Self {
        self.file = Some(file);
        self.span = span;
        self
    }

    /// Declare a name in one of the three namespaces.
    ///
    /// A name is unique within its own scope and namespace only; declaring
    /// `Foo` as a type does not conflict with `Foo` the value or `Foo` the
    /// label in the same scope.
    pub fn define(&mut self, namespace: Namespace, name: &str, def: DefId) -> SemanticResult<()> {
        let table = match namespace {
            Namespace::Type => &mut self.types,
            Namespace::Value => &mut self.values,
            Namespace::Label => &mut self.labels,
        };

        if table.contains_key(name) {
            return Err(SemanticError::DuplicateDefinition {
                name: name.to_string(),
                namespace,
                scope: self.name.clone(),
            });
        }
        table.insert(name.to_string(), def);
        Ok(())
    }

    /// Declare a method or constructor; overloads accumulate under one name
    pub fn define_method(&mut self, name: &str, def: DefId) {
        self.methods.entry(name.to_string()).or_default().push(def);
    }

    /// Look up a name declared directly in this scope
    pub fn get(&self, namespace: Namespace, name: &str) -> Option<DefId> {
        let table = match namespace {
            Namespace::Type => &self.types,
            Namespace::Value => &self.values,
            Namespace::Label => &self.labels,
        };
        table.get(name).copied()
    }

    /// All overloads of a method name declared directly in this scope
    pub fn get_methods(&self, name: &str) -> &[DefId] {
        self.methods.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every method declared directly in this scope
    pub fn all_methods(&self) -> impl Iterator<Item = DefId> + '_ {
        self.methods.values().flatten().copied()
    }

    /// Every value name declared directly in this scope
    pub fn all_values(&self) -> impl Iterator<Item = DefId> + '_ {
        self.values.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_across_namespaces_does_not_conflict() {
        let mut scope = Scope::new(ScopeId(0), ScopeKind::Block, "~Block~");

        scope.define(Namespace::Type, "Foo", DefId(1)).unwrap();
        scope.define(Namespace::Value, "Foo", DefId(2)).unwrap();
        scope.define(Namespace::Label, "Foo", DefId(3)).unwrap();

        assert_eq!(scope.get(Namespace::Type, "Foo"), Some(DefId(1)));
        assert_eq!(scope.get(Namespace::Value, "Foo"), Some(DefId(2)));
        assert_eq!(scope.get(Namespace::Label, "Foo"), Some(DefId(3)));
    }

    #[test]
    fn test_duplicate_in_same_namespace_is_an_error() {
        let mut scope = Scope::new(ScopeId(0), ScopeKind::Block, "~Block~");

        scope.define(Namespace::Value, "x", DefId(1)).unwrap();
        let result = scope.define(Namespace::Value, "x", DefId(2));

        assert!(matches!(
            result,
            Err(SemanticError::DuplicateDefinition { .. })
        ));
        // first definition wins, table unchanged
        assert_eq!(scope.get(Namespace::Value, "x"), Some(DefId(1)));
    }

    #[test]
    fn test_method_overloads_accumulate() {
        let mut scope = Scope::new(ScopeId(0), ScopeKind::Class, "Calc");

        scope.define_method("add", DefId(4));
        scope.define_method("add", DefId(5));
        scope.define_method("negate", DefId(6));

        assert_eq!(scope.get_methods("add"), &[DefId(4), DefId(5)]);
        assert_eq!(scope.get_methods("negate"), &[DefId(6)]);
        assert!(scope.get_methods("missing").is_empty());
    }

    #[test]
    fn test_ordered_scope_kinds() {
        assert!(ScopeKind::Block.is_ordered());
        assert!(ScopeKind::For.is_ordered());
        assert!(!ScopeKind::Class.is_ordered());
        assert!(!ScopeKind::Package.is_ordered());
    }
}
