// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Reference resolver
//!
//! The third pass, run per file once linking is complete. It walks
//! statements and expressions, resolves every identifier it understands to
//! a definition, and records a [`Reference`] for each - declaration
//! identifiers included, so a definition's reference list starts at its own
//! declaration.
//!
//! Method calls need the types of their argument expressions, so this pass
//! carries a small expression typer: literals, numeric promotion, casts,
//! array accesses, field chains, and constructor calls, enough to drive
//! overload selection the way the language does.

use crate::definition::{DefId, Definition, Reference, TypeRef};
use crate::error::SemanticResult;
use crate::scope::ScopeId;
use crate::table::SymbolTable;
use javalens_core::{Namespace, Occurrence};
use javalens_platform::PrimitiveType;
use javalens_syntax::{child_of_kind, named_children, SourceFile};
use std::path::PathBuf;
use tracing::debug;
use tree_sitter::Node;

/// Resolves one file's identifier uses into recorded references
pub struct ReferenceResolver<'t, 'f> {
    table: &'t mut SymbolTable,
    file: &'f SourceFile,
    path: PathBuf,
}

impl<'t, 'f> ReferenceResolver<'t, 'f> {
    /// Resolve every reference in `file`; the file must have been built
    /// and the table linked
    pub fn resolve(table: &'t mut SymbolTable, file: &'f SourceFile) -> SemanticResult<()> {
        let mut resolver = ReferenceResolver {
            table,
            file,
            path: file.path().to_path_buf(),
        };
        resolver.visit(file.root());
        Ok(())
    }

    // ------------------------------------------------------------------
    // statements and declarations
    // ------------------------------------------------------------------

    fn visit(&mut self, node: Node<'_>) {
        match node.kind() {
            "class_declaration" | "interface_declaration" => self.class_declaration(node),
            "field_declaration" | "constant_declaration" | "local_variable_declaration"
            | "resource" => self.variable_declaration(node),
            "method_declaration" | "constructor_declaration" => self.method_declaration(node),
            "enhanced_for_statement" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.type_node(ty);
                }
                if let Some(name) = node.child_by_field_name("name") {
                    self.declaration_ref(name, Namespace::Value);
                }
                if let Some(value) = node.child_by_field_name("value") {
                    self.type_of(value);
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit(body);
                }
            }
            "for_statement" => {
                let mut cursor = node.walk();
                let inits: Vec<Node<'_>> =
                    node.children_by_field_name("init", &mut cursor).collect();
                for init in inits {
                    if init.kind() == "local_variable_declaration" {
                        self.variable_declaration(init);
                    } else {
                        self.type_of(init);
                    }
                }
                for field in ["condition", "update"] {
                    let mut cursor = node.walk();
                    let clauses: Vec<Node<'_>> =
                        node.children_by_field_name(field, &mut cursor).collect();
                    for clause in clauses {
                        self.type_of(clause);
                    }
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit(body);
                }
            }
            "if_statement" | "while_statement" | "do_statement" | "switch_expression" => {
                if let Some(condition) = node.child_by_field_name("condition") {
                    self.type_of(condition);
                }
                for field in ["consequence", "alternative", "body"] {
                    if let Some(child) = node.child_by_field_name(field) {
                        self.visit(child);
                    }
                }
            }
            "labeled_statement" => {
                let children = named_children(node);
                if let Some(label) = children.first().filter(|c| c.kind() == "identifier") {
                    self.declaration_ref(*label, Namespace::Label);
                }
                for child in &children[1..] {
                    self.visit(*child);
                }
            }
            "break_statement" | "continue_statement" => {
                if let Some(label) = child_of_kind(node, "identifier") {
                    let scope = self.scope_at(label);
                    let name = self.text(label);
                    let found = self.table.lookup(Namespace::Label, scope, &name, None);
                    self.record(label, Namespace::Label, found);
                }
            }
            "catch_clause" => {
                if let Some(param) = child_of_kind(node, "catch_formal_parameter") {
                    if let Some(types) = child_of_kind(param, "catch_type") {
                        for ty in named_children(types) {
                            self.type_node(ty);
                        }
                    }
                    if let Some(name) = param.child_by_field_name("name") {
                        self.declaration_ref(name, Namespace::Value);
                    }
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.visit(body);
                }
            }
            "expression_statement" | "return_statement" | "throw_statement"
            | "assert_statement" | "yield_statement" | "switch_label" => {
                for child in named_children(node) {
                    self.type_of(child);
                }
            }
            "synchronized_statement" => {
                for child in named_children(node) {
                    if child.kind() == "block" {
                        self.visit(child);
                    } else {
                        self.type_of(child);
                    }
                }
            }
            "explicit_constructor_invocation" => {
                self.explicit_constructor(node);
            }
            "line_comment" | "block_comment" | "package_declaration" | "import_declaration" => {}
            kind if is_expression(kind) => {
                self.type_of(node);
            }
            _ => {
                for child in named_children(node) {
                    self.visit(child);
                }
            }
        }
    }

    fn class_declaration(&mut self, node: Node<'_>) {
        if let Some(name) = node.child_by_field_name("name") {
            self.declaration_ref(name, Namespace::Type);
        }
        if let Some(superclass) = child_of_kind(node, "superclass") {
            for ty in named_children(superclass) {
                self.type_node(ty);
            }
        }
        for clause in ["super_interfaces", "extends_interfaces"] {
            if let Some(interfaces) = child_of_kind(node, clause) {
                if let Some(list) = child_of_kind(interfaces, "type_list") {
                    for ty in named_children(list) {
                        self.type_node(ty);
                    }
                }
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            for member in named_children(body) {
                self.visit(member);
            }
        }
    }

    fn variable_declaration(&mut self, node: Node<'_>) {
        if let Some(ty) = node.child_by_field_name("type") {
            self.type_node(ty);
        }
        let mut cursor = node.walk();
        let declarators: Vec<Node<'_>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        if declarators.is_empty() {
            // try-with-resources resource: name/value sit on the node itself
            if let Some(name) = node.child_by_field_name("name") {
                self.declaration_ref(name, Namespace::Value);
            }
            if let Some(value) = node.child_by_field_name("value") {
                self.type_of(value);
            }
            return;
        }
        for declarator in declarators {
            if let Some(name) = declarator.child_by_field_name("name") {
                self.declaration_ref(name, Namespace::Value);
            }
            if let Some(value) = declarator.child_by_field_name("value") {
                self.type_of(value);
            }
        }
    }

    fn method_declaration(&mut self, node: Node<'_>) {
        if let Some(name) = node.child_by_field_name("name") {
            self.declaration_ref(name, Namespace::Value);
        }
        if let Some(ty) = node.child_by_field_name("type") {
            self.type_node(ty);
        }
        if let Some(params) = node.child_by_field_name("parameters") {
            for param in named_children(params) {
                if !matches!(param.kind(), "formal_parameter" | "spread_parameter") {
                    continue;
                }
                if let Some(ty) = param.child_by_field_name("type") {
                    self.type_node(ty);
                }
                if let Some(name) = param.child_by_field_name("name") {
                    self.declaration_ref(name, Namespace::Value);
                }
            }
        }
        if let Some(throws) = child_of_kind(node, "throws") {
            for ty in named_children(throws) {
                self.type_node(ty);
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
    }

    // ------------------------------------------------------------------
    // expression typing
    // ------------------------------------------------------------------

    /// Resolve an expression, recording references inside it, and return
    /// the type it evaluates to
    fn type_of(&mut self, node: Node<'_>) -> TypeRef {
        match node.kind() {
            "identifier" => self.ident(node),
            "type_identifier" => {
                let scope = self.scope_at(node);
                let name = self.text(node);
                let occurrence = self.occurrence(node);
                match self.table.resolve_type_name(scope, &name, Some(&occurrence)) {
                    Some(class) => {
                        self.record(node, Namespace::Type, Some(class));
                        TypeRef::Named(class)
                    }
                    None => TypeRef::Unresolved(name),
                }
            }
            "field_access" => self.field_access(node),
            "method_invocation" => self.method_invocation(node),
            "object_creation_expression" => self.object_creation(node),
            "array_creation_expression" => self.array_creation(node),
            "array_access" => {
                let array_type = node
                    .child_by_field_name("array")
                    .map(|a| self.type_of(a))
                    .unwrap_or(TypeRef::Null);
                if let Some(index) = node.child_by_field_name("index") {
                    self.type_of(index);
                }
                array_type
                    .element()
                    .cloned()
                    .unwrap_or(TypeRef::Unresolved(self.text(node)))
            }
            "cast_expression" => {
                let target = node
                    .child_by_field_name("type")
                    .map(|t| self.type_node(t))
                    .unwrap_or(TypeRef::Null);
                if let Some(value) = node.child_by_field_name("value") {
                    self.type_of(value);
                }
                target
            }
            "instanceof_expression" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.type_of(left);
                }
                if let Some(right) = node.child_by_field_name("right") {
                    self.type_node(right);
                }
                TypeRef::Primitive(PrimitiveType::Boolean)
            }
            "binary_expression" => self.binary_expression(node),
            "unary_expression" => {
                let operand = node
                    .child_by_field_name("operand")
                    .map(|o| self.type_of(o))
                    .unwrap_or(TypeRef::Null);
                let operator = node
                    .child_by_field_name("operator")
                    .map(|o| self.text(o))
                    .unwrap_or_default();
                match operator.as_str() {
                    "!" => TypeRef::Primitive(PrimitiveType::Boolean),
                    _ => promote_unary(operand),
                }
            }
            "update_expression" => named_children(node)
                .into_iter()
                .next()
                .map(|c| self.type_of(c))
                .unwrap_or(TypeRef::Null),
            "assignment_expression" => {
                let left = node
                    .child_by_field_name("left")
                    .map(|l| self.type_of(l))
                    .unwrap_or(TypeRef::Null);
                if let Some(right) = node.child_by_field_name("right") {
                    self.type_of(right);
                }
                left
            }
            "parenthesized_expression" | "condition" => named_children(node)
                .into_iter()
                .next()
                .map(|c| self.type_of(c))
                .unwrap_or(TypeRef::Null),
            "ternary_expression" => {
                if let Some(condition) = node.child_by_field_name("condition") {
                    self.type_of(condition);
                }
                let left = node
                    .child_by_field_name("consequence")
                    .map(|c| self.type_of(c))
                    .unwrap_or(TypeRef::Null);
                let right = node
                    .child_by_field_name("alternative")
                    .map(|a| self.type_of(a))
                    .unwrap_or(TypeRef::Null);
                // the conditional takes the more general branch type
                if self.table.argument_compatible(&left, &right) {
                    right
                } else {
                    left
                }
            }
            "this" => self
                .enclosing_class_at(node)
                .map(TypeRef::Named)
                .unwrap_or(TypeRef::Unresolved("this".to_string())),
            "super" => self
                .enclosing_class_at(node)
                .and_then(|c| self.table.superclass_of(c))
                .map(TypeRef::Named)
                .unwrap_or(TypeRef::Unresolved("super".to_string())),
            "class_literal" => {
                for child in named_children(node) {
                    if child.kind() != "identifier" {
                        self.type_node(child);
                    }
                }
                self.named_platform_type("java.lang.Class")
            }
            "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
            | "binary_integer_literal" => {
                let text = self.text(node);
                if text.ends_with('l') || text.ends_with('L') {
                    TypeRef::Primitive(PrimitiveType::Long)
                } else {
                    TypeRef::Primitive(PrimitiveType::Int)
                }
            }
            "decimal_floating_point_literal" | "hex_floating_point_literal" => {
                let text = self.text(node);
                if text.ends_with('f') || text.ends_with('F') {
                    TypeRef::Primitive(PrimitiveType::Float)
                } else {
                    TypeRef::Primitive(PrimitiveType::Double)
                }
            }
            "character_literal" => TypeRef::Primitive(PrimitiveType::Char),
            "string_literal" => self.named_platform_type("java.lang.String"),
            "true" | "false" => TypeRef::Primitive(PrimitiveType::Boolean),
            "null_literal" => TypeRef::Null,
            "lambda_expression" => {
                if let Some(body) = node.child_by_field_name("body") {
                    if body.kind() == "block" {
                        self.visit(body);
                    } else {
                        self.type_of(body);
                    }
                }
                TypeRef::Unresolved("<lambda>".to_string())
            }
            "argument_list" | "array_initializer" => {
                for child in named_children(node) {
                    self.type_of(child);
                }
                TypeRef::Null
            }
            _ => {
                for child in named_children(node) {
                    self.visit(child);
                }
                TypeRef::Unresolved(self.text(node))
            }
        }
    }

    /// An identifier in value position: a variable first, then a type
    fn ident(&mut self, node: Node<'_>) -> TypeRef {
        let name = self.text(node);
        let occurrence = self.occurrence(node);

        let scope = self.scope_at(node);
        if let Some(var) = self
            .table
            .lookup(Namespace::Value, scope, &name, Some(&occurrence))
        {
            self.record(node, Namespace::Value, Some(var));
            return self.definition_type(var);
        }
        if let Some(class) = self.table.resolve_type_name(scope, &name, Some(&occurrence)) {
            self.record(node, Namespace::Type, Some(class));
            return TypeRef::Named(class);
        }
        debug!(name = %name, at = %occurrence, "unresolved identifier");
        self.record(node, Namespace::Value, None);
        TypeRef::Unresolved(name)
    }

    fn field_access(&mut self, node: Node<'_>) -> TypeRef {
        let Some(object) = node.child_by_field_name("object") else {
            return TypeRef::Unresolved(self.text(node));
        };
        let object_type = self.type_of(object);

        let Some(field) = node.child_by_field_name("field") else {
            return object_type;
        };
        if field.kind() != "identifier" {
            // Outer.this and friends evaluate to the object's type
            return object_type;
        }
        let name = self.text(field);

        match &object_type {
            TypeRef::Array(_) if name == "length" => {
                // every array shares the synthetic int-typed length member
                let length = self.table.array_length();
                self.record(field, Namespace::Value, Some(length));
                TypeRef::Primitive(PrimitiveType::Int)
            }
            TypeRef::Named(class) => {
                let class = *class;
                if let Some(member) = self.table.value_member(class, &name) {
                    self.record(field, Namespace::Value, Some(member));
                    return self.definition_type(member);
                }
                if let Some(nested) = self.table.type_member(class, &name) {
                    self.record(field, Namespace::Type, Some(nested));
                    return TypeRef::Named(nested);
                }
                TypeRef::Unresolved(self.text(node))
            }
            _ => {
                // a dangling prefix like `java.lang`: try the accumulated
                // dotted text as a qualified type name
                let dotted = self.text(node);
                match self.table.class_by_qualified_name(&dotted) {
                    Some(class) => {
                        self.record(field, Namespace::Type, Some(class));
                        TypeRef::Named(class)
                    }
                    None => TypeRef::Unresolved(dotted),
                }
            }
        }
    }

    fn method_invocation(&mut self, node: Node<'_>) -> TypeRef {
        let context = match node.child_by_field_name("object") {
            Some(object) => match self.type_of(object) {
                TypeRef::Named(class) => Some(class),
                // array values only answer the root class's methods
                TypeRef::Array(_) => self.table.object_class(),
                _ => None,
            },
            None => None,
        };

        let args = self.argument_types(node.child_by_field_name("arguments"));

        let Some(name_node) = node.child_by_field_name("name") else {
            return TypeRef::Unresolved(self.text(node));
        };
        let name = self.text(name_node);

        let candidates = match context {
            Some(class) => self.table.method_candidates(class, &name),
            None => {
                // unqualified: the innermost enclosing class that has any
                // method of this name wins
                let scope = self.scope_at(name_node);
                self.unqualified_candidates(scope, &name)
            }
        };

        let selected = self.table.select_overload(&candidates, &args);
        self.record(name_node, Namespace::Value, selected);
        match selected {
            Some(method) => self.definition_type(method),
            None => {
                debug!(name = %name, "unresolved method call");
                TypeRef::Unresolved(name)
            }
        }
    }

    fn explicit_constructor(&mut self, node: Node<'_>) {
        let args = self.argument_types(node.child_by_field_name("arguments"));
        let Some(class) = self.enclosing_class_at(node) else {
            return;
        };
        let target = match node.child_by_field_name("constructor") {
            Some(c) if c.kind() == "super" => self.table.superclass_of(class),
            _ => Some(class),
        };
        if let Some(target) = target {
            let candidates = self.table.constructor_candidates(target);
            // `this(...)`/`super(...)` carry no identifier to anchor a
            // reference on; selection still types the arguments
            self.table.select_overload(&candidates, &args);
        }
    }

    fn object_creation(&mut self, node: Node<'_>) -> TypeRef {
        let type_node = node.child_by_field_name("type");
        let scope = self.scope_at(node);
        let class = type_node.and_then(|t| self.resolve_type_quietly(t, scope));

        let args = self.argument_types(node.child_by_field_name("arguments"));

        let anonymous_body = child_of_kind(node, "class_body");
        if let Some(class) = class {
            let candidates = self.table.constructor_candidates(class);
            let selected = self.table.select_overload(&candidates, &args);
            if let Some(ident) = type_node.and_then(type_name_identifier) {
                match (selected, anonymous_body) {
                    // `new Foo()` points at the constructor it invokes,
                    // synthesized default constructors included
                    (Some(ctor), None) => self.record(ident, Namespace::Value, Some(ctor)),
                    _ => self.record(ident, Namespace::Type, Some(class)),
                }
            }
        } else if let Some(ident) = type_node.and_then(type_name_identifier) {
            self.record(ident, Namespace::Type, None);
        }

        if let Some(body) = anonymous_body {
            for member in named_children(body) {
                self.visit(member);
            }
        }

        class
            .map(TypeRef::Named)
            .unwrap_or_else(|| TypeRef::Unresolved(self.text(node)))
    }

    fn array_creation(&mut self, node: Node<'_>) -> TypeRef {
        let element = node
            .child_by_field_name("type")
            .map(|t| self.type_node(t))
            .unwrap_or(TypeRef::Null);

        let mut dims = 0usize;
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
        for child in children {
            match child.kind() {
                "dimensions_expr" => {
                    dims += 1;
                    for expr in named_children(child) {
                        self.type_of(expr);
                    }
                }
                "dimensions" => {
                    dims += self.text(child).matches('[').count();
                }
                "array_initializer" => {
                    self.type_of(child);
                    if dims == 0 {
                        dims = 1;
                    }
                }
                _ => {}
            }
        }

        (0..dims.max(1)).fold(element, |t, _| t.array())
    }

    fn binary_expression(&mut self, node: Node<'_>) -> TypeRef {
        let left = node
            .child_by_field_name("left")
            .map(|l| self.type_of(l))
            .unwrap_or(TypeRef::Null);
        let right = node
            .child_by_field_name("right")
            .map(|r| self.type_of(r))
            .unwrap_or(TypeRef::Null);
        let operator = node
            .child_by_field_name("operator")
            .map(|o| self.text(o))
            .unwrap_or_default();

        let boolean = TypeRef::Primitive(PrimitiveType::Boolean);
        match operator.as_str() {
            "==" | "!=" | "<" | ">" | "<=" | ">=" | "&&" | "||" => boolean,
            "<<" | ">>" | ">>>" => promote_unary(left),
            "+" => {
                let string = self.named_platform_type("java.lang.String");
                if left == string || right == string {
                    string
                } else {
                    promote_binary(left, right)
                }
            }
            "&" | "|" | "^" => {
                if left == boolean && right == boolean {
                    boolean
                } else {
                    promote_binary(left, right)
                }
            }
            _ => promote_binary(left, right),
        }
    }

    // ------------------------------------------------------------------
    // type nodes
    // ------------------------------------------------------------------

    /// Resolve a declared-type node, recording a type reference on its
    /// identifier
    fn type_node(&mut self, node: Node<'_>) -> TypeRef {
        match node.kind() {
            "integral_type" | "floating_point_type" | "boolean_type" => {
                PrimitiveType::from_name(&self.text(node))
                    .map(TypeRef::Primitive)
                    .unwrap_or_else(|| TypeRef::Unresolved(self.text(node)))
            }
            "void_type" => TypeRef::Void,
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .map(|e| self.type_node(e))
                    .unwrap_or(TypeRef::Null);
                let dims = node
                    .child_by_field_name("dimensions")
                    .map(|d| self.text(d).matches('[').count())
                    .unwrap_or(1);
                (0..dims.max(1)).fold(element, |t, _| t.array())
            }
            "generic_type" => named_children(node)
                .into_iter()
                .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
                .map(|c| self.type_node(c))
                .unwrap_or_else(|| TypeRef::Unresolved(self.text(node))),
            "type_identifier" | "identifier" => {
                let scope = self.scope_at(node);
                let name = self.text(node);
                let occurrence = self.occurrence(node);
                match self.table.resolve_type_name(scope, &name, Some(&occurrence)) {
                    Some(class) => {
                        self.record(node, Namespace::Type, Some(class));
                        TypeRef::Named(class)
                    }
                    None => {
                        self.record(node, Namespace::Type, None);
                        TypeRef::Unresolved(name)
                    }
                }
            }
            "scoped_type_identifier" | "scoped_identifier" => {
                let qualified = self.text(node);
                let class = self.table.class_by_qualified_name(&qualified);
                if let Some(last) = named_children(node)
                    .into_iter()
                    .filter(|c| matches!(c.kind(), "type_identifier" | "identifier"))
                    .last()
                {
                    self.record(last, Namespace::Type, class);
                }
                match class {
                    Some(class) => TypeRef::Named(class),
                    None => TypeRef::Unresolved(qualified),
                }
            }
            _ => TypeRef::Unresolved(self.text(node)),
        }
    }

    /// Resolve a constructor's type name without recording a reference;
    /// the caller decides whether the identifier points at the class or at
    /// the selected constructor
    fn resolve_type_quietly(&self, node: Node<'_>, scope: ScopeId) -> Option<DefId> {
        match node.kind() {
            "generic_type" => named_children(node)
                .into_iter()
                .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
                .and_then(|c| self.resolve_type_quietly(c, scope)),
            "scoped_type_identifier" | "scoped_identifier" => {
                self.table.class_by_qualified_name(&self.text(node))
            }
            _ => self
                .table
                .resolve_type_name(scope, &self.text(node), Some(&self.occurrence(node))),
        }
    }

    // ------------------------------------------------------------------
    // helpers
    // ------------------------------------------------------------------

    fn argument_types(&mut self, arguments: Option<Node<'_>>) -> Vec<TypeRef> {
        let Some(arguments) = arguments else {
            return Vec::new();
        };
        named_children(arguments)
            .into_iter()
            .map(|arg| self.type_of(arg))
            .collect()
    }

    /// Method candidates for an unqualified call: the innermost enclosing
    /// class (walking outward through nested classes) that declares or
    /// inherits any method of the name
    fn unqualified_candidates(&self, scope: ScopeId, name: &str) -> Vec<DefId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.table.scope(id);
            if s.kind.is_class_like() {
                if let Some(class) = s.owner {
                    let candidates = self.table.method_candidates(class, name);
                    if !candidates.is_empty() {
                        return candidates;
                    }
                }
            }
            current = s.parent;
        }
        Vec::new()
    }

    /// The type a resolved definition contributes to expression typing
    fn definition_type(&self, def: DefId) -> TypeRef {
        match self.table.def(def) {
            Definition::Variable(v) => v.var_type.clone(),
            Definition::Method(m) => m.return_type.clone(),
            Definition::Class(_) => TypeRef::Named(def),
            _ => TypeRef::Null,
        }
    }

    fn named_platform_type(&self, qualified: &str) -> TypeRef {
        match self.table.class_by_qualified_name(qualified) {
            Some(class) => TypeRef::Named(class),
            None => TypeRef::Unresolved(qualified.to_string()),
        }
    }

    fn enclosing_class_at(&self, node: Node<'_>) -> Option<DefId> {
        let scope = self.scope_at(node);
        self.table.enclosing_class(scope)
    }

    /// Record the declaration identifier itself as a reference to its
    /// definition
    fn declaration_ref(&mut self, name_node: Node<'_>, namespace: Namespace) {
        let occurrence = self.occurrence(name_node);
        let def = self.table.declaration_at(&occurrence);
        if def.is_none() {
            debug!(at = %occurrence, "declaration identifier without a definition");
        }
        self.record(name_node, namespace, def);
    }

    fn record(&mut self, node: Node<'_>, namespace: Namespace, resolved: Option<DefId>) {
        let reference = Reference {
            name: self.text(node),
            occurrence: self.occurrence(node),
            namespace,
            resolved,
        };
        self.table.record_reference(reference);
    }

    fn scope_at(&self, node: Node<'_>) -> ScopeId {
        let entry = self
            .table
            .file(&self.path)
            .expect("resolver runs only on built files");
        let span = javalens_syntax::span_of(node);
        entry
            .index
            .lookup(span.start)
            .unwrap_or(entry.unit_scope)
    }

    fn text(&self, node: Node<'_>) -> String {
        self.file.node_text(node).to_string()
    }

    fn occurrence(&self, node: Node<'_>) -> Occurrence {
        self.file.occurrence_of(node)
    }
}

/// The identifier inside a constructor's type node, for anchoring the
/// constructor reference
fn type_name_identifier<'n>(type_node: Node<'n>) -> Option<Node<'n>> {
    match type_node.kind() {
        "type_identifier" | "identifier" => Some(type_node),
        "generic_type" | "scoped_type_identifier" | "scoped_identifier" => {
            named_children(type_node)
                .into_iter()
                .filter(|c| matches!(c.kind(), "type_identifier" | "identifier"))
                .last()
                .or_else(|| {
                    named_children(type_node)
                        .into_iter()
                        .find_map(type_name_identifier)
                })
        }
        _ => None,
    }
}

/// Unary numeric promotion lifted to type references
fn promote_unary(operand: TypeRef) -> TypeRef {
    match operand {
        TypeRef::Primitive(p) if p.is_numeric() => TypeRef::Primitive(p.unary_promote()),
        other => other,
    }
}

/// Binary numeric promotion lifted to type references
fn promote_binary(left: TypeRef, right: TypeRef) -> TypeRef {
    match (&left, &right) {
        (TypeRef::Primitive(a), TypeRef::Primitive(b)) => {
            match PrimitiveType::binary_promote(*a, *b) {
                Some(p) => TypeRef::Primitive(p),
                None => left,
            }
        }
        _ => left,
    }
}

/// Expression node kinds the typer understands directly
fn is_expression(kind: &str) -> bool {
    matches!(
        kind,
        "identifier"
            | "field_access"
            | "method_invocation"
            | "object_creation_expression"
            | "array_creation_expression"
            | "array_access"
            | "cast_expression"
            | "instanceof_expression"
            | "binary_expression"
            | "unary_expression"
            | "update_expression"
            | "assignment_expression"
            | "parenthesized_expression"
            | "ternary_expression"
            | "lambda_expression"
            | "this"
            | "super"
            | "class_literal"
    )
}
