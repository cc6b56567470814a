// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Table builder
//!
//! Walks one file's syntax tree and creates its scopes and definitions,
//! splicing them into the shared symbol table. Files can be built in any
//! order: anything that crosses file boundaries (superclasses, interfaces,
//! declared types) is recorded as an unresolved name here and linked by the
//! second pass.
//!
//! Scope rules implemented here, construct by construct:
//!
//! - Files without a package declaration share one synthetic package scope
//!   per directory; files in different directories never share one.
//! - Star imports expose a package's top-level types but not its
//!   sub-packages.
//! - A `for` loop's init variables live in a scope that is the parent of
//!   the body scope; they stay visible to all loop clauses but not after
//!   the loop.
//! - A `switch` opens one scope for the whole block; case labels do not,
//!   so a variable declared under one case is visible to later cases.
//! - A catch parameter is scoped to its catch block.
//! - `if`/`while`/`do` branches get a scope even when they are a single
//!   bodiless statement.
//! - Anonymous classes become `~Anonymous~N` definitions whose enclosing
//!   scope is the block containing the `new` expression.
//! - A class with no declared constructor gets a synthesized default
//!   constructor.

use crate::definition::{
    ClassDef, ClassOrigin, DefCommon, DefaultConstructorDef, DefId, Definition, LabelDef,
    MethodDef, TypeRef, VariableDef, VariableKind,
};
use crate::error::{SemanticError, SemanticResult};
use crate::index::ScopeIndex;
use crate::scope::{ScopeId, ScopeKind};
use crate::signature::MethodSignature;
use crate::table::{FileEntry, Imports, SymbolTable, TokenIndex};
use javalens_core::{Namespace, Occurrence, Span};
use javalens_platform::PrimitiveType;
use javalens_syntax::{child_of_kind, is_identifier_kind, span_of, SourceFile};
use std::path::PathBuf;
use tracing::debug;
use tree_sitter::Node;

/// Builds one file's scopes and definitions into the symbol table
pub struct TableBuilder<'t, 'f> {
    table: &'t mut SymbolTable,
    file: &'f SourceFile,
    path: PathBuf,
    scope_spans: Vec<(Span, ScopeId)>,
    anonymous_count: usize,
}

impl<'t, 'f> TableBuilder<'t, 'f> {
    /// Build `file` into `table`. Called once per file; file order does
    /// not matter.
    pub fn build(table: &'t mut SymbolTable, file: &'f SourceFile) -> SemanticResult<()> {
        let mut builder = TableBuilder {
            table,
            file,
            path: file.path().to_path_buf(),
            scope_spans: Vec::new(),
            anonymous_count: 0,
        };
        builder.run()
    }

    fn run(&mut self) -> SemanticResult<()> {
        let root = self.file.root();
        if root.has_error() {
            return Err(self.malformed(root, "a well-formed compilation unit"));
        }

        let (package_key, package_name) = self.package_identity(root);
        let package_scope = self.table.package_scope(&package_key, &package_name);

        let unit_scope = self.new_scope(
            ScopeKind::CompilationUnit,
            self.path.display().to_string(),
            package_scope,
            span_of(root),
        );

        let imports = self.collect_imports(root);

        for child in javalens_syntax::named_children(root) {
            match child.kind() {
                "class_declaration" | "interface_declaration" => {
                    self.class_declaration(child, package_scope, unit_scope, &package_name)?;
                }
                "package_declaration" | "import_declaration" | "line_comment"
                | "block_comment" => {}
                other => debug!(kind = other, "skipping unsupported top-level construct"),
            }
        }

        let tokens = self.collect_tokens(root);
        let index = ScopeIndex::new(std::mem::take(&mut self.scope_spans));
        self.table.add_file(
            self.path.clone(),
            FileEntry {
                unit_scope,
                package_scope,
                imports,
                index,
                tokens,
            },
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // compilation unit level
    // ------------------------------------------------------------------

    /// The package scope key and display name for this file.
    ///
    /// Files without a package declaration share a synthetic package per
    /// directory, so the key embeds the directory instead of a name.
    fn package_identity(&self, root: Node<'_>) -> (String, String) {
        match child_of_kind(root, "package_declaration") {
            Some(decl) => {
                let name = javalens_syntax::named_children(decl)
                    .into_iter()
                    .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
                    .map(|c| self.text(c))
                    .unwrap_or_default();
                (format!("pkg:{name}"), name)
            }
            None => {
                let dir = self
                    .path
                    .parent()
                    .map(|d| d.display().to_string())
                    .unwrap_or_default();
                (format!("dir:{dir}"), String::new())
            }
        }
    }

    fn collect_imports(&self, root: Node<'_>) -> Imports {
        let mut imports = Imports::default();
        let mut cursor = root.walk();
        for decl in root.children(&mut cursor) {
            if decl.kind() != "import_declaration" {
                continue;
            }
            if child_of_kind(decl, "static").is_some() {
                debug!("skipping static import");
                continue;
            }
            let Some(name_node) = javalens_syntax::named_children(decl)
                .into_iter()
                .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"))
            else {
                continue;
            };
            let name = self.text(name_node);
            if child_of_kind(decl, "asterisk").is_some() {
                // on-demand: the named package's top-level types only
                imports.on_demand.push(name);
            } else {
                let simple = name.rsplit('.').next().unwrap_or(&name).to_string();
                imports.single.insert(simple, name);
            }
        }
        imports
    }

    // ------------------------------------------------------------------
    // classes and members
    // ------------------------------------------------------------------

    /// Build a class or interface declaration.
    ///
    /// `def_scope` is where the name becomes visible (package scope for
    /// top-level types, class body for nested types, the block for local
    /// classes); `lexical_parent` is the parent of the new body scope.
    fn class_declaration(
        &mut self,
        node: Node<'_>,
        def_scope: ScopeId,
        lexical_parent: ScopeId,
        qualified_prefix: &str,
    ) -> SemanticResult<DefId> {
        let is_interface = node.kind() == "interface_declaration";
        let name_node = self.field(node, "name")?;
        let name = self.text(name_node);
        let qualified = join_qualified(qualified_prefix, &name);

        let body_node = self.field(node, "body")?;
        let kind = if is_interface {
            ScopeKind::Interface
        } else {
            ScopeKind::Class
        };
        let body_scope = self.new_scope(kind, name.clone(), lexical_parent, span_of(node));

        let mut class = ClassDef::new(
            DefCommon::new(name.clone(), qualified.clone())
                .with_scope(lexical_parent)
                .with_occurrence(self.occurrence(name_node)),
            ClassOrigin::Source,
        );
        class.is_interface = is_interface;
        class.body = Some(body_scope);

        if let Some(superclass) = child_of_kind(node, "superclass") {
            if let Some(ty) = javalens_syntax::named_children(superclass).into_iter().next() {
                class.unresolved_superclass = Some(self.type_base_name(ty));
            }
        }
        for clause in ["super_interfaces", "extends_interfaces"] {
            if let Some(interfaces) = child_of_kind(node, clause) {
                if let Some(list) = child_of_kind(interfaces, "type_list") {
                    for ty in javalens_syntax::named_children(list) {
                        class.unresolved_interfaces.push(self.type_base_name(ty));
                    }
                }
            }
        }

        let id = self.table.alloc_def(Definition::Class(class));
        self.table.scope_mut(body_scope).owner = Some(id);
        self.table
            .scope_mut(def_scope)
            .define(Namespace::Type, &name, id)?;
        self.table.register_class(&qualified, id);
        if let Some(owner) = self.table.scope(lexical_parent).owner {
            if let Definition::Class(parent) = self.table.def_mut(owner) {
                parent.nested.insert(name.clone(), id);
            }
        }

        self.class_body(body_node, body_scope, id, &qualified, is_interface)?;
        Ok(id)
    }

    /// Build the members of a class, interface, or anonymous class body
    fn class_body(
        &mut self,
        body: Node<'_>,
        body_scope: ScopeId,
        class_id: DefId,
        qualified: &str,
        is_interface: bool,
    ) -> SemanticResult<()> {
        let mut declared_constructor = false;
        let mut member_index = 0usize;

        for member in javalens_syntax::named_children(body) {
            match member.kind() {
                "field_declaration" | "constant_declaration" => {
                    self.field_declaration(member, body_scope, qualified)?;
                }
                "method_declaration" => {
                    self.method_declaration(member, body_scope, class_id, qualified, false, member_index)?;
                }
                "constructor_declaration" => {
                    declared_constructor = true;
                    self.method_declaration(member, body_scope, class_id, qualified, true, member_index)?;
                }
                "static_initializer" => {
                    let scope =
                        self.new_scope(ScopeKind::Initializer, "~Static~", body_scope, span_of(member));
                    if let Some(block) = child_of_kind(member, "block") {
                        self.statements(block, scope, qualified)?;
                    }
                }
                "block" => {
                    // instance initializer
                    let scope =
                        self.new_scope(ScopeKind::Initializer, "~Init~", body_scope, span_of(member));
                    self.statements(member, scope, qualified)?;
                }
                "class_declaration" | "interface_declaration" => {
                    self.class_declaration(member, body_scope, body_scope, qualified)?;
                }
                "line_comment" | "block_comment" => {}
                other => debug!(kind = other, "skipping unsupported class member"),
            }
            member_index += 1;
        }

        if !declared_constructor && !is_interface {
            self.synthesize_default_constructor(body_scope, class_id, qualified);
        }
        Ok(())
    }

    fn synthesize_default_constructor(
        &mut self,
        body_scope: ScopeId,
        class_id: DefId,
        qualified: &str,
    ) {
        let name = self.table.def(class_id).name().to_string();
        let ctor = Definition::DefaultConstructor(DefaultConstructorDef {
            common: DefCommon::new(name.clone(), join_qualified(qualified, &name))
                .with_scope(body_scope),
            owner: class_id,
        });
        let id = self.table.alloc_def(ctor);
        self.table.scope_mut(body_scope).define_method(&name, id);
    }

    fn field_declaration(
        &mut self,
        node: Node<'_>,
        body_scope: ScopeId,
        qualified: &str,
    ) -> SemanticResult<()> {
        let type_node = self.field(node, "type")?;
        let base_type = self.parse_type(type_node);
        let is_static = self.has_modifier(node, "static");

        let mut cursor = node.walk();
        for declarator in node.children_by_field_name("declarator", &mut cursor) {
            let name_node = self.field(declarator, "name")?;
            let name = self.text(name_node);
            let var_type = self.apply_dimensions(base_type.clone(), declarator);

            let def = Definition::Variable(VariableDef {
                common: DefCommon::new(name.clone(), join_qualified(qualified, &name))
                    .with_scope(body_scope)
                    .with_occurrence(self.occurrence(name_node)),
                var_type,
                is_static,
                kind: VariableKind::Field,
            });
            let id = self.table.alloc_def(def);
            self.table
                .scope_mut(body_scope)
                .define(Namespace::Value, &name, id)?;
            if let Some(value) = declarator.child_by_field_name("value") {
                self.expression(value, body_scope, qualified)?;
            }
        }
        Ok(())
    }

    fn method_declaration(
        &mut self,
        node: Node<'_>,
        body_scope: ScopeId,
        class_id: DefId,
        qualified: &str,
        is_constructor: bool,
        declared_index: usize,
    ) -> SemanticResult<DefId> {
        let name_node = self.field(node, "name")?;
        let name = self.text(name_node);

        let kind = if is_constructor {
            ScopeKind::Constructor
        } else {
            ScopeKind::Method
        };
        let method_scope = self.new_scope(kind, name.clone(), body_scope, span_of(node));

        let params_node = self.field(node, "parameters")?;
        let mut parameter_types = Vec::new();
        for param in javalens_syntax::named_children(params_node) {
            // varargs carry their type and declarator as plain children
            let (type_node, param_name_node) = match param.kind() {
                "formal_parameter" => (self.field(param, "type")?, self.field(param, "name")?),
                "spread_parameter" => {
                    let declarator = child_of_kind(param, "variable_declarator")
                        .ok_or_else(|| self.malformed(param, "variable_declarator"))?;
                    let ty = javalens_syntax::named_children(param)
                        .into_iter()
                        .find(|c| c.kind() != "modifiers" && c.id() != declarator.id())
                        .ok_or_else(|| self.malformed(param, "type"))?;
                    (ty, self.field(declarator, "name")?)
                }
                _ => continue,
            };
            let param_name = self.text(param_name_node);
            let mut param_type = self.apply_dimensions(self.parse_type(type_node), param);
            if param.kind() == "spread_parameter" {
                param_type = param_type.array();
            }
            parameter_types.push(param_type.clone());

            let def = Definition::Variable(VariableDef {
                common: DefCommon::new(
                    param_name.clone(),
                    join_qualified(&join_qualified(qualified, &name), &param_name),
                )
                .with_scope(method_scope)
                .with_occurrence(self.occurrence(param_name_node)),
                var_type: param_type,
                is_static: false,
                kind: VariableKind::Parameter,
            });
            let id = self.table.alloc_def(def);
            self.table
                .scope_mut(method_scope)
                .define(Namespace::Value, &param_name, id)?;
        }

        let return_type = if is_constructor {
            TypeRef::Void
        } else {
            let type_node = self.field(node, "type")?;
            self.parse_type(type_node)
        };

        let mut exceptions = Vec::new();
        if let Some(throws) = child_of_kind(node, "throws") {
            for ty in javalens_syntax::named_children(throws) {
                exceptions.push(TypeRef::Unresolved(self.type_base_name(ty)));
            }
        }

        let def = Definition::Method(MethodDef {
            common: DefCommon::new(name.clone(), join_qualified(qualified, &name))
                .with_scope(body_scope)
                .with_occurrence(self.occurrence(name_node)),
            owner: class_id,
            signature: MethodSignature::new(parameter_types),
            return_type,
            exceptions,
            is_static: self.has_modifier(node, "static"),
            is_constructor,
            body: Some(method_scope),
            declared_index,
        });
        let id = self.table.alloc_def(def);
        self.table.scope_mut(method_scope).owner = Some(id);
        self.table.scope_mut(body_scope).define_method(&name, id);

        if let Some(body) = node.child_by_field_name("body") {
            let method_qualified = join_qualified(qualified, &name);
            self.statements(body, method_scope, &method_qualified)?;
        }
        Ok(id)
    }

    // ------------------------------------------------------------------
    // statements
    // ------------------------------------------------------------------

    /// Visit the children of a brace-delimited node inside an existing
    /// scope (method bodies and initializer blocks reuse their own scope
    /// rather than opening another one)
    fn statements(&mut self, block: Node<'_>, scope: ScopeId, prefix: &str) -> SemanticResult<()> {
        for stmt in javalens_syntax::named_children(block) {
            self.statement(stmt, scope, prefix)?;
        }
        Ok(())
    }

    fn statement(&mut self, node: Node<'_>, scope: ScopeId, prefix: &str) -> SemanticResult<()> {
        match node.kind() {
            "local_variable_declaration" => self.local_variable(node, scope, prefix),
            "block" => {
                let inner = self.new_scope(ScopeKind::Block, "~Block~", scope, span_of(node));
                self.statements(node, inner, prefix)
            }
            "if_statement" => {
                if let Some(condition) = node.child_by_field_name("condition") {
                    self.expression(condition, scope, prefix)?;
                }
                if let Some(consequence) = node.child_by_field_name("consequence") {
                    self.branch(consequence, scope, prefix)?;
                }
                if let Some(alternative) = node.child_by_field_name("alternative") {
                    self.branch(alternative, scope, prefix)?;
                }
                Ok(())
            }
            "while_statement" => {
                if let Some(condition) = node.child_by_field_name("condition") {
                    self.expression(condition, scope, prefix)?;
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.branch(body, scope, prefix)?;
                }
                Ok(())
            }
            "do_statement" => {
                if let Some(body) = node.child_by_field_name("body") {
                    self.branch(body, scope, prefix)?;
                }
                if let Some(condition) = node.child_by_field_name("condition") {
                    self.expression(condition, scope, prefix)?;
                }
                Ok(())
            }
            "for_statement" => {
                // init variables live here, the parent of the body scope
                let for_scope = self.new_scope(ScopeKind::For, "~For~", scope, span_of(node));
                let mut cursor = node.walk();
                let inits: Vec<Node<'_>> =
                    node.children_by_field_name("init", &mut cursor).collect();
                for init in inits {
                    if init.kind() == "local_variable_declaration" {
                        self.local_variable(init, for_scope, prefix)?;
                    } else {
                        self.expression(init, for_scope, prefix)?;
                    }
                }
                for field in ["condition", "update"] {
                    let mut cursor = node.walk();
                    let clauses: Vec<Node<'_>> =
                        node.children_by_field_name(field, &mut cursor).collect();
                    for clause in clauses {
                        self.expression(clause, for_scope, prefix)?;
                    }
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.branch(body, for_scope, prefix)?;
                }
                Ok(())
            }
            "enhanced_for_statement" => {
                let for_scope = self.new_scope(ScopeKind::For, "~For~", scope, span_of(node));
                let type_node = self.field(node, "type")?;
                let name_node = self.field(node, "name")?;
                let name = self.text(name_node);
                let def = Definition::Variable(VariableDef {
                    common: DefCommon::new(name.clone(), join_qualified(prefix, &name))
                        .with_scope(for_scope)
                        .with_occurrence(self.occurrence(name_node)),
                    var_type: self.parse_type(type_node),
                    is_static: false,
                    kind: VariableKind::Local,
                });
                let id = self.table.alloc_def(def);
                self.table
                    .scope_mut(for_scope)
                    .define(Namespace::Value, &name, id)?;
                if let Some(value) = node.child_by_field_name("value") {
                    self.expression(value, for_scope, prefix)?;
                }
                if let Some(body) = node.child_by_field_name("body") {
                    self.branch(body, for_scope, prefix)?;
                }
                Ok(())
            }
            "switch_expression" => {
                if let Some(condition) = node.child_by_field_name("condition") {
                    self.expression(condition, scope, prefix)?;
                }
                let Some(block) = node.child_by_field_name("body") else {
                    return Ok(());
                };
                // one scope for the whole switch block; case groups fall
                // through into each other's declarations
                let switch_scope =
                    self.new_scope(ScopeKind::Switch, "~Switch~", scope, span_of(block));
                for group in javalens_syntax::named_children(block) {
                    match group.kind() {
                        "switch_block_statement_group" => {
                            for child in javalens_syntax::named_children(group) {
                                if child.kind() == "switch_label" {
                                    self.expression(child, switch_scope, prefix)?;
                                } else {
                                    self.statement(child, switch_scope, prefix)?;
                                }
                            }
                        }
                        "switch_rule" => {
                            for child in javalens_syntax::named_children(group) {
                                self.statement(child, switch_scope, prefix)?;
                            }
                        }
                        _ => {}
                    }
                }
                Ok(())
            }
            "try_statement" | "try_with_resources_statement" => {
                if let Some(resources) = node.child_by_field_name("resources") {
                    let try_scope =
                        self.new_scope(ScopeKind::Block, "~Try~", scope, span_of(node));
                    for resource in javalens_syntax::named_children(resources) {
                        // a resource can also be a bare identifier or field
                        // access, which declares nothing
                        if resource.kind() == "resource"
                            && resource.child_by_field_name("type").is_some()
                        {
                            self.local_variable(resource, try_scope, prefix)?;
                        }
                    }
                    if let Some(body) = node.child_by_field_name("body") {
                        self.statements(body, try_scope, prefix)?;
                    }
                } else if let Some(body) = node.child_by_field_name("body") {
                    let inner = self.new_scope(ScopeKind::Block, "~Try~", scope, span_of(body));
                    self.statements(body, inner, prefix)?;
                }
                let mut cursor = node.walk();
                let clauses: Vec<Node<'_>> = node.children(&mut cursor).collect();
                for clause in clauses {
                    match clause.kind() {
                        "catch_clause" => self.catch_clause(clause, scope, prefix)?,
                        "finally_clause" => {
                            if let Some(block) = child_of_kind(clause, "block") {
                                let inner = self.new_scope(
                                    ScopeKind::Block,
                                    "~Finally~",
                                    scope,
                                    span_of(block),
                                );
                                self.statements(block, inner, prefix)?;
                            }
                        }
                        _ => {}
                    }
                }
                Ok(())
            }
            "labeled_statement" => {
                let children = javalens_syntax::named_children(node);
                let Some(label_node) = children.first().filter(|c| c.kind() == "identifier")
                else {
                    return Err(self.malformed(node, "a label identifier"));
                };
                let label = self.text(*label_node);
                let def = Definition::Label(LabelDef {
                    common: DefCommon::new(label.clone(), join_qualified(prefix, &label))
                        .with_scope(scope)
                        .with_occurrence(self.occurrence(*label_node)),
                });
                let id = self.table.alloc_def(def);
                self.table
                    .scope_mut(scope)
                    .define(Namespace::Label, &label, id)?;
                for stmt in &children[1..] {
                    self.statement(*stmt, scope, prefix)?;
                }
                Ok(())
            }
            "synchronized_statement" => {
                for child in javalens_syntax::named_children(node) {
                    if child.kind() == "block" {
                        let inner =
                            self.new_scope(ScopeKind::Block, "~Sync~", scope, span_of(child));
                        self.statements(child, inner, prefix)?;
                    } else {
                        self.expression(child, scope, prefix)?;
                    }
                }
                Ok(())
            }
            "class_declaration" | "interface_declaration" => {
                // local class: visible from its declaration point to the
                // end of this block
                self.class_declaration(node, scope, scope, prefix)?;
                Ok(())
            }
            "expression_statement" | "return_statement" | "throw_statement"
            | "assert_statement" | "yield_statement" => {
                for child in javalens_syntax::named_children(node) {
                    self.expression(child, scope, prefix)?;
                }
                Ok(())
            }
            "break_statement" | "continue_statement" | "line_comment" | "block_comment"
            | ";" => Ok(()),
            _ => {
                // anything unexpected still gets scanned for class bodies
                self.expression(node, scope, prefix)
            }
        }
    }

    /// A branch body: a block opens its scope directly; a bodiless branch
    /// gets a degenerate scope covering just the single statement
    fn branch(&mut self, node: Node<'_>, parent: ScopeId, prefix: &str) -> SemanticResult<()> {
        let inner = self.new_scope(ScopeKind::Block, "~Block~", parent, span_of(node));
        if node.kind() == "block" {
            self.statements(node, inner, prefix)
        } else {
            self.statement(node, inner, prefix)
        }
    }

    fn catch_clause(&mut self, clause: Node<'_>, scope: ScopeId, prefix: &str) -> SemanticResult<()> {
        let body = self.field(clause, "body")?;
        // the catch parameter's scope is exactly the catch block
        let catch_scope = self.new_scope(ScopeKind::Catch, "~Catch~", scope, span_of(body));

        if let Some(param) = child_of_kind(clause, "catch_formal_parameter") {
            let name_node = self.field(param, "name")?;
            let name = self.text(name_node);
            // multi-catch takes the first alternative as the declared type
            let var_type = child_of_kind(param, "catch_type")
                .and_then(|ct| javalens_syntax::named_children(ct).into_iter().next())
                .map(|ty| self.parse_type(ty))
                .unwrap_or_else(|| TypeRef::Unresolved("java.lang.Throwable".to_string()));

            let def = Definition::Variable(VariableDef {
                common: DefCommon::new(name.clone(), join_qualified(prefix, &name))
                    .with_scope(catch_scope)
                    .with_occurrence(self.occurrence(name_node)),
                var_type,
                is_static: false,
                kind: VariableKind::Parameter,
            });
            let id = self.table.alloc_def(def);
            self.table
                .scope_mut(catch_scope)
                .define(Namespace::Value, &name, id)?;
        }

        self.statements(body, catch_scope, prefix)
    }

    fn local_variable(&mut self, node: Node<'_>, scope: ScopeId, prefix: &str) -> SemanticResult<()> {
        let type_node = self.field(node, "type")?;
        let base_type = self.parse_type(type_node);

        let mut cursor = node.walk();
        let declarators: Vec<Node<'_>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();
        if declarators.is_empty() {
            // try-with-resources resource nodes carry name/value directly
            if let (Some(name_node), value) = (
                node.child_by_field_name("name"),
                node.child_by_field_name("value"),
            ) {
                self.define_local(node, name_node, base_type, scope, prefix)?;
                if let Some(value) = value {
                    self.expression(value, scope, prefix)?;
                }
            }
            return Ok(());
        }
        for declarator in declarators {
            let name_node = self.field(declarator, "name")?;
            let var_type = self.apply_dimensions(base_type.clone(), declarator);
            self.define_local(declarator, name_node, var_type, scope, prefix)?;
            if let Some(value) = declarator.child_by_field_name("value") {
                self.expression(value, scope, prefix)?;
            }
        }
        Ok(())
    }

    fn define_local(
        &mut self,
        _declarator: Node<'_>,
        name_node: Node<'_>,
        var_type: TypeRef,
        scope: ScopeId,
        prefix: &str,
    ) -> SemanticResult<()> {
        let name = self.text(name_node);
        let def = Definition::Variable(VariableDef {
            common: DefCommon::new(name.clone(), join_qualified(prefix, &name))
                .with_scope(scope)
                .with_occurrence(self.occurrence(name_node)),
            var_type,
            is_static: false,
            kind: VariableKind::Local,
        });
        let id = self.table.alloc_def(def);
        self.table
            .scope_mut(scope)
            .define(Namespace::Value, &name, id)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // expressions (only their declaration content matters here)
    // ------------------------------------------------------------------

    /// Scan an expression tree for constructs that declare things:
    /// anonymous class bodies and lambda blocks. Reference resolution
    /// happens in a later pass; this pass only creates definitions.
    fn expression(&mut self, node: Node<'_>, scope: ScopeId, prefix: &str) -> SemanticResult<()> {
        if node.kind() == "object_creation_expression" {
            if let Some(body) = child_of_kind(node, "class_body") {
                self.anonymous_class(node, body, scope, prefix)?;
                if let Some(arguments) = node.child_by_field_name("arguments") {
                    self.expression(arguments, scope, prefix)?;
                }
                return Ok(());
            }
        }
        if node.kind() == "lambda_expression" {
            if let Some(body) = node.child_by_field_name("body") {
                if body.kind() == "block" {
                    let inner = self.new_scope(ScopeKind::Block, "~Lambda~", scope, span_of(body));
                    return self.statements(body, inner, prefix);
                }
            }
        }
        for child in javalens_syntax::named_children(node) {
            self.expression(child, scope, prefix)?;
        }
        Ok(())
    }

    /// An anonymous class: a synthetic `~Anonymous~N` definition whose
    /// superclass is the named type being instantiated and whose enclosing
    /// scope is the block containing the `new` expression
    fn anonymous_class(
        &mut self,
        new_node: Node<'_>,
        body: Node<'_>,
        scope: ScopeId,
        prefix: &str,
    ) -> SemanticResult<DefId> {
        self.anonymous_count += 1;
        let name = format!("~Anonymous~{}", self.anonymous_count);
        let qualified = join_qualified(prefix, &name);

        let body_scope =
            self.new_scope(ScopeKind::AnonymousClass, name.clone(), scope, span_of(body));

        let mut class = ClassDef::new(
            DefCommon::new(name.clone(), qualified.clone())
                .with_scope(scope)
                .with_occurrence(self.occurrence(new_node)),
            ClassOrigin::Source,
        );
        class.body = Some(body_scope);
        if let Some(type_node) = new_node.child_by_field_name("type") {
            class.unresolved_superclass = Some(self.type_base_name(type_node));
        }

        let id = self.table.alloc_def(Definition::Class(class));
        self.table.scope_mut(body_scope).owner = Some(id);
        self.table.register_class(&qualified, id);

        self.class_body(body, body_scope, id, &qualified, false)?;
        Ok(id)
    }

    // ------------------------------------------------------------------
    // helpers
    // ------------------------------------------------------------------

    fn new_scope(
        &mut self,
        kind: ScopeKind,
        name: impl Into<String>,
        parent: ScopeId,
        span: Span,
    ) -> ScopeId {
        let id = self.table.alloc_scope(kind, name, Some(parent));
        let scope = self.table.scope_mut(id);
        scope.file = Some(self.path.clone());
        scope.span = span;
        self.scope_spans.push((span, id));
        id
    }

    /// Parse a declared type into a `TypeRef`; class names stay unresolved
    /// until the link pass
    fn parse_type(&self, node: Node<'_>) -> TypeRef {
        match node.kind() {
            "integral_type" | "floating_point_type" | "boolean_type" => {
                match PrimitiveType::from_name(&self.text(node)) {
                    Some(p) => TypeRef::Primitive(p),
                    None => TypeRef::Unresolved(self.text(node)),
                }
            }
            "void_type" => TypeRef::Void,
            "array_type" => {
                let element = node
                    .child_by_field_name("element")
                    .map(|e| self.parse_type(e))
                    .unwrap_or(TypeRef::Unresolved(self.text(node)));
                let dims = node
                    .child_by_field_name("dimensions")
                    .map(|d| self.text(d).matches('[').count())
                    .unwrap_or(1);
                (0..dims.max(1)).fold(element, |t, _| t.array())
            }
            "generic_type" => javalens_syntax::named_children(node)
                .into_iter()
                .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
                .map(|c| self.parse_type(c))
                .unwrap_or(TypeRef::Unresolved(self.text(node))),
            "type_identifier" | "scoped_type_identifier" | "identifier" | "scoped_identifier" => {
                TypeRef::Unresolved(self.text(node))
            }
            _ => TypeRef::Unresolved(self.text(node)),
        }
    }

    /// The written name of a type reference, generics erased
    fn type_base_name(&self, node: Node<'_>) -> String {
        match node.kind() {
            "generic_type" => javalens_syntax::named_children(node)
                .into_iter()
                .find(|c| matches!(c.kind(), "type_identifier" | "scoped_type_identifier"))
                .map(|c| self.text(c))
                .unwrap_or_else(|| self.text(node)),
            _ => self.text(node),
        }
    }

    /// Apply C-style declarator dimensions (`int x[]`) on top of a type
    fn apply_dimensions(&self, base: TypeRef, declarator: Node<'_>) -> TypeRef {
        match child_of_kind(declarator, "dimensions") {
            Some(dims) => {
                let count = self.text(dims).matches('[').count();
                (0..count).fold(base, |t, _| t.array())
            }
            None => base,
        }
    }

    fn has_modifier(&self, node: Node<'_>, modifier: &str) -> bool {
        child_of_kind(node, "modifiers")
            .map(|mods| {
                let mut cursor = mods.walk();
                mods.children(&mut cursor).any(|m| m.kind() == modifier)
            })
            .unwrap_or(false)
    }

    fn collect_tokens(&self, root: Node<'_>) -> TokenIndex {
        let mut entries = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.child_count() == 0 {
                if is_identifier_kind(node.kind()) {
                    entries.push((span_of(node), self.text(node)));
                }
            } else {
                let mut cursor = node.walk();
                stack.extend(node.children(&mut cursor));
            }
        }
        TokenIndex::new(entries)
    }

    fn field<'n>(&self, node: Node<'n>, name: &str) -> SemanticResult<Node<'n>> {
        node.child_by_field_name(name)
            .ok_or_else(|| self.malformed(node, name))
    }

    fn malformed(&self, node: Node<'_>, expected: &str) -> SemanticError {
        SemanticError::MalformedTree {
            file: self.path.clone(),
            found: node.kind().to_string(),
            expected: expected.to_string(),
        }
    }

    fn text(&self, node: Node<'_>) -> String {
        self.file.node_text(node).to_string()
    }

    fn occurrence(&self, node: Node<'_>) -> Occurrence {
        self.file.occurrence_of(node)
    }
}

/// Join a qualified-name prefix with a simple name
pub(crate) fn join_qualified(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
