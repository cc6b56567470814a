// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Cross-file linker
//!
//! The second pass over the table, run once after every file is built.
//! Forward and circular references between files are legal - class A in one
//! file may extend class B from a file built later - so the builder records
//! superclass, interface, and declared-type names as strings and this pass
//! resolves them against the completed cross-file registry.
//!
//! The pass also interns the platform provider's whole surface as external
//! definitions up front. That keeps the query phase strictly read-only: a
//! name that falls through to the platform resolves against interned
//! definitions instead of mutating anything mid-query.

use crate::definition::{
    ClassDef, ClassOrigin, DefCommon, DefaultConstructorDef, DefId, Definition, MethodDef,
    TypeRef, VariableDef, VariableKind,
};
use crate::error::SemanticResult;
use crate::scope::ScopeId;
use crate::signature::MethodSignature;
use crate::table::SymbolTable;
use javalens_platform::{ExternalClass, PrimitiveType, TypeProvider};
use tracing::{debug, warn};

/// Links classes across files and interns the platform surface
pub struct Linker;

impl Linker {
    /// Run the link pass
    pub fn link(table: &mut SymbolTable, provider: &dyn TypeProvider) -> SemanticResult<()> {
        Self::intern_platform(table, provider);
        Self::link_class_hierarchy(table);
        Self::resolve_declared_types(table);
        Ok(())
    }

    // ------------------------------------------------------------------
    // platform interning
    // ------------------------------------------------------------------

    fn intern_platform(table: &mut SymbolTable, provider: &dyn TypeProvider) {
        let mut descriptions = provider.list_types();
        descriptions.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));

        // first the classes themselves, so member types can refer to any
        // of them regardless of description order
        let mut interned: Vec<(DefId, ExternalClass)> = Vec::new();
        for description in descriptions {
            let mut class = ClassDef::new(
                DefCommon::new(
                    description.simple_name().to_string(),
                    description.qualified_name.clone(),
                ),
                ClassOrigin::External,
            );
            class.is_interface = description.is_interface;
            let id = table.alloc_def(Definition::Class(class));
            table.register_class(&description.qualified_name, id);
            interned.push((id, description));
        }

        if let Some(object) = table.class_by_qualified_name("java.lang.Object") {
            table.set_object_class(object);
        }

        // then supertype links and members
        for (id, description) in interned {
            Self::link_external_supertypes(table, id, &description);
            Self::intern_external_members(table, id, &description);
        }
    }

    fn link_external_supertypes(table: &mut SymbolTable, id: DefId, description: &ExternalClass) {
        let superclass = match &description.superclass {
            Some(name) => match table.class_by_qualified_name(name) {
                Some(found) => Some(found),
                None => {
                    debug!(class = %description.qualified_name, superclass = %name,
                        "superclass not in platform surface, defaulting to the root class");
                    table.object_class()
                }
            },
            None => None,
        };
        let interfaces: Vec<DefId> = description
            .interfaces
            .iter()
            .filter_map(|name| table.class_by_qualified_name(name))
            .collect();

        if let Some(superclass) = superclass {
            if let Definition::Class(c) = table.def_mut(superclass) {
                c.subclasses.push(id);
            }
        }
        for &interface in &interfaces {
            if let Definition::Class(c) = table.def_mut(interface) {
                c.implementors.push(id);
            }
        }
        if let Definition::Class(c) = table.def_mut(id) {
            c.superclass = superclass;
            c.interfaces = interfaces;
        }
    }

    fn intern_external_members(table: &mut SymbolTable, id: DefId, description: &ExternalClass) {
        let simple_name = description.simple_name().to_string();
        let mut has_constructor = false;

        for (index, method) in description.methods.iter().enumerate() {
            let is_constructor = method.name == simple_name;
            has_constructor |= is_constructor;

            let parameters: Vec<TypeRef> = method
                .parameters
                .iter()
                .map(|p| parse_type_name(table, p))
                .collect();
            let return_type = if is_constructor {
                TypeRef::Void
            } else {
                parse_type_name(table, &method.return_type)
            };
            let exceptions: Vec<TypeRef> = method
                .exceptions
                .iter()
                .map(|e| parse_type_name(table, e))
                .collect();

            let def = Definition::Method(MethodDef {
                common: DefCommon::new(
                    method.name.clone(),
                    format!("{}.{}", description.qualified_name, method.name),
                ),
                owner: id,
                signature: MethodSignature::new(parameters),
                return_type,
                exceptions,
                is_static: method.is_static,
                is_constructor,
                body: None,
                declared_index: index,
            });
            let method_id = table.alloc_def(def);
            if let Definition::Class(c) = table.def_mut(id) {
                c.methods.entry(method.name.clone()).or_default().push(method_id);
            }
        }

        for field in &description.fields {
            let field_type = parse_type_name(table, &field.field_type);
            let def = Definition::Variable(VariableDef {
                common: DefCommon::new(
                    field.name.clone(),
                    format!("{}.{}", description.qualified_name, field.name),
                ),
                var_type: field_type,
                is_static: field.is_static,
                kind: VariableKind::Field,
            });
            let field_id = table.alloc_def(def);
            if let Definition::Class(c) = table.def_mut(id) {
                c.fields.insert(field.name.clone(), field_id);
            }
        }

        if !has_constructor && !description.is_interface {
            let def = Definition::DefaultConstructor(DefaultConstructorDef {
                common: DefCommon::new(
                    simple_name.clone(),
                    format!("{}.{}", description.qualified_name, simple_name),
                ),
                owner: id,
            });
            let ctor_id = table.alloc_def(def);
            if let Definition::Class(c) = table.def_mut(id) {
                c.methods.entry(simple_name).or_default().push(ctor_id);
            }
        }
    }

    // ------------------------------------------------------------------
    // source class hierarchy
    // ------------------------------------------------------------------

    fn link_class_hierarchy(table: &mut SymbolTable) {
        struct PlannedLinks {
            class: DefId,
            superclass: Option<DefId>,
            interfaces: Vec<DefId>,
        }

        let mut planned = Vec::new();
        for id in table.def_ids() {
            let Definition::Class(class) = table.def(id) else {
                continue;
            };
            if class.origin != ClassOrigin::Source {
                continue;
            }
            let context = class.body.unwrap_or_else(|| table.root());
            let is_interface = class.is_interface;

            let mut superclass = match &class.unresolved_superclass {
                Some(name) => match table.resolve_type_name(context, name, None) {
                    Some(found) => Some(found),
                    None => {
                        warn!(class = %class.common.qualified_name, superclass = %name,
                            "unresolvable superclass, defaulting to the root class");
                        table.object_class()
                    }
                },
                // every class without an extends clause sits under the
                // external root class; interfaces have no superclass
                None if is_interface => None,
                None => table.object_class(),
            };

            let mut interfaces: Vec<DefId> = class
                .unresolved_interfaces
                .iter()
                .filter_map(|name| {
                    let found = table.resolve_type_name(context, name, None);
                    if found.is_none() {
                        debug!(class = %class.common.qualified_name, interface = %name,
                            "unresolvable interface reference");
                    }
                    found
                })
                .collect();

            // an anonymous class of an interface type implements the
            // interface and extends the root class
            if let Some(found) = superclass {
                let super_is_interface = table
                    .def(found)
                    .as_class()
                    .map(|c| c.is_interface)
                    .unwrap_or(false);
                if super_is_interface && !is_interface {
                    interfaces.insert(0, found);
                    superclass = table.object_class();
                }
            }

            planned.push(PlannedLinks {
                class: id,
                superclass,
                interfaces,
            });
        }

        for links in planned {
            if let Some(superclass) = links.superclass {
                if let Definition::Class(c) = table.def_mut(superclass) {
                    c.subclasses.push(links.class);
                }
            }
            for &interface in &links.interfaces {
                if let Definition::Class(c) = table.def_mut(interface) {
                    c.implementors.push(links.class);
                }
            }
            if let Definition::Class(c) = table.def_mut(links.class) {
                c.superclass = links.superclass;
                c.interfaces = links.interfaces;
                c.unresolved_superclass = None;
                c.unresolved_interfaces.clear();
            }
        }
    }

    // ------------------------------------------------------------------
    // declared types
    // ------------------------------------------------------------------

    /// Rewrite every `TypeRef::Unresolved` left by the builder into a
    /// linked class handle, using the declaring scope as resolution context
    fn resolve_declared_types(table: &mut SymbolTable) {
        enum Patch {
            Variable(TypeRef),
            Method {
                parameters: Vec<TypeRef>,
                return_type: TypeRef,
                exceptions: Vec<TypeRef>,
            },
        }

        let mut patches: Vec<(DefId, Patch)> = Vec::new();
        for id in table.def_ids() {
            match table.def(id) {
                Definition::Variable(var) => {
                    let Some(scope) = var.common.scope else { continue };
                    if let Some(resolved) = resolve_type_ref(table, scope, &var.var_type) {
                        patches.push((id, Patch::Variable(resolved)));
                    }
                }
                Definition::Method(method) => {
                    let Some(scope) = method.common.scope else { continue };
                    let parameters: Vec<TypeRef> = method
                        .signature
                        .parameters()
                        .iter()
                        .map(|t| resolve_type_ref(table, scope, t).unwrap_or_else(|| t.clone()))
                        .collect();
                    let return_type = resolve_type_ref(table, scope, &method.return_type)
                        .unwrap_or_else(|| method.return_type.clone());
                    let exceptions: Vec<TypeRef> = method
                        .exceptions
                        .iter()
                        .map(|t| resolve_type_ref(table, scope, t).unwrap_or_else(|| t.clone()))
                        .collect();
                    patches.push((
                        id,
                        Patch::Method {
                            parameters,
                            return_type,
                            exceptions,
                        },
                    ));
                }
                _ => {}
            }
        }

        for (id, patch) in patches {
            match (table.def_mut(id), patch) {
                (Definition::Variable(var), Patch::Variable(resolved)) => {
                    var.var_type = resolved;
                }
                (
                    Definition::Method(method),
                    Patch::Method {
                        parameters,
                        return_type,
                        exceptions,
                    },
                ) => {
                    for (slot, resolved) in
                        method.signature.parameters_mut().iter_mut().zip(parameters)
                    {
                        *slot = resolved;
                    }
                    method.return_type = return_type;
                    method.exceptions = exceptions;
                }
                _ => {}
            }
        }
    }
}

/// Resolve one `TypeRef` in a scope context; `None` means "unchanged"
fn resolve_type_ref(table: &SymbolTable, scope: ScopeId, type_ref: &TypeRef) -> Option<TypeRef> {
    match type_ref {
        TypeRef::Unresolved(name) => match table.resolve_type_name(scope, name, None) {
            Some(found) => Some(TypeRef::Named(found)),
            None => {
                debug!(name = %name, "declared type stays unresolved");
                None
            }
        },
        TypeRef::Array(element) => {
            resolve_type_ref(table, scope, element).map(|resolved| resolved.array())
        }
        _ => None,
    }
}

/// Parse a platform type name (`int`, `void`, `java.lang.String`,
/// `char[]`) against the interned registry
fn parse_type_name(table: &SymbolTable, name: &str) -> TypeRef {
    if let Some(element) = name.strip_suffix("[]") {
        return parse_type_name(table, element).array();
    }
    if name == "void" {
        return TypeRef::Void;
    }
    if let Some(primitive) = PrimitiveType::from_name(name) {
        return TypeRef::Primitive(primitive);
    }
    match table.class_by_qualified_name(name) {
        Some(id) => TypeRef::Named(id),
        None => TypeRef::Unresolved(name.to_string()),
    }
}
