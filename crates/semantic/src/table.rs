// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # The symbol table
//!
//! The assembled product of the build phase: the scope forest, the
//! definition arena, per-file scope and token indexes, the recorded
//! references, and the cross-file class registry.
//!
//! The table is written exclusively by the build/link/resolve passes and is
//! immutable afterwards; every query method takes `&self`, so a completed
//! table can serve any number of concurrent readers without locking.
//!
//! The lookup methods on this type are also the seam between source and
//! platform type information: `resolve_type_name`, `value_member`,
//! `method_candidates`, and `superclass_of` answer uniformly for source
//! classes (whose members live in body scopes) and interned external
//! classes (whose members live on the definition), so resolution code
//! never branches on where a type came from.

use crate::definition::{DefId, Definition, Reference, TypeRef, VariableDef, VariableKind};
use crate::error::{SemanticError, SemanticResult};
use crate::index::ScopeIndex;
use crate::scope::{Scope, ScopeId, ScopeKind};
use javalens_core::{Namespace, Occurrence, Point, Span};
use javalens_platform::PrimitiveType;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Name-visibility edges registered by a file's import declarations
#[derive(Debug, Clone, Default)]
pub struct Imports {
    /// Single-type imports: simple name to qualified name
    pub single: HashMap<String, String>,

    /// On-demand (star) imports: packages whose top-level types are
    /// visible. A star import never exposes the package's sub-packages.
    pub on_demand: Vec<String>,
}

/// Sorted identifier tokens of one file, for word-at-point lookups
#[derive(Debug, Clone, Default)]
pub struct TokenIndex {
    entries: Vec<(Span, String)>,
}

impl TokenIndex {
    /// Build an index from identifier token spans
    pub fn new(mut entries: Vec<(Span, String)>) -> Self {
        entries.sort_by(|(a, _), (b, _)| a.start.cmp(&b.start));
        Self { entries }
    }

    /// The identifier token containing the point, if any.
    ///
    /// Identifier tokens never nest, so the candidate is simply the last
    /// token starting at or before the point.
    pub fn word_at(&self, point: Point) -> Option<&str> {
        self.token_at(point).map(|(_, text)| text)
    }

    /// The span and text of the identifier token containing the point
    pub fn token_at(&self, point: Point) -> Option<(Span, &str)> {
        let partition = self.entries.partition_point(|(span, _)| span.start <= point);
        let (span, text) = self.entries.get(partition.checked_sub(1)?)?;
        span.contains(point).then_some((*span, text.as_str()))
    }

    /// Number of indexed tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-file record in the symbol table
#[derive(Debug)]
pub struct FileEntry {
    /// The compilation-unit scope of the file
    pub unit_scope: ScopeId,

    /// The (shared) package scope the file belongs to
    pub package_scope: ScopeId,

    /// Import visibility edges of the file
    pub imports: Imports,

    /// Span-to-scope index of the file
    pub index: ScopeIndex,

    /// Identifier token index of the file
    pub tokens: TokenIndex,
}

/// The cross-file scope/definition graph and its indexes
pub struct SymbolTable {
    scopes: Vec<Scope>,
    defs: Vec<Definition>,
    root: ScopeId,
    packages: HashMap<String, ScopeId>,
    files: HashMap<PathBuf, FileEntry>,
    references: Vec<Reference>,
    registry: HashMap<String, DefId>,
    decl_index: HashMap<Occurrence, DefId>,
    array_length: DefId,
    object_class: Option<DefId>,
}

impl SymbolTable {
    /// Create an empty table with the synthetic root scope
    pub fn new() -> Self {
        let root = Scope::new(ScopeId(0), ScopeKind::Root, "~Root~");
        // the one synthetic member every array type shares
        let array_length = Definition::Variable(VariableDef {
            common: crate::definition::DefCommon::new("length", "length"),
            var_type: TypeRef::Primitive(PrimitiveType::Int),
            is_static: false,
            kind: VariableKind::Field,
        });

        Self {
            scopes: vec![root],
            defs: vec![array_length],
            root: ScopeId(0),
            packages: HashMap::new(),
            files: HashMap::new(),
            references: Vec::new(),
            registry: HashMap::new(),
            decl_index: HashMap::new(),
            array_length: DefId(0),
            object_class: None,
        }
    }

    // ------------------------------------------------------------------
    // arena access
    // ------------------------------------------------------------------

    /// The synthetic root scope above all packages
    pub fn root(&self) -> ScopeId {
        self.root
    }

    /// The shared definition of the arrays' `length` member
    pub fn array_length(&self) -> DefId {
        self.array_length
    }

    /// The external root class `java.lang.Object`, once interned
    pub fn object_class(&self) -> Option<DefId> {
        self.object_class
    }

    pub(crate) fn set_object_class(&mut self, id: DefId) {
        self.object_class = Some(id);
    }

    /// Get a scope by handle
    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.index()]
    }

    pub(crate) fn scope_mut(&mut self, id: ScopeId) -> &mut Scope {
        &mut self.scopes[id.index()]
    }

    /// Get a definition by handle
    pub fn def(&self, id: DefId) -> &Definition {
        &self.defs[id.index()]
    }

    pub(crate) fn def_mut(&mut self, id: DefId) -> &mut Definition {
        &mut self.defs[id.index()]
    }

    /// Number of definitions in the arena
    pub fn def_count(&self) -> usize {
        self.defs.len()
    }

    /// Iterate over all definition handles
    pub fn def_ids(&self) -> impl Iterator<Item = DefId> {
        (0..self.defs.len()).map(DefId)
    }

    /// Allocate a new scope under a parent
    pub(crate) fn alloc_scope(
        &mut self,
        kind: ScopeKind,
        name: impl Into<String>,
        parent: Option<ScopeId>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        let mut scope = Scope::new(id, kind, name);
        scope.parent = parent;
        self.scopes.push(scope);
        if let Some(parent) = parent {
            self.scopes[parent.index()].children.push(id);
        }
        id
    }

    /// Allocate a new definition
    pub(crate) fn alloc_def(&mut self, def: Definition) -> DefId {
        let id = DefId(self.defs.len());
        if let Some(occ) = def.occurrence() {
            self.decl_index.insert(occ.clone(), id);
        }
        self.defs.push(def);
        id
    }

    /// The definition declared exactly at this identifier occurrence
    pub fn declaration_at(&self, occurrence: &Occurrence) -> Option<DefId> {
        self.decl_index.get(occurrence).copied()
    }

    // ------------------------------------------------------------------
    // packages, files, registry
    // ------------------------------------------------------------------

    /// Get or create the scope of a package.
    ///
    /// `key` disambiguates unnamed packages: files without a package
    /// declaration share a synthetic package per directory, so the key for
    /// those is derived from the directory while the display name stays
    /// empty.
    pub(crate) fn package_scope(&mut self, key: &str, display_name: &str) -> ScopeId {
        if let Some(&id) = self.packages.get(key) {
            return id;
        }
        let name = if display_name.is_empty() {
            "~DefaultPackage~".to_string()
        } else {
            display_name.to_string()
        };
        let id = self.alloc_scope(ScopeKind::Package, name, Some(self.root));
        self.packages.insert(key.to_string(), id);
        id
    }

    pub(crate) fn add_file(&mut self, path: PathBuf, entry: FileEntry) {
        self.files.insert(path, entry);
    }

    /// The per-file record, or `None` if the file was never built
    pub fn file(&self, path: &Path) -> Option<&FileEntry> {
        self.files.get(path)
    }

    /// Paths of every built file
    pub fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    /// Register a class under its qualified name
    pub(crate) fn register_class(&mut self, qualified_name: &str, id: DefId) {
        self.registry.insert(qualified_name.to_string(), id);
    }

    /// Look up a class by qualified name, source or external
    pub fn class_by_qualified_name(&self, qualified_name: &str) -> Option<DefId> {
        self.registry.get(qualified_name).copied()
    }

    /// Qualified names of all registered classes
    pub fn registered_class_names(&self) -> impl Iterator<Item = &str> {
        self.registry.keys().map(String::as_str)
    }

    // ------------------------------------------------------------------
    // references
    // ------------------------------------------------------------------

    pub(crate) fn record_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    /// Sort the recorded references into file order; called once after the
    /// resolve pass
    pub(crate) fn finish(&mut self) {
        self.references
            .sort_by(|a, b| a.occurrence.cmp(&b.occurrence));
    }

    /// The reference whose identifier token starts exactly here
    pub fn reference_at(&self, occurrence: &Occurrence) -> Option<&Reference> {
        let idx = self
            .references
            .binary_search_by(|r| r.occurrence.cmp(occurrence))
            .ok()?;
        Some(&self.references[idx])
    }

    /// All references resolving to the given definition, in file order
    pub fn references_to(&self, def: DefId) -> Vec<&Reference> {
        self.references
            .iter()
            .filter(|r| r.resolved == Some(def))
            .collect()
    }

    /// Every recorded reference, in file order
    pub fn references(&self) -> &[Reference] {
        &self.references
    }

    // ------------------------------------------------------------------
    // scope-chain lookups
    // ------------------------------------------------------------------

    /// The innermost class-like scope at or above `scope`, with its class
    pub fn enclosing_class(&self, scope: ScopeId) -> Option<DefId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id);
            if s.kind.is_class_like() {
                if let Some(owner) = s.owner {
                    return Some(owner);
                }
            }
            current = s.parent;
        }
        None
    }

    /// Walk the scope chain for a name in one namespace, innermost first.
    ///
    /// At a class-body scope the search detours into the inheritance chain
    /// (superclass, then interfaces, recursively) before continuing to the
    /// lexically enclosing scope, so inherited members shadow
    /// enclosing-but-unrelated ones.
    ///
    /// `at` enables declaration-order visibility: inside statement-level
    /// scopes, a local declared after the use point is skipped.
    pub fn lookup(
        &self,
        namespace: Namespace,
        scope: ScopeId,
        name: &str,
        at: Option<&Occurrence>,
    ) -> Option<DefId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id);
            if let Some(def) = s.get(namespace, name) {
                if self.visible_at(s, def, at) {
                    return Some(def);
                }
            }
            if s.kind.is_class_like() {
                if let Some(class) = s.owner {
                    let found = match namespace {
                        Namespace::Value => self.inherited_value_member(class, name),
                        Namespace::Type => self.inherited_type_member(class, name),
                        Namespace::Label => None,
                    };
                    if found.is_some() {
                        return found;
                    }
                }
            }
            current = s.parent;
        }
        None
    }

    /// Declaration-order filter for statement-level scopes: a local (or
    /// local class) declared after the use point is not yet visible there.
    fn visible_at(&self, scope: &Scope, def: DefId, at: Option<&Occurrence>) -> bool {
        if !scope.kind.is_ordered() {
            return true;
        }
        let (Some(at), Some(decl)) = (at, self.def(def).occurrence()) else {
            return true;
        };
        if decl.file != at.file {
            return true;
        }
        decl.point() <= at.point()
    }

    // ------------------------------------------------------------------
    // inheritance-aware member lookup
    // ------------------------------------------------------------------

    /// The linked superclass of a class; interned `java.lang.Object` for
    /// classes linked without an explicit one
    pub fn superclass_of(&self, class: DefId) -> Option<DefId> {
        self.def(class).as_class().and_then(|c| c.superclass)
    }

    /// A field declared directly on a class, wherever its members live
    fn own_value_member(&self, class: DefId, name: &str) -> Option<DefId> {
        let c = self.def(class).as_class()?;
        match c.body {
            Some(scope) => self.scope(scope).get(Namespace::Value, name),
            None => c.fields.get(name).copied(),
        }
    }

    /// A nested type declared directly on a class
    fn own_type_member(&self, class: DefId, name: &str) -> Option<DefId> {
        let c = self.def(class).as_class()?;
        if let Some(&nested) = c.nested.get(name) {
            return Some(nested);
        }
        match c.body {
            Some(scope) => self.scope(scope).get(Namespace::Type, name),
            None => None,
        }
    }

    /// Methods of one name declared directly on a class
    fn own_methods(&self, class: DefId, name: &str) -> Vec<DefId> {
        let Some(c) = self.def(class).as_class() else {
            return Vec::new();
        };
        match c.body {
            Some(scope) => self.scope(scope).get_methods(name).to_vec(),
            None => c.methods.get(name).cloned().unwrap_or_default(),
        }
    }

    /// A field visible on a class through inheritance (superclass chain,
    /// then interfaces, recursively), excluding the class's own members
    fn inherited_value_member(&self, class: DefId, name: &str) -> Option<DefId> {
        let mut visited = HashSet::new();
        visited.insert(class);
        self.supertypes_of(class)
            .into_iter()
            .find_map(|s| self.value_member_rec(s, name, &mut visited))
    }

    fn inherited_type_member(&self, class: DefId, name: &str) -> Option<DefId> {
        let mut visited = HashSet::new();
        visited.insert(class);
        self.supertypes_of(class)
            .into_iter()
            .find_map(|s| self.type_member_rec(s, name, &mut visited))
    }

    /// A field visible on a class, own members included
    pub fn value_member(&self, class: DefId, name: &str) -> Option<DefId> {
        let mut visited = HashSet::new();
        self.value_member_rec(class, name, &mut visited)
    }

    /// A nested type visible on a class, own members included
    pub fn type_member(&self, class: DefId, name: &str) -> Option<DefId> {
        let mut visited = HashSet::new();
        self.type_member_rec(class, name, &mut visited)
    }

    fn value_member_rec(
        &self,
        class: DefId,
        name: &str,
        visited: &mut HashSet<DefId>,
    ) -> Option<DefId> {
        if !visited.insert(class) {
            return None;
        }
        if let Some(found) = self.own_value_member(class, name) {
            return Some(found);
        }
        self.supertypes_of(class)
            .into_iter()
            .find_map(|s| self.value_member_rec(s, name, visited))
    }

    fn type_member_rec(
        &self,
        class: DefId,
        name: &str,
        visited: &mut HashSet<DefId>,
    ) -> Option<DefId> {
        if !visited.insert(class) {
            return None;
        }
        if let Some(found) = self.own_type_member(class, name) {
            return Some(found);
        }
        self.supertypes_of(class)
            .into_iter()
            .find_map(|s| self.type_member_rec(s, name, visited))
    }

    /// Superclass first, then interfaces in declaration order
    fn supertypes_of(&self, class: DefId) -> Vec<DefId> {
        let Some(c) = self.def(class).as_class() else {
            return Vec::new();
        };
        let mut supers = Vec::new();
        if let Some(superclass) = c.superclass {
            supers.push(superclass);
        }
        supers.extend(&c.interfaces);
        supers
    }

    /// Every method of one name visible on a class: its own declarations
    /// plus inherited ones whose signature no nearer declaration overrides
    pub fn method_candidates(&self, class: DefId, name: &str) -> Vec<DefId> {
        let mut candidates: Vec<DefId> = Vec::new();
        let mut seen_signatures = Vec::new();
        let mut visited = HashSet::new();
        self.collect_methods(class, name, &mut candidates, &mut seen_signatures, &mut visited);
        candidates
    }

    fn collect_methods(
        &self,
        class: DefId,
        name: &str,
        candidates: &mut Vec<DefId>,
        seen: &mut Vec<crate::signature::MethodSignature>,
        visited: &mut HashSet<DefId>,
    ) {
        if !visited.insert(class) {
            return;
        }
        for id in self.own_methods(class, name) {
            if let Some(method) = self.def(id).as_method() {
                if !seen.contains(&method.signature) {
                    seen.push(method.signature.clone());
                    candidates.push(id);
                }
            }
        }
        for supertype in self.supertypes_of(class) {
            self.collect_methods(supertype, name, candidates, seen, visited);
        }
    }

    /// Declared constructors of a class, or its synthesized default
    /// constructor when none were declared
    pub fn constructor_candidates(&self, class: DefId) -> Vec<DefId> {
        let Some(c) = self.def(class).as_class() else {
            return Vec::new();
        };
        let name = c.common.name.clone();
        // a class that declares no constructor carries its synthesized
        // default constructor in the same method table
        self.own_methods(class, &name)
            .into_iter()
            .filter(|id| self.def(*id).is_constructor())
            .collect()
    }

    // ------------------------------------------------------------------
    // type-name resolution (the source/platform seam)
    // ------------------------------------------------------------------

    /// Resolve a possibly-qualified type name as seen from a scope.
    ///
    /// Simple names walk the scope chain (nested types, then enclosing
    /// classes' inherited member types, then the package), then the file's
    /// single-type imports, `java.lang`, and finally on-demand imports.
    /// Qualified names go straight to the registry. `at` carries the use
    /// point so that local classes stay invisible before their declaration.
    pub fn resolve_type_name(
        &self,
        scope: ScopeId,
        name: &str,
        at: Option<&Occurrence>,
    ) -> Option<DefId> {
        if name.contains('.') {
            return self.class_by_qualified_name(name);
        }

        if let Some(found) = self.lookup(Namespace::Type, scope, name, at) {
            return Some(found);
        }

        let file = self.file_of_scope(scope)?;
        let entry = self.files.get(&file)?;

        if let Some(qualified) = entry.imports.single.get(name) {
            if let Some(found) = self.class_by_qualified_name(qualified) {
                return Some(found);
            }
        }
        if let Some(found) = self.class_by_qualified_name(&format!("java.lang.{name}")) {
            return Some(found);
        }
        for package in &entry.imports.on_demand {
            if let Some(found) = self.class_by_qualified_name(&format!("{package}.{name}")) {
                return Some(found);
            }
        }
        None
    }

    /// The file a scope belongs to, walking up for scopes without one
    fn file_of_scope(&self, scope: ScopeId) -> Option<PathBuf> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.scope(id);
            if let Some(file) = &s.file {
                return Some(file.clone());
            }
            current = s.parent;
        }
        None
    }

    // ------------------------------------------------------------------
    // assignability and overload selection
    // ------------------------------------------------------------------

    /// Reflexive, transitive subtype test over the linked class graph
    pub fn is_subtype(&self, sub: DefId, superclass: DefId) -> bool {
        let mut visited = HashSet::new();
        self.is_subtype_rec(sub, superclass, &mut visited)
    }

    fn is_subtype_rec(&self, sub: DefId, target: DefId, visited: &mut HashSet<DefId>) -> bool {
        if sub == target {
            return true;
        }
        if !visited.insert(sub) {
            return false;
        }
        self.supertypes_of(sub)
            .into_iter()
            .any(|s| self.is_subtype_rec(s, target, visited))
    }

    /// Whether an argument of type `arg` is accepted where `param` is
    /// expected: identity, primitive widening, or reference assignability
    /// (subclass to superclass, class to implemented interface, array
    /// covariance, any array to `java.lang.Object`, null to any reference).
    pub fn argument_compatible(&self, arg: &TypeRef, param: &TypeRef) -> bool {
        if arg == param {
            return true;
        }
        match (arg, param) {
            (TypeRef::Primitive(a), TypeRef::Primitive(p)) => a.widens_to(*p),
            (TypeRef::Null, p) => p.is_reference(),
            (TypeRef::Named(a), TypeRef::Named(p)) => self.is_subtype(*a, *p),
            (TypeRef::Array(a), TypeRef::Array(p)) => {
                // arrays are covariant over reference element types only
                a.is_reference() && p.is_reference() && self.argument_compatible(a, p)
            }
            (TypeRef::Array(_), TypeRef::Named(p)) => Some(*p) == self.object_class,
            _ => false,
        }
    }

    /// Choose among same-named candidates by argument compatibility.
    ///
    /// An exact signature match wins outright. Otherwise the most specific
    /// structurally-compatible candidate wins; remaining ties break to the
    /// textually first declared overload. An empty compatible set yields
    /// `None`, never a guess.
    pub fn select_overload(&self, candidates: &[DefId], args: &[TypeRef]) -> Option<DefId> {
        let matching_arity: Vec<DefId> = candidates
            .iter()
            .copied()
            .filter(|id| {
                self.def(*id)
                    .as_method()
                    .map(|m| m.signature.arity() == args.len())
                    .unwrap_or_else(|| {
                        // a synthesized default constructor has no parameters
                        self.def(*id).is_constructor() && args.is_empty()
                    })
            })
            .collect();

        // exact match first
        for &id in &matching_arity {
            if let Some(method) = self.def(id).as_method() {
                if method.signature.parameters() == args {
                    return Some(id);
                }
            } else if args.is_empty() {
                return Some(id);
            }
        }

        let compatible: Vec<DefId> = matching_arity
            .into_iter()
            .filter(|&id| {
                let Some(method) = self.def(id).as_method() else {
                    return args.is_empty();
                };
                method
                    .signature
                    .parameters()
                    .iter()
                    .zip(args)
                    .all(|(param, arg)| self.argument_compatible(arg, param))
            })
            .collect();

        match compatible.len() {
            0 => None,
            1 => Some(compatible[0]),
            _ => self.most_specific(&compatible),
        }
    }

    /// The candidate whose parameters every other candidate accepts; ties
    /// break to the textually first declared overload.
    fn most_specific(&self, candidates: &[DefId]) -> Option<DefId> {
        let minimal: Vec<DefId> = candidates
            .iter()
            .copied()
            .filter(|&a| {
                candidates
                    .iter()
                    .all(|&b| a == b || !self.strictly_more_specific(b, a))
            })
            .collect();

        minimal
            .into_iter()
            .min_by_key(|&id| self.declaration_rank(id))
    }

    /// Whether `a`'s parameter list is accepted wherever `b`'s is expected
    /// but not vice versa
    fn strictly_more_specific(&self, a: DefId, b: DefId) -> bool {
        let (Some(ma), Some(mb)) = (self.def(a).as_method(), self.def(b).as_method()) else {
            return false;
        };
        let a_fits_b = ma
            .signature
            .parameters()
            .iter()
            .zip(mb.signature.parameters())
            .all(|(pa, pb)| self.argument_compatible(pa, pb));
        let b_fits_a = mb
            .signature
            .parameters()
            .iter()
            .zip(ma.signature.parameters())
            .all(|(pb, pa)| self.argument_compatible(pb, pa));
        a_fits_b && !b_fits_a
    }

    /// Textual declaration order: file position when available, otherwise
    /// the declaration index within the owning type
    fn declaration_rank(&self, id: DefId) -> (u32, u32, usize) {
        match self.def(id) {
            Definition::Method(m) => match &m.common.occurrence {
                Some(occ) => (occ.line, occ.column, m.declared_index),
                None => (u32::MAX, u32::MAX, m.declared_index),
            },
            _ => (u32::MAX, u32::MAX, usize::MAX),
        }
    }

    // ------------------------------------------------------------------
    // rendering
    // ------------------------------------------------------------------

    /// Human-readable name of a type
    pub fn type_display(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Primitive(p) => p.name().to_string(),
            TypeRef::Named(id) => self.def(*id).qualified_name().to_string(),
            TypeRef::Array(element) => format!("{}[]", self.type_display(element)),
            TypeRef::Null => "null".to_string(),
            TypeRef::Void => "void".to_string(),
            TypeRef::Unresolved(name) => name.clone(),
        }
    }

    /// Render a method's signature as `(T1, T2, ...)`
    pub fn signature_display(&self, id: DefId) -> String {
        match self.def(id).as_method() {
            Some(method) => method.signature.render(|t| self.type_display(t)),
            None => "()".to_string(),
        }
    }

    /// Fail-fast guard for query entry points: the per-file record, or the
    /// caller-misuse error when the file was never built
    pub fn require_file(&self, path: &Path) -> SemanticResult<&FileEntry> {
        self.file(path)
            .ok_or_else(|| SemanticError::FileNotBuilt(path.to_path_buf()))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SymbolTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymbolTable")
            .field("scopes", &self.scopes.len())
            .field("defs", &self.defs.len())
            .field("files", &self.files.len())
            .field("references", &self.references.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use javalens_core::Point;

    #[test]
    fn test_token_index_word_at() {
        let tokens = TokenIndex::new(vec![
            (
                Span::new(Point::new(0, 6), Point::new(0, 11)),
                "Shape".to_string(),
            ),
            (
                Span::new(Point::new(1, 8), Point::new(1, 13)),
                "sides".to_string(),
            ),
        ]);

        assert_eq!(tokens.word_at(Point::new(0, 6)), Some("Shape"));
        assert_eq!(tokens.word_at(Point::new(0, 10)), Some("Shape"));
        assert_eq!(tokens.word_at(Point::new(0, 11)), None, "one past the end");
        assert_eq!(tokens.word_at(Point::new(0, 5)), None, "whitespace before");
        assert_eq!(tokens.word_at(Point::new(1, 9)), Some("sides"));
        assert_eq!(tokens.word_at(Point::new(2, 0)), None);
    }

    #[test]
    fn test_empty_table_fails_fast_for_unknown_file() {
        let table = SymbolTable::new();
        let result = table.require_file(Path::new("Never.java"));
        assert!(matches!(result, Err(SemanticError::FileNotBuilt(_))));
    }

    #[test]
    fn test_alloc_scope_wires_parent_and_children() {
        let mut table = SymbolTable::new();
        let root = table.root();
        let pkg = table.alloc_scope(ScopeKind::Package, "demo", Some(root));
        let unit = table.alloc_scope(ScopeKind::CompilationUnit, "A.java", Some(pkg));

        assert_eq!(table.scope(unit).parent, Some(pkg));
        assert_eq!(table.scope(pkg).children, vec![unit]);
        assert_eq!(table.scope(pkg).parent, Some(root));
    }
}
