// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Query engine
//!
//! The public read API over a completed symbol table. Queries never mutate
//! the table, so any number of readers can share one engine.
//!
//! Failure semantics follow the table's error taxonomy: an undeclared name
//! is `Ok(None)`, while querying a file that was never built (or a point
//! outside the file) is caller misuse and fails fast with an error.

use crate::definition::{DefId, Definition, Reference};
use crate::error::{SemanticError, SemanticResult};
use crate::table::SymbolTable;
use javalens_core::{Namespace, Occurrence};

/// Read-only resolution queries against a built symbol table
pub struct QueryEngine<'t> {
    table: &'t SymbolTable,
}

impl<'t> QueryEngine<'t> {
    /// Create an engine over a completed table
    pub fn new(table: &'t SymbolTable) -> Self {
        Self { table }
    }

    /// The underlying table
    pub fn table(&self) -> &SymbolTable {
        self.table
    }

    /// Which declaration does this identifier occurrence refer to?
    ///
    /// The namespace is taken from the reference recorded at the
    /// occurrence when there is one (the resolver knows the syntactic
    /// context); otherwise value, type, and label namespaces are tried in
    /// that order, and finally the name is treated as a possibly-qualified
    /// external type reference.
    ///
    /// Returns `Ok(None)` for names that are genuinely undeclared
    /// anywhere reachable.
    pub fn get_definition(
        &self,
        name: &str,
        occurrence: &Occurrence,
    ) -> SemanticResult<Option<&'t Definition>> {
        Ok(self
            .definition_id(name, occurrence)?
            .map(|id| self.table.def(id)))
    }

    /// Like [`get_definition`](Self::get_definition), but with the
    /// namespace supplied by the caller's syntactic context
    pub fn get_definition_in_namespace(
        &self,
        name: &str,
        namespace: Namespace,
        occurrence: &Occurrence,
    ) -> SemanticResult<Option<&'t Definition>> {
        let entry = self.table.require_file(&occurrence.file)?;
        let scope = entry
            .index
            .lookup(occurrence.point())
            .ok_or_else(|| SemanticError::OccurrenceOutOfRange(occurrence.clone()))?;

        Ok(self
            .table
            .lookup(namespace, scope, name, Some(occurrence))
            .map(|id| self.table.def(id)))
    }

    /// Every recorded reference resolving to the same definition this
    /// occurrence does, in file order. The declaration's own identifier
    /// counts as a reference.
    pub fn get_references(
        &self,
        name: &str,
        occurrence: &Occurrence,
    ) -> SemanticResult<Vec<&'t Reference>> {
        match self.definition_id(name, occurrence)? {
            Some(id) => Ok(self.table.references_to(id)),
            None => Ok(Vec::new()),
        }
    }

    /// The identifier token text whose span contains the point, or `None`
    /// when the point falls on whitespace or punctuation. A pure
    /// tokenization lookup, independent of resolution.
    pub fn get_word_at_occurrence(
        &self,
        occurrence: &Occurrence,
    ) -> SemanticResult<Option<&'t str>> {
        let entry = self.table.require_file(&occurrence.file)?;
        let unit_span = self.table.scope(entry.unit_scope).span;
        if !unit_span.contains(occurrence.point()) && unit_span.end != occurrence.point() {
            return Err(SemanticError::OccurrenceOutOfRange(occurrence.clone()));
        }
        Ok(entry.tokens.word_at(occurrence.point()))
    }

    // ------------------------------------------------------------------

    fn definition_id(&self, name: &str, occurrence: &Occurrence) -> SemanticResult<Option<DefId>> {
        let entry = self.table.require_file(&occurrence.file)?;

        // qualified names go straight to the cross-file registry
        if name.contains('.') {
            return Ok(self.table.class_by_qualified_name(name));
        }

        // the resolver already decided what the token at this point means
        if let Some((span, text)) = entry.tokens.token_at(occurrence.point()) {
            if text == name {
                let start = Occurrence::new(occurrence.file.clone(), span.start.line, span.start.column);
                if let Some(reference) = self.table.reference_at(&start) {
                    if reference.name == name {
                        if let Some(resolved) = reference.resolved {
                            return Ok(Some(resolved));
                        }
                    }
                }
            }
        }

        let scope = entry
            .index
            .lookup(occurrence.point())
            .ok_or_else(|| SemanticError::OccurrenceOutOfRange(occurrence.clone()))?;

        // no syntactic context: value, then type, then label
        if let Some(found) = self.table.lookup(Namespace::Value, scope, name, Some(occurrence)) {
            return Ok(Some(found));
        }
        if let Some(found) = self.unique_method(scope, name) {
            return Ok(Some(found));
        }
        if let Some(found) = self.table.lookup(Namespace::Type, scope, name, Some(occurrence)) {
            return Ok(Some(found));
        }
        if let Some(found) = self.table.lookup(Namespace::Label, scope, name, None) {
            return Ok(Some(found));
        }

        // finally, the external surface (imports, java.lang, on-demand)
        Ok(self.table.resolve_type_name(scope, name, Some(occurrence)))
    }

    /// A method name without call context resolves only when unambiguous
    fn unique_method(&self, scope: crate::scope::ScopeId, name: &str) -> Option<DefId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = self.table.scope(id);
            if s.kind.is_class_like() {
                if let Some(class) = s.owner {
                    let candidates = self.table.method_candidates(class, name);
                    match candidates.len() {
                        0 => {}
                        1 => return Some(candidates[0]),
                        // overloaded and no argument types to judge by
                        _ => return None,
                    }
                }
            }
            current = s.parent;
        }
        None
    }
}

impl std::fmt::Debug for QueryEngine<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine").finish_non_exhaustive()
    }
}
