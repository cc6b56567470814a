// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Scope index
//!
//! Per-file mapping from a source position to the innermost enclosing
//! scope. Spans coming out of one syntax tree are properly nested (two
//! spans are disjoint or one contains the other), so "the containing span
//! with the latest start" is always the deepest scope.
//!
//! Lookup is a binary search over spans sorted by start position, followed
//! by a short backward scan over earlier-starting spans; the scan skips
//! finished siblings and stops at the first span that contains the point.

use crate::scope::ScopeId;
use javalens_core::{Point, Span};
use serde::{Deserialize, Serialize};

/// Sorted span-to-scope index for one file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScopeIndex {
    /// Entries sorted by (start, weight): outer scopes before inner scopes
    /// that start at the same point
    entries: Vec<(Span, ScopeId)>,
}

impl ScopeIndex {
    /// Build an index from every scope span of one file
    pub fn new(mut entries: Vec<(Span, ScopeId)>) -> Self {
        entries.sort_by(|(a, _), (b, _)| {
            a.start
                .cmp(&b.start)
                .then_with(|| b.weight().cmp(&a.weight()))
        });
        Self { entries }
    }

    /// Number of indexed scopes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The innermost scope containing the point.
    ///
    /// Returns `None` only for points outside every indexed span, which
    /// cannot happen for in-range queries because the compilation-unit
    /// scope spans the whole file.
    pub fn lookup(&self, point: Point) -> Option<ScopeId> {
        // first entry starting after the point
        let partition = self
            .entries
            .partition_point(|(span, _)| span.start <= point);

        // Walk backward: the first containing span has the latest start of
        // all containing spans, and proper nesting makes it the innermost.
        self.entries[..partition]
            .iter()
            .rev()
            .find(|(span, _)| span.contains(point))
            .map(|(_, scope)| *scope)
    }
}
