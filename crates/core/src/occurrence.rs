// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Source locations
//!
//! This module defines the point and span types used to address source
//! positions. Lines and columns are zero-based, matching the tree-sitter
//! convention used by the syntax layer.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A zero-based (line, column) position inside one file.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Point {
    /// Line in the file (zero-based)
    pub line: u32,
    /// Column on the line (zero-based)
    pub column: u32,
}

impl Point {
    /// Create a new point
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A half-open region of one file: `start` inclusive, `end` exclusive.
///
/// Spans produced from a syntax tree are properly nested: two spans either
/// are disjoint or one contains the other. That property is what lets the
/// scope index pick "the smallest containing span" as the innermost scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Span {
    /// Start position (inclusive)
    pub start: Point,
    /// End position (exclusive)
    pub end: Point,
}

impl Span {
    /// Create a new span
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Check whether the span contains a point.
    ///
    /// The end position is exclusive, so a token spanning columns 4..7
    /// contains columns 4, 5, and 6 but not 7.
    ///
    /// # Examples
    ///
    /// ```
    /// use javalens_core::{Point, Span};
    ///
    /// let span = Span::new(Point::new(2, 4), Point::new(2, 7));
    /// assert!(span.contains(Point::new(2, 4)));
    /// assert!(span.contains(Point::new(2, 6)));
    /// assert!(!span.contains(Point::new(2, 7)));
    /// assert!(!span.contains(Point::new(3, 0)));
    /// ```
    pub fn contains(&self, point: Point) -> bool {
        self.start <= point && point < self.end
    }

    /// Check whether this span fully contains another span.
    pub fn contains_span(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// A rough size measure used to order nested spans innermost-first.
    ///
    /// Lines dominate; the column delta breaks ties between spans starting
    /// and ending on the same lines.
    pub fn weight(&self) -> u64 {
        let lines = u64::from(self.end.line - self.start.line);
        let cols = i64::from(self.end.column) - i64::from(self.start.column);
        lines * 10_000 + (cols + 5_000) as u64
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A `(file, line, column)` point identity.
///
/// Occurrences are the engine's query keys and the recorded locations of
/// declarations and uses. Equality is structural. The file component is the
/// caller-supplied path value and is compared verbatim: two occurrences are
/// only comparable when their file values are equal by that identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Occurrence {
    /// Caller-supplied file identity
    pub file: PathBuf,
    /// Line in the file (zero-based)
    pub line: u32,
    /// Column on the line (zero-based)
    pub column: u32,
}

impl Occurrence {
    /// Create a new occurrence
    ///
    /// # Examples
    ///
    /// ```
    /// use javalens_core::Occurrence;
    ///
    /// let occ = Occurrence::new("Main.java", 16, 9);
    /// assert_eq!(occ.line, 16);
    /// assert_eq!(occ.column, 9);
    /// ```
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// The (line, column) part of the occurrence
    pub fn point(&self) -> Point {
        Point::new(self.line, self.column)
    }

    /// The file part of the occurrence
    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl std::fmt::Display for Occurrence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occurrence_equality_is_structural() {
        let a = Occurrence::new("A.java", 3, 7);
        let b = Occurrence::new("A.java", 3, 7);
        let c = Occurrence::new("B.java", 3, 7);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_occurrence_ordering_is_file_then_position() {
        let a = Occurrence::new("A.java", 9, 0);
        let b = Occurrence::new("B.java", 1, 0);
        let c = Occurrence::new("B.java", 1, 4);

        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_span_containment_at_boundaries() {
        // the identifier "len" at line 5, columns 8..11
        let span = Span::new(Point::new(5, 8), Point::new(5, 11));

        assert!(span.contains(Point::new(5, 8)), "first character");
        assert!(span.contains(Point::new(5, 10)), "last character");
        assert!(!span.contains(Point::new(5, 11)), "one past the end");
        assert!(!span.contains(Point::new(5, 7)), "one before the start");
    }

    #[test]
    fn test_span_contains_multiline() {
        let span = Span::new(Point::new(2, 10), Point::new(6, 1));

        assert!(span.contains(Point::new(4, 0)));
        assert!(span.contains(Point::new(2, 10)));
        assert!(!span.contains(Point::new(6, 1)));
        assert!(!span.contains(Point::new(2, 9)));
    }

    #[test]
    fn test_span_contains_span_nesting() {
        let outer = Span::new(Point::new(0, 0), Point::new(20, 0));
        let inner = Span::new(Point::new(3, 4), Point::new(5, 8));

        assert!(outer.contains_span(&inner));
        assert!(!inner.contains_span(&outer));
        assert!(outer.contains_span(&outer));
    }

    #[test]
    fn test_span_weight_orders_nested_spans() {
        let outer = Span::new(Point::new(0, 0), Point::new(20, 0));
        let inner = Span::new(Point::new(3, 4), Point::new(5, 8));
        let single_line = Span::new(Point::new(3, 4), Point::new(3, 30));

        assert!(inner.weight() < outer.weight());
        assert!(single_line.weight() < inner.weight());
    }

    #[test]
    fn test_occurrence_serde_round_trip() {
        let occ = Occurrence::new("pkg/Main.java", 12, 3);
        let json = serde_json::to_string(&occ).unwrap();
        let back: Occurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(occ, back);
    }
}
