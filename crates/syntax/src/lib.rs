// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # javalens - Syntax Layer
//!
//! This crate wraps the external parser collaborator (tree-sitter with the
//! Java grammar) behind the small capability the table builder needs: parse
//! a file, then navigate nodes via `kind()`, `child()`, `next_sibling()`,
//! `parent()` and their source spans.
//!
//! The engine never assumes a particular concrete tree implementation
//! beyond that capability; everything downstream works on [`SourceFile`]
//! plus plain [`tree_sitter::Node`] values.
//!
//! ## Usage
//!
//! ```rust
//! use javalens_syntax::SourceFile;
//!
//! let file = SourceFile::parse("Point.java", "class Point { int x; }").unwrap();
//! let root = file.root();
//! assert_eq!(root.kind(), "program");
//! ```

use javalens_core::{Occurrence, Point, Span};
use thiserror::Error;
use tree_sitter::{Language, Node, Parser, Tree};

/// Result type alias for syntax operations
pub type SyntaxResult<T> = Result<T, SyntaxError>;

/// Errors that can occur while parsing a source file
#[derive(Debug, Error)]
pub enum SyntaxError {
    /// The bundled Java grammar is incompatible with the linked tree-sitter
    #[error("Failed to load Java grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// tree-sitter returned no tree (cancelled or invalid input)
    #[error("Failed to parse '{0}'")]
    Parse(String),
}

/// The tree-sitter language for Java
pub fn java_language() -> Language {
    tree_sitter_java::LANGUAGE.into()
}

/// A parsed compilation unit: the caller-supplied path, the source text,
/// and the syntax tree over it.
///
/// The path value is the file identity used as a map key throughout the
/// engine; it is never touched as a filesystem path.
pub struct SourceFile {
    path: std::path::PathBuf,
    text: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse Java source text into a [`SourceFile`].
    ///
    /// tree-sitter is error-tolerant, so this succeeds even for source with
    /// syntax errors; the resulting tree then contains `ERROR` nodes, which
    /// the table builder treats as malformed input.
    pub fn parse(path: impl Into<std::path::PathBuf>, text: impl Into<String>) -> SyntaxResult<Self> {
        let path = path.into();
        let text = text.into();

        let mut parser = Parser::new();
        parser.set_language(&java_language())?;
        let tree = parser
            .parse(&text, None)
            .ok_or_else(|| SyntaxError::Parse(path.display().to_string()))?;

        Ok(Self { path, text, tree })
    }

    /// The caller-supplied file identity
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// The raw source text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The root node of the syntax tree (kind `program`)
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// The source text covered by a node
    pub fn node_text(&self, node: Node<'_>) -> &str {
        &self.text[node.byte_range()]
    }

    /// The smallest named node containing the given point, if any
    pub fn node_at(&self, point: Point) -> Option<Node<'_>> {
        let p = to_ts_point(point);
        self.root().named_descendant_for_point_range(p, p)
    }

    /// The span of a node, as an [`Occurrence`] in this file
    pub fn occurrence_of(&self, node: Node<'_>) -> Occurrence {
        let start = node.start_position();
        Occurrence::new(self.path.clone(), start.row as u32, start.column as u32)
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("bytes", &self.text.len())
            .finish()
    }
}

/// Convert a javalens point to a tree-sitter point
pub fn to_ts_point(point: Point) -> tree_sitter::Point {
    tree_sitter::Point {
        row: point.line as usize,
        column: point.column as usize,
    }
}

/// The source span covered by a node (zero-based, end exclusive)
pub fn span_of(node: Node<'_>) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span::new(
        Point::new(start.row as u32, start.column as u32),
        Point::new(end.row as u32, end.column as u32),
    )
}

/// Find the first child with the given node kind
pub fn child_of_kind<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

/// Collect all named children of a node
pub fn named_children<'a>(node: Node<'a>) -> Vec<Node<'a>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Whether a node kind is an identifier-like leaf token
pub fn is_identifier_kind(kind: &str) -> bool {
    matches!(kind, "identifier" | "type_identifier")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_class() {
        let file = SourceFile::parse("A.java", "class A {}").unwrap();
        assert_eq!(file.root().kind(), "program");

        let class = file.root().named_child(0).unwrap();
        assert_eq!(class.kind(), "class_declaration");

        let name = class.child_by_field_name("name").unwrap();
        assert_eq!(file.node_text(name), "A");
    }

    #[test]
    fn test_span_of_identifier() {
        let file = SourceFile::parse("A.java", "class Widget {}").unwrap();
        let class = file.root().named_child(0).unwrap();
        let name = class.child_by_field_name("name").unwrap();

        let span = span_of(name);
        assert_eq!(span.start, Point::new(0, 6));
        assert_eq!(span.end, Point::new(0, 12));
    }

    #[test]
    fn test_node_at_point() {
        let src = "class A {\n    int count;\n}\n";
        let file = SourceFile::parse("A.java", src).unwrap();

        let node = file.node_at(Point::new(1, 8)).unwrap();
        assert_eq!(node.kind(), "identifier");
        assert_eq!(file.node_text(node), "count");
    }

    #[test]
    fn test_parse_is_error_tolerant() {
        let file = SourceFile::parse("Broken.java", "class {{{").unwrap();
        assert!(file.root().has_error());
    }

    #[test]
    fn test_child_of_kind() {
        let file = SourceFile::parse("A.java", "class A extends B {}").unwrap();
        let class = file.root().named_child(0).unwrap();
        assert!(child_of_kind(class, "superclass").is_some());
        assert!(child_of_kind(class, "super_interfaces").is_none());
    }
}
