// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # Error types for symbol table construction and queries
//!
//! Build-phase errors are loud: a malformed input tree or a duplicate
//! declaration aborts the build, because a silently wrong symbol table is
//! worse than no table. Query-phase errors only cover caller misuse
//! (querying a file that was never built); an undeclared name is an
//! ordinary `None` result, never an error.

use javalens_core::Namespace;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for semantic operations
pub type SemanticResult<T> = Result<T, SemanticError>;

/// Errors that can occur while building or querying the symbol table
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SemanticError {
    /// The queried occurrence lies in a file the table was never built for
    #[error("File was never built into this table: {}", .0.display())]
    FileNotBuilt(PathBuf),

    /// The upstream parser broke its contract (missing child, error node)
    #[error("Malformed syntax tree in {}: {found} node is missing {expected}", .file.display())]
    MalformedTree {
        file: PathBuf,
        found: String,
        expected: String,
    },

    /// Two declarations of the same name in one scope and namespace
    #[error("Duplicate {namespace} name '{name}' in scope '{scope}'")]
    DuplicateDefinition {
        name: String,
        namespace: Namespace,
        scope: String,
    },

    /// The queried occurrence lies outside the built file's extent
    #[error("Occurrence out of range: {0}")]
    OccurrenceOutOfRange(javalens_core::Occurrence),

    /// An internal scope handle did not resolve; indicates a corrupt table
    #[error("Invalid scope reference: scope {0}")]
    InvalidScope(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_not_built() {
        let err = SemanticError::FileNotBuilt(PathBuf::from("Ghost.java"));
        let msg = format!("{}", err);
        assert!(msg.contains("Ghost.java"));
        assert!(msg.contains("never built"));
    }

    #[test]
    fn test_error_display_duplicate_definition() {
        let err = SemanticError::DuplicateDefinition {
            name: "count".to_string(),
            namespace: Namespace::Value,
            scope: "Counter".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("count"));
        assert!(msg.contains("value"));
        assert!(msg.contains("Counter"));
    }

    #[test]
    fn test_error_display_malformed_tree() {
        let err = SemanticError::MalformedTree {
            file: PathBuf::from("A.java"),
            found: "class_declaration".to_string(),
            expected: "name".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("A.java"));
        assert!(msg.contains("class_declaration"));
        assert!(msg.contains("name"));
    }
}
