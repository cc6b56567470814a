// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details
//
//! # javalens - Semantic Analysis Layer
//!
//! This crate builds a cross-file symbol table from parsed Java sources and
//! answers, for any identifier occurrence, "which declaration does this
//! refer to?".
//!
//! ## Overview
//!
//! Construction is a three-pass batch:
//!
//! 1. **Build** ([`builder::TableBuilder`]): one walk per file creates
//!    scopes and definitions. Cross-file names (superclasses, interfaces,
//!    declared types) are recorded as strings.
//! 2. **Link** ([`linker::Linker`]): interns the platform provider's
//!    surface, resolves inheritance names against the completed registry,
//!    and wires the live subclass/implementor back-links. Forward and
//!    circular references between files are legal.
//! 3. **Resolve** ([`resolver::ReferenceResolver`]): one more walk per
//!    file resolves every identifier use into a recorded [`Reference`],
//!    typing expressions along the way to pick among method overloads.
//!
//! The finished [`SymbolTable`] is immutable; [`QueryEngine`] serves
//! point queries over it from any number of threads without locking. When
//! the analyzed file set changes, discard the table and rebuild - partial
//! mutation of a live table is deliberately unsupported.
//!
//! ## Example
//!
//! ```rust
//! use javalens_platform::StaticPlatform;
//! use javalens_semantic::{build_table, QueryEngine};
//! use javalens_syntax::SourceFile;
//! use javalens_core::Occurrence;
//!
//! let file = SourceFile::parse(
//!     "Counter.java",
//!     "class Counter {\n    int count;\n    int get() { return count; }\n}\n",
//! ).unwrap();
//!
//! let table = build_table(&[file], &StaticPlatform::new()).unwrap();
//! let engine = QueryEngine::new(&table);
//!
//! // the `count` inside `get()` resolves to the field declared on line 1
//! let def = engine
//!     .get_definition("count", &Occurrence::new("Counter.java", 2, 23))
//!     .unwrap()
//!     .expect("count resolves");
//! assert_eq!(def.occurrence().unwrap().line, 1);
//! ```

pub mod builder;
pub mod definition;
pub mod error;
pub mod index;
pub mod linker;
pub mod query;
pub mod resolver;
pub mod scope;
pub mod signature;
pub mod table;

pub use definition::{
    ClassDef, ClassOrigin, DefCommon, DefId, DefaultConstructorDef, Definition, LabelDef,
    MethodDef, Reference, TypeRef, VariableDef, VariableKind,
};
pub use error::{SemanticError, SemanticResult};
pub use index::ScopeIndex;
pub use query::QueryEngine;
pub use scope::{Scope, ScopeId, ScopeKind};
pub use signature::MethodSignature;
pub use table::{FileEntry, Imports, SymbolTable, TokenIndex};

use javalens_platform::TypeProvider;
use javalens_syntax::SourceFile;

/// Build a symbol table from a set of parsed files.
///
/// Files are built independently (any order), then linked, then every
/// reference is resolved. The returned table is complete and read-only.
pub fn build_table(
    files: &[SourceFile],
    provider: &dyn TypeProvider,
) -> SemanticResult<SymbolTable> {
    let mut table = SymbolTable::new();
    for file in files {
        builder::TableBuilder::build(&mut table, file)?;
    }
    linker::Linker::link(&mut table, provider)?;
    for file in files {
        resolver::ReferenceResolver::resolve(&mut table, file)?;
    }
    table.finish();
    Ok(table)
}
