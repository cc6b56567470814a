// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Testing utilities for javalens
//!
//! This crate provides common testing components:
//! - one-call parsing and table building over in-memory Java sources
//! - occurrence locators that turn "the 2nd `count` in this file" into a
//!   `(file, line, column)` point, so tests never hand-count columns
//! - a mock platform with a builder for controlled external surfaces

pub mod locate;
pub mod mock_platform;

pub use locate::{occurrence_of, occurrence_of_nth};
pub use mock_platform::MockPlatform;

use javalens_core::Occurrence;
use javalens_platform::{StaticPlatform, TypeProvider};
use javalens_semantic::{build_table, SemanticResult, SymbolTable};
use javalens_syntax::SourceFile;

/// Initialize test logging once; safe to call from every test
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// Parse in-memory `(path, source)` pairs into source files
pub fn parse_sources(sources: &[(&str, &str)]) -> Vec<SourceFile> {
    sources
        .iter()
        .map(|(path, text)| {
            SourceFile::parse(*path, *text).unwrap_or_else(|e| panic!("parse {path}: {e}"))
        })
        .collect()
}

/// Parse and build a symbol table over the default platform surface
pub fn build_fixture(sources: &[(&str, &str)]) -> SemanticResult<SymbolTable> {
    init_tracing();
    build_table(&parse_sources(sources), &StaticPlatform::new())
}

/// Parse and build a symbol table over a caller-controlled platform
pub fn build_fixture_with(
    sources: &[(&str, &str)],
    provider: &dyn TypeProvider,
) -> SemanticResult<SymbolTable> {
    init_tracing();
    build_table(&parse_sources(sources), provider)
}

/// Shorthand for building a single-file fixture
pub fn build_single(path: &str, source: &str) -> SemanticResult<SymbolTable> {
    build_fixture(&[(path, source)])
}

/// The occurrence of the first `needle` in `source`, for file `path`
pub fn occ(path: &str, source: &str, needle: &str) -> Occurrence {
    occurrence_of(path, source, needle)
}

/// The occurrence of the nth (1-based) `needle` in `source`
pub fn occ_nth(path: &str, source: &str, needle: &str, nth: usize) -> Occurrence {
    occurrence_of_nth(path, source, needle, nth)
}
