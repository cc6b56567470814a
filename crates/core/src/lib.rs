// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # javalens - Core Types
//!
//! This crate provides the shared vocabulary of the javalens workspace:
//! source locations ([`Occurrence`], [`Span`], [`Point`]) and the
//! [`Namespace`] discriminator that keeps type, value, and label names
//! independent of each other.
//!
//! ## Occurrences
//!
//! An [`Occurrence`] is a `(file, line, column)` point identity. It is used
//! both as a query key ("what does the identifier at this point refer to?")
//! and as the recorded location of a declaration or use. Equality is
//! structural; two occurrences in different files never compare equal.
//!
//! ```rust
//! use javalens_core::Occurrence;
//!
//! let occ = Occurrence::new("src/Shape.java", 4, 11);
//! assert_eq!(occ, Occurrence::new("src/Shape.java", 4, 11));
//! assert_ne!(occ, Occurrence::new("src/Circle.java", 4, 11));
//! ```
//!
//! ## Namespaces
//!
//! Java keeps type names, value names (fields, locals, parameters) and
//! statement labels in independent name spaces: the same text may denote a
//! class, a variable, and a label at the same time without conflict. Every
//! name lookup therefore carries a [`Namespace`].

pub mod occurrence;

pub use occurrence::{Occurrence, Point, Span};

use serde::{Deserialize, Serialize};

/// One of the three independent name spaces of a scope.
///
/// A name inserted into a scope is unique within its own namespace only;
/// `Foo` the class, `Foo` the variable, and `Foo` the label may coexist in
/// a single scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Namespace {
    /// Class and interface names
    Type,
    /// Fields, local variables, and parameters
    Value,
    /// Statement labels (`outer: for (...)`)
    Label,
}

impl Namespace {
    /// Get namespace name as string
    pub fn name(&self) -> &'static str {
        match self {
            Namespace::Type => "type",
            Namespace::Value => "value",
            Namespace::Label => "label",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
