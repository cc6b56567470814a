// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Primitive types and the widening table
//!
//! The widening table is fixed at compile time, immutable, and
//! *directional*: `byte` widens to `int`, but `int` never narrows back to
//! `byte`. Overload scoring treats a widened match as strictly worse than
//! an identical match.
//!
//! The permitted conversions are the Java widening primitive conversions
//! (JLS 5.1.2). Of note: `char` widens to `int` but not to `short`, and
//! nothing widens to `char`; `boolean` takes part in no conversion at all.

use serde::{Deserialize, Serialize};

/// One of the eight Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Short,
    Char,
    Int,
    Long,
    Float,
    Double,
}

/// Widening targets per source type. Exhaustive over every primitive pair:
/// a pair absent here is not a permitted conversion.
fn widening_targets(from: PrimitiveType) -> &'static [PrimitiveType] {
    use PrimitiveType::*;
    match from {
        Boolean => &[],
        Byte => &[Short, Int, Long, Float, Double],
        Short => &[Int, Long, Float, Double],
        Char => &[Int, Long, Float, Double],
        Int => &[Long, Float, Double],
        Long => &[Float, Double],
        Float => &[Double],
        Double => &[],
    }
}

impl PrimitiveType {
    /// All primitive types, in rank order
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Short,
        PrimitiveType::Char,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    /// The Java keyword for this type
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Short => "short",
            PrimitiveType::Char => "char",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    /// Parse a Java primitive keyword
    pub fn from_name(name: &str) -> Option<PrimitiveType> {
        match name {
            "boolean" => Some(PrimitiveType::Boolean),
            "byte" => Some(PrimitiveType::Byte),
            "short" => Some(PrimitiveType::Short),
            "char" => Some(PrimitiveType::Char),
            "int" => Some(PrimitiveType::Int),
            "long" => Some(PrimitiveType::Long),
            "float" => Some(PrimitiveType::Float),
            "double" => Some(PrimitiveType::Double),
            _ => None,
        }
    }

    /// Whether this type participates in numeric promotion
    pub fn is_numeric(&self) -> bool {
        !matches!(self, PrimitiveType::Boolean)
    }

    /// Whether a value of this type is accepted where `target` is expected.
    ///
    /// Directional: `a.widens_to(b)` says nothing about `b.widens_to(a)`.
    /// Identity is not a widening; `Int.widens_to(Int)` is `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use javalens_platform::PrimitiveType;
    ///
    /// assert!(PrimitiveType::Byte.widens_to(PrimitiveType::Double));
    /// assert!(PrimitiveType::Char.widens_to(PrimitiveType::Int));
    /// assert!(!PrimitiveType::Char.widens_to(PrimitiveType::Short));
    /// assert!(!PrimitiveType::Int.widens_to(PrimitiveType::Char));
    /// ```
    pub fn widens_to(self, target: PrimitiveType) -> bool {
        widening_targets(self).contains(&target)
    }

    /// Unary numeric promotion: byte, short, and char promote to int;
    /// everything else keeps its type.
    pub fn unary_promote(self) -> PrimitiveType {
        match self {
            PrimitiveType::Byte | PrimitiveType::Short | PrimitiveType::Char => PrimitiveType::Int,
            other => other,
        }
    }

    /// Binary numeric promotion: the wider of the two operands after unary
    /// promotion, so `long + float` is `float` and `char + char` is `int`.
    ///
    /// Returns `None` when either operand is `boolean`, which has no
    /// numeric promotion.
    pub fn binary_promote(a: PrimitiveType, b: PrimitiveType) -> Option<PrimitiveType> {
        use PrimitiveType::*;

        if !a.is_numeric() || !b.is_numeric() {
            return None;
        }
        if a == Double || b == Double {
            Some(Double)
        } else if a == Float || b == Float {
            Some(Float)
        } else if a == Long || b == Long {
            Some(Long)
        } else {
            Some(Int)
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
