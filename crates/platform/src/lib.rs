// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # javalens - Platform Type Information
//!
//! Types that are referenced by analyzed sources but defined outside the
//! analyzed file set (library and runtime types) are known only through
//! their public surface: a qualified name, a supertype, interfaces, and
//! member signatures. This crate provides that surface.
//!
//! ## Overview
//!
//! - [`ExternalClass`] / [`ExternalMethod`] / [`ExternalField`]: the
//!   plain-data description of a non-source type.
//! - [`TypeProvider`]: the capability for resolving such descriptions by
//!   qualified name. The symbol table interns a provider's surface at link
//!   time, so resolution code downstream never distinguishes "from source"
//!   from "from the platform".
//! - [`StaticPlatform`]: a built-in provider covering the `java.lang` core
//!   plus a few `java.io`/`java.util` types, extensible from a YAML
//!   description.
//! - [`PrimitiveType`]: the eight primitive types and the fixed,
//!   directional widening table that drives overload scoring.
//!
//! ## Examples
//!
//! ```rust
//! use javalens_platform::{StaticPlatform, TypeProvider, PrimitiveType};
//!
//! let platform = StaticPlatform::new();
//! let object = platform.resolve_type("java.lang.Object").unwrap();
//! assert!(object.superclass.is_none());
//!
//! // char widens to int but not to short
//! assert!(PrimitiveType::Char.widens_to(PrimitiveType::Int));
//! assert!(!PrimitiveType::Char.widens_to(PrimitiveType::Short));
//! ```

pub mod error;
pub mod external;
pub mod primitives;
pub mod provider;
pub mod r#static;

pub use error::{PlatformError, PlatformResult};
pub use external::{ExternalClass, ExternalField, ExternalMethod};
pub use primitives::PrimitiveType;
pub use provider::TypeProvider;
pub use r#static::StaticPlatform;
