// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Type provider capability
//!
//! The [`TypeProvider`] trait abstracts where descriptions of non-source
//! types come from. The semantic layer's linker interns a provider's whole
//! surface before the query phase starts, which keeps queries read-only and
//! lock-free.

use crate::external::ExternalClass;

/// Capability for resolving non-source types by qualified name.
///
/// Implementations must be pure lookups: the same name always yields the
/// same description, and `list_types` enumerates exactly the names
/// `resolve_type` would accept.
///
/// # Examples
///
/// ```rust
/// use javalens_platform::{StaticPlatform, TypeProvider};
///
/// fn knows_string(provider: &impl TypeProvider) -> bool {
///     provider.resolve_type("java.lang.String").is_some()
/// }
///
/// assert!(knows_string(&StaticPlatform::new()));
/// ```
pub trait TypeProvider: Send + Sync {
    /// Resolve a fully qualified type name to its public surface.
    ///
    /// Returns `None` when the type is not part of this provider's surface;
    /// that is an ordinary outcome, not an error.
    fn resolve_type(&self, qualified_name: &str) -> Option<ExternalClass>;

    /// Every type this provider can describe.
    fn list_types(&self) -> Vec<ExternalClass>;
}
