// Copyright (c) 2025 the javalens authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Error types for platform lookups

use serde::Serialize;
use thiserror::Error;

/// Result type alias for platform operations
pub type PlatformResult<T> = Result<T, PlatformError>;

/// Errors that can occur while loading or querying platform type data
#[derive(Debug, Error, Clone, Serialize)]
pub enum PlatformError {
    /// Requested type is not part of this provider's surface
    #[error("Type '{0}' not known to the platform")]
    TypeNotFound(String),

    /// A YAML type description failed to deserialize
    #[error("Invalid platform description: {0}")]
    InvalidDescription(String),
}
