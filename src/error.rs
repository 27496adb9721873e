//! Error types for the target registry.
//!
//! All errors raised by this crate are local and synchronous: they are
//! surfaced to the immediate caller and never retried here. Recovery, if
//! any, belongs to the connection-management layer above.
//!
//! # Usage
//!
//! ```ignore
//! use inspector_targets::{Error, Result};
//!
//! fn register(target: &Target, resource: Arc<Resource>) -> Result<()> {
//!     target.adopt_resource(resource)?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Collection | [`Error::DuplicateEntity`], [`Error::InvalidType`] |
//! | Ownership | [`Error::StaleBackReference`], [`Error::AlreadyAdopted`], [`Error::DuplicateTarget`] |
//! | Usage | [`Error::InvalidOperation`] |
//! | Configuration | [`Error::Config`], [`Error::Io`], [`Error::Json`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::identifiers::{ResourceId, TargetId};
use crate::model::{EntityKind, TypeVerifier};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Collection Errors
    // ========================================================================
    /// Entity already present in its collection.
    ///
    /// The collection is left unchanged.
    #[error("Duplicate {kind}: {key}")]
    DuplicateEntity {
        /// Kind of the rejected entity.
        kind: EntityKind,
        /// Identity key of the rejected entity.
        key: String,
    },

    /// Entity kind rejected by the collection's type verifier.
    ///
    /// A contract violation by the caller; the collection is left unchanged.
    #[error("Invalid type: collection accepts {expected}, got {found}")]
    InvalidType {
        /// What the collection accepts.
        expected: TypeVerifier,
        /// Kind of the rejected entity.
        found: EntityKind,
    },

    // ========================================================================
    // Ownership Errors
    // ========================================================================
    /// Connection is already bound to a live target.
    #[error("Connection already bound to target '{target_id}'")]
    StaleBackReference {
        /// Identifier of the target currently owning the connection.
        target_id: TargetId,
    },

    /// Resource was already adopted by another target.
    #[error("Resource {resource_id} already adopted by target '{target_id}'")]
    AlreadyAdopted {
        /// The resource being re-adopted.
        resource_id: ResourceId,
        /// Identifier of the current owner.
        target_id: TargetId,
    },

    /// A target with this identifier is already registered.
    #[error("Target already registered: '{target_id}'")]
    DuplicateTarget {
        /// The conflicting identifier.
        target_id: TargetId,
    },

    // ========================================================================
    // Usage Errors
    // ========================================================================
    /// Operation not supported by this kind of target.
    #[error("Invalid operation: {message}")]
    InvalidOperation {
        /// Description of the refused operation.
        message: String,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// IO error while reading configuration.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a duplicate entity error.
    #[inline]
    pub fn duplicate(kind: EntityKind, key: impl Into<String>) -> Self {
        Self::DuplicateEntity {
            kind,
            key: key.into(),
        }
    }

    /// Creates an invalid type error.
    #[inline]
    pub fn invalid_type(expected: TypeVerifier, found: EntityKind) -> Self {
        Self::InvalidType { expected, found }
    }

    /// Creates a stale back-reference error.
    #[inline]
    pub fn stale_back_reference(target_id: TargetId) -> Self {
        Self::StaleBackReference { target_id }
    }

    /// Creates an already-adopted error.
    #[inline]
    pub fn already_adopted(resource_id: ResourceId, target_id: TargetId) -> Self {
        Self::AlreadyAdopted {
            resource_id,
            target_id,
        }
    }

    /// Creates a duplicate target error.
    #[inline]
    pub fn duplicate_target(target_id: TargetId) -> Self {
        Self::DuplicateTarget { target_id }
    }

    /// Creates an invalid operation error.
    #[inline]
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::InvalidOperation {
            message: message.into(),
        }
    }

    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if an entity or target was already registered.
    #[inline]
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::DuplicateEntity { .. } | Self::DuplicateTarget { .. }
        )
    }

    /// Returns `true` if the caller broke an API precondition.
    ///
    /// These are programming errors, not environment variations.
    #[inline]
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::InvalidType { .. }
                | Self::StaleBackReference { .. }
                | Self::AlreadyAdopted { .. }
                | Self::InvalidOperation { .. }
        )
    }

    /// Returns `true` if this is a configuration loading error.
    #[inline]
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(self, Self::Config { .. } | Self::Io(_) | Self::Json(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
