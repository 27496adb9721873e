//! Domain objects owned or referenced by targets.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Collection`] | Ordered, type-checked entity container |
//! | [`ResourceCollection`] | Resource container with URL and type lookups |
//! | [`Resource`] | Network load or document discovered under a target |
//! | [`Script`] | Script not tied to an addressable resource |
//! | [`Frame`] | Page frame with its current main resource |
//! | [`ExecutionContext`] | Runtime evaluation scope of a target |
//!
//! Resources, scripts and frames are shared as `Arc`s. A resource's owner
//! back-reference is non-owning and only set through
//! [`Target::adopt_resource`](crate::Target::adopt_resource).

// ============================================================================
// Submodules
// ============================================================================

/// Type-checked collections.
pub mod collection;

/// Execution contexts.
pub mod execution;

/// Frames.
pub mod frame;

/// Resources and resource types.
pub mod resource;

/// Scripts.
pub mod script;

// ============================================================================
// Re-exports
// ============================================================================

pub use collection::{Collection, Entity, EntityKey, EntityKind, ResourceCollection, TypeVerifier};
pub use execution::ExecutionContext;
pub use frame::Frame;
pub use resource::{Resource, ResourceType};
pub use script::Script;
