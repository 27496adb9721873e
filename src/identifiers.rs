//! Type-safe identifiers for inspector entities.
//!
//! Newtype wrappers keep target, resource, script and frame identifiers
//! from being mixed up at compile time.
//!
//! | Type | Wraps | Assigned by |
//! |------|-------|-------------|
//! | [`TargetId`] | `String` | Remote end (empty for the main target) |
//! | [`ResourceId`] | `Uuid` | This process |
//! | [`ScriptId`] | `String` | Remote end |
//! | [`FrameId`] | `String` | Remote end |
//! | [`ExecutionContextId`] | `i64` | Remote end |
//! | [`ListenerId`] | `u64` | This process |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// TargetId
// ============================================================================

/// Identifier of a debuggable target.
///
/// The empty string is reserved for the primary (main) target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    /// Creates a target identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the main target sentinel.
    #[inline]
    #[must_use]
    pub const fn main() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the main target sentinel.
    #[inline]
    #[must_use]
    pub fn is_main(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ============================================================================
// ResourceId
// ============================================================================

/// Process-unique identity of a [`Resource`](crate::model::Resource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(Uuid);

impl ResourceId {
    /// Allocates a fresh resource identity.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ScriptId
// ============================================================================

/// Protocol-assigned script identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptId(String);

impl ScriptId {
    /// Creates a script identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScriptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// FrameId
// ============================================================================

/// Protocol-assigned frame identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameId(String);

impl FrameId {
    /// Creates a frame identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the raw identifier.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ExecutionContextId
// ============================================================================

/// Protocol-assigned execution context identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionContextId(i64);

impl ExecutionContextId {
    /// Well-known identifier of a target's top-level context.
    ///
    /// The remote end never assigns 0 to a real context.
    pub const TOP_LEVEL: Self = Self(0);

    /// Creates an execution context identifier.
    #[inline]
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[inline]
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Returns `true` for the top-level context.
    #[inline]
    #[must_use]
    pub const fn is_top_level(&self) -> bool {
        self.0 == Self::TOP_LEVEL.0
    }
}

impl fmt::Display for ExecutionContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ListenerId
// ============================================================================

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle returned when registering an event listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocates the next listener handle.
    #[inline]
    pub(crate) fn next() -> Self {
        Self(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_target_sentinel() {
        assert!(TargetId::main().is_main());
        assert_eq!(TargetId::main().as_str(), "");
        assert!(!TargetId::new("worker-1").is_main());
    }

    #[test]
    fn test_target_id_serialization() {
        let id = TargetId::new("worker-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""worker-7""#);
    }

    #[test]
    fn test_resource_ids_unique() {
        assert_ne!(ResourceId::generate(), ResourceId::generate());
    }

    #[test]
    fn test_top_level_context() {
        assert!(ExecutionContextId::TOP_LEVEL.is_top_level());
        assert!(!ExecutionContextId::new(3).is_top_level());
    }

    #[test]
    fn test_listener_ids_increase() {
        let a = ListenerId::next();
        let b = ListenerId::next();
        assert_ne!(a, b);
    }
}
