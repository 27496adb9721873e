//! Target notifications.

use std::sync::Arc;

use crate::model::{Resource, Script};

// ============================================================================
// TargetEventKind
// ============================================================================

/// Kind of a [`TargetEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetEventKind {
    /// A resource was added.
    ResourceAdded,
    /// A script was added.
    ScriptAdded,
}

impl TargetEventKind {
    /// Returns the event name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceAdded => "target-resource-added",
            Self::ScriptAdded => "target-script-added",
        }
    }
}

// ============================================================================
// TargetEvent
// ============================================================================

/// Notification published by a target, delivered synchronously.
#[derive(Debug, Clone)]
pub enum TargetEvent {
    /// A resource entered the target's resource collection.
    ResourceAdded {
        /// The added resource.
        resource: Arc<Resource>,
    },
    /// A script entered the target's extra script collection.
    ScriptAdded {
        /// The added script.
        script: Arc<Script>,
    },
}

impl TargetEvent {
    /// Returns the event kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TargetEventKind {
        match self {
            Self::ResourceAdded { .. } => TargetEventKind::ResourceAdded,
            Self::ScriptAdded { .. } => TargetEventKind::ScriptAdded,
        }
    }

    /// Returns the resource of a `ResourceAdded` event.
    #[inline]
    #[must_use]
    pub fn resource(&self) -> Option<&Arc<Resource>> {
        match self {
            Self::ResourceAdded { resource } => Some(resource),
            Self::ScriptAdded { .. } => None,
        }
    }

    /// Returns the script of a `ScriptAdded` event.
    #[inline]
    #[must_use]
    pub fn script(&self) -> Option<&Arc<Script>> {
        match self {
            Self::ScriptAdded { script } => Some(script),
            Self::ResourceAdded { .. } => None,
        }
    }
}
