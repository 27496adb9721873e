//! Collaborators consulted by targets, and the target registry.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FrameManager`] | Main frame lookup and orphaned-resource hand-over |
//! | [`FrameResourceManager`] | Default `FrameManager` |
//! | [`DebuggerManager`] | Per-target debugger attachment |
//! | [`DebuggerRegistry`] | Default `DebuggerManager` |
//! | [`TargetManager`] | Registry of the main target and live workers |
//!
//! Targets receive these through an [`Environment`](crate::Environment)
//! rather than globals, so tests can substitute fakes.

// ============================================================================
// Submodules
// ============================================================================

/// Debugger attachment.
pub mod debugger;

/// Frames and orphaned resources.
pub mod frames;

/// Target registry.
pub mod targets;

// ============================================================================
// Re-exports
// ============================================================================

pub use debugger::{DebuggerManager, DebuggerRegistry};
pub use frames::{FrameManager, FrameResourceManager};
pub use targets::{TargetManager, TargetManagerEvent};
