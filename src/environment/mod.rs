//! Target construction environment.
//!
//! # Components
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Environment`] | Collaborators shared by all targets |
//! | [`EnvironmentBuilder`] | Fluent configuration builder |
//! | [`InspectorConfig`] | JSON-loadable configuration |
//! | [`Settings`] | User settings gating optional profilers |
//! | [`DebuggableType`] | Page or bare JavaScript context |

// ============================================================================
// Submodules
// ============================================================================

/// Fluent builder for environments.
pub mod builder;

/// JSON configuration.
pub mod config;

/// Environment implementation.
pub mod core;

// ============================================================================
// Re-exports
// ============================================================================

pub use builder::EnvironmentBuilder;
pub use config::{DebuggableType, InspectorConfig, Settings};
pub use self::core::Environment;
