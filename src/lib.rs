//! Inspector Targets - Debugging target registry for remote inspector clients.
//!
//! A *target* is one debuggable execution context reachable over a
//! protocol connection: the inspected page's main frame, or a worker. This
//! crate models targets together with the resources and scripts that
//! belong to them, and the ownership rules between targets, resources and
//! connections.
//!
//! # Architecture
//!
//! - Each [`Target`] owns one [`Connection`]; the connection points back at
//!   its target without keeping it alive
//! - A target owns a resource collection, a script-only collection and at
//!   most one [`ExecutionContext`]
//! - Resources can be discovered before their worker's target exists; the
//!   [`FrameResourceManager`] buffers them and the worker target adopts them
//!   during its initialization
//! - Each target type enables a different subset of protocol agents
//! - Notifications are delivered synchronously, in call order
//!
//! Collaborators (frame manager, debugger manager, settings) are injected
//! through an [`Environment`] instead of globals.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use inspector_targets::{
//!     Agents, Environment, FrameResourceManager, Resource, ResourceType, Result, TargetEventKind,
//!     TargetManager,
//! };
//!
//! fn main() -> Result<()> {
//!     let frames = Arc::new(FrameResourceManager::new());
//!     let env = Environment::builder().frames(frames.clone()).build();
//!     let manager = TargetManager::new(env)?;
//!
//!     // A resource shows up before its worker does
//!     let script = Arc::new(Resource::new("https://example.com/w.js", ResourceType::Script));
//!     frames.record_orphaned_resource(&"worker-1".into(), script.clone());
//!
//!     let worker = manager.worker_created("worker-1", "https://example.com/w.js", Agents::new())?;
//!     assert!(worker.has_resource(script.id()));
//!
//!     worker.add_event_listener(TargetEventKind::ResourceAdded, |event| {
//!         println!("added {:?}", event.resource());
//!     });
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`backend`] | [`Connection`] and protocol agent traits |
//! | [`display`] | Localization lookup and URL display names |
//! | [`environment`] | [`Environment`], configuration and settings |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`events`] | Synchronous observer lists |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`managers`] | Frame, debugger and target managers |
//! | [`model`] | Collections, resources, scripts, frames, execution contexts |
//! | [`target`] | [`Target`] and its notifications |

// ============================================================================
// Modules
// ============================================================================

/// Protocol backend bindings.
///
/// [`Connection`] carries the agents exposed by the remote end and the
/// back-reference to its owning target.
pub mod backend;

/// User-facing strings.
pub mod display;

/// Target construction environment.
///
/// Use [`Environment::builder()`] to assemble collaborators and settings.
pub mod environment;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Synchronous observer lists.
pub mod events;

/// Type-safe identifiers.
pub mod identifiers;

/// Collaborators and the target registry.
pub mod managers;

/// Domain objects referenced by targets.
pub mod model;

/// Debuggable targets.
pub mod target;

// ============================================================================
// Re-exports
// ============================================================================

// Backend types
pub use backend::{AgentDomain, Agents, Connection, ConnectionKind, ConsoleAgent, DebuggerAgent, RuntimeAgent};

// Display helpers
pub use display::{UiStrings, display_name_for_url};

// Environment types
pub use environment::{DebuggableType, Environment, EnvironmentBuilder, InspectorConfig, Settings};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ExecutionContextId, FrameId, ListenerId, ResourceId, ScriptId, TargetId};

// Manager types
pub use managers::{
    DebuggerManager, DebuggerRegistry, FrameManager, FrameResourceManager, TargetManager,
    TargetManagerEvent,
};

// Model types
pub use model::{
    Collection, Entity, EntityKey, EntityKind, ExecutionContext, Frame, Resource,
    ResourceCollection, ResourceType, Script, TypeVerifier,
};

// Target types
pub use target::{Target, TargetEvent, TargetEventKind, TargetType};
