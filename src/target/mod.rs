//! Debuggable targets.
//!
//! A [`Target`] is one debuggable execution context reachable over a
//! [`Connection`](crate::backend::Connection): the page's main frame or a
//! worker. It owns its connection, its resource and script collections and
//! at most one execution context.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `core` | Target struct, construction and accessors |
//! | `events` | `ResourceAdded` / `ScriptAdded` notifications |
//! | `resources` | Resource and script registration |
//! | `main` | Main target behavior |
//! | `worker` | Worker target behavior |
//!
//! # Construction Order
//!
//! 1. Identity is stored and empty collections are created
//! 2. The connection's back-reference is pointed at the new target
//! 3. Type-specific initialization runs
//! 4. The target is marked initialized and returned
//!
//! Between steps 2 and 4 the target is reachable through its connection
//! but [`Target::is_initialized`] is `false` and its execution context may
//! still be unset.
//!
//! # Example
//!
//! ```ignore
//! let main = Target::new_main(&env)?;
//! main.add_event_listener(TargetEventKind::ResourceAdded, |event| {
//!     println!("{:?}", event.resource());
//! });
//!
//! let worker = Target::new_worker(&env, "worker-1", "https://example.com/w.js", conn)?;
//! assert_eq!(worker.display_name(), "w.js");
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod core;
mod events;
mod main;
mod resources;
mod worker;

// ============================================================================
// Re-exports
// ============================================================================

pub use self::core::{Target, TargetType};
pub use events::{TargetEvent, TargetEventKind};

pub(crate) use self::core::WeakTarget;
