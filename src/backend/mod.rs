//! Protocol backend bindings.
//!
//! The transport itself lives outside this crate. What targets see of it
//! is a [`Connection`]: the set of protocol agents the remote end exposes
//! plus a non-owning back-reference to the target bound to it.
//!
//! ```text
//! ┌──────────────┐   owns    ┌──────────────┐
//! │    Target    │──────────►│  Connection  │
//! │              │◄ ─ ─ ─ ─ ─│  (agents)    │
//! └──────────────┘   weak    └──────────────┘
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `agents` | Agent traits and the per-connection capability map |
//! | `connection` | Connection and target binding |

// ============================================================================
// Submodules
// ============================================================================

/// Protocol agent capabilities.
pub mod agents;

/// Connection and target binding.
pub mod connection;

// ============================================================================
// Re-exports
// ============================================================================

pub use agents::{AgentDomain, Agents, ConsoleAgent, DebuggerAgent, RuntimeAgent};
pub use connection::{Connection, ConnectionKind};
