//! Protocol agent capabilities.
//!
//! Agents are the RPC stubs of one protocol domain. Calls are
//! fire-and-forget: replies and failures are handled by the transport.
//! A connection exposes only the domains its remote end supports; a
//! missing agent is an environment variation, never an error.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ============================================================================
// Agent Traits
// ============================================================================

/// `Runtime` domain.
pub trait RuntimeAgent: Send + Sync {
    /// Sends `Runtime.enable`.
    fn enable(&self);

    /// Sends `Runtime.enableTypeProfiler`.
    fn enable_type_profiler(&self);

    /// Sends `Runtime.enableControlFlowProfiler`.
    fn enable_control_flow_profiler(&self);
}

/// `Console` domain.
pub trait ConsoleAgent: Send + Sync {
    /// Sends `Console.enable`.
    fn enable(&self);
}

/// `Debugger` domain.
pub trait DebuggerAgent: Send + Sync {
    /// Sends `Debugger.enable`.
    fn enable(&self);
}

// ============================================================================
// AgentDomain
// ============================================================================

/// Name of a protocol agent domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentDomain {
    /// `Runtime`.
    Runtime,
    /// `Console`.
    Console,
    /// `Debugger`.
    Debugger,
}

impl AgentDomain {
    /// Returns the protocol domain name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Runtime => "Runtime",
            Self::Console => "Console",
            Self::Debugger => "Debugger",
        }
    }
}

impl fmt::Display for AgentDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Agents
// ============================================================================

/// Capability map of one connection.
///
/// # Example
///
/// ```ignore
/// let agents = Agents::new()
///     .with_runtime(runtime)
///     .with_console(console);
///
/// assert!(agents.has(AgentDomain::Runtime));
/// assert!(!agents.has(AgentDomain::Debugger));
/// ```
#[derive(Clone, Default)]
pub struct Agents {
    runtime: Option<Arc<dyn RuntimeAgent>>,
    console: Option<Arc<dyn ConsoleAgent>>,
    debugger: Option<Arc<dyn DebuggerAgent>>,
}

impl fmt::Debug for Agents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.domains()).finish()
    }
}

impl Agents {
    /// Creates an empty capability map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Exposes a `Runtime` agent.
    #[must_use]
    pub fn with_runtime(mut self, agent: Arc<dyn RuntimeAgent>) -> Self {
        self.runtime = Some(agent);
        self
    }

    /// Exposes a `Console` agent.
    #[must_use]
    pub fn with_console(mut self, agent: Arc<dyn ConsoleAgent>) -> Self {
        self.console = Some(agent);
        self
    }

    /// Exposes a `Debugger` agent.
    #[must_use]
    pub fn with_debugger(mut self, agent: Arc<dyn DebuggerAgent>) -> Self {
        self.debugger = Some(agent);
        self
    }

    /// Returns the `Runtime` agent.
    #[inline]
    #[must_use]
    pub fn runtime(&self) -> Option<&Arc<dyn RuntimeAgent>> {
        self.runtime.as_ref()
    }

    /// Returns the `Console` agent.
    #[inline]
    #[must_use]
    pub fn console(&self) -> Option<&Arc<dyn ConsoleAgent>> {
        self.console.as_ref()
    }

    /// Returns the `Debugger` agent.
    #[inline]
    #[must_use]
    pub fn debugger(&self) -> Option<&Arc<dyn DebuggerAgent>> {
        self.debugger.as_ref()
    }

    /// Returns `true` if `domain` is exposed.
    #[must_use]
    pub fn has(&self, domain: AgentDomain) -> bool {
        match domain {
            AgentDomain::Runtime => self.runtime.is_some(),
            AgentDomain::Console => self.console.is_some(),
            AgentDomain::Debugger => self.debugger.is_some(),
        }
    }

    /// Returns the exposed domains.
    #[must_use]
    pub fn domains(&self) -> Vec<AgentDomain> {
        [AgentDomain::Runtime, AgentDomain::Console, AgentDomain::Debugger]
            .into_iter()
            .filter(|domain| self.has(*domain))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
