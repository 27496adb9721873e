//! Connection and target binding.
//!
//! A [`Connection`] is exclusively owned by one [`Target`]. The target
//! binds itself during construction; the connection keeps only a weak
//! back-reference, so dropping the target frees the connection for a new
//! binding.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::identifiers::TargetId;
use crate::target::{Target, WeakTarget};

use super::Agents;

// ============================================================================
// ConnectionKind
// ============================================================================

/// What a connection talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionKind {
    /// The process's primary connection to the inspected page.
    Main,
    /// A dedicated connection to one worker.
    Worker(TargetId),
}

// ============================================================================
// Connection
// ============================================================================

struct ConnectionInner {
    kind: ConnectionKind,
    agents: Agents,
    target: RwLock<Option<WeakTarget>>,
}

/// A protocol connection multiplexing agent calls to one target.
#[derive(Clone)]
pub struct Connection {
    inner: Arc<ConnectionInner>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("kind", &self.inner.kind)
            .field("agents", &self.inner.agents)
            .field("bound", &self.is_bound())
            .finish()
    }
}

impl Connection {
    /// Creates the primary page connection.
    #[must_use]
    pub fn main(agents: Agents) -> Self {
        Self::new(ConnectionKind::Main, agents)
    }

    /// Creates a connection to the worker `worker_id`.
    #[must_use]
    pub fn worker(worker_id: impl Into<TargetId>, agents: Agents) -> Self {
        Self::new(ConnectionKind::Worker(worker_id.into()), agents)
    }

    fn new(kind: ConnectionKind, agents: Agents) -> Self {
        Self {
            inner: Arc::new(ConnectionInner {
                kind,
                agents,
                target: RwLock::new(None),
            }),
        }
    }
}

// ============================================================================
// Connection - Accessors
// ============================================================================

impl Connection {
    /// Returns what this connection talks to.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &ConnectionKind {
        &self.inner.kind
    }

    /// Returns the exposed agents.
    #[inline]
    #[must_use]
    pub fn agents(&self) -> &Agents {
        &self.inner.agents
    }

    /// Returns the bound target, if it is still alive.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        self.inner.target.read().as_ref().and_then(WeakTarget::upgrade)
    }

    /// Returns `true` if a live target is bound.
    #[inline]
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.target().is_some()
    }

    /// Returns `true` if both handles refer to the same connection.
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Connection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

// ============================================================================
// Connection - Binding
// ============================================================================

impl Connection {
    /// Binds `target` as the owner of this connection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StaleBackReference`] if another live target is
    /// already bound.
    pub(crate) fn bind_target(&self, target: &Target) -> Result<()> {
        let mut bound = self.inner.target.write();

        if let Some(current) = bound.as_ref().and_then(WeakTarget::upgrade) {
            warn!(
                current = %current.identifier(),
                requested = %target.identifier(),
                "Connection already bound"
            );
            return Err(Error::stale_back_reference(current.identifier().clone()));
        }

        debug!(target_id = %target.identifier(), kind = ?self.inner.kind, "Connection bound");
        *bound = Some(target.downgrade());
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
