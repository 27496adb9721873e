//! Per-target debugger state.

use parking_lot::Mutex;
use tracing::debug;

use crate::identifiers::TargetId;
use crate::target::Target;

// ============================================================================
// DebuggerManager
// ============================================================================

/// Debugger collaborator notified when a debuggable target appears.
pub trait DebuggerManager: Send + Sync {
    /// Attaches per-target debugger state to `target`.
    ///
    /// Called only for targets whose connection exposes a `Debugger` agent.
    fn initialize_target(&self, target: &Target);
}

// ============================================================================
// DebuggerRegistry
// ============================================================================

/// Default [`DebuggerManager`].
///
/// Enables the target's `Debugger` agent and remembers the target.
#[derive(Debug, Default)]
pub struct DebuggerRegistry {
    targets: Mutex<Vec<TargetId>>,
}

impl DebuggerRegistry {
    /// Creates an empty registry.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns targets initialized so far, in order.
    #[must_use]
    pub fn initialized_targets(&self) -> Vec<TargetId> {
        self.targets.lock().clone()
    }

    /// Returns `true` if `target_id` was initialized.
    #[must_use]
    pub fn is_initialized(&self, target_id: &TargetId) -> bool {
        self.targets.lock().contains(target_id)
    }
}

impl DebuggerManager for DebuggerRegistry {
    fn initialize_target(&self, target: &Target) {
        if let Some(agent) = target.connection().agents().debugger() {
            agent.enable();
        }

        let mut targets = self.targets.lock();
        if !targets.contains(target.identifier()) {
            debug!(target_id = %target.identifier(), "Debugger attached to target");
            targets.push(target.identifier().clone());
        }
    }
}
