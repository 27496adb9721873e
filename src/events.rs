//! Synchronous observer lists.
//!
//! [`Listeners`] delivers each event to every registered callback, in
//! registration order, before [`Listeners::dispatch`] returns. The list is
//! snapshotted before delivery so a callback may register or remove
//! listeners (or trigger further dispatches) without deadlocking.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::identifiers::ListenerId;

// ============================================================================
// Types
// ============================================================================

/// Event listener callback.
pub type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

// ============================================================================
// Listeners
// ============================================================================

/// Ordered list of listeners for events of type `E`.
pub struct Listeners<E> {
    entries: Mutex<Vec<(ListenerId, Listener<E>)>>,
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }
}

impl<E> fmt::Debug for Listeners<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}

impl<E> Listeners<E> {
    /// Creates an empty list.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn add(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId::next();
        let listener: Listener<E> = Arc::new(listener);
        self.entries.lock().push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|(entry_id, _)| *entry_id != id);
        entries.len() != before
    }

    /// Returns the number of listeners.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns `true` if no listener is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Delivers `event` to every listener registered at call time.
    pub fn dispatch(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = self
            .entries
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in snapshot {
            listener(event);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
