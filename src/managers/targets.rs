//! Registry of live targets.
//!
//! The [`TargetManager`] owns the main target for the lifetime of the
//! inspector session and tracks worker targets as the remote end reports
//! them created and terminated.
//!
//! # Example
//!
//! ```ignore
//! let manager = TargetManager::new(env)?;
//! manager.add_event_listener(|event| match event {
//!     TargetManagerEvent::TargetAdded { target } => println!("+ {}", target.display_name()),
//!     TargetManagerEvent::TargetRemoved { target } => println!("- {}", target.display_name()),
//! });
//!
//! let worker = manager.worker_created("worker-1", "https://example.com/w.js", agents)?;
//! manager.worker_terminated(worker.identifier());
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use parking_lot::{Mutex, RwLock};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{info, warn};

use crate::backend::{Agents, Connection};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::events::Listeners;
use crate::identifiers::{ListenerId, TargetId};
use crate::target::Target;

// ============================================================================
// TargetManagerEvent
// ============================================================================

/// Notification published by a [`TargetManager`].
#[derive(Debug, Clone)]
pub enum TargetManagerEvent {
    /// A worker target was created and registered.
    TargetAdded {
        /// The new target.
        target: Target,
    },
    /// A worker target was unregistered.
    TargetRemoved {
        /// The removed target.
        target: Target,
    },
}

// ============================================================================
// TargetManager
// ============================================================================

/// Registry of the main target and all live worker targets.
pub struct TargetManager {
    env: Environment,
    main: Target,
    workers: RwLock<FxHashMap<TargetId, Target>>,
    /// Identifiers reserved while their target is being constructed.
    pending: Mutex<FxHashSet<TargetId>>,
    listeners: Listeners<TargetManagerEvent>,
}

impl fmt::Debug for TargetManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TargetManager")
            .field("main", &self.main)
            .field("workers", &self.worker_count())
            .finish_non_exhaustive()
    }
}

impl TargetManager {
    /// Creates the manager and its main target.
    ///
    /// # Errors
    ///
    /// Returns an error if the main target cannot be created.
    pub fn new(env: Environment) -> Result<Self> {
        let main = Target::new_main(&env)?;
        info!(display_name = %main.display_name(), "Main target created");

        Ok(Self {
            env,
            main,
            workers: RwLock::new(FxHashMap::default()),
            pending: Mutex::new(FxHashSet::default()),
            listeners: Listeners::new(),
        })
    }
}

// ============================================================================
// TargetManager - Accessors
// ============================================================================

impl TargetManager {
    /// Returns the shared environment.
    #[inline]
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Returns the main target.
    #[inline]
    #[must_use]
    pub fn main_target(&self) -> &Target {
        &self.main
    }

    /// Returns the target with `target_id`.
    #[must_use]
    pub fn target(&self, target_id: &TargetId) -> Option<Target> {
        if target_id.is_main() {
            return Some(self.main.clone());
        }
        self.workers.read().get(target_id).cloned()
    }

    /// Returns all targets: main first, then workers ordered by identifier.
    #[must_use]
    pub fn targets(&self) -> Vec<Target> {
        let mut workers: Vec<Target> = self.workers.read().values().cloned().collect();
        workers.sort_by(|a, b| a.identifier().cmp(b.identifier()));

        let mut targets = Vec::with_capacity(workers.len() + 1);
        targets.push(self.main.clone());
        targets.extend(workers);
        targets
    }

    /// Returns the number of live worker targets.
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.workers.read().len()
    }
}

// ============================================================================
// TargetManager - Worker Lifecycle
// ============================================================================

impl TargetManager {
    /// Creates and registers a target for a newly reported worker.
    ///
    /// The worker gets its own connection exposing `agents`.
    ///
    /// # Errors
    ///
    /// - [`Error::DuplicateTarget`] if `worker_id` is already registered
    /// - any error from [`Target::new_worker`]
    pub fn worker_created(
        &self,
        worker_id: impl Into<TargetId>,
        name: impl Into<String>,
        agents: Agents,
    ) -> Result<Target> {
        let worker_id = worker_id.into();
        self.reserve(&worker_id)?;

        let connection = Connection::worker(worker_id.clone(), agents);
        let target = match Target::new_worker(&self.env, worker_id.clone(), name, connection) {
            Ok(target) => target,
            Err(error) => {
                self.pending.lock().remove(&worker_id);
                return Err(error);
            }
        };

        self.workers.write().insert(worker_id.clone(), target.clone());
        self.pending.lock().remove(&worker_id);

        info!(worker_id = %worker_id, display_name = %target.display_name(), "Worker target created");
        self.listeners.dispatch(&TargetManagerEvent::TargetAdded {
            target: target.clone(),
        });
        Ok(target)
    }

    /// Claims `worker_id` for construction.
    ///
    /// Registration happens before the claim is released, so a concurrent
    /// or re-entrant call sees the identifier in one of the two sets.
    fn reserve(&self, worker_id: &TargetId) -> Result<()> {
        let mut pending = self.pending.lock();
        if worker_id.is_main()
            || self.workers.read().contains_key(worker_id)
            || !pending.insert(worker_id.clone())
        {
            warn!(worker_id = %worker_id, "Worker already registered");
            return Err(Error::duplicate_target(worker_id.clone()));
        }
        Ok(())
    }

    /// Unregisters a terminated worker, returning its target.
    pub fn worker_terminated(&self, worker_id: &TargetId) -> Option<Target> {
        let target = self.workers.write().remove(worker_id)?;

        info!(worker_id = %worker_id, "Worker target removed");
        self.listeners.dispatch(&TargetManagerEvent::TargetRemoved {
            target: target.clone(),
        });
        Some(target)
    }
}

// ============================================================================
// TargetManager - Listeners
// ============================================================================

impl TargetManager {
    /// Registers a listener for target additions and removals.
    pub fn add_event_listener(
        &self,
        listener: impl Fn(&TargetManagerEvent) + Send + Sync + 'static,
    ) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use crate::backend::RuntimeAgent;
    use crate::managers::FrameResourceManager;
    use crate::model::{Resource, ResourceType};

    fn manager() -> TargetManager {
        TargetManager::new(Environment::builder().build()).unwrap()
    }

    #[test]
    fn test_main_target_registered() {
        let manager = manager();
        assert!(manager.main_target().identifier().is_main());
        assert!(manager.target(&TargetId::main()).unwrap().ptr_eq(manager.main_target()));
        assert_eq!(manager.targets().len(), 1);
    }

    #[test]
    fn test_worker_lifecycle_events() {
        let manager = manager();
        let log = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&log);
        manager.add_event_listener(move |event| {
            let entry = match event {
                TargetManagerEvent::TargetAdded { target } => format!("+{}", target.identifier()),
                TargetManagerEvent::TargetRemoved { target } => format!("-{}", target.identifier()),
            };
            seen.lock().push(entry);
        });

        let worker = manager.worker_created("w1", "w.js", Agents::new()).unwrap();
        assert!(manager.target(&TargetId::new("w1")).unwrap().ptr_eq(&worker));
        assert!(worker.connection().target().unwrap().ptr_eq(&worker));

        let removed = manager.worker_terminated(&TargetId::new("w1")).unwrap();
        assert!(removed.ptr_eq(&worker));
        assert!(manager.worker_terminated(&TargetId::new("w1")).is_none());

        assert_eq!(*log.lock(), ["+w1", "-w1"]);
    }

    #[test]
    fn test_duplicate_worker_refused() {
        let manager = manager();
        manager.worker_created("w1", "w.js", Agents::new()).unwrap();

        let err = manager.worker_created("w1", "w.js", Agents::new()).unwrap_err();
        assert!(matches!(err, Error::DuplicateTarget { .. }));
        assert_eq!(manager.worker_count(), 1);

        let err = manager.worker_created("", "w.js", Agents::new()).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_targets_ordered() {
        let manager = manager();
        manager.worker_created("w2", "b.js", Agents::new()).unwrap();
        manager.worker_created("w1", "a.js", Agents::new()).unwrap();

        let ids: Vec<String> = manager
            .targets()
            .iter()
            .map(|t| t.identifier().to_string())
            .collect();
        assert_eq!(ids, ["", "w1", "w2"]);
    }

    #[test]
    fn test_worker_claims_orphans() {
        let frames = Arc::new(FrameResourceManager::new());
        let manager = TargetManager::new(Environment::builder().frames(frames.clone()).build()).unwrap();
        let orphan = Arc::new(Resource::new("https://example.com/w.js", ResourceType::Script));
        frames.record_orphaned_resource(&TargetId::new("w1"), Arc::clone(&orphan));

        let worker = manager.worker_created("w1", "w.js", Agents::new()).unwrap();
        assert!(worker.has_resource(orphan.id()));
    }

    #[test]
    fn test_duplicate_refused_while_first_is_constructing() {
        struct Reentrant {
            manager: Mutex<Option<Arc<TargetManager>>>,
            nested: Mutex<Option<Result<Target>>>,
        }

        impl RuntimeAgent for Reentrant {
            fn enable(&self) {
                let manager = self.manager.lock().clone();
                if let Some(manager) = manager {
                    *self.nested.lock() = Some(manager.worker_created("w1", "w.js", Agents::new()));
                }
            }
            fn enable_type_profiler(&self) {}
            fn enable_control_flow_profiler(&self) {}
        }

        let frames = Arc::new(FrameResourceManager::new());
        let manager =
            Arc::new(TargetManager::new(Environment::builder().frames(frames.clone()).build()).unwrap());
        let orphan = Arc::new(Resource::new("https://example.com/w.js", ResourceType::Script));
        frames.record_orphaned_resource(&TargetId::new("w1"), Arc::clone(&orphan));

        let agent = Arc::new(Reentrant {
            manager: Mutex::new(Some(Arc::clone(&manager))),
            nested: Mutex::new(None),
        });
        let worker = manager
            .worker_created("w1", "w.js", Agents::new().with_runtime(agent.clone()))
            .unwrap();

        let nested = agent.nested.lock().take().unwrap();
        assert!(matches!(nested, Err(Error::DuplicateTarget { .. })));
        assert!(worker.has_resource(orphan.id()));
        assert_eq!(manager.worker_count(), 1);
        assert!(manager.target(&TargetId::new("w1")).unwrap().ptr_eq(&worker));

        // Break the agent -> manager cycle.
        agent.manager.lock().take();
    }

    #[test]
    fn test_terminated_worker_id_reusable() {
        let manager = manager();
        manager.worker_created("w1", "w.js", Agents::new()).unwrap();
        manager.worker_terminated(&TargetId::new("w1")).unwrap();

        let again = manager.worker_created("w1", "w.js", Agents::new()).unwrap();
        assert!(manager.target(&TargetId::new("w1")).unwrap().ptr_eq(&again));
    }
}
