//! Frame and orphaned-resource bookkeeping.
//!
//! Resource discovery never waits for targets. A resource reported for a
//! worker whose target does not exist yet is buffered here, keyed by the
//! worker's identifier, and handed over exactly once when that worker's
//! target initializes.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::identifiers::{FrameId, TargetId};
use crate::model::{Collection, EntityKey, Frame, Resource, TypeVerifier};

// ============================================================================
// FrameManager
// ============================================================================

/// Frame/resource collaborator consulted by targets.
pub trait FrameManager: Send + Sync {
    /// Returns the page's current main frame.
    fn main_frame(&self) -> Option<Arc<Frame>>;

    /// Drains and returns the resources buffered for `target_id`.
    ///
    /// A second call for the same identifier returns nothing.
    fn adopt_orphaned_resources_for_target(&self, target_id: &TargetId) -> Vec<Arc<Resource>>;
}

// ============================================================================
// FrameResourceManager
// ============================================================================

/// Default [`FrameManager`].
#[derive(Debug)]
pub struct FrameResourceManager {
    main_frame: RwLock<Option<Arc<Frame>>>,
    frames: Mutex<Collection>,
    orphans: Mutex<FxHashMap<TargetId, Vec<Arc<Resource>>>>,
}

impl Default for FrameResourceManager {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameResourceManager {
    /// Creates a manager with no frames.
    #[must_use]
    pub fn new() -> Self {
        Self {
            main_frame: RwLock::new(None),
            frames: Mutex::new(Collection::new(TypeVerifier::Frame)),
            orphans: Mutex::new(FxHashMap::default()),
        }
    }
}

// ============================================================================
// FrameResourceManager - Frames
// ============================================================================

impl FrameResourceManager {
    /// Registers a frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateEntity`](crate::Error::DuplicateEntity) if
    /// a frame with the same identifier is registered.
    pub fn add_frame(&self, frame: Arc<Frame>) -> Result<()> {
        trace!(frame_id = %frame.id(), "Frame added");
        self.frames.lock().add(frame)
    }

    /// Makes `frame` the main frame, registering it if needed.
    pub fn set_main_frame(&self, frame: Arc<Frame>) {
        match self.frames.lock().add(Arc::clone(&frame)) {
            Ok(()) => trace!(frame_id = %frame.id(), "Frame added"),
            Err(error) if error.is_duplicate() => {}
            Err(error) => warn!(frame_id = %frame.id(), %error, "Main frame not registered"),
        }
        debug!(frame_id = %frame.id(), "Main frame changed");
        *self.main_frame.write() = Some(frame);
    }

    /// Unregisters a frame. Clears the main frame if it was the main frame.
    pub fn remove_frame(&self, frame_id: &FrameId) -> Option<Arc<Frame>> {
        let removed = self
            .frames
            .lock()
            .remove(&EntityKey::Frame(frame_id.clone()))?
            .as_frame()
            .cloned()?;

        let mut main = self.main_frame.write();
        if main.as_ref().is_some_and(|m| m.id() == frame_id) {
            debug!(frame_id = %frame_id, "Main frame removed");
            *main = None;
        }
        Some(removed)
    }

    /// Returns the frame with `frame_id`.
    #[must_use]
    pub fn frame(&self, frame_id: &FrameId) -> Option<Arc<Frame>> {
        self.frames
            .lock()
            .get(&EntityKey::Frame(frame_id.clone()))
            .and_then(|entity| entity.as_frame().cloned())
    }

    /// Returns all registered frames.
    #[must_use]
    pub fn frames(&self) -> Vec<Arc<Frame>> {
        self.frames.lock().frames().cloned().collect()
    }
}

// ============================================================================
// FrameResourceManager - Orphans
// ============================================================================

impl FrameResourceManager {
    /// Buffers a resource discovered before its worker's target exists.
    ///
    /// Recording the same resource twice for one worker is ignored.
    pub fn record_orphaned_resource(&self, worker_id: &TargetId, resource: Arc<Resource>) {
        let mut orphans = self.orphans.lock();
        let buffer = orphans.entry(worker_id.clone()).or_default();

        if buffer.iter().any(|r| r.id() == resource.id()) {
            trace!(worker_id = %worker_id, resource_id = %resource.id(), "Orphan already buffered");
            return;
        }

        trace!(worker_id = %worker_id, resource_id = %resource.id(), "Orphaned resource recorded");
        buffer.push(resource);
    }

    /// Returns the number of resources buffered for `worker_id`.
    #[must_use]
    pub fn orphan_count(&self, worker_id: &TargetId) -> usize {
        self.orphans.lock().get(worker_id).map_or(0, Vec::len)
    }
}

impl FrameManager for FrameResourceManager {
    fn main_frame(&self) -> Option<Arc<Frame>> {
        self.main_frame.read().clone()
    }

    fn adopt_orphaned_resources_for_target(&self, target_id: &TargetId) -> Vec<Arc<Resource>> {
        let drained = self.orphans.lock().remove(target_id).unwrap_or_default();
        if !drained.is_empty() {
            debug!(target_id = %target_id, count = drained.len(), "Handing over orphaned resources");
        }
        drained
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    fn resource(url: &str) -> Arc<Resource> {
        Arc::new(Resource::new(url, ResourceType::Script))
    }

    #[test]
    fn test_main_frame_registration() {
        let manager = FrameResourceManager::new();
        assert!(manager.main_frame().is_none());

        let frame = Arc::new(Frame::new(FrameId::new("main")));
        manager.set_main_frame(Arc::clone(&frame));
        manager.set_main_frame(Arc::clone(&frame));

        assert_eq!(manager.frames().len(), 1);
        assert!(manager.frame(&FrameId::new("main")).is_some());
        assert_eq!(manager.main_frame().unwrap().id(), frame.id());
    }

    #[test]
    fn test_main_frame_from_registered_frames() {
        let manager = FrameResourceManager::new();
        let child = Arc::new(Frame::new(FrameId::new("child")).with_parent(FrameId::new("main")));
        let main = Arc::new(Frame::new(FrameId::new("main")));
        manager.add_frame(Arc::clone(&child)).unwrap();
        manager.add_frame(Arc::clone(&main)).unwrap();

        manager.set_main_frame(Arc::clone(&main));

        assert_eq!(manager.frames().len(), 2);
        assert!(Arc::ptr_eq(&manager.main_frame().unwrap(), &main));
    }

    #[test]
    fn test_add_frame_duplicate() {
        let manager = FrameResourceManager::new();
        manager.add_frame(Arc::new(Frame::new(FrameId::new("f")))).unwrap();
        let err = manager.add_frame(Arc::new(Frame::new(FrameId::new("f")))).unwrap_err();
        assert!(err.is_duplicate());
    }

    #[test]
    fn test_remove_main_frame_clears_main() {
        let manager = FrameResourceManager::new();
        manager.set_main_frame(Arc::new(Frame::new(FrameId::new("main"))));

        assert!(manager.remove_frame(&FrameId::new("main")).is_some());
        assert!(manager.main_frame().is_none());
        assert!(manager.remove_frame(&FrameId::new("main")).is_none());
    }

    #[test]
    fn test_orphans_drained_once() {
        let manager = FrameResourceManager::new();
        let worker = TargetId::new("w1");
        let r1 = resource("https://example.com/a.js");

        manager.record_orphaned_resource(&worker, Arc::clone(&r1));
        manager.record_orphaned_resource(&worker, Arc::clone(&r1));
        manager.record_orphaned_resource(&worker, resource("https://example.com/b.js"));
        assert_eq!(manager.orphan_count(&worker), 2);

        let drained = manager.adopt_orphaned_resources_for_target(&worker);
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].id(), r1.id());

        assert!(manager.adopt_orphaned_resources_for_target(&worker).is_empty());
        assert_eq!(manager.orphan_count(&worker), 0);
    }

    #[test]
    fn test_orphans_keyed_per_worker() {
        let manager = FrameResourceManager::new();
        manager.record_orphaned_resource(&TargetId::new("w1"), resource("https://a.test/1.js"));
        manager.record_orphaned_resource(&TargetId::new("w2"), resource("https://a.test/2.js"));

        let drained = manager.adopt_orphaned_resources_for_target(&TargetId::new("w1"));
        assert_eq!(drained.len(), 1);
        assert_eq!(manager.orphan_count(&TargetId::new("w2")), 1);
    }
}
