//! Page frames.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::identifiers::FrameId;

use super::Resource;

// ============================================================================
// Frame
// ============================================================================

/// A frame in the inspected page.
///
/// The main resource changes on every committed navigation.
#[derive(Debug)]
pub struct Frame {
    id: FrameId,
    parent_id: Option<FrameId>,
    main_resource: RwLock<Option<Arc<Resource>>>,
}

impl Frame {
    /// Creates a top-level frame with no main resource yet.
    #[must_use]
    pub fn new(id: FrameId) -> Self {
        Self {
            id,
            parent_id: None,
            main_resource: RwLock::new(None),
        }
    }

    /// Marks this frame as a child of `parent_id`.
    #[must_use]
    pub fn with_parent(mut self, parent_id: FrameId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// Returns the frame identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &FrameId {
        &self.id
    }

    /// Returns the parent frame identifier.
    #[inline]
    #[must_use]
    pub fn parent_id(&self) -> Option<&FrameId> {
        self.parent_id.as_ref()
    }

    /// Returns `true` for a top-level frame.
    #[inline]
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Returns the current main resource.
    #[must_use]
    pub fn main_resource(&self) -> Option<Arc<Resource>> {
        self.main_resource.read().clone()
    }

    /// Returns the URL of the current main resource.
    #[must_use]
    pub fn url(&self) -> Option<String> {
        self.main_resource
            .read()
            .as_ref()
            .map(|r| r.url().to_string())
    }

    /// Replaces the main resource after a navigation.
    pub fn set_main_resource(&self, resource: Arc<Resource>) {
        *self.main_resource.write() = Some(resource);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceType;

    #[test]
    fn test_navigation_replaces_main_resource() {
        let frame = Frame::new(FrameId::new("main"));
        assert!(frame.main_resource().is_none());
        assert!(frame.url().is_none());

        frame.set_main_resource(Arc::new(Resource::new("https://a.test/", ResourceType::Document)));
        assert_eq!(frame.url().as_deref(), Some("https://a.test/"));

        frame.set_main_resource(Arc::new(Resource::new("https://b.test/", ResourceType::Document)));
        assert_eq!(frame.url().as_deref(), Some("https://b.test/"));
    }

    #[test]
    fn test_child_frame() {
        let child = Frame::new(FrameId::new("child")).with_parent(FrameId::new("main"));
        assert!(!child.is_top_level());
        assert_eq!(child.parent_id(), Some(&FrameId::new("main")));
    }
}
