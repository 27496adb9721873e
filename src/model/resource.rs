//! Resources discovered under a target.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::identifiers::{FrameId, ResourceId, TargetId};
use crate::target::{Target, WeakTarget};

// ============================================================================
// ResourceType
// ============================================================================

/// Kind of load a resource represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceType {
    /// HTML document or worker main script.
    Document,
    /// CSS stylesheet.
    Stylesheet,
    /// Image.
    Image,
    /// Web font.
    Font,
    /// Script file.
    Script,
    /// XMLHttpRequest.
    Xhr,
    /// Fetch API request.
    Fetch,
    /// WebSocket.
    WebSocket,
    /// Anything else.
    Other,
}

impl ResourceType {
    /// Returns the protocol name.
    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Document => "document",
            Self::Stylesheet => "stylesheet",
            Self::Image => "image",
            Self::Font => "font",
            Self::Script => "script",
            Self::Xhr => "xhr",
            Self::Fetch => "fetch",
            Self::WebSocket => "webSocket",
            Self::Other => "other",
        }
    }
}

// ============================================================================
// Resource
// ============================================================================

/// Owner back-reference, set at adoption.
struct Owner {
    target_id: TargetId,
    target: WeakTarget,
}

/// A network load or document belonging to a target.
///
/// The owner back-reference does not keep the target alive.
pub struct Resource {
    id: ResourceId,
    url: String,
    resource_type: ResourceType,
    frame_id: Option<FrameId>,
    owner: RwLock<Option<Owner>>,
}

impl fmt::Debug for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("resource_type", &self.resource_type)
            .field("target_id", &self.target_id())
            .finish_non_exhaustive()
    }
}

impl Resource {
    /// Creates an unowned resource with a fresh identity.
    #[must_use]
    pub fn new(url: impl Into<String>, resource_type: ResourceType) -> Self {
        Self {
            id: ResourceId::generate(),
            url: url.into(),
            resource_type,
            frame_id: None,
            owner: RwLock::new(None),
        }
    }

    /// Records the frame the resource was loaded in.
    #[must_use]
    pub fn with_frame(mut self, frame_id: FrameId) -> Self {
        self.frame_id = Some(frame_id);
        self
    }
}

// ============================================================================
// Resource - Accessors
// ============================================================================

impl Resource {
    /// Returns the resource identity.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    /// Returns the resource URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the resource type.
    #[inline]
    #[must_use]
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Returns the frame the resource was loaded in.
    #[inline]
    #[must_use]
    pub fn frame_id(&self) -> Option<&FrameId> {
        self.frame_id.as_ref()
    }

    /// Returns the owning target, if adopted and still alive.
    #[must_use]
    pub fn target(&self) -> Option<Target> {
        self.owner.read().as_ref().and_then(|o| o.target.upgrade())
    }

    /// Returns the owning target's identifier, if adopted.
    ///
    /// Remains available after the owner is dropped.
    #[must_use]
    pub fn target_id(&self) -> Option<TargetId> {
        self.owner.read().as_ref().map(|o| o.target_id.clone())
    }

    /// Returns `true` once the resource has been adopted.
    #[inline]
    #[must_use]
    pub fn is_adopted(&self) -> bool {
        self.owner.read().is_some()
    }
}

// ============================================================================
// Resource - Adoption
// ============================================================================

impl Resource {
    /// Points the owner back-reference at `target`.
    ///
    /// Re-adopting into the same target is a no-op. A resource owned by a
    /// different live target is refused; a dropped owner may be replaced.
    pub(crate) fn set_target(&self, target: &Target) -> Result<()> {
        let mut owner = self.owner.write();

        if let Some(current) = owner.as_ref() {
            if current.target.points_to(target) {
                return Ok(());
            }
            if current.target.upgrade().is_some() {
                return Err(Error::already_adopted(self.id, current.target_id.clone()));
            }
        }

        trace!(resource_id = %self.id, target_id = %target.identifier(), "Resource owner set");
        *owner = Some(Owner {
            target_id: target.identifier().clone(),
            target: target.downgrade(),
        });
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
