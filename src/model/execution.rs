//! Execution contexts.

use crate::identifiers::{ExecutionContextId, FrameId, TargetId};

/// A runtime evaluation scope belonging to one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    target_id: TargetId,
    id: ExecutionContextId,
    name: String,
    is_page_context: bool,
    frame_id: Option<FrameId>,
}

impl ExecutionContext {
    /// Creates an execution context.
    ///
    /// `is_page_context` distinguishes a page's normal world from isolated
    /// and worker contexts.
    #[must_use]
    pub fn new(
        target_id: TargetId,
        id: ExecutionContextId,
        name: impl Into<String>,
        is_page_context: bool,
        frame_id: Option<FrameId>,
    ) -> Self {
        Self {
            target_id,
            id,
            name: name.into(),
            is_page_context,
            frame_id,
        }
    }

    /// Returns the owning target's identifier.
    #[inline]
    #[must_use]
    pub fn target_id(&self) -> &TargetId {
        &self.target_id
    }

    /// Returns the context identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> ExecutionContextId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for a page's normal world.
    #[inline]
    #[must_use]
    pub fn is_page_context(&self) -> bool {
        self.is_page_context
    }

    /// Returns the frame this context runs in.
    #[inline]
    #[must_use]
    pub fn frame_id(&self) -> Option<&FrameId> {
        self.frame_id.as_ref()
    }
}
