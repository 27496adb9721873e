//! Shared collaborators handed to targets at construction.

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::Connection;
use crate::display::UiStrings;
use crate::managers::{DebuggerManager, FrameManager};

use super::{DebuggableType, EnvironmentBuilder, Settings};

// ============================================================================
// Types
// ============================================================================

pub(crate) struct EnvironmentInner {
    pub main_connection: Connection,
    pub frames: Arc<dyn FrameManager>,
    pub debugger: Arc<dyn DebuggerManager>,
    pub debuggable_type: DebuggableType,
    pub strings: UiStrings,
    pub settings: RwLock<Settings>,
}

// ============================================================================
// Environment
// ============================================================================

/// Dependency-injection context for target construction.
///
/// Holds the main connection, the frame/resource and debugger managers,
/// user settings and the localization table. Cheap to clone.
///
/// # Example
///
/// ```ignore
/// let frames = Arc::new(FrameResourceManager::new());
/// let env = Environment::builder()
///     .main_connection(Connection::main(agents))
///     .frames(frames.clone())
///     .settings(Settings::new().with_type_information(true))
///     .build();
///
/// let main = Target::new_main(&env)?;
/// ```
#[derive(Clone)]
pub struct Environment {
    pub(crate) inner: Arc<EnvironmentInner>,
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("main_connection", &self.inner.main_connection)
            .field("debuggable_type", &self.inner.debuggable_type)
            .field("settings", &*self.inner.settings.read())
            .finish_non_exhaustive()
    }
}

impl Environment {
    /// Creates an environment builder.
    #[inline]
    #[must_use]
    pub fn builder() -> EnvironmentBuilder {
        EnvironmentBuilder::new()
    }
}

// ============================================================================
// Environment - Accessors
// ============================================================================

impl Environment {
    /// Returns the primary page connection.
    #[inline]
    #[must_use]
    pub fn main_connection(&self) -> &Connection {
        &self.inner.main_connection
    }

    /// Returns the frame/resource manager.
    #[inline]
    #[must_use]
    pub fn frames(&self) -> &Arc<dyn FrameManager> {
        &self.inner.frames
    }

    /// Returns the debugger manager.
    #[inline]
    #[must_use]
    pub fn debugger(&self) -> &Arc<dyn DebuggerManager> {
        &self.inner.debugger
    }

    /// Returns what kind of process is being inspected.
    #[inline]
    #[must_use]
    pub fn debuggable_type(&self) -> DebuggableType {
        self.inner.debuggable_type
    }

    /// Returns the localized text for `key`.
    #[inline]
    #[must_use]
    pub fn ui_string<'a>(&'a self, key: &'a str) -> &'a str {
        self.inner.strings.lookup(key)
    }

    /// Returns a snapshot of the current settings.
    #[inline]
    #[must_use]
    pub fn settings(&self) -> Settings {
        *self.inner.settings.read()
    }

    /// Updates settings in place.
    ///
    /// Affects targets created afterwards.
    pub fn update_settings(&self, update: impl FnOnce(&mut Settings)) {
        update(&mut *self.inner.settings.write());
    }
}

// ============================================================================
// Tests
// ============================================================================
