//! Fluent builder for [`Environment`].

use std::sync::Arc;

use parking_lot::RwLock;

use crate::backend::{Agents, Connection};
use crate::display::UiStrings;
use crate::managers::{DebuggerManager, DebuggerRegistry, FrameManager, FrameResourceManager};

use super::core::EnvironmentInner;
use super::{DebuggableType, Environment, InspectorConfig, Settings};

// ============================================================================
// EnvironmentBuilder
// ============================================================================

/// Builder for an [`Environment`].
///
/// Unset collaborators default to a main connection with no agents, an
/// empty [`FrameResourceManager`] and a [`DebuggerRegistry`].
#[derive(Default)]
pub struct EnvironmentBuilder {
    main_connection: Option<Connection>,
    frames: Option<Arc<dyn FrameManager>>,
    debugger: Option<Arc<dyn DebuggerManager>>,
    config: InspectorConfig,
}

impl EnvironmentBuilder {
    /// Creates a builder with defaults.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primary page connection.
    #[must_use]
    pub fn main_connection(mut self, connection: Connection) -> Self {
        self.main_connection = Some(connection);
        self
    }

    /// Sets the frame/resource manager.
    #[must_use]
    pub fn frames(mut self, frames: Arc<dyn FrameManager>) -> Self {
        self.frames = Some(frames);
        self
    }

    /// Sets the debugger manager.
    #[must_use]
    pub fn debugger(mut self, debugger: Arc<dyn DebuggerManager>) -> Self {
        self.debugger = Some(debugger);
        self
    }

    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: InspectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets what kind of process is being inspected.
    #[must_use]
    pub fn debuggable_type(mut self, debuggable_type: DebuggableType) -> Self {
        self.config.debuggable_type = debuggable_type;
        self
    }

    /// Sets user settings.
    #[must_use]
    pub fn settings(mut self, settings: Settings) -> Self {
        self.config.settings = settings;
        self
    }

    /// Sets the localization table.
    #[must_use]
    pub fn ui_strings(mut self, strings: UiStrings) -> Self {
        self.config.localized_strings = strings;
        self
    }

    /// Builds the environment.
    #[must_use]
    pub fn build(self) -> Environment {
        let InspectorConfig {
            debuggable_type,
            settings,
            localized_strings,
        } = self.config;

        Environment {
            inner: Arc::new(EnvironmentInner {
                main_connection: self
                    .main_connection
                    .unwrap_or_else(|| Connection::main(Agents::new())),
                frames: self
                    .frames
                    .unwrap_or_else(|| Arc::new(FrameResourceManager::new())),
                debugger: self
                    .debugger
                    .unwrap_or_else(|| Arc::new(DebuggerRegistry::new())),
                debuggable_type,
                strings: localized_strings,
                settings: RwLock::new(settings),
            }),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
