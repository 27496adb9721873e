//! Inspector configuration.
//!
//! Configuration is plain JSON with camelCase keys; every field is
//! optional.
//!
//! ```json
//! {
//!   "debuggableType": "web",
//!   "settings": {
//!     "showJavaScriptTypeInformation": true,
//!     "enableControlFlowProfiler": false
//!   },
//!   "localizedStrings": { "Main Frame": "Cadre principal" }
//! }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::display::UiStrings;
use crate::error::{Error, Result};

// ============================================================================
// DebuggableType
// ============================================================================

/// What kind of process is being inspected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebuggableType {
    /// A web page; the main target is its main frame.
    #[default]
    #[serde(rename = "web")]
    Web,
    /// A bare JavaScript context.
    #[serde(rename = "javascript")]
    JavaScript,
}

// ============================================================================
// Settings
// ============================================================================

/// User settings consulted during target initialization.
///
/// `None` means the setting is not registered in this frontend, which is
/// treated like `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Show JavaScript type information (type profiler).
    #[serde(rename = "showJavaScriptTypeInformation")]
    pub show_javascript_type_information: Option<bool>,

    /// Enable code coverage (control-flow profiler).
    #[serde(rename = "enableControlFlowProfiler")]
    pub enable_control_flow_profiler: Option<bool>,
}

impl Settings {
    /// Creates settings with nothing registered.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            show_javascript_type_information: None,
            enable_control_flow_profiler: None,
        }
    }

    /// Registers the type information setting.
    #[inline]
    #[must_use]
    pub fn with_type_information(mut self, enabled: bool) -> Self {
        self.show_javascript_type_information = Some(enabled);
        self
    }

    /// Registers the control-flow profiler setting.
    #[inline]
    #[must_use]
    pub fn with_control_flow_profiler(mut self, enabled: bool) -> Self {
        self.enable_control_flow_profiler = Some(enabled);
        self
    }

    /// Returns `true` if the type profiler should be enabled.
    #[inline]
    #[must_use]
    pub fn wants_type_profiler(&self) -> bool {
        self.show_javascript_type_information == Some(true)
    }

    /// Returns `true` if the control-flow profiler should be enabled.
    #[inline]
    #[must_use]
    pub fn wants_control_flow_profiler(&self) -> bool {
        self.enable_control_flow_profiler == Some(true)
    }
}

// ============================================================================
// InspectorConfig
// ============================================================================

/// Loadable configuration for an [`Environment`](super::Environment).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InspectorConfig {
    /// What kind of process is being inspected.
    pub debuggable_type: DebuggableType,

    /// User settings.
    pub settings: Settings,

    /// Localization table.
    pub localized_strings: UiStrings,
}

impl InspectorConfig {
    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// - [`Error::Json`] if the input is not valid JSON or has wrong field types
    /// - [`Error::Config`] if the top level is not a JSON object
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        if !value.is_object() {
            return Err(Error::config("expected a JSON object at top level"));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Reads configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file cannot be read
    /// - see [`InspectorConfig::from_json_str`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), debuggable_type = ?config.debuggable_type, "Configuration loaded");
        Ok(config)
    }
}

// ============================================================================
// Tests
// ============================================================================
