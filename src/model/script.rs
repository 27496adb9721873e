//! Scripts not backed by an addressable resource.

use crate::display::display_name_for_url;
use crate::identifiers::ScriptId;

/// A parsed script reported by the remote end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    id: ScriptId,
    url: Option<String>,
    source_url: Option<String>,
    injected: bool,
}

impl Script {
    /// Creates an anonymous script.
    #[must_use]
    pub fn new(id: ScriptId) -> Self {
        Self {
            id,
            url: None,
            source_url: None,
            injected: false,
        }
    }

    /// Sets the URL the script was loaded from.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the `//# sourceURL` name.
    #[must_use]
    pub fn with_source_url(mut self, source_url: impl Into<String>) -> Self {
        self.source_url = Some(source_url.into());
        self
    }

    /// Marks the script as injected by the inspector itself.
    #[must_use]
    pub fn injected(mut self) -> Self {
        self.injected = true;
        self
    }

    /// Returns the protocol script identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ScriptId {
        &self.id
    }

    /// Returns the load URL.
    #[inline]
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Returns the `//# sourceURL` name.
    #[inline]
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Returns `true` if injected by the inspector.
    #[inline]
    #[must_use]
    pub fn is_injected(&self) -> bool {
        self.injected
    }

    /// Returns a user-facing name.
    ///
    /// Prefers the `sourceURL` name over the load URL.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.source_url
            .as_deref()
            .or(self.url.as_deref())
            .map(display_name_for_url)
            .unwrap_or_else(|| "Anonymous Script".to_string())
    }
}
