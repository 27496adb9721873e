//! User-facing strings.
//!
//! [`UiStrings`] is the localization table consulted for fixed labels;
//! [`display_name_for_url`] turns a URL into the short name shown for
//! workers and scripts.

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use url::Url;

// ============================================================================
// Constants
// ============================================================================

/// Horizontal ellipsis.
const ELLIPSIS: char = '\u{2026}';

/// Maximum length of a `data:` URL header before middle truncation.
const DATA_URL_HEADER_MAX: usize = 40;

/// Payloads this long or longer are shortened.
const DATA_URL_PAYLOAD_MAX: usize = 6;

// ============================================================================
// UiStrings
// ============================================================================

/// Localization table mapping English keys to display text.
///
/// Missing keys fall back to the key itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct UiStrings(FxHashMap<String, String>);

impl UiStrings {
    /// Creates an empty table.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a translation.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Looks up the display text for `key`.
    #[must_use]
    pub fn lookup<'a>(&'a self, key: &'a str) -> &'a str {
        self.0.get(key).map_or(key, String::as_str)
    }

    /// Returns the number of translations.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no translations are loaded.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// URL Display Names
// ============================================================================

/// Returns a short display name for `url`.
///
/// - `data:` URLs are truncated
/// - otherwise the percent-decoded last path component
/// - falling back to the host, then to `url` unchanged
#[must_use]
pub fn display_name_for_url(url: &str) -> String {
    if url.starts_with("data:") {
        return truncate_data_url(url);
    }

    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let last = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();

    let decoded = urlencoding::decode(last).unwrap_or(Cow::Borrowed(last));
    if !decoded.is_empty() {
        return decoded.into_owned();
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => host.to_string(),
        _ => url.to_string(),
    }
}

/// Shortens a `data:` URL to its header plus a few payload characters.
fn truncate_data_url(url: &str) -> String {
    let split = url.find(',').map_or(0, |i| i + 1);
    let (header, payload) = url.split_at(split);

    let mut out = truncate_middle(header, DATA_URL_HEADER_MAX);

    let chars: Vec<char> = payload.chars().collect();
    if chars.len() < DATA_URL_PAYLOAD_MAX {
        out.push_str(payload);
        return out;
    }

    let head = DATA_URL_PAYLOAD_MAX.div_ceil(2);
    let tail = DATA_URL_PAYLOAD_MAX / 2;
    out.extend(&chars[..head]);
    out.push(ELLIPSIS);
    out.extend(&chars[chars.len() - tail..]);
    out
}

/// Truncates `s` to `max` chars by replacing its middle with an ellipsis.
fn truncate_middle(s: &str, max: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max {
        return s.to_string();
    }

    let left = max / 2;
    let right = max - left - 1;
    let mut out: String = chars[..left].iter().collect();
    out.push(ELLIPSIS);
    out.extend(&chars[chars.len() - right..]);
    out
}

// ============================================================================
// Tests
// ============================================================================
