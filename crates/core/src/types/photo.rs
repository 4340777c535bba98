//! Profile photo URL type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Thumbnail size token used by the federated provider's avatar URLs.
const THUMBNAIL_SIZE_TOKEN: &str = "s96-c";
/// Size token substituted in for on-screen display.
const DISPLAY_SIZE_TOKEN: &str = "s400-c";

/// A profile photo URL.
///
/// The stored value is kept verbatim; [`PhotoUrl::display_url`] applies a
/// presentation-only rewrite for federated-provider thumbnails, substituting
/// a higher-resolution size token. The rewrite is never persisted.
///
/// # Example
///
/// ```
/// use driftwood_core::PhotoUrl;
///
/// let url = PhotoUrl::new("https://lh3.example.com/photo=s96-c");
/// assert_eq!(url.display_url(), "https://lh3.example.com/photo=s400-c");
/// assert_eq!(url.as_str(), "https://lh3.example.com/photo=s96-c");
///
/// // Non-thumbnail URLs pass through unchanged
/// let url = PhotoUrl::new("/static/mock-images/avatars/avatar_1.jpg");
/// assert_eq!(url.display_url(), "/static/mock-images/avatars/avatar_1.jpg");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct PhotoUrl(String);

impl PhotoUrl {
    /// Create a `PhotoUrl` from a stored URL string.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the stored URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhotoUrl` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the URL to display, upgrading a federated thumbnail token to
    /// the higher-resolution variant. Only the first occurrence is rewritten.
    #[must_use]
    pub fn display_url(&self) -> String {
        self.0.replacen(THUMBNAIL_SIZE_TOKEN, DISPLAY_SIZE_TOKEN, 1)
    }
}

impl fmt::Display for PhotoUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PhotoUrl {
    fn from(url: String) -> Self {
        Self(url)
    }
}

impl From<&str> for PhotoUrl {
    fn from(url: &str) -> Self {
        Self(url.to_owned())
    }
}

impl AsRef<str> for PhotoUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_url_rewrites_thumbnail_token() {
        let url = PhotoUrl::new("https://lh3.example.com/a/ABC=s96-c-no");
        assert_eq!(url.display_url(), "https://lh3.example.com/a/ABC=s400-c-no");
    }

    #[test]
    fn test_display_url_passthrough() {
        let url = PhotoUrl::new("/static/mock-images/avatars/avatar_1.jpg");
        assert_eq!(url.display_url(), url.as_str());
    }

    #[test]
    fn test_display_url_rewrites_first_occurrence_only() {
        let url = PhotoUrl::new("https://x/s96-c/s96-c");
        assert_eq!(url.display_url(), "https://x/s400-c/s96-c");
    }

    #[test]
    fn test_stored_value_untouched() {
        let url = PhotoUrl::new("https://lh3.example.com/a=s96-c");
        let _ = url.display_url();
        assert_eq!(url.as_str(), "https://lh3.example.com/a=s96-c");
    }
}
