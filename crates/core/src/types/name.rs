//! Person name type implementing the display-name split/join policy.
//!
//! The identity provider stores a single display name string. The profile
//! document store and the edit forms work with first/last name pairs, so the
//! two representations are converted through this type.
//!
//! The split policy is deliberately simple: the first whitespace-delimited
//! token is the first name, everything after it (joined with single spaces)
//! is the last name. This is a known limitation for single-word names and
//! for cultures where the family name comes first; it is preserved here for
//! compatibility with documents already written under this policy.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A first/last name pair.
///
/// # Examples
///
/// ```
/// use driftwood_core::PersonName;
///
/// let name = PersonName::split("Ada Lovelace");
/// assert_eq!(name.first(), "Ada");
/// assert_eq!(name.last(), "Lovelace");
/// assert_eq!(name.display_name(), "Ada Lovelace");
///
/// // Multi-word last names keep every trailing token
/// let name = PersonName::split("Ada Augusta King Lovelace");
/// assert_eq!(name.last(), "Augusta King Lovelace");
///
/// // Single-token names have an empty last name
/// let name = PersonName::split("Cher");
/// assert_eq!(name.last(), "");
/// assert_eq!(name.display_name(), "Cher");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    /// Create a name from explicit first/last parts.
    ///
    /// The parts are trimmed; interior whitespace is kept as-is.
    #[must_use]
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into().trim().to_owned(),
            last: last.into().trim().to_owned(),
        }
    }

    /// Split a display name into first/last parts.
    ///
    /// First whitespace-delimited token becomes the first name; the
    /// remaining tokens, joined with single spaces, become the last name
    /// (empty when absent). An empty or all-whitespace input yields an
    /// empty name on both sides.
    #[must_use]
    pub fn split(display_name: &str) -> Self {
        let mut tokens = display_name.split_whitespace();
        let first = tokens.next().unwrap_or_default().to_owned();
        let last = tokens.collect::<Vec<_>>().join(" ");
        Self { first, last }
    }

    /// Returns the first name.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Returns the last name (empty when the display name was one token).
    #[must_use]
    pub fn last(&self) -> &str {
        &self.last
    }

    /// Recombine into a display name, normalizing spacing.
    ///
    /// Empty parts are skipped, so a missing last name never leaves a
    /// trailing space in the provider's display name.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::with_capacity(2);
        if !self.first.is_empty() {
            parts.push(self.first.as_str());
        }
        if !self.last.is_empty() {
            parts.push(self.last.as_str());
        }
        parts.join(" ")
    }

    /// Returns true when both parts are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty() && self.last.is_empty()
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
