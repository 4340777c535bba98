//! Account identifier type.
//!
//! Account ids are issued by the identity provider and are opaque to this
//! codebase: they are never parsed, never minted locally, and only used as
//! keys into the profile document store.

use core::fmt;

use serde::{Deserialize, Serialize};

/// An identity-provider-issued account identifier.
///
/// This is a newtype over `String` rather than a UUID because the provider
/// owns the id format; we only ever round-trip it.
///
/// # Example
///
/// ```
/// use driftwood_core::AccountId;
///
/// let id = AccountId::new("u-3f2c91");
/// assert_eq!(id.as_str(), "u-3f2c91");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an `AccountId` from a provider-issued string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `AccountId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for AccountId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let id = AccountId::new("abc123");
        assert_eq!(id.as_str(), "abc123");
        assert_eq!(id.clone().into_inner(), "abc123");
    }

    #[test]
    fn test_display() {
        let id = AccountId::new("abc123");
        assert_eq!(format!("{id}"), "abc123");
    }

    #[test]
    fn test_serde_transparent() {
        let id = AccountId::new("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");

        let parsed: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
