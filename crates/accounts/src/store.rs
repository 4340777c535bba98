//! Profile document store capability.
//!
//! Adapter over the hosted document store's upsert operation. Profile
//! documents are a projection of a subset of account fields, keyed by the
//! provider-issued account id; writing the same key twice overwrites, so
//! resubmission is naturally idempotent.

use driftwood_core::{AccountId, Email, PersonName};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Errors returned by the document store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The store rejected or failed the write.
    #[error("document store error: {0}")]
    Backend(String),
}

/// A profile document as written to the store.
///
/// Three shapes exist, one per writing flow; absent fields are omitted from
/// the stored document rather than written as nulls:
///
/// - registration: first/last name, email, password
/// - federated sign-in: first/last name, email
/// - profile edit: first/last name, phone (email intentionally excluded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDocument {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileDocument {
    /// Document written when registering with email and password.
    ///
    /// The password is duplicated into the store alongside the provider's
    /// own credential record. This mirrors the deployed behavior and is a
    /// known data-duplication gap; see DESIGN.md.
    #[must_use]
    pub fn registration(name: &PersonName, email: Email, password: &SecretString) -> Self {
        Self {
            first_name: name.first().to_owned(),
            last_name: name.last().to_owned(),
            email: Some(email),
            phone: None,
            password: Some(password.expose_secret().to_owned()),
        }
    }

    /// Document written after a federated sign-in (no password exists).
    #[must_use]
    pub fn federated(name: &PersonName, email: Email) -> Self {
        Self {
            first_name: name.first().to_owned(),
            last_name: name.last().to_owned(),
            email: Some(email),
            phone: None,
            password: None,
        }
    }

    /// Document written by a profile edit. Email is intentionally excluded;
    /// the edit form shows it read-only and never writes it back.
    #[must_use]
    pub fn profile_update(name: &PersonName, phone: impl Into<String>) -> Self {
        Self {
            first_name: name.first().to_owned(),
            last_name: name.last().to_owned(),
            email: None,
            phone: Some(phone.into()),
            password: None,
        }
    }
}

/// Capability set exposed by the document store.
pub trait ProfileStore {
    /// Upsert a profile document under the given collection and account id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Backend`] when the write fails.
    fn upsert(
        &self,
        collection: &str,
        id: &AccountId,
        document: &ProfileDocument,
    ) -> impl Future<Output = Result<(), StoreError>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_document_shape() {
        let name = PersonName::new("Ada", "Lovelace");
        let email = Email::parse("ada@example.com").unwrap();
        let password = SecretString::from("Str0ng!Pass");
        let doc = ProfileDocument::registration(&name, email, &password);

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "password": "Str0ng!Pass",
            })
        );
    }

    #[test]
    fn test_federated_document_has_no_password() {
        let name = PersonName::split("Ada Lovelace");
        let email = Email::parse("ada@example.com").unwrap();
        let doc = ProfileDocument::federated(&name, email);

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("password").is_none());
        assert!(json.get("phone").is_none());
        assert_eq!(json["email"], "ada@example.com");
    }

    #[test]
    fn test_profile_update_excludes_email() {
        let name = PersonName::new("Ada", "Lovelace");
        let doc = ProfileDocument::profile_update(&name, "555-123-4567");

        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("email").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["phone"], "555-123-4567");
    }
}
