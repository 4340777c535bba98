//! Identity gateway capability.
//!
//! Thin abstraction over the hosted identity provider's account-creation,
//! sign-in, federated-sign-in, and profile-update operations. The provider
//! itself is a black box: credentials are held provider-side, sessions are
//! its concern, and account ids are opaque. Flows consume this trait via
//! generics, so any provider client (or the in-memory double in
//! [`crate::testing`]) can be injected.

use driftwood_core::{AccountId, Email, PhotoUrl};
use secrecy::SecretString;

/// Errors returned by the identity provider, mapped to the cases the flows
/// distinguish. Anything the provider reports outside these cases lands in
/// [`IdentityError::Provider`] with the provider's reason string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// The email is already registered with the provider.
    #[error("email already registered")]
    EmailInUse,

    /// No account exists for the given email.
    #[error("user not found")]
    UserNotFound,

    /// The password does not match the account.
    #[error("wrong password")]
    WrongPassword,

    /// The provider is throttling requests.
    #[error("too many requests")]
    RateLimited,

    /// Any other provider rejection, carrying the provider's reason code.
    #[error("identity provider error: {0}")]
    Provider(String),
}

/// Readable snapshot of the currently signed-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Provider-issued account id.
    pub id: AccountId,
    /// Account email address.
    pub email: Email,
    /// Whether the provider has verified the email.
    pub email_verified: bool,
    /// Combined "first last" display name, if set.
    pub display_name: Option<String>,
    /// Phone number, if set.
    pub phone_number: Option<String>,
    /// Profile photo URL, if set.
    pub photo_url: Option<PhotoUrl>,
}

/// Result of a federated (social) sign-in exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedAccount {
    /// Provider-issued account id.
    pub id: AccountId,
    /// Display name as reported by the federated provider.
    pub display_name: Option<String>,
    /// Email address released by the federated provider.
    pub email: Email,
}

/// Profile fields to update on the current account.
///
/// `None` fields are left untouched by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileChanges {
    /// New combined display name.
    pub display_name: Option<String>,
    /// New profile photo URL.
    pub photo_url: Option<String>,
}

impl ProfileChanges {
    /// Changes that only set the display name.
    #[must_use]
    pub fn display_name(name: impl Into<String>) -> Self {
        Self {
            display_name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Also set the photo URL.
    #[must_use]
    pub fn with_photo_url(mut self, url: impl Into<String>) -> Self {
        self.photo_url = Some(url.into());
        self
    }
}

/// Capability set exposed by the identity provider.
///
/// All operations act on the provider's notion of the current client
/// session; `update_profile` applies to the account most recently created
/// or signed in.
pub trait IdentityGateway {
    /// Create an account with email and password, returning the new id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::EmailInUse`] when the email is already
    /// registered, or another variant for any other provider rejection.
    fn create_account(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<AccountId, IdentityError>>;

    /// Sign in with email and password, returning the account id.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::UserNotFound`], [`IdentityError::WrongPassword`],
    /// [`IdentityError::RateLimited`], or [`IdentityError::Provider`].
    fn sign_in(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> impl Future<Output = Result<AccountId, IdentityError>>;

    /// Run the federated provider's popup/redirect exchange.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Provider`] (or [`IdentityError::RateLimited`])
    /// when the exchange fails.
    fn sign_in_with_federated_provider(
        &self,
    ) -> impl Future<Output = Result<FederatedAccount, IdentityError>>;

    /// Update display name and/or photo URL on the current account.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::Provider`] when the provider rejects the
    /// update.
    fn update_profile(
        &self,
        changes: &ProfileChanges,
    ) -> impl Future<Output = Result<(), IdentityError>>;

    /// Snapshot of the currently signed-in account, if any.
    fn current_account(&self) -> Option<AccountSnapshot>;
}
