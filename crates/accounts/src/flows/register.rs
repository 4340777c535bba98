//! Registration flow.
//!
//! Collects first name, last name, email, and password; on submit it
//! creates the provider account, writes the initial profile document, and
//! sets the display name plus a default avatar. The three writes are
//! sequential with no rollback: a failure after account creation leaves
//! the account without its profile document or display name, surfaced as
//! [`FlowError::PartialWrite`].

use driftwood_core::{Email, PersonName};
use secrecy::SecretString;
use tracing::warn;

use crate::config::AccountsConfig;
use crate::error::{FlowError, PendingWrite};
use crate::flows::{Destination, FlowPhase, SubmitOutcome};
use crate::form::FormState;
use crate::identity::{IdentityError, IdentityGateway, ProfileChanges};
use crate::store::{ProfileDocument, ProfileStore};
use crate::validate;

/// Shown against the email field when the provider reports the address as
/// already registered.
pub const EMAIL_IN_USE: &str = "Email Already In Use";
/// Shown for any other provider rejection of the registration.
pub const REGISTRATION_FAILED: &str = "Registration failed, please try again later";

/// Fields of the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegisterField {
    FirstName,
    LastName,
    Email,
    Password,
}

/// State machine behind the registration form.
pub struct RegistrationFlow<G, S> {
    gateway: G,
    store: S,
    config: AccountsConfig,
    form: FormState<RegisterField>,
    phase: FlowPhase,
    email_in_use: bool,
    provider_error: Option<&'static str>,
}

impl<G: IdentityGateway, S: ProfileStore> RegistrationFlow<G, S> {
    /// New flow over the injected gateway and store.
    #[must_use]
    pub fn new(gateway: G, store: S, config: AccountsConfig) -> Self {
        Self {
            gateway,
            store,
            config,
            form: FormState::new(),
            phase: FlowPhase::Editing,
            email_in_use: false,
            provider_error: None,
        }
    }

    /// Replace a field's value and re-validate it.
    pub fn set_field(&mut self, field: RegisterField, value: impl Into<String>) {
        self.form.set_value(field, value);
        self.validate_field(field);
    }

    /// Re-validate a field on blur.
    pub fn blur(&mut self, field: RegisterField) {
        self.validate_field(field);
    }

    /// The form state, for rendering values and visible errors.
    #[must_use]
    pub const fn form(&self) -> &FormState<RegisterField> {
        &self.form
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    /// Whether the last attempt was rejected for an in-use email.
    #[must_use]
    pub const fn email_in_use(&self) -> bool {
        self.email_in_use
    }

    /// Message to show against the email field: the validation error if any,
    /// else the in-use rejection. Gated on the submit-attempted flag like
    /// every other message.
    #[must_use]
    pub fn visible_email_error(&self) -> Option<&'static str> {
        self.form.visible_error(RegisterField::Email).or_else(|| {
            (self.email_in_use && self.form.submit_attempted()).then_some(EMAIL_IN_USE)
        })
    }

    /// Form-level message for provider rejections other than an in-use
    /// email.
    #[must_use]
    pub fn visible_provider_error(&self) -> Option<&'static str> {
        if self.form.submit_attempted() {
            self.provider_error
        } else {
            None
        }
    }

    /// Drive one submission.
    ///
    /// Steps, in order: validate every field; create the provider account;
    /// upsert the profile document (first/last/email and, matching the
    /// deployed document shape, the password); set display name and default
    /// avatar; reset the form and signal navigation.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::PartialWrite`] when the account was created but
    /// the document or display-name write failed. Mapped provider
    /// rejections are not errors; they come back as
    /// [`SubmitOutcome::Rejected`] with the message on the form.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        self.form.mark_submit_attempted();
        self.email_in_use = false;
        self.provider_error = None;

        self.validate_all();
        if !self.form.is_valid() {
            return Ok(SubmitOutcome::Blocked);
        }

        self.phase = FlowPhase::Submitting;
        self.form.begin_submit();
        tokio::time::sleep(self.config.submit_delay).await;

        let outcome = self.run_submission().await;
        self.form.end_submit();
        outcome
    }

    async fn run_submission(&mut self) -> Result<SubmitOutcome, FlowError> {
        // Validation passed, so the parse cannot fail; treat a mismatch as
        // a fresh validation failure rather than panicking.
        let Ok(email) = Email::parse(self.form.value(RegisterField::Email)) else {
            self.form
                .set_validation(RegisterField::Email, Err(validate::INVALID_EMAIL));
            self.phase = FlowPhase::Editing;
            return Ok(SubmitOutcome::Blocked);
        };
        let password = SecretString::from(self.form.value(RegisterField::Password).to_owned());

        let account = match self.gateway.create_account(&email, &password).await {
            Ok(account) => account,
            Err(IdentityError::EmailInUse) => {
                warn!(email = %email, "Registration rejected: email already in use");
                self.email_in_use = true;
                self.phase = FlowPhase::Failed(IdentityError::EmailInUse.into());
                return Ok(SubmitOutcome::Rejected);
            }
            Err(err) => {
                warn!("Registration failed: {err}");
                self.provider_error = Some(REGISTRATION_FAILED);
                self.phase = FlowPhase::Failed(err.into());
                return Ok(SubmitOutcome::Rejected);
            }
        };

        let name = PersonName::new(
            self.form.value(RegisterField::FirstName),
            self.form.value(RegisterField::LastName),
        );

        let document = ProfileDocument::registration(&name, email, &password);
        if let Err(err) = self
            .store
            .upsert(&self.config.collection, &account, &document)
            .await
        {
            let err = FlowError::partial_write(account, PendingWrite::ProfileDocument, err);
            tracing::error!("Registration left account inconsistent: {err}");
            self.phase = FlowPhase::Failed(err.clone());
            return Err(err);
        }

        let changes = ProfileChanges::display_name(name.display_name())
            .with_photo_url(self.config.default_avatar_url.clone());
        if let Err(err) = self.gateway.update_profile(&changes).await {
            let err = FlowError::partial_write(account, PendingWrite::DisplayName, err);
            tracing::error!("Registration left account inconsistent: {err}");
            self.phase = FlowPhase::Failed(err.clone());
            return Err(err);
        }

        self.form.reset();
        self.phase = FlowPhase::Succeeded;
        Ok(SubmitOutcome::Navigate(Destination::AuthenticatedHome))
    }

    fn validate_field(&mut self, field: RegisterField) {
        let value = self.form.value(field).to_owned();
        let result = match field {
            RegisterField::FirstName => validate::required_first_name(&value),
            RegisterField::LastName => validate::required_last_name(&value),
            RegisterField::Email => validate::email(&value),
            RegisterField::Password => validate::password(&value),
        };
        self.form.set_validation(field, result);
    }

    fn validate_all(&mut self) {
        for field in [
            RegisterField::FirstName,
            RegisterField::LastName,
            RegisterField::Email,
            RegisterField::Password,
        ] {
            self.validate_field(field);
        }
    }
}
