//! Login flow.
//!
//! Email/password sign-in with the provider's rejection reasons mapped to
//! field-level messages. A fixed smoothing delay precedes the provider call
//! so the loading state does not flicker on fast networks; it is not a
//! retry mechanism.

use driftwood_core::Email;
use secrecy::SecretString;
use tracing::warn;

use crate::config::AccountsConfig;
use crate::error::FlowError;
use crate::flows::{Destination, FlowPhase, SubmitOutcome};
use crate::form::FormState;
use crate::identity::{IdentityError, IdentityGateway};
use crate::validate;

/// Shown against the email field when no account exists.
pub const USER_NOT_FOUND: &str = "User not found";
/// Shown against the password field on a credential mismatch.
pub const INCORRECT_PASSWORD: &str = "Incorrect Password";
/// Catch-all shown against the password field for every other rejection.
pub const TOO_MANY_REQUESTS: &str = "Too many requests, please try again later";

/// Fields of the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoginField {
    Email,
    Password,
}

/// How the provider rejected the last attempt, mapped for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginRejection {
    UserNotFound,
    WrongPassword,
    TooManyRequests,
}

/// State machine behind the login form.
pub struct LoginFlow<G> {
    gateway: G,
    config: AccountsConfig,
    form: FormState<LoginField>,
    phase: FlowPhase,
    rejection: Option<LoginRejection>,
    remember_me: bool,
}

impl<G: IdentityGateway> LoginFlow<G> {
    /// New flow over the injected gateway.
    #[must_use]
    pub fn new(gateway: G, config: AccountsConfig) -> Self {
        Self {
            gateway,
            config,
            form: FormState::new(),
            phase: FlowPhase::Editing,
            rejection: None,
            // Checked by default, captured but behaviorally inert: session
            // persistence belongs to the excluded session collaborator.
            remember_me: true,
        }
    }

    /// Replace a field's value and re-validate it.
    pub fn set_field(&mut self, field: LoginField, value: impl Into<String>) {
        self.form.set_value(field, value);
        self.validate_field(field);
    }

    /// Re-validate a field on blur.
    pub fn blur(&mut self, field: LoginField) {
        self.validate_field(field);
    }

    /// The form state, for rendering values and visible errors.
    #[must_use]
    pub const fn form(&self) -> &FormState<LoginField> {
        &self.form
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    /// Toggle the "remember me" capture.
    pub fn set_remember_me(&mut self, remember: bool) {
        self.remember_me = remember;
    }

    /// Current "remember me" capture.
    #[must_use]
    pub const fn remember_me(&self) -> bool {
        self.remember_me
    }

    /// Message to show against the email field: the validation error if
    /// any, else the not-found rejection.
    #[must_use]
    pub fn visible_email_error(&self) -> Option<&'static str> {
        self.form.visible_error(LoginField::Email).or_else(|| {
            (self.form.submit_attempted() && self.rejection == Some(LoginRejection::UserNotFound))
                .then_some(USER_NOT_FOUND)
        })
    }

    /// Message to show against the password field: the validation error if
    /// any, else the mapped rejection.
    #[must_use]
    pub fn visible_password_error(&self) -> Option<&'static str> {
        self.form.visible_error(LoginField::Password).or_else(|| {
            if !self.form.submit_attempted() {
                return None;
            }
            match self.rejection {
                Some(LoginRejection::WrongPassword) => Some(INCORRECT_PASSWORD),
                Some(LoginRejection::TooManyRequests) => Some(TOO_MANY_REQUESTS),
                _ => None,
            }
        })
    }

    /// Drive one submission: validate both fields, wait out the smoothing
    /// delay, sign in, and map any rejection. Rejection flags are reset
    /// before each attempt so stale messages never survive a retry.
    ///
    /// # Errors
    ///
    /// Never returns an error today: every provider rejection is mapped to
    /// a visible message. The `Result` keeps the submission signature
    /// uniform across flows.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        self.form.mark_submit_attempted();
        self.rejection = None;

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
        let Ok(email) = Email::parse(self.form.value(LoginField::Email)) else {
            self.form
                .set_validation(LoginField::Email, Err(validate::INVALID_EMAIL));
            self.phase = FlowPhase::Editing;
            return Ok(SubmitOutcome::Blocked);
        };
        let password = SecretString::from(self.form.value(LoginField::Password).to_owned());

        match self.gateway.sign_in(&email, &password).await {
            Ok(_account) => {
                self.form.reset();
                self.phase = FlowPhase::Succeeded;
                Ok(SubmitOutcome::Navigate(Destination::AuthenticatedHome))
            }
            Err(err) => {
                warn!("Login failed: {err}");
                // First match wins; everything unmatched folds into the
                // too-many-requests catch-all.
                self.rejection = Some(match err {
                    IdentityError::UserNotFound => LoginRejection::UserNotFound,
                    IdentityError::WrongPassword => LoginRejection::WrongPassword,
                    _ => LoginRejection::TooManyRequests,
                });
                self.phase = FlowPhase::Failed(err.into());
                Ok(SubmitOutcome::Rejected)
            }
        }
    }

    fn validate_field(&mut self, field: LoginField) {
        let value = self.form.value(field).to_owned();
        let result = match field {
            LoginField::Email => validate::email(&value),
            LoginField::Password => {
                // Login only requires a password; strength rules apply at
                // registration time.
                if value.is_empty() {
                    Err(validate::PASSWORD_REQUIRED)
                } else {
                    Ok(())
                }
            }
        };
        self.form.set_validation(field, result);
    }

    fn validate_all(&mut self) {
        for field in [LoginField::Email, LoginField::Password] {
            self.validate_field(field);
        }
    }
}
