//! Profile edit flow.
//!
//! Seeded from the current account snapshot: first/last name split from the
//! display name, phone from the account, email shown read-only and never
//! written back. On submit the profile document and the provider display
//! name are updated in sequence, and the outcome is surfaced through a
//! dismissible banner. Form values are kept for correction after failure;
//! only the banner is transient.

use driftwood_core::{AccountId, Email, PersonName, PhotoUrl};
use tracing::warn;

use crate::config::AccountsConfig;
use crate::error::{FlowError, PendingWrite};
use crate::flows::{Banner, BannerKind, FlowPhase, SubmitOutcome};
use crate::form::FormState;
use crate::identity::{IdentityGateway, ProfileChanges};
use crate::store::{ProfileDocument, ProfileStore};
use crate::validate;

/// Fields of the profile edit form. Email is deliberately absent: the page
/// shows it disabled and it is not re-validated or re-written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FirstName,
    LastName,
    Phone,
}

/// State machine behind the profile edit page.
#[derive(Debug)]
pub struct ProfileEditFlow<G, S> {
    gateway: G,
    store: S,
    config: AccountsConfig,
    account: AccountId,
    email: Email,
    email_verified: bool,
    photo_url: Option<PhotoUrl>,
    form: FormState<ProfileField>,
    phase: FlowPhase,
    banner: Option<Banner>,
}

impl<G: IdentityGateway, S: ProfileStore> ProfileEditFlow<G, S> {
    /// Build the flow for the currently signed-in account, seeding the form
    /// from the account snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::NoCurrentAccount`] when nobody is signed in.
    pub fn for_current_account(
        gateway: G,
        store: S,
        config: AccountsConfig,
    ) -> Result<Self, FlowError> {
        let snapshot = gateway
            .current_account()
            .ok_or(FlowError::NoCurrentAccount)?;

        let name = PersonName::split(snapshot.display_name.as_deref().unwrap_or_default());
        let mut form = FormState::new();
        form.set_value(ProfileField::FirstName, name.first());
        form.set_value(ProfileField::LastName, name.last());
        form.set_value(ProfileField::Phone, snapshot.phone_number.unwrap_or_default());

        Ok(Self {
            gateway,
            store,
            config,
            account: snapshot.id,
            email: snapshot.email,
            email_verified: snapshot.email_verified,
            photo_url: snapshot.photo_url,
            form,
            phase: FlowPhase::Editing,
            banner: None,
        })
    }

    /// Replace a field's value and re-validate it.
    pub fn set_field(&mut self, field: ProfileField, value: impl Into<String>) {
        self.form.set_value(field, value);
        self.validate_field(field);
    }

    /// Re-validate a field on blur.
    pub fn blur(&mut self, field: ProfileField) {
        self.validate_field(field);
    }

    /// The form state, for rendering values and visible errors.
    #[must_use]
    pub const fn form(&self) -> &FormState<ProfileField> {
        &self.form
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    /// The account's email, displayed read-only.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Whether the provider has verified the email.
    #[must_use]
    pub const fn email_verified(&self) -> bool {
        self.email_verified
    }

    /// Photo URL for display, with the federated thumbnail token upgraded
    /// to the higher-resolution variant. The stored URL is untouched.
    #[must_use]
    pub fn display_photo_url(&self) -> Option<String> {
        self.photo_url.as_ref().map(PhotoUrl::display_url)
    }

    /// The outcome banner, if one has been raised.
    #[must_use]
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Dismiss the banner without touching the underlying result.
    pub fn dismiss_banner(&mut self) {
        if let Some(banner) = &mut self.banner {
            banner.dismiss();
        }
    }

    /// Drive one submission: validate, wait out the smoothing delay, upsert
    /// the profile document (names and phone, never email), then write the
    /// recombined display name back to the provider. Either outcome raises
    /// the banner; failures also come back as errors so the caller can see
    /// whether the account was left inconsistent.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Store`] when the document write fails before
    /// anything changed provider-side, or [`FlowError::PartialWrite`] when
    /// the document landed but the display-name update failed.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        self.form.mark_submit_attempted();
        self.banner = None;

        self.validate_all();
        if !self.form.is_valid() {
            return Ok(SubmitOutcome::Blocked);
        }

        self.phase = FlowPhase::Submitting;
        self.form.begin_submit();
        tokio::time::sleep(self.config.profile_submit_delay).await;

        let outcome = self.run_submission().await;
        self.form.end_submit();
        outcome
    }

    async fn run_submission(&mut self) -> Result<SubmitOutcome, FlowError> {
        let name = PersonName::new(
            self.form.value(ProfileField::FirstName),
            self.form.value(ProfileField::LastName),
        );
        let document =
            ProfileDocument::profile_update(&name, self.form.value(ProfileField::Phone));

        if let Err(err) = self
            .store
            .upsert(&self.config.collection, &self.account, &document)
            .await
        {
            warn!("Profile update failed: {err}");
            let err = FlowError::from(err);
            self.banner = Some(Banner::show(BannerKind::Error));
            self.phase = FlowPhase::Failed(err.clone());
            return Err(err);
        }

        let changes = ProfileChanges::display_name(name.display_name());
        if let Err(err) = self.gateway.update_profile(&changes).await {
            let err =
                FlowError::partial_write(self.account.clone(), PendingWrite::DisplayName, err);
            tracing::error!("Profile update left account inconsistent: {err}");
            self.banner = Some(Banner::show(BannerKind::Error));
            self.phase = FlowPhase::Failed(err.clone());
            return Err(err);
        }

        self.banner = Some(Banner::show(BannerKind::Success));
        self.phase = FlowPhase::Succeeded;
        Ok(SubmitOutcome::Completed)
    }

    fn validate_field(&mut self, field: ProfileField) {
        let value = self.form.value(field).to_owned();
        let result = match field {
            // First/last name are optional on the edit form; empty is valid.
            ProfileField::FirstName | ProfileField::LastName => {
                validate::optional_name(&value)
            }
            ProfileField::Phone => validate::phone(&value),
        };
        self.form.set_validation(field, result);
    }

    fn validate_all(&mut self) {
        for field in [
            ProfileField::FirstName,
            ProfileField::LastName,
            ProfileField::Phone,
        ] {
            self.validate_field(field);
        }
    }
}
