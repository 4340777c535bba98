//! Federated (social) sign-in flow.
//!
//! Button-triggered: no form, no field validation. The federated provider
//! authenticates the user and returns an account snapshot; this flow then
//! writes the profile document (no password exists for federated accounts)
//! and normalizes the provider's display name back onto the account.

use driftwood_core::PersonName;
use tracing::warn;

use crate::config::AccountsConfig;
use crate::error::{FlowError, PendingWrite};
use crate::flows::{Destination, FlowPhase, SubmitOutcome};
use crate::identity::{IdentityGateway, ProfileChanges};
use crate::store::{ProfileDocument, ProfileStore};

/// State machine behind the social sign-in button.
pub struct SocialSignInFlow<G, S> {
    gateway: G,
    store: S,
    config: AccountsConfig,
    phase: FlowPhase,
}

impl<G: IdentityGateway, S: ProfileStore> SocialSignInFlow<G, S> {
    /// New flow over the injected gateway and store.
    #[must_use]
    pub fn new(gateway: G, store: S, config: AccountsConfig) -> Self {
        Self {
            gateway,
            store,
            config,
            phase: FlowPhase::Editing,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> &FlowPhase {
        &self.phase
    }

    /// Drive the federated exchange and the follow-up writes.
    ///
    /// The returned display name is split under the shared policy (first
    /// token / joined remainder, empty when absent), the profile document
    /// is upserted under the returned account id, and the recombined name
    /// is written back so spacing is normalized.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Identity`] when the federated exchange itself
    /// fails, or [`FlowError::PartialWrite`] when a write after the
    /// successful sign-in fails.
    pub async fn sign_in(&mut self) -> Result<SubmitOutcome, FlowError> {
        self.phase = FlowPhase::Submitting;

        let outcome = self.run_sign_in().await;
        if let Err(err) = &outcome {
            self.phase = FlowPhase::Failed(err.clone());
        }
        outcome
    }

    async fn run_sign_in(&mut self) -> Result<SubmitOutcome, FlowError> {
        let federated = match self.gateway.sign_in_with_federated_provider().await {
            Ok(federated) => federated,
            Err(err) => {
                warn!("Federated sign-in failed: {err}");
                return Err(err.into());
            }
        };

        let name = PersonName::split(federated.display_name.as_deref().unwrap_or_default());

        let document = ProfileDocument::federated(&name, federated.email.clone());
        if let Err(err) = self
            .store
            .upsert(&self.config.collection, &federated.id, &document)
            .await
        {
            let err =
                FlowError::partial_write(federated.id, PendingWrite::ProfileDocument, err);
            tracing::error!("Federated sign-in left account inconsistent: {err}");
            return Err(err);
        }

        let changes = ProfileChanges::display_name(name.display_name());
        if let Err(err) = self.gateway.update_profile(&changes).await {
            let err = FlowError::partial_write(federated.id, PendingWrite::DisplayName, err);
            tracing::error!("Federated sign-in left account inconsistent: {err}");
            return Err(err);
        }

        self.phase = FlowPhase::Succeeded;
        Ok(SubmitOutcome::Navigate(Destination::AuthenticatedHome))
    }
}
