//! In-memory doubles for the identity gateway and profile store.
//!
//! Used by this crate's flow tests and available to downstream consumers
//! for wiring flows in tests without a hosted provider. Both doubles are
//! cheaply cloneable and share state through an `Arc`, so a test can keep a
//! handle for assertions after moving a clone into a flow.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use driftwood_core::{AccountId, Email};
use secrecy::SecretString;
use uuid::Uuid;

use crate::identity::{
    AccountSnapshot, FederatedAccount, IdentityError, IdentityGateway, ProfileChanges,
};
use crate::store::{ProfileDocument, ProfileStore, StoreError};

#[derive(Debug, Default)]
struct IdentityState {
    current: Option<AccountSnapshot>,
    created: Vec<Email>,
    profile_updates: Vec<ProfileChanges>,
    federated: Option<FederatedAccount>,
    reject_create: Option<IdentityError>,
    reject_sign_in: Option<IdentityError>,
    reject_federated: Option<IdentityError>,
    reject_update_profile: Option<IdentityError>,
}

/// Scriptable in-memory identity gateway.
///
/// Successful operations behave like a cooperative provider: account
/// creation mints an id and signs the account in, and profile updates are
/// applied to the current snapshot so tests can assert on the resulting
/// display name and photo URL.
#[derive(Debug, Clone, Default)]
pub struct FakeIdentity {
    inner: Arc<Mutex<IdentityState>>,
}

impl FakeIdentity {
    /// Gateway with no signed-in account and no scripted rejections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, IdentityState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sign an account in by snapshot (seed for profile-edit tests).
    pub fn set_current_account(&self, snapshot: AccountSnapshot) {
        self.state().current = Some(snapshot);
    }

    /// Script the result of the next and all following `create_account`
    /// calls.
    pub fn reject_create_account(&self, err: IdentityError) {
        self.state().reject_create = Some(err);
    }

    /// Script the result of the next and all following `sign_in` calls.
    pub fn reject_sign_in(&self, err: IdentityError) {
        self.state().reject_sign_in = Some(err);
    }

    /// Script the federated exchange to fail.
    pub fn reject_federated(&self, err: IdentityError) {
        self.state().reject_federated = Some(err);
    }

    /// Script what a successful federated exchange returns.
    pub fn set_federated_account(&self, account: FederatedAccount) {
        self.state().federated = Some(account);
    }

    /// Script `update_profile` to fail.
    pub fn reject_update_profile(&self, err: IdentityError) {
        self.state().reject_update_profile = Some(err);
    }

    /// Emails passed to successful `create_account` calls, in order.
    #[must_use]
    pub fn created_accounts(&self) -> Vec<Email> {
        self.state().created.clone()
    }

    /// Changes passed to successful `update_profile` calls, in order.
    #[must_use]
    pub fn profile_updates(&self) -> Vec<ProfileChanges> {
        self.state().profile_updates.clone()
    }

    /// Snapshot of the currently signed-in account.
    #[must_use]
    pub fn current(&self) -> Option<AccountSnapshot> {
        self.state().current.clone()
    }

    fn mint_id() -> AccountId {
        AccountId::new(Uuid::new_v4().to_string())
    }
}

impl IdentityGateway for FakeIdentity {
    async fn create_account(
        &self,
        email: &Email,
        _password: &SecretString,
    ) -> Result<AccountId, IdentityError> {
        let mut state = self.state();
        if let Some(err) = state.reject_create.clone() {
            return Err(err);
        }

        let id = Self::mint_id();
        state.created.push(email.clone());
        state.current = Some(AccountSnapshot {
            id: id.clone(),
            email: email.clone(),
            email_verified: false,
            display_name: None,
            phone_number: None,
            photo_url: None,
        });
        Ok(id)
    }

    async fn sign_in(
        &self,
        email: &Email,
        _password: &SecretString,
    ) -> Result<AccountId, IdentityError> {
        let mut state = self.state();
        if let Some(err) = state.reject_sign_in.clone() {
            return Err(err);
        }

        let id = Self::mint_id();
        state.current = Some(AccountSnapshot {
            id: id.clone(),
            email: email.clone(),
            email_verified: true,
            display_name: None,
            phone_number: None,
            photo_url: None,
        });
        Ok(id)
    }

    async fn sign_in_with_federated_provider(&self) -> Result<FederatedAccount, IdentityError> {
        let mut state = self.state();
        if let Some(err) = state.reject_federated.clone() {
            return Err(err);
        }

        let federated = state.federated.clone().ok_or_else(|| {
            IdentityError::Provider("no federated account scripted".to_owned())
        })?;
        state.current = Some(AccountSnapshot {
            id: federated.id.clone(),
            email: federated.email.clone(),
            email_verified: true,
            display_name: federated.display_name.clone(),
            phone_number: None,
            photo_url: None,
        });
        Ok(federated)
    }

    async fn update_profile(&self, changes: &ProfileChanges) -> Result<(), IdentityError> {
        let mut state = self.state();
        if let Some(err) = state.reject_update_profile.clone() {
            return Err(err);
        }

        if let Some(current) = &mut state.current {
            if let Some(display_name) = &changes.display_name {
                current.display_name = Some(display_name.clone());
            }
            if let Some(photo_url) = &changes.photo_url {
                current.photo_url = Some(photo_url.as_str().into());
            }
        }
        state.profile_updates.push(changes.clone());
        Ok(())
    }

    fn current_account(&self) -> Option<AccountSnapshot> {
        self.state().current.clone()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    documents: HashMap<(String, AccountId), ProfileDocument>,
    upsert_count: usize,
    fail_upserts: Option<StoreError>,
}

/// Scriptable in-memory profile store with keyed-overwrite semantics.
#[derive(Debug, Clone, Default)]
pub struct FakeStore {
    inner: Arc<Mutex<StoreState>>,
}

impl FakeStore {
    /// Empty store with no scripted failures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script all following upserts to fail.
    pub fn fail_upserts(&self, err: StoreError) {
        self.state().fail_upserts = Some(err);
    }

    /// The document stored under a collection and id, if any.
    #[must_use]
    pub fn document(&self, collection: &str, id: &AccountId) -> Option<ProfileDocument> {
        self.state()
            .documents
            .get(&(collection.to_owned(), id.clone()))
            .cloned()
    }

    /// Number of successful upserts performed.
    #[must_use]
    pub fn upsert_count(&self) -> usize {
        self.state().upsert_count
    }

    /// Number of distinct documents held.
    #[must_use]
    pub fn document_count(&self) -> usize {
        self.state().documents.len()
    }
}

impl ProfileStore for FakeStore {
    async fn upsert(
        &self,
        collection: &str,
        id: &AccountId,
        document: &ProfileDocument,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        if let Some(err) = state.fail_upserts.clone() {
            return Err(err);
        }

        state
            .documents
            .insert((collection.to_owned(), id.clone()), document.clone());
        state.upsert_count += 1;
        Ok(())
    }
}
