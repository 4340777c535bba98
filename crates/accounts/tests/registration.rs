//! Registration flow integration tests against the in-memory doubles.

#![allow(clippy::unwrap_used)]

use driftwood_accounts::config::AccountsConfig;
use driftwood_accounts::error::{FlowError, PendingWrite};
use driftwood_accounts::flows::register::{RegisterField, EMAIL_IN_USE, REGISTRATION_FAILED};
use driftwood_accounts::flows::{Destination, FlowPhase, RegistrationFlow, SubmitOutcome};
use driftwood_accounts::identity::IdentityError;
use driftwood_accounts::store::StoreError;
use driftwood_accounts::testing::{FakeIdentity, FakeStore};
use driftwood_accounts::validate;

fn flow(
    identity: &FakeIdentity,
    store: &FakeStore,
) -> RegistrationFlow<FakeIdentity, FakeStore> {
    RegistrationFlow::new(identity.clone(), store.clone(), AccountsConfig::default())
}

fn fill_valid(flow: &mut RegistrationFlow<FakeIdentity, FakeStore>) {
    flow.set_field(RegisterField::FirstName, "Ada");
    flow.set_field(RegisterField::LastName, "Lovelace");
    flow.set_field(RegisterField::Email, "ada@example.com");
    flow.set_field(RegisterField::Password, "Str0ng!Pass");
}

#[tokio::test(start_paused = true)]
async fn successful_registration_writes_account_document_and_profile() {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    let outcome = flow.submit().await.unwrap();
    assert_eq!(
        outcome,
        SubmitOutcome::Navigate(Destination::AuthenticatedHome)
    );
    assert_eq!(*flow.phase(), FlowPhase::Succeeded);

    // Account created for the right email
    let created = identity.created_accounts();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].as_str(), "ada@example.com");

    // Profile document stored under the new account id
    let current = identity.current().unwrap();
    let doc = store.document("users", &current.id).unwrap();
    assert_eq!(doc.first_name, "Ada");
    assert_eq!(doc.last_name, "Lovelace");
    assert_eq!(doc.email.unwrap().as_str(), "ada@example.com");
    assert_eq!(doc.password.as_deref(), Some("Str0ng!Pass"));

    // Display name and default avatar set on the account
    assert_eq!(current.display_name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(
        current.photo_url.unwrap().as_str(),
        "/static/mock-images/avatars/avatar_1.jpg"
    );
}

#[tokio::test(start_paused = true)]
async fn successful_registration_resets_the_form() {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    flow.submit().await.unwrap();

    assert_eq!(flow.form().value(RegisterField::Email), "");
    assert_eq!(flow.form().value(RegisterField::Password), "");
    assert!(!flow.form().submit_attempted());
    assert!(!flow.form().in_flight());
}

#[tokio::test(start_paused = true)]
async fn email_in_use_stops_before_any_write() {
    let identity = FakeIdentity::new();
    identity.reject_create_account(IdentityError::EmailInUse);
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    let outcome = flow.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected);

    assert!(flow.email_in_use());
    assert_eq!(flow.visible_email_error(), Some(EMAIL_IN_USE));
    assert_eq!(store.upsert_count(), 0);
    assert!(identity.profile_updates().is_empty());
    assert!(matches!(flow.phase(), FlowPhase::Failed(_)));
}

#[tokio::test(start_paused = true)]
async fn other_provider_rejections_surface_a_visible_message() {
    let identity = FakeIdentity::new();
    identity.reject_create_account(IdentityError::Provider("backend unavailable".into()));
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    let outcome = flow.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Rejected);
    assert_eq!(flow.visible_provider_error(), Some(REGISTRATION_FAILED));
    assert!(!flow.email_in_use());
    assert_eq!(store.upsert_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn validation_blocks_submission_and_shows_all_errors() {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);

    let outcome = flow.submit().await.unwrap();
    assert_eq!(outcome, SubmitOutcome::Blocked);

    assert_eq!(
        flow.form().visible_error(RegisterField::FirstName),
        Some(validate::FIRST_NAME_REQUIRED)
    );
    assert_eq!(
        flow.form().visible_error(RegisterField::LastName),
        Some(validate::LAST_NAME_REQUIRED)
    );
    assert_eq!(
        flow.form().visible_error(RegisterField::Email),
        Some(validate::EMAIL_REQUIRED)
    );
    assert_eq!(
        flow.form().visible_error(RegisterField::Password),
        Some(validate::PASSWORD_REQUIRED)
    );
    assert!(identity.created_accounts().is_empty());
    assert_eq!(store.upsert_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn password_messages_are_two_stage() {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    flow.set_field(RegisterField::Password, "aB1!");
    flow.submit().await.unwrap();
    assert_eq!(
        flow.form().visible_error(RegisterField::Password),
        Some(validate::PASSWORD_TOO_SHORT)
    );

    flow.set_field(RegisterField::Password, "weakpassword1!");
    flow.submit().await.unwrap();
    assert_eq!(
        flow.form().visible_error(RegisterField::Password),
        Some(validate::PASSWORD_TOO_WEAK)
    );
}

#[tokio::test(start_paused = true)]
async fn errors_exist_but_stay_hidden_before_first_submit() {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);

    flow.set_field(RegisterField::Email, "not-an-email");
    assert_eq!(
        flow.form().error(RegisterField::Email),
        Some(validate::INVALID_EMAIL)
    );
    assert_eq!(flow.form().visible_error(RegisterField::Email), None);
}

#[tokio::test(start_paused = true)]
async fn document_write_failure_surfaces_partial_write() {
    let identity = FakeIdentity::new();
    let store = FakeStore::new();
    store.fail_upserts(StoreError::Backend("write denied".into()));
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    let err = flow.submit().await.unwrap_err();
    let FlowError::PartialWrite {
        account, pending, ..
    } = err
    else {
        panic!("expected partial write, got {err:?}");
    };
    assert_eq!(pending, PendingWrite::ProfileDocument);
    assert_eq!(account, identity.current().unwrap().id);

    // The account exists but neither follow-up write landed
    assert_eq!(identity.created_accounts().len(), 1);
    assert!(identity.profile_updates().is_empty());
}

#[tokio::test(start_paused = true)]
async fn display_name_failure_surfaces_partial_write_after_document() {
    let identity = FakeIdentity::new();
    identity.reject_update_profile(IdentityError::Provider("unavailable".into()));
    let store = FakeStore::new();
    let mut flow = flow(&identity, &store);
    fill_valid(&mut flow);

    let err = flow.submit().await.unwrap_err();
    assert!(matches!(
        err,
        FlowError::PartialWrite {
            pending: PendingWrite::DisplayName,
            ..
        }
    ));

    // The document write did land before the failure
    assert_eq!(store.upsert_count(), 1);
}
