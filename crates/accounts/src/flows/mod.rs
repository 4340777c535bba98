//! Flow state machines.
//!
//! One coordinating state machine per form: registration, login, federated
//! (social) sign-in, and profile editing. Each flow composes the field
//! validators with the injected identity gateway (and profile store where
//! profile data is written), runs its submission steps in a fixed order,
//! and exposes UI-facing outcome state.
//!
//! Within one submission the steps are strictly sequential; the in-flight
//! flag on the form is the only guard against double submission, matching
//! the advisory (not data-layer) guarantee of the UI.

pub mod login;
pub mod profile;
pub mod register;
pub mod social;

pub use login::LoginFlow;
pub use profile::ProfileEditFlow;
pub use register::RegistrationFlow;
pub use social::SocialSignInFlow;

/// Where the UI should navigate after a terminal flow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The authenticated landing page.
    AuthenticatedHome,
}

/// Which part of a flow's lifecycle the state machine is in.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FlowPhase {
    /// Collecting and validating input.
    #[default]
    Editing,
    /// A submission is in flight; the submit control shows a loading state.
    Submitting,
    /// The terminal steps all completed.
    Succeeded,
    /// The submission failed; the reason is also reflected in form state or
    /// the outcome banner.
    Failed(crate::error::FlowError),
}

/// Result of driving one submission to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// All steps succeeded; the UI should navigate.
    Navigate(Destination),
    /// All steps succeeded; the flow stays on its form (Profile Edit).
    Completed,
    /// Validation blocked the submission; field errors are now visible.
    Blocked,
    /// The provider rejected the submission; the mapped message is on the
    /// form and the user can correct and retry.
    Rejected,
}

/// Kind of outcome banner shown after a Profile Edit submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// Transient outcome banner, dismissible independent of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    kind: BannerKind,
    visible: bool,
}

impl Banner {
    /// A visible banner of the given kind.
    #[must_use]
    pub const fn show(kind: BannerKind) -> Self {
        Self {
            kind,
            visible: true,
        }
    }

    /// The banner's kind, regardless of visibility.
    #[must_use]
    pub const fn kind(&self) -> BannerKind {
        self.kind
    }

    /// Whether the banner is currently shown.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Hide the banner without touching the underlying result.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_dismiss_keeps_kind() {
        let mut banner = Banner::show(BannerKind::Success);
        assert!(banner.is_visible());

        banner.dismiss();
        assert!(!banner.is_visible());
        assert_eq!(banner.kind(), BannerKind::Success);
    }
}
