//! Flow-level error types.
//!
//! Validation errors never appear here: they live in per-field form state
//! and stay inside the flow boundary. A `FlowError` is something the caller
//! has to deal with: a provider/store failure, or the partial-write state
//! left behind when one of a flow's two sequenced writes lands and the
//! other does not.

use core::fmt;

use driftwood_core::AccountId;

use crate::identity::IdentityError;
use crate::store::StoreError;

/// The write still missing after a partial failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingWrite {
    /// The profile document was not written (and, where the flow sets one,
    /// the display name was not attempted either).
    ProfileDocument,
    /// The profile document landed but the provider-side display name
    /// update failed.
    DisplayName,
}

impl fmt::Display for PendingWrite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProfileDocument => write!(f, "profile document"),
            Self::DisplayName => write!(f, "display name"),
        }
    }
}

/// Errors surfaced at a flow boundary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The identity provider rejected an operation.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// The document store rejected a write before any identity-side state
    /// changed, so nothing is inconsistent.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No account is signed in, so an account-scoped flow cannot start.
    #[error("no account is currently signed in")]
    NoCurrentAccount,

    /// One of the flow's two writes succeeded and the other failed. The two
    /// backing stores are not transactional, so the account named here is
    /// now inconsistent until the pending write is replayed. Recovery is
    /// the caller's decision.
    #[error("account {account} is missing its {pending} write: {source}")]
    PartialWrite {
        /// Account left in the inconsistent state.
        account: AccountId,
        /// Which write never landed.
        pending: PendingWrite,
        /// The failure that interrupted the sequence.
        #[source]
        source: Box<FlowError>,
    },
}

impl FlowError {
    /// Wrap a failure as the partial-write state for `account`.
    #[must_use]
    pub fn partial_write(
        account: AccountId,
        pending: PendingWrite,
        source: impl Into<Self>,
    ) -> Self {
        Self::PartialWrite {
            account,
            pending,
            source: Box::new(source.into()),
        }
    }
}
