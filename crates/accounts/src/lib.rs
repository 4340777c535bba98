//! Driftwood Accounts library.
//!
//! Client-side account management: registration, login, federated sign-in,
//! and profile editing, expressed as explicit per-flow state machines over
//! two injected capabilities: an identity gateway and a profile document
//! store. Rendering, routing, and session persistence live elsewhere; this
//! crate owns the rules that keep form input, provider calls, and stored
//! profile documents consistent.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod flows;
pub mod form;
pub mod identity;
pub mod store;
pub mod testing;
pub mod validate;
