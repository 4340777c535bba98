//! Driftwood Core - Shared types library.
//!
//! This crate provides common types used across all Driftwood components:
//! - `accounts` - Authentication and profile flow state machines
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no identity-provider calls,
//! no document-store access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for account ids, emails, names, and photo URLs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
