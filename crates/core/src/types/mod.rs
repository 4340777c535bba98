//! Core types for Driftwood.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod name;
pub mod photo;

pub use email::{Email, EmailError};
pub use id::AccountId;
pub use name::PersonName;
pub use photo::PhotoUrl;
