//! # Lookup client
//!
//! Defines the [`LookupService`] trait and a reqwest implementation, [`LookupClient`], for the two upstream
//! endpoints: identity lookup (numeric account id) and universal lookup (phone, email or national id).
//!
//! One attempt per call with a fixed timeout; transport and decode failures are normalized here so the
//! session layer only sees [`IdentityResponse`] / [`LookupError`] and [`UniversalLookup`].

mod client;
mod config;
mod error;
mod types;

pub use client::{is_identity_input, LookupClient, LookupService};
pub use config::LookupConfig;
pub use error::LookupError;
pub use types::{is_truthy, AccountInfo, IdentityResponse, PersonRecord, PhoneInfo, UniversalLookup};
