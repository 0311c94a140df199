//! # Notary Roster Subsystem (NV-02)
//!
//! Authorized-notary membership, owned exclusively by the governance vault.
//! `add_notary` and `remove_notary` take an explicit origin and accept only
//! the owner, so every change flows through an executed multisig
//! transaction. `is_notary` is the predicate the attestation registry
//! authorizes against.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;

pub use domain::errors::RosterError;
pub use domain::roster::{Notary, NotaryRoster, Removal};
pub use ports::inbound::RosterApi;
