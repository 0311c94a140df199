//! # Attestation Registry Subsystem (NV-03)
//!
//! Accepts relayed, notary-signed document status attestations and commits
//! each document hash exactly once.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): attestation digest, registry, errors
//! - **Ports Layer** (`ports/`): `NotarizationApi` (inbound), `NotaryDirectory` (outbound)
//!
//! ## Security Notes
//!
//! - **Signer recovery as authorization**: the notary is whoever the
//!   signature recovers to, checked against the roster. The relayer is
//!   irrelevant.
//! - **Replay binding**: document hash, status and timestamp are bound into
//!   one domain-separated digest.
//! - **Malleability**: high-S signatures never recover (EIP-2).

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;

pub use domain::attestation::{Attestation, DocumentStatus, ATTESTATION_TYPE};
pub use domain::errors::RegistryError;
pub use domain::registry::{
    AttestationRegistry, DocumentRecord, FreshnessPolicy, DEFAULT_MAX_FUTURE_SKEW_SECS,
    DEFAULT_MAX_SIGNATURE_AGE_SECS,
};
pub use ports::inbound::NotarizationApi;
pub use ports::outbound::NotaryDirectory;
