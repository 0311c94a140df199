//! Runtime error type.

use crate::adapters::SnapshotError;
use crate::container::ConfigError;
use nv_01_governance::GovernanceError;
use nv_02_notary_roster::RosterError;
use nv_03_attestation_registry::RegistryError;
use shared_crypto::CryptoError;
use shared_types::{Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VaultError {
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("crypto: {0}")]
    Crypto(#[from] CryptoError),

    #[error("no vault state at {0}; run `init` first")]
    NotInitialized(String),

    #[error("vault state already exists at {0}")]
    AlreadyInitialized(String),
}

impl Classify for VaultError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Governance(e) => e.kind(),
            Self::Roster(e) => e.kind(),
            Self::Registry(e) => e.kind(),
            Self::Config(_) | Self::Crypto(_) => ErrorKind::Validation,
            Self::Snapshot(_) => ErrorKind::Availability,
            Self::NotInitialized(_) | Self::AlreadyInitialized(_) => ErrorKind::State,
        }
    }
}
