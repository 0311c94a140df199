//! # Inbound Ports (Driving Ports / API)
//!
//! The notarization surface. `record_action` may be called by any relayer;
//! `pause` and `unpause` succeed only for the registry owner's identity,
//! which in a wired runtime is reachable only through executed governance
//! transactions.

use crate::domain::attestation::Attestation;
use crate::domain::errors::RegistryError;
use crate::domain::registry::DocumentRecord;
use async_trait::async_trait;
use shared_crypto::RecoverableSignature;
use shared_types::{Address, DocHash};

#[async_trait]
pub trait NotarizationApi: Send + Sync {
    /// Verify and commit a relayed attestation.
    ///
    /// `relayer` is recorded in logs only; it has no bearing on authorization.
    async fn record_action(
        &self,
        relayer: Address,
        attestation: Attestation,
        signature: RecoverableSignature,
    ) -> Result<DocumentRecord, RegistryError>;

    async fn get_document(&self, doc_hash: DocHash) -> Option<DocumentRecord>;

    async fn pause(&self, origin: Address) -> Result<(), RegistryError>;

    async fn unpause(&self, origin: Address) -> Result<(), RegistryError>;

    async fn is_paused(&self) -> bool;
}
