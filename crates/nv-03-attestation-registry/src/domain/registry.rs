//! # Attestation Registry
//!
//! Commits notary-signed document status records exactly once.
//!
//! ## Verification order
//!
//! 1. Circuit breaker (`AvailabilityError`)
//! 2. Status code (`ValidationError`)
//! 3. Freshness: past window, then future skew (`TemporalError`)
//! 4. Authenticity: recovered signer must be an active notary (`AuthorizationError`)
//! 5. Idempotency: first writer wins (`StateError`)
//! 6. Commit
//!
//! Nothing is written unless every check passes. The relayer's identity
//! plays no part in authorization.

use super::attestation::{Attestation, DocumentStatus};
use super::errors::RegistryError;
use crate::ports::outbound::NotaryDirectory;
use serde::{Deserialize, Serialize};
use shared_crypto::{RecoverableSignature, TypedDataDomain};
use shared_types::{Address, DocHash, Timestamp};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Default past freshness window: 24 hours.
pub const DEFAULT_MAX_SIGNATURE_AGE_SECS: u64 = 86_400;

/// Default tolerated clock skew for future-dated attestations.
pub const DEFAULT_MAX_FUTURE_SKEW_SECS: u64 = 300;

/// Timestamp acceptance window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessPolicy {
    /// Oldest accepted attestation, in seconds before `now` (inclusive).
    pub max_age_secs: u64,
    /// Newest accepted attestation, in seconds after `now` (inclusive).
    pub max_future_skew_secs: u64,
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        Self {
            max_age_secs: DEFAULT_MAX_SIGNATURE_AGE_SECS,
            max_future_skew_secs: DEFAULT_MAX_FUTURE_SKEW_SECS,
        }
    }
}

impl FreshnessPolicy {
    pub fn check(&self, timestamp: Timestamp, now: Timestamp) -> Result<(), RegistryError> {
        if now.saturating_sub(timestamp) > self.max_age_secs {
            return Err(RegistryError::SignatureExpired {
                timestamp,
                now,
                max_age: self.max_age_secs,
            });
        }
        if timestamp.saturating_sub(now) > self.max_future_skew_secs {
            return Err(RegistryError::FutureTimestamp {
                timestamp,
                now,
                max_skew: self.max_future_skew_secs,
            });
        }
        Ok(())
    }
}

/// A committed, immutable attestation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub doc_hash: DocHash,
    /// Identity recovered from the signature.
    pub notary: Address,
    pub status: DocumentStatus,
    /// Timestamp bound into the signed message.
    pub signed_at: Timestamp,
    /// Commit time.
    pub recorded_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttestationRegistry {
    owner: Address,
    domain: TypedDataDomain,
    policy: FreshnessPolicy,
    paused: bool,
    documents: BTreeMap<DocHash, DocumentRecord>,
}

impl AttestationRegistry {
    /// A registry owned by `owner` whose signatures are bound to `domain`.
    pub fn new(owner: Address, domain: TypedDataDomain, policy: FreshnessPolicy) -> Self {
        Self {
            owner,
            domain,
            policy,
            paused: false,
            documents: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// The registry's own identity (the domain's verifying component).
    pub fn address(&self) -> Address {
        self.domain.verifying_contract
    }

    pub fn domain(&self) -> &TypedDataDomain {
        &self.domain
    }

    pub fn policy(&self) -> FreshnessPolicy {
        self.policy
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Number of committed records.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Verify a relayed attestation and commit it.
    pub fn record_action<D: NotaryDirectory + ?Sized>(
        &mut self,
        directory: &D,
        attestation: &Attestation,
        signature: &RecoverableSignature,
        now: Timestamp,
    ) -> Result<&DocumentRecord, RegistryError> {
        if self.paused {
            return Err(RegistryError::Paused);
        }
        self.policy.check(attestation.timestamp, now)?;
        let status = DocumentStatus::try_from(attestation.status)?;

        let notary = match attestation.recover_signer(&self.domain, signature) {
            Ok(signer) if directory.is_notary(&signer) => signer,
            Ok(signer) => {
                return Err(RegistryError::NotNotary {
                    recovered: Some(signer),
                })
            }
            Err(e) => {
                debug!(error = %e, "Attestation signature did not recover");
                return Err(RegistryError::NotNotary { recovered: None });
            }
        };

        let doc_hash = attestation.doc_hash;
        if self.documents.contains_key(&doc_hash) {
            return Err(RegistryError::RecordExists { doc_hash });
        }

        info!(%doc_hash, %notary, %status, "Attestation recorded");
        Ok(self.documents.entry(doc_hash).or_insert(DocumentRecord {
            doc_hash,
            notary,
            status,
            signed_at: attestation.timestamp,
            recorded_at: now,
        }))
    }

    pub fn get_document(&self, doc_hash: &DocHash) -> Option<&DocumentRecord> {
        self.documents.get(doc_hash)
    }

    /// Records ordered by document hash.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.values()
    }

    // =========================================================================
    // CIRCUIT BREAKER (governed)
    // =========================================================================

    pub fn pause(&mut self, origin: Address) -> Result<(), RegistryError> {
        self.authorize(origin)?;
        if self.paused {
            return Err(RegistryError::AlreadyPaused);
        }
        self.paused = true;
        info!("Attestation registry paused");
        Ok(())
    }

    pub fn unpause(&mut self, origin: Address) -> Result<(), RegistryError> {
        self.authorize(origin)?;
        if !self.paused {
            return Err(RegistryError::NotPaused);
        }
        self.paused = false;
        info!("Attestation registry unpaused");
        Ok(())
    }

    fn authorize(&self, origin: Address) -> Result<(), RegistryError> {
        if origin == self.owner {
            Ok(())
        } else {
            Err(RegistryError::Unauthorized {
                origin,
                owner: self.owner,
            })
        }
    }
}
