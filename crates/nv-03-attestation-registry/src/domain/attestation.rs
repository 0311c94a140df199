//! # Attestation Message
//!
//! The structured claim `{docHash, status, timestamp}` a notary signs
//! off-line. The digest binds all three fields to the registry's domain
//! separator, so a signature cannot be replayed against another document,
//! another decision, or another registry.

use super::errors::RegistryError;
use serde::{Deserialize, Serialize};
use shared_crypto::{
    recover_address, struct_hash, typed_data_digest, u64_word, CryptoError, Hash,
    RecoverableSignature, Secp256k1KeyPair, TypedDataDomain,
};
use shared_types::{Address, DocHash, Timestamp};
use std::fmt;

/// Type signature of the attestation struct.
pub const ATTESTATION_TYPE: &str = "Attestation(bytes32 docHash,uint8 status,uint256 timestamp)";

/// Document decision recorded by a notary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending = 0,
    Approved = 1,
    Rejected = 2,
}

impl DocumentStatus {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for DocumentStatus {
    type Error = RegistryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Pending),
            1 => Ok(Self::Approved),
            2 => Ok(Self::Rejected),
            other => Err(RegistryError::InvalidStatus(other)),
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        })
    }
}

impl std::str::FromStr for DocumentStatus {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => other
                .parse::<u8>()
                .map_err(|_| RegistryError::UnknownStatusName(other.to_string()))
                .and_then(Self::try_from),
        }
    }
}

/// The signed fields. `status` is the raw wire code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub doc_hash: DocHash,
    pub status: u8,
    pub timestamp: Timestamp,
}

impl Attestation {
    pub fn new(doc_hash: DocHash, status: DocumentStatus, timestamp: Timestamp) -> Self {
        Self {
            doc_hash,
            status: status.code(),
            timestamp,
        }
    }

    pub fn struct_hash(&self) -> Hash {
        struct_hash(
            ATTESTATION_TYPE,
            &[
                *self.doc_hash.as_bytes(),
                u64_word(u64::from(self.status)),
                u64_word(self.timestamp),
            ],
        )
    }

    /// Digest a notary signs for this registry domain.
    pub fn digest(&self, domain: &TypedDataDomain) -> Hash {
        typed_data_digest(&domain.separator(), &self.struct_hash())
    }

    /// Notary-side signing.
    pub fn sign(
        &self,
        domain: &TypedDataDomain,
        key: &Secp256k1KeyPair,
    ) -> Result<RecoverableSignature, CryptoError> {
        key.sign_prehash(&self.digest(domain))
    }

    /// Identity that produced `signature` over this attestation.
    pub fn recover_signer(
        &self,
        domain: &TypedDataDomain,
        signature: &RecoverableSignature,
    ) -> Result<Address, CryptoError> {
        recover_address(&self.digest(domain), signature)
    }
}
