//! # Registry Errors
//!
//! Rejections from `record_action` and the breaker, in check order.

use shared_types::{Address, Classify, DocHash, ErrorKind, Timestamp};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Circuit breaker engaged.
    #[error("registry is paused")]
    Paused,

    /// Status code outside the known set.
    #[error("invalid status code {0}")]
    InvalidStatus(u8),

    /// Status name that is neither a known label nor a code.
    #[error("unknown status {0:?}")]
    UnknownStatusName(String),

    /// Attestation older than the freshness window.
    #[error("signature expired: timestamp {timestamp}, now {now}, window {max_age}s")]
    SignatureExpired {
        timestamp: Timestamp,
        now: Timestamp,
        max_age: u64,
    },

    /// Attestation dated beyond the tolerated clock skew.
    #[error("signature timestamp in the future: timestamp {timestamp}, now {now}, skew {max_skew}s")]
    FutureTimestamp {
        timestamp: Timestamp,
        now: Timestamp,
        max_skew: u64,
    },

    /// The signature does not recover to an active notary.
    #[error("signer is not an authorized notary (recovered {recovered:?})")]
    NotNotary { recovered: Option<Address> },

    /// First writer wins; there is no amendment path.
    #[error("record already exists for {doc_hash}")]
    RecordExists { doc_hash: DocHash },

    /// Breaker toggled by anything other than the owning governance identity.
    #[error("unauthorized origin {origin}: registry is owned by {owner}")]
    Unauthorized { origin: Address, owner: Address },

    #[error("registry is already paused")]
    AlreadyPaused,

    #[error("registry is not paused")]
    NotPaused,
}

impl Classify for RegistryError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Paused => ErrorKind::Availability,
            Self::InvalidStatus(_) | Self::UnknownStatusName(_) => ErrorKind::Validation,
            Self::SignatureExpired { .. } | Self::FutureTimestamp { .. } => ErrorKind::Temporal,
            Self::NotNotary { .. } | Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::RecordExists { .. } | Self::AlreadyPaused | Self::NotPaused => ErrorKind::State,
        }
    }
}
