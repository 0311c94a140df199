//! # Roster Errors

use shared_types::{Address, Classify, ErrorKind};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterError {
    /// Mutation attempted by anything other than the owning governance identity.
    #[error("unauthorized origin {origin}: roster is owned by {owner}")]
    Unauthorized { origin: Address, owner: Address },

    /// The zero address cannot be a notary.
    #[error("invalid notary: zero address")]
    ZeroAddress,

    /// Removal of an identity that was never added.
    #[error("unknown notary {notary}")]
    UnknownNotary { notary: Address },
}

impl Classify for RosterError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::ZeroAddress | Self::UnknownNotary { .. } => ErrorKind::Validation,
        }
    }
}
