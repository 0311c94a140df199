//! # Governed Commands
//!
//! A privileged operation is described by an explicit tagged value
//! `{target, value, payload}` rather than an opaque call. The governance
//! ledger stores it at submission and hands it to exactly one `apply`
//! path at execution.

use crate::entities::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The operation a command performs on its target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "arg", rename_all = "snake_case")]
pub enum Payload {
    /// Plain value transfer, no call data.
    Transfer,
    /// Add a signer to the signer set.
    AddSigner(Address),
    /// Remove a signer from the signer set.
    RemoveSigner(Address),
    /// Change the confirmation threshold.
    ChangeThreshold(usize),
    /// Change the timelock delay, in seconds.
    SetTimelockDelay(u64),
    /// Authorize a notary.
    AddNotary(Address),
    /// Deauthorize a notary (soft delete).
    RemoveNotary(Address),
    /// Engage the attestation circuit breaker.
    Pause,
    /// Release the attestation circuit breaker.
    Unpause,
    /// Call data for an external collaborator target.
    Opaque(Vec<u8>),
}

impl Payload {
    /// Whether this payload mutates the signer set (and so bumps its version).
    #[must_use]
    pub const fn is_signer_set_change(&self) -> bool {
        matches!(
            self,
            Self::AddSigner(_)
                | Self::RemoveSigner(_)
                | Self::ChangeThreshold(_)
                | Self::SetTimelockDelay(_)
        )
    }

    /// Short operation name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::AddSigner(_) => "add_signer",
            Self::RemoveSigner(_) => "remove_signer",
            Self::ChangeThreshold(_) => "change_threshold",
            Self::SetTimelockDelay(_) => "set_timelock_delay",
            Self::AddNotary(_) => "add_notary",
            Self::RemoveNotary(_) => "remove_notary",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
            Self::Opaque(_) => "opaque",
        }
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddSigner(a) | Self::RemoveSigner(a) | Self::AddNotary(a) | Self::RemoveNotary(a) => {
                write!(f, "{}({a})", self.name())
            }
            Self::ChangeThreshold(n) => write!(f, "{}({n})", self.name()),
            Self::SetTimelockDelay(d) => write!(f, "{}({d}s)", self.name()),
            Self::Opaque(data) => write!(f, "{}({} bytes)", self.name(), data.len()),
            Self::Transfer | Self::Pause | Self::Unpause => f.write_str(self.name()),
        }
    }
}

/// A privileged call: who it targets, how much value it moves, and what it does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
    /// Component or account the call is addressed to.
    pub target: Address,
    /// Native value moved from the vault to the target.
    pub value: u128,
    /// The operation performed.
    pub payload: Payload,
}

impl Command {
    /// A zero-value call.
    #[must_use]
    pub fn call(target: Address, payload: Payload) -> Self {
        Self {
            target,
            value: 0,
            payload,
        }
    }

    /// A plain value transfer.
    #[must_use]
    pub fn transfer(target: Address, value: u128) -> Self {
        Self {
            target,
            value,
            payload: Payload::Transfer,
        }
    }
}
