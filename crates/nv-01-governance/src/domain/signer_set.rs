//! # Signer Set
//!
//! The authorized-signer roster, the confirmation threshold, the timelock
//! delay, and the version counter that invalidates transactions proposed
//! under a previous trust configuration.
//!
//! Mutations take an explicit `origin` and are accepted only from the
//! owning vault's governance identity. Every accepted mutation bumps
//! `version`. Every rejected mutation leaves the set untouched.

use super::errors::GovernanceError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use tracing::debug;

/// Initial version of a freshly created signer set.
pub const INITIAL_VERSION: u64 = 1;

/// Ordered set of signers plus the governance parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerSet {
    owner: Address,
    signers: Vec<Address>,
    threshold: usize,
    timelock_delay: u64,
    version: u64,
}

impl SignerSet {
    /// Create a signer set owned by `owner`.
    ///
    /// Rejects an empty list, zero or duplicate signers, and thresholds
    /// outside `1..=signers.len()`.
    pub fn new(
        owner: Address,
        signers: Vec<Address>,
        threshold: usize,
        timelock_delay: u64,
    ) -> Result<Self, GovernanceError> {
        if signers.is_empty() {
            return Err(GovernanceError::EmptySignerSet);
        }
        let mut unique: Vec<Address> = Vec::with_capacity(signers.len());
        for signer in signers {
            if signer.is_zero() {
                return Err(GovernanceError::ZeroAddressSigner);
            }
            if unique.contains(&signer) {
                return Err(GovernanceError::DuplicateSigner { signer });
            }
            unique.push(signer);
        }
        check_threshold(threshold, unique.len())?;

        Ok(Self {
            owner,
            signers: unique,
            threshold,
            timelock_delay,
            version: INITIAL_VERSION,
        })
    }

    /// Governance identity allowed to mutate this set.
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Signers in insertion order.
    pub fn signers(&self) -> &[Address] {
        &self.signers
    }

    pub fn len(&self) -> usize {
        self.signers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signers.is_empty()
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Timelock delay in seconds.
    pub fn timelock_delay(&self) -> u64 {
        self.timelock_delay
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Membership test.
    pub fn is_signer(&self, who: &Address) -> bool {
        self.signers.contains(who)
    }

    /// Fail with `NotSigner` unless `who` is a current signer.
    pub fn require_signer(&self, who: Address) -> Result<(), GovernanceError> {
        if self.is_signer(&who) {
            Ok(())
        } else {
            Err(GovernanceError::NotSigner { caller: who })
        }
    }

    // =========================================================================
    // GOVERNED MUTATIONS
    // =========================================================================

    /// Add a signer. Returns the new version.
    pub fn add_signer(&mut self, origin: Address, signer: Address) -> Result<u64, GovernanceError> {
        self.authorize(origin)?;
        if signer.is_zero() {
            return Err(GovernanceError::ZeroAddressSigner);
        }
        if self.is_signer(&signer) {
            return Err(GovernanceError::DuplicateSigner { signer });
        }
        self.signers.push(signer);
        debug!(%signer, signers = self.signers.len(), "Signer added");
        Ok(self.bump())
    }

    /// Remove a signer. Returns the new version.
    ///
    /// Rejected (not clamped) when the remaining signers would fall below
    /// the threshold.
    pub fn remove_signer(
        &mut self,
        origin: Address,
        signer: Address,
    ) -> Result<u64, GovernanceError> {
        self.authorize(origin)?;
        let Some(position) = self.signers.iter().position(|s| *s == signer) else {
            return Err(GovernanceError::UnknownSigner { signer });
        };
        let remaining = self.signers.len() - 1;
        if remaining < self.threshold {
            return Err(GovernanceError::ThresholdViolation {
                remaining,
                threshold: self.threshold,
            });
        }
        self.signers.remove(position);
        debug!(%signer, signers = remaining, "Signer removed");
        Ok(self.bump())
    }

    /// Change the confirmation threshold. Returns the new version.
    pub fn change_threshold(
        &mut self,
        origin: Address,
        threshold: usize,
    ) -> Result<u64, GovernanceError> {
        self.authorize(origin)?;
        check_threshold(threshold, self.signers.len())?;
        self.threshold = threshold;
        debug!(threshold, "Threshold changed");
        Ok(self.bump())
    }

    /// Change the timelock delay. Returns the new version.
    pub fn set_timelock_delay(
        &mut self,
        origin: Address,
        delay_secs: u64,
    ) -> Result<u64, GovernanceError> {
        self.authorize(origin)?;
        self.timelock_delay = delay_secs;
        debug!(delay_secs, "Timelock delay changed");
        Ok(self.bump())
    }

    fn authorize(&self, origin: Address) -> Result<(), GovernanceError> {
        if origin == self.owner {
            Ok(())
        } else {
            Err(GovernanceError::Unauthorized {
                origin,
                owner: self.owner,
            })
        }
    }

    fn bump(&mut self) -> u64 {
        self.version += 1;
        self.version
    }
}

fn check_threshold(threshold: usize, signers: usize) -> Result<(), GovernanceError> {
    if threshold == 0 || threshold > signers {
        return Err(GovernanceError::InvalidThreshold { threshold, signers });
    }
    Ok(())
}
