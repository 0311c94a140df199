//! # Notary Roster
//!
//! Identity-keyed table of notaries. Removal is a soft delete: the entry
//! stays with `active = false` so audit metadata survives.

use super::errors::RosterError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp};
use std::collections::BTreeMap;
use tracing::debug;

/// One roster entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notary {
    pub address: Address,
    pub active: bool,
    /// Time of the most recent authorization.
    pub added_at: Timestamp,
    /// Governance identity that authorized it.
    pub added_by: Address,
    /// Time of the most recent deauthorization, if any.
    pub removed_at: Option<Timestamp>,
}

/// Outcome of `remove_notary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The notary was active and is now inactive.
    Deactivated,
    /// The notary was already inactive.
    AlreadyInactive,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotaryRoster {
    owner: Address,
    notaries: BTreeMap<Address, Notary>,
}

impl NotaryRoster {
    /// An empty roster mutable only by `owner`.
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            notaries: BTreeMap::new(),
        }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Authorize a notary. Re-adding refreshes `added_at` and `added_by`.
    pub fn add_notary(
        &mut self,
        origin: Address,
        notary: Address,
        now: Timestamp,
    ) -> Result<&Notary, RosterError> {
        self.authorize(origin)?;
        if notary.is_zero() {
            return Err(RosterError::ZeroAddress);
        }

        let entry = self.notaries.entry(notary).or_insert(Notary {
            address: notary,
            active: true,
            added_at: now,
            added_by: origin,
            removed_at: None,
        });
        entry.active = true;
        entry.added_at = now;
        entry.added_by = origin;
        debug!(%notary, "Notary authorized");
        Ok(entry)
    }

    /// Deauthorize a notary. Already-inactive notaries are left as they are.
    pub fn remove_notary(
        &mut self,
        origin: Address,
        notary: Address,
        now: Timestamp,
    ) -> Result<Removal, RosterError> {
        self.authorize(origin)?;
        let entry = self
            .notaries
            .get_mut(&notary)
            .ok_or(RosterError::UnknownNotary { notary })?;
        if !entry.active {
            return Ok(Removal::AlreadyInactive);
        }
        entry.active = false;
        entry.removed_at = Some(now);
        debug!(%notary, "Notary deauthorized");
        Ok(Removal::Deactivated)
    }

    /// Membership predicate used by the attestation registry.
    pub fn is_notary(&self, who: &Address) -> bool {
        self.notaries.get(who).is_some_and(|n| n.active)
    }

    /// Entry for `who`, active or not.
    pub fn get(&self, who: &Address) -> Option<&Notary> {
        self.notaries.get(who)
    }

    /// Number of active notaries.
    pub fn count(&self) -> usize {
        self.notaries.values().filter(|n| n.active).count()
    }

    /// Number of entries, including deauthorized ones.
    pub fn len(&self) -> usize {
        self.notaries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notaries.is_empty()
    }

    /// All entries, ordered by address.
    pub fn iter(&self) -> impl Iterator<Item = &Notary> {
        self.notaries.values()
    }

    fn authorize(&self, origin: Address) -> Result<(), RosterError> {
        if origin == self.owner {
            Ok(())
        } else {
            Err(RosterError::Unauthorized {
                origin,
                owner: self.owner,
            })
        }
    }
}
