//! # Vault State
//!
//! Everything one vault deployment owns, held in a single value so the
//! service can serialize every operation against one lock and the snapshot
//! store can persist it atomically.

use crate::adapters::{ModuleRouter, RosterDirectory};
use nv_01_governance::{ExecutionReceipt, GovernanceError, MultisigVault};
use nv_02_notary_roster::NotaryRoster;
use nv_03_attestation_registry::{
    Attestation, AttestationRegistry, DocumentRecord, RegistryError,
};
use serde::{Deserialize, Serialize};
use shared_bus::VaultEvent;
use shared_crypto::RecoverableSignature;
use shared_types::{Address, Timestamp};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultState {
    pub vault: MultisigVault,
    pub roster: NotaryRoster,
    pub roster_address: Address,
    pub registry: AttestationRegistry,
    /// Value received by external payees.
    #[serde(default)]
    pub accounts: BTreeMap<Address, u128>,
}

impl VaultState {
    pub fn vault_address(&self) -> Address {
        self.vault.address()
    }

    pub fn registry_address(&self) -> Address {
        self.registry.address()
    }

    /// Execute a ledger transaction through the module router.
    ///
    /// Returns the receipt plus the component events the inner call caused.
    pub fn execute(
        &mut self,
        caller: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<(ExecutionReceipt, Vec<VaultEvent>), GovernanceError> {
        let mut router = ModuleRouter::new(
            self.roster_address,
            &mut self.roster,
            &mut self.registry,
            &mut self.accounts,
        );
        let receipt = self.vault.execute(caller, index, now, &mut router)?;
        Ok((receipt, router.into_effects()))
    }

    /// Verify a relayed attestation against the current roster.
    pub fn record_action(
        &mut self,
        attestation: &Attestation,
        signature: &RecoverableSignature,
        now: Timestamp,
    ) -> Result<DocumentRecord, RegistryError> {
        let directory = RosterDirectory(&self.roster);
        self.registry
            .record_action(&directory, attestation, signature, now)
            .cloned()
    }

    /// Balance credited to an external payee.
    pub fn account(&self, who: &Address) -> u128 {
        self.accounts.get(who).copied().unwrap_or(0)
    }
}
