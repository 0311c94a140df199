//! # Genesis Builder

use crate::container::{VaultConfig, VaultState};
use crate::errors::VaultError;
use nv_01_governance::MultisigVault;
use nv_02_notary_roster::NotaryRoster;
use nv_03_attestation_registry::AttestationRegistry;
use std::collections::BTreeMap;
use tracing::info;

pub struct GenesisBuilder {
    config: VaultConfig,
}

impl GenesisBuilder {
    pub fn new(config: VaultConfig) -> Self {
        Self { config }
    }

    /// Validate the configuration and produce the genesis state.
    pub fn build(self) -> Result<VaultState, VaultError> {
        self.config.validate()?;

        let gov = &self.config.governance;
        let vault = MultisigVault::new(
            gov.vault_address,
            gov.signers.clone(),
            gov.threshold,
            gov.timelock_delay_secs,
        )?;
        let roster = NotaryRoster::new(vault.address());
        let registry = AttestationRegistry::new(
            vault.address(),
            self.config.typed_data_domain(),
            self.config.freshness_policy(),
        );

        info!(
            vault = %vault.address(),
            signers = gov.signers.len(),
            threshold = gov.threshold,
            timelock_delay_secs = gov.timelock_delay_secs,
            roster = %self.config.components.roster_address,
            registry = %registry.address(),
            "Genesis state created"
        );

        Ok(VaultState {
            vault,
            roster,
            roster_address: self.config.components.roster_address,
            registry,
            accounts: BTreeMap::new(),
        })
    }
}
