//! # Deployment Harness
//!
//! A wired `NotaryVaultService` on a manual clock with a recording event bus.

use std::sync::Arc;

use nv_01_governance::{GovernanceApi, GovernanceError};
use nv_03_attestation_registry::{Attestation, DocumentStatus};
use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, VaultEvent};
use shared_crypto::{RecoverableSignature, Secp256k1KeyPair, TypedDataDomain};
use shared_types::{Address, Command, DocHash, ManualTimeSource, Payload, TimeSource};
use vault_runtime::{GenesisBuilder, NotaryVaultService, VaultConfig};

/// Genesis clock reading.
pub const GENESIS_TIME: u64 = 1_700_000_000;

pub fn signer(label: char) -> Address {
    Address::new([label as u8; 20])
}

pub struct Deployment {
    pub service: NotaryVaultService,
    pub bus: Arc<InMemoryEventBus>,
    pub clock: Arc<ManualTimeSource>,
    pub vault: Address,
    pub roster: Address,
    pub registry: Address,
}

impl Deployment {
    pub fn new(signers: &[Address], threshold: usize, timelock_delay_secs: u64) -> Self {
        let mut config = VaultConfig::default();
        config.governance.signers = signers.to_vec();
        config.governance.threshold = threshold;
        config.governance.timelock_delay_secs = timelock_delay_secs;
        let vault = config.governance.vault_address;
        let roster = config.components.roster_address;
        let registry = config.components.registry_address;

        let state = GenesisBuilder::new(config)
            .build()
            .unwrap_or_else(|e| panic!("invalid test genesis: {e}"));
        let clock = Arc::new(ManualTimeSource::new(GENESIS_TIME));
        let bus = Arc::new(InMemoryEventBus::new());
        let service = NotaryVaultService::new(state, clock.clone(), bus.clone());
        Self {
            service,
            bus,
            clock,
            vault,
            roster,
            registry,
        }
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn advance(&self, secs: u64) {
        self.clock.advance(secs);
    }

    /// Submit by `approvers[0]`, confirm by the rest. Does not advance time.
    pub async fn propose(&self, approvers: &[Address], command: Command) -> Result<u64, GovernanceError> {
        let index = self.service.submit(approvers[0], command).await?;
        for signer in &approvers[1..] {
            self.service.confirm(*signer, index).await?;
        }
        Ok(index)
    }

    /// Propose, wait out the timelock, execute.
    pub async fn govern(&self, approvers: &[Address], command: Command) -> Result<u64, GovernanceError> {
        let index = self.propose(approvers, command).await?;
        let delay = self.service.signer_set().await.timelock_delay();
        self.advance(delay);
        self.service.execute(approvers[0], index).await?;
        Ok(index)
    }

    /// Authorize a fresh notary key through governance.
    pub async fn enrol_notary(&self, approvers: &[Address]) -> Secp256k1KeyPair {
        let key = Secp256k1KeyPair::generate();
        self.govern(approvers, Command::call(self.roster, Payload::AddNotary(key.address())))
            .await
            .unwrap_or_else(|e| panic!("notary enrolment failed: {e}"));
        key
    }

    pub async fn domain(&self) -> TypedDataDomain {
        self.service.registry_domain().await
    }

    /// A current attestation signed by `key`.
    pub async fn attest(
        &self,
        key: &Secp256k1KeyPair,
        doc: u8,
        status: DocumentStatus,
    ) -> (Attestation, RecoverableSignature) {
        let attestation = Attestation::new(DocHash::new([doc; 32]), status, self.now());
        let signature = attestation
            .sign(&self.domain().await, key)
            .unwrap_or_else(|e| panic!("signing failed: {e}"));
        (attestation, signature)
    }

    /// Retained events on one topic, oldest first.
    pub fn history(&self, topic: EventTopic) -> Vec<VaultEvent> {
        self.bus.history(&EventFilter::topics(vec![topic]))
    }
}
