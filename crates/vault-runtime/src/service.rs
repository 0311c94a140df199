//! # Notary-Vault Service
//!
//! Serializes every operation of one vault deployment against a single
//! write lock and publishes one audit event per committed change. Events are
//! published before the lock is released, so subscribers observe them in
//! commit order.
//!
//! ## Event derivation
//!
//! | Call | Events |
//! |------|--------|
//! | `submit` | `TransactionSubmitted` |
//! | `confirm` / `revoke` | `TransactionConfirmed` / `ConfirmationRevoked` |
//! | `execute` (ok) | component events, signer-set event, then `TransactionExecuted` |
//! | `execute` (inner call failed) | `ExecutionFailed` |
//! | `deposit` | `Deposited` |
//! | `record_action` | `ActionRecorded` |

use crate::container::VaultState;
use async_trait::async_trait;
use nv_01_governance::{
    ExecutionReceipt, GovernanceApi, GovernanceError, SignerSet, Transaction, TransactionStatus,
};
use nv_02_notary_roster::{Notary, RosterApi};
use nv_03_attestation_registry::{
    Attestation, DocumentRecord, NotarizationApi, RegistryError,
};
use shared_bus::{EventPublisher, VaultEvent};
use shared_crypto::{RecoverableSignature, TypedDataDomain};
use shared_types::{Address, Command, DocHash, Payload, TimeSource};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

pub struct NotaryVaultService {
    state: RwLock<VaultState>,
    clock: Arc<dyn TimeSource>,
    events: Arc<dyn EventPublisher>,
}

impl NotaryVaultService {
    pub fn new(state: VaultState, clock: Arc<dyn TimeSource>, events: Arc<dyn EventPublisher>) -> Self {
        Self {
            state: RwLock::new(state),
            clock,
            events,
        }
    }

    /// Copy of the full state, for persistence.
    pub async fn snapshot(&self) -> VaultState {
        self.state.read().await.clone()
    }

    pub async fn vault_address(&self) -> Address {
        self.state.read().await.vault_address()
    }

    pub async fn roster_address(&self) -> Address {
        self.state.read().await.roster_address
    }

    pub async fn registry_address(&self) -> Address {
        self.state.read().await.registry_address()
    }

    /// Domain notaries must sign attestations for.
    pub async fn registry_domain(&self) -> TypedDataDomain {
        self.state.read().await.registry.domain().clone()
    }

    /// Value credited to an external payee by executed transfers.
    pub async fn account_balance(&self, who: Address) -> u128 {
        self.state.read().await.account(&who)
    }

    /// Indices of pending transactions under the current signer set.
    pub async fn pending(&self) -> Vec<u64> {
        let state = self.state.read().await;
        let version = state.vault.signers().version();
        state.vault.ledger().pending(version).map(|tx| tx.index).collect()
    }

    async fn publish_all(&self, events: Vec<VaultEvent>) {
        for event in events {
            self.events.publish(event).await;
        }
    }
}

/// Signer-set event for a command the vault applied to itself.
fn signer_set_event(payload: &Payload, version: u64) -> Option<VaultEvent> {
    match payload {
        Payload::AddSigner(signer) => Some(VaultEvent::SignerAdded {
            signer: *signer,
            version,
        }),
        Payload::RemoveSigner(signer) => Some(VaultEvent::SignerRemoved {
            signer: *signer,
            version,
        }),
        Payload::ChangeThreshold(threshold) => Some(VaultEvent::ThresholdChanged {
            threshold: *threshold,
            version,
        }),
        Payload::SetTimelockDelay(delay_secs) => Some(VaultEvent::TimelockDelayChanged {
            delay_secs: *delay_secs,
            version,
        }),
        _ => None,
    }
}

#[async_trait]
impl GovernanceApi for NotaryVaultService {
    #[instrument(skip(self, command), fields(payload = command.payload.name()))]
    async fn submit(&self, proposer: Address, command: Command) -> Result<u64, GovernanceError> {
        let mut state = self.state.write().await;
        let index = state.vault.submit(proposer, command.clone(), self.clock.now())?;
        let submitted_at_version = state.vault.signers().version();
        self.events
            .publish(VaultEvent::TransactionSubmitted {
                index,
                proposer,
                command,
                submitted_at_version,
            })
            .await;
        Ok(index)
    }

    #[instrument(skip(self))]
    async fn confirm(&self, signer: Address, index: u64) -> Result<usize, GovernanceError> {
        let mut state = self.state.write().await;
        let confirmations = state.vault.confirm(signer, index, self.clock.now())?;
        self.events
            .publish(VaultEvent::TransactionConfirmed {
                index,
                signer,
                confirmations,
            })
            .await;
        Ok(confirmations)
    }

    #[instrument(skip(self))]
    async fn revoke(&self, signer: Address, index: u64) -> Result<usize, GovernanceError> {
        let mut state = self.state.write().await;
        let confirmations = state.vault.revoke(signer, index, self.clock.now())?;
        self.events
            .publish(VaultEvent::ConfirmationRevoked {
                index,
                signer,
                confirmations,
            })
            .await;
        Ok(confirmations)
    }

    #[instrument(skip(self))]
    async fn execute(&self, caller: Address, index: u64) -> Result<ExecutionReceipt, GovernanceError> {
        let mut state = self.state.write().await;
        let vault_address = state.vault_address();

        match state.execute(caller, index, self.clock.now()) {
            Ok((receipt, mut events)) => {
                if receipt.command.target == vault_address {
                    events.extend(signer_set_event(
                        &receipt.command.payload,
                        receipt.signer_set_version,
                    ));
                }
                events.push(VaultEvent::TransactionExecuted {
                    index,
                    executor: caller,
                });
                self.publish_all(events).await;
                Ok(receipt)
            }
            Err(GovernanceError::ExecutionFailed { index, source }) => {
                self.events
                    .publish(VaultEvent::ExecutionFailed {
                        index,
                        executor: caller,
                        kind: source.kind,
                        reason: source.reason.clone(),
                    })
                    .await;
                Err(GovernanceError::ExecutionFailed { index, source })
            }
            Err(e) => Err(e),
        }
    }

    #[instrument(skip(self))]
    async fn deposit(&self, from: Address, amount: u128) -> Result<u128, GovernanceError> {
        let mut state = self.state.write().await;
        let balance = state.vault.deposit(from, amount)?;
        self.events
            .publish(VaultEvent::Deposited {
                from,
                amount,
                balance,
            })
            .await;
        Ok(balance)
    }

    async fn balance(&self) -> u128 {
        self.state.read().await.vault.balance()
    }

    async fn transaction(&self, index: u64) -> Option<Transaction> {
        self.state.read().await.vault.transaction(index).cloned()
    }

    async fn status(&self, index: u64) -> Result<TransactionStatus, GovernanceError> {
        self.state.read().await.vault.status(index)
    }

    async fn signer_set(&self) -> SignerSet {
        self.state.read().await.vault.signers().clone()
    }
}

#[async_trait]
impl NotarizationApi for NotaryVaultService {
    #[instrument(skip(self, attestation, signature), fields(doc_hash = %attestation.doc_hash))]
    async fn record_action(
        &self,
        relayer: Address,
        attestation: Attestation,
        signature: RecoverableSignature,
    ) -> Result<DocumentRecord, RegistryError> {
        let mut state = self.state.write().await;
        let record = state
            .record_action(&attestation, &signature, self.clock.now())
            .inspect_err(|e| warn!(%relayer, error = %e, "Attestation rejected"))?;
        info!(%relayer, notary = %record.notary, "Attestation relayed");
        self.events
            .publish(VaultEvent::ActionRecorded {
                doc_hash: record.doc_hash,
                notary: record.notary,
                status: record.status.code(),
                timestamp: record.signed_at,
                recorded_at: record.recorded_at,
            })
            .await;
        Ok(record)
    }

    async fn get_document(&self, doc_hash: DocHash) -> Option<DocumentRecord> {
        self.state.read().await.registry.get_document(&doc_hash).cloned()
    }

    /// Direct breaker access. The vault identity can only act through an
    /// executed transaction, so a caller presenting it here is refused.
    #[instrument(skip(self))]
    async fn pause(&self, origin: Address) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        reject_impersonation(&state, origin)?;
        state.registry.pause(origin)?;
        self.events.publish(VaultEvent::Paused { by: origin }).await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn unpause(&self, origin: Address) -> Result<(), RegistryError> {
        let mut state = self.state.write().await;
        reject_impersonation(&state, origin)?;
        state.registry.unpause(origin)?;
        self.events.publish(VaultEvent::Unpaused { by: origin }).await;
        Ok(())
    }

    async fn is_paused(&self) -> bool {
        self.state.read().await.registry.is_paused()
    }
}

fn reject_impersonation(state: &VaultState, origin: Address) -> Result<(), RegistryError> {
    if origin == state.vault_address() {
        warn!(%origin, "Direct call presented the vault identity");
        return Err(RegistryError::Unauthorized {
            origin,
            owner: state.registry.owner(),
        });
    }
    Ok(())
}

#[async_trait]
impl RosterApi for NotaryVaultService {
    async fn is_notary(&self, who: Address) -> bool {
        self.state.read().await.roster.is_notary(&who)
    }

    async fn notary(&self, who: Address) -> Option<Notary> {
        self.state.read().await.roster.get(&who).cloned()
    }

    async fn notary_count(&self) -> usize {
        self.state.read().await.roster.count()
    }
}
