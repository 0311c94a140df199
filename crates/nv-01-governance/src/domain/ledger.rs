//! # Transaction Ledger
//!
//! Append-only, index-addressed log of proposed privileged operations.
//! Indices are assigned sequentially at submission and never reused.
//!
//! Each operation validates completely before touching any transaction,
//! so a rejected call leaves the ledger unchanged.

use super::errors::GovernanceError;
use super::signer_set::SignerSet;
use super::transaction::{Transaction, TransactionStatus};
use serde::{Deserialize, Serialize};
use shared_types::{Address, Command, Timestamp};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLedger {
    transactions: Vec<Transaction>,
}

impl TransactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transactions ever submitted.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn get(&self, index: u64) -> Option<&Transaction> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.transactions.get(i))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter()
    }

    /// Transactions that are still executable in principle.
    pub fn pending(&self, current_version: u64) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(move |tx| tx.status(current_version) == TransactionStatus::Pending)
    }

    /// Append a proposal, auto-confirmed by its proposer.
    pub fn submit(
        &mut self,
        signers: &SignerSet,
        proposer: Address,
        command: Command,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        signers.require_signer(proposer)?;
        if command.target.is_zero() {
            return Err(GovernanceError::InvalidTarget);
        }

        let index = self.transactions.len() as u64;
        let mut tx = Transaction::new(index, command, proposer, now, signers.version());
        tx.add_confirmation(
            proposer,
            signers.threshold(),
            signers.timelock_delay(),
            now,
        );
        self.transactions.push(tx);
        Ok(index)
    }

    /// Record a confirmation. Returns the new confirmation count.
    pub fn confirm(
        &mut self,
        signers: &SignerSet,
        signer: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<usize, GovernanceError> {
        signers.require_signer(signer)?;
        let tx = self.open_mut(signers, index)?;
        if tx.is_confirmed_by(&signer) {
            return Err(GovernanceError::AlreadyConfirmed { index, signer });
        }
        tx.add_confirmation(signer, signers.threshold(), signers.timelock_delay(), now);
        Ok(tx.confirmation_count())
    }

    /// Withdraw a confirmation. Returns the new confirmation count.
    pub fn revoke(
        &mut self,
        signers: &SignerSet,
        signer: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<usize, GovernanceError> {
        signers.require_signer(signer)?;
        let tx = self.open_mut(signers, index)?;
        if !tx.is_confirmed_by(&signer) {
            return Err(GovernanceError::NotConfirmed { index, signer });
        }
        tx.remove_confirmation(&signer, signers.threshold(), signers.timelock_delay(), now);
        Ok(tx.confirmation_count())
    }

    /// Check every precondition of `execute` except the inner call.
    ///
    /// Order: signer, index, executed, version, confirmations, timelock.
    pub fn check_executable(
        &self,
        signers: &SignerSet,
        caller: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<&Transaction, GovernanceError> {
        signers.require_signer(caller)?;
        let tx = self.get(index).ok_or(GovernanceError::UnknownIndex { index })?;
        if tx.executed {
            return Err(GovernanceError::AlreadyExecuted { index });
        }
        check_version(tx, signers.version())?;
        if tx.confirmation_count() < signers.threshold() {
            return Err(GovernanceError::InsufficientConfirmations {
                index,
                confirmations: tx.confirmation_count(),
                threshold: signers.threshold(),
            });
        }
        if !tx.is_ready(now) {
            return Err(GovernanceError::TimelockActive {
                index,
                ready_time: tx.ready_time,
                now,
            });
        }
        Ok(tx)
    }

    /// Seal a transaction after its inner call succeeded.
    pub(crate) fn mark_executed(&mut self, index: u64, now: Timestamp) -> Result<(), GovernanceError> {
        let tx = usize::try_from(index)
            .ok()
            .and_then(|i| self.transactions.get_mut(i))
            .ok_or(GovernanceError::UnknownIndex { index })?;
        tx.mark_executed(now);
        Ok(())
    }

    /// A transaction that still accepts confirmation changes.
    fn open_mut(
        &mut self,
        signers: &SignerSet,
        index: u64,
    ) -> Result<&mut Transaction, GovernanceError> {
        let tx = usize::try_from(index)
            .ok()
            .and_then(|i| self.transactions.get_mut(i))
            .ok_or(GovernanceError::UnknownIndex { index })?;
        if tx.executed {
            return Err(GovernanceError::AlreadyExecuted { index });
        }
        check_version(tx, signers.version())?;
        Ok(tx)
    }
}

fn check_version(tx: &Transaction, current_version: u64) -> Result<(), GovernanceError> {
    if tx.submitted_at_version != current_version {
        return Err(GovernanceError::SignerSetRotated {
            index: tx.index,
            submitted_at_version: tx.submitted_at_version,
            current_version,
        });
    }
    Ok(())
}
