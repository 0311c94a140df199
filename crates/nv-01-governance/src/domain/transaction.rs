//! # Transaction
//!
//! One proposed privileged operation and its confirmation state.
//!
//! ```text
//! Submitted ──confirm/revoke──▶ Pending ──execute──▶ Executed (terminal)
//!                                  │
//!                                  └── signer-set version advances ──▶ Stale (terminal)
//! ```

use serde::{Deserialize, Serialize};
use shared_types::{Address, Command, Timestamp};
use std::collections::BTreeSet;
use std::fmt;

/// Lifecycle position of a transaction relative to the current signer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Awaiting confirmations, timelock, or a successful inner call.
    Pending,
    /// Executed successfully.
    Executed,
    /// Submitted under an older signer-set version; never executable.
    Stale,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Executed => "executed",
            Self::Stale => "stale",
        })
    }
}

/// A proposed privileged call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sequential ledger index, never reused.
    pub index: u64,
    /// The call to perform.
    pub command: Command,
    /// Signer that submitted the proposal.
    pub proposer: Address,
    confirmations: BTreeSet<Address>,
    /// Submission time.
    pub submitted_at: Timestamp,
    /// Signer-set version captured at submission.
    pub submitted_at_version: u64,
    /// Earliest execution time; set when the threshold is reached.
    pub ready_time: Option<Timestamp>,
    /// Terminal success flag.
    pub executed: bool,
    /// Execution time, once executed.
    pub executed_at: Option<Timestamp>,
}

impl Transaction {
    pub(crate) fn new(
        index: u64,
        command: Command,
        proposer: Address,
        submitted_at: Timestamp,
        submitted_at_version: u64,
    ) -> Self {
        Self {
            index,
            command,
            proposer,
            confirmations: BTreeSet::new(),
            submitted_at,
            submitted_at_version,
            ready_time: None,
            executed: false,
            executed_at: None,
        }
    }

    /// Signers who currently confirm this transaction, sorted.
    pub fn confirmations(&self) -> impl Iterator<Item = &Address> {
        self.confirmations.iter()
    }

    pub fn confirmation_count(&self) -> usize {
        self.confirmations.len()
    }

    pub fn is_confirmed_by(&self, signer: &Address) -> bool {
        self.confirmations.contains(signer)
    }

    /// Status against the given signer-set version.
    pub fn status(&self, current_version: u64) -> TransactionStatus {
        if self.executed {
            TransactionStatus::Executed
        } else if self.submitted_at_version != current_version {
            TransactionStatus::Stale
        } else {
            TransactionStatus::Pending
        }
    }

    /// Whether the timelock has elapsed at `now`.
    pub fn is_ready(&self, now: Timestamp) -> bool {
        self.ready_time.is_some_and(|t| now >= t)
    }

    /// Add a confirmation and anchor the timelock if this reaches the threshold.
    pub(crate) fn add_confirmation(
        &mut self,
        signer: Address,
        threshold: usize,
        delay: u64,
        now: Timestamp,
    ) -> bool {
        let inserted = self.confirmations.insert(signer);
        self.sync_ready_time(threshold, delay, now);
        inserted
    }

    /// Remove a confirmation; clears the timelock anchor below threshold.
    pub(crate) fn remove_confirmation(
        &mut self,
        signer: &Address,
        threshold: usize,
        delay: u64,
        now: Timestamp,
    ) -> bool {
        let removed = self.confirmations.remove(signer);
        self.sync_ready_time(threshold, delay, now);
        removed
    }

    pub(crate) fn mark_executed(&mut self, now: Timestamp) {
        self.executed = true;
        self.executed_at = Some(now);
    }

    fn sync_ready_time(&mut self, threshold: usize, delay: u64, now: Timestamp) {
        if self.confirmations.len() < threshold {
            self.ready_time = None;
        } else if self.ready_time.is_none() {
            self.ready_time = Some(now.saturating_add(delay));
        }
    }
}
