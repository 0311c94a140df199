//! # Inbound Ports (Driving Ports / API)
//!
//! The governance surface consumed by admin-facing collaborators (CLI,
//! dashboard backend). Implementations serialize every call against a
//! single total order and publish an audit event per committed change.

use crate::domain::errors::GovernanceError;
use crate::domain::signer_set::SignerSet;
use crate::domain::transaction::{Transaction, TransactionStatus};
use crate::domain::vault::ExecutionReceipt;
use async_trait::async_trait;
use shared_types::{Address, Command};

#[async_trait]
pub trait GovernanceApi: Send + Sync {
    // =========================================================================
    // Transaction ledger
    // =========================================================================

    /// Propose a command. The proposer auto-confirms. Returns the index.
    async fn submit(&self, proposer: Address, command: Command) -> Result<u64, GovernanceError>;

    /// Confirm a transaction. Returns the confirmation count.
    async fn confirm(&self, signer: Address, index: u64) -> Result<usize, GovernanceError>;

    /// Withdraw a confirmation. Returns the confirmation count.
    async fn revoke(&self, signer: Address, index: u64) -> Result<usize, GovernanceError>;

    /// Execute a confirmed transaction whose timelock has elapsed.
    async fn execute(&self, caller: Address, index: u64) -> Result<ExecutionReceipt, GovernanceError>;

    // =========================================================================
    // Treasury
    // =========================================================================

    /// Receive native value. Returns the new balance.
    async fn deposit(&self, from: Address, amount: u128) -> Result<u128, GovernanceError>;

    async fn balance(&self) -> u128;

    // =========================================================================
    // Reads
    // =========================================================================

    async fn transaction(&self, index: u64) -> Option<Transaction>;

    async fn status(&self, index: u64) -> Result<TransactionStatus, GovernanceError>;

    async fn signer_set(&self) -> SignerSet;
}
