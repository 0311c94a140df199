//! # Governance Errors
//!
//! Every rejection from the signer set, the ledger, or the vault. Variants
//! carry the offending fields; `Classify` maps each one onto the shared
//! error taxonomy.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Classify, ErrorKind, Timestamp};
use std::fmt;
use thiserror::Error;

/// Failure of the inner privileged call performed by `execute`.
///
/// The inner error's kind is preserved so the caller can tell a rejected
/// signer-set change (`ValidationError`) from a paused breaker toggle
/// (`StateError`) without parsing text.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
#[error("{kind}: {reason}")]
pub struct CallError {
    /// Kind of the inner failure.
    pub kind: ErrorKind,
    /// Human-readable cause.
    pub reason: String,
}

impl CallError {
    /// Build from a kind and a reason.
    pub fn new(kind: ErrorKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }

    /// Wrap any classified error.
    pub fn from_classified<E: Classify + fmt::Display>(err: &E) -> Self {
        Self::new(err.kind(), err.to_string())
    }

    /// The payload does not apply to the addressed target.
    pub fn unsupported(target: Address, payload: &str) -> Self {
        Self::new(
            ErrorKind::Validation,
            format!("target {target} does not accept {payload}"),
        )
    }
}

/// Errors raised by the governance subsystem.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GovernanceError {
    // =========================================================================
    // Authorization
    // =========================================================================
    /// Caller is not a current signer.
    #[error("not a signer: {caller}")]
    NotSigner { caller: Address },

    /// A governed operation was invoked outside the vault's execution path.
    #[error("unauthorized origin {origin}: only {owner} may call this")]
    Unauthorized { origin: Address, owner: Address },

    // =========================================================================
    // Validation
    // =========================================================================
    /// Command target is the zero address.
    #[error("invalid target: zero address")]
    InvalidTarget,

    /// No transaction at this index.
    #[error("unknown transaction index {index}")]
    UnknownIndex { index: u64 },

    /// The zero address cannot be a signer.
    #[error("invalid signer: zero address")]
    ZeroAddressSigner,

    /// Removal target is not a signer.
    #[error("unknown signer {signer}")]
    UnknownSigner { signer: Address },

    /// Removing a signer would leave fewer signers than the threshold.
    #[error("removal would leave {remaining} signers below threshold {threshold}")]
    ThresholdViolation { remaining: usize, threshold: usize },

    /// Threshold outside `1..=signers`.
    #[error("invalid threshold {threshold} for {signers} signers")]
    InvalidThreshold { threshold: usize, signers: usize },

    /// Initial signer list is empty.
    #[error("signer set cannot be empty")]
    EmptySignerSet,

    /// The payload is not a signer-set operation.
    #[error("unsupported signer-set payload: {payload}")]
    UnsupportedPayload { payload: &'static str },

    /// Deposit of zero value.
    #[error("deposit amount must be positive")]
    ZeroDeposit,

    /// Deposit would overflow the vault balance.
    #[error("balance overflow: {balance} + {amount}")]
    BalanceOverflow { balance: u128, amount: u128 },

    // =========================================================================
    // State
    // =========================================================================
    /// Signer is already in the set.
    #[error("duplicate signer {signer}")]
    DuplicateSigner { signer: Address },

    /// Transaction already executed.
    #[error("transaction {index} already executed")]
    AlreadyExecuted { index: u64 },

    /// Signer has already confirmed this transaction.
    #[error("transaction {index} already confirmed by {signer}")]
    AlreadyConfirmed { index: u64, signer: Address },

    /// Signer has not confirmed this transaction.
    #[error("transaction {index} not confirmed by {signer}")]
    NotConfirmed { index: u64, signer: Address },

    /// Not enough confirmations to execute.
    #[error("transaction {index} has {confirmations} confirmations, threshold {threshold}")]
    InsufficientConfirmations {
        index: u64,
        confirmations: usize,
        threshold: usize,
    },

    // =========================================================================
    // Temporal
    // =========================================================================
    /// The timelock has not elapsed.
    #[error("transaction {index} timelock active until {ready_time:?} (now {now})")]
    TimelockActive {
        index: u64,
        ready_time: Option<Timestamp>,
        now: Timestamp,
    },

    // =========================================================================
    // Consistency
    // =========================================================================
    /// Signer set rotated since the transaction was submitted.
    #[error("signer set rotated: transaction {index} submitted at version {submitted_at_version}, current {current_version}")]
    SignerSetRotated {
        index: u64,
        submitted_at_version: u64,
        current_version: u64,
    },

    // =========================================================================
    // Execution
    // =========================================================================
    /// The inner call failed; the transaction is unchanged.
    #[error("transaction {index} execution failed: {source}")]
    ExecutionFailed {
        index: u64,
        #[source]
        source: CallError,
    },
}

impl Classify for GovernanceError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotSigner { .. } | Self::Unauthorized { .. } => ErrorKind::Authorization,
            Self::InvalidTarget
            | Self::UnknownIndex { .. }
            | Self::ZeroAddressSigner
            | Self::UnknownSigner { .. }
            | Self::ThresholdViolation { .. }
            | Self::InvalidThreshold { .. }
            | Self::EmptySignerSet
            | Self::UnsupportedPayload { .. }
            | Self::ZeroDeposit
            | Self::BalanceOverflow { .. } => ErrorKind::Validation,
            Self::DuplicateSigner { .. }
            | Self::AlreadyExecuted { .. }
            | Self::AlreadyConfirmed { .. }
            | Self::NotConfirmed { .. }
            | Self::InsufficientConfirmations { .. } => ErrorKind::State,
            Self::TimelockActive { .. } => ErrorKind::Temporal,
            Self::SignerSetRotated { .. } => ErrorKind::Consistency,
            Self::ExecutionFailed { .. } => ErrorKind::Execution,
        }
    }
}
