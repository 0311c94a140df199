//! # Vault Events
//!
//! Structured events emitted after every committed state transition, for
//! off-line audit indexing. Rejected calls emit nothing except
//! `ExecutionFailed`, which records a failed inner call on a transaction
//! that remains pending.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Command, DocHash, ErrorKind, Timestamp};

/// Subsystem identifiers used as event sources.
pub mod subsystem_ids {
    /// Governance vault (signer set, transaction ledger, treasury).
    pub const GOVERNANCE: u8 = 1;
    /// Notary roster.
    pub const NOTARY_ROSTER: u8 = 2;
    /// Attestation registry.
    pub const ATTESTATION_REGISTRY: u8 = 3;
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    // =========================================================================
    // GOVERNANCE: TRANSACTION LEDGER
    // =========================================================================
    /// A signer proposed a privileged command.
    TransactionSubmitted {
        /// Ledger index assigned to the transaction.
        index: u64,
        /// Proposing signer (auto-confirmed).
        proposer: Address,
        /// The proposed command.
        command: Command,
        /// Signer-set version captured at submission.
        submitted_at_version: u64,
    },

    /// A signer confirmed a transaction.
    TransactionConfirmed {
        /// Ledger index.
        index: u64,
        /// Confirming signer.
        signer: Address,
        /// Confirmation count after this call.
        confirmations: usize,
    },

    /// A signer withdrew a confirmation.
    ConfirmationRevoked {
        /// Ledger index.
        index: u64,
        /// Revoking signer.
        signer: Address,
        /// Confirmation count after this call.
        confirmations: usize,
    },

    /// A transaction executed successfully. Terminal.
    TransactionExecuted {
        /// Ledger index.
        index: u64,
        /// Signer that triggered execution.
        executor: Address,
    },

    /// The inner call of a transaction failed; the transaction stays pending.
    ExecutionFailed {
        /// Ledger index.
        index: u64,
        /// Signer that triggered execution.
        executor: Address,
        /// Kind of the inner failure.
        kind: ErrorKind,
        /// Inner failure description.
        reason: String,
    },

    // =========================================================================
    // GOVERNANCE: SIGNER SET
    // =========================================================================
    /// A signer was added.
    SignerAdded {
        /// New signer.
        signer: Address,
        /// Signer-set version after the change.
        version: u64,
    },

    /// A signer was removed.
    SignerRemoved {
        /// Removed signer.
        signer: Address,
        /// Signer-set version after the change.
        version: u64,
    },

    /// The confirmation threshold changed.
    ThresholdChanged {
        /// New threshold.
        threshold: usize,
        /// Signer-set version after the change.
        version: u64,
    },

    /// The timelock delay changed.
    TimelockDelayChanged {
        /// New delay in seconds.
        delay_secs: u64,
        /// Signer-set version after the change.
        version: u64,
    },

    // =========================================================================
    // GOVERNANCE: TREASURY
    // =========================================================================
    /// Native value was deposited into the vault.
    Deposited {
        /// Depositor.
        from: Address,
        /// Amount deposited.
        amount: u128,
        /// Vault balance after the deposit.
        balance: u128,
    },

    /// An executed transaction called an external collaborator target.
    ExternalCallDispatched {
        /// External target.
        target: Address,
        /// Value credited to the target.
        value: u128,
        /// Call data length (zero for plain transfers).
        data_len: usize,
    },

    // =========================================================================
    // NOTARY ROSTER
    // =========================================================================
    /// A notary was authorized (or its metadata refreshed).
    NotaryAdded {
        /// Notary identity.
        notary: Address,
        /// Governance identity that authorized it.
        added_by: Address,
        /// Time of authorization.
        added_at: Timestamp,
    },

    /// A notary was deauthorized.
    NotaryRemoved {
        /// Notary identity.
        notary: Address,
    },

    // =========================================================================
    // ATTESTATION REGISTRY
    // =========================================================================
    /// A document status attestation was committed.
    ActionRecorded {
        /// Document fingerprint.
        doc_hash: DocHash,
        /// Notary recovered from the signature.
        notary: Address,
        /// Status code (0 pending, 1 approved, 2 rejected).
        status: u8,
        /// Timestamp bound into the signed message.
        timestamp: Timestamp,
        /// Commit time.
        recorded_at: Timestamp,
    },

    /// The attestation circuit breaker was engaged.
    Paused {
        /// Governance identity that engaged it.
        by: Address,
    },

    /// The attestation circuit breaker was released.
    Unpaused {
        /// Governance identity that released it.
        by: Address,
    },
}

impl VaultEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::TransactionSubmitted { .. }
            | Self::TransactionConfirmed { .. }
            | Self::ConfirmationRevoked { .. }
            | Self::TransactionExecuted { .. }
            | Self::ExecutionFailed { .. }
            | Self::SignerAdded { .. }
            | Self::SignerRemoved { .. }
            | Self::ThresholdChanged { .. }
            | Self::TimelockDelayChanged { .. } => EventTopic::Governance,
            Self::Deposited { .. } | Self::ExternalCallDispatched { .. } => EventTopic::Treasury,
            Self::NotaryAdded { .. } | Self::NotaryRemoved { .. } => EventTopic::Roster,
            Self::ActionRecorded { .. } | Self::Paused { .. } | Self::Unpaused { .. } => {
                EventTopic::Attestation
            }
        }
    }

    /// Get the originating subsystem ID.
    #[must_use]
    pub fn source_subsystem(&self) -> u8 {
        match self.topic() {
            EventTopic::Governance | EventTopic::Treasury | EventTopic::All => {
                subsystem_ids::GOVERNANCE
            }
            EventTopic::Roster => subsystem_ids::NOTARY_ROSTER,
            EventTopic::Attestation => subsystem_ids::ATTESTATION_REGISTRY,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Transaction ledger and signer-set events.
    Governance,
    /// Deposits and external value transfers.
    Treasury,
    /// Notary roster events.
    Roster,
    /// Attestation registry events.
    Attestation,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Source subsystems to include. Empty means all sources.
    pub source_subsystems: Vec<u8>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            source_subsystems: Vec::new(),
        }
    }

    /// Create a filter for events from specific subsystems.
    #[must_use]
    pub fn from_subsystems(subsystems: Vec<u8>) -> Self {
        Self {
            topics: Vec::new(),
            source_subsystems: subsystems,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &VaultEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let source_match = self.source_subsystems.is_empty()
            || self.source_subsystems.contains(&event.source_subsystem());

        topic_match && source_match
    }
}
