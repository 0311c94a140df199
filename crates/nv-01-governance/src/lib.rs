//! # Governance Subsystem (NV-01)
//!
//! Threshold-multisignature vault: a signer set with threshold, timelock and
//! version counter, an append-only transaction ledger, and a treasury.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): signer set, transactions, ledger, vault
//! - **Ports Layer** (`ports/`): `GovernanceApi` (inbound), `CallTarget` (outbound)
//!
//! ## Control flow
//!
//! ```text
//! submit ──▶ confirm/revoke ──▶ execute ──▶ apply(command)
//!                                              ├── target == vault ─▶ SignerSet (origin = vault)
//!                                              └── otherwise ───────▶ CallTarget (origin = vault)
//! ```
//!
//! ## Safety Notes
//!
//! - **Self-call guard**: signer-set mutations accept only the vault's own
//!   identity as origin, so no single signer can change the trust root.
//! - **Rotation safety**: a transaction submitted under an older signer-set
//!   version can never execute.
//! - **Atomic execute**: a failed inner call changes nothing.

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod domain;
pub mod ports;

pub use domain::errors::{CallError, GovernanceError};
pub use domain::ledger::TransactionLedger;
pub use domain::signer_set::{SignerSet, INITIAL_VERSION};
pub use domain::transaction::{Transaction, TransactionStatus};
pub use domain::vault::{ExecutionReceipt, MultisigVault};
pub use ports::inbound::GovernanceApi;
pub use ports::outbound::{CallTarget, NoTargets};
