//! # Notary-Vault Runtime
//!
//! Composition root: wires the governance vault, the notary roster and the
//! attestation registry into one serialized service.
//!
//! ## Modular Structure
//!
//! - `container/` - configuration and the composite vault state
//! - `genesis/` - initial state from configuration
//! - `adapters/` - module router, roster directory, snapshot store
//! - `service` - the serialized API surface and event publication
//!
//! ## Wiring
//!
//! ```text
//!                     ┌──────────────── NotaryVaultService ────────────────┐
//!  signers ──submit──▶│ MultisigVault ──execute──▶ ModuleRouter            │
//!                     │                              ├─▶ NotaryRoster      │
//!                     │                              ├─▶ AttestationRegistry (pause)
//!                     │                              └─▶ external accounts │
//!  relayer ──record──▶│ AttestationRegistry ◀── RosterDirectory(roster)    │
//!                     └───────────────────────────┬────────────────────────┘
//!                                                 ▼
//!                                          InMemoryEventBus
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod adapters;
pub mod container;
pub mod errors;
pub mod genesis;
pub mod service;

pub use adapters::{ModuleRouter, RosterDirectory, SnapshotError, SnapshotStore};
pub use container::{ConfigError, VaultConfig, VaultState};
pub use errors::VaultError;
pub use genesis::GenesisBuilder;
pub use service::NotaryVaultService;
