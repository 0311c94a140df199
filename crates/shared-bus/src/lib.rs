//! # Shared Bus - Audit Event Bus
//!
//! Every committed state transition in the vault, the notary roster and the
//! attestation registry is announced here as a [`VaultEvent`]. Off-line
//! indexers subscribe with an [`EventFilter`]; the in-process bus also keeps a
//! bounded history for readers that attach late.
//!
//! ```text
//! ┌──────────────┐   publish()   ┌──────────────┐  subscribe()  ┌──────────┐
//! │ Vault service│ ────────────▶ │  Event Bus   │ ────────────▶ │ Indexer  │
//! └──────────────┘               └──────────────┘               └──────────┘
//! ```
//!
//! Events are published only after the state change they describe has been
//! committed, plus an `ExecutionFailed` record when a governed call
//! reaches its target and fails. Calls rejected before that point publish
//! nothing.

#![allow(clippy::missing_const_for_fn)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

pub use events::{subsystem_ids, EventFilter, EventTopic, VaultEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;

/// Events retained for late readers.
pub const DEFAULT_HISTORY_CAPACITY: usize = 4096;
