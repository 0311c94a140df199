//! # Inbound Ports
//!
//! Read-side roster surface for audit. Mutations are not exposed here: they
//! only happen through executed governance transactions.

use crate::domain::roster::Notary;
use async_trait::async_trait;
use shared_types::Address;

#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn is_notary(&self, who: Address) -> bool;

    async fn notary(&self, who: Address) -> Option<Notary>;

    /// Number of active notaries.
    async fn notary_count(&self) -> usize;
}
