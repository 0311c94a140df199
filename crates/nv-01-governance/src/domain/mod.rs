//! # Domain Layer
//!
//! Pure governance logic with no I/O dependencies.
//!
//! - `signer_set`: signers, threshold, timelock delay, version counter
//! - `transaction`: one proposal and its confirmation state
//! - `ledger`: append-only transaction log
//! - `vault`: the aggregate with the self-call path and treasury
//! - `errors`: `GovernanceError` and the inner `CallError`

pub mod errors;
pub mod ledger;
pub mod signer_set;
pub mod transaction;
pub mod vault;

pub use errors::*;
pub use ledger::*;
pub use signer_set::*;
pub use transaction::*;
pub use vault::*;
