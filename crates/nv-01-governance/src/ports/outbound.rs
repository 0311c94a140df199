//! # Outbound Ports (Driven Ports)
//!
//! Components the vault calls into when it executes a transaction whose
//! target is not the vault itself.

use crate::domain::errors::CallError;
use shared_types::{Address, Command, Timestamp};

/// Dispatch for commands addressed to anything other than the vault.
///
/// `origin` is always the vault's governance identity. Implementations must
/// be all-or-nothing: on `Err`, no state they own may have changed.
pub trait CallTarget {
    fn call(&mut self, origin: Address, command: &Command, now: Timestamp) -> Result<(), CallError>;
}

/// A target set with no components: every external call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTargets;

impl CallTarget for NoTargets {
    fn call(&mut self, _origin: Address, command: &Command, _now: Timestamp) -> Result<(), CallError> {
        Err(CallError::unsupported(command.target, command.payload.name()))
    }
}
