//! # Outbound Ports (Driven Ports)

use shared_types::Address;

/// Notary membership, as decided by the notary roster.
///
/// The registry authorizes strictly by membership of the identity it
/// recovered from a signature.
pub trait NotaryDirectory {
    fn is_notary(&self, who: &Address) -> bool;
}
