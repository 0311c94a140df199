//! # Roster Directory Adapter
//!
//! Exposes the notary roster to the attestation registry through its
//! `NotaryDirectory` port.

use nv_02_notary_roster::NotaryRoster;
use nv_03_attestation_registry::NotaryDirectory;
use shared_types::Address;

pub struct RosterDirectory<'a>(pub &'a NotaryRoster);

impl NotaryDirectory for RosterDirectory<'_> {
    fn is_notary(&self, who: &Address) -> bool {
        self.0.is_notary(who)
    }
}
