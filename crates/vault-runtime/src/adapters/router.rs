//! # Governed Module Router
//!
//! `CallTarget` implementation that the vault executes through. Commands
//! are routed by target identity:
//!
//! | Target | Accepted payloads |
//! |--------|-------------------|
//! | roster | `AddNotary`, `RemoveNotary` |
//! | registry | `Pause`, `Unpause` |
//! | any other address | `Transfer`, `Opaque` (external account, credited with `value`) |
//!
//! Each routed call either commits and records the audit events it caused,
//! or fails and changes nothing.

use nv_01_governance::{CallError, CallTarget};
use nv_02_notary_roster::{NotaryRoster, Removal};
use nv_03_attestation_registry::AttestationRegistry;
use shared_bus::VaultEvent;
use shared_types::{Address, Command, ErrorKind, Payload, Timestamp};
use std::collections::BTreeMap;
use tracing::debug;

pub struct ModuleRouter<'a> {
    roster_address: Address,
    roster: &'a mut NotaryRoster,
    registry: &'a mut AttestationRegistry,
    accounts: &'a mut BTreeMap<Address, u128>,
    effects: Vec<VaultEvent>,
}

impl<'a> ModuleRouter<'a> {
    pub fn new(
        roster_address: Address,
        roster: &'a mut NotaryRoster,
        registry: &'a mut AttestationRegistry,
        accounts: &'a mut BTreeMap<Address, u128>,
    ) -> Self {
        Self {
            roster_address,
            roster,
            registry,
            accounts,
            effects: Vec::new(),
        }
    }

    /// Events caused by the calls routed so far, in order.
    pub fn into_effects(self) -> Vec<VaultEvent> {
        self.effects
    }

    fn call_roster(&mut self, origin: Address, command: &Command, now: Timestamp) -> Result<(), CallError> {
        reject_value(command)?;
        match &command.payload {
            Payload::AddNotary(notary) => {
                let entry = self
                    .roster
                    .add_notary(origin, *notary, now)
                    .map_err(|e| CallError::from_classified(&e))?;
                self.effects.push(VaultEvent::NotaryAdded {
                    notary: entry.address,
                    added_by: entry.added_by,
                    added_at: entry.added_at,
                });
                Ok(())
            }
            Payload::RemoveNotary(notary) => {
                let removal = self
                    .roster
                    .remove_notary(origin, *notary, now)
                    .map_err(|e| CallError::from_classified(&e))?;
                if removal == Removal::Deactivated {
                    self.effects.push(VaultEvent::NotaryRemoved { notary: *notary });
                }
                Ok(())
            }
            other => Err(CallError::unsupported(command.target, other.name())),
        }
    }

    fn call_registry(&mut self, origin: Address, command: &Command) -> Result<(), CallError> {
        reject_value(command)?;
        match &command.payload {
            Payload::Pause => {
                self.registry
                    .pause(origin)
                    .map_err(|e| CallError::from_classified(&e))?;
                self.effects.push(VaultEvent::Paused { by: origin });
                Ok(())
            }
            Payload::Unpause => {
                self.registry
                    .unpause(origin)
                    .map_err(|e| CallError::from_classified(&e))?;
                self.effects.push(VaultEvent::Unpaused { by: origin });
                Ok(())
            }
            other => Err(CallError::unsupported(command.target, other.name())),
        }
    }

    fn call_external(&mut self, command: &Command) -> Result<(), CallError> {
        let data_len = match &command.payload {
            Payload::Transfer => 0,
            Payload::Opaque(data) => data.len(),
            other => return Err(CallError::unsupported(command.target, other.name())),
        };

        let balance = self.accounts.entry(command.target).or_insert(0);
        *balance = balance.checked_add(command.value).ok_or_else(|| {
            CallError::new(
                ErrorKind::Execution,
                format!("account {} balance overflow", command.target),
            )
        })?;
        debug!(account = %command.target, value = command.value, data_len, "External call dispatched");
        self.effects.push(VaultEvent::ExternalCallDispatched {
            target: command.target,
            value: command.value,
            data_len,
        });
        Ok(())
    }
}

impl CallTarget for ModuleRouter<'_> {
    fn call(&mut self, origin: Address, command: &Command, now: Timestamp) -> Result<(), CallError> {
        if command.target == self.roster_address {
            self.call_roster(origin, command, now)
        } else if command.target == self.registry.address() {
            self.call_registry(origin, command)
        } else {
            self.call_external(command)
        }
    }
}

fn reject_value(command: &Command) -> Result<(), CallError> {
    if command.value == 0 {
        Ok(())
    } else {
        Err(CallError::new(
            ErrorKind::Validation,
            format!("component {} does not accept value", command.target),
        ))
    }
}
