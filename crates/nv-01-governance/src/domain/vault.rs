//! # Multisig Vault
//!
//! The aggregate that owns the signer set, the transaction ledger, and the
//! treasury balance. `execute` is the only way to act with the vault's own
//! governance identity: the command is applied with `origin = address`, and
//! every governed component rejects any other origin.
//!
//! `execute` is atomic. The inner call either succeeds and the transaction
//! is sealed, or it fails and nothing changes: confirmations, readiness and
//! balance all stay as they were, and the same index can be retried.

use super::errors::{CallError, GovernanceError};
use super::ledger::TransactionLedger;
use super::signer_set::SignerSet;
use super::transaction::{Transaction, TransactionStatus};
use crate::ports::outbound::CallTarget;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Command, ErrorKind, Payload, Timestamp};
use tracing::{debug, info, warn};

/// What a successful `execute` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReceipt {
    pub index: u64,
    pub executor: Address,
    pub command: Command,
    pub executed_at: Timestamp,
    /// Signer-set version after the call (bumped by signer-set changes).
    pub signer_set_version: u64,
    /// Vault balance after the call.
    pub balance: u128,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigVault {
    address: Address,
    signers: SignerSet,
    ledger: TransactionLedger,
    balance: u128,
}

impl MultisigVault {
    /// Create a vault whose governance identity is `address`.
    pub fn new(
        address: Address,
        signers: Vec<Address>,
        threshold: usize,
        timelock_delay: u64,
    ) -> Result<Self, GovernanceError> {
        if address.is_zero() {
            return Err(GovernanceError::InvalidTarget);
        }
        Ok(Self {
            address,
            signers: SignerSet::new(address, signers, threshold, timelock_delay)?,
            ledger: TransactionLedger::new(),
            balance: 0,
        })
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signers(&self) -> &SignerSet {
        &self.signers
    }

    pub fn ledger(&self) -> &TransactionLedger {
        &self.ledger
    }

    pub fn balance(&self) -> u128 {
        self.balance
    }

    pub fn transaction(&self, index: u64) -> Option<&Transaction> {
        self.ledger.get(index)
    }

    /// Status of a transaction against the current signer-set version.
    pub fn status(&self, index: u64) -> Result<TransactionStatus, GovernanceError> {
        self.ledger
            .get(index)
            .map(|tx| tx.status(self.signers.version()))
            .ok_or(GovernanceError::UnknownIndex { index })
    }

    // =========================================================================
    // TRANSACTION LEDGER
    // =========================================================================

    pub fn submit(
        &mut self,
        proposer: Address,
        command: Command,
        now: Timestamp,
    ) -> Result<u64, GovernanceError> {
        let payload = command.payload.name();
        let index = self.ledger.submit(&self.signers, proposer, command, now)?;
        info!(index, %proposer, payload, "Transaction submitted");
        Ok(index)
    }

    pub fn confirm(
        &mut self,
        signer: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<usize, GovernanceError> {
        let count = self.ledger.confirm(&self.signers, signer, index, now)?;
        info!(index, %signer, confirmations = count, "Transaction confirmed");
        Ok(count)
    }

    pub fn revoke(
        &mut self,
        signer: Address,
        index: u64,
        now: Timestamp,
    ) -> Result<usize, GovernanceError> {
        let count = self.ledger.revoke(&self.signers, signer, index, now)?;
        info!(index, %signer, confirmations = count, "Confirmation revoked");
        Ok(count)
    }

    /// Execute a confirmed, ready transaction.
    ///
    /// Commands addressed to the vault itself are applied to the signer set;
    /// anything else goes to `external` with the vault as origin.
    pub fn execute<T: CallTarget + ?Sized>(
        &mut self,
        caller: Address,
        index: u64,
        now: Timestamp,
        external: &mut T,
    ) -> Result<ExecutionReceipt, GovernanceError> {
        let command = self
            .ledger
            .check_executable(&self.signers, caller, index, now)?
            .command
            .clone();

        if let Err(source) = self.apply(&command, now, external) {
            warn!(index, %caller, kind = %source.kind, reason = %source.reason, "Inner call failed");
            return Err(GovernanceError::ExecutionFailed { index, source });
        }
        self.ledger.mark_executed(index, now)?;

        info!(index, %caller, payload = command.payload.name(), "Transaction executed");
        Ok(ExecutionReceipt {
            index,
            executor: caller,
            command,
            executed_at: now,
            signer_set_version: self.signers.version(),
            balance: self.balance,
        })
    }

    // =========================================================================
    // SIGNER SET (governed)
    // =========================================================================

    /// Apply a signer-set payload on behalf of `origin`.
    ///
    /// Only the vault's own identity is accepted, which in practice means
    /// only an executed transaction can get here successfully.
    pub fn govern(&mut self, origin: Address, payload: &Payload) -> Result<u64, GovernanceError> {
        match payload {
            Payload::AddSigner(signer) => self.signers.add_signer(origin, *signer),
            Payload::RemoveSigner(signer) => self.signers.remove_signer(origin, *signer),
            Payload::ChangeThreshold(threshold) => self.signers.change_threshold(origin, *threshold),
            Payload::SetTimelockDelay(delay) => self.signers.set_timelock_delay(origin, *delay),
            other => Err(GovernanceError::UnsupportedPayload {
                payload: other.name(),
            }),
        }
    }

    // =========================================================================
    // TREASURY
    // =========================================================================

    /// Receive native value. Open to anyone. Returns the new balance.
    pub fn deposit(&mut self, from: Address, amount: u128) -> Result<u128, GovernanceError> {
        if amount == 0 {
            return Err(GovernanceError::ZeroDeposit);
        }
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(GovernanceError::BalanceOverflow {
                balance: self.balance,
                amount,
            })?;
        debug!(%from, amount, balance = self.balance, "Deposit received");
        Ok(self.balance)
    }

    fn apply<T: CallTarget + ?Sized>(
        &mut self,
        command: &Command,
        now: Timestamp,
        external: &mut T,
    ) -> Result<(), CallError> {
        if command.target == self.address {
            return match &command.payload {
                // Value sent to the vault itself stays in the vault.
                Payload::Transfer => Ok(()),
                payload if payload.is_signer_set_change() => self
                    .govern(self.address, payload)
                    .map(|_| ())
                    .map_err(|e| CallError::from_classified(&e)),
                payload => Err(CallError::unsupported(self.address, payload.name())),
            };
        }

        if command.value > self.balance {
            return Err(CallError::new(
                ErrorKind::Execution,
                format!(
                    "insufficient balance: {} requested, {} available",
                    command.value, self.balance
                ),
            ));
        }
        external.call(self.address, command, now)?;
        self.balance -= command.value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Classify;

    const VAULT: Address = Address::new([0xF0; 20]);
    const ROSTER: Address = Address::new([0xE0; 20]);

    fn addr(n: u8) -> Address {
        Address::new([n; 20])
    }

    /// Records calls; fails every call while `fail_with` is set.
    #[derive(Default)]
    struct RecordingTarget {
        calls: Vec<(Address, Command)>,
        fail_with: Option<CallError>,
    }

    impl CallTarget for RecordingTarget {
        fn call(&mut self, origin: Address, command: &Command, _now: Timestamp) -> Result<(), CallError> {
            if let Some(err) = &self.fail_with {
                return Err(err.clone());
            }
            self.calls.push((origin, command.clone()));
            Ok(())
        }
    }

    fn vault() -> MultisigVault {
        MultisigVault::new(VAULT, (1..=5).map(addr).collect(), 3, 3600).unwrap()
    }

    fn approve(vault: &mut MultisigVault, command: Command, now: Timestamp) -> u64 {
        let index = vault.submit(addr(1), command, now).unwrap();
        vault.confirm(addr(2), index, now).unwrap();
        vault.confirm(addr(3), index, now).unwrap();
        index
    }

    #[test]
    fn test_example_scenario() {
        let mut vault = vault();
        let mut target = RecordingTarget::default();
        let cmd = Command::call(addr(0x42), Payload::Opaque(vec![0xAB]));

        let index = vault.submit(addr(1), cmd.clone(), 0).unwrap();
        assert_eq!(index, 0);
        assert_eq!(vault.confirm(addr(2), 0, 0).unwrap(), 2);
        assert_eq!(vault.confirm(addr(3), 0, 0).unwrap(), 3);

        let early = vault.execute(addr(1), 0, 3599, &mut target).unwrap_err();
        assert_eq!(early.kind(), ErrorKind::Temporal);

        let receipt = vault.execute(addr(1), 0, 3600, &mut target).unwrap();
        assert_eq!(receipt.index, 0);
        assert!(vault.transaction(0).unwrap().executed);
        assert_eq!(target.calls, vec![(VAULT, cmd)]);

        let again = vault.execute(addr(1), 0, 3600, &mut target).unwrap_err();
        assert_eq!(again, GovernanceError::AlreadyExecuted { index: 0 });
        assert_eq!(again.kind(), ErrorKind::State);
    }

    #[test]
    fn test_rotation_makes_pending_transactions_stale() {
        let mut vault = vault();
        let mut target = RecordingTarget::default();

        let old = approve(&mut vault, Command::transfer(addr(0x42), 0), 0);
        let removal = approve(
            &mut vault,
            Command::call(VAULT, Payload::RemoveSigner(addr(5))),
            0,
        );
        let receipt = vault.execute(addr(1), removal, 3600, &mut target).unwrap();
        assert_eq!(receipt.signer_set_version, 2);
        assert!(!vault.signers().is_signer(&addr(5)));

        let err = vault.execute(addr(1), old, 100_000, &mut target).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert_eq!(vault.status(old).unwrap(), TransactionStatus::Stale);
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_failed_inner_call_leaves_transaction_retryable() {
        let mut vault = MultisigVault::new(VAULT, vec![addr(1), addr(2), addr(3)], 3, 0).unwrap();
        let mut target = RecordingTarget::default();
        let index = approve(
            &mut vault,
            Command::call(VAULT, Payload::RemoveSigner(addr(3))),
            0,
        );
        let before = vault.clone();

        let err = vault.execute(addr(1), index, 0, &mut target).unwrap_err();
        match &err {
            GovernanceError::ExecutionFailed { index: i, source } => {
                assert_eq!(*i, index);
                assert_eq!(source.kind, ErrorKind::Validation);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.kind(), ErrorKind::Execution);
        assert_eq!(vault, before);
    }

    #[test]
    fn test_external_failure_changes_nothing() {
        let mut vault = vault();
        vault.deposit(addr(0x99), 100).unwrap();
        let mut target = RecordingTarget {
            fail_with: Some(CallError::new(ErrorKind::State, "already paused")),
            ..Default::default()
        };
        let index = approve(&mut vault, Command::call(ROSTER, Payload::Pause), 0);
        let before = vault.clone();

        let err = vault.execute(addr(2), index, 3600, &mut target).unwrap_err();
        assert!(matches!(err, GovernanceError::ExecutionFailed { .. }));
        assert_eq!(vault, before);

        target.fail_with = None;
        assert!(vault.execute(addr(2), index, 3600, &mut target).is_ok());
    }

    #[test]
    fn test_value_transfer_debits_only_on_success() {
        let mut vault = vault();
        let mut target = RecordingTarget::default();
        let index = approve(&mut vault, Command::transfer(addr(0x42), 50), 0);

        let err = vault.execute(addr(1), index, 3600, &mut target).unwrap_err();
        assert!(matches!(
            err,
            GovernanceError::ExecutionFailed { source: CallError { kind: ErrorKind::Execution, .. }, .. }
        ));

        assert_eq!(vault.deposit(addr(0x99), 80).unwrap(), 80);
        let receipt = vault.execute(addr(1), index, 3600, &mut target).unwrap();
        assert_eq!(receipt.balance, 30);
        assert_eq!(vault.balance(), 30);
    }

    #[test]
    fn test_self_call_governs_signer_set() {
        let mut vault = vault();
        let mut target = RecordingTarget::default();

        let add = approve(&mut vault, Command::call(VAULT, Payload::AddSigner(addr(6))), 0);
        vault.execute(addr(1), add, 3600, &mut target).unwrap();
        assert!(vault.signers().is_signer(&addr(6)));

        let delay = approve(&mut vault, Command::call(VAULT, Payload::SetTimelockDelay(0)), 3600);
        let receipt = vault.execute(addr(1), delay, 7200, &mut target).unwrap();
        assert_eq!(receipt.signer_set_version, 3);
        assert_eq!(vault.signers().timelock_delay(), 0);
        assert!(target.calls.is_empty());
    }

    #[test]
    fn test_direct_governance_calls_rejected() {
        let mut vault = vault();
        for origin in [addr(1), ROSTER, Address::ZERO] {
            let err = vault.govern(origin, &Payload::ChangeThreshold(1)).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization);
        }
        assert_eq!(vault.signers().threshold(), 3);
        assert_eq!(vault.signers().version(), 1);
    }

    #[test]
    fn test_mismatched_self_payload_fails_inner_call() {
        let mut vault = vault();
        let mut target = RecordingTarget::default();
        let index = approve(&mut vault, Command::call(VAULT, Payload::Pause), 0);

        let err = vault.execute(addr(1), index, 3600, &mut target).unwrap_err();
        assert!(matches!(err, GovernanceError::ExecutionFailed { .. }));
        assert_eq!(vault.status(index).unwrap(), TransactionStatus::Pending);
    }

    #[test]
    fn test_execute_requires_signer() {
        let mut vault = vault();
        let mut target = RecordingTarget::default();
        let index = approve(&mut vault, Command::transfer(addr(0x42), 0), 0);
        assert_eq!(
            vault.execute(addr(9), index, 3600, &mut target).unwrap_err(),
            GovernanceError::NotSigner { caller: addr(9) }
        );
    }

    #[test]
    fn test_deposit_validation() {
        let mut vault = vault();
        assert_eq!(vault.deposit(addr(1), 0).unwrap_err(), GovernanceError::ZeroDeposit);
        vault.deposit(addr(1), u128::MAX).unwrap();
        assert!(matches!(
            vault.deposit(addr(1), 1),
            Err(GovernanceError::BalanceOverflow { .. })
        ));
    }

    #[test]
    fn test_serde_roundtrip_preserves_ledger() {
        let mut vault = vault();
        approve(&mut vault, Command::transfer(addr(0x42), 0), 10);
        let json = serde_json::to_string(&vault).unwrap();
        let back: MultisigVault = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vault);
    }
}
