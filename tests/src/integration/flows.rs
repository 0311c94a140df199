//! # Integration Test Flows
//!
//! End-to-end scenarios through `NotaryVaultService` and the event bus:
//!
//! 1. **Treasury transfer**: submit, confirm to threshold, timelock, execute
//! 2. **Signer rotation**: a governed removal invalidates older proposals
//! 3. **Notarization**: governed roster change, relayed attestation, breaker
//! 4. **Audit trail**: events per topic in commit order

#[cfg(test)]
mod tests {
    use crate::fixtures::{signer, Deployment};

    use nv_01_governance::{GovernanceApi, GovernanceError, TransactionStatus};
    use nv_02_notary_roster::RosterApi;
    use nv_03_attestation_registry::{DocumentStatus, NotarizationApi, RegistryError};
    use shared_bus::{EventTopic, VaultEvent};
    use shared_types::{Address, Classify, Command, DocHash, ErrorKind, Payload};

    const HOUR: u64 = 3_600;

    fn five_signers() -> Vec<Address> {
        ['A', 'B', 'C', 'D', 'E'].into_iter().map(signer).collect()
    }

    fn payout() -> Command {
        Command {
            target: Address::new([0x70; 20]),
            value: 25,
            payload: Payload::Opaque(vec![0xde, 0xad]),
        }
    }

    // =========================================================================
    // TREASURY TRANSFER
    // =========================================================================

    #[tokio::test]
    async fn test_threshold_timelock_and_single_execution() {
        let d = Deployment::new(&five_signers(), 3, HOUR);
        let (a, b, c) = (signer('A'), signer('B'), signer('C'));
        d.service.deposit(Address::new([0x99; 20]), 100).await.unwrap();

        let index = d.service.submit(a, payout()).await.unwrap();
        assert_eq!(index, 0);
        assert!(d.service.transaction(0).await.unwrap().is_confirmed_by(&a));
        d.service.confirm(b, 0).await.unwrap();
        assert_eq!(d.service.confirm(c, 0).await.unwrap(), 3);

        let early = d.service.execute(a, 0).await.unwrap_err();
        assert_eq!(early.kind(), ErrorKind::Temporal);

        d.advance(HOUR);
        let receipt = d.service.execute(a, 0).await.unwrap();
        assert_eq!(receipt.balance, 75);
        assert_eq!(d.service.account_balance(payout().target).await, 25);
        assert!(d.service.transaction(0).await.unwrap().executed);

        let again = d.service.execute(a, 0).await.unwrap_err();
        assert_eq!(again, GovernanceError::AlreadyExecuted { index: 0 });
        assert_eq!(again.kind(), ErrorKind::State);
        assert_eq!(d.service.balance().await, 75);
    }

    #[tokio::test]
    async fn test_confirm_revoke_confirm_is_a_toggle() {
        let d = Deployment::new(&five_signers(), 3, HOUR);
        d.service.submit(signer('A'), payout()).await.unwrap();

        assert_eq!(d.service.confirm(signer('B'), 0).await.unwrap(), 2);
        assert_eq!(d.service.revoke(signer('B'), 0).await.unwrap(), 1);
        assert_eq!(d.service.confirm(signer('B'), 0).await.unwrap(), 2);

        let dup = d.service.confirm(signer('B'), 0).await.unwrap_err();
        assert_eq!(dup.kind(), ErrorKind::State);
        assert_eq!(d.service.transaction(0).await.unwrap().confirmation_count(), 2);
    }

    // =========================================================================
    // SIGNER ROTATION
    // =========================================================================

    #[tokio::test]
    async fn test_rotation_invalidates_older_proposals() {
        let d = Deployment::new(&five_signers(), 3, HOUR);
        let quorum = [signer('A'), signer('B'), signer('C')];
        d.service.deposit(Address::new([0x99; 20]), 100).await.unwrap();

        let old = d.propose(&quorum, payout()).await.unwrap();
        d.govern(&quorum, Command::call(d.vault, Payload::RemoveSigner(signer('E'))))
            .await
            .unwrap();
        assert_eq!(d.service.signer_set().await.version(), 2);

        d.advance(10 * HOUR);
        let err = d.service.execute(signer('A'), old).await.unwrap_err();
        assert_eq!(
            err,
            GovernanceError::SignerSetRotated {
                index: old,
                submitted_at_version: 1,
                current_version: 2
            }
        );
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert_eq!(d.service.status(old).await.unwrap(), TransactionStatus::Stale);
        assert_eq!(d.service.balance().await, 100);

        let late = d.service.confirm(signer('D'), old).await.unwrap_err();
        assert_eq!(late.kind(), ErrorKind::Consistency);
    }

    #[tokio::test]
    async fn test_threshold_never_exceeds_signer_count() {
        let signers = [signer('A'), signer('B'), signer('C')];
        let d = Deployment::new(&signers, 3, 0);

        let err = d
            .govern(&signers, Command::call(d.vault, Payload::RemoveSigner(signer('C'))))
            .await
            .unwrap_err();
        match err {
            GovernanceError::ExecutionFailed { source, .. } => {
                assert_eq!(source.kind, ErrorKind::Validation)
            }
            other => panic!("unexpected {other:?}"),
        }

        let set = d.service.signer_set().await;
        assert_eq!(set.len(), 3);
        assert_eq!(set.version(), 1);
        assert_eq!(d.service.status(0).await.unwrap(), TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_failed_removal_goes_stale_once_threshold_is_lowered() {
        let signers = [signer('A'), signer('B'), signer('C')];
        let d = Deployment::new(&signers, 3, 0);

        let removal = Command::call(d.vault, Payload::RemoveSigner(signer('C')));
        assert!(d.govern(&signers, removal.clone()).await.is_err());
        d.govern(&signers, Command::call(d.vault, Payload::ChangeThreshold(2)))
            .await
            .unwrap();

        let err = d.service.execute(signer('A'), 0).await.unwrap_err();
        assert_eq!(
            err,
            GovernanceError::SignerSetRotated {
                index: 0,
                submitted_at_version: 1,
                current_version: 2
            }
        );
        assert_eq!(d.service.status(0).await.unwrap(), TransactionStatus::Stale);

        // A fresh proposal under the new version goes through.
        d.govern(&signers[..2], removal).await.unwrap();
        assert_eq!(d.service.signer_set().await.len(), 2);
    }

    #[tokio::test]
    async fn test_lowering_threshold_then_removing_signer() {
        let signers = [signer('A'), signer('B'), signer('C')];
        let d = Deployment::new(&signers, 3, 60);

        d.govern(&signers, Command::call(d.vault, Payload::ChangeThreshold(2)))
            .await
            .unwrap();
        d.govern(&signers[..2], Command::call(d.vault, Payload::RemoveSigner(signer('C'))))
            .await
            .unwrap();

        let set = d.service.signer_set().await;
        assert_eq!(set.signers(), &[signer('A'), signer('B')]);
        assert_eq!(set.threshold(), 2);
        assert_eq!(set.version(), 3);
        let gone = d.service.submit(signer('C'), payout()).await.unwrap_err();
        assert_eq!(gone.kind(), ErrorKind::Authorization);
    }

    // =========================================================================
    // NOTARIZATION
    // =========================================================================

    #[tokio::test]
    async fn test_relayed_attestation_lifecycle() {
        let signers = [signer('A'), signer('B')];
        let d = Deployment::new(&signers, 2, HOUR);
        let notary = d.enrol_notary(&signers).await;
        assert!(d.service.is_notary(notary.address()).await);
        assert_eq!(d.service.notary_count().await, 1);

        let relayer = Address::new([0x42; 20]);
        let (att, sig) = d.attest(&notary, 1, DocumentStatus::Approved).await;
        let record = d.service.record_action(relayer, att, sig).await.unwrap();
        assert_eq!(record.notary, notary.address());
        assert_eq!(record.status, DocumentStatus::Approved);
        assert_eq!(d.service.get_document(att.doc_hash).await, Some(record));

        let dup = d.service.record_action(relayer, att, sig).await.unwrap_err();
        assert_eq!(dup, RegistryError::RecordExists { doc_hash: att.doc_hash });
        assert!(dup.to_string().contains("record already exists"));

        let moved = nv_03_attestation_registry::Attestation {
            doc_hash: DocHash::new([2; 32]),
            ..att
        };
        let forged = d.service.record_action(relayer, moved, sig).await.unwrap_err();
        assert_eq!(forged.kind(), ErrorKind::Authorization);
        assert!(d.service.get_document(moved.doc_hash).await.is_none());
    }

    #[tokio::test]
    async fn test_freshness_window() {
        let signers = [signer('A')];
        let d = Deployment::new(&signers, 1, 0);
        let notary = d.enrol_notary(&signers).await;
        let relayer = Address::new([0x42; 20]);

        let (att, sig) = d.attest(&notary, 7, DocumentStatus::Rejected).await;
        d.advance(86_401);
        let err = d.service.record_action(relayer, att, sig).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Temporal);
        assert!(err.to_string().contains("signature expired"));

        let (att, sig) = d.attest(&notary, 8, DocumentStatus::Rejected).await;
        d.advance(86_400);
        d.service.record_action(relayer, att, sig).await.unwrap();
    }

    #[tokio::test]
    async fn test_breaker_blocks_then_releases() {
        let signers = [signer('A'), signer('B')];
        let d = Deployment::new(&signers, 2, HOUR);
        let notary = d.enrol_notary(&signers).await;
        let relayer = Address::new([0x42; 20]);

        d.govern(&signers, Command::call(d.registry, Payload::Pause))
            .await
            .unwrap();
        let (att, sig) = d.attest(&notary, 3, DocumentStatus::Pending).await;
        let err = d.service.record_action(relayer, att, sig).await.unwrap_err();
        assert_eq!(err, RegistryError::Paused);
        assert_eq!(err.kind(), ErrorKind::Availability);

        // The unpause proposal spends one timelock period; the signature stays fresh.
        d.govern(&signers, Command::call(d.registry, Payload::Unpause))
            .await
            .unwrap();
        d.service.record_action(relayer, att, sig).await.unwrap();
    }

    #[tokio::test]
    async fn test_removed_notary_can_no_longer_attest() {
        let signers = [signer('A')];
        let d = Deployment::new(&signers, 1, 0);
        let notary = d.enrol_notary(&signers).await;
        d.govern(&signers, Command::call(d.roster, Payload::RemoveNotary(notary.address())))
            .await
            .unwrap();

        let (att, sig) = d.attest(&notary, 4, DocumentStatus::Approved).await;
        let err = d
            .service
            .record_action(Address::new([0x42; 20]), att, sig)
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotNotary {
                recovered: Some(notary.address())
            }
        );
        let entry = d.service.notary(notary.address()).await.unwrap();
        assert!(!entry.active);
        assert_eq!(entry.added_by, d.vault);
    }

    // =========================================================================
    // AUDIT TRAIL
    // =========================================================================

    #[tokio::test]
    async fn test_audit_trail_per_topic() {
        let signers = [signer('A'), signer('B')];
        let d = Deployment::new(&signers, 2, HOUR);
        let notary = d.enrol_notary(&signers).await;
        let (att, sig) = d.attest(&notary, 9, DocumentStatus::Approved).await;
        d.service
            .record_action(Address::new([0x42; 20]), att, sig)
            .await
            .unwrap();

        let governance = d.history(EventTopic::Governance);
        assert!(matches!(
            governance.as_slice(),
            [
                VaultEvent::TransactionSubmitted { index: 0, .. },
                VaultEvent::TransactionConfirmed { index: 0, confirmations: 2, .. },
                VaultEvent::TransactionExecuted { index: 0, .. },
            ]
        ));
        assert_eq!(
            d.history(EventTopic::Roster),
            vec![VaultEvent::NotaryAdded {
                notary: notary.address(),
                added_by: d.vault,
                added_at: d.now(),
            }]
        );
        assert!(matches!(
            d.history(EventTopic::Attestation).as_slice(),
            [VaultEvent::ActionRecorded { status: 1, .. }]
        ));
    }
}
