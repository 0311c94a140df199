//! # Trust-Root Takeover Attempts
//!
//! | Attack | Expected defence |
//! |--------|------------------|
//! | Single signer calls a governed op directly | origin is not the vault identity |
//! | Outsider presents the vault identity to the breaker | impersonation refused |
//! | Collusion below threshold | execution refused |
//! | Confirmations gathered before a rotation are replayed after it | version mismatch |
//! | Governed call aimed at the wrong component | inner call rejected, nothing applied |

#[cfg(test)]
mod tests {
    use crate::fixtures::{signer, Deployment};

    use nv_01_governance::{GovernanceApi, GovernanceError};
    use nv_03_attestation_registry::NotarizationApi;
    use shared_types::{Address, Classify, Command, ErrorKind, Payload};

    #[tokio::test]
    async fn test_signer_cannot_mutate_trust_root_without_quorum() {
        let signers = [signer('A'), signer('B'), signer('C')];
        let d = Deployment::new(&signers, 2, 0);
        let mallory = Address::new([0x66; 20]);

        // Proposal alone never reaches the signer set.
        let index = d
            .service
            .submit(signer('A'), Command::call(d.vault, Payload::AddSigner(mallory)))
            .await
            .unwrap();
        let err = d.service.execute(signer('A'), index).await.unwrap_err();
        assert!(matches!(err, GovernanceError::InsufficientConfirmations { .. }));
        assert!(!d.service.signer_set().await.is_signer(&mallory));

        // Outsiders cannot confirm or execute.
        let err = d.service.confirm(mallory, index).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        let err = d.service.execute(mallory, index).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }

    #[tokio::test]
    async fn test_breaker_impersonation_is_refused() {
        let d = Deployment::new(&[signer('A')], 1, 0);
        for origin in [d.vault, d.registry, signer('A')] {
            let err = d.service.pause(origin).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Authorization, "origin {origin}");
        }
        assert!(!d.service.is_paused().await);
    }

    #[tokio::test]
    async fn test_pre_rotation_confirmations_cannot_be_replayed() {
        let signers = [signer('A'), signer('B'), signer('C')];
        let d = Deployment::new(&signers, 2, 100);
        let mallory = Address::new([0x66; 20]);

        // B and C approve adding a signer, then C is rotated out before execution.
        let smuggled = d
            .propose(
                &[signer('C'), signer('B')],
                Command::call(d.vault, Payload::AddSigner(mallory)),
            )
            .await
            .unwrap();
        d.govern(&signers[..2], Command::call(d.vault, Payload::RemoveSigner(signer('C'))))
            .await
            .unwrap();

        let err = d.service.execute(signer('B'), smuggled).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Consistency);
        assert!(!d.service.signer_set().await.is_signer(&mallory));
    }

    #[tokio::test]
    async fn test_misrouted_payload_changes_nothing() {
        let d = Deployment::new(&[signer('A')], 1, 0);
        d.service.deposit(signer('A'), 10).await.unwrap();

        // Pause aimed at the roster, notary aimed at the registry, value into a component.
        let attempts = [
            Command::call(d.roster, Payload::Pause),
            Command::call(d.registry, Payload::AddNotary(signer('A'))),
            Command {
                target: d.roster,
                value: 10,
                payload: Payload::RemoveNotary(signer('A')),
            },
        ];
        for command in attempts {
            let err = d.govern(&[signer('A')], command).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Execution);
        }
        assert!(!d.service.is_paused().await);
        assert_eq!(d.service.balance().await, 10);
    }
}
