//! # Attestation Forgery and Replay
//!
//! | Attack | Expected defence |
//! |--------|------------------|
//! | Relay a signature under a different status | digest binds status |
//! | Replay a signature minted for another registry | domain separator binds registry |
//! | Flip `s` to its high-order twin | EIP-2 low-S enforcement |
//! | Sign with an unenrolled key | roster membership of the recovered signer |
//! | Post-date an attestation far into the future | future skew bound |

#[cfg(test)]
mod tests {
    use crate::fixtures::{signer, Deployment};

    use nv_03_attestation_registry::{Attestation, DocumentStatus, NotarizationApi, RegistryError};
    use shared_crypto::ecdsa::invert_s;
    use shared_crypto::{RecoverableSignature, Secp256k1KeyPair};
    use shared_types::{Address, Classify, DocHash, ErrorKind};

    const RELAYER: Address = Address::new([0x42; 20]);

    async fn deployment_with_notary() -> (Deployment, Secp256k1KeyPair) {
        let d = Deployment::new(&[signer('A')], 1, 0);
        let notary = d.enrol_notary(&[signer('A')]).await;
        (d, notary)
    }

    #[tokio::test]
    async fn test_status_flip_is_not_authentic() {
        let (d, notary) = deployment_with_notary().await;
        let (att, sig) = d.attest(&notary, 1, DocumentStatus::Rejected).await;
        let flipped = Attestation {
            status: DocumentStatus::Approved.code(),
            ..att
        };

        let err = d.service.record_action(RELAYER, flipped, sig).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Authorization);
        d.service.record_action(RELAYER, att, sig).await.unwrap();
    }

    #[tokio::test]
    async fn test_cross_registry_replay() {
        let (d, notary) = deployment_with_notary().await;
        let att = Attestation::new(DocHash::new([3; 32]), DocumentStatus::Approved, d.now());
        let mut foreign = d.domain().await;
        foreign.verifying_contract = Address::new([0xEE; 20]);
        let sig = att.sign(&foreign, &notary).unwrap();

        let err = d.service.record_action(RELAYER, att, sig).await.unwrap_err();
        assert!(matches!(err, RegistryError::NotNotary { .. }));
    }

    #[tokio::test]
    async fn test_malleated_signature_is_rejected() {
        let (d, notary) = deployment_with_notary().await;
        let (att, sig) = d.attest(&notary, 5, DocumentStatus::Approved).await;
        let twin = RecoverableSignature {
            s: invert_s(&sig.s),
            v: if sig.v == 27 { 28 } else { 27 },
            ..sig
        };

        let err = d.service.record_action(RELAYER, att, twin).await.unwrap_err();
        assert_eq!(err, RegistryError::NotNotary { recovered: None });
        assert!(d.service.get_document(att.doc_hash).await.is_none());
    }

    #[tokio::test]
    async fn test_unenrolled_key_is_rejected() {
        let (d, _) = deployment_with_notary().await;
        let outsider = Secp256k1KeyPair::generate();
        let (att, sig) = d.attest(&outsider, 6, DocumentStatus::Approved).await;

        let err = d.service.record_action(RELAYER, att, sig).await.unwrap_err();
        assert_eq!(
            err,
            RegistryError::NotNotary {
                recovered: Some(outsider.address())
            }
        );
        assert!(err.to_string().contains("not an authorized notary"));
    }

    #[tokio::test]
    async fn test_post_dated_attestation() {
        let (d, notary) = deployment_with_notary().await;
        let domain = d.domain().await;
        let sign_at = |ts: u64| {
            let att = Attestation::new(DocHash::new([ts as u8; 32]), DocumentStatus::Pending, ts);
            (att, att.sign(&domain, &notary).unwrap())
        };

        let (att, sig) = sign_at(d.now() + 301);
        let err = d.service.record_action(RELAYER, att, sig).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Temporal);
        assert!(err.to_string().contains("in the future"));

        let (att, sig) = sign_at(d.now() + 300);
        d.service.record_action(RELAYER, att, sig).await.unwrap();
    }
}
