//! # Notary-Vault Benchmarks
//!
//! | Path | Operation |
//! |------|-----------|
//! | shared-crypto | attestation digest + signer recovery |
//! | nv-03 | full `record_action` against the roster |
//! | nv-01 | submit, confirm, execute of a governed roster change |

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use nv_03_attestation_registry::{Attestation, DocumentStatus};
use shared_crypto::Secp256k1KeyPair;
use shared_types::{Address, Command, DocHash, Payload};
use std::time::Duration;
use vault_runtime::{GenesisBuilder, VaultConfig, VaultState};

const NOW: u64 = 1_700_000_000;

fn signer(n: u8) -> Address {
    Address::new([n; 20])
}

fn genesis(threshold: usize) -> VaultState {
    let mut config = VaultConfig::default();
    config.governance.signers = vec![signer(1), signer(2), signer(3)];
    config.governance.threshold = threshold;
    config.governance.timelock_delay_secs = 0;
    GenesisBuilder::new(config)
        .build()
        .unwrap_or_else(|e| panic!("bench genesis: {e}"))
}

fn doc(n: u64) -> DocHash {
    let mut bytes = [0u8; 32];
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    DocHash::new(bytes)
}

fn bench_signer_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("shared-crypto-recovery");
    group.measurement_time(Duration::from_secs(5));

    let state = genesis(1);
    let domain = state.registry.domain().clone();
    let key = Secp256k1KeyPair::generate();
    let att = Attestation::new(doc(1), DocumentStatus::Approved, NOW);
    let sig = att.sign(&domain, &key).unwrap_or_else(|e| panic!("{e}"));

    group.throughput(Throughput::Elements(1));
    group.bench_function("recover_signer", |b| {
        b.iter(|| black_box(att.recover_signer(black_box(&domain), black_box(&sig))))
    });
    group.finish();
}

fn bench_record_action(c: &mut Criterion) {
    let mut group = c.benchmark_group("nv-03-record-action");
    group.measurement_time(Duration::from_secs(5));

    let mut state = genesis(1);
    let vault = state.vault_address();
    let key = Secp256k1KeyPair::generate();
    state
        .roster
        .add_notary(vault, key.address(), NOW)
        .unwrap_or_else(|e| panic!("{e}"));
    let domain = state.registry.domain().clone();

    let mut n = 0u64;
    group.throughput(Throughput::Elements(1));
    group.bench_function("record_action", |b| {
        b.iter(|| {
            n += 1;
            let att = Attestation::new(doc(n), DocumentStatus::Approved, NOW);
            let sig = att.sign(&domain, &key).unwrap_or_else(|e| panic!("{e}"));
            black_box(state.record_action(&att, &sig, NOW).is_ok())
        })
    });
    group.finish();
}

fn bench_governance_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("nv-01-governance");
    group.measurement_time(Duration::from_secs(5));

    let mut state = genesis(2);
    let roster = state.roster_address;
    let mut n = 0u8;
    group.bench_function("submit_confirm_execute", |b| {
        b.iter(|| {
            n = n.wrapping_add(1).max(1);
            let command = Command::call(roster, Payload::AddNotary(Address::new([n; 20])));
            let index = state
                .vault
                .submit(signer(1), command, NOW)
                .unwrap_or_else(|e| panic!("{e}"));
            state
                .vault
                .confirm(signer(2), index, NOW)
                .unwrap_or_else(|e| panic!("{e}"));
            black_box(state.execute(signer(3), index, NOW).is_ok())
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_signer_recovery,
    bench_record_action,
    bench_governance_cycle
);
criterion_main!(benches);
