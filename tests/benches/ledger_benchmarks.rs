//! # DID-Ledger Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | dl-01 Ledger | Merkle root, block sealing, full chain validation |
//! | dl-04 Signature Verification | ES256 verify of a signed document |
//! | dl-03 State Resolver | Identity lookup in a long chain |

use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dl_01_ledger::{genesis_block, merkle_root, validate_chain, Chain};
use dl_02_pending_pool::LedgerState;
use dl_03_state_resolver::resolve_identity_state;
use dl_tests::fixtures::Actor;
use serde_json::json;
use shared_crypto::{sign_es256, CompactJws, P256KeyPair};
use shared_types::{codec, Document, Payload};

fn identity_payloads(count: usize) -> Vec<Payload> {
    (0..count)
        .map(|i| {
            let actor = Actor::new(&format!("did:batterypass:bms.cell-{i}"));
            codec::encode(&Document::from(actor.identity_document(Utc::now()))).unwrap()
        })
        .collect()
}

fn chain_of(blocks: usize, per_block: usize) -> Chain {
    let mut chain = Chain::new(genesis_block(None, Utc::now()).unwrap());
    for _ in 0..blocks {
        let block = chain.seal_next(identity_payloads(per_block), Utc::now()).unwrap();
        chain.append(block).unwrap();
    }
    chain
}

fn bench_merkle_root(c: &mut Criterion) {
    let mut group = c.benchmark_group("dl-01-merkle-root");
    for size in [1usize, 16, 256] {
        let payloads = identity_payloads(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payloads, |b, payloads| {
            b.iter(|| merkle_root(black_box(payloads)))
        });
    }
    group.finish();
}

fn bench_validate_chain(c: &mut Criterion) {
    let chain = chain_of(100, 4);
    c.bench_function("dl-01-validate-100-blocks", |b| {
        b.iter(|| validate_chain(black_box(chain.blocks())))
    });
}

fn bench_es256_verify(c: &mut Criterion) {
    let key = P256KeyPair::generate();
    let public = key.public_key();
    let token = sign_es256(&json!({"id": "did:batterypass:bms.cell-1"}), &key).unwrap();
    c.bench_function("dl-04-es256-verify", |b| {
        b.iter(|| {
            let jws = CompactJws::parse(black_box(&token)).unwrap();
            jws.verify_es256(&public).unwrap()
        })
    });
}

fn bench_identity_lookup(c: &mut Criterion) {
    let state = LedgerState::new(chain_of(200, 4));
    c.bench_function("dl-03-resolve-oldest-identity", |b| {
        b.iter(|| resolve_identity_state(&state, black_box("did:batterypass:bms.cell-0")))
    });
}

criterion_group!(
    benches,
    bench_merkle_root,
    bench_validate_chain,
    bench_es256_verify,
    bench_identity_lookup
);
criterion_main!(benches);
