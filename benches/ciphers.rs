//! Benchmarks for the cipher engine.
//!
//! Measures every classical cipher through the dispatcher and the RSA
//! key derivation and round trip at two key sizes.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use num_bigint::BigUint;

use cipherlab::cipher::{apply, CipherKind, Direction, Key, KeyShape};
use cipherlab::crypto::{HillKey, RsaKeyMaterial, RsaSession};

/// Plaintext used by all classical benchmarks.
const BENCH_TEXT: &str = "WEAREDISCOVEREDFLEEATONCEWEAREDISCOVEREDFLEEATONCE";

fn bench_key(kind: CipherKind) -> Key {
    match kind.key_shape() {
        KeyShape::Integer => Key::Integer(7),
        KeyShape::Pair => Key::Pair(5, 8),
        KeyShape::Keyword => Key::Keyword("SECRET".to_string()),
        KeyShape::Depth => Key::Depth(3),
        KeyShape::Matrix => Key::Matrix(HillKey::default()),
    }
}

fn bench_classical(c: &mut Criterion) {
    let mut group = c.benchmark_group("classical_encrypt");
    group.throughput(Throughput::Bytes(BENCH_TEXT.len() as u64));

    for kind in CipherKind::ALL {
        let key = bench_key(kind);
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &key, |b, key| {
            b.iter(|| apply(kind, key, black_box(BENCH_TEXT), Direction::Encrypt).unwrap());
        });
    }

    group.finish();
}

fn bench_classical_decrypt(c: &mut Criterion) {
    let mut group = c.benchmark_group("classical_decrypt");
    group.throughput(Throughput::Bytes(BENCH_TEXT.len() as u64));

    for kind in CipherKind::ALL {
        let key = bench_key(kind);
        let ciphertext = apply(kind, &key, BENCH_TEXT, Direction::Encrypt).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(kind.name()), &key, |b, key| {
            b.iter(|| apply(kind, key, black_box(&ciphertext), Direction::Decrypt).unwrap());
        });
    }

    group.finish();
}

/// Key derivation is dominated by the extended Euclid on `phi`.
fn bench_rsa_derive(c: &mut Criterion) {
    c.bench_function("rsa_derive", |b| {
        b.iter(|| {
            RsaKeyMaterial::derive(
                black_box(BigUint::from(1_000_003u32)),
                black_box(BigUint::from(999_983u32)),
                BigUint::from(65_537u32),
            )
            .unwrap()
        });
    });
}

fn bench_rsa_round_trip(c: &mut Criterion) {
    let cases: [(&str, u32, u32, u32); 2] = [
        ("small", 61, 53, 17),
        ("medium", 1_000_003, 999_983, 65_537),
    ];

    let mut group = c.benchmark_group("rsa_round_trip");
    for (label, p, q, e) in cases {
        let session = RsaSession::establish(p.into(), q.into(), e.into(), "42").unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(label), &session, |b, session| {
            b.iter(|| session.round_trip());
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_classical,
    bench_classical_decrypt,
    bench_rsa_derive,
    bench_rsa_round_trip
);
criterion_main!(benches);
