use elgamal25519::elgamal::{decrypt, encrypt, hom_add, key_gen, precompute_decrypt_table};

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

pub fn bench_encrypt(c: &mut Criterion) {
    let (pk, _sk) = key_gen();

    c.bench_function("elgamal encrypt", |b| {
        b.iter(|| encrypt(&pk, black_box(123_456)).unwrap())
    });
}

pub fn bench_decrypt(c: &mut Criterion) {
    let (pk, sk) = key_gen();
    let table = precompute_decrypt_table();
    let ciphertext = encrypt(&pk, 123_456).unwrap();

    c.bench_function("elgamal decrypt (40-bit, warm table)", |b| {
        b.iter(|| decrypt(&sk, &table, black_box(&ciphertext)).unwrap())
    });
}

pub fn bench_hom_add(c: &mut Criterion) {
    let (pk, _sk) = key_gen();
    let a = encrypt(&pk, 111).unwrap();
    let b_ct = encrypt(&pk, 222).unwrap();

    c.bench_function("elgamal hom_add", |b| {
        b.iter(|| hom_add(black_box(&a), black_box(&b_ct)))
    });
}

criterion_group!(benches, bench_encrypt, bench_decrypt, bench_hom_add);
criterion_main!(benches);
