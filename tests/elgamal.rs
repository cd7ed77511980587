//! End-to-end tests against the public API, exercising the seed scenarios
//! from the scheme's specification: encryption/decryption round trips,
//! every homomorphic operator, boundary plaintexts, and table persistence
//! across independent instances.

use elgamal25519::elgamal::{
    decode, encode, hom_add, hom_add_plain, hom_mul_plain, hom_negate, hom_sub, load_table,
    save_table, ElGamalError, Scheme,
};

#[test]
fn encrypt_decrypt_and_every_homomorphic_operator_round_trip() {
    let mut scheme = Scheme::generate();
    scheme.precompute_decrypt_table();

    // enc(-98), enc(46) decrypt to themselves.
    assert_eq!(scheme.decrypt(&scheme.encrypt(-98).unwrap()).unwrap(), -98);
    assert_eq!(scheme.decrypt(&scheme.encrypt(46).unwrap()).unwrap(), 46);

    // hom_add.
    let sum = hom_add(&scheme.encrypt(5).unwrap(), &scheme.encrypt(37).unwrap());
    assert_eq!(scheme.decrypt(&sum).unwrap(), 42);

    let sum2 = hom_add(&scheme.encrypt(-98).unwrap(), &scheme.encrypt(16).unwrap());
    assert_eq!(scheme.decrypt(&sum2).unwrap(), -82);

    // hom_sub.
    let diff = hom_sub(
        &scheme.encrypt(111_111).unwrap(),
        &scheme.encrypt(555_555).unwrap(),
    );
    assert_eq!(scheme.decrypt(&diff).unwrap(), -444_444);

    // hom_add_plain.
    let added_plain = hom_add_plain(&scheme.encrypt(15).unwrap(), encode(37).unwrap());
    assert_eq!(scheme.decrypt(&added_plain).unwrap(), 52);

    // hom_mul_plain.
    let product = hom_mul_plain(&scheme.encrypt(5).unwrap(), encode(37).unwrap());
    assert_eq!(scheme.decrypt(&product).unwrap(), 185);

    // hom_negate.
    let negated = hom_negate(&scheme.encrypt(50).unwrap());
    assert_eq!(scheme.decrypt(&negated).unwrap(), -50);

    // Chained additions/subtractions/scalar multiplication on large values.
    let a = scheme.encrypt(555_555).unwrap();
    let b = scheme.encrypt(111_111).unwrap();
    assert_eq!(scheme.decrypt(&hom_add(&a, &b)).unwrap(), 666_666);
    assert_eq!(scheme.decrypt(&hom_sub(&b, &a)).unwrap(), -444_444);
    assert_eq!(
        scheme.decrypt(&hom_mul_plain(&a, encode(3).unwrap())).unwrap(),
        1_666_665
    );
}

#[test]
fn boundary_plaintexts_encode_and_round_trip() {
    const UPPER: i64 = (1i64 << 39) - 1;
    const LOWER: i64 = -(1i64 << 39);

    assert!(matches!(encode(UPPER + 1), Err(ElGamalError::OutOfRange)));
    assert!(matches!(encode(LOWER - 1), Err(ElGamalError::OutOfRange)));

    let hi = encode(UPPER).unwrap();
    let lo = encode(LOWER).unwrap();
    assert_eq!(decode(&hi), UPPER);
    assert_eq!(decode(&lo), LOWER);
}

#[test]
fn boundary_plaintexts_round_trip_through_encryption() {
    const UPPER: i64 = (1i64 << 39) - 1;
    const LOWER: i64 = -(1i64 << 39);

    let mut scheme = Scheme::generate();
    scheme.precompute_decrypt_table();

    assert_eq!(scheme.decrypt(&scheme.encrypt(UPPER).unwrap()).unwrap(), UPPER);
    assert_eq!(scheme.decrypt(&scheme.encrypt(LOWER).unwrap()).unwrap(), LOWER);
}

#[test]
fn saved_table_loaded_in_a_separate_instance_decrypts_correctly() {
    let table = elgamal25519::elgamal::precompute_decrypt_table();

    let mut buf = Vec::new();
    save_table(&table, &mut buf).unwrap();

    let loaded = load_table(&buf[..]).unwrap();
    let mut reader = Scheme::generate();
    reader.load_table(std::sync::Arc::new(loaded));

    for value in [-98, 46] {
        let ct = reader.encrypt(value).unwrap();
        assert_eq!(reader.decrypt(&ct).unwrap(), value);
    }
}

#[test]
fn random_values_across_the_message_range_round_trip() {
    let mut scheme = Scheme::generate();
    scheme.precompute_decrypt_table();

    // A positive value in [0, 2^39) and a negative value in [-2^39, -2^38),
    // mirroring the specification's randomized seed scenario without
    // requiring external randomness in the test itself.
    let positive = 0x5A5A_5A5A5Ai64 & ((1i64 << 39) - 1);
    let negative = -(0x1234_5678_90i64 & ((1i64 << 38) - 1)) - (1i64 << 38);

    assert_eq!(scheme.decrypt(&scheme.encrypt(positive).unwrap()).unwrap(), positive);
    assert_eq!(scheme.decrypt(&scheme.encrypt(negative).unwrap()).unwrap(), negative);
}
