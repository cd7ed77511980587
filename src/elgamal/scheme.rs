//! Additively homomorphic ElGamal encryption over Ed25519.
//!
//! A plaintext `m` is encrypted as `(c0, c1) = (r*PK + m*B, r*B)` for a
//! fresh random scalar `r`, where `B` is the curve base point and `PK`
//! the recipient's public key. Decryption recovers `m*B = c0 - sk*c1` and
//! then solves for `m` with a baby-step/giant-step discrete-log search
//! bounded to 40-bit signed integers.
//!
//! Because the message lives in the exponent, ciphertexts under the same
//! key can be combined homomorphically: adding two ciphertexts' curve
//! points yields a ciphertext of the sum of their plaintexts, and
//! multiplying a ciphertext's points by a known plaintext scalar yields a
//! ciphertext of the product.

use crate::elgamal::codec::{self, Plaintext, L, NEG_ONE};
use crate::elgamal::curve::group::{self, GeP3};
use crate::elgamal::curve::scalar::{sc_reduce, Scalar};
use crate::elgamal::error::ElGamalError;
use crate::elgamal::table::DecryptTable;
use crate::rng::Csprng;
use std::io::{Read, Write};
use std::sync::Arc;

/// Number of bits a plaintext integer occupies, sign included.
const MSG_BITS: u32 = 40;
/// Number of low bits resolved by the online baby-step search.
const BABY_BITS: u32 = 15;
/// Number of high bits resolved by the precomputed giant-step table.
const GIANT_BITS: u32 = MSG_BITS - BABY_BITS;

/// A public key: a point on the curve equal to `sk * B`.
#[derive(Clone, Copy)]
pub struct PublicKey(GeP3);

impl PublicKey {
    /// Returns the canonical 32-byte compressed encoding of this key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }

    /// Reconstructs a public key from its compressed encoding.
    pub fn from_bytes(bytes: &[u8; 32]) -> Option<Self> {
        GeP3::decompress(bytes).map(PublicKey)
    }
}

/// A secret key: a clamped scalar modulo the group order.
#[derive(Clone, Copy)]
pub struct SecretKey(Scalar);

impl SecretKey {
    /// Returns the raw 32-byte encoding of this key.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.to_bytes()
    }
}

/// An encrypted value. Opaque to callers; combine ciphertexts only through
/// [`hom_add`], [`hom_sub`], [`hom_add_plain`], [`hom_sub_plain`],
/// [`hom_mul_plain`], and [`hom_negate`].
#[derive(Clone, Copy)]
pub struct Ciphertext {
    c0: GeP3,
    c1: GeP3,
}

/// Generates a fresh keypair.
///
/// The secret scalar is drawn from the CSPRNG and clamped per the usual
/// Ed25519 convention (`s[0] &= 0xF8; s[31] &= 0x3F; s[31] |= 0x40`), which
/// guarantees it is a multiple of the curve's cofactor and strictly less
/// than the group order.
pub fn key_gen() -> (PublicKey, SecretKey) {
    let mut bytes = [0u8; 32];
    Csprng::new().fill_bytes(&mut bytes);

    bytes[0] &= 0xF8;
    bytes[31] &= 0x3F;
    bytes[31] |= 0x40;

    let sk = Scalar(bytes);
    let pk = group::scalar_mul_base(&sk);

    (PublicKey(pk), SecretKey(sk))
}

/// Encrypts an integer plaintext in `[-2^39, 2^39 - 1]` under `pk`.
pub fn encrypt(pk: &PublicKey, value: i64) -> Result<Ciphertext, ElGamalError> {
    encrypt_plaintext(pk, codec::encode(value)?)
}

/// Encrypts an already-encoded [`Plaintext`] under `pk`.
pub fn encrypt_plaintext(pk: &PublicKey, plain: Plaintext) -> Result<Ciphertext, ElGamalError> {
    let mut r_bytes = [0u8; 32];
    Csprng::new().fill_bytes(&mut r_bytes);
    sc_reduce(&mut r_bytes);
    let r = Scalar(r_bytes);

    let m = Scalar(plain.to_bytes());

    Ok(Ciphertext {
        c0: group::double_scalar_mul_base(&r, &pk.0, &m),
        c1: group::scalar_mul_base(&r),
    })
}

/// Decrypts `ciphertext` using `sk` and a previously built or loaded
/// [`DecryptTable`].
///
/// Returns [`ElGamalError::UndecryptableCiphertext`] if the baby-step
/// search exhausts all `2^15` steps without a match — this happens only
/// for a ciphertext that does not encode a value in the supported 40-bit
/// range, or one encrypted under a different key.
pub fn decrypt(
    sk: &SecretKey,
    table: &DecryptTable,
    ciphertext: &Ciphertext,
) -> Result<i64, ElGamalError> {
    let shared = ciphertext.c1.scalar_mul(&sk.0);
    let masked = ciphertext.c0.sub(&shared);

    let baby_steps = 1i64 << BABY_BITS;
    for i in 0..baby_steps {
        let baby = codec::encode(-i).expect("baby step magnitude is within range");
        let baby_point = group::scalar_mul_base(&Scalar(baby.to_bytes()));
        let candidate = masked.add(&baby_point);

        if let Some(giant_step) = table.get(&candidate.to_bytes()) {
            return Ok(((giant_step as i64) << BABY_BITS) + i);
        }
    }

    Err(ElGamalError::UndecryptableCiphertext)
}

/// Builds the baby-step/giant-step table used by [`decrypt`].
///
/// The table is fixed for Ed25519 and independent of any key, so it only
/// needs to be built once and can be shared across every [`PublicKey`] and
/// [`SecretKey`] pair. It holds `2^25` entries at canonical parameters.
pub fn precompute_decrypt_table() -> DecryptTable {
    let half_range = 1i64 << (GIANT_BITS - 1);
    let mut table = DecryptTable::with_capacity((half_range * 2) as usize);

    for i in -half_range..half_range {
        let plain = codec::encode(i << BABY_BITS).expect("giant step magnitude is within range");
        let entry = group::scalar_mul_base(&Scalar(plain.to_bytes()));
        table.insert(entry.to_bytes(), i as i32);
    }

    table
}

/// Writes `table` to `writer` in the persisted binary format: an 8-byte
/// little-endian entry count followed by that many 36-byte records.
pub fn save_table<W: Write>(table: &DecryptTable, writer: W) -> Result<(), ElGamalError> {
    table.save(writer).map_err(|_| ElGamalError::MalformedPersistence)
}

/// Reads a table previously written by [`save_table`].
pub fn load_table<R: Read>(reader: R) -> Result<DecryptTable, ElGamalError> {
    DecryptTable::load(reader).map_err(|_| ElGamalError::MalformedPersistence)
}

/// Homomorphic ciphertext addition: `Enc(a) + Enc(b) = Enc(a + b)`.
pub fn hom_add(a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
    Ciphertext {
        c0: a.c0.add(&b.c0),
        c1: a.c1.add(&b.c1),
    }
}

/// Homomorphic ciphertext subtraction: `Enc(a) - Enc(b) = Enc(a - b)`.
pub fn hom_sub(a: &Ciphertext, b: &Ciphertext) -> Ciphertext {
    Ciphertext {
        c0: a.c0.sub(&b.c0),
        c1: a.c1.sub(&b.c1),
    }
}

/// Adds a known plaintext to an encrypted value: `Enc(a) + b = Enc(a + b)`.
///
/// Only `c0` changes: adding a plaintext multiple of `B` to `c0` shifts the
/// encoded value without touching the randomizer carried in `c1`.
pub fn hom_add_plain(ciphertext: &Ciphertext, plain: Plaintext) -> Ciphertext {
    let term = group::scalar_mul_base(&Scalar(plain.to_bytes()));

    Ciphertext {
        c0: ciphertext.c0.add(&term),
        c1: ciphertext.c1,
    }
}

/// Subtracts a known plaintext from an encrypted value: `Enc(a) - b = Enc(a - b)`.
pub fn hom_sub_plain(ciphertext: &Ciphertext, plain: Plaintext) -> Ciphertext {
    let term = group::scalar_mul_base(&Scalar(plain.to_bytes()));

    Ciphertext {
        c0: ciphertext.c0.sub(&term),
        c1: ciphertext.c1,
    }
}

/// Multiplies an encrypted value by a known plaintext: `Enc(a) * b = Enc(a * b)`.
///
/// `b` must itself be small enough that `a * b` stays within the 40-bit
/// encoding range; this is the caller's responsibility; the scheme cannot
/// check it without knowing `a`. A negative `b` is handled transparently:
/// scalar multiplication by its `L`-reduced encoding is the same group
/// operation as multiplication by a positive scalar.
pub fn hom_mul_plain(ciphertext: &Ciphertext, plain: Plaintext) -> Ciphertext {
    let scalar = Scalar(plain.to_bytes());

    Ciphertext {
        c0: ciphertext.c0.scalar_mul(&scalar),
        c1: ciphertext.c1.scalar_mul(&scalar),
    }
}

/// Negates an encrypted value: `-Enc(a) = Enc(-a)`.
///
/// Implemented as multiplication by `L - 1`, the encoding of `-1`, rather
/// than by negating the curve points directly, so it is expressed with the
/// same scalar-multiplication path as [`hom_mul_plain`].
pub fn hom_negate(ciphertext: &Ciphertext) -> Ciphertext {
    let neg_one = Scalar(NEG_ONE);

    Ciphertext {
        c0: ciphertext.c0.scalar_mul(&neg_one),
        c1: ciphertext.c1.scalar_mul(&neg_one),
    }
}

/// The Ed25519 group order, exposed for callers that need to reason about
/// scalar ranges directly.
pub const GROUP_ORDER: [u8; 32] = L;

/// An encryption context bundling a key pair and, optionally, a shared
/// decrypt table.
///
/// A [`Scheme`] may be built from a public key alone (for encryption-only
/// use), from a full key pair, or freshly via [`Scheme::generate`]. The
/// decrypt table is large (`2^25` entries) and fixed for a given set of
/// curve parameters, so it is natural to build or load it once and share
/// it — via [`Scheme::load_table`] — across every [`Scheme`] instance in a
/// process rather than duplicating it per key pair.
pub struct Scheme {
    pk: PublicKey,
    sk: Option<SecretKey>,
    table: Option<Arc<DecryptTable>>,
}

impl Scheme {
    /// Creates a context that can encrypt under `pk` but not decrypt.
    pub fn from_public_key(pk: PublicKey) -> Self {
        Self {
            pk,
            sk: None,
            table: None,
        }
    }

    /// Creates a context holding both halves of a key pair.
    pub fn from_key_pair(pk: PublicKey, sk: SecretKey) -> Self {
        Self {
            pk,
            sk: Some(sk),
            table: None,
        }
    }

    /// Generates a fresh key pair and returns a context holding both.
    pub fn generate() -> Self {
        let (pk, sk) = key_gen();
        Self::from_key_pair(pk, sk)
    }

    /// The context's public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    /// The context's secret key, if one was supplied.
    ///
    /// Returns [`ElGamalError::MissingSecretKey`] for a context constructed
    /// with [`Scheme::from_public_key`].
    pub fn secret_key(&self) -> Result<&SecretKey, ElGamalError> {
        self.sk.as_ref().ok_or(ElGamalError::MissingSecretKey)
    }

    /// Builds the baby-step/giant-step table and attaches it to this
    /// context. Equivalent to `load_table(Arc::new(precompute_decrypt_table()))`.
    pub fn precompute_decrypt_table(&mut self) {
        self.table = Some(Arc::new(precompute_decrypt_table()));
    }

    /// Attaches a table built or loaded elsewhere, e.g. to share one table
    /// across many [`Scheme`] instances.
    pub fn load_table(&mut self, table: Arc<DecryptTable>) {
        self.table = Some(table);
    }

    /// Encrypts `value` under this context's public key.
    pub fn encrypt(&self, value: i64) -> Result<Ciphertext, ElGamalError> {
        encrypt(&self.pk, value)
    }

    /// Encrypts an already-encoded plaintext under this context's public key.
    pub fn encrypt_plaintext(&self, plain: Plaintext) -> Result<Ciphertext, ElGamalError> {
        encrypt_plaintext(&self.pk, plain)
    }

    /// Decrypts `ciphertext` using this context's secret key and table.
    ///
    /// Returns [`ElGamalError::MissingSecretKey`] or
    /// [`ElGamalError::TableNotLoaded`] if either is absent, before
    /// attempting the baby-step search.
    pub fn decrypt(&self, ciphertext: &Ciphertext) -> Result<i64, ElGamalError> {
        let sk = self.secret_key()?;
        let table = self.table.as_deref().ok_or(ElGamalError::TableNotLoaded)?;

        decrypt(sk, table, ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh_table() -> DecryptTable {
        precompute_decrypt_table()
    }

    #[test]
    fn encrypts_and_decrypts_round_trip() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        for value in [-98, 46, 0, 555555, -444444] {
            let ct = encrypt(&pk, value).unwrap();
            assert_eq!(decrypt(&sk, &table, &ct).unwrap(), value);
        }
    }

    #[test]
    fn hom_add_matches_plaintext_sum() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        let a = encrypt(&pk, -98).unwrap();
        let b = encrypt(&pk, 16).unwrap();
        let sum = hom_add(&a, &b);

        assert_eq!(decrypt(&sk, &table, &sum).unwrap(), -82);
    }

    #[test]
    fn hom_sub_matches_plaintext_difference() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        let a = encrypt(&pk, 111111).unwrap();
        let b = encrypt(&pk, 555555).unwrap();
        let diff = hom_sub(&a, &b);

        assert_eq!(decrypt(&sk, &table, &diff).unwrap(), -444444);
    }

    #[test]
    fn hom_add_plain_matches_plaintext_sum() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        let a = encrypt(&pk, 15).unwrap();
        let result = hom_add_plain(&a, codec::encode(37).unwrap());

        assert_eq!(decrypt(&sk, &table, &result).unwrap(), 52);
    }

    #[test]
    fn hom_mul_plain_matches_plaintext_product() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        let a = encrypt(&pk, 5).unwrap();
        let result = hom_mul_plain(&a, codec::encode(37).unwrap());

        assert_eq!(decrypt(&sk, &table, &result).unwrap(), 185);
    }

    #[test]
    fn hom_negate_matches_plaintext_negation() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        let a = encrypt(&pk, 50).unwrap();
        let result = hom_negate(&a);

        assert_eq!(decrypt(&sk, &table, &result).unwrap(), -50);
    }

    #[test]
    fn decrypting_under_the_wrong_key_fails_or_diverges() {
        let table = fresh_table();
        let (pk, _sk) = key_gen();
        let (_pk2, sk2) = key_gen();

        let ct = encrypt(&pk, 1234).unwrap();
        let result = decrypt(&sk2, &table, &ct);

        match result {
            Ok(value) => assert_ne!(value, 1234),
            Err(ElGamalError::UndecryptableCiphertext) => {}
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn table_save_and_load_round_trip_preserves_decryption() {
        let table = fresh_table();
        let (pk, sk) = key_gen();

        let mut buf = Vec::new();
        save_table(&table, &mut buf).unwrap();
        let loaded = load_table(&buf[..]).unwrap();

        let ct = encrypt(&pk, 777).unwrap();
        assert_eq!(decrypt(&sk, &loaded, &ct).unwrap(), 777);
    }

    #[test]
    fn scheme_round_trips_through_its_own_key_pair() {
        let mut scheme = Scheme::generate();
        scheme.precompute_decrypt_table();

        let ct = scheme.encrypt(-12345).unwrap();
        assert_eq!(scheme.decrypt(&ct).unwrap(), -12345);
    }

    #[test]
    fn scheme_without_secret_key_cannot_decrypt() {
        let (pk, _sk) = key_gen();
        let mut scheme = Scheme::from_public_key(pk);
        scheme.precompute_decrypt_table();

        let ct = scheme.encrypt(1).unwrap();
        assert!(matches!(
            scheme.decrypt(&ct),
            Err(ElGamalError::MissingSecretKey)
        ));
    }

    #[test]
    fn scheme_without_table_cannot_decrypt() {
        let (pk, sk) = key_gen();
        let scheme = Scheme::from_key_pair(pk, sk);

        let ct = scheme.encrypt(1).unwrap();
        assert!(matches!(
            scheme.decrypt(&ct),
            Err(ElGamalError::TableNotLoaded)
        ));
    }

    #[test]
    fn scheme_shares_one_table_across_instances() {
        let table = Arc::new(fresh_table());

        let mut a = Scheme::generate();
        let mut b = Scheme::generate();
        a.load_table(Arc::clone(&table));
        b.load_table(Arc::clone(&table));

        let ct_a = a.encrypt(100).unwrap();
        let ct_b = b.encrypt(-100).unwrap();

        assert_eq!(a.decrypt(&ct_a).unwrap(), 100);
        assert_eq!(b.decrypt(&ct_b).unwrap(), -100);
    }
}
