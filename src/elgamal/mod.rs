//! Additively homomorphic ElGamal encryption over Ed25519.
//!
//! See [`scheme`] for the encryption/decryption/homomorphic API, [`codec`]
//! for the signed-integer encoding plaintexts use, and [`table`] for the
//! baby-step/giant-step decrypt table this scheme's decryption is built on.

pub(crate) mod curve;

mod codec;
mod error;
mod scheme;
mod table;

pub use codec::Plaintext;
pub use codec::{decode, encode};
pub use error::ElGamalError;
pub use scheme::{
    decrypt, encrypt, encrypt_plaintext, hom_add, hom_add_plain, hom_mul_plain, hom_negate,
    hom_sub, hom_sub_plain, key_gen, load_table, precompute_decrypt_table, save_table,
    Ciphertext, PublicKey, Scheme, SecretKey, GROUP_ORDER,
};
pub use table::DecryptTable;
