//! Additively homomorphic ElGamal encryption over Ed25519.
//!
//! This crate implements an exponential (lifted) ElGamal variant on the
//! Edwards25519 curve: a public key holder can encrypt signed integers in
//! `[-2^39, 2^39 - 1]`, combine ciphertexts and plaintexts homomorphically
//! (addition, subtraction, scalar multiplication, negation), and a secret
//! key holder can recover the integer result via a baby-step/giant-step
//! discrete-log search.
//!
//! The focus is on **clarity, predictability, and auditability**, rather
//! than on providing a large or high-level cryptographic API. All
//! components are dependency-free, explicit in their semantics, and
//! suitable for security-critical code.
//!
//! # Module overview
//!
//! - `elgamal`
//!   The encryption scheme itself: the integer codec, key generation,
//!   encryption/decryption, the homomorphic operators, the
//!   baby-step/giant-step decryption table and its persistence format, and
//!   the curve arithmetic the scheme is built on.
//!
//! - `rng`
//!   A ChaCha20-based CSPRNG used internally for key generation and
//!   per-ciphertext randomizers.
//!
//! - `os`
//!   A thin per-platform abstraction over the operating system's entropy
//!   source, consumed only by `rng`.
//!
//! # Design goals
//!
//! - No heap allocation in the cryptographic core (the decrypt table is
//!   the one deliberate exception, sized by its caller)
//! - Minimal and explicit APIs
//! - Clear separation between the scheme and the curve arithmetic it
//!   consumes

mod os;
mod rng;

pub mod elgamal;
