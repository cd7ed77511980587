//! Edwards25519 curve arithmetic.
//!
//! This module provides the group and field arithmetic the encryption
//! scheme is built on: finite field operations over `𝔽ₚ` with
//! `p = 2²⁵⁵ − 19`, scalar reduction modulo the group order `ℓ`, and point
//! arithmetic on the twisted Edwards curve.
//!
//! Unlike a signature implementation, none of this needs to run in constant
//! time, so the group module favors a plain double-and-add scalar
//! multiplication over windowed, table-based methods.

pub(crate) mod field;
pub(crate) mod group;
pub(crate) mod scalar;
