//! Ed25519 scalar reduction.
//!
//! Scalars are integers modulo the Ed25519 group order `L`:
//!
//! ```text
//! L = 2^252 + 27742317777372353535851937790883648493
//! ```
//!
//! encoded as 32 little-endian bytes. This module implements the single
//! primitive the rest of the crate needs from scalar arithmetic: reduction
//! of an arbitrary 256-bit integer modulo `L`, following the Ed25519
//! reference algorithm (a radix-2²¹, 24-limb reduction over a 512-bit
//! working value).

use crate::elgamal::curve::field::{load_3, load_4};

/// A 256-bit scalar, stored as 32 little-endian bytes.
///
/// No invariant is enforced by the type itself: callers decide whether a
/// given value is reduced, clamped, or neither.
#[derive(Clone, Copy)]
pub(crate) struct Scalar(pub(crate) [u8; 32]);

impl Scalar {
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Reduces a 512-bit integer modulo `L`.
    ///
    /// Follows the Ed25519 reference reduction: the input is decomposed into
    /// 24 signed 21-bit limbs, high limbs are folded back using the identity
    /// `2^252 ≡ 27742317777372353535851937790883648493 (mod L)`, and the
    /// result is renormalized into a canonical 32-byte scalar.
    pub(crate) fn reduce(wide: [u8; 64]) -> Self {
        let mask = 0x1f_ffffi64;

        let mut s = [
            (load_3(&wide[0..]) as i64) & mask,
            ((load_4(&wide[2..]) >> 5) as i64) & mask,
            ((load_3(&wide[5..]) >> 2) as i64) & mask,
            ((load_4(&wide[7..]) >> 7) as i64) & mask,
            ((load_4(&wide[10..]) >> 4) as i64) & mask,
            ((load_3(&wide[13..]) >> 1) as i64) & mask,
            ((load_4(&wide[15..]) >> 6) as i64) & mask,
            ((load_3(&wide[18..]) >> 3) as i64) & mask,
            (load_3(&wide[21..]) as i64) & mask,
            ((load_4(&wide[23..]) >> 5) as i64) & mask,
            ((load_3(&wide[26..]) >> 2) as i64) & mask,
            ((load_4(&wide[28..]) >> 7) as i64) & mask,
            ((load_4(&wide[31..]) >> 4) as i64) & mask,
            ((load_3(&wide[34..]) >> 1) as i64) & mask,
            ((load_4(&wide[36..]) >> 6) as i64) & mask,
            ((load_3(&wide[39..]) >> 3) as i64) & mask,
            (load_3(&wide[42..]) as i64) & mask,
            ((load_4(&wide[44..]) >> 5) as i64) & mask,
            ((load_3(&wide[47..]) >> 2) as i64) & mask,
            ((load_4(&wide[49..]) >> 7) as i64) & mask,
            ((load_4(&wide[52..]) >> 4) as i64) & mask,
            ((load_3(&wide[55..]) >> 1) as i64) & mask,
            ((load_4(&wide[57..]) >> 6) as i64) & mask,
            (load_4(&wide[60..]) >> 3) as i64,
        ];

        let coeffs = [666643, 470296, 654183, -997805, 136657, -683901];

        for index in (18..=23).rev() {
            for j in 0..6 {
                s[index - 12 + j] += s[index] * coeffs[j];
            }
        }

        for &index in &[6, 8, 10, 12, 14, 16] {
            let carry = (s[index] + (1 << 20)) >> 21;

            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[7, 9, 11, 13, 15] {
            let carry = (s[index] + (1 << 20)) >> 21;

            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for index in (12..=17).rev() {
            for j in 0..6 {
                s[index - 12 + j] += s[index] * coeffs[j];
            }
        }
        s[12] = 0;

        for &index in &[0, 2, 4, 6, 8, 10] {
            let carry = (s[index] + (1 << 20)) >> 21;

            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        for &index in &[1, 3, 5, 7, 9, 11] {
            let carry = (s[index] + (1 << 20)) >> 21;

            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let s12 = s[12];
        for (sx, coeff) in s.iter_mut().take(6).zip(coeffs.iter()) {
            *sx = s12 * coeff;
        }
        s[12] = 0;

        for index in 0..11 {
            let carry = s[index] >> 21;

            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let carry = s[11] >> 21;
        s[12] += carry;
        s[11] -= carry << 21;

        let s12 = s[12];
        for (sx, coeff) in s.iter_mut().take(6).zip(coeffs.iter()) {
            *sx = s12 * coeff;
        }

        for index in 0..11 {
            let carry = s[index] >> 21;

            s[index + 1] += carry;
            s[index] -= carry << 21;
        }

        let result = [
            s[0] as u8,
            (s[0] >> 8) as u8,
            ((s[0] >> 16) | (s[1] << 5)) as u8,
            (s[1] >> 3) as u8,
            (s[1] >> 11) as u8,
            ((s[1] >> 19) | (s[2] << 2)) as u8,
            (s[2] >> 6) as u8,
            ((s[2] >> 14) | (s[3] << 7)) as u8,
            (s[3] >> 1) as u8,
            (s[3] >> 9) as u8,
            ((s[3] >> 17) | (s[4] << 4)) as u8,
            (s[4] >> 4) as u8,
            (s[4] >> 12) as u8,
            ((s[4] >> 20) | (s[5] << 1)) as u8,
            (s[5] >> 7) as u8,
            ((s[5] >> 15) | (s[6] << 6)) as u8,
            (s[6] >> 2) as u8,
            (s[6] >> 10) as u8,
            ((s[6] >> 18) | (s[7] << 3)) as u8,
            (s[7] >> 5) as u8,
            (s[7] >> 13) as u8,
            s[8] as u8,
            (s[8] >> 8) as u8,
            ((s[8] >> 16) | (s[9] << 5)) as u8,
            (s[9] >> 3) as u8,
            (s[9] >> 11) as u8,
            ((s[9] >> 19) | (s[10] << 2)) as u8,
            (s[10] >> 6) as u8,
            ((s[10] >> 14) | (s[11] << 7)) as u8,
            (s[11] >> 1) as u8,
            (s[11] >> 9) as u8,
            (s[11] >> 17) as u8,
        ];

        Scalar(result)
    }
}

/// Reduces a 32-byte scalar modulo `L` in place, per the Ed25519 reference
/// `sc_reduce`. The input is treated as the low half of a 512-bit value
/// whose high half is zero.
pub(crate) fn sc_reduce(buf: &mut [u8; 32]) {
    let mut wide = [0u8; 64];
    wide[..32].copy_from_slice(buf);

    buf.copy_from_slice(&Scalar::reduce(wide).to_bytes());
}
