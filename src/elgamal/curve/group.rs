//! Edwards25519 group operations.
//!
//! This module implements group arithmetic for the Edwards25519 elliptic
//! curve used by the encryption scheme. The curve is defined over the prime
//! field 𝔽ₚ with:
//!
//! ```text
//! p = 2²⁵⁵ − 19
//! ```
//!
//! and uses the twisted Edwards form:
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²
//! ```
//!
//! where `d` is the standard Edwards25519 curve constant.
//!
//! ## Coordinate systems
//!
//! - **GeP3** — Extended coordinates `(X : Y : Z : T)`, the primary working
//!   representation. Supports complete addition formulas without inversions.
//! - **GeP1** — Extended intermediate coordinates, a transient result during
//!   additions and doublings.
//! - **GeP2** — Projective coordinates `(X : Y : Z)`, used mainly for point
//!   doubling.
//! - **GeCached** — Cached extended form storing `(Y±X, Z, 2·d·T)`, optimized
//!   for repeated additions/subtractions.
//!
//! ## Scalar multiplication
//!
//! Unlike a signature scheme, nothing here needs to run in constant time:
//! ciphertexts and the values recovered from them are not secret in the
//! sense that matters for side channels, and the decryption search itself is
//! already variable-time in its running time. Scalar multiplication is
//! therefore a plain left-to-right double-and-add over all 256 bits rather
//! than a windowed, table-based method. This avoids carrying the large
//! fixed-base precomputed tables a constant-time implementation would need,
//! at the cost of being slower per multiplication — a reasonable trade for a
//! scheme whose bottleneck is the discrete-log search, not the point
//! multiplications feeding it.

use crate::elgamal::curve::field::FieldElement;
use crate::elgamal::curve::scalar::Scalar;
use std::sync::OnceLock;

/// Edwards curve parameter `d = -121665/121666`.
const D: FieldElement = FieldElement([
    -10913610, 13857413, -15372611, 6949391, 114729, -8787816, -6275908, -3247719, -18696448,
    -12055116,
]);

/// `2*d`, precomputed for the cached addition formulas.
const D2: FieldElement = FieldElement([
    -21827239, -5839606, -30745221, 13898782, 229458, 15978800, -12551817, -6495438, 29715968,
    9444199,
]);

/// A square root of `-1` modulo `p`, used during point decompression.
const SQRTM1: FieldElement = FieldElement([
    -32595792, -7943725, 9377950, 3500415, 12389472, -272473, -25146209, -2005654, 326686,
    11406482,
]);

/// Canonical compressed encoding of the Ed25519 base point `B`.
const BASE_POINT_BYTES: [u8; 32] = [
    0x58, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66,
    0x66, 0x66,
];

/// Group element in extended intermediate coordinates.
///
/// Used only as a transient result during addition and doubling; it is
/// converted to `GeP2` or `GeP3` before being used further.
struct GeP1 {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    t: FieldElement,
}

impl GeP1 {
    /// `a + b`, with `b` given in cached form.
    fn from_sum(a: &GeP3, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yplusx;
        let mut t = b.t2d * a.t;

        y = y * b.yminusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx + t;
        t = sumx - t;

        Self { x, y, z, t }
    }

    /// `a - b`, with `b` given in cached form.
    fn from_difference(a: &GeP3, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yminusx;
        let mut t = b.t2d * a.t;

        y = y * b.yplusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx - t;
        t = sumx + t;

        Self { x, y, z, t }
    }
}

/// A point on the Edwards curve in projective coordinates `(X : Y : Z)`.
struct GeP2 {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

impl GeP2 {
    fn from_gep3(g: &GeP3) -> Self {
        Self {
            x: g.x,
            y: g.y,
            z: g.z,
        }
    }

    /// Doubles the point, returning the result in `GeP1` form.
    fn double(self) -> GeP1 {
        let mut x = self.x.square();
        let mut z = self.y.square();
        let mut t = self.z.double_square();
        let mut y = self.x + self.y;
        let ysquare = y.square();

        y = z + x;
        z = z - x;
        x = ysquare - y;
        t = t - z;

        GeP1 { x, y, z, t }
    }
}

/// A point on the Edwards25519 curve in extended coordinates.
///
/// `x = X/Z`, `y = Y/Z`, `T = X*Y/Z`. This is the primary representation
/// used for group operations throughout the scheme.
#[derive(Clone, Copy)]
pub(crate) struct GeP3 {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    t: FieldElement,
}

impl GeP3 {
    /// The identity element `(0, 1)`.
    pub(crate) const ONE: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    fn from_gep1(g: &GeP1) -> Self {
        Self {
            x: g.x * g.t,
            y: g.y * g.z,
            z: g.z * g.t,
            t: g.x * g.y,
        }
    }

    #[inline(always)]
    fn double(&self) -> GeP1 {
        GeP2::from_gep3(self).double()
    }

    /// `self + other`.
    pub(crate) fn add(&self, other: &GeP3) -> GeP3 {
        GeP3::from_gep1(&GeP1::from_sum(self, &GeCached::from_p3(other)))
    }

    /// `self - other`.
    pub(crate) fn sub(&self, other: &GeP3) -> GeP3 {
        GeP3::from_gep1(&GeP1::from_difference(self, &GeCached::from_p3(other)))
    }

    /// `-self`.
    pub(crate) fn negate(&self) -> GeP3 {
        GeP3 {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    /// `2 * self`, as a `GeP3` point.
    fn double_p3(&self) -> GeP3 {
        GeP3::from_gep1(&self.double())
    }

    /// Encodes the point into its compressed 32-byte representation.
    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        let recip = self.z.invert();
        let x = self.x * recip;
        let y = self.y * recip;

        let mut output = y.to_bytes();
        output[31] ^= (x.is_negative() as u8) << 7;

        output
    }

    /// Decompresses a point from its 32-byte encoding.
    ///
    /// Returns `None` if the encoding does not correspond to a valid curve
    /// point.
    pub(crate) fn decompress(s: &[u8; 32]) -> Option<Self> {
        let mut h = Self {
            x: FieldElement::ZERO,
            y: FieldElement::from_bytes(s),
            z: FieldElement::ONE,
            t: FieldElement::ZERO,
        };

        let mut u = h.y.square();
        let mut v = u * D;
        u = u - h.z;
        v = v + h.z;

        let v3 = v.square() * v;

        h.x = v3.square();
        h.x = h.x * v;
        h.x = h.x * u;
        h.x = h.x.pow22523();
        h.x = h.x * v3;
        h.x = h.x * u;

        let vxx = h.x.square() * v;
        let mut check = vxx - u;

        if check.is_non_zero() == 1 {
            check = vxx + u;

            if check.is_non_zero() == 1 {
                return None;
            }

            h.x = h.x * SQRTM1;
        }

        let sign = (s[31] >> 7) as i32;
        if h.x.is_negative() == sign {
            h.x = -h.x;
        }

        h.t = h.x * h.y;

        Some(h)
    }

    /// Scalar multiplication `s * self`.
    ///
    /// Plain left-to-right double-and-add over the 256 bits of `s`.
    pub(crate) fn scalar_mul(&self, s: &Scalar) -> GeP3 {
        let bytes = s.to_bytes();
        let mut acc = GeP3::ONE;

        for bit in (0..256).rev() {
            acc = acc.double_p3();

            let byte = bytes[bit / 8];
            if (byte >> (bit % 8)) & 1 == 1 {
                acc = acc.add(self);
            }
        }

        acc
    }
}

/// Cached representation of an Edwards curve point, optimized for repeated
/// use as the second operand of addition and subtraction.
struct GeCached {
    yplusx: FieldElement,
    yminusx: FieldElement,
    z: FieldElement,
    t2d: FieldElement,
}

impl GeCached {
    fn from_p3(g: &GeP3) -> GeCached {
        GeCached {
            yplusx: g.y + g.x,
            yminusx: g.y - g.x,
            z: g.z,
            t2d: g.t * D2,
        }
    }
}

static BASE_POINT: OnceLock<GeP3> = OnceLock::new();

/// The canonical Ed25519 base point `B`.
pub(crate) fn base_point() -> GeP3 {
    *BASE_POINT.get_or_init(|| {
        GeP3::decompress(&BASE_POINT_BYTES).expect("canonical base point encoding is valid")
    })
}

/// `s * B`, where `B` is the canonical base point.
pub(crate) fn scalar_mul_base(s: &Scalar) -> GeP3 {
    base_point().scalar_mul(s)
}

/// `a * p + b * B`, where `B` is the canonical base point.
///
/// Computed as two independent scalar multiplications followed by an
/// addition rather than a combined double-scalar ladder: the combined form
/// is an optimization the scheme does not require, since the points being
/// combined here are never on a timing-sensitive path.
pub(crate) fn double_scalar_mul_base(a: &Scalar, p: &GeP3, b: &Scalar) -> GeP3 {
    p.scalar_mul(a).add(&scalar_mul_base(b))
}
