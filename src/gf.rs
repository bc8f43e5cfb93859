//! GF(2^m) arithmetic with the irreducible polynomial of the parameter set.
//!
//! Spec: Classic McEliece 2022-10-23, §2.1 (field), §2.4 (field ordering).
//! Ref: `gf.c` of the reference implementation (gf_mul, gf_inv, gf_iszero, bitrev).
//!
//! Elements are `u16` values below 2^m. None of these functions branch on
//! element values: reduction, inversion and the zero test are built from
//! shifts and masks only, because they are applied to secret values during
//! decoding.

use crate::{ParameterSet, param::Gf};

/// Adds two field elements.
#[inline]
#[must_use]
pub const fn add(a: Gf, b: Gf) -> Gf {
    a ^ b
}

/// Multiplies two elements of GF(2^m).
///
/// Carry-less schoolbook product followed by reduction modulo `P::GF_POLY`,
/// one bit at a time from degree 2m-2 down to m. Each reduction step XORs the
/// shifted modulus under a mask taken from the bit itself.
#[must_use]
pub fn mul<P: ParameterSet>(a: Gf, b: Gf) -> Gf {
    debug_assert!(P::GFBITS <= 16, "field elements must fit in u16");

    let a = u32::from(a);
    let b = u32::from(b);

    let mut tmp = 0u32;
    for i in 0..P::GFBITS {
        tmp ^= a * (b & (1 << i));
    }

    for i in (P::GFBITS..2 * P::GFBITS - 1).rev() {
        let bit = (tmp >> i) & 1;
        tmp ^= (P::GF_POLY << (i - P::GFBITS)) & bit.wrapping_neg();
    }

    (tmp as Gf) & P::gf_mask()
}

/// Squares an element of GF(2^m).
#[inline]
#[must_use]
pub fn sq<P: ParameterSet>(a: Gf) -> Gf {
    mul::<P>(a, a)
}

/// Computes the multiplicative inverse as `a^(2^m - 2)`.
///
/// The exponent is fixed, so the chain of squarings and multiplications is the
/// same for every input. `inv(0) = 0`.
#[must_use]
pub fn inv<P: ParameterSet>(a: Gf) -> Gf {
    // a^(2^(m-1) - 1), then one more squaring
    let mut out = a;
    for _ in 1..P::GFBITS - 1 {
        out = mul::<P>(sq::<P>(out), a);
    }
    sq::<P>(out)
}

/// Returns `num / den`.
#[inline]
#[must_use]
pub fn frac<P: ParameterSet>(den: Gf, num: Gf) -> Gf {
    mul::<P>(num, inv::<P>(den))
}

/// Returns the m-bit all-ones mask if `a == 0`, and 0 otherwise.
///
/// `a - 1` only borrows into the high bits of the 32-bit word when `a` is zero.
#[inline]
#[must_use]
pub fn iszero<P: ParameterSet>(a: Gf) -> Gf {
    (u32::from(a).wrapping_sub(1) >> (32 - P::GFBITS)) as Gf
}

/// Reverses the low m bits of `a`.
#[inline]
#[must_use]
pub fn bitrev<P: ParameterSet>(a: Gf) -> Gf {
    a.reverse_bits() >> (16 - P::GFBITS)
}

/// Little-endian two-byte encoding of a field element.
#[inline]
#[must_use]
pub fn store_gf(a: Gf) -> [u8; 2] {
    a.to_le_bytes()
}

/// Decodes a little-endian field element, discarding bits above m.
#[inline]
#[must_use]
pub fn load_gf<P: ParameterSet>(bytes: [u8; 2]) -> Gf {
    Gf::from_le_bytes(bytes) & P::gf_mask()
}
