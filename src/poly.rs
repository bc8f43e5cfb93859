//! Polynomials over GF(2^m) and the extension field GF((2^m)^t).
//!
//! Spec: Classic McEliece 2022-10-23, §2.2 (Goppa polynomial), §2.4.
//! Ref: `root.c` (eval, root) and `gf.c` (GF_mul, store_gf) of the reference implementation.

use alloc::vec::Vec;

use crate::{
    ParameterSet,
    benes::Support,
    error::{Result, check_len},
    gf,
    param::{ExtElement, Gf, Poly, Syndromes},
};

/// Evaluates `f` at `a` with Horner's rule, starting from the degree-t coefficient.
#[must_use]
pub fn eval<P: ParameterSet>(f: &Poly<P>, a: Gf) -> Gf {
    let t = P::SYS_T;
    f[..t]
        .iter()
        .rev()
        .fold(f[t], |r, &c| gf::add(gf::mul::<P>(r, a), c))
}

/// Evaluates `f` at every support element, in support order.
///
/// Positions where the result is zero are the roots of `f`; for an error
/// locator these are the error positions.
#[must_use]
pub fn roots<P: ParameterSet>(f: &Poly<P>, support: &Support<P>) -> Vec<Gf> {
    support.iter().map(|&a| eval::<P>(f, a)).collect()
}

/// Extends the t low coefficients of a monic polynomial with its leading 1.
#[must_use]
pub fn from_monic<P: ParameterSet>(g: &ExtElement<P>) -> Poly<P> {
    let mut f = Poly::<P>::default();
    f[..P::SYS_T].copy_from_slice(g.as_slice());
    f[P::SYS_T] = 1;
    f
}

/// Multiplies two elements of GF((2^m)^t) = GF(2^m)[y] / f(y).
///
/// The 2t-1 coefficient product is reduced from the top using
/// `y^t = sum c_k y^k` from `P::POLY_TAIL`.
#[must_use]
pub fn mul_mod<P: ParameterSet>(a: &ExtElement<P>, b: &ExtElement<P>) -> ExtElement<P> {
    let t = P::SYS_T;

    // 2t slots, the last one stays zero
    let mut prod = Syndromes::<P>::default();
    for (i, &ai) in a.iter().enumerate() {
        for (j, &bj) in b.iter().enumerate() {
            prod[i + j] ^= gf::mul::<P>(ai, bj);
        }
    }

    for i in (t..2 * t - 1).rev() {
        let top = prod[i];
        for &(k, c) in P::POLY_TAIL {
            prod[i - t + k] ^= gf::mul::<P>(top, c);
        }
    }

    let mut out = ExtElement::<P>::default();
    out.copy_from_slice(&prod[..t]);
    out
}

/// Serializes the t low coefficients of a monic Goppa polynomial, 2 bytes each.
#[must_use]
pub fn store<P: ParameterSet>(g: &ExtElement<P>) -> Vec<u8> {
    g.iter().flat_map(|&c| gf::store_gf(c)).collect()
}

/// Parses the 2t-byte encoding written by [`store`].
pub fn load<P: ParameterSet>(bytes: &[u8]) -> Result<ExtElement<P>> {
    check_len("goppa polynomial bytes", 2 * P::SYS_T, bytes.len())?;

    let mut g = ExtElement::<P>::default();
    for (c, pair) in g.iter_mut().zip(bytes.chunks_exact(2)) {
        *c = gf::load_gf::<P>([pair[0], pair[1]]);
    }
    Ok(g)
}
