//! Berlekamp–Massey over GF(2^m).
//!
//! Spec: Classic McEliece 2022-10-23, §2.3 (decoding).
//! Ref: `bm.c` of the reference implementation.

use subtle::{Choice, ConditionallySelectable, ConstantTimeGreater};

use crate::{
    ParameterSet,
    error::{Result, check_len},
    gf,
    param::{Gf, Poly, Syndromes},
};

/// Copies exactly 2t syndromes out of a slice.
pub fn syndromes<P: ParameterSet>(values: &[Gf]) -> Result<Syndromes<P>> {
    check_len("syndromes", 2 * P::SYS_T, values.len())?;
    Ok(Syndromes::<P>::from_fn(|i| values[i]))
}

/// Computes the error locator polynomial of a syndrome sequence.
///
/// Finds the shortest linear recurrence `C` generating `s` and returns it
/// reversed over t+1 slots, so for `k <= t` errors with locators `β_j` the
/// result is `x^(t-k) · Π (x - β_j)`, whose roots are the error positions.
///
/// # Algorithm
///
/// ```text
/// C = 1, B = x, L = 0, b = 1
/// for N in 0..2t:
///     d = Σ_{i=0}^{min(N,t)} C[i] · s[N-i]
///     C' = C + (d/b) · B                   when d != 0
///     if d != 0 and N >= 2L:
///         B = C (before update), L = N + 1 - L, b = d
///     B = x · B
/// return reverse(C)
/// ```
///
/// # Constant-Time Implementation
///
/// Both predicates are `subtle::Choice` values and every assignment in the
/// loop is a `conditional_select`, so the sequence of operations is identical
/// for every syndrome. The only loop bounds are `t` and the step index.
///
/// The function is total: with more than t errors it still returns a
/// polynomial, and telling a valid locator from an invalid one is left to the
/// caller's re-encryption check.
#[must_use]
pub fn berlekamp_massey<P: ParameterSet>(s: &Syndromes<P>) -> Poly<P> {
    let t = P::SYS_T;

    let mut c = Poly::<P>::default();
    let mut b_poly = Poly::<P>::default();
    c[0] = 1;
    b_poly[1] = 1;

    let mut l = 0u16;
    let mut b: Gf = 1;

    for n in 0..2 * t {
        let mut d: Gf = 0;
        for i in 0..=n.min(t) {
            d ^= gf::mul::<P>(c[i], s[n - i]);
        }

        let n16 = n as u16;
        let d_nonzero = !Choice::from((gf::iszero::<P>(d) & 1) as u8);
        let n_ge_2l = !(2 * l).ct_gt(&n16);
        let lengthen = d_nonzero & n_ge_2l;

        let prev = c.clone();
        let f = gf::frac::<P>(b, d);

        for (ci, &bi) in c.iter_mut().zip(b_poly.iter()) {
            let candidate = *ci ^ gf::mul::<P>(f, bi);
            *ci = Gf::conditional_select(ci, &candidate, d_nonzero);
        }

        l = u16::conditional_select(&l, &(n16 + 1).wrapping_sub(l), lengthen);

        for (bi, &pi) in b_poly.iter_mut().zip(prev.iter()) {
            *bi = Gf::conditional_select(bi, &pi, lengthen);
        }

        b = Gf::conditional_select(&b, &d, lengthen);

        // B <- x · B
        b_poly.copy_within(0..t, 1);
        b_poly[0] = 0;
    }

    let mut out = Poly::<P>::default();
    for (o, &ci) in out.iter_mut().zip(c.iter().rev()) {
        *o = ci;
    }
    out
}
