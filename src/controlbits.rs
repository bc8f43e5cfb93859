//! Benes network control bits from a permutation.
//!
//! Spec: Classic McEliece 2022-10-23, §2.4 (field ordering, control bits).
//! Ref: `controlbits.c` of the reference implementation; D. J. Bernstein,
//!      "Verified fast formulas for control bits for permutation networks" (2020).
//!
//! Implements the Nassimi–Sahni decomposition in the recursive-halving order
//! of the reference code, so the control bits are byte-identical to the
//! reference for the same permutation. Every data-dependent step goes through
//! the constant-time sorting network in [`crate::sort`].

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::Deref;

use crate::{
    ParameterSet, benes,
    error::{Error, Result, check_len},
    sort::{SortWord, sort},
};

/// A permutation of `0..2^m`, stored as the image of each index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation<P: ParameterSet> {
    pi: Vec<u16>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> Permutation<P> {
    /// The identity permutation.
    #[must_use]
    pub fn identity() -> Self {
        let pi = (0..P::field_size()).map(|i| i as u16).collect();
        Self {
            pi,
            _params: PhantomData,
        }
    }

    /// Builds the permutation that sorts the 2^m field-ordering words.
    ///
    /// This is how key generation turns random 32-bit words into a
    /// permutation: sort the pairs `(a_i, i)` by `a_i` and keep the index
    /// column. Equal words are rejected, as in the reference, because they
    /// would make the ordering ambiguous.
    pub fn from_field_ordering(words: &[u32]) -> Result<Self> {
        let n = P::field_size();
        check_len("field ordering", n, words.len())?;

        let mut buf: Vec<u64> = words
            .iter()
            .enumerate()
            .map(|(i, &a)| (u64::from(a) << 31) | i as u64)
            .collect();
        sort(&mut buf);

        if buf.windows(2).any(|w| w[0] >> 31 == w[1] >> 31) {
            return Err(Error::DuplicateOrdering);
        }

        let mask = P::gf_mask();
        let pi = buf.iter().map(|&x| (x as u16) & mask).collect();
        Ok(Self {
            pi,
            _params: PhantomData,
        })
    }

    /// Returns the image indices.
    #[must_use]
    pub fn as_slice(&self) -> &[u16] {
        &self.pi
    }
}

impl<P: ParameterSet> Deref for Permutation<P> {
    type Target = [u16];

    fn deref(&self) -> &[u16] {
        &self.pi
    }
}

impl<P: ParameterSet> TryFrom<&[u16]> for Permutation<P> {
    type Error = Error;

    fn try_from(values: &[u16]) -> Result<Self> {
        let n = P::field_size();
        check_len("permutation", n, values.len())?;

        // sorted copy must be exactly 0..n
        let mut sorted: Vec<u32> = values.iter().map(|&v| u32::from(v)).collect();
        sort(&mut sorted);
        let diff = sorted
            .iter()
            .enumerate()
            .fold(0u32, |acc, (i, &v)| acc | (v ^ i as u32));
        if diff != 0 {
            return Err(Error::NotAPermutation { size: n });
        }

        Ok(Self {
            pi: values.to_vec(),
            _params: PhantomData,
        })
    }
}

/// Switch settings of the Benes network for 2^m elements.
///
/// Layer `l` occupies bits `l * 2^(m-1) .. (l + 1) * 2^(m-1)`; bit `pos` is
/// `(bytes[pos / 8] >> (pos % 8)) & 1`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ControlBits<P: ParameterSet> {
    bytes: Vec<u8>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> ControlBits<P> {
    /// Returns the packed control bits.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Setting of switch `index` counted across all layers.
    #[inline]
    #[must_use]
    pub fn bit(&self, index: usize) -> u8 {
        (self.bytes[index >> 3] >> (index & 7)) & 1
    }
}

impl<P: ParameterSet> TryFrom<&[u8]> for ControlBits<P> {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        check_len("control bits", P::cond_bytes(), bytes.len())?;
        Ok(Self {
            bytes: bytes.to_vec(),
            _params: PhantomData,
        })
    }
}

/// Computes control bits that make the Benes network realize `pi`.
///
/// Routing the identity sequence through the network with the returned bits
/// yields `pi`, i.e. data `d` is routed to `d'[x] = d[pi[x]]`.
#[must_use]
pub fn encode<P: ParameterSet>(pi: &Permutation<P>) -> ControlBits<P> {
    let n = P::field_size();

    let mut out = alloc::vec![0u8; P::cond_bytes()];
    let mut temp = alloc::vec![0u32; 2 * n];
    let perm: Vec<u32> = pi.iter().map(|&v| u32::from(v)).collect();

    cbrecursion(&mut out, 0, 1, &perm, P::GFBITS, &mut temp);

    debug_assert_eq!(
        benes::route_identity::<P>(&out),
        pi.as_slice(),
        "control bits do not reproduce the permutation"
    );
    tracing::debug!(
        m = P::GFBITS,
        bytes = out.len(),
        "computed benes control bits"
    );

    ControlBits {
        bytes: out,
        _params: PhantomData,
    }
}

#[inline]
fn ct_min(a: u32, b: u32) -> u32 {
    let (mut lo, mut hi) = (a, b);
    u32::minmax(&mut lo, &mut hi);
    lo
}

#[inline]
fn flip_bit(out: &mut [u8], pos: usize, bit: u32) {
    out[pos >> 3] ^= (bit as u8) << (pos & 7);
}

/// One level of the decomposition for `n = 2^w` elements.
///
/// Writes the first and last layer of this sub-network at bit positions
/// `pos, pos + step, ...`, then recurses on the even and odd halves with
/// doubled stride. `temp` must hold at least `2n` words; words are packed as
/// `(high << 16) | low` with both halves below 2^16.
fn cbrecursion(
    out: &mut [u8],
    mut pos: usize,
    step: usize,
    pi: &[u32],
    w: usize,
    temp: &mut [u32],
) {
    let n = pi.len();

    if w == 1 {
        flip_bit(out, pos, pi[0]);
        return;
    }

    let (a, b) = temp.split_at_mut(n);
    let b = &mut b[..n];

    for x in 0..n {
        a[x] = ((pi[x] ^ 1) << 16) | pi[x ^ 1];
    }
    sort(a); // a = (id << 16) | pibar

    for x in 0..n {
        let px = a[x] & 0xffff;
        let cx = ct_min(px, x as u32);
        b[x] = (px << 16) | cx;
    }
    // b = (p << 16) | c

    for x in 0..n {
        a[x] = (a[x] << 16) | x as u32; // (pibar << 16) | id
    }
    sort(a); // a = (id << 16) | pibar^-1

    for x in 0..n {
        a[x] = (a[x] << 16) | (b[x] >> 16); // (pibar^-1 << 16) | pibar
    }
    sort(a); // a = (id << 16) | pibar^2

    for x in 0..n {
        b[x] = (a[x] << 16) | (b[x] & 0xffff);
    }

    // c(x) <- min over the cycle of x, doubling the covered span each round
    for i in 1..w - 1 {
        // b = (p << 16) | c
        for x in 0..n {
            a[x] = (b[x] & !0xffff) | x as u32;
        }
        sort(a); // a = (id << 16) | p^-1

        for x in 0..n {
            a[x] = (a[x] << 16) | (b[x] & 0xffff); // (p^-1 << 16) | c
        }

        if i < w - 2 {
            for x in 0..n {
                b[x] = (a[x] & !0xffff) | (b[x] >> 16); // (p^-1 << 16) | p
            }
            sort(b); // b = (id << 16) | p^2
            for x in 0..n {
                b[x] = (b[x] << 16) | (a[x] & 0xffff); // (p^2 << 16) | c
            }
        }

        sort(a); // a = (id << 16) | c(p)
        for x in 0..n {
            let cpx = (b[x] & !0xffff) | (a[x] & 0xffff);
            b[x] = ct_min(b[x], cpx);
        }
    }

    for bx in b.iter_mut() {
        *bx &= 0xffff;
    }

    for x in 0..n {
        a[x] = (pi[x] << 16) | x as u32;
    }
    sort(a); // a = (id << 16) | pi^-1

    let half = n / 2;

    // first layer
    for j in 0..half {
        let x = 2 * j;
        let fj = b[x] & 1;
        let fx = x as u32 + fj;
        let fx1 = fx ^ 1;

        flip_bit(out, pos, fj);
        pos += step;

        b[x] = (a[x] << 16) | fx;
        b[x + 1] = (a[x + 1] << 16) | fx1;
    }
    sort(b); // b = (id << 16) | F(pi)

    // last layer
    pos += (2 * w - 3) * step * half;
    for k in 0..half {
        let y = 2 * k;
        let lk = b[y] & 1;
        let ly = y as u32 + lk;
        let ly1 = ly ^ 1;

        flip_bit(out, pos, lk);
        pos += step;

        a[y] = (ly << 16) | (b[y] & 0xffff);
        a[y + 1] = (ly1 << 16) | (b[y + 1] & 0xffff);
    }
    sort(a); // a = (id << 16) | F(pi(L))

    pos -= (2 * w - 2) * step * half;

    // middle: even and odd halves, reusing b for their permutations
    for j in 0..half {
        b[j] = (a[2 * j] & 0xffff) >> 1;
        b[j + half] = (a[2 * j + 1] & 0xffff) >> 1;
    }
    let (q_even, q_odd) = b.split_at(half);

    cbrecursion(out, pos, step * 2, q_even, w - 1, a);
    cbrecursion(out, pos + step, step * 2, q_odd, w - 1, a);
}
