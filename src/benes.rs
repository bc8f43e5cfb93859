//! Benes network application and support generation.
//!
//! Spec: Classic McEliece 2022-10-23, §2.4 (support from control bits).
//! Ref: `benes.c` (apply_benes) and `sk_gen.c` / `decrypt.c` (support_gen) of the
//!      reference implementation.
//!
//! The network has 2m - 1 layers of 2^(m-1) conditional swaps:
//!
//! ```text
//! layer:   0   1   2  ...  m-1  ...  2m-3  2m-2
//! stride:  1   2   4  ...  2^(m-1) ... 2     1
//! ```
//!
//! Within a layer, switches are numbered block by block (blocks of
//! `2 * stride` positions), then by offset inside the block. Switch `k` of
//! the layer exchanges positions `block + j` and `block + j + stride`.

use alloc::vec::Vec;
use core::marker::PhantomData;
use core::ops::Deref;

use crate::{
    ParameterSet,
    controlbits::ControlBits,
    gf,
    param::Gf,
};

/// Calls `cswap(a, b, bit)` for every switch, in network order.
///
/// With `reverse` the layers are visited last to first, which applies the
/// inverse permutation since every layer is an involution.
fn for_each_switch<P: ParameterSet>(
    bits: &[u8],
    reverse: bool,
    mut cswap: impl FnMut(usize, usize, u8),
) {
    let m = P::GFBITS;
    let n = P::field_size();
    let layers = P::layers();

    for step in 0..layers {
        let layer = if reverse { layers - 1 - step } else { step };
        let s = if layer < m { layer } else { 2 * m - 2 - layer };
        let stride = 1 << s;

        let mut index = layer * P::switches_per_layer();
        for block in (0..n).step_by(2 * stride) {
            for j in 0..stride {
                let bit = (bits[index >> 3] >> (index & 7)) & 1;
                cswap(block + j, block + j + stride, bit);
                index += 1;
            }
        }
    }
}

/// Routes the identity sequence `0..2^m` through the network.
pub(crate) fn route_identity<P: ParameterSet>(bits: &[u8]) -> Vec<u16> {
    let mut p: Vec<u16> = (0..P::field_size()).map(|i| i as u16).collect();
    for_each_switch::<P>(bits, false, |a, b, bit| {
        let d = (p[a] ^ p[b]) & u16::from(bit).wrapping_neg();
        p[a] ^= d;
        p[b] ^= d;
    });
    p
}

/// `m` bit planes over 2^m positions: plane `j` holds bit `j` of every element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitPlanes<P: ParameterSet> {
    bytes: Vec<u8>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> BitPlanes<P> {
    /// All-zero planes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bytes: alloc::vec![0u8; P::GFBITS * P::plane_bytes()],
            _params: PhantomData,
        }
    }

    /// Bit-slices up to 2^m field elements; missing positions are zero.
    #[must_use]
    pub fn from_elements(elements: &[Gf]) -> Self {
        debug_assert!(elements.len() <= P::field_size());

        let mut planes = Self::new();
        for (i, &a) in elements.iter().enumerate() {
            for j in 0..P::GFBITS {
                planes.plane_mut(j)[i >> 3] |= (((a >> j) & 1) as u8) << (i & 7);
            }
        }
        planes
    }

    /// Reassembles the first `count` positions into field elements.
    #[must_use]
    pub fn to_elements(&self, count: usize) -> Vec<Gf> {
        debug_assert!(count <= P::field_size());

        (0..count)
            .map(|i| {
                (0..P::GFBITS).rev().fold(0, |acc, j| {
                    (acc << 1) | Gf::from((self.plane(j)[i >> 3] >> (i & 7)) & 1)
                })
            })
            .collect()
    }

    /// Plane `j`, 2^m bits packed LSB-first.
    #[must_use]
    pub fn plane(&self, j: usize) -> &[u8] {
        let len = P::plane_bytes();
        &self.bytes[j * len..(j + 1) * len]
    }

    /// Mutable plane `j`.
    pub fn plane_mut(&mut self, j: usize) -> &mut [u8] {
        let len = P::plane_bytes();
        &mut self.bytes[j * len..(j + 1) * len]
    }
}

impl<P: ParameterSet> Default for BitPlanes<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes every plane through the network configured by `bits`.
///
/// Forward application moves the bit at position `pi[x]` to position `x`,
/// where `pi` is the permutation the bits were computed from. With `reverse`
/// the layers run in the opposite order and the inverse is applied.
pub fn apply<P: ParameterSet>(planes: &mut BitPlanes<P>, bits: &ControlBits<P>, reverse: bool) {
    let m = P::GFBITS;
    let len = P::plane_bytes();
    let bytes = &mut planes.bytes;

    for_each_switch::<P>(bits.as_bytes(), reverse, |a, b, bit| {
        let (ai, ash) = (a >> 3, a & 7);
        let (bi, bsh) = (b >> 3, b & 7);
        for j in 0..m {
            let plane = &mut bytes[j * len..(j + 1) * len];
            let d = ((plane[ai] >> ash) ^ (plane[bi] >> bsh)) & bit;
            plane[ai] ^= d << ash;
            plane[bi] ^= d << bsh;
        }
    });
}

/// The support sequence `(α_0, ..., α_{n-1})` of a Goppa code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Support<P: ParameterSet> {
    elements: Vec<Gf>,
    _params: PhantomData<P>,
}

impl<P: ParameterSet> Support<P> {
    /// Returns the n support elements.
    #[must_use]
    pub fn as_slice(&self) -> &[Gf] {
        &self.elements
    }
}

impl<P: ParameterSet> Deref for Support<P> {
    type Target = [Gf];

    fn deref(&self) -> &[Gf] {
        &self.elements
    }
}

/// Derives the support from control bits.
///
/// Bit-slices the sequence `bitrev(0), bitrev(1), ...`, routes it forward
/// through the network and keeps the first n elements, so a network built
/// from `pi` gives `α_i = bitrev(pi[i])`.
#[must_use]
pub fn support_gen<P: ParameterSet>(bits: &ControlBits<P>) -> Support<P> {
    let canonical: Vec<Gf> = (0..P::field_size())
        .map(|i| gf::bitrev::<P>(i as Gf))
        .collect();

    let mut planes = BitPlanes::<P>::from_elements(&canonical);
    apply(&mut planes, bits, false);

    tracing::debug!(
        m = P::GFBITS,
        n = P::SYS_N,
        "generated support from control bits"
    );

    Support {
        elements: planes.to_elements(P::SYS_N),
        _params: PhantomData,
    }
}
