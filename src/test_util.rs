use rand_chacha::rand_core::{RngCore, SeedableRng};

use crate::{ParameterSet, param::Gf};

/// Deterministic tiny RNG for repeatable tests
pub struct TestRng {
    rng: rand_chacha::ChaCha8Rng,
}
impl TestRng {
    pub fn new() -> Self {
        let rng = rand_chacha::ChaCha8Rng::seed_from_u64(0xdead_beef);
        Self { rng }
    }
    pub fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }
    pub fn gen_usize(&mut self, upper: usize) -> usize {
        (self.next_u32() as usize) % upper
    }
    /// Uniform element of GF(2^m)
    pub fn gen_gf<P: ParameterSet>(&mut self) -> Gf {
        (self.next_u32() as Gf) & P::gf_mask()
    }
}

impl Default for TestRng {
    fn default() -> Self {
        Self::new()
    }
}

use std::vec::Vec;

/// `k` distinct nonzero field elements
pub fn distinct_nonzero<P: ParameterSet>(rng: &mut TestRng, k: usize) -> Vec<Gf> {
    assert!(k < P::field_size(), "only 2^m - 1 nonzero elements exist");

    let mut out = Vec::with_capacity(k);
    while out.len() < k {
        let a = rng.gen_gf::<P>();
        if a != 0 && !out.contains(&a) {
            out.push(a);
        }
    }
    out
}

/// Uniform permutation of `0..n` (Fisher-Yates)
pub fn random_permutation(rng: &mut TestRng, n: usize) -> Vec<u16> {
    let mut values: Vec<u16> = (0..n).map(|i| i as u16).collect();
    for i in (1..n).rev() {
        let j = rng.gen_usize(i + 1);
        values.swap(i, j);
    }
    values
}

/// Every permutation of `0..n` (Heap's algorithm); keep `n` small
pub fn all_permutations(n: usize) -> Vec<Vec<u16>> {
    let mut values: Vec<u16> = (0..n).map(|i| i as u16).collect();
    let mut counters = std::vec![0usize; n];
    let mut out = std::vec![values.clone()];

    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                values.swap(0, i);
            } else {
                values.swap(counters[i], i);
            }
            out.push(values.clone());
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
    out
}

// Toy parameter sets. Small enough to enumerate permutations and fields
// exhaustively; n = 2^m so the support covers the whole field.

/// GF(2^3) with z^3 + z + 1, t = 2
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct M3Params;
impl ParameterSet for M3Params {
    const GFBITS: usize = 3;
    const SYS_T: usize = 2;
    const SYS_N: usize = 8;
    const GF_POLY: u32 = 0xB;
    const POLY_TAIL: &'static [(usize, Gf)] = &[(1, 1), (0, 1)];

    type SysT = hybrid_array::sizes::U2;
    type SysT1 = hybrid_array::sizes::U3;
    type SysT2 = hybrid_array::sizes::U4;
}

/// GF(2^4) with z^4 + z + 1, t = 3
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct M4Params;
impl ParameterSet for M4Params {
    const GFBITS: usize = 4;
    const SYS_T: usize = 3;
    const SYS_N: usize = 16;
    const GF_POLY: u32 = 0x13;
    const POLY_TAIL: &'static [(usize, Gf)] = &[(1, 1), (0, 1)];

    type SysT = hybrid_array::sizes::U3;
    type SysT1 = hybrid_array::sizes::U4;
    type SysT2 = hybrid_array::sizes::U6;
}

/// GF(2^5) with z^5 + z^2 + 1, t = 4
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct M5Params;
impl ParameterSet for M5Params {
    const GFBITS: usize = 5;
    const SYS_T: usize = 4;
    const SYS_N: usize = 32;
    const GF_POLY: u32 = 0x25;
    const POLY_TAIL: &'static [(usize, Gf)] = &[(1, 1), (0, 1)];

    type SysT = hybrid_array::sizes::U4;
    type SysT1 = hybrid_array::sizes::U5;
    type SysT2 = hybrid_array::sizes::U8;
}

#[test]
fn heap_enumerates_every_permutation_once() {
    let mut all = all_permutations(4);
    assert_eq!(all.len(), 24);
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 24);
}
