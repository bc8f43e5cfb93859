//! AES-256 CTR-DRBG without derivation function.
//!
//! Spec: NIST SP 800-90A Rev. 1, §10.2.1 (CTR_DRBG), as used by the NIST PQC
//! known-answer-test generator.
//! Ref: `rng.c` shipped with the NIST PQC submission packages
//!      (randombytes_init, randombytes, AES256_CTR_DRBG_Update).
//!
//! The state is a plain value: every operation consumes a [`DrbgState`] and
//! returns the next one. Two call sites that each own a state never interact,
//! and replaying the same entropy and request sizes replays the same bytes.

use aes::Aes256;
use aes::cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray};
use alloc::vec::Vec;
use core::fmt;
use rand_core::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Entropy input length: key length plus block length.
pub const SEED_BYTES: usize = 48;

const KEY_BYTES: usize = 32;
const BLOCK_BYTES: usize = 16;

/// Generator state `(key, v)`.
///
/// Not comparable, and `Debug` hides the contents. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DrbgState {
    key: [u8; KEY_BYTES],
    v: [u8; BLOCK_BYTES],
}

impl fmt::Debug for DrbgState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrbgState").finish_non_exhaustive()
    }
}

/// Single-block AES-256 encryption, no chaining.
fn aes256_ecb(key: &[u8; KEY_BYTES], block: &[u8; BLOCK_BYTES]) -> [u8; BLOCK_BYTES] {
    let cipher = Aes256::new(GenericArray::from_slice(key));
    let mut buf = GenericArray::clone_from_slice(block);
    cipher.encrypt_block(&mut buf);

    let mut out = [0u8; BLOCK_BYTES];
    out.copy_from_slice(&buf);
    out
}

/// Adds one to `v` as a big-endian 128-bit integer, wrapping at 2^128.
#[inline]
fn increment(v: &mut [u8; BLOCK_BYTES]) {
    let next = u128::from_be_bytes(*v).wrapping_add(1);
    *v = next.to_be_bytes();
}

impl DrbgState {
    /// Instantiates the generator: zero key and counter, then one update with
    /// the entropy as provided data.
    #[must_use]
    pub fn init(entropy: &[u8; SEED_BYTES]) -> Self {
        let zero = Self {
            key: [0u8; KEY_BYTES],
            v: [0u8; BLOCK_BYTES],
        };
        zero.update(Some(entropy))
    }

    /// CTR_DRBG_Update: three counter blocks of keystream, optionally XORed
    /// with 48 bytes of provided data, become the next key and counter.
    #[must_use]
    fn update(&self, provided: Option<&[u8; SEED_BYTES]>) -> Self {
        let mut v = self.v;
        let mut temp = [0u8; SEED_BYTES];
        for chunk in temp.chunks_exact_mut(BLOCK_BYTES) {
            increment(&mut v);
            chunk.copy_from_slice(&aes256_ecb(&self.key, &v));
        }

        if let Some(data) = provided {
            for (t, d) in temp.iter_mut().zip(data) {
                *t ^= d;
            }
        }

        let mut next = Self {
            key: [0u8; KEY_BYTES],
            v: [0u8; BLOCK_BYTES],
        };
        next.key.copy_from_slice(&temp[..KEY_BYTES]);
        next.v.copy_from_slice(&temp[KEY_BYTES..]);

        temp.zeroize();
        v.zeroize();
        next
    }

    /// Fills `out` with generator output and returns the refreshed state.
    ///
    /// Output blocks are `AES(key, ++v)`; the final block is truncated. The
    /// closing update replaces key and counter, so earlier output cannot be
    /// recomputed from the returned state.
    #[must_use]
    pub fn fill(self, out: &mut [u8]) -> Self {
        tracing::trace!(bytes = out.len(), "ctr-drbg generate");

        let mut working = self.clone();
        for chunk in out.chunks_mut(BLOCK_BYTES) {
            increment(&mut working.v);
            let block = aes256_ecb(&working.key, &working.v);
            chunk.copy_from_slice(&block[..chunk.len()]);
        }

        working.update(None)
    }

    /// Returns `n` bytes of output together with the refreshed state.
    #[must_use]
    pub fn generate(self, n: usize) -> (Vec<u8>, Self) {
        let mut out = alloc::vec![0u8; n];
        let next = self.fill(&mut out);
        (out, next)
    }
}

/// `rand_core` view of the generator, for code that wants an `RngCore`.
///
/// Each request is one generate call, exactly like the reference
/// `randombytes`, so a sequence of `fill_bytes` calls reproduces the NIST
/// known-answer streams request by request.
#[derive(Clone, Debug)]
pub struct KatRng {
    state: DrbgState,
}

impl KatRng {
    /// Instantiates from 48 bytes of entropy.
    #[must_use]
    pub fn new(entropy: &[u8; SEED_BYTES]) -> Self {
        Self {
            state: DrbgState::init(entropy),
        }
    }

    /// Gives back the current state.
    #[must_use]
    pub fn into_state(self) -> DrbgState {
        self.state
    }

    fn advance(&mut self, out: &mut [u8]) {
        let state = self.state.clone();
        self.state = state.fill(out);
    }
}

impl From<DrbgState> for KatRng {
    fn from(state: DrbgState) -> Self {
        Self { state }
    }
}

impl RngCore for KatRng {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.advance(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.advance(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.advance(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.advance(dest);
        Ok(())
    }
}

impl CryptoRng for KatRng {}

#[cfg(test)]
mod tests {
    use super::*;

    fn nist_entropy() -> [u8; SEED_BYTES] {
        core::array::from_fn(|i| i as u8)
    }

    #[test]
    fn increment_wraps_and_carries() {
        let mut v = [0xffu8; BLOCK_BYTES];
        increment(&mut v);
        assert_eq!(v, [0u8; BLOCK_BYTES]);

        let mut v = [0u8; BLOCK_BYTES];
        v[15] = 0xff;
        increment(&mut v);
        assert_eq!(v[14], 1);
        assert_eq!(v[15], 0);
    }

    #[test]
    fn aes256_known_answer() {
        // FIPS-197 Appendix C.3
        let key: [u8; 32] = core::array::from_fn(|i| i as u8);
        let plaintext: [u8; 16] = core::array::from_fn(|i| (i as u8) * 0x11);
        let expected = hex::decode("8ea2b7ca516745bfeafc49904b496089").unwrap();
        assert_eq!(aes256_ecb(&key, &plaintext).as_slice(), expected.as_slice());
    }

    #[test]
    fn nist_pqc_seed_sequence() {
        // `seed` of count = 0 and count = 1 in every NIST PQC .rsp file
        let state = DrbgState::init(&nist_entropy());
        let (first, state) = state.generate(48);
        let (second, _) = state.generate(48);

        assert_eq!(
            hex::encode_upper(first),
            "061550234D158C5EC95595FE04EF7A25767F2E24CC2BC479D09D86DC9ABCFDE7\
             056A8C266F9EF97ED08541DBD2E1FFA1"
        );
        assert_eq!(
            hex::encode_upper(second),
            "D81C4D8D734FCBFBEADE3D3F8A039FAA2A2C9957E835AD55B22E75BF57BB556A\
             C81ADDE6AEEB4A5A875C3BFCADFA958F"
        );
    }

    #[test]
    fn zero_seed_known_answer() {
        let (out, _) = DrbgState::init(&[0u8; SEED_BYTES]).generate(32);
        assert_eq!(
            hex::encode(out),
            "91618fe99a8f9420497b246f735b27a019078a9d3ca6b2a001aec0b9e07e680b"
        );
    }

    #[test]
    fn same_seed_same_stream() {
        let seed = [0x11u8; SEED_BYTES];
        let (a, _) = DrbgState::init(&seed).generate(32);
        let (b, _) = DrbgState::init(&seed).generate(32);
        assert_eq!(a, b);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn prefix_is_stable_within_one_request() {
        let seed = nist_entropy();
        let (short, _) = DrbgState::init(&seed).generate(20);
        let (long, _) = DrbgState::init(&seed).generate(100);
        assert_eq!(short.as_slice(), &long[..20]);
    }

    #[test]
    fn refreshed_state_does_not_replay_output() {
        let seed = nist_entropy();
        let (first, state) = DrbgState::init(&seed).generate(64);
        let (second, _) = state.generate(64);
        assert_ne!(first, second);
        assert_ne!(&first[..16], &second[..16]);
    }

    #[test]
    fn fill_matches_generate() {
        let seed = [7u8; SEED_BYTES];
        let mut buf = [0u8; 37];
        let s1 = DrbgState::init(&seed).fill(&mut buf);
        let (bytes, s2) = DrbgState::init(&seed).generate(37);
        assert_eq!(buf.as_slice(), bytes.as_slice());

        let (n1, _) = s1.generate(16);
        let (n2, _) = s2.generate(16);
        assert_eq!(n1, n2);
    }

    #[test]
    fn empty_request_still_refreshes() {
        let seed = [3u8; SEED_BYTES];
        let (empty, state) = DrbgState::init(&seed).generate(0);
        assert!(empty.is_empty());

        let (after_empty, _) = state.generate(16);
        let (direct, _) = DrbgState::init(&seed).generate(16);
        assert_ne!(after_empty, direct);
    }

    #[test]
    fn rng_adapter_follows_request_boundaries() {
        let mut rng = KatRng::new(&nist_entropy());
        let mut first = [0u8; 48];
        rng.fill_bytes(&mut first);

        let (expected, _) = DrbgState::init(&nist_entropy()).generate(48);
        assert_eq!(first.as_slice(), expected.as_slice());

        let w1 = rng.next_u64();
        let w2 = rng.next_u64();
        assert_ne!(w1, w2);
    }
}
