#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//!
//! # Security Warning
//!
//! **DO NOT USE THIS LIBRARY IN PRODUCTION.**
//!
//! This is an educational implementation for learning and experimentation.
//! It has not been audited, may contain timing side-channels, and provides
//! no security guarantees.
//!
//! # Usage
//!
//! ```
//! use mceliece_core::{DrbgState, Permutation, benes, controlbits, gf};
//! use mceliece_core::{ParameterSet, mceliece348864::McEliece348864Params as P};
//!
//! // Obviously don't do this irl
//! let state = DrbgState::init(&[0x42u8; 48]);
//! let (bytes, _state) = state.generate(4 * P::field_size());
//! let words: Vec<u32> = bytes
//!     .chunks_exact(4)
//!     .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
//!     .collect();
//!
//! // Repeated words are rejected; key generation then draws fresh ones.
//! if let Ok(pi) = Permutation::<P>::from_field_ordering(&words) {
//!     let bits = controlbits::encode(&pi);
//!     let support = benes::support_gen(&bits);
//!     assert_eq!(support.len(), P::SYS_N);
//!     assert_eq!(support[0], gf::bitrev::<P>(pi[0]));
//! }
//! ```

extern crate alloc;

#[cfg(test)]
extern crate std;

#[cfg(test)]
mod test_util;

/// §2.1
pub mod gf;

/// §2.2
pub mod poly;

/// §2.3
pub mod bm;

mod sort;

/// §2.4
pub mod controlbits;

/// §2.4
pub mod benes;

/// NIST SP 800-90A
pub mod drbg;

mod error;

/// Parameter sets
mod param;

pub use benes::{BitPlanes, Support};
pub use controlbits::{ControlBits, Permutation};
pub use drbg::{DrbgState, KatRng};
pub use error::{Error, Result};
pub use param::{ExtElement, Gf, ParameterSet, Poly, Syndromes};

/// mceliece348864 parameter set (NIST Security Level 1)
pub mod mceliece348864 {
    use super::{ParameterSet, param::Gf};
    use hybrid_array::sizes::{U64, U65, U128};

    /// mceliece348864 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct McEliece348864Params;

    impl ParameterSet for McEliece348864Params {
        const GFBITS: usize = 12;
        const SYS_T: usize = 64;
        const SYS_N: usize = 3488;
        const GF_POLY: u32 = 0x1009; // z^12 + z^3 + 1
        // y^64 + y^3 + y + z
        const POLY_TAIL: &'static [(usize, Gf)] = &[(3, 1), (1, 1), (0, 2)];

        type SysT = U64;
        type SysT1 = U65;
        type SysT2 = U128;
    }
}

/// mceliece460896 parameter set (NIST Security Level 3)
pub mod mceliece460896 {
    use super::{ParameterSet, param::Gf};
    use hybrid_array::sizes::{U96, U97, U192};

    /// mceliece460896 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct McEliece460896Params;

    impl ParameterSet for McEliece460896Params {
        const GFBITS: usize = 13;
        const SYS_T: usize = 96;
        const SYS_N: usize = 4608;
        const GF_POLY: u32 = 0x201B; // z^13 + z^4 + z^3 + z + 1
        // y^96 + y^10 + y^9 + y^6 + 1
        const POLY_TAIL: &'static [(usize, Gf)] = &[(10, 1), (9, 1), (6, 1), (0, 1)];

        type SysT = U96;
        type SysT1 = U97;
        type SysT2 = U192;
    }
}

/// mceliece6688128 parameter set (NIST Security Level 5)
pub mod mceliece6688128 {
    use super::{ParameterSet, param::Gf};
    use hybrid_array::sizes::{U128, U129, U256};

    /// mceliece6688128 parameter set implementation
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct McEliece6688128Params;

    impl ParameterSet for McEliece6688128Params {
        const GFBITS: usize = 13;
        const SYS_T: usize = 128;
        const SYS_N: usize = 6688;
        const GF_POLY: u32 = 0x201B;
        // y^128 + y^7 + y^2 + y + 1
        const POLY_TAIL: &'static [(usize, Gf)] = &[(7, 1), (2, 1), (1, 1), (0, 1)];

        type SysT = U128;
        type SysT1 = U129;
        type SysT2 = U256;
    }
}

/// mceliece8192128 parameter set (NIST Security Level 5)
pub mod mceliece8192128 {
    use super::{ParameterSet, param::Gf};
    use hybrid_array::sizes::{U128, U129, U256};

    /// mceliece8192128 parameter set implementation
    ///
    /// n = 2^m, so the support is the whole field in permuted order.
    #[derive(Default, Clone, Debug, PartialEq, Eq)]
    pub struct McEliece8192128Params;

    impl ParameterSet for McEliece8192128Params {
        const GFBITS: usize = 13;
        const SYS_T: usize = 128;
        const SYS_N: usize = 8192;
        const GF_POLY: u32 = 0x201B;
        const POLY_TAIL: &'static [(usize, Gf)] = &[(7, 1), (2, 1), (1, 1), (0, 1)];

        type SysT = U128;
        type SysT1 = U129;
        type SysT2 = U256;
    }
}
